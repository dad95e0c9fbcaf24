//! Analytic property model for unit tests.
//!
//! Clausius–Clapeyron saturation curve, constant liquid heat capacity,
//! constant latent heat and constant vapor heat capacity. Crude, but smooth
//! and monotonic, so the engine can be exercised without CoolProp.

use rc_core::units::{Pressure, Temperature, k, pa, pressure_pa, temperature_k};
use rc_fluids::{
    FluidError, FluidPoint, FluidResult, PropertyModel, Refrigerant, SaturationAt,
    SaturationLine, SpecEnthalpy, SpecEntropy,
};

const T0: f64 = 233.15;
const P0: f64 = 100_000.0;
const B: f64 = 2_500.0;
const C_LIQ: f64 = 500.0;
const C_VAP: f64 = 800.0;
const LATENT: f64 = 200_000.0;
const T_CRIT: f64 = 370.0;

pub(crate) struct AnalyticModel {
    /// Only this refrigerant is "supported".
    pub supported: Refrigerant,
}

impl Default for AnalyticModel {
    fn default() -> Self {
        Self {
            supported: Refrigerant::R134a,
        }
    }
}

fn p_sat(t: f64) -> f64 {
    P0 * (B * (1.0 / T0 - 1.0 / t)).exp()
}

fn t_sat(p: f64) -> f64 {
    1.0 / (1.0 / T0 - (p / P0).ln() / B)
}

fn h_liq(t: f64) -> f64 {
    C_LIQ * (t - T0)
}

fn s_liq(t: f64) -> f64 {
    C_LIQ * (t / T0).ln()
}

fn sat_point(t: f64, line: SaturationLine) -> FluidResult<FluidPoint> {
    if t >= T_CRIT {
        return Err(FluidError::OutOfRange {
            what: "above critical temperature",
        });
    }
    let (h, s) = match line {
        SaturationLine::Liquid => (h_liq(t), s_liq(t)),
        SaturationLine::Vapor => (h_liq(t) + LATENT, s_liq(t) + LATENT / t),
    };
    FluidPoint::new(pa(p_sat(t)), k(t), h, s, Some(line.quality()))
}

impl AnalyticModel {
    fn check(&self, refrigerant: Refrigerant) -> FluidResult<()> {
        if refrigerant != self.supported {
            return Err(FluidError::NotSupported {
                what: "analytic model covers one refrigerant",
            });
        }
        Ok(())
    }

    fn resolve(&self, p: f64, target: f64, entropy: bool) -> FluidResult<FluidPoint> {
        let ts = t_sat(p);
        let liquid = sat_point(ts, SaturationLine::Liquid)?;
        let vapor = sat_point(ts, SaturationLine::Vapor)?;
        let pick = |pt: &FluidPoint| if entropy { pt.entropy } else { pt.enthalpy };
        let (lo, hi) = (pick(&liquid), pick(&vapor));

        if target >= lo && target <= hi {
            return FluidPoint::two_phase(&liquid, &vapor, (target - lo) / (hi - lo));
        }
        if target > hi {
            let t = if entropy {
                ts * ((target - hi) / C_VAP).exp()
            } else {
                ts + (target - hi) / C_VAP
            };
            let h = vapor.enthalpy + C_VAP * (t - ts);
            let s = vapor.entropy + C_VAP * (t / ts).ln();
            return FluidPoint::new(pa(p), k(t), h, s, None);
        }
        let t = if entropy {
            T0 * (target / C_LIQ).exp()
        } else {
            T0 + target / C_LIQ
        };
        FluidPoint::new(pa(p), k(t), h_liq(t), s_liq(t), None)
    }
}

impl PropertyModel for AnalyticModel {
    fn name(&self) -> &str {
        "analytic"
    }

    fn supports(&self, refrigerant: Refrigerant) -> bool {
        refrigerant == self.supported
    }

    fn saturated(
        &self,
        refrigerant: Refrigerant,
        at: SaturationAt,
        line: SaturationLine,
    ) -> FluidResult<FluidPoint> {
        self.check(refrigerant)?;
        let t = match at {
            SaturationAt::Temperature(t) => temperature_k(t),
            SaturationAt::Pressure(p) => t_sat(pressure_pa(p)),
        };
        sat_point(t, line)
    }

    fn state_pt(
        &self,
        refrigerant: Refrigerant,
        p: Pressure,
        t: Temperature,
    ) -> FluidResult<FluidPoint> {
        self.check(refrigerant)?;
        let (p, t) = (pressure_pa(p), temperature_k(t));
        let ts = t_sat(p);
        if t > ts {
            let vapor = sat_point(ts, SaturationLine::Vapor)?;
            let h = vapor.enthalpy + C_VAP * (t - ts);
            let s = vapor.entropy + C_VAP * (t / ts).ln();
            FluidPoint::new(pa(p), k(t), h, s, None)
        } else {
            FluidPoint::new(pa(p), k(t), h_liq(t), s_liq(t), None)
        }
    }

    fn state_ps(
        &self,
        refrigerant: Refrigerant,
        p: Pressure,
        s: SpecEntropy,
    ) -> FluidResult<FluidPoint> {
        self.check(refrigerant)?;
        self.resolve(pressure_pa(p), s, true)
    }

    fn state_ph(
        &self,
        refrigerant: Refrigerant,
        p: Pressure,
        h: SpecEnthalpy,
    ) -> FluidResult<FluidPoint> {
        self.check(refrigerant)?;
        self.resolve(pressure_pa(p), h, false)
    }
}
