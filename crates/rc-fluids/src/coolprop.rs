//! CoolProp-based refrigerant property model.

use crate::error::{FluidError, FluidResult};
use crate::model::{PropertyModel, validation};
use crate::refrigerant::{Refrigerant, Substance};
use crate::state::{FluidPoint, SaturationAt, SaturationLine, SpecEnthalpy, SpecEntropy};
use rc_core::units::{Pressure, Temperature, k, pa, pressure_pa, temperature_k};
use rfluids::prelude::*;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, trace};

/// Upper bracket offsets above the dew point for superheated vapor [K],
/// widest first. Narrower spans are tried when CoolProp rejects the wide one.
const SUPERHEAT_SPANS_K: [f64; 5] = [250.0, 150.0, 80.0, 40.0, 15.0];

/// Lower bracket offsets below the bubble point for subcooled liquid [K].
const SUBCOOL_SPANS_K: [f64; 4] = [60.0, 30.0, 10.0, 2.0];

/// Lowest temperature ever handed to CoolProp [K].
const T_FLOOR_K: f64 = 100.0;

const MAX_ITER: usize = 100;

/// Bracket width below which bisection stops refining [K].
const T_RESOLUTION_K: f64 = 1e-9;

/// Caloric property being inverted at fixed pressure.
#[derive(Debug, Clone, Copy)]
enum Caloric {
    Enthalpy,
    Entropy,
}

impl Caloric {
    fn of(self, point: &FluidPoint) -> f64 {
        match self {
            Caloric::Enthalpy => point.enthalpy,
            Caloric::Entropy => point.entropy,
        }
    }

    fn tolerance(self, target: f64) -> f64 {
        let floor = match self {
            Caloric::Enthalpy => 1e-3,
            Caloric::Entropy => 1e-6,
        };
        f64::max(floor, target.abs() * 1e-10)
    }

    fn out_of_range(self) -> FluidError {
        match self {
            Caloric::Enthalpy => FluidError::OutOfRange {
                what: "enthalpy outside bracket for given pressure",
            },
            Caloric::Entropy => FluidError::OutOfRange {
                what: "entropy outside bracket for given pressure",
            },
        }
    }
}

/// CoolProp backend for refrigerant properties.
///
/// Supports the pure refrigerants and predefined blends listed in
/// [`Refrigerant`]. Each lookup builds its own rfluids `Fluid`, so the model
/// holds no per-state data and can be shared across threads. Use
/// [`CoolPropModel::serialized`] to force one lookup at a time through the
/// native library.
pub struct CoolPropModel {
    gate: Option<Mutex<()>>,
}

impl CoolPropModel {
    /// Create a new CoolProp model.
    pub fn new() -> Self {
        Self { gate: None }
    }

    /// Create a model that serializes every lookup behind a mutex.
    pub fn serialized() -> Self {
        Self {
            gate: Some(Mutex::new(())),
        }
    }

    pub fn is_serialized(&self) -> bool {
        self.gate.is_some()
    }

    fn lock(&self) -> FluidResult<Option<MutexGuard<'_, ()>>> {
        match &self.gate {
            Some(gate) => gate.lock().map(Some).map_err(|_| FluidError::Backend {
                message: "CoolProp lookup lock poisoned".into(),
            }),
            None => Ok(None),
        }
    }

    /// Create a Fluid instance fixed by two inputs.
    fn fluid_in_state(
        substance: Substance,
        first: FluidInput,
        second: FluidInput,
    ) -> Result<Fluid, String> {
        let fluid = match substance {
            Substance::Pure(pure) => Fluid::from(pure).in_state(first, second),
            Substance::Blend(mix) => Fluid::from(mix).in_state(first, second),
        };
        fluid.map_err(|e| format!("{}", e))
    }

    /// Read the four state properties back from a defined fluid.
    fn read_point(fluid: &mut Fluid, quality: Option<f64>) -> FluidResult<FluidPoint> {
        let backend = |what: &str, e: String| FluidError::Backend {
            message: format!("rfluids error getting {}: {}", what, e),
        };
        let p = fluid.pressure().map_err(|e| backend("pressure", format!("{}", e)))?;
        let t = fluid
            .temperature()
            .map_err(|e| backend("temperature", format!("{}", e)))?;
        let h = fluid
            .enthalpy()
            .map_err(|e| backend("enthalpy", format!("{}", e)))?;
        let s = fluid
            .entropy()
            .map_err(|e| backend("entropy", format!("{}", e)))?;
        FluidPoint::new(pa(p), k(t), h, s, quality)
    }

    fn lookup_pt(&self, substance: Substance, p_pa: f64, t_k: f64) -> FluidResult<FluidPoint> {
        trace!(p_pa, t_k, "CoolProp PT lookup");
        let mut fluid = Self::fluid_in_state(
            substance,
            FluidInput::pressure(p_pa),
            FluidInput::temperature(t_k),
        )
        .map_err(|e| FluidError::Backend {
            message: format!("rfluids error at P={} Pa, T={} K: {}", p_pa, t_k, e),
        })?;
        Self::read_point(&mut fluid, None)
    }

    fn lookup_saturated(
        &self,
        substance: Substance,
        at: SaturationAt,
        line: SaturationLine,
    ) -> FluidResult<FluidPoint> {
        let q = line.quality();
        let (first, label, value) = match at {
            SaturationAt::Temperature(t) => {
                let t_k = temperature_k(t);
                (FluidInput::temperature(t_k), "T", t_k)
            }
            SaturationAt::Pressure(p) => {
                let p_pa = pressure_pa(p);
                (FluidInput::pressure(p_pa), "P", p_pa)
            }
        };
        trace!(label, value, q, "CoolProp saturation lookup");
        let mut fluid = Self::fluid_in_state(substance, first, FluidInput::quality(q)).map_err(
            |e| FluidError::Backend {
                message: format!("rfluids saturation error at {}={}, Q={}: {}", label, value, q, e),
            },
        )?;
        Self::read_point(&mut fluid, Some(q))
    }

    /// First PT point that CoolProp accepts among candidate temperatures.
    fn first_valid_pt(
        &self,
        substance: Substance,
        p_pa: f64,
        temperatures: impl Iterator<Item = f64>,
    ) -> FluidResult<FluidPoint> {
        let mut last_err = FluidError::OutOfRange {
            what: "no valid temperature bracket",
        };
        for t_k in temperatures {
            match self.lookup_pt(substance, p_pa, t_k) {
                Ok(point) => return Ok(point),
                Err(e) => last_err = e,
            }
        }
        Err(last_err)
    }

    /// Resolve the point at pressure `p` where `caloric` equals `target`.
    ///
    /// Inside the dome the lever rule between saturated liquid and vapor is
    /// used. Outside it, temperature is bisected on PT lookups with the
    /// saturation point as the bracket end nearest the dome.
    fn resolve_at_pressure(
        &self,
        refrigerant: Refrigerant,
        p: Pressure,
        target: f64,
        caloric: Caloric,
    ) -> FluidResult<FluidPoint> {
        let substance = refrigerant.substance();
        let p_pa = pressure_pa(p);
        let at = SaturationAt::Pressure(p);

        let liquid = self.lookup_saturated(substance, at, SaturationLine::Liquid)?;
        let vapor = self.lookup_saturated(substance, at, SaturationLine::Vapor)?;
        let v_liq = caloric.of(&liquid);
        let v_vap = caloric.of(&vapor);

        if v_vap <= v_liq {
            return Err(FluidError::OutOfRange {
                what: "pressure at or above the critical point",
            });
        }

        if target >= v_liq && target <= v_vap {
            let x = (target - v_liq) / (v_vap - v_liq);
            return FluidPoint::two_phase(&liquid, &vapor, x);
        }

        let (lo, hi) = if target > v_vap {
            let t_dew = vapor.temperature_k();
            let hi = self.first_valid_pt(
                substance,
                p_pa,
                SUPERHEAT_SPANS_K.iter().map(|span| t_dew + span),
            )?;
            (vapor, hi)
        } else {
            let t_bubble = liquid.temperature_k();
            let lo = self.first_valid_pt(
                substance,
                p_pa,
                SUBCOOL_SPANS_K
                    .iter()
                    .map(|span| f64::max(t_bubble - span, T_FLOOR_K)),
            )?;
            (lo, liquid)
        };

        if target < caloric.of(&lo) || target > caloric.of(&hi) {
            return Err(caloric.out_of_range());
        }

        self.bisect(substance, p_pa, target, caloric, lo, hi)
    }

    /// Bisection on temperature at fixed pressure.
    fn bisect(
        &self,
        substance: Substance,
        p_pa: f64,
        target: f64,
        caloric: Caloric,
        mut lo: FluidPoint,
        mut hi: FluidPoint,
    ) -> FluidResult<FluidPoint> {
        let tol = caloric.tolerance(target);

        for iter in 0..MAX_ITER {
            let t_mid = 0.5 * (lo.temperature_k() + hi.temperature_k());
            let mid = self.lookup_pt(substance, p_pa, t_mid)?;
            let value = caloric.of(&mid);

            if (value - target).abs() < tol || hi.temperature_k() - lo.temperature_k() < T_RESOLUTION_K
            {
                debug!(?caloric, p_pa, target, iterations = iter + 1, t_k = t_mid, "bisection converged");
                return Ok(mid);
            }

            if value < target {
                lo = mid;
            } else {
                hi = mid;
            }
        }

        Err(FluidError::ConvergenceFailed {
            what: "temperature at fixed pressure",
        })
    }
}

impl Default for CoolPropModel {
    fn default() -> Self {
        Self::new()
    }
}

impl PropertyModel for CoolPropModel {
    fn name(&self) -> &str {
        "CoolProp"
    }

    fn supports(&self, _refrigerant: Refrigerant) -> bool {
        // Every catalog refrigerant maps onto an rfluids pure fluid or predefined mix.
        true
    }

    fn saturated(
        &self,
        refrigerant: Refrigerant,
        at: SaturationAt,
        line: SaturationLine,
    ) -> FluidResult<FluidPoint> {
        validation::validate_saturation_at(at)?;
        let _guard = self.lock()?;
        self.lookup_saturated(refrigerant.substance(), at, line)
    }

    fn state_pt(
        &self,
        refrigerant: Refrigerant,
        p: Pressure,
        t: Temperature,
    ) -> FluidResult<FluidPoint> {
        validation::validate_pressure(p)?;
        validation::validate_temperature(t)?;
        let _guard = self.lock()?;
        self.lookup_pt(refrigerant.substance(), pressure_pa(p), temperature_k(t))
    }

    fn state_ps(
        &self,
        refrigerant: Refrigerant,
        p: Pressure,
        s: SpecEntropy,
    ) -> FluidResult<FluidPoint> {
        validation::validate_pressure(p)?;
        validation::validate_entropy(s)?;
        let _guard = self.lock()?;
        self.resolve_at_pressure(refrigerant, p, s, Caloric::Entropy)
    }

    fn state_ph(
        &self,
        refrigerant: Refrigerant,
        p: Pressure,
        h: SpecEnthalpy,
    ) -> FluidResult<FluidPoint> {
        validation::validate_pressure(p)?;
        validation::validate_enthalpy(h)?;
        let _guard = self.lock()?;
        self.resolve_at_pressure(refrigerant, p, h, Caloric::Enthalpy)
    }

    fn critical_point(&self, refrigerant: Refrigerant) -> Option<(Temperature, Pressure)> {
        let _guard = self.lock().ok()?;
        let (t_crit, p_crit) = match refrigerant.substance() {
            Substance::Pure(pure) => {
                let mut fluid = Fluid::from(pure);
                (fluid.critical_temperature().ok()?, fluid.critical_pressure().ok()?)
            }
            Substance::Blend(mix) => {
                let mut fluid = Fluid::from(mix);
                (fluid.critical_temperature().ok()?, fluid.critical_pressure().ok()?)
            }
        };
        Some((k(t_crit), pa(p_crit)))
    }
}
