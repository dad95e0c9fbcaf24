//! Operating setpoints for one cycle evaluation.

use crate::error::{CycleError, EngineResult};
use rc_core::numeric::{ensure_finite, ensure_non_negative};
use rc_core::units::{
    TempInterval, Temperature, degc, delta_k, interval_k, offset, temperature_c, temperature_k,
};
use rc_fluids::Refrigerant;

/// Inputs of a single cycle calculation.
///
/// Temperatures are absolute; superheat and subcooling are differences.
/// Nothing is checked at construction: [`CycleSetpoint::validate`] runs on
/// every evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleSetpoint {
    pub evaporation_temperature: Temperature,
    pub condensation_temperature: Temperature,
    /// Refrigerant id as given by the caller ("R404A", "R-134a", "propane").
    pub refrigerant_id: String,
    pub superheat: TempInterval,
    pub subcooling: TempInterval,
}

impl CycleSetpoint {
    pub fn new(
        evaporation_temperature: Temperature,
        condensation_temperature: Temperature,
        refrigerant_id: impl Into<String>,
        superheat: TempInterval,
        subcooling: TempInterval,
    ) -> Self {
        Self {
            evaporation_temperature,
            condensation_temperature,
            refrigerant_id: refrigerant_id.into(),
            superheat,
            subcooling,
        }
    }

    /// Convenience constructor from °C and K values.
    pub fn from_celsius(
        evaporation_c: f64,
        condensation_c: f64,
        refrigerant_id: impl Into<String>,
        superheat_k: f64,
        subcooling_k: f64,
    ) -> Self {
        Self::new(
            degc(evaporation_c),
            degc(condensation_c),
            refrigerant_id,
            delta_k(superheat_k),
            delta_k(subcooling_k),
        )
    }

    pub fn evaporation_c(&self) -> f64 {
        temperature_c(self.evaporation_temperature)
    }

    pub fn condensation_c(&self) -> f64 {
        temperature_c(self.condensation_temperature)
    }

    pub fn superheat_k(&self) -> f64 {
        interval_k(self.superheat)
    }

    pub fn subcooling_k(&self) -> f64 {
        interval_k(self.subcooling)
    }

    /// Temperature lift T_cond − T_evap [K].
    pub fn lift_k(&self) -> f64 {
        temperature_k(self.condensation_temperature) - temperature_k(self.evaporation_temperature)
    }

    /// Compressor suction temperature T_evap + superheat.
    pub fn suction_temperature(&self) -> Temperature {
        offset(self.evaporation_temperature, self.superheat)
    }

    /// Liquid temperature leaving the condenser, T_cond − subcooling.
    pub fn liquid_temperature(&self) -> Temperature {
        offset(self.condensation_temperature, -self.subcooling)
    }

    /// Check physical consistency and resolve the refrigerant id.
    pub fn validate(&self) -> EngineResult<Refrigerant> {
        let t_evap = ensure_finite(
            temperature_k(self.evaporation_temperature),
            "evaporation temperature",
        )?;
        let t_cond = ensure_finite(
            temperature_k(self.condensation_temperature),
            "condensation temperature",
        )?;
        let superheat = ensure_non_negative(self.superheat_k(), "superheat")?;
        let subcooling = ensure_non_negative(self.subcooling_k(), "subcooling")?;

        if t_evap <= 0.0 {
            return Err(CycleError::invalid(
                "evaporation temperature must be above absolute zero",
            ));
        }
        if t_evap >= t_cond {
            return Err(CycleError::invalid(format!(
                "evaporation temperature ({:.2} °C) must be below condensation temperature ({:.2} °C)",
                self.evaporation_c(),
                self.condensation_c()
            )));
        }
        if t_cond - subcooling <= 0.0 {
            return Err(CycleError::invalid(
                "subcooled liquid temperature must be above absolute zero",
            ));
        }

        self.refrigerant_id
            .parse::<Refrigerant>()
            .map_err(|_| CycleError::UnsupportedRefrigerant {
                id: self.refrigerant_id.clone(),
            })
    }
}
