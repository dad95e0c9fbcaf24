//! Property model trait and validation helpers.

use crate::error::{FluidError, FluidResult};
use crate::refrigerant::Refrigerant;
use crate::state::{FluidPoint, SaturationAt, SaturationLine, SpecEnthalpy, SpecEntropy};
use rc_core::units::{Pressure, Temperature};

/// Trait for refrigerant property models.
///
/// Implementations must be thread-safe (Send + Sync) so independent cycle
/// evaluations can run in parallel. All methods validate inputs and return
/// physically plausible points or an error; they never panic.
pub trait PropertyModel: Send + Sync {
    /// Get the model name (for debugging/logging).
    fn name(&self) -> &str;

    /// Check if this model can answer lookups for `refrigerant`.
    fn supports(&self, refrigerant: Refrigerant) -> bool;

    /// Saturated liquid (bubble) or vapor (dew) point at a temperature or pressure.
    fn saturated(
        &self,
        refrigerant: Refrigerant,
        at: SaturationAt,
        line: SaturationLine,
    ) -> FluidResult<FluidPoint>;

    /// Saturation pressure at `t` on the requested line.
    fn saturation_pressure(
        &self,
        refrigerant: Refrigerant,
        t: Temperature,
        line: SaturationLine,
    ) -> FluidResult<Pressure> {
        self.saturated(refrigerant, SaturationAt::Temperature(t), line)
            .map(|point| point.pressure)
    }

    /// Single-phase point from pressure and temperature.
    fn state_pt(&self, refrigerant: Refrigerant, p: Pressure, t: Temperature)
    -> FluidResult<FluidPoint>;

    /// Point from pressure and specific entropy (isentropic compression target).
    fn state_ps(&self, refrigerant: Refrigerant, p: Pressure, s: SpecEntropy)
    -> FluidResult<FluidPoint>;

    /// Point from pressure and specific enthalpy (throttling, real compression).
    fn state_ph(
        &self,
        refrigerant: Refrigerant,
        p: Pressure,
        h: SpecEnthalpy,
    ) -> FluidResult<FluidPoint>;

    /// Critical temperature and pressure, when the backend can report them.
    fn critical_point(&self, _refrigerant: Refrigerant) -> Option<(Temperature, Pressure)> {
        None
    }
}

/// Validation helpers for property inputs.
pub(crate) mod validation {
    use super::*;
    use rc_core::units::{pressure_pa, temperature_k};

    /// Ensure pressure is positive and finite.
    pub fn validate_pressure(p: Pressure) -> FluidResult<()> {
        let v = pressure_pa(p);
        if !v.is_finite() || v <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "pressure must be positive and finite",
            });
        }
        Ok(())
    }

    /// Ensure temperature is positive and finite.
    pub fn validate_temperature(t: Temperature) -> FluidResult<()> {
        let v = temperature_k(t);
        if !v.is_finite() || v <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "temperature must be positive and finite",
            });
        }
        Ok(())
    }

    /// Ensure enthalpy is finite (can be negative).
    pub fn validate_enthalpy(h: SpecEnthalpy) -> FluidResult<()> {
        if !h.is_finite() {
            return Err(FluidError::NonPhysical {
                what: "enthalpy must be finite",
            });
        }
        Ok(())
    }

    /// Ensure entropy is finite (reference state may make it negative).
    pub fn validate_entropy(s: SpecEntropy) -> FluidResult<()> {
        if !s.is_finite() {
            return Err(FluidError::NonPhysical {
                what: "entropy must be finite",
            });
        }
        Ok(())
    }

    pub fn validate_saturation_at(at: SaturationAt) -> FluidResult<()> {
        match at {
            SaturationAt::Temperature(t) => validate_temperature(t),
            SaturationAt::Pressure(p) => validate_pressure(p),
        }
    }
}
