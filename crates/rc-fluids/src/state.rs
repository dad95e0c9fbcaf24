//! Fluid point definitions.

use crate::error::{FluidError, FluidResult};
use rc_core::units::{Pressure, Temperature, k, pressure_pa, temperature_c, temperature_k};

/// Specific enthalpy [J/kg].
///
/// Not part of uom's standard set, so we use f64 with clear documentation.
pub type SpecEnthalpy = f64;

/// Specific entropy [J/(kg·K)].
///
/// Not part of uom's standard set, so we use f64 with clear documentation.
pub type SpecEntropy = f64;

/// Which saturation boundary to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaturationLine {
    /// Bubble point (quality 0).
    Liquid,
    /// Dew point (quality 1).
    Vapor,
}

impl SaturationLine {
    pub fn quality(&self) -> f64 {
        match self {
            SaturationLine::Liquid => 0.0,
            SaturationLine::Vapor => 1.0,
        }
    }
}

/// Independent variable fixing a saturation point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SaturationAt {
    Temperature(Temperature),
    Pressure(Pressure),
}

/// A resolved fluid point: pressure, temperature, enthalpy, entropy and,
/// inside the dome, vapor quality.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FluidPoint {
    pub pressure: Pressure,
    pub temperature: Temperature,
    pub enthalpy: SpecEnthalpy,
    pub entropy: SpecEntropy,
    /// `None` for subcooled liquid or superheated vapor.
    pub quality: Option<f64>,
}

impl FluidPoint {
    /// Create a point, validating that every property is physical.
    pub fn new(
        pressure: Pressure,
        temperature: Temperature,
        enthalpy: SpecEnthalpy,
        entropy: SpecEntropy,
        quality: Option<f64>,
    ) -> FluidResult<Self> {
        let p = pressure_pa(pressure);
        if !p.is_finite() || p <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "pressure must be positive and finite",
            });
        }

        let t = temperature_k(temperature);
        if !t.is_finite() || t <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "temperature must be positive and finite",
            });
        }

        if !enthalpy.is_finite() {
            return Err(FluidError::NonPhysical {
                what: "enthalpy must be finite",
            });
        }
        if !entropy.is_finite() {
            return Err(FluidError::NonPhysical {
                what: "entropy must be finite",
            });
        }

        if let Some(x) = quality
            && (!x.is_finite() || !(0.0..=1.0).contains(&x))
        {
            return Err(FluidError::NonPhysical {
                what: "quality must lie in [0, 1]",
            });
        }

        Ok(Self {
            pressure,
            temperature,
            enthalpy,
            entropy,
            quality,
        })
    }

    /// Lever-rule mixture of a saturated liquid and saturated vapor at the
    /// same pressure. Temperature is interpolated linearly, which follows the
    /// glide of a zeotropic blend and is exact for pure fluids.
    pub fn two_phase(liquid: &FluidPoint, vapor: &FluidPoint, x: f64) -> FluidResult<Self> {
        if !x.is_finite() || !(0.0..=1.0).contains(&x) {
            return Err(FluidError::InvalidArg {
                what: "quality must lie in [0, 1]",
            });
        }
        let lerp = |a: f64, b: f64| a + x * (b - a);
        Self::new(
            liquid.pressure,
            k(lerp(
                temperature_k(liquid.temperature),
                temperature_k(vapor.temperature),
            )),
            lerp(liquid.enthalpy, vapor.enthalpy),
            lerp(liquid.entropy, vapor.entropy),
            Some(x),
        )
    }

    pub fn pressure_pa(&self) -> f64 {
        pressure_pa(self.pressure)
    }

    pub fn temperature_k(&self) -> f64 {
        temperature_k(self.temperature)
    }

    pub fn temperature_c(&self) -> f64 {
        temperature_c(self.temperature)
    }

    pub fn is_two_phase(&self) -> bool {
        matches!(self.quality, Some(x) if x > 0.0 && x < 1.0)
    }
}
