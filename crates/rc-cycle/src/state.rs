//! Cycle state points.

use rc_core::units::{Pressure, Temperature, pressure_pa, temperature_c, temperature_k};
use rc_fluids::{FluidPoint, SpecEnthalpy, SpecEntropy};
use std::fmt;

/// The four points of a single-stage cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatePoint {
    CompressorInlet,
    CompressorOutlet,
    CondenserOutlet,
    EvaporatorInlet,
}

impl StatePoint {
    pub const ALL: [StatePoint; 4] = [
        StatePoint::CompressorInlet,
        StatePoint::CompressorOutlet,
        StatePoint::CondenserOutlet,
        StatePoint::EvaporatorInlet,
    ];

    /// Position in the cycle (0-based; state "1" is index 0).
    pub fn index(&self) -> usize {
        match self {
            StatePoint::CompressorInlet => 0,
            StatePoint::CompressorOutlet => 1,
            StatePoint::CondenserOutlet => 2,
            StatePoint::EvaporatorInlet => 3,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatePoint::CompressorInlet => "compressor inlet",
            StatePoint::CompressorOutlet => "compressor outlet",
            StatePoint::CondenserOutlet => "condenser outlet",
            StatePoint::EvaporatorInlet => "evaporator inlet",
        }
    }
}

impl fmt::Display for StatePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.index() + 1, self.label())
    }
}

/// Thermodynamic state of the refrigerant at one cycle point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThermodynamicState {
    pub pressure: Pressure,
    pub temperature: Temperature,
    /// Specific enthalpy [J/kg].
    pub specific_enthalpy: SpecEnthalpy,
    /// Specific entropy [J/(kg·K)].
    pub specific_entropy: SpecEntropy,
    /// Vapor quality in [0, 1]; `None` when superheated or subcooled.
    pub vapor_quality: Option<f64>,
}

impl ThermodynamicState {
    /// Replace the enthalpy, keeping every other property.
    pub(crate) fn with_enthalpy(mut self, h: SpecEnthalpy) -> Self {
        self.specific_enthalpy = h;
        self
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
}

impl From<FluidPoint> for ThermodynamicState {
    fn from(point: FluidPoint) -> Self {
        Self {
            pressure: point.pressure,
            temperature: point.temperature,
            specific_enthalpy: point.enthalpy,
            specific_entropy: point.entropy,
            vapor_quality: point.quality,
        }
    }
}
