//! Compressor efficiency model.

use crate::error::{CycleError, EngineResult};

/// Isentropic efficiency of the compressor.
///
/// η = 1 is the ideal (isentropic) cycle. For η < 1 the real discharge
/// enthalpy is `h1 + (h2s − h1) / η`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompressorModel {
    isentropic_efficiency: f64,
}

impl CompressorModel {
    pub const IDEAL: CompressorModel = CompressorModel {
        isentropic_efficiency: 1.0,
    };

    pub fn new(isentropic_efficiency: f64) -> EngineResult<Self> {
        if !isentropic_efficiency.is_finite()
            || isentropic_efficiency <= 0.0
            || isentropic_efficiency > 1.0
        {
            return Err(CycleError::invalid(format!(
                "isentropic efficiency must lie in (0, 1], got {isentropic_efficiency}"
            )));
        }
        Ok(Self {
            isentropic_efficiency,
        })
    }

    pub fn isentropic_efficiency(&self) -> f64 {
        self.isentropic_efficiency
    }

    pub fn is_ideal(&self) -> bool {
        self.isentropic_efficiency == 1.0
    }

    /// Actual discharge enthalpy from suction and isentropic discharge enthalpy.
    pub fn discharge_enthalpy(&self, h_suction: f64, h_isentropic: f64) -> f64 {
        h_suction + (h_isentropic - h_suction) / self.isentropic_efficiency
    }
}

impl Default for CompressorModel {
    fn default() -> Self {
        Self::IDEAL
    }
}
