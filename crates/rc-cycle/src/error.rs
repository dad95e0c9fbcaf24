//! Cycle evaluation errors.

use rc_core::CoreError;
use rc_fluids::{FluidError, Refrigerant};
use std::fmt;
use thiserror::Error;

/// Result type for cycle evaluation.
pub type EngineResult<T> = Result<T, CycleError>;

/// Step of the evaluation at which a property lookup failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleStage {
    EvaporatorSaturation,
    CondenserSaturation,
    CompressorInlet,
    CompressorOutlet,
    CondenserOutlet,
    EvaporatorInlet,
    /// Work or refrigerating effect came out non-positive.
    EnergyBalance,
}

impl fmt::Display for CycleStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CycleStage::EvaporatorSaturation => "evaporator saturation",
            CycleStage::CondenserSaturation => "condenser saturation",
            CycleStage::CompressorInlet => "compressor inlet",
            CycleStage::CompressorOutlet => "compressor outlet",
            CycleStage::CondenserOutlet => "condenser outlet",
            CycleStage::EvaporatorInlet => "evaporator inlet",
            CycleStage::EnergyBalance => "energy balance",
        };
        f.write_str(label)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CycleError {
    #[error("Invalid setpoint: {reason}")]
    InvalidSetpoint { reason: String },

    #[error("Unsupported refrigerant: {id}")]
    UnsupportedRefrigerant { id: String },

    #[error("Property lookup failed at {stage}: {source}")]
    PropertyLookupFailure {
        stage: CycleStage,
        #[source]
        source: FluidError,
    },
}

impl CycleError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        CycleError::InvalidSetpoint {
            reason: reason.into(),
        }
    }

    /// Closure for `map_err` tagging a fluid error with its stage.
    pub(crate) fn at(
        stage: CycleStage,
        refrigerant: Refrigerant,
    ) -> impl FnOnce(FluidError) -> CycleError {
        move |source| {
            if source.is_not_supported() {
                return CycleError::UnsupportedRefrigerant {
                    id: refrigerant.key().to_string(),
                };
            }
            CycleError::PropertyLookupFailure { stage, source }
        }
    }

    pub fn stage(&self) -> Option<CycleStage> {
        match self {
            CycleError::PropertyLookupFailure { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

impl From<CoreError> for CycleError {
    fn from(err: CoreError) -> Self {
        CycleError::invalid(err.to_string())
    }
}
