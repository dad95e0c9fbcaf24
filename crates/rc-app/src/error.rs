//! Error types for the rc-app service layer.

use std::path::PathBuf;

/// Application error type that wraps errors from the backend crates
/// and gives every frontend one error surface.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Plant error: {0}")]
    Plant(String),

    #[error("Failed to read plant file: {path}")]
    PlantFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("No plant loaded in this session")]
    NoPlant,

    #[error("Chamber not found: {0}")]
    ChamberNotFound(String),

    #[error("Cycle error: {0}")]
    Cycle(#[from] rc_cycle::CycleError),

    #[error("Fluid error: {0}")]
    Fluid(String),

    #[error("Simulation error: {0}")]
    Simulation(String),

    #[error("No records to analyse")]
    NoRecords,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for rc-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<rc_project::ProjectError> for AppError {
    fn from(err: rc_project::ProjectError) -> Self {
        AppError::Plant(err.to_string())
    }
}

impl From<rc_project::ValidationError> for AppError {
    fn from(err: rc_project::ValidationError) -> Self {
        AppError::Plant(err.to_string())
    }
}

impl From<rc_sim::SimError> for AppError {
    fn from(err: rc_sim::SimError) -> Self {
        AppError::Simulation(err.to_string())
    }
}

impl From<rc_fluids::FluidError> for AppError {
    fn from(err: rc_fluids::FluidError) -> Self {
        AppError::Fluid(err.to_string())
    }
}

impl From<rc_fluids::SweepError> for AppError {
    fn from(err: rc_fluids::SweepError) -> Self {
        AppError::Fluid(err.to_string())
    }
}

impl From<rc_fluids::UnitError> for AppError {
    fn from(err: rc_fluids::UnitError) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}
