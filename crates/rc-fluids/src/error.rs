//! Property lookup errors.

use thiserror::Error;

/// Result type for property lookups.
pub type FluidResult<T> = Result<T, FluidError>;

/// Errors raised by a [`crate::PropertyModel`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FluidError {
    /// Non-physical values (negative pressure, NaN enthalpy, etc.).
    #[error("Non-physical value for {what}")]
    NonPhysical { what: &'static str },

    /// Value outside what the backend can bracket at the given pressure.
    #[error("Value out of range for {what}")]
    OutOfRange { what: &'static str },

    /// Invalid argument.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// Refrigerant the backend cannot model.
    #[error("Not supported: {what}")]
    NotSupported { what: &'static str },

    /// Backend (CoolProp) error.
    #[error("Backend error: {message}")]
    Backend { message: String },

    /// Bisection did not settle.
    #[error("Convergence failed for {what}")]
    ConvergenceFailed { what: &'static str },
}

impl FluidError {
    /// True when the error means "this refrigerant is not available" rather
    /// than "this lookup failed".
    pub fn is_not_supported(&self) -> bool {
        matches!(self, FluidError::NotSupported { .. })
    }
}
