use thiserror::Error;

pub type SimResult<T> = Result<T, SimError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("Invalid generator configuration: {what}")]
    InvalidConfig { what: String },

    #[error("No equipment to simulate")]
    NoEquipment,

    #[error("Unknown status '{0}'")]
    UnknownStatus(String),
}

impl SimError {
    pub(crate) fn config(what: impl Into<String>) -> Self {
        SimError::InvalidConfig { what: what.into() }
    }
}
