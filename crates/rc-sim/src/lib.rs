//! rc-sim: synthetic operating history for refrigerated chambers.
//!
//! Samples the cycle engine over a time horizon with perturbed setpoints:
//! ambient weather, door openings, condenser fouling and compressor
//! efficiency drift. Each sample is classified Normal / Warning / Alarm.
//! Random draws are sequential from a seeded RNG so a run is reproducible;
//! the cycle evaluations themselves run in parallel.

pub mod ambient;
pub mod disturbance;
pub mod error;
pub mod generator;
pub mod record;
pub mod status;

pub use ambient::AmbientModel;
pub use disturbance::{DoorEvents, EfficiencyDrift, FoulingSchedule};
pub use error::{SimError, SimResult};
pub use generator::{
    EquipmentSpec, GenerationReport, Generator, GeneratorConfig, MAX_DAYS, Sample,
};
pub use record::OperatingRecord;
pub use status::{Status, StatusThresholds};
