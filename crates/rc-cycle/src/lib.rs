//! rc-cycle: single-stage vapor-compression refrigeration cycle engine.
//!
//! [`CycleEngine::evaluate`] turns a [`CycleSetpoint`] into a [`CycleResult`]
//! holding the four state points, specific compressor work, heat absorbed in
//! the evaporator, heat rejected in the condenser and the COP. The engine is
//! stateless: every call is independent and safe to run in parallel.
//!
//! State numbering follows refrigeration practice:
//!
//! 1. compressor inlet (superheated or saturated vapor, evaporator pressure)
//! 2. compressor outlet (condenser pressure)
//! 3. condenser outlet (subcooled or saturated liquid)
//! 4. evaporator inlet (after isenthalpic expansion)

pub mod compressor;
pub mod engine;
pub mod error;
pub mod result;
pub mod setpoint;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

pub use compressor::CompressorModel;
pub use engine::{CycleEngine, evaluate};
pub use error::{CycleError, CycleStage, EngineResult};
pub use result::{CycleResult, OperatingPoint};
pub use setpoint::CycleSetpoint;
pub use state::{StatePoint, ThermodynamicState};
