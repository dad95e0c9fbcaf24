//! Shared application service layer for refcycle.
//!
//! Frontends hold an [`AppContext`] (plant configuration plus property
//! backend) and call the services below with it: plant loading, single-cycle
//! evaluation, operating-history generation and the dashboard analytics.

pub mod context;
pub mod cycle_service;
pub mod dashboard;
pub mod error;
pub mod fluid_service;
pub mod plant_service;
pub mod series_service;

pub use context::AppContext;
pub use cycle_service::{CycleReport, OperatingReport, StateReport};
pub use error::{AppError, AppResult};
pub use fluid_service::FluidSummary;
pub use plant_service::{ChamberSummary, get_chamber, list_chambers, load_plant, validate_plant};
pub use series_service::{SeriesRun, compile_generator, records_to_csv, run_series};
