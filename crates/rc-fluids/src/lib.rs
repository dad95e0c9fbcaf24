//! rc-fluids: refrigerant property lookups for refcycle.
//!
//! Provides:
//! - Refrigerant identities (pure fluids and CoolProp predefined blends)
//! - A searchable refrigerant catalog with aliases
//! - Saturation / single-phase point representation
//! - `PropertyModel` trait for property lookups
//! - CoolProp backend for real-fluid properties
//! - Saturation sweeps over a temperature range
//!
//! # Architecture
//!
//! The `PropertyModel` trait isolates the cycle engine from the property
//! backend. CoolProp (via `rfluids`) is the only backend shipped here; tests
//! and downstream callers can plug in their own implementation.
//!
//! # Example
//!
//! ```no_run
//! use rc_core::units::degc;
//! use rc_fluids::{CoolPropModel, PropertyModel, Refrigerant, SaturationAt, SaturationLine};
//!
//! let model = CoolPropModel::new();
//! let vapor = model
//!     .saturated(
//!         Refrigerant::R134a,
//!         SaturationAt::Temperature(degc(-10.0)),
//!         SaturationLine::Vapor,
//!     )
//!     .unwrap();
//! println!("Dew pressure: {:.0} Pa", vapor.pressure_pa());
//! ```

pub mod catalog;
pub mod coolprop;
pub mod error;
pub mod model;
pub mod refrigerant;
pub mod state;
pub mod sweeps;
pub mod units;

// Re-exports for ergonomics
pub use catalog::{
    RefrigerantCatalogEntry, filter_refrigerant_catalog, lookup_refrigerant, refrigerant_catalog,
};
pub use coolprop::CoolPropModel;
pub use error::{FluidError, FluidResult};
pub use model::PropertyModel;
pub use refrigerant::{Refrigerant, RefrigerantKind};
pub use state::{FluidPoint, SaturationAt, SaturationLine, SpecEnthalpy, SpecEntropy};
pub use sweeps::{
    SaturationRow, SaturationSweep, SweepDefinition, SweepError, SweepType, saturation_sweep,
};
pub use units::{Quantity, UnitError, parse_quantity};
