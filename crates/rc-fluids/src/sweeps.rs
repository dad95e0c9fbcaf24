//! Saturation sweeps over a temperature range.
//!
//! Produces bubble/dew tables for a refrigerant. Individual points that the
//! backend cannot resolve (e.g. above the critical temperature) are kept in
//! the table as failures instead of aborting the sweep.

use crate::model::PropertyModel;
use crate::refrigerant::Refrigerant;
use crate::state::{FluidPoint, SaturationAt, SaturationLine};
use crate::units::{Quantity, parse_quantity};
use rc_core::units::k;
use std::fmt;
use thiserror::Error;
use tracing::debug;

/// Type of sweep progression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SweepType {
    /// Uniformly spaced points
    Linear,
    /// Logarithmically spaced points (in kelvin)
    Logarithmic,
}

impl fmt::Display for SweepType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => write!(f, "Linear"),
            Self::Logarithmic => write!(f, "Logarithmic"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SweepError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Refrigerant {0} not supported by the property model")]
    NotSupported(Refrigerant),

    #[error("Every sweep point failed ({failed} points)")]
    AllPointsFailed { failed: usize },
}

/// Temperature sweep definition, bounds in kelvin.
#[derive(Debug, Clone)]
pub struct SweepDefinition {
    pub start_k: f64,
    pub end_k: f64,
    pub num_points: usize,
    pub sweep_type: SweepType,
}

impl SweepDefinition {
    pub fn new(
        start_k: f64,
        end_k: f64,
        num_points: usize,
        sweep_type: SweepType,
    ) -> Result<Self, SweepError> {
        if num_points < 2 {
            return Err(SweepError::InvalidConfiguration(
                "Sweep must have at least 2 points".to_string(),
            ));
        }
        if !start_k.is_finite() || !end_k.is_finite() || start_k <= 0.0 || end_k <= 0.0 {
            return Err(SweepError::InvalidConfiguration(
                "Sweep bounds must be positive absolute temperatures".to_string(),
            ));
        }
        if (start_k - end_k).abs() < 1e-12 {
            return Err(SweepError::InvalidConfiguration(
                "Start and end values must be different".to_string(),
            ));
        }
        Ok(Self {
            start_k,
            end_k,
            num_points,
            sweep_type,
        })
    }

    /// Create a sweep from user text such as "-40C" and "40C".
    pub fn from_text(
        start: &str,
        end: &str,
        num_points: usize,
        sweep_type: SweepType,
    ) -> Result<Self, SweepError> {
        let start_k = parse_quantity(start, Quantity::Temperature)
            .map_err(|e| SweepError::InvalidConfiguration(format!("Start value error: {}", e)))?;
        let end_k = parse_quantity(end, Quantity::Temperature)
            .map_err(|e| SweepError::InvalidConfiguration(format!("End value error: {}", e)))?;
        Self::new(start_k, end_k, num_points, sweep_type)
    }

    /// Generate all points in the sweep.
    pub fn generate_points(&self) -> Vec<f64> {
        let n = self.num_points;
        let mut points: Vec<f64> = match self.sweep_type {
            SweepType::Linear => {
                let delta = (self.end_k - self.start_k) / (n - 1) as f64;
                (0..n).map(|i| self.start_k + i as f64 * delta).collect()
            }
            SweepType::Logarithmic => {
                let (log_start, log_end) = (self.start_k.ln(), self.end_k.ln());
                let log_delta = (log_end - log_start) / (n - 1) as f64;
                (0..n)
                    .map(|i| (log_start + i as f64 * log_delta).exp())
                    .collect()
            }
        };

        // Ensure exact endpoint
        points[n - 1] = self.end_k;
        points
    }
}

impl fmt::Display for SweepDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Saturation sweep from {:.2} K to {:.2} K ({} points, {})",
            self.start_k, self.end_k, self.num_points, self.sweep_type
        )
    }
}

/// One temperature of a saturation table.
#[derive(Debug, Clone)]
pub struct SaturationRow {
    pub temperature_k: f64,
    /// Saturated liquid at this temperature.
    pub bubble: Option<FluidPoint>,
    /// Saturated vapor at this temperature.
    pub dew: Option<FluidPoint>,
    pub error: Option<String>,
}

impl SaturationRow {
    pub fn is_ok(&self) -> bool {
        self.bubble.is_some() && self.dew.is_some()
    }

    /// Latent heat h_dew − h_bubble [J/kg].
    pub fn latent_heat(&self) -> Option<f64> {
        Some(self.dew.as_ref()?.enthalpy - self.bubble.as_ref()?.enthalpy)
    }
}

/// Result of a saturation sweep.
#[derive(Debug, Clone)]
pub struct SaturationSweep {
    pub refrigerant: Refrigerant,
    pub rows: Vec<SaturationRow>,
    pub num_successful: usize,
    pub num_failed: usize,
}

/// Tabulate bubble and dew points over the sweep temperatures.
pub fn saturation_sweep<M: PropertyModel + ?Sized>(
    model: &M,
    refrigerant: Refrigerant,
    sweep_def: &SweepDefinition,
) -> Result<SaturationSweep, SweepError> {
    if !model.supports(refrigerant) {
        return Err(SweepError::NotSupported(refrigerant));
    }

    let mut rows = Vec::with_capacity(sweep_def.num_points);
    let mut num_successful = 0;
    let mut num_failed = 0;

    for temperature_k in sweep_def.generate_points() {
        let at = SaturationAt::Temperature(k(temperature_k));
        let bubble = model.saturated(refrigerant, at, SaturationLine::Liquid);
        let dew = model.saturated(refrigerant, at, SaturationLine::Vapor);

        let row = match (bubble, dew) {
            (Ok(bubble), Ok(dew)) => {
                num_successful += 1;
                SaturationRow {
                    temperature_k,
                    bubble: Some(bubble),
                    dew: Some(dew),
                    error: None,
                }
            }
            (bubble, dew) => {
                num_failed += 1;
                let error = bubble
                    .as_ref()
                    .err()
                    .or(dew.as_ref().err())
                    .map(|e| e.to_string());
                debug!(%refrigerant, temperature_k, ?error, "saturation point failed");
                SaturationRow {
                    temperature_k,
                    bubble: bubble.ok(),
                    dew: dew.ok(),
                    error,
                }
            }
        };
        rows.push(row);
    }

    if num_successful == 0 {
        return Err(SweepError::AllPointsFailed { failed: num_failed });
    }

    Ok(SaturationSweep {
        refrigerant,
        rows,
        num_successful,
        num_failed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{FluidError, FluidResult};
    use crate::state::{SpecEnthalpy, SpecEntropy};
    use rc_core::units::{Pressure, Temperature, pa, temperature_k};

    /// Toy model: saturation exists below 350 K only.
    struct ToyModel;

    impl PropertyModel for ToyModel {
        fn name(&self) -> &str {
            "toy"
        }

        fn supports(&self, refrigerant: Refrigerant) -> bool {
            refrigerant == Refrigerant::R134a
        }

        fn saturated(
            &self,
            _refrigerant: Refrigerant,
            at: SaturationAt,
            line: SaturationLine,
        ) -> FluidResult<FluidPoint> {
            let SaturationAt::Temperature(t) = at else {
                return Err(FluidError::InvalidArg { what: "toy needs T" });
            };
            let t_k = temperature_k(t);
            if t_k > 350.0 {
                return Err(FluidError::OutOfRange { what: "above critical" });
            }
            let h = match line {
                SaturationLine::Liquid => 1_000.0 * t_k,
                SaturationLine::Vapor => 1_000.0 * t_k + 200_000.0,
            };
            FluidPoint::new(pa(1_000.0 * t_k), t, h, h / t_k, Some(line.quality()))
        }

        fn state_pt(&self, _: Refrigerant, _: Pressure, _: Temperature) -> FluidResult<FluidPoint> {
            Err(FluidError::NotSupported { what: "toy" })
        }

        fn state_ps(&self, _: Refrigerant, _: Pressure, _: SpecEntropy) -> FluidResult<FluidPoint> {
            Err(FluidError::NotSupported { what: "toy" })
        }

        fn state_ph(&self, _: Refrigerant, _: Pressure, _: SpecEnthalpy) -> FluidResult<FluidPoint> {
            Err(FluidError::NotSupported { what: "toy" })
        }
    }

    #[test]
    fn linear_sweep_generation() {
        let sweep = SweepDefinition::new(250.0, 300.0, 5, SweepType::Linear).unwrap();
        let points = sweep.generate_points();
        assert_eq!(points.len(), 5);
        assert!((points[2] - 275.0).abs() < 1e-9);
        assert_eq!(points[4], 300.0);
    }

    #[test]
    fn logarithmic_sweep_generation() {
        let sweep = SweepDefinition::new(100.0, 400.0, 3, SweepType::Logarithmic).unwrap();
        let points = sweep.generate_points();
        assert!((points[1] - 200.0).abs() < 1e-9);
    }

    #[test]
    fn from_text_parses_celsius() {
        let sweep = SweepDefinition::from_text("-40C", "40C", 9, SweepType::Linear).unwrap();
        assert!((sweep.start_k - 233.15).abs() < 1e-9);
        assert!(SweepDefinition::from_text("-40C", "-40C", 9, SweepType::Linear).is_err());
        assert!(SweepDefinition::from_text("-40C", "40C", 1, SweepType::Linear).is_err());
    }

    #[test]
    fn failed_points_are_recorded() {
        let def = SweepDefinition::new(300.0, 400.0, 5, SweepType::Linear).unwrap();
        let sweep = saturation_sweep(&ToyModel, Refrigerant::R134a, &def).unwrap();
        assert_eq!(sweep.num_successful, 3);
        assert_eq!(sweep.num_failed, 2);
        assert!(sweep.rows[4].error.is_some());
        assert_eq!(sweep.rows[0].latent_heat(), Some(200_000.0));
    }

    #[test]
    fn unsupported_refrigerant_is_rejected() {
        let def = SweepDefinition::new(250.0, 300.0, 3, SweepType::Linear).unwrap();
        assert!(matches!(
            saturation_sweep(&ToyModel, Refrigerant::R404A, &def),
            Err(SweepError::NotSupported(Refrigerant::R404A))
        ));
    }

    #[test]
    fn all_failed_is_an_error() {
        let def = SweepDefinition::new(360.0, 400.0, 3, SweepType::Linear).unwrap();
        assert!(matches!(
            saturation_sweep(&ToyModel, Refrigerant::R134a, &def),
            Err(SweepError::AllPointsFailed { failed: 3 })
        ));
    }
}
