//! Plant schema definitions.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlantConfig {
    pub version: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
    #[serde(default)]
    pub tariff: TariffDef,
    #[serde(default)]
    pub chambers: Vec<ChamberDef>,
    #[serde(default)]
    pub generator: GeneratorDef,
    #[serde(default)]
    pub thresholds: ThresholdsDef,
}

impl PlantConfig {
    pub fn chamber(&self, id: &str) -> Option<&ChamberDef> {
        self.chambers.iter().find(|c| c.id == id)
    }
}

/// Electricity price used by the cost report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TariffDef {
    pub cost_per_kwh: f64,
    pub currency: String,
}

impl Default for TariffDef {
    fn default() -> Self {
        Self {
            cost_per_kwh: 120.0,
            currency: "CLP".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChamberDef {
    pub id: String,
    pub name: String,
    pub interior_setpoint_c: f64,
    pub mass_flow_kgps: f64,
    #[serde(default = "default_refrigerant")]
    pub refrigerant: String,
    #[serde(default)]
    pub superheat_k: f64,
    #[serde(default)]
    pub subcooling_k: f64,
}

fn default_refrigerant() -> String {
    "R134a".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneratorDef {
    /// First timestamp; when absent the horizon ends at the current hour.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<NaiveDateTime>,
    pub days: u32,
    pub step_hours: u32,
    pub seed: u64,
    pub ambient_winter_c: f64,
    pub ambient_summer_c: f64,
    pub ambient_noise_k: f64,
    pub base_delta_t_k: f64,
    pub degradation_days: u32,
    pub efficiency_base: f64,
    pub max_samples: usize,
}

impl Default for GeneratorDef {
    fn default() -> Self {
        Self {
            start: None,
            days: 7,
            step_hours: 1,
            seed: 42,
            ambient_winter_c: -5.0,
            ambient_summer_c: 10.0,
            ambient_noise_k: 1.5,
            base_delta_t_k: 15.0,
            degradation_days: 2,
            efficiency_base: 0.75,
            max_samples: 100_000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ThresholdsDef {
    pub warning_delta_t_k: f64,
    pub alarm_delta_t_k: f64,
    pub warning_cop: f64,
    pub alarm_cop: f64,
    /// Compressor discharge temperature flagged by diagnostics [°C].
    pub discharge_limit_c: f64,
}

impl Default for ThresholdsDef {
    fn default() -> Self {
        Self {
            warning_delta_t_k: 20.0,
            alarm_delta_t_k: 25.0,
            warning_cop: 2.5,
            alarm_cop: 2.0,
            discharge_limit_c: 100.0,
        }
    }
}
