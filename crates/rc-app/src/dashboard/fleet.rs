//! Latest status per chamber.

use chrono::NaiveDateTime;
use rc_project::ThresholdsDef;
use rc_sim::{OperatingRecord, Status};
use serde::Serialize;

use super::equipment_ids;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrafficLight {
    Green,
    Yellow,
    Red,
}

impl TrafficLight {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrafficLight::Green => "green",
            TrafficLight::Yellow => "yellow",
            TrafficLight::Red => "red",
        }
    }
}

/// Freezing chambers (interior below 0 °C) run in cooling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OperatingMode {
    Cooling,
    Nominal,
}

/// Red on alarm or when the COP is under the plant's alarm limit.
pub fn traffic_light(status: Status, cop: f64, thresholds: &ThresholdsDef) -> TrafficLight {
    if status == Status::Alarm || cop < thresholds.alarm_cop {
        TrafficLight::Red
    } else if status == Status::Warning {
        TrafficLight::Yellow
    } else {
        TrafficLight::Green
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChamberStatus {
    pub equipment_id: String,
    pub timestamp: NaiveDateTime,
    pub interior_c: f64,
    pub cop: f64,
    pub status: Status,
    pub light: TrafficLight,
    pub mode: OperatingMode,
}

impl ChamberStatus {
    /// Red chambers are offered for fault analysis.
    pub fn needs_attention(&self) -> bool {
        self.light == TrafficLight::Red
    }
}

/// Latest record of every chamber, in order of first appearance.
pub fn fleet_status(
    records: &[OperatingRecord],
    thresholds: &ThresholdsDef,
) -> Vec<ChamberStatus> {
    equipment_ids(records)
        .into_iter()
        .filter_map(|id| {
            records
                .iter()
                .filter(|r| r.equipment_id == id)
                .max_by_key(|r| r.timestamp)
        })
        .map(|r| ChamberStatus {
            equipment_id: r.equipment_id.clone(),
            timestamp: r.timestamp,
            interior_c: r.interior_c,
            cop: r.cop,
            status: r.status,
            light: traffic_light(r.status, r.cop, thresholds),
            mode: if r.interior_c < 0.0 {
                OperatingMode::Cooling
            } else {
                OperatingMode::Nominal
            },
        })
        .collect()
}
