//! Generated operating records.

use crate::status::Status;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One sample of one chamber. Values are rounded the way an operator log
/// would show them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatingRecord {
    pub timestamp: NaiveDateTime,
    pub equipment_id: String,
    pub ambient_c: f64,
    pub interior_c: f64,
    pub delta_t_cond_c: f64,
    pub compressor_efficiency: f64,
    pub cop: f64,
    pub discharge_temp_c: f64,
    pub compressor_kw: f64,
    pub cooling_kw: f64,
    /// Flash-gas fraction at the evaporator inlet.
    pub evaporator_quality: Option<f64>,
    pub status: Status,
}

impl OperatingRecord {
    /// Condensing temperature implied by ambient and condenser ΔT.
    pub fn condensing_c(&self) -> f64 {
        self.ambient_c + self.delta_t_cond_c
    }

    /// Energy drawn over `hours` at this record's compressor power [kWh].
    pub fn energy_kwh(&self, hours: f64) -> f64 {
        self.compressor_kw * hours
    }

    pub fn is_alarm(&self) -> bool {
        self.status == Status::Alarm
    }
}
