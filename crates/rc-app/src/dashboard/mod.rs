//! Operator summaries over a generated operating history.
//!
//! Every function takes a record slice in time order and is pure; the
//! frontends decide how to present the result.

pub mod costs;
pub mod fleet;
pub mod health;

pub use costs::{CopGrade, CostDiagnosis, CostReport, CostVerdict, UnitCost, cost_report};
pub use fleet::{ChamberStatus, OperatingMode, TrafficLight, fleet_status, traffic_light};
pub use health::{
    FaultAnalysis, HealthReport, ProbableCause, StatusShare, UnitHealth, fault_analysis,
    health_report,
};

use rc_sim::OperatingRecord;

/// Equipment ids in order of first appearance.
pub(crate) fn equipment_ids<'a>(
    records: impl IntoIterator<Item = &'a OperatingRecord>,
) -> Vec<&'a str> {
    let mut ids: Vec<&str> = Vec::new();
    for record in records {
        if !ids.contains(&record.equipment_id.as_str()) {
            ids.push(&record.equipment_id);
        }
    }
    ids
}

pub(crate) fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

#[cfg(test)]
pub(crate) mod testing {
    use chrono::{NaiveDate, NaiveDateTime};
    use rc_sim::{OperatingRecord, Status};

    pub fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    pub fn record(id: &str, ts: NaiveDateTime, cop: f64, kw: f64, status: Status) -> OperatingRecord {
        OperatingRecord {
            timestamp: ts,
            equipment_id: id.to_string(),
            ambient_c: 5.0,
            interior_c: if id.contains("CARNES") { -18.2 } else { 4.1 },
            delta_t_cond_c: 15.0,
            compressor_efficiency: 0.75,
            cop,
            discharge_temp_c: 45.0,
            compressor_kw: kw,
            cooling_kw: kw * cop,
            evaporator_quality: Some(0.3),
            status,
        }
    }
}
