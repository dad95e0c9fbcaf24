//! Health diagnostics for the fleet and fault analysis for one chamber.

use chrono::NaiveDateTime;
use rc_project::ThresholdsDef;
use rc_sim::{OperatingRecord, Status};
use serde::Serialize;

use super::{equipment_ids, mean};
use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitHealth {
    pub equipment_id: String,
    pub alarms: usize,
    pub mean_cop: f64,
    pub stable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusShare {
    pub status: Status,
    pub count: usize,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthReport {
    pub discharge_anomalies: usize,
    pub units: Vec<UnitHealth>,
    /// Statuses present in the records, most frequent first.
    pub distribution: Vec<StatusShare>,
}

impl HealthReport {
    pub fn unstable_units(&self) -> impl Iterator<Item = &UnitHealth> {
        self.units.iter().filter(|u| !u.stable)
    }
}

/// A unit is stable when it has no alarms and its mean COP meets the
/// warning limit; discharge anomalies use the plant's discharge limit.
pub fn health_report(
    records: &[OperatingRecord],
    thresholds: &ThresholdsDef,
) -> AppResult<HealthReport> {
    if records.is_empty() {
        return Err(AppError::NoRecords);
    }

    let discharge_anomalies = records
        .iter()
        .filter(|r| r.discharge_temp_c > thresholds.discharge_limit_c)
        .count();

    let units = equipment_ids(records)
        .into_iter()
        .map(|id| {
            let rows = || records.iter().filter(move |r| r.equipment_id == id);
            let alarms = rows().filter(|r| r.is_alarm()).count();
            let mean_cop = mean(rows().map(|r| r.cop)).unwrap_or(0.0);
            UnitHealth {
                equipment_id: id.to_string(),
                alarms,
                mean_cop,
                stable: alarms == 0 && mean_cop >= thresholds.warning_cop,
            }
        })
        .collect();

    let total = records.len() as f64;
    let mut distribution: Vec<StatusShare> = Status::ALL
        .iter()
        .map(|&status| {
            let count = records.iter().filter(|r| r.status == status).count();
            StatusShare {
                status,
                count,
                percent: count as f64 / total * 100.0,
            }
        })
        .filter(|share| share.count > 0)
        .collect();
    distribution.sort_by(|a, b| b.count.cmp(&a.count));

    Ok(HealthReport {
        discharge_anomalies,
        units,
        distribution,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbableCause {
    CondenserObstruction,
    RefrigerantLoss,
    ThermalOverload,
}

impl ProbableCause {
    pub fn describe(&self) -> &'static str {
        match self {
            ProbableCause::CondenserObstruction => "condenser obstruction",
            ProbableCause::RefrigerantLoss => "possible refrigerant charge loss",
            ProbableCause::ThermalOverload => "thermal overload",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FaultAnalysis {
    pub equipment_id: String,
    pub first_alarm: NaiveDateTime,
    pub alarm_count: usize,
    pub estimated_hours: f64,
    pub mean_cop: f64,
    pub min_cop: f64,
    pub max_discharge_c: f64,
    pub mean_delta_t_k: f64,
    /// Design COP band for the chamber's temperature class.
    pub cop_target: (f64, f64),
    pub causes: Vec<ProbableCause>,
    /// Limits the analysis was judged against.
    pub thresholds: ThresholdsDef,
}

impl FaultAnalysis {
    pub fn discharge_over_limit(&self) -> bool {
        self.max_discharge_c > self.thresholds.discharge_limit_c
    }

    pub fn mean_cop_low(&self) -> bool {
        self.mean_cop < self.thresholds.warning_cop
    }

    pub fn min_cop_failing(&self) -> bool {
        self.min_cop < self.thresholds.alarm_cop
    }
}

/// Design COP band: frozen storage or chilled storage.
pub fn cop_target(interior_c: f64) -> (f64, f64) {
    if interior_c < 0.0 { (2.9, 3.2) } else { (6.0, 7.5) }
}

/// Analyse the alarm records of one chamber. `Ok(None)` means the chamber
/// has records but no alarms.
pub fn fault_analysis(
    records: &[OperatingRecord],
    equipment_id: &str,
    step_hours: f64,
    thresholds: &ThresholdsDef,
) -> AppResult<Option<FaultAnalysis>> {
    let mut rows: Vec<&OperatingRecord> = records
        .iter()
        .filter(|r| r.equipment_id == equipment_id)
        .collect();
    if rows.is_empty() {
        return Err(AppError::ChamberNotFound(equipment_id.to_string()));
    }
    rows.sort_by_key(|r| r.timestamp);

    let alarms: Vec<&OperatingRecord> = rows.iter().copied().filter(|r| r.is_alarm()).collect();
    let Some(first) = alarms.first() else {
        return Ok(None);
    };

    let mean_cop = mean(alarms.iter().map(|r| r.cop)).unwrap_or(0.0);
    let min_cop = alarms.iter().map(|r| r.cop).fold(f64::INFINITY, f64::min);
    let max_discharge_c = alarms
        .iter()
        .map(|r| r.discharge_temp_c)
        .fold(f64::NEG_INFINITY, f64::max);
    let mean_delta_t_k = mean(alarms.iter().map(|r| r.delta_t_cond_c)).unwrap_or(0.0);
    let mean_interior = mean(rows.iter().map(|r| r.interior_c)).unwrap_or(0.0);

    let mut causes = Vec::new();
    if mean_cop < thresholds.warning_cop {
        causes.push(ProbableCause::CondenserObstruction);
        causes.push(ProbableCause::RefrigerantLoss);
    }
    if mean_delta_t_k > thresholds.alarm_delta_t_k {
        causes.push(ProbableCause::ThermalOverload);
    }

    Ok(Some(FaultAnalysis {
        equipment_id: equipment_id.to_string(),
        first_alarm: first.timestamp,
        alarm_count: alarms.len(),
        estimated_hours: alarms.len() as f64 * step_hours,
        mean_cop,
        min_cop,
        max_discharge_c,
        mean_delta_t_k,
        cop_target: cop_target(mean_interior),
        causes,
        thresholds: thresholds.clone(),
    }))
}

#[cfg(test)]
mod tests {
    use super::super::testing::*;
    use super::*;

    fn fleet() -> Vec<OperatingRecord> {
        let mut records = Vec::new();
        for h in 0..10 {
            let mut carnes = record("CAMARA_01_CARNES", at(5, h), 3.0, 2.0, Status::Normal);
            if h >= 6 {
                carnes.status = Status::Alarm;
                carnes.cop = 1.8 + 0.1 * (h - 6) as f64;
                carnes.delta_t_cond_c = 27.0;
                carnes.discharge_temp_c = 98.0 + h as f64;
            }
            records.push(carnes);
            records.push(record("CAMARA_02_LACTEOS", at(5, h), 6.2, 1.0, Status::Normal));
        }
        records
    }

    fn defaults() -> ThresholdsDef {
        ThresholdsDef::default()
    }

    #[test]
    fn health_counts() {
        let report = health_report(&fleet(), &defaults()).unwrap();
        assert_eq!(report.discharge_anomalies, 4);

        assert_eq!(report.units.len(), 2);
        assert_eq!(report.units[0].alarms, 4);
        assert!(!report.units[0].stable);
        assert!(report.units[1].stable);
        assert_eq!(report.unstable_units().count(), 1);

        assert_eq!(report.distribution[0].status, Status::Normal);
        assert_eq!(report.distribution[0].count, 16);
        assert!((report.distribution[1].percent - 20.0).abs() < 1e-9);
        assert_eq!(report.distribution.len(), 2);
    }

    #[test]
    fn fault_summary_for_alarming_chamber() {
        let fault = fault_analysis(&fleet(), "CAMARA_01_CARNES", 1.0, &defaults())
            .unwrap()
            .unwrap();
        assert_eq!(fault.first_alarm, at(5, 6));
        assert_eq!(fault.alarm_count, 4);
        assert_eq!(fault.estimated_hours, 4.0);
        assert!((fault.mean_cop - 1.95).abs() < 1e-9);
        assert!((fault.min_cop - 1.8).abs() < 1e-12);
        assert_eq!(fault.max_discharge_c, 107.0);
        assert_eq!(fault.mean_delta_t_k, 27.0);
        assert_eq!(fault.cop_target, (2.9, 3.2));
        assert!(fault.discharge_over_limit());
        assert!(fault.min_cop_failing());
        assert_eq!(
            fault.causes,
            vec![
                ProbableCause::CondenserObstruction,
                ProbableCause::RefrigerantLoss,
                ProbableCause::ThermalOverload
            ]
        );
    }

    #[test]
    fn quiet_chamber_has_no_fault() {
        assert_eq!(
            fault_analysis(&fleet(), "CAMARA_02_LACTEOS", 1.0, &defaults()).unwrap(),
            None
        );
    }

    #[test]
    fn plant_limits_change_the_verdicts() {
        let records: Vec<OperatingRecord> = (0..6)
            .map(|h| record("CAMARA_02_LACTEOS", at(5, h), 2.4, 1.0, Status::Warning))
            .collect();
        let report = health_report(&records, &defaults()).unwrap();
        assert!(!report.units[0].stable);

        let relaxed = ThresholdsDef {
            warning_cop: 2.2,
            ..defaults()
        };
        let report = health_report(&records, &relaxed).unwrap();
        assert!(report.units[0].stable);

        let hot = ThresholdsDef {
            discharge_limit_c: 110.0,
            ..defaults()
        };
        assert_eq!(health_report(&fleet(), &hot).unwrap().discharge_anomalies, 0);

        let fault = fault_analysis(&fleet(), "CAMARA_01_CARNES", 1.0, &hot)
            .unwrap()
            .unwrap();
        assert!(!fault.discharge_over_limit());
        assert_eq!(fault.thresholds, hot);
    }

    #[test]
    fn unknown_chamber_is_an_error() {
        assert!(matches!(
            fault_analysis(&fleet(), "CAMARA_09", 1.0, &defaults()),
            Err(AppError::ChamberNotFound(_))
        ));
    }
}
