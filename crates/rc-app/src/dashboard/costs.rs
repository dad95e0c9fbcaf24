//! Energy cost accounting and 24 h projection.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rc_project::TariffDef;
use rc_sim::OperatingRecord;
use serde::Serialize;

use super::{equipment_ids, mean};
use crate::error::{AppError, AppResult};

/// Hours of data required on the latest day before projecting it.
pub const PROJECTION_MIN_HOURS: f64 = 4.0;
/// Mean COP below which a unit is reported as critical.
pub const UNIT_CRITICAL_COP: f64 = 3.0;
pub const OPTIMAL_COP: f64 = 4.0;

/// Classification of the projected daily spend against the historical mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CostVerdict {
    Critical,
    EarlyWarning,
    ExceptionalSavings,
    Normal,
}

impl CostVerdict {
    pub fn from_deviation(pct: f64) -> Self {
        if pct >= 20.0 {
            CostVerdict::Critical
        } else if pct >= 10.0 {
            CostVerdict::EarlyWarning
        } else if pct <= -15.0 {
            CostVerdict::ExceptionalSavings
        } else {
            CostVerdict::Normal
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CostVerdict::Critical => "critical failure",
            CostVerdict::EarlyWarning => "early warning",
            CostVerdict::ExceptionalSavings => "exceptional savings",
            CostVerdict::Normal => "normal",
        }
    }
}

/// Operator guidance derived from the verdict and the unit breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CostDiagnosis {
    CriticalFailure { daily_overrun: f64, monthly_loss: f64 },
    EarlyWarning { daily_overrun: f64 },
    ExceptionalSavings,
    /// Spend looks fine but some units run below the critical COP.
    CriticalUnits { equipment_ids: Vec<String> },
    Normal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CopGrade {
    Optimal,
    Nominal,
    Critical,
}

impl CopGrade {
    pub fn from_cop(cop: f64) -> Self {
        if cop >= OPTIMAL_COP {
            CopGrade::Optimal
        } else if cop >= UNIT_CRITICAL_COP {
            CopGrade::Nominal
        } else {
            CopGrade::Critical
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyCost {
    pub date: NaiveDate,
    pub energy_kwh: f64,
    pub cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitCost {
    pub equipment_id: String,
    pub energy_kwh: f64,
    pub cost: f64,
    pub mean_cop: f64,
    pub critical: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostReport {
    pub currency: String,
    pub total_energy_kwh: f64,
    pub total_cost: f64,
    pub daily: Vec<DailyCost>,
    /// Mean cost of the days before the latest one (0 without history).
    pub historical_daily_mean: f64,
    pub historical_days: usize,
    pub today: NaiveDate,
    pub today_cost: f64,
    pub hours_with_data: f64,
    pub projection_24h: Option<f64>,
    pub deviation_pct: Option<f64>,
    pub verdict: Option<CostVerdict>,
    pub diagnosis: Option<CostDiagnosis>,
    pub mean_cop_today: f64,
    pub cop_grade: CopGrade,
    /// Latest-day breakdown per unit.
    pub units: Vec<UnitCost>,
}

/// Cost summary with the latest calendar day in the records as "today".
/// Each record stands for `step_hours` of operation at its compressor power.
pub fn cost_report(
    records: &[OperatingRecord],
    tariff: &TariffDef,
    step_hours: f64,
) -> AppResult<CostReport> {
    if !step_hours.is_finite() || step_hours <= 0.0 {
        return Err(AppError::InvalidInput(format!(
            "step hours must be positive, got {}",
            step_hours
        )));
    }
    let today = records
        .iter()
        .map(|r| r.timestamp.date())
        .max()
        .ok_or(AppError::NoRecords)?;
    let price = tariff.cost_per_kwh;

    let mut by_day: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for record in records {
        *by_day.entry(record.timestamp.date()).or_insert(0.0) += record.energy_kwh(step_hours);
    }
    let daily: Vec<DailyCost> = by_day
        .iter()
        .map(|(&date, &energy_kwh)| DailyCost {
            date,
            energy_kwh,
            cost: energy_kwh * price,
        })
        .collect();
    let total_energy_kwh: f64 = daily.iter().map(|d| d.energy_kwh).sum();

    let history: Vec<&DailyCost> = daily.iter().filter(|d| d.date < today).collect();
    let historical_daily_mean = mean(history.iter().map(|d| d.cost)).unwrap_or(0.0);

    let today_records: Vec<&OperatingRecord> = records
        .iter()
        .filter(|r| r.timestamp.date() == today)
        .collect();
    let today_cost = by_day.get(&today).copied().unwrap_or(0.0) * price;

    let first = today_records.iter().map(|r| r.timestamp).min();
    let last = today_records.iter().map(|r| r.timestamp).max();
    let hours_with_data = match (first, last) {
        (Some(first), Some(last)) => {
            let span_h = (last - first).num_seconds() as f64 / 3600.0;
            (span_h + step_hours).max(1.0)
        }
        _ => 0.0,
    };

    let units: Vec<UnitCost> = equipment_ids(today_records.iter().copied())
        .into_iter()
        .map(|id| {
            let rows = || today_records.iter().filter(move |r| r.equipment_id == id);
            let energy_kwh: f64 = rows().map(|r| r.energy_kwh(step_hours)).sum();
            let mean_cop = mean(rows().map(|r| r.cop)).unwrap_or(0.0);
            UnitCost {
                equipment_id: id.to_string(),
                energy_kwh,
                cost: energy_kwh * price,
                mean_cop,
                critical: mean_cop < UNIT_CRITICAL_COP,
            }
        })
        .collect();
    let mean_cop_today = mean(today_records.iter().map(|r| r.cop)).unwrap_or(0.0);

    let (projection_24h, deviation_pct, verdict, diagnosis) = if hours_with_data
        >= PROJECTION_MIN_HOURS
    {
        let projection = today_cost / hours_with_data * 24.0;
        let deviation = if historical_daily_mean > 0.0 {
            (projection - historical_daily_mean) / historical_daily_mean * 100.0
        } else {
            0.0
        };
        let verdict = CostVerdict::from_deviation(deviation);
        let diagnosis = diagnose(verdict, projection - historical_daily_mean, &units);
        (Some(projection), Some(deviation), Some(verdict), Some(diagnosis))
    } else {
        (None, None, None, None)
    };

    Ok(CostReport {
        currency: tariff.currency.clone(),
        total_energy_kwh,
        total_cost: total_energy_kwh * price,
        historical_days: history.len(),
        daily,
        historical_daily_mean,
        today,
        today_cost,
        hours_with_data,
        projection_24h,
        deviation_pct,
        verdict,
        diagnosis,
        mean_cop_today,
        cop_grade: CopGrade::from_cop(mean_cop_today),
        units,
    })
}

fn diagnose(verdict: CostVerdict, daily_overrun: f64, units: &[UnitCost]) -> CostDiagnosis {
    let critical: Vec<String> = units
        .iter()
        .filter(|u| u.critical)
        .map(|u| u.equipment_id.clone())
        .collect();
    match verdict {
        CostVerdict::Critical => CostDiagnosis::CriticalFailure {
            daily_overrun,
            monthly_loss: daily_overrun * 30.0,
        },
        CostVerdict::EarlyWarning => CostDiagnosis::EarlyWarning { daily_overrun },
        CostVerdict::ExceptionalSavings if critical.is_empty() => CostDiagnosis::ExceptionalSavings,
        _ if !critical.is_empty() => CostDiagnosis::CriticalUnits {
            equipment_ids: critical,
        },
        _ => CostDiagnosis::Normal,
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::*;
    use super::*;
    use rc_sim::Status;

    fn tariff() -> TariffDef {
        TariffDef {
            cost_per_kwh: 120.0,
            currency: "CLP".to_string(),
        }
    }

    /// One full day at 1 kW, then six hours at 1.5 kW.
    fn history(cop_today: f64) -> Vec<OperatingRecord> {
        let mut records: Vec<_> = (0..24)
            .map(|h| record("CAMARA_02_LACTEOS", at(1, h), 6.0, 1.0, Status::Normal))
            .collect();
        records.extend(
            (0..6).map(|h| record("CAMARA_02_LACTEOS", at(2, h), cop_today, 1.5, Status::Normal)),
        );
        records
    }

    #[test]
    fn verdict_thresholds() {
        assert_eq!(CostVerdict::from_deviation(20.0), CostVerdict::Critical);
        assert_eq!(CostVerdict::from_deviation(10.0), CostVerdict::EarlyWarning);
        assert_eq!(CostVerdict::from_deviation(9.9), CostVerdict::Normal);
        assert_eq!(CostVerdict::from_deviation(-14.9), CostVerdict::Normal);
        assert_eq!(
            CostVerdict::from_deviation(-15.0),
            CostVerdict::ExceptionalSavings
        );
    }

    #[test]
    fn cop_grades() {
        assert_eq!(CopGrade::from_cop(4.0), CopGrade::Optimal);
        assert_eq!(CopGrade::from_cop(3.5), CopGrade::Nominal);
        assert_eq!(CopGrade::from_cop(2.99), CopGrade::Critical);
    }

    #[test]
    fn projection_against_history() {
        let report = cost_report(&history(6.0), &tariff(), 1.0).unwrap();

        assert_eq!(report.daily.len(), 2);
        assert_eq!(report.historical_days, 1);
        assert_eq!(report.historical_daily_mean, 2880.0);
        assert_eq!(report.today, at(2, 0).date());
        assert_eq!(report.today_cost, 1080.0);
        assert_eq!(report.hours_with_data, 6.0);
        assert_eq!(report.projection_24h, Some(4320.0));
        assert_eq!(report.deviation_pct, Some(50.0));
        assert_eq!(report.verdict, Some(CostVerdict::Critical));
        assert_eq!(
            report.diagnosis,
            Some(CostDiagnosis::CriticalFailure {
                daily_overrun: 1440.0,
                monthly_loss: 43200.0
            })
        );
        assert_eq!(report.total_cost, 2880.0 + 1080.0);
        assert_eq!(report.cop_grade, CopGrade::Optimal);
    }

    #[test]
    fn short_day_is_not_projected() {
        let records: Vec<_> = history(6.0).into_iter().take(27).collect();
        let report = cost_report(&records, &tariff(), 1.0).unwrap();
        assert_eq!(report.hours_with_data, 3.0);
        assert_eq!(report.projection_24h, None);
        assert_eq!(report.verdict, None);
    }

    #[test]
    fn units_below_critical_cop_are_flagged() {
        let mut records = history(2.8);
        for r in records.iter_mut().filter(|r| r.timestamp >= at(2, 0)) {
            r.compressor_kw = 1.0;
        }
        let report = cost_report(&records, &tariff(), 1.0).unwrap();
        assert_eq!(report.verdict, Some(CostVerdict::Normal));
        assert!(report.units[0].critical);
        assert_eq!(
            report.diagnosis,
            Some(CostDiagnosis::CriticalUnits {
                equipment_ids: vec!["CAMARA_02_LACTEOS".to_string()]
            })
        );
    }

    #[test]
    fn step_hours_scale_energy() {
        let records = vec![record("A", at(3, 0), 3.0, 2.0, Status::Normal)];
        let report = cost_report(&records, &tariff(), 3.0).unwrap();
        assert_eq!(report.total_energy_kwh, 6.0);
        assert_eq!(report.hours_with_data, 3.0);
        assert_eq!(report.historical_daily_mean, 0.0);
    }

    #[test]
    fn empty_records_are_an_error() {
        assert!(matches!(
            cost_report(&[], &tariff(), 1.0),
            Err(AppError::NoRecords)
        ));
    }
}
