//! Plant → generator compilation, series runs and CSV export.

use chrono::{Duration, NaiveDateTime, Timelike};
use rc_project::PlantConfig;
use rc_sim::{
    AmbientModel, EquipmentSpec, FoulingSchedule, GenerationReport, Generator, GeneratorConfig,
    OperatingRecord, StatusThresholds,
};
use tracing::info;

use crate::context::AppContext;
use crate::error::{AppError, AppResult};

pub const CSV_HEADER: &str = "timestamp,equipment_id,ambient_c,interior_c,delta_t_cond_c,\
compressor_efficiency,cop,discharge_temp_c,compressor_kw,cooling_kw,evaporator_quality,status";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Records of one run plus what the analytics need to interpret them.
#[derive(Debug, Clone)]
pub struct SeriesRun {
    pub records: Vec<OperatingRecord>,
    pub failed: usize,
    pub truncated: bool,
    pub step_hours: f64,
}

/// First timestamp of the horizon. Without an explicit start the horizon
/// ends at `now`, truncated to the hour.
pub fn horizon_start(plant: &PlantConfig, now: NaiveDateTime) -> AppResult<NaiveDateTime> {
    if let Some(start) = plant.generator.start {
        return Ok(start);
    }
    let hour = now
        .with_minute(0)
        .and_then(|t| t.with_second(0))
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(now);
    Duration::try_days(i64::from(plant.generator.days))
        .and_then(|span| hour.checked_sub_signed(span))
        .ok_or_else(|| {
            AppError::InvalidInput(format!(
                "a {}-day horizon ending at {} starts before the calendar range",
                plant.generator.days, hour
            ))
        })
}

/// Translate the plant file into a ready-to-run generator.
pub fn compile_generator(plant: &PlantConfig, now: NaiveDateTime) -> AppResult<Generator> {
    if plant.chambers.is_empty() {
        return Err(AppError::Plant("Plant has no chambers".to_string()));
    }
    let settings = &plant.generator;

    let mut config = GeneratorConfig::new(horizon_start(plant, now)?);
    config.days = settings.days;
    config.step_hours = settings.step_hours;
    config.seed = settings.seed;
    config.base_delta_t_k = settings.base_delta_t_k;
    config.max_samples = settings.max_samples;
    config.ambient = AmbientModel {
        winter_mean_c: settings.ambient_winter_c,
        summer_mean_c: settings.ambient_summer_c,
        noise_sigma_k: settings.ambient_noise_k,
        ..AmbientModel::default()
    };
    config.fouling = FoulingSchedule {
        degradation_days: settings.degradation_days,
        ..FoulingSchedule::default()
    };
    config.efficiency.base = settings.efficiency_base;
    config.thresholds = StatusThresholds {
        warning_delta_t_k: plant.thresholds.warning_delta_t_k,
        alarm_delta_t_k: plant.thresholds.alarm_delta_t_k,
        warning_cop: plant.thresholds.warning_cop,
        alarm_cop: plant.thresholds.alarm_cop,
    };

    let equipment = plant
        .chambers
        .iter()
        .map(|c| EquipmentSpec {
            id: c.id.clone(),
            interior_setpoint_c: c.interior_setpoint_c,
            mass_flow_kgps: c.mass_flow_kgps,
            refrigerant: c.refrigerant.clone(),
            superheat_k: c.superheat_k,
            subcooling_k: c.subcooling_k,
        })
        .collect();

    Ok(Generator::new(config, equipment)?)
}

/// Generate the session plant's operating history.
pub fn run_series(ctx: &AppContext, now: NaiveDateTime) -> AppResult<SeriesRun> {
    let plant = ctx.plant()?;
    let generator = compile_generator(plant, now)?;
    info!(
        plant = %plant.name,
        samples = generator.planned_samples(),
        "generating operating history"
    );
    let GenerationReport {
        records,
        failed,
        truncated,
    } = generator.run(&ctx.engine());
    Ok(SeriesRun {
        records,
        failed,
        truncated,
        step_hours: f64::from(plant.generator.step_hours),
    })
}

fn csv_row(record: &OperatingRecord) -> String {
    let quality = record
        .evaporator_quality
        .map(|x| x.to_string())
        .unwrap_or_default();
    format!(
        "{},{},{},{},{},{},{},{},{},{},{},{}\n",
        record.timestamp.format(TIMESTAMP_FORMAT),
        record.equipment_id,
        record.ambient_c,
        record.interior_c,
        record.delta_t_cond_c,
        record.compressor_efficiency,
        record.cop,
        record.discharge_temp_c,
        record.compressor_kw,
        record.cooling_kw,
        quality,
        record.status,
    )
}

pub fn records_to_csv(records: &[OperatingRecord]) -> String {
    let mut csv = String::with_capacity(64 * (records.len() + 1));
    csv.push_str(CSV_HEADER);
    csv.push('\n');
    for record in records {
        csv.push_str(&csv_row(record));
    }
    csv
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rc_project::schema::{ChamberDef, GeneratorDef, TariffDef, ThresholdsDef};
    use rc_sim::Status;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 8, 10)
            .unwrap()
            .and_hms_opt(h, m, 17)
            .unwrap()
    }

    fn plant() -> PlantConfig {
        PlantConfig {
            version: rc_project::LATEST_VERSION,
            name: "P".to_string(),
            site: None,
            tariff: TariffDef::default(),
            chambers: vec![ChamberDef {
                id: "C1".to_string(),
                name: "C1".to_string(),
                interior_setpoint_c: 4.0,
                mass_flow_kgps: 0.08,
                refrigerant: "R134a".to_string(),
                superheat_k: 0.0,
                subcooling_k: 0.0,
            }],
            generator: GeneratorDef::default(),
            thresholds: ThresholdsDef::default(),
        }
    }

    #[test]
    fn horizon_ends_at_current_hour() {
        let start = horizon_start(&plant(), at(13, 45)).unwrap();
        assert_eq!(start, at(13, 0).with_second(0).unwrap() - Duration::days(7));
    }

    #[test]
    fn horizon_before_calendar_start_is_an_error() {
        let mut p = plant();
        p.generator.days = u32::MAX;
        let now = NaiveDateTime::MIN + Duration::days(30);
        assert!(matches!(
            horizon_start(&p, now),
            Err(AppError::InvalidInput(_))
        ));
        assert!(compile_generator(&p, now).is_err());
    }

    #[test]
    fn oversized_horizon_is_rejected() {
        let mut p = plant();
        p.generator.days = rc_sim::MAX_DAYS + 1;
        assert!(matches!(
            compile_generator(&p, at(12, 0)),
            Err(AppError::Simulation(_))
        ));
    }

    #[test]
    fn explicit_start_wins() {
        let mut p = plant();
        p.generator.start = Some(at(0, 0));
        assert_eq!(horizon_start(&p, at(13, 45)).unwrap(), at(0, 0));
    }

    #[test]
    fn compiled_generator_mirrors_plant() {
        let mut p = plant();
        p.generator.days = 2;
        p.generator.step_hours = 3;
        let generator = compile_generator(&p, at(12, 0)).unwrap();
        assert_eq!(generator.steps(), 16);
        assert_eq!(generator.equipment()[0].id, "C1");
        assert_eq!(generator.config().thresholds.alarm_cop, 2.0);
    }

    #[test]
    fn csv_layout() {
        let record = OperatingRecord {
            timestamp: at(5, 0),
            equipment_id: "C1".to_string(),
            ambient_c: 3.4,
            interior_c: 4.1,
            delta_t_cond_c: 15.0,
            compressor_efficiency: 0.748,
            cop: 4.12,
            discharge_temp_c: 41.3,
            compressor_kw: 2.345,
            cooling_kw: 9.661,
            evaporator_quality: None,
            status: Status::Warning,
        };
        let csv = records_to_csv(&[record]);
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some(CSV_HEADER));
        assert_eq!(
            lines.next(),
            Some("2025-08-10 05:00:17,C1,3.4,4.1,15,0.748,4.12,41.3,2.345,9.661,,WARNING")
        );
        assert_eq!(CSV_HEADER.split(',').count(), 12);
    }
}
