//! Synthetic operating-history generator.

use crate::ambient::AmbientModel;
use crate::disturbance::{DoorEvents, EfficiencyDrift, FoulingSchedule};
use crate::error::{SimError, SimResult};
use crate::record::OperatingRecord;
use crate::status::{Status, StatusThresholds};
use chrono::{Datelike, Duration, NaiveDateTime, Timelike};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::Normal;
use rayon::prelude::*;
use rc_core::numeric::round_to;
use rc_core::units::{kgps, power_kw, temperature_c};
use rc_cycle::{CompressorModel, CycleEngine, CycleError, CycleSetpoint, OperatingPoint};
use std::collections::BTreeMap;
use tracing::{info, warn};

/// Longest horizon a generator accepts.
pub const MAX_DAYS: u32 = 3660;

/// A refrigerated chamber as the generator sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct EquipmentSpec {
    pub id: String,
    /// Interior setpoint, also used as the evaporation temperature [°C].
    pub interior_setpoint_c: f64,
    pub mass_flow_kgps: f64,
    pub refrigerant: String,
    pub superheat_k: f64,
    pub subcooling_k: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    pub start: NaiveDateTime,
    pub days: u32,
    pub step_hours: u32,
    pub seed: u64,
    /// Condenser ΔT before disturbances [K].
    pub base_delta_t_k: f64,
    /// Half-width of the uniform interior reading jitter [K].
    pub interior_jitter_k: f64,
    pub ambient: AmbientModel,
    pub doors: DoorEvents,
    pub fouling: FoulingSchedule,
    pub efficiency: EfficiencyDrift,
    pub thresholds: StatusThresholds,
    /// Upper bound on evaluated samples for one run.
    pub max_samples: usize,
}

impl GeneratorConfig {
    /// Seven days of hourly samples starting at `start`, default disturbances.
    pub fn new(start: NaiveDateTime) -> Self {
        Self {
            start,
            days: 7,
            step_hours: 1,
            seed: 0,
            base_delta_t_k: 15.0,
            interior_jitter_k: 0.5,
            ambient: AmbientModel::default(),
            doors: DoorEvents::default(),
            fouling: FoulingSchedule::default(),
            efficiency: EfficiencyDrift::default(),
            thresholds: StatusThresholds::default(),
            max_samples: 100_000,
        }
    }

    pub fn validate(&self) -> SimResult<()> {
        if self.days == 0 || self.days > MAX_DAYS {
            return Err(SimError::config(format!(
                "days must lie in 1..={MAX_DAYS}, got {}",
                self.days
            )));
        }
        if self.step_hours == 0 || self.step_hours > 24 {
            return Err(SimError::config("step hours must lie in 1..=24"));
        }
        if self.end().is_none() {
            return Err(SimError::config("horizon end is out of the calendar range"));
        }
        if !self.base_delta_t_k.is_finite() || self.base_delta_t_k <= 0.0 {
            return Err(SimError::config("base condenser ΔT must be positive"));
        }
        if !self.interior_jitter_k.is_finite() || self.interior_jitter_k < 0.0 {
            return Err(SimError::config("interior jitter must be non-negative"));
        }
        if self.max_samples == 0 {
            return Err(SimError::config("max samples must be at least 1"));
        }
        self.ambient.validate()?;
        self.doors.validate()?;
        self.fouling.validate()?;
        self.efficiency.validate()?;
        self.thresholds.validate()
    }

    /// Timestamp one step past the last sample, `None` on calendar overflow.
    pub fn end(&self) -> Option<NaiveDateTime> {
        let hours = i64::from(self.days).checked_mul(24)?;
        self.start.checked_add_signed(Duration::try_hours(hours)?)
    }
}

/// Perturbed inputs for one equipment at one timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub timestamp: NaiveDateTime,
    /// Index into the generator's equipment list.
    pub equipment: usize,
    pub ambient_c: f64,
    /// Condenser ΔT after door events and fouling [K].
    pub delta_t_k: f64,
    pub efficiency: f64,
    pub interior_c: f64,
}

/// Output of [`Generator::run`].
#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    pub records: Vec<OperatingRecord>,
    /// Samples whose cycle evaluation failed (logged, not recorded).
    pub failed: usize,
    /// True when `max_samples` cut the horizon short.
    pub truncated: bool,
}

impl GenerationReport {
    pub fn status_counts(&self) -> BTreeMap<Status, usize> {
        let mut counts = BTreeMap::new();
        for record in &self.records {
            *counts.entry(record.status).or_insert(0) += 1;
        }
        counts
    }
}

pub struct Generator {
    config: GeneratorConfig,
    equipment: Vec<EquipmentSpec>,
    noise: Normal<f64>,
}

impl Generator {
    pub fn new(config: GeneratorConfig, equipment: Vec<EquipmentSpec>) -> SimResult<Self> {
        config.validate()?;
        if equipment.is_empty() {
            return Err(SimError::NoEquipment);
        }
        for spec in &equipment {
            if !spec.mass_flow_kgps.is_finite() || spec.mass_flow_kgps <= 0.0 {
                return Err(SimError::config(format!(
                    "equipment {}: mass flow must be positive",
                    spec.id
                )));
            }
        }
        let noise = config.ambient.noise()?;
        Ok(Self {
            config,
            equipment,
            noise,
        })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn equipment(&self) -> &[EquipmentSpec] {
        &self.equipment
    }

    /// Number of timestamps in the horizon.
    pub fn steps(&self) -> usize {
        let hours = u64::from(self.config.days) * 24;
        (hours / u64::from(self.config.step_hours.max(1))) as usize
    }

    /// Samples that a run will evaluate after applying `max_samples`.
    pub fn planned_samples(&self) -> usize {
        self.steps()
            .saturating_mul(self.equipment.len())
            .min(self.config.max_samples)
    }

    /// Draw every perturbation up front, in a fixed order, from the seeded RNG.
    pub fn draw_samples(&self) -> Vec<Sample> {
        let cfg = &self.config;
        let mut rng = StdRng::seed_from_u64(cfg.seed);
        let limit = self.planned_samples();
        let mut samples = Vec::with_capacity(limit);

        'steps: for i in 0..self.steps() {
            let elapsed_hours = i as u32 * cfg.step_hours;
            let timestamp = cfg.start + Duration::hours(elapsed_hours as i64);
            let days_remaining = cfg.days - elapsed_hours / 24;
            let fouling = cfg.fouling.factor(days_remaining);

            let ambient_c =
                cfg.ambient
                    .sample(&self.noise, &mut rng, timestamp.hour(), timestamp.ordinal());

            for (index, spec) in self.equipment.iter().enumerate() {
                if samples.len() == limit {
                    break 'steps;
                }
                let delta_t_k = (cfg.base_delta_t_k + cfg.doors.sample(&mut rng)) * fouling;
                let efficiency = cfg.efficiency.sample(&mut rng);
                let jitter = if cfg.interior_jitter_k > 0.0 {
                    rng.gen_range(-cfg.interior_jitter_k..=cfg.interior_jitter_k)
                } else {
                    0.0
                };
                samples.push(Sample {
                    timestamp,
                    equipment: index,
                    ambient_c,
                    delta_t_k,
                    efficiency,
                    interior_c: round_to(spec.interior_setpoint_c + jitter, 1),
                });
            }
        }
        samples
    }

    /// Evaluate one sample through the engine.
    pub fn evaluate_sample(
        &self,
        engine: &CycleEngine<'_>,
        sample: &Sample,
    ) -> Result<OperatingPoint, CycleError> {
        let spec = &self.equipment[sample.equipment];
        let setpoint = CycleSetpoint::from_celsius(
            spec.interior_setpoint_c,
            sample.ambient_c + sample.delta_t_k,
            spec.refrigerant.as_str(),
            spec.superheat_k,
            spec.subcooling_k,
        );
        let compressor = CompressorModel::new(sample.efficiency)?;
        engine
            .with_compressor(compressor)
            .evaluate(&setpoint)?
            .at_mass_flow(kgps(spec.mass_flow_kgps))
    }

    fn to_record(&self, sample: &Sample, point: &OperatingPoint) -> OperatingRecord {
        let spec = &self.equipment[sample.equipment];
        OperatingRecord {
            timestamp: sample.timestamp,
            equipment_id: spec.id.clone(),
            ambient_c: sample.ambient_c,
            interior_c: sample.interior_c,
            delta_t_cond_c: round_to(sample.delta_t_k, 1),
            compressor_efficiency: round_to(sample.efficiency, 3),
            cop: round_to(point.cop, 2),
            discharge_temp_c: round_to(temperature_c(point.discharge_temperature), 1),
            compressor_kw: round_to(power_kw(point.compressor_power), 3),
            cooling_kw: round_to(power_kw(point.cooling_capacity), 3),
            evaporator_quality: point.evaporator_inlet_quality.map(|x| round_to(x, 3)),
            status: self.config.thresholds.classify(sample.delta_t_k, point.cop),
        }
    }

    /// Draw samples, evaluate them in parallel and collect records in time order.
    pub fn run(&self, engine: &CycleEngine<'_>) -> GenerationReport {
        let samples = self.draw_samples();
        let total = self.steps().saturating_mul(self.equipment.len());
        let truncated = samples.len() < total;
        if truncated {
            warn!(
                max_samples = self.config.max_samples,
                total, "sample limit truncates the horizon"
            );
        }

        let outcomes: Vec<Result<OperatingPoint, CycleError>> = samples
            .par_iter()
            .map(|sample| self.evaluate_sample(engine, sample))
            .collect();

        let mut report = GenerationReport {
            records: Vec::with_capacity(samples.len()),
            failed: 0,
            truncated,
        };
        for (sample, outcome) in samples.iter().zip(outcomes) {
            match outcome {
                Ok(point) => report.records.push(self.to_record(sample, &point)),
                Err(error) => {
                    report.failed += 1;
                    warn!(
                        equipment = %self.equipment[sample.equipment].id,
                        timestamp = %sample.timestamp,
                        %error,
                        "skipping sample"
                    );
                }
            }
        }

        info!(
            records = report.records.len(),
            failed = report.failed,
            seed = self.config.seed,
            "generation finished"
        );
        report
    }
}
