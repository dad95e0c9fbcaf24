//! Plant validation logic.

use crate::schema::{ChamberDef, GeneratorDef, PlantConfig, TariffDef, ThresholdsDef};
use std::collections::HashSet;

/// Longest generator horizon a plant file may request.
pub const MAX_GENERATOR_DAYS: u32 = 3660;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unknown refrigerant '{id}' in chamber {chamber}")]
    UnknownRefrigerant { id: String, chamber: String },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn invalid(field: impl Into<String>, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.into(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

pub fn validate_plant(plant: &PlantConfig) -> Result<(), ValidationError> {
    if plant.version > crate::migrate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: plant.version,
        });
    }
    if plant.name.trim().is_empty() {
        return Err(invalid("name", "", "must not be empty"));
    }

    validate_tariff(&plant.tariff)?;

    let mut chamber_ids = HashSet::new();
    for chamber in &plant.chambers {
        if !chamber_ids.insert(chamber.id.as_str()) {
            return Err(ValidationError::DuplicateId {
                id: chamber.id.clone(),
                context: "chambers".to_string(),
            });
        }
        validate_chamber(chamber)?;
    }

    validate_generator(&plant.generator)?;
    validate_thresholds(&plant.thresholds)
}

fn validate_tariff(tariff: &TariffDef) -> Result<(), ValidationError> {
    if !tariff.cost_per_kwh.is_finite() || tariff.cost_per_kwh < 0.0 {
        return Err(invalid(
            "tariff.cost_per_kwh",
            tariff.cost_per_kwh,
            "must be non-negative",
        ));
    }
    if tariff.currency.trim().is_empty() {
        return Err(invalid("tariff.currency", "", "must not be empty"));
    }
    Ok(())
}

fn validate_chamber(chamber: &ChamberDef) -> Result<(), ValidationError> {
    let field = |name: &str| format!("chambers[{}].{}", chamber.id, name);

    if chamber.id.trim().is_empty() {
        return Err(invalid("chambers[].id", "", "must not be empty"));
    }
    if !chamber.interior_setpoint_c.is_finite() || chamber.interior_setpoint_c <= -273.15 {
        return Err(invalid(
            field("interior_setpoint_c"),
            chamber.interior_setpoint_c,
            "must be above absolute zero",
        ));
    }
    if !chamber.mass_flow_kgps.is_finite() || chamber.mass_flow_kgps <= 0.0 {
        return Err(invalid(
            field("mass_flow_kgps"),
            chamber.mass_flow_kgps,
            "must be positive",
        ));
    }
    if !chamber.superheat_k.is_finite() || chamber.superheat_k < 0.0 {
        return Err(invalid(
            field("superheat_k"),
            chamber.superheat_k,
            "must be non-negative",
        ));
    }
    if !chamber.subcooling_k.is_finite() || chamber.subcooling_k < 0.0 {
        return Err(invalid(
            field("subcooling_k"),
            chamber.subcooling_k,
            "must be non-negative",
        ));
    }
    if rc_fluids::lookup_refrigerant(&chamber.refrigerant).is_none() {
        return Err(ValidationError::UnknownRefrigerant {
            id: chamber.refrigerant.clone(),
            chamber: chamber.id.clone(),
        });
    }
    Ok(())
}

fn validate_generator(generator: &GeneratorDef) -> Result<(), ValidationError> {
    if generator.days == 0 || generator.days > MAX_GENERATOR_DAYS {
        return Err(invalid(
            "generator.days",
            generator.days,
            &format!("must lie in 1..={MAX_GENERATOR_DAYS}"),
        ));
    }
    if generator.step_hours == 0 || generator.step_hours > 24 {
        return Err(invalid(
            "generator.step_hours",
            generator.step_hours,
            "must lie in 1..=24",
        ));
    }
    if !generator.base_delta_t_k.is_finite() || generator.base_delta_t_k <= 0.0 {
        return Err(invalid(
            "generator.base_delta_t_k",
            generator.base_delta_t_k,
            "must be positive",
        ));
    }
    if !generator.ambient_noise_k.is_finite() || generator.ambient_noise_k < 0.0 {
        return Err(invalid(
            "generator.ambient_noise_k",
            generator.ambient_noise_k,
            "must be non-negative",
        ));
    }
    if !(generator.ambient_winter_c.is_finite() && generator.ambient_summer_c.is_finite()) {
        return Err(invalid(
            "generator.ambient_*_c",
            format!("{}/{}", generator.ambient_winter_c, generator.ambient_summer_c),
            "must be finite",
        ));
    }
    if !(generator.efficiency_base > 0.0 && generator.efficiency_base <= 1.0) {
        return Err(invalid(
            "generator.efficiency_base",
            generator.efficiency_base,
            "must lie in (0, 1]",
        ));
    }
    if generator.max_samples == 0 {
        return Err(invalid(
            "generator.max_samples",
            generator.max_samples,
            "must be at least 1",
        ));
    }
    Ok(())
}

fn validate_thresholds(t: &ThresholdsDef) -> Result<(), ValidationError> {
    let values = [
        t.warning_delta_t_k,
        t.alarm_delta_t_k,
        t.warning_cop,
        t.alarm_cop,
        t.discharge_limit_c,
    ];
    if values.iter().any(|v| !v.is_finite()) {
        return Err(invalid("thresholds", format!("{values:?}"), "must be finite"));
    }
    if t.alarm_delta_t_k <= t.warning_delta_t_k {
        return Err(invalid(
            "thresholds.alarm_delta_t_k",
            t.alarm_delta_t_k,
            "must exceed the warning ΔT",
        ));
    }
    if t.alarm_cop >= t.warning_cop {
        return Err(invalid(
            "thresholds.alarm_cop",
            t.alarm_cop,
            "must be below the warning COP",
        ));
    }
    if t.discharge_limit_c <= 0.0 {
        return Err(invalid(
            "thresholds.discharge_limit_c",
            t.discharge_limit_c,
            "must be positive",
        ));
    }
    Ok(())
}
