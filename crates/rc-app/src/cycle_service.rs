//! Single-setpoint evaluation and flattened, serializable reports.

use rc_core::units::{kgps, power_kw, pressure_pa, temperature_c};
use rc_cycle::{CompressorModel, CycleResult, CycleSetpoint, OperatingPoint, StatePoint};
use serde::Serialize;
use tracing::info;

use crate::context::AppContext;
use crate::error::AppResult;
use crate::plant_service::get_chamber;

/// One cycle state in display units.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateReport {
    pub point: usize,
    pub label: String,
    pub pressure_kpa: f64,
    pub temperature_c: f64,
    pub enthalpy_kj_per_kg: f64,
    pub entropy_kj_per_kg_k: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<f64>,
}

/// Capacity figures at a given mass flow.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperatingReport {
    pub mass_flow_kgps: f64,
    pub compressor_kw: f64,
    pub cooling_kw: f64,
    pub heat_rejection_kw: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CycleReport {
    pub refrigerant: String,
    pub evaporation_c: f64,
    pub condensation_c: f64,
    pub superheat_k: f64,
    pub subcooling_k: f64,
    pub isentropic_efficiency: f64,
    pub states: Vec<StateReport>,
    pub compressor_work_kj_per_kg: f64,
    pub evaporator_heat_kj_per_kg: f64,
    pub condenser_heat_kj_per_kg: f64,
    pub cop: f64,
    pub pressure_ratio: f64,
    pub discharge_temperature_c: f64,
    pub energy_balance_residual: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operating: Option<OperatingReport>,
}

impl CycleReport {
    pub fn from_result(
        setpoint: &CycleSetpoint,
        compressor: CompressorModel,
        result: &CycleResult,
    ) -> Self {
        let states = StatePoint::ALL
            .iter()
            .map(|&point| {
                let s = result.state(point);
                StateReport {
                    point: point.index() + 1,
                    label: point.label().to_string(),
                    pressure_kpa: pressure_pa(s.pressure) / 1e3,
                    temperature_c: temperature_c(s.temperature),
                    enthalpy_kj_per_kg: s.specific_enthalpy / 1e3,
                    entropy_kj_per_kg_k: s.specific_entropy / 1e3,
                    quality: s.vapor_quality,
                }
            })
            .collect();

        Self {
            refrigerant: result.refrigerant().key().to_string(),
            evaporation_c: setpoint.evaporation_c(),
            condensation_c: setpoint.condensation_c(),
            superheat_k: setpoint.superheat_k(),
            subcooling_k: setpoint.subcooling_k(),
            isentropic_efficiency: compressor.isentropic_efficiency(),
            states,
            compressor_work_kj_per_kg: result.compressor_work() / 1e3,
            evaporator_heat_kj_per_kg: result.evaporator_heat() / 1e3,
            condenser_heat_kj_per_kg: result.condenser_heat() / 1e3,
            cop: result.cop(),
            pressure_ratio: result.pressure_ratio(),
            discharge_temperature_c: temperature_c(result.discharge_temperature()),
            energy_balance_residual: result.energy_balance_residual(),
            operating: None,
        }
    }

    pub fn with_operating_point(mut self, point: &OperatingPoint) -> Self {
        self.operating = Some(OperatingReport {
            mass_flow_kgps: rc_core::units::mass_rate_kgps(point.mass_flow),
            compressor_kw: power_kw(point.compressor_power),
            cooling_kw: power_kw(point.cooling_capacity),
            heat_rejection_kw: power_kw(point.heat_rejection),
        });
        self
    }
}

/// Evaluate one setpoint; `efficiency` of `None` means isentropic compression.
pub fn evaluate(
    ctx: &AppContext,
    setpoint: &CycleSetpoint,
    efficiency: Option<f64>,
) -> AppResult<CycleReport> {
    let compressor = match efficiency {
        Some(eta) => CompressorModel::new(eta)?,
        None => CompressorModel::IDEAL,
    };
    let result = ctx.engine_with(compressor).evaluate(setpoint)?;
    Ok(CycleReport::from_result(setpoint, compressor, &result))
}

/// Evaluate a plant chamber at an ambient temperature, condensing at
/// ambient plus the plant's base condenser ΔT.
pub fn evaluate_chamber(
    ctx: &AppContext,
    chamber_id: &str,
    ambient_c: f64,
    efficiency: Option<f64>,
) -> AppResult<CycleReport> {
    let plant = ctx.plant()?;
    let chamber = get_chamber(plant, chamber_id)?;
    let setpoint = CycleSetpoint::from_celsius(
        chamber.interior_setpoint_c,
        ambient_c + plant.generator.base_delta_t_k,
        chamber.refrigerant.as_str(),
        chamber.superheat_k,
        chamber.subcooling_k,
    );
    let compressor = match efficiency {
        Some(eta) => CompressorModel::new(eta)?,
        None => CompressorModel::IDEAL,
    };
    let result = ctx.engine_with(compressor).evaluate(&setpoint)?;
    let point = result.at_mass_flow(kgps(chamber.mass_flow_kgps))?;
    info!(chamber = chamber_id, cop = result.cop(), "chamber evaluated");
    Ok(CycleReport::from_result(&setpoint, compressor, &result).with_operating_point(&point))
}
