//! Plant loading, validation and introspection.

use std::path::Path;

use rc_project::schema::{ChamberDef, PlantConfig};
use tracing::info;

use crate::error::{AppError, AppResult};

/// Summary of a chamber for listing.
#[derive(Debug, Clone)]
pub struct ChamberSummary {
    pub id: String,
    pub name: String,
    pub interior_setpoint_c: f64,
    pub mass_flow_kgps: f64,
    pub refrigerant: String,
}

/// Load a plant from YAML or JSON (by extension); validation runs on load.
pub fn load_plant(path: &Path) -> AppResult<PlantConfig> {
    if !path.exists() {
        return Err(AppError::PlantFileRead {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
        });
    }
    let plant = rc_project::load_plant(path)?;
    info!(
        plant = %plant.name,
        chambers = plant.chambers.len(),
        "plant loaded"
    );
    Ok(plant)
}

pub fn validate_plant(plant: &PlantConfig) -> AppResult<()> {
    rc_project::validate_plant(plant)?;
    if plant.chambers.is_empty() {
        return Err(AppError::Plant(
            "Plant must have at least one chamber".to_string(),
        ));
    }
    Ok(())
}

pub fn list_chambers(plant: &PlantConfig) -> Vec<ChamberSummary> {
    plant
        .chambers
        .iter()
        .map(|c| ChamberSummary {
            id: c.id.clone(),
            name: c.name.clone(),
            interior_setpoint_c: c.interior_setpoint_c,
            mass_flow_kgps: c.mass_flow_kgps,
            refrigerant: c.refrigerant.clone(),
        })
        .collect()
}

pub fn get_chamber<'a>(plant: &'a PlantConfig, chamber_id: &str) -> AppResult<&'a ChamberDef> {
    plant
        .chamber(chamber_id)
        .ok_or_else(|| AppError::ChamberNotFound(chamber_id.to_string()))
}
