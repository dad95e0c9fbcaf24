//! Schema migration framework.

use crate::ProjectError;
use crate::schema::PlantConfig;

pub const LATEST_VERSION: u32 = 2;

pub fn migrate_to_latest(mut plant: PlantConfig) -> Result<PlantConfig, ProjectError> {
    while plant.version < LATEST_VERSION {
        plant = migrate_one_version(plant)?;
    }
    Ok(plant)
}

fn migrate_one_version(plant: PlantConfig) -> Result<PlantConfig, ProjectError> {
    match plant.version {
        0 => migrate_v0_to_v1(plant),
        1 => migrate_v1_to_v2(plant),
        v => Err(ProjectError::Migration {
            what: format!("No migration path from version {}", v),
        }),
    }
}

fn migrate_v0_to_v1(mut plant: PlantConfig) -> Result<PlantConfig, ProjectError> {
    plant.version = 1;
    Ok(plant)
}

/// Version 1 files stored chamber ids in lower case with spaces.
fn migrate_v1_to_v2(mut plant: PlantConfig) -> Result<PlantConfig, ProjectError> {
    for chamber in &mut plant.chambers {
        chamber.id = chamber.id.trim().replace(' ', "_").to_ascii_uppercase();
    }
    plant.version = 2;
    Ok(plant)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ChamberDef, GeneratorDef, TariffDef, ThresholdsDef};

    fn plant(version: u32) -> PlantConfig {
        PlantConfig {
            version,
            name: "Old".to_string(),
            site: None,
            tariff: TariffDef::default(),
            chambers: vec![ChamberDef {
                id: " camara 01 ".to_string(),
                name: "Carnes".to_string(),
                interior_setpoint_c: -18.0,
                mass_flow_kgps: 0.12,
                refrigerant: "R134a".to_string(),
                superheat_k: 0.0,
                subcooling_k: 0.0,
            }],
            generator: GeneratorDef::default(),
            thresholds: ThresholdsDef::default(),
        }
    }

    #[test]
    fn v1_ids_are_normalized() {
        let migrated = migrate_to_latest(plant(1)).unwrap();
        assert_eq!(migrated.version, LATEST_VERSION);
        assert_eq!(migrated.chambers[0].id, "CAMARA_01");
    }

    #[test]
    fn latest_is_untouched() {
        let p = plant(LATEST_VERSION);
        assert_eq!(migrate_to_latest(p.clone()).unwrap(), p);
    }
}
