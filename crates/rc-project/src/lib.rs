//! rc-project: plant configuration file format and validation.

pub mod migrate;
pub mod schema;
pub mod validate;

pub use migrate::{LATEST_VERSION, migrate_to_latest};
pub use schema::*;
pub use validate::{MAX_GENERATOR_DAYS, ValidationError, validate_plant};

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Migration error: {what}")]
    Migration { what: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parse, migrate and validate a plant from YAML text.
pub fn from_yaml_str(content: &str) -> ProjectResult<PlantConfig> {
    let plant: PlantConfig = serde_yaml::from_str(content)?;
    finish_load(plant)
}

pub fn from_json_str(content: &str) -> ProjectResult<PlantConfig> {
    let plant: PlantConfig = serde_json::from_str(content)?;
    finish_load(plant)
}

fn finish_load(plant: PlantConfig) -> ProjectResult<PlantConfig> {
    let plant = migrate_to_latest(plant)?;
    validate_plant(&plant)?;
    Ok(plant)
}

pub fn load_yaml(path: &std::path::Path) -> ProjectResult<PlantConfig> {
    let content = std::fs::read_to_string(path)?;
    from_yaml_str(&content)
}

pub fn save_yaml(path: &std::path::Path, plant: &PlantConfig) -> ProjectResult<()> {
    validate_plant(plant)?;
    let content = serde_yaml::to_string(plant)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &std::path::Path) -> ProjectResult<PlantConfig> {
    let content = std::fs::read_to_string(path)?;
    from_json_str(&content)
}

pub fn save_json(path: &std::path::Path, plant: &PlantConfig) -> ProjectResult<()> {
    validate_plant(plant)?;
    let content = serde_json::to_string_pretty(plant)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Load by extension: `.json` as JSON, anything else as YAML.
pub fn load_plant(path: &std::path::Path) -> ProjectResult<PlantConfig> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => load_json(path),
        _ => load_yaml(path),
    }
}
