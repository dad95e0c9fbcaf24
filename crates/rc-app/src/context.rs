//! Explicit session state passed to every service call.

use rc_cycle::{CompressorModel, CycleEngine};
use rc_fluids::{CoolPropModel, PropertyModel};
use rc_project::PlantConfig;

use crate::error::{AppError, AppResult};

/// Plant configuration plus the property backend for one session.
pub struct AppContext {
    model: Box<dyn PropertyModel>,
    plant: Option<PlantConfig>,
}

impl AppContext {
    pub fn new(model: Box<dyn PropertyModel>) -> Self {
        Self { model, plant: None }
    }

    /// CoolProp backend with lookups serialized through one lock.
    pub fn coolprop() -> Self {
        Self::new(Box::new(CoolPropModel::serialized()))
    }

    pub fn with_plant(mut self, plant: PlantConfig) -> Self {
        self.plant = Some(plant);
        self
    }

    pub fn set_plant(&mut self, plant: PlantConfig) {
        self.plant = Some(plant);
    }

    pub fn plant(&self) -> AppResult<&PlantConfig> {
        self.plant.as_ref().ok_or(AppError::NoPlant)
    }

    pub fn model(&self) -> &dyn PropertyModel {
        self.model.as_ref()
    }

    pub fn engine(&self) -> CycleEngine<'_> {
        CycleEngine::new(self.model.as_ref())
    }

    pub fn engine_with(&self, compressor: CompressorModel) -> CycleEngine<'_> {
        self.engine().with_compressor(compressor)
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("model", &self.model.name())
            .field("plant", &self.plant.as_ref().map(|p| p.name.as_str()))
            .finish()
    }
}
