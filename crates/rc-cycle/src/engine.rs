//! Cycle evaluation.

use crate::compressor::CompressorModel;
use crate::error::{CycleError, CycleStage, EngineResult};
use crate::result::CycleResult;
use crate::setpoint::CycleSetpoint;
use crate::state::ThermodynamicState;
use rayon::prelude::*;
use rc_fluids::{FluidError, PropertyModel, SaturationAt, SaturationLine};
use tracing::debug;

/// Stateless evaluator of single-stage vapor-compression cycles.
///
/// Borrows its property model; the same engine can be shared across threads.
#[derive(Clone, Copy)]
pub struct CycleEngine<'a> {
    model: &'a dyn PropertyModel,
    compressor: CompressorModel,
}

impl<'a> CycleEngine<'a> {
    /// Engine with an ideal (isentropic) compressor.
    pub fn new(model: &'a dyn PropertyModel) -> Self {
        Self {
            model,
            compressor: CompressorModel::IDEAL,
        }
    }

    pub fn with_compressor(mut self, compressor: CompressorModel) -> Self {
        self.compressor = compressor;
        self
    }

    pub fn compressor(&self) -> CompressorModel {
        self.compressor
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    /// Compute the four state points and the cycle energies for `setpoint`.
    ///
    /// Evaporating pressure is the dew pressure at the evaporation
    /// temperature; condensing pressure is the bubble pressure at the
    /// condensation temperature.
    pub fn evaluate(&self, setpoint: &CycleSetpoint) -> EngineResult<CycleResult> {
        let refrigerant = setpoint.validate()?;
        if !self.model.supports(refrigerant) {
            return Err(CycleError::UnsupportedRefrigerant {
                id: setpoint.refrigerant_id.clone(),
            });
        }
        let model = self.model;
        let at = |stage| CycleError::at(stage, refrigerant);

        let dew = model
            .saturated(
                refrigerant,
                SaturationAt::Temperature(setpoint.evaporation_temperature),
                SaturationLine::Vapor,
            )
            .map_err(at(CycleStage::EvaporatorSaturation))?;
        let bubble = model
            .saturated(
                refrigerant,
                SaturationAt::Temperature(setpoint.condensation_temperature),
                SaturationLine::Liquid,
            )
            .map_err(at(CycleStage::CondenserSaturation))?;
        let (p_evap, p_cond) = (dew.pressure, bubble.pressure);
        if p_evap >= p_cond {
            return Err(CycleError::PropertyLookupFailure {
                stage: CycleStage::CondenserSaturation,
                source: FluidError::NonPhysical {
                    what: "condensing pressure must exceed evaporating pressure",
                },
            });
        }

        // 1: compressor inlet
        let suction = if setpoint.superheat_k() == 0.0 {
            dew
        } else {
            model
                .state_pt(refrigerant, p_evap, setpoint.suction_temperature())
                .map_err(at(CycleStage::CompressorInlet))?
        };
        let s1 = ThermodynamicState::from(suction);

        // 2: compressor outlet
        let isentropic = model
            .state_ps(refrigerant, p_cond, s1.specific_entropy)
            .map_err(at(CycleStage::CompressorOutlet))?;
        let s2 = if self.compressor.is_ideal() {
            ThermodynamicState::from(isentropic)
        } else {
            let h2 = self
                .compressor
                .discharge_enthalpy(s1.specific_enthalpy, isentropic.enthalpy);
            let real = model
                .state_ph(refrigerant, p_cond, h2)
                .map_err(at(CycleStage::CompressorOutlet))?;
            ThermodynamicState::from(real).with_enthalpy(h2)
        };

        // 3: condenser outlet
        let liquid = if setpoint.subcooling_k() == 0.0 {
            bubble
        } else {
            model
                .state_pt(refrigerant, p_cond, setpoint.liquid_temperature())
                .map_err(at(CycleStage::CondenserOutlet))?
        };
        let s3 = ThermodynamicState::from(liquid);

        // 4: evaporator inlet, isenthalpic
        let h4 = s3.specific_enthalpy;
        let flashed = model
            .state_ph(refrigerant, p_evap, h4)
            .map_err(at(CycleStage::EvaporatorInlet))?;
        let s4 = ThermodynamicState::from(flashed).with_enthalpy(h4);

        let result = CycleResult::from_states(refrigerant, [s1, s2, s3, s4])?;
        debug!(
            %refrigerant,
            t_evap_c = setpoint.evaporation_c(),
            t_cond_c = setpoint.condensation_c(),
            cop = result.cop(),
            work = result.compressor_work(),
            "cycle evaluated"
        );
        Ok(result)
    }

    /// Evaluate independent setpoints in parallel. Output order matches input.
    pub fn evaluate_batch(&self, setpoints: &[CycleSetpoint]) -> Vec<EngineResult<CycleResult>> {
        setpoints.par_iter().map(|sp| self.evaluate(sp)).collect()
    }
}

/// Evaluate one setpoint with an ideal compressor.
pub fn evaluate(
    model: &dyn PropertyModel,
    setpoint: &CycleSetpoint,
) -> EngineResult<CycleResult> {
    CycleEngine::new(model).evaluate(setpoint)
}
