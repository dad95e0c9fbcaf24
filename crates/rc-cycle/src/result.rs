//! Cycle results.

use crate::error::{CycleError, CycleStage, EngineResult};
use crate::state::{StatePoint, ThermodynamicState};
use rc_core::units::{MassRate, Power, Pressure, Temperature, mass_rate_kgps, watts};
use rc_fluids::{FluidError, Refrigerant};

/// Outcome of one cycle evaluation. Immutable once built.
///
/// Energies are specific [J/kg]. `compressor_work + evaporator_heat ==
/// condenser_heat` holds to rounding because the evaporator inlet enthalpy is
/// pinned to the condenser outlet enthalpy, and `cop` is computed as
/// `evaporator_heat / compressor_work`.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleResult {
    refrigerant: Refrigerant,
    states: [ThermodynamicState; 4],
    compressor_work: f64,
    evaporator_heat: f64,
    condenser_heat: f64,
    cop: f64,
}

impl CycleResult {
    /// Derive energies from the four states, ordered as [`StatePoint::ALL`].
    pub(crate) fn from_states(
        refrigerant: Refrigerant,
        states: [ThermodynamicState; 4],
    ) -> EngineResult<Self> {
        let [s1, s2, s3, s4] = states;
        let compressor_work = s2.specific_enthalpy - s1.specific_enthalpy;
        let evaporator_heat = s1.specific_enthalpy - s4.specific_enthalpy;
        let condenser_heat = s2.specific_enthalpy - s3.specific_enthalpy;

        let non_physical = |what| CycleError::PropertyLookupFailure {
            stage: CycleStage::EnergyBalance,
            source: FluidError::NonPhysical { what },
        };
        if !compressor_work.is_finite() || compressor_work <= 0.0 {
            return Err(non_physical("compressor work must be positive"));
        }
        if !evaporator_heat.is_finite() || evaporator_heat <= 0.0 {
            return Err(non_physical("refrigerating effect must be positive"));
        }

        Ok(Self {
            refrigerant,
            states,
            compressor_work,
            evaporator_heat,
            condenser_heat,
            cop: evaporator_heat / compressor_work,
        })
    }

    pub fn refrigerant(&self) -> Refrigerant {
        self.refrigerant
    }

    pub fn state(&self, point: StatePoint) -> &ThermodynamicState {
        &self.states[point.index()]
    }

    pub fn states(&self) -> &[ThermodynamicState; 4] {
        &self.states
    }

    /// Specific compressor work h2 − h1 [J/kg].
    pub fn compressor_work(&self) -> f64 {
        self.compressor_work
    }

    /// Refrigerating effect h1 − h4 [J/kg].
    pub fn evaporator_heat(&self) -> f64 {
        self.evaporator_heat
    }

    /// Heat rejected h2 − h3 [J/kg].
    pub fn condenser_heat(&self) -> f64 {
        self.condenser_heat
    }

    pub fn cop(&self) -> f64 {
        self.cop
    }

    /// `compressor_work + evaporator_heat − condenser_heat` [J/kg].
    pub fn energy_balance_residual(&self) -> f64 {
        self.compressor_work + self.evaporator_heat - self.condenser_heat
    }

    pub fn evaporating_pressure(&self) -> Pressure {
        self.state(StatePoint::CompressorInlet).pressure
    }

    pub fn condensing_pressure(&self) -> Pressure {
        self.state(StatePoint::CompressorOutlet).pressure
    }

    pub fn pressure_ratio(&self) -> f64 {
        self.state(StatePoint::CompressorOutlet).pressure_pa()
            / self.state(StatePoint::CompressorInlet).pressure_pa()
    }

    pub fn discharge_temperature(&self) -> Temperature {
        self.state(StatePoint::CompressorOutlet).temperature
    }

    /// Scale the specific result by a refrigerant mass flow.
    pub fn at_mass_flow(&self, mass_flow: MassRate) -> EngineResult<OperatingPoint> {
        let mdot = mass_rate_kgps(mass_flow);
        if !mdot.is_finite() || mdot < 0.0 {
            return Err(CycleError::invalid(format!(
                "mass flow must be finite and non-negative, got {mdot} kg/s"
            )));
        }
        Ok(OperatingPoint {
            mass_flow,
            compressor_power: watts(mdot * self.compressor_work),
            cooling_capacity: watts(mdot * self.evaporator_heat),
            heat_rejection: watts(mdot * self.condenser_heat),
            discharge_temperature: self.discharge_temperature(),
            evaporator_inlet_quality: self.state(StatePoint::EvaporatorInlet).vapor_quality,
            cop: self.cop,
        })
    }
}

/// A [`CycleResult`] at a given refrigerant mass flow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OperatingPoint {
    pub mass_flow: MassRate,
    pub compressor_power: Power,
    pub cooling_capacity: Power,
    pub heat_rejection: Power,
    pub discharge_temperature: Temperature,
    /// Flash-gas fraction after the expansion valve.
    pub evaporator_inlet_quality: Option<f64>,
    pub cop: f64,
}
