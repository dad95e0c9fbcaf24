//! Refrigerant catalog queries and saturation tables.

use rc_core::units::pa;
use rc_fluids::{
    FluidPoint, Quantity, Refrigerant, RefrigerantKind, SaturationAt, SaturationLine,
    SaturationSweep, SweepDefinition, SweepType, filter_refrigerant_catalog, parse_quantity,
    saturation_sweep,
};

use crate::context::AppContext;
use crate::error::{AppError, AppResult};

#[derive(Debug, Clone)]
pub struct FluidSummary {
    pub id: &'static str,
    pub name: &'static str,
    pub blend: bool,
    pub aliases: Vec<&'static str>,
    pub critical_temperature_c: Option<f64>,
}

/// Catalog entries matching `query` (all when empty), with critical
/// temperatures from the session's property model where available.
pub fn list_fluids(ctx: &AppContext, query: &str) -> Vec<FluidSummary> {
    filter_refrigerant_catalog(query)
        .into_iter()
        .map(|entry| FluidSummary {
            id: entry.canonical_id,
            name: entry.display_name,
            blend: entry.kind() == RefrigerantKind::Blend,
            aliases: entry.aliases.to_vec(),
            critical_temperature_c: ctx
                .model()
                .critical_point(entry.refrigerant)
                .map(|(t, _)| rc_core::units::temperature_c(t)),
        })
        .collect()
}

pub fn parse_refrigerant(id: &str) -> AppResult<Refrigerant> {
    id.parse::<Refrigerant>()
        .map_err(|_| AppError::InvalidInput(format!("Unknown refrigerant: {}", id)))
}

/// Bubble and dew points at one pressure given as text ("3bar", "250 kPa").
pub fn saturation_at_pressure(
    ctx: &AppContext,
    refrigerant_id: &str,
    pressure: &str,
) -> AppResult<(FluidPoint, FluidPoint)> {
    let refrigerant = parse_refrigerant(refrigerant_id)?;
    let at = SaturationAt::Pressure(pa(parse_quantity(pressure, Quantity::Pressure)?));
    let model = ctx.model();
    let bubble = model.saturated(refrigerant, at, SaturationLine::Liquid)?;
    let dew = model.saturated(refrigerant, at, SaturationLine::Vapor)?;
    Ok((bubble, dew))
}

/// Bubble/dew table between two temperatures given as text ("-40C", "250K").
pub fn saturation_table(
    ctx: &AppContext,
    refrigerant_id: &str,
    start: &str,
    end: &str,
    points: usize,
    logarithmic: bool,
) -> AppResult<SaturationSweep> {
    let refrigerant = parse_refrigerant(refrigerant_id)?;
    let sweep_type = if logarithmic {
        SweepType::Logarithmic
    } else {
        SweepType::Linear
    };
    let definition = SweepDefinition::from_text(start, end, points, sweep_type)?;
    Ok(saturation_sweep(ctx.model(), refrigerant, &definition)?)
}
