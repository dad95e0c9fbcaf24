//! CoolProp integration tests.
//!
//! Broad tolerances avoid backend version issues while still enforcing
//! physical plausibility.

use rc_core::units::{degc, pa};
use rc_fluids::{
    CoolPropModel, PropertyModel, Refrigerant, SaturationAt, SaturationLine, SweepDefinition,
    SweepType, saturation_sweep,
};

#[test]
fn r134a_saturation_pressures() {
    let model = CoolPropModel::new();

    // About 200 kPa at -10 °C and about 1.0 MPa at 40 °C.
    let p_low = model
        .saturation_pressure(Refrigerant::R134a, degc(-10.0), SaturationLine::Vapor)
        .unwrap();
    let p_high = model
        .saturation_pressure(Refrigerant::R134a, degc(40.0), SaturationLine::Liquid)
        .unwrap();

    assert!(p_low.value > 180e3 && p_low.value < 220e3, "p = {}", p_low.value);
    assert!(p_high.value > 950e3 && p_high.value < 1_080e3, "p = {}", p_high.value);
}

#[test]
fn saturated_vapor_is_above_liquid() {
    let model = CoolPropModel::new();
    let at = SaturationAt::Temperature(degc(-10.0));

    let liquid = model
        .saturated(Refrigerant::R134a, at, SaturationLine::Liquid)
        .unwrap();
    let vapor = model
        .saturated(Refrigerant::R134a, at, SaturationLine::Vapor)
        .unwrap();

    let latent = vapor.enthalpy - liquid.enthalpy;
    assert!(latent > 150e3 && latent < 250e3, "latent = {}", latent);
    assert!(vapor.entropy > liquid.entropy);
    assert_eq!(liquid.quality, Some(0.0));
    assert_eq!(vapor.quality, Some(1.0));
}

#[test]
fn entropy_inversion_recovers_temperature() {
    let model = CoolPropModel::new();
    let p = pa(200_000.0);

    let reference = model
        .state_pt(Refrigerant::R134a, p, degc(10.0))
        .unwrap();
    let solved = model
        .state_ps(Refrigerant::R134a, p, reference.entropy)
        .unwrap();

    assert!(
        (solved.temperature_c() - 10.0).abs() < 0.05,
        "T = {} °C",
        solved.temperature_c()
    );
    assert!((solved.enthalpy - reference.enthalpy).abs() < 100.0);
    assert_eq!(solved.quality, None);
}

#[test]
fn enthalpy_inside_dome_gives_quality() {
    let model = CoolPropModel::new();
    let p = pa(200_000.0);
    let at = SaturationAt::Pressure(p);

    let liquid = model
        .saturated(Refrigerant::R134a, at, SaturationLine::Liquid)
        .unwrap();
    let vapor = model
        .saturated(Refrigerant::R134a, at, SaturationLine::Vapor)
        .unwrap();
    let h_mid = 0.5 * (liquid.enthalpy + vapor.enthalpy);

    let point = model.state_ph(Refrigerant::R134a, p, h_mid).unwrap();
    let x = point.quality.unwrap();
    assert!((x - 0.5).abs() < 1e-9);
    assert!(point.is_two_phase());
}

#[test]
fn zeotropic_blend_has_glide() {
    let model = CoolPropModel::new();
    let at = SaturationAt::Pressure(pa(500_000.0));

    let bubble = model
        .saturated(Refrigerant::R407C, at, SaturationLine::Liquid)
        .unwrap();
    let dew = model
        .saturated(Refrigerant::R407C, at, SaturationLine::Vapor)
        .unwrap();

    let glide = dew.temperature_k() - bubble.temperature_k();
    assert!(glide > 2.0 && glide < 10.0, "glide = {} K", glide);
}

#[test]
fn serialized_model_gives_same_answers() {
    let free = CoolPropModel::new();
    let gated = CoolPropModel::serialized();

    let a = free
        .saturation_pressure(Refrigerant::R404A, degc(-25.0), SaturationLine::Vapor)
        .unwrap();
    let b = gated
        .saturation_pressure(Refrigerant::R404A, degc(-25.0), SaturationLine::Vapor)
        .unwrap();
    assert_eq!(a, b);
}

#[test]
fn r717_saturation_sweep() {
    let model = CoolPropModel::new();
    let def = SweepDefinition::from_text("-30C", "30C", 7, SweepType::Linear).unwrap();

    let sweep = saturation_sweep(&model, Refrigerant::R717, &def).unwrap();
    assert_eq!(sweep.num_failed, 0);

    let pressures: Vec<f64> = sweep
        .rows
        .iter()
        .filter_map(|row| row.dew.map(|p| p.pressure_pa()))
        .collect();
    assert!(pressures.windows(2).all(|w| w[0] < w[1]));
}
