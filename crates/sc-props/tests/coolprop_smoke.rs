//! CoolProp backend checks with broad tolerances against IF97.

#![cfg(feature = "coolprop")]

use sc_core::units::{celsius, mpa};
use sc_props::{CoolPropEngine, If97Engine, Phase, PropertyEngine, StateInput};

#[test]
fn water_at_one_atmosphere() {
    let state = CoolPropEngine::new()
        .state(StateInput::PT { p: mpa(0.101_325), t: celsius(25.0) })
        .unwrap();
    assert_eq!(state.phase(), Phase::Liquid);
    assert!(state.density() > 990.0 && state.density() < 1000.0);
}

#[test]
fn superheated_steam_matches_if97() {
    let input = StateInput::PT { p: mpa(10.0), t: celsius(450.0) };
    let cp = CoolPropEngine::new().state(input).unwrap();
    let native = If97Engine::new().state(input).unwrap();
    assert_eq!(cp.phase(), Phase::Gas);
    assert!((cp.enthalpy() - native.enthalpy()).abs() < 2.0);
    assert!((cp.entropy() - native.entropy()).abs() < 5e-3);
}

#[test]
fn quality_input_gives_two_phase() {
    let state = CoolPropEngine::new()
        .state(StateInput::PX { p: mpa(0.05), x: 0.5 })
        .unwrap();
    assert!(state.is_two_phase());
    assert_eq!(state.quality(), Some(0.5));
}

#[test]
fn extreme_temperature_is_out_of_bounds() {
    let err = CoolPropEngine::new()
        .state(StateInput::PT { p: mpa(1.0), t: celsius(3000.0) })
        .unwrap_err();
    assert!(err.is_out_of_bounds());
}
