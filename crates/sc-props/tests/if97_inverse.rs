//! Backward (P-h, P-s) solves must agree with the forward P-T equations.

use proptest::prelude::*;
use sc_core::units::{k, mpa};
use sc_props::{If97Engine, Phase, PropertyEngine, StateInput};

fn engine() -> If97Engine {
    If97Engine::new()
}

#[test]
fn isentropic_expansion_lands_in_dome() {
    let inlet = engine()
        .state(StateInput::PT { p: mpa(10.0), t: k(723.15) })
        .unwrap();
    let outlet = engine()
        .state(StateInput::PS { p: mpa(0.005), s: inlet.entropy() })
        .unwrap();

    assert_eq!(outlet.phase(), Phase::TwoPhase);
    let x = outlet.quality().unwrap();
    assert!(x > 0.7 && x < 0.8, "x = {x}");
    assert!((outlet.entropy() - inlet.entropy()).abs() < 1e-9);
}

#[test]
fn low_pressure_vapor_below_triple_point_pressure() {
    let forward = engine()
        .state(StateInput::PT { p: mpa(0.000_5), t: k(400.0) })
        .unwrap();
    assert_eq!(forward.phase(), Phase::Gas);
    let back = engine()
        .state(StateInput::PH { p: mpa(0.000_5), h: forward.enthalpy() })
        .unwrap();
    assert!((back.temperature_k() - 400.0).abs() < 1e-5);
}

proptest! {
    #[test]
    fn ph_round_trip_subcritical_liquid(p in 0.01f64..20.0, frac in 0.0f64..0.95) {
        let t_sat = engine().saturation_temperature(mpa(p)).unwrap();
        let t = 275.0 + frac * (sc_core::units::to_kelvin(t_sat) - 275.0);
        let forward = engine().state(StateInput::PT { p: mpa(p), t: k(t) }).unwrap();
        let back = engine().state(StateInput::PH { p: mpa(p), h: forward.enthalpy() }).unwrap();
        prop_assert!((back.temperature_k() - t).abs() < 1e-4);
        prop_assert_eq!(back.phase(), Phase::Liquid);
    }

    #[test]
    fn ps_round_trip_superheated(p in 0.01f64..10.0, dt in 5.0f64..800.0) {
        let t_sat = engine().saturation_temperature(mpa(p)).unwrap();
        let t = sc_core::units::to_kelvin(t_sat) + dt;
        let forward = engine().state(StateInput::PT { p: mpa(p), t: k(t) }).unwrap();
        let back = engine().state(StateInput::PS { p: mpa(p), s: forward.entropy() }).unwrap();
        prop_assert!((back.temperature_k() - t).abs() < 1e-4);
        prop_assert!((back.enthalpy() - forward.enthalpy()).abs() < 1e-3);
    }

    #[test]
    fn px_quality_is_preserved(p in 0.001f64..22.0, x in 0.0f64..=1.0) {
        let state = engine().state(StateInput::PX { p: mpa(p), x }).unwrap();
        prop_assert_eq!(state.quality(), Some(x));
        let back = engine().state(StateInput::PH { p: mpa(p), h: state.enthalpy() }).unwrap();
        prop_assert!((back.quality().unwrap_or(-1.0) - x).abs() < 1e-6);
    }
}
