//! End-to-end checks of the cycle evaluators against the native engine.

use sc_core::units::{PressureUnit, celsius, normalize_pressure};
use sc_cycle::{
    CYCLE_RANGE_GUIDANCE, CalcErrorKind, DomeSweep, RankineInputs, StateLabel, evaluate_rankine,
    evaluate_state_point, sample_dome,
};
use sc_props::If97Engine;

#[test]
fn boiling_point_neighbourhood_at_one_atmosphere() {
    let engine = If97Engine::new();
    let p = normalize_pressure(1.0, PressureUnit::Atm).unwrap();
    let below = evaluate_state_point(&engine, p, celsius(99.0)).unwrap();
    let above = evaluate_state_point(&engine, p, celsius(101.0)).unwrap();
    assert_eq!(below.label, StateLabel::CompressedLiquid);
    assert_eq!(above.label, StateLabel::SuperheatedSteam);
    assert!(above.state.enthalpy() - below.state.enthalpy() > 2000.0);
}

#[test]
fn pump_inlet_sits_on_liquid_branch_of_dome() {
    let engine = If97Engine::new();
    let cycle = evaluate_rankine(&engine, &RankineInputs::default()).unwrap();
    let dome = sample_dome(&engine, &DomeSweep::default());

    // State 1 is saturated liquid at ~32.9 °C, between the 30 and 40 °C samples.
    let t1 = cycle.state1.temperature_c();
    assert!(t1 > 30.0 && t1 < 40.0);
    let s30 = dome.liquid[3].x;
    let s40 = dome.liquid[4].x;
    assert!(cycle.state1.entropy() > s30 && cycle.state1.entropy() < s40);
}

#[test]
fn higher_boiler_temperature_raises_efficiency() {
    let engine = If97Engine::new();
    let base = RankineInputs {
        p_boiler_bar: 100.0,
        ..RankineInputs::default()
    };
    let cool = evaluate_rankine(&engine, &base).unwrap();
    let hot = evaluate_rankine(
        &engine,
        &RankineInputs {
            t_boiler_c: 600.0,
            ..base
        },
    )
    .unwrap();
    assert!(hot.efficiency > cool.efficiency);
    assert!(hot.carnot_efficiency > cool.carnot_efficiency);
}

#[test]
fn supercritical_boiler_pressure_is_accepted() {
    let inputs = RankineInputs {
        p_boiler_bar: 250.0,
        t_boiler_c: 600.0,
        ..RankineInputs::default()
    };
    let cycle = evaluate_rankine(&If97Engine::new(), &inputs).unwrap();
    assert!(cycle.state3.is_supercritical());
    assert!(cycle.efficiency > 0.3);
}

#[test]
fn non_positive_condenser_pressure_is_a_range_violation() {
    for p_cond_bar in [0.0, -1.0] {
        let inputs = RankineInputs {
            p_cond_bar,
            ..RankineInputs::default()
        };
        let err = evaluate_rankine(&If97Engine::new(), &inputs).unwrap_err();
        assert_eq!(err.kind(), CalcErrorKind::RangeViolation);
        assert_eq!(err.user_message(), CYCLE_RANGE_GUIDANCE);
    }
}
