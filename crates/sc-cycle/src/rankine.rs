//! Ideal-reference Rankine cycle with pump and turbine efficiencies.
//!
//! States are resolved in a fixed order, each from the previous one:
//!
//! ```text
//! 1   saturated liquid at condenser pressure        (P, x = 0)
//! 2s  isentropic pump exit                          (P_boiler, s1)
//! 2   actual pump exit, h2 = h1 + (h2s - h1) / eta  (P_boiler, h2)
//! 3   boiler exit                                   (P_boiler, T_boiler)
//! 4s  isentropic turbine exit                       (P_cond, s3)
//! 4   actual turbine exit, h4 = h3 - (h3 - h4s) eta (P_cond, h4)
//! ```

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use sc_core::units::{bar, celsius};
use sc_props::{Phase, PropertyEngine, StateInput, SteamState};

use crate::error::{CYCLE_RANGE_GUIDANCE, CalcError, CalcResult};
use crate::points::{ChartPoint, CyclePoint};

/// Form-level cycle inputs: pressures in bar, temperature in °C,
/// efficiencies in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankineInputs {
    pub p_cond_bar: f64,
    pub p_boiler_bar: f64,
    pub t_boiler_c: f64,
    pub pump_eff_pct: f64,
    pub turbine_eff_pct: f64,
}

impl Default for RankineInputs {
    fn default() -> Self {
        Self {
            p_cond_bar: 0.05,
            p_boiler_bar: 10.0,
            t_boiler_c: 450.0,
            pump_eff_pct: 85.0,
            turbine_eff_pct: 85.0,
        }
    }
}

/// Feed pump with isentropic efficiency `eta`.
#[derive(Debug, Clone, Copy)]
pub struct Pump {
    eta: f64,
}

impl Pump {
    pub fn eta(&self) -> f64 {
        self.eta
    }

    /// Actual exit enthalpy from inlet and isentropic exit enthalpy.
    pub fn outlet_enthalpy(&self, h_in: f64, h_out_s: f64) -> f64 {
        h_in + (h_out_s - h_in) / self.eta
    }
}

/// Turbine with isentropic efficiency `eta`.
#[derive(Debug, Clone, Copy)]
pub struct Turbine {
    eta: f64,
}

impl Turbine {
    pub fn eta(&self) -> f64 {
        self.eta
    }

    pub fn outlet_enthalpy(&self, h_in: f64, h_out_s: f64) -> f64 {
        h_in - (h_in - h_out_s) * self.eta
    }
}

fn in_unit_interval(eta: f64) -> bool {
    eta > 0.0 && eta <= 1.0
}

/// Check the cycle preconditions in order and build the machine stages.
///
/// Runs before any property lookup.
pub fn check_preconditions(inputs: &RankineInputs) -> CalcResult<(Pump, Turbine)> {
    // NaN pressures fail this check too.
    if inputs.p_boiler_bar.partial_cmp(&inputs.p_cond_bar) != Some(Ordering::Greater) {
        return Err(CalcError::PhysicsViolation {
            p_cond_bar: inputs.p_cond_bar,
            p_boiler_bar: inputs.p_boiler_bar,
        });
    }
    let pump = inputs.pump_eff_pct / 100.0;
    let turbine = inputs.turbine_eff_pct / 100.0;
    if !in_unit_interval(pump) || !in_unit_interval(turbine) {
        return Err(CalcError::InvalidEfficiency { pump, turbine });
    }
    Ok((Pump { eta: pump }, Turbine { eta: turbine }))
}

/// How a cycle state's quality is shown.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QualityReport {
    SaturatedLiquid,
    SaturatedVapor,
    Value(f64),
    NotApplicable,
}

impl QualityReport {
    fn for_state(state: &SteamState) -> Self {
        match state.quality() {
            Some(x) if state.is_two_phase() => Self::Value(x),
            _ => Self::NotApplicable,
        }
    }
}

/// Resolved cycle: all six states plus the derived energy balance.
///
/// Energies are kJ/kg; efficiencies are fractions.
#[derive(Debug, Clone, PartialEq)]
pub struct RankineCycle {
    pub inputs: RankineInputs,
    pub pump: f64,
    pub turbine: f64,
    pub state1: SteamState,
    pub state2s: SteamState,
    pub state2: SteamState,
    pub state3: SteamState,
    pub state4s: SteamState,
    pub state4: SteamState,
    pub w_pump: f64,
    pub q_in: f64,
    pub w_turbine: f64,
    pub w_net: f64,
    pub efficiency: f64,
    /// 1 - T1 / T_boiler, for comparison only.
    pub carnot_efficiency: f64,
    pub back_work_ratio: f64,
    /// Efficiency with both machines isentropic.
    pub ideal_efficiency: f64,
}

/// Net work over heat input; exactly zero when no heat is added.
fn thermal_efficiency(w_net: f64, q_in: f64) -> f64 {
    if q_in > 0.0 { w_net / q_in } else { 0.0 }
}

/// Evaluate the cycle.
pub fn evaluate_rankine(
    engine: &dyn PropertyEngine,
    inputs: &RankineInputs,
) -> CalcResult<RankineCycle> {
    let (pump, turbine) = check_preconditions(inputs)?;

    let p_low = bar(inputs.p_cond_bar);
    let p_high = bar(inputs.p_boiler_bar);
    let lookup = |input: StateInput| {
        engine
            .state(input)
            .map_err(|e| CalcError::from_engine(e, CYCLE_RANGE_GUIDANCE))
    };

    let state1 = lookup(StateInput::PX { p: p_low, x: 0.0 })?;
    let state2s = lookup(StateInput::PS {
        p: p_high,
        s: state1.entropy(),
    })?;
    let state2 = lookup(StateInput::PH {
        p: p_high,
        h: pump.outlet_enthalpy(state1.enthalpy(), state2s.enthalpy()),
    })?;
    let state3 = lookup(StateInput::PT {
        p: p_high,
        t: celsius(inputs.t_boiler_c),
    })?;
    let state4s = lookup(StateInput::PS {
        p: p_low,
        s: state3.entropy(),
    })?;
    let state4 = lookup(StateInput::PH {
        p: p_low,
        h: turbine.outlet_enthalpy(state3.enthalpy(), state4s.enthalpy()),
    })?;

    let (h1, h2, h3, h4) = (
        state1.enthalpy(),
        state2.enthalpy(),
        state3.enthalpy(),
        state4.enthalpy(),
    );
    let w_pump = h2 - h1;
    let q_in = h3 - h2;
    let w_turbine = h3 - h4;
    let w_net = w_turbine - w_pump;

    let w_net_s = (h3 - state4s.enthalpy()) - (state2s.enthalpy() - h1);
    let t_boiler_k = inputs.t_boiler_c + 273.15;

    let cycle = RankineCycle {
        inputs: *inputs,
        pump: pump.eta(),
        turbine: turbine.eta(),
        w_pump,
        q_in,
        w_turbine,
        w_net,
        efficiency: thermal_efficiency(w_net, q_in),
        carnot_efficiency: 1.0 - state1.temperature_k() / t_boiler_k,
        back_work_ratio: if w_turbine > 0.0 { w_pump / w_turbine } else { 0.0 },
        ideal_efficiency: thermal_efficiency(w_net_s, h3 - state2s.enthalpy()),
        state1,
        state2s,
        state2,
        state3,
        state4s,
        state4,
    };
    tracing::debug!(
        engine = engine.name(),
        w_net = cycle.w_net,
        efficiency = cycle.efficiency,
        "rankine cycle resolved"
    );
    Ok(cycle)
}

impl RankineCycle {
    /// The four stage states in plotting order, closed back to state 1.
    pub fn cycle_points(&self) -> Vec<CyclePoint> {
        [
            (1, &self.state1),
            (2, &self.state2),
            (3, &self.state3),
            (4, &self.state4),
            (1, &self.state1),
        ]
        .into_iter()
        .map(|(stage, state)| CyclePoint {
            stage,
            state: state.clone(),
        })
        .collect()
    }

    pub fn chart_points(&self) -> Vec<ChartPoint> {
        self.cycle_points().iter().map(CyclePoint::to_chart).collect()
    }

    /// Stage state by number (1 to 4).
    pub fn stage(&self, stage: u8) -> Option<&SteamState> {
        match stage {
            1 => Some(&self.state1),
            2 => Some(&self.state2),
            3 => Some(&self.state3),
            4 => Some(&self.state4),
            _ => None,
        }
    }

    pub fn stage_quality(&self, stage: u8) -> QualityReport {
        match (stage, self.stage(stage)) {
            (1, _) => QualityReport::SaturatedLiquid,
            (3, Some(state)) if state.phase() == Phase::Gas => QualityReport::SaturatedVapor,
            (_, Some(state)) => QualityReport::for_state(state),
            (_, None) => QualityReport::NotApplicable,
        }
    }

    pub fn stage_phase(&self, stage: u8) -> &'static str {
        match (stage, self.stage(stage).map(SteamState::phase)) {
            (1, _) => "Saturated Liquid",
            (3, Some(Phase::Gas)) => "Superheated Steam",
            (3, Some(Phase::Liquid)) => "Compressed Liquid",
            (_, Some(phase)) => phase.as_str(),
            (_, None) => "",
        }
    }
}
