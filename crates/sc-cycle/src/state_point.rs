//! Single state lookup from pressure and temperature.

use serde::Serialize;
use sc_core::units::{Pressure, Temperature, mpa, to_kelvin};
use sc_props::{Phase, PropertyEngine, StateInput, SteamState};

use crate::error::{CalcError, CalcResult, STATE_RANGE_GUIDANCE};
use crate::points::ChartPoint;

/// Qualities sampled along the tie line of a wet state.
pub const TIE_LINE_QUALITIES: [f64; 4] = [0.2, 0.4, 0.6, 0.8];

/// Display classification of a state point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateLabel {
    CompressedLiquid,
    SuperheatedSteam,
    WetSteam,
}

impl StateLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CompressedLiquid => "Compressed Liquid",
            Self::SuperheatedSteam => "Superheated Steam",
            Self::WetSteam => "Wet Steam",
        }
    }
}

/// Properties at one tie-line quality.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IntermediateSample {
    pub x: f64,
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatePointReport {
    pub state: SteamState,
    pub label: StateLabel,
    /// 0 for liquid, 1 for superheated, engine quality when wet.
    pub quality: f64,
    /// Empty unless the state is wet.
    pub intermediate: Vec<IntermediateSample>,
    pub plot_point: ChartPoint,
}

/// Evaluate the state at (p, T) and classify it.
pub fn evaluate_state_point(
    engine: &dyn PropertyEngine,
    p: Pressure,
    t: Temperature,
) -> CalcResult<StatePointReport> {
    let state = engine
        .state(StateInput::PT { p, t })
        .map_err(|e| CalcError::from_engine(e, STATE_RANGE_GUIDANCE))?;

    let (label, quality, intermediate) = match state.phase() {
        Phase::Liquid => (StateLabel::CompressedLiquid, 0.0, Vec::new()),
        Phase::Gas => (StateLabel::SuperheatedSteam, 1.0, Vec::new()),
        Phase::TwoPhase => {
            let x = state.quality().unwrap_or_default();
            (StateLabel::WetSteam, x, tie_line(engine, state.pressure_mpa())?)
        }
    };

    let plot_point = ChartPoint::new(state.entropy(), to_kelvin(t) - 273.15);
    Ok(StatePointReport {
        state,
        label,
        quality,
        intermediate,
        plot_point,
    })
}

fn tie_line(engine: &dyn PropertyEngine, p_mpa: f64) -> CalcResult<Vec<IntermediateSample>> {
    TIE_LINE_QUALITIES
        .iter()
        .map(|&x| {
            let state = engine
                .state(StateInput::PX { p: mpa(p_mpa), x })
                .map_err(|e| CalcError::from_engine(e, STATE_RANGE_GUIDANCE))?;
            Ok(IntermediateSample {
                x,
                h: state.enthalpy(),
                s: state.entropy(),
                v: state.specific_volume(),
            })
        })
        .collect()
}
