//! sc-cycle: state-point, Rankine cycle and saturation-dome evaluation.
//!
//! Everything here talks to water properties only through
//! [`sc_props::PropertyEngine`], so the engine behind a calculation can be
//! swapped without touching the cycle logic.
//!
//! # Example
//!
//! ```
//! use sc_cycle::{RankineInputs, evaluate_rankine};
//! use sc_props::If97Engine;
//!
//! let cycle = evaluate_rankine(&If97Engine::new(), &RankineInputs::default()).unwrap();
//! assert!(cycle.efficiency > 0.0 && cycle.efficiency < cycle.carnot_efficiency);
//! ```

pub mod dome;
pub mod error;
pub mod points;
pub mod rankine;
pub mod state_point;

pub use dome::{DomeSweep, SaturationDome, critical_point, sample_dome};
pub use error::{
    CYCLE_RANGE_GUIDANCE, CalcError, CalcErrorKind, CalcResult, STATE_RANGE_GUIDANCE,
};
pub use points::{ChartPoint, CyclePoint};
pub use rankine::{
    Pump, QualityReport, RankineCycle, RankineInputs, Turbine, check_preconditions,
    evaluate_rankine,
};
pub use state_point::{
    IntermediateSample, StateLabel, StatePointReport, TIE_LINE_QUALITIES, evaluate_state_point,
};
