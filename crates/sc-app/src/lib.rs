//! Application layer for steamcalc.
//!
//! Turns a submitted form into a flat result context, shared by every
//! front end. Owns engine selection, configuration and the audit trail;
//! the physics lives in `sc-cycle` and `sc-props`.

pub mod calculator;
pub mod config;
pub mod context;
pub mod error;
pub mod form;

pub use calculator::Calculator;
pub use config::{AppConfig, EngineKind, build_engine, load_config, parse_config, save_config};
pub use context::CalculationContext;
pub use error::{AppError, AppResult};
pub use form::{Form, Mode};
