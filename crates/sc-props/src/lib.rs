//! sc-props: water and steam property engines.
//!
//! Provides:
//! - `SteamState`, the evaluated state every engine returns
//! - `PropertyEngine` trait: two independent inputs in, one state out
//! - `If97Engine`, a native IAPWS-IF97 implementation (regions 1 to 5)
//! - `CoolPropEngine`, a CoolProp backend behind the `coolprop` feature
//!
//! Pressures travel as `uom` quantities; enthalpy, entropy and specific
//! volume are plain `f64` in kJ/kg, kJ/(kg·K) and m³/kg.
//!
//! # Example
//!
//! ```
//! use sc_core::units::{celsius, mpa};
//! use sc_props::{If97Engine, PropertyEngine, StateInput};
//!
//! let engine = If97Engine::new();
//! let state = engine
//!     .state(StateInput::PT { p: mpa(10.0), t: celsius(450.0) })
//!     .unwrap();
//! assert!(state.enthalpy() > 3000.0);
//! ```

#[cfg(feature = "coolprop")]
pub mod coolprop;
pub mod engine;
pub mod error;
pub mod if97;
pub mod state;

#[cfg(feature = "coolprop")]
pub use coolprop::CoolPropEngine;
pub use engine::PropertyEngine;
pub use error::{PropsError, PropsResult};
pub use if97::If97Engine;
pub use state::{Phase, Region, StateInput, StateParts, SteamState};
