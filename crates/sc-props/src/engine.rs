//! Property engine trait and validation helpers.

use crate::error::{PropsError, PropsResult};
use crate::state::{StateInput, SteamState};
use sc_core::units::{Pressure, Temperature};

/// Trait for water/steam property engines.
///
/// Two independent inputs in, one fully evaluated state out. Implementations
/// must report inputs outside their valid envelope as
/// [`PropsError::OutOfBounds`] so callers can tell range problems apart from
/// other failures.
///
/// Implementations must be thread-safe (Send + Sync); every call is a pure
/// function of its inputs.
pub trait PropertyEngine: Send + Sync {
    /// Get the engine name (for debugging/logging).
    fn name(&self) -> &str;

    /// Evaluate the state defined by `input`.
    fn state(&self, input: StateInput) -> PropsResult<SteamState>;

    /// Saturation temperature at pressure `p`.
    fn saturation_temperature(&self, p: Pressure) -> PropsResult<Temperature> {
        Ok(self.state(StateInput::PX { p, x: 0.0 })?.temperature())
    }

    /// Saturation pressure at temperature `t`.
    fn saturation_pressure(&self, t: Temperature) -> PropsResult<Pressure> {
        Ok(self.state(StateInput::TX { t, x: 0.0 })?.pressure())
    }
}

impl<E: PropertyEngine + ?Sized> PropertyEngine for &E {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn state(&self, input: StateInput) -> PropsResult<SteamState> {
        (**self).state(input)
    }
}

impl<E: PropertyEngine + ?Sized> PropertyEngine for Box<E> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn state(&self, input: StateInput) -> PropsResult<SteamState> {
        (**self).state(input)
    }
}

/// Validation helpers shared by engines.
pub(crate) mod validation {
    use super::*;

    /// Pressure [MPa] must be finite; a non-positive one is out of bounds.
    pub fn validate_pressure(p_mpa: f64) -> PropsResult<()> {
        if !p_mpa.is_finite() {
            return Err(PropsError::NonPhysical {
                what: "pressure must be finite",
            });
        }
        if p_mpa <= 0.0 {
            return Err(PropsError::out_of_bounds(format!(
                "pressure {p_mpa} MPa is not positive"
            )));
        }
        Ok(())
    }

    /// Temperature [K] must be finite; at or below absolute zero is out of
    /// bounds.
    pub fn validate_temperature(t_k: f64) -> PropsResult<()> {
        if !t_k.is_finite() {
            return Err(PropsError::NonPhysical {
                what: "temperature must be finite",
            });
        }
        if t_k <= 0.0 {
            return Err(PropsError::out_of_bounds(format!(
                "temperature {t_k} K is not above absolute zero"
            )));
        }
        Ok(())
    }

    /// Ensure a caloric input (h or s) is finite (can be negative).
    pub fn validate_finite(v: f64, what: &'static str) -> PropsResult<()> {
        if !v.is_finite() {
            return Err(PropsError::NonPhysical { what });
        }
        Ok(())
    }

    /// Quality must lie in the closed unit interval.
    pub fn validate_quality(x: f64) -> PropsResult<()> {
        if !x.is_finite() {
            return Err(PropsError::NonPhysical {
                what: "quality must be finite",
            });
        }
        if !(0.0..=1.0).contains(&x) {
            return Err(PropsError::out_of_bounds(format!(
                "quality {x} outside [0, 1]"
            )));
        }
        Ok(())
    }
}
