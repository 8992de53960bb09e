//! CoolProp-backed property engine (via `rfluids`).

use crate::engine::{PropertyEngine, validation};
use crate::error::{PropsError, PropsResult};
use crate::if97::constants::{PC_MPA, TC_K};
use crate::state::{Phase, StateInput, StateParts, SteamState};
use rfluids::prelude::*;
use sc_core::units::{to_kelvin, to_mpa};

/// Envelope of the CoolProp water backend.
const T_MIN_K: f64 = 273.16;
const T_MAX_K: f64 = 2000.0;
const P_MAX_MPA: f64 = 1000.0;

/// CoolProp backend for water and steam.
///
/// Each call builds a fresh `Fluid`, so the engine is freely shareable
/// across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoolPropEngine;

impl CoolPropEngine {
    pub fn new() -> Self {
        Self
    }

    fn flash(&self, a: FluidInput, b: FluidInput, at: &str) -> PropsResult<Fluid> {
        Fluid::from(Pure::Water)
            .in_state(a, b)
            .map_err(|e| backend_error(format!("rfluids error at {at}: {e}")))
    }

    fn assemble(&self, mut fluid: Fluid, x_hint: Option<f64>) -> PropsResult<SteamState> {
        let p_pa = fluid
            .pressure()
            .map_err(|e| backend_error(format!("rfluids error getting pressure: {e}")))?;
        let t_k = fluid
            .temperature()
            .map_err(|e| backend_error(format!("rfluids error getting temperature: {e}")))?;
        let h = fluid
            .enthalpy()
            .map_err(|e| backend_error(format!("rfluids error getting enthalpy: {e}")))?;
        let s = fluid
            .entropy()
            .map_err(|e| backend_error(format!("rfluids error getting entropy: {e}")))?;
        let rho = fluid
            .density()
            .map_err(|e| backend_error(format!("rfluids error getting density: {e}")))?;

        let x = match x_hint {
            Some(x) => Some(x),
            // Single-phase states report no quality (or one outside [0, 1]).
            None => fluid.quality().ok().filter(|x| (0.0..=1.0).contains(x)),
        };

        let p_mpa = p_pa * 1e-6;
        let phase = match x {
            Some(_) => Phase::TwoPhase,
            None => self.single_phase(p_mpa, t_k)?,
        };

        SteamState::from_parts(StateParts {
            p_mpa,
            t_k,
            h: h / 1000.0,
            s: s / 1000.0,
            v: 1.0 / rho,
            x,
            phase,
            region: None,
        })
    }

    /// Liquid below the saturation temperature (or below Tc when
    /// supercritical in pressure), gas otherwise.
    fn single_phase(&self, p_mpa: f64, t_k: f64) -> PropsResult<Phase> {
        if t_k >= TC_K {
            return Ok(Phase::Gas);
        }
        if p_mpa >= PC_MPA {
            return Ok(Phase::Liquid);
        }
        let mut sat = self.flash(
            FluidInput::pressure(p_mpa * 1e6),
            FluidInput::quality(0.0),
            "saturation",
        )?;
        let t_sat = sat
            .temperature()
            .map_err(|e| backend_error(format!("rfluids error getting temperature: {e}")))?;
        Ok(if t_k < t_sat { Phase::Liquid } else { Phase::Gas })
    }

    fn check_envelope(p_mpa: Option<f64>, t_k: Option<f64>) -> PropsResult<()> {
        if let Some(p) = p_mpa
            && p > P_MAX_MPA
        {
            return Err(PropsError::out_of_bounds(format!(
                "pressure {p} MPa above {P_MAX_MPA} MPa"
            )));
        }
        if let Some(t) = t_k
            && !(T_MIN_K..=T_MAX_K).contains(&t)
        {
            return Err(PropsError::out_of_bounds(format!(
                "temperature {t} K outside [{T_MIN_K}, {T_MAX_K}] K"
            )));
        }
        Ok(())
    }
}

impl PropertyEngine for CoolPropEngine {
    fn name(&self) -> &str {
        "CoolProp"
    }

    fn state(&self, input: StateInput) -> PropsResult<SteamState> {
        let at = input.to_string();
        match input {
            StateInput::PT { p, t } => {
                let (p_mpa, t_k) = (to_mpa(p), to_kelvin(t));
                validation::validate_pressure(p_mpa)?;
                validation::validate_temperature(t_k)?;
                Self::check_envelope(Some(p_mpa), Some(t_k))?;
                let fluid = self.flash(
                    FluidInput::pressure(p_mpa * 1e6),
                    FluidInput::temperature(t_k),
                    &at,
                )?;
                // A P-T pair never lands inside the dome.
                let mut state = self.assemble(fluid, None)?;
                if state.is_two_phase() {
                    state = SteamState::from_parts(StateParts {
                        p_mpa,
                        t_k,
                        h: state.enthalpy(),
                        s: state.entropy(),
                        v: state.specific_volume(),
                        x: None,
                        phase: Phase::Liquid,
                        region: None,
                    })?;
                }
                Ok(state)
            }
            StateInput::PH { p, h } => {
                let p_mpa = to_mpa(p);
                validation::validate_pressure(p_mpa)?;
                validation::validate_finite(h, "enthalpy")?;
                Self::check_envelope(Some(p_mpa), None)?;
                let fluid = self.flash(
                    FluidInput::pressure(p_mpa * 1e6),
                    FluidInput::enthalpy(h * 1000.0),
                    &at,
                )?;
                self.assemble(fluid, None)
            }
            StateInput::PS { p, s } => {
                let p_mpa = to_mpa(p);
                validation::validate_pressure(p_mpa)?;
                validation::validate_finite(s, "entropy")?;
                Self::check_envelope(Some(p_mpa), None)?;
                let fluid = self.flash(
                    FluidInput::pressure(p_mpa * 1e6),
                    FluidInput::entropy(s * 1000.0),
                    &at,
                )?;
                self.assemble(fluid, None)
            }
            StateInput::PX { p, x } => {
                let p_mpa = to_mpa(p);
                validation::validate_pressure(p_mpa)?;
                validation::validate_quality(x)?;
                if p_mpa > PC_MPA {
                    return Err(PropsError::out_of_bounds(format!(
                        "pressure {p_mpa} MPa above the critical pressure"
                    )));
                }
                let fluid =
                    self.flash(FluidInput::pressure(p_mpa * 1e6), FluidInput::quality(x), &at)?;
                self.assemble(fluid, Some(x))
            }
            StateInput::TX { t, x } => {
                let t_k = to_kelvin(t);
                validation::validate_temperature(t_k)?;
                validation::validate_quality(x)?;
                if !(T_MIN_K..=TC_K).contains(&t_k) {
                    return Err(PropsError::out_of_bounds(format!(
                        "temperature {t_k} K outside the saturation range"
                    )));
                }
                let fluid = self.flash(FluidInput::temperature(t_k), FluidInput::quality(x), &at)?;
                self.assemble(fluid, Some(x))
            }
        }
    }
}

/// Backend failures that name a range violation surface as out-of-bounds.
fn backend_error(message: String) -> PropsError {
    let lower = message.to_lowercase();
    if ["range", "bound", "limit"].iter().any(|k| lower.contains(k)) {
        PropsError::OutOfBounds { what: message }
    } else {
        PropsError::Backend { message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_messages_map_to_out_of_bounds() {
        assert!(backend_error("Temperature out of range".into()).is_out_of_bounds());
        assert!(backend_error("value is above upper bound".into()).is_out_of_bounds());
        assert!(!backend_error("solver failed".into()).is_out_of_bounds());
    }

    #[test]
    fn envelope_rejects_extreme_temperature() {
        let err = CoolPropEngine::check_envelope(Some(1.0), Some(5000.0)).unwrap_err();
        assert!(err.is_out_of_bounds());
        assert!(CoolPropEngine::check_envelope(Some(1.0), Some(300.0)).is_ok());
        assert!(CoolPropEngine::check_envelope(Some(2000.0), None).is_err());
    }
}
