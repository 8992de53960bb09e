//! Thermodynamic state definitions.

use std::fmt;

use crate::error::{PropsError, PropsResult};
use crate::if97::constants::{PC_MPA, TC_K};
use sc_core::units::{
    Pressure, SpecEnthalpy, SpecEntropy, SpecVolume, Temperature, k, mpa, to_celsius, to_kelvin,
    to_mpa,
};

/// Input specification for evaluating a state: exactly two independent properties.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StateInput {
    /// Pressure and temperature.
    PT { p: Pressure, t: Temperature },
    /// Pressure and specific enthalpy [kJ/kg].
    PH { p: Pressure, h: SpecEnthalpy },
    /// Pressure and specific entropy [kJ/(kg·K)].
    PS { p: Pressure, s: SpecEntropy },
    /// Saturation pressure and vapor quality.
    PX { p: Pressure, x: f64 },
    /// Saturation temperature and vapor quality.
    TX { t: Temperature, x: f64 },
}

impl StateInput {
    pub fn label(&self) -> &'static str {
        match self {
            Self::PT { .. } => "P-T",
            Self::PH { .. } => "P-h",
            Self::PS { .. } => "P-s",
            Self::PX { .. } => "P-x",
            Self::TX { .. } => "T-x",
        }
    }
}

impl fmt::Display for StateInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::PT { p, t } => write!(f, "P={} MPa, T={} K", to_mpa(p), to_kelvin(t)),
            Self::PH { p, h } => write!(f, "P={} MPa, h={} kJ/kg", to_mpa(p), h),
            Self::PS { p, s } => write!(f, "P={} MPa, s={} kJ/(kg K)", to_mpa(p), s),
            Self::PX { p, x } => write!(f, "P={} MPa, x={}", to_mpa(p), x),
            Self::TX { t, x } => write!(f, "T={} K, x={}", to_kelvin(t), x),
        }
    }
}

/// Phase tag of an evaluated state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    Liquid,
    Gas,
    TwoPhase,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Liquid => "Liquid",
            Self::Gas => "Gas",
            Self::TwoPhase => "Two-phase",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// IAPWS-IF97 region a state was evaluated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Region {
    R1,
    R2,
    R3,
    R4,
    R5,
}

/// Raw property values used to assemble a [`SteamState`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateParts {
    /// Pressure [MPa]
    pub p_mpa: f64,
    /// Temperature [K]
    pub t_k: f64,
    /// Specific enthalpy [kJ/kg]
    pub h: SpecEnthalpy,
    /// Specific entropy [kJ/(kg·K)]
    pub s: SpecEntropy,
    /// Specific volume [m³/kg]
    pub v: SpecVolume,
    /// Vapor quality, two-phase only
    pub x: Option<f64>,
    pub phase: Phase,
    pub region: Option<Region>,
}

/// Evaluated water/steam state. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct SteamState {
    p: Pressure,
    t: Temperature,
    h: SpecEnthalpy,
    s: SpecEntropy,
    v: SpecVolume,
    x: Option<f64>,
    phase: Phase,
    region: Option<Region>,
}

impl SteamState {
    /// Assemble a state from raw values.
    ///
    /// Rejects non-finite or non-positive P/T/v, a quality on a single-phase
    /// state, and a missing or out-of-range quality on a two-phase state.
    pub fn from_parts(parts: StateParts) -> PropsResult<Self> {
        if !parts.p_mpa.is_finite() || parts.p_mpa <= 0.0 {
            return Err(PropsError::NonPhysical {
                what: "pressure must be positive and finite",
            });
        }
        if !parts.t_k.is_finite() || parts.t_k <= 0.0 {
            return Err(PropsError::NonPhysical {
                what: "temperature must be positive and finite",
            });
        }
        if !parts.v.is_finite() || parts.v <= 0.0 {
            return Err(PropsError::NonPhysical {
                what: "specific volume must be positive and finite",
            });
        }
        if !parts.h.is_finite() || !parts.s.is_finite() {
            return Err(PropsError::NonPhysical {
                what: "enthalpy and entropy must be finite",
            });
        }
        match (parts.phase, parts.x) {
            (Phase::TwoPhase, Some(x)) if (0.0..=1.0).contains(&x) => {}
            (Phase::TwoPhase, _) => {
                return Err(PropsError::NonPhysical {
                    what: "two-phase state needs a quality in [0, 1]",
                });
            }
            (_, Some(_)) => {
                return Err(PropsError::InvalidArg {
                    what: "single-phase state cannot carry a quality",
                });
            }
            (_, None) => {}
        }

        Ok(Self {
            p: mpa(parts.p_mpa),
            t: k(parts.t_k),
            h: parts.h,
            s: parts.s,
            v: parts.v,
            x: parts.x,
            phase: parts.phase,
            region: parts.region,
        })
    }

    pub fn pressure(&self) -> Pressure {
        self.p
    }

    pub fn pressure_mpa(&self) -> f64 {
        to_mpa(self.p)
    }

    pub fn temperature(&self) -> Temperature {
        self.t
    }

    pub fn temperature_k(&self) -> f64 {
        to_kelvin(self.t)
    }

    pub fn temperature_c(&self) -> f64 {
        to_celsius(self.t)
    }

    /// Specific enthalpy [kJ/kg].
    pub fn enthalpy(&self) -> SpecEnthalpy {
        self.h
    }

    /// Specific entropy [kJ/(kg·K)].
    pub fn entropy(&self) -> SpecEntropy {
        self.s
    }

    /// Specific volume [m³/kg].
    pub fn specific_volume(&self) -> SpecVolume {
        self.v
    }

    /// Density [kg/m³].
    pub fn density(&self) -> f64 {
        1.0 / self.v
    }

    /// Vapor quality; `None` outside the two-phase region.
    pub fn quality(&self) -> Option<f64> {
        self.x
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// IF97 region, when the state came from the native engine.
    pub fn region(&self) -> Option<Region> {
        self.region
    }

    pub fn is_two_phase(&self) -> bool {
        self.phase == Phase::TwoPhase
    }

    /// Above both the critical pressure and the critical temperature.
    pub fn is_supercritical(&self) -> bool {
        self.pressure_mpa() > PC_MPA && self.temperature_k() > TC_K
    }
}
