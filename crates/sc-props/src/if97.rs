//! Native IAPWS-IF97 property engine.
//!
//! Forward equations are evaluated per region in (p, T); P-h and P-s inputs
//! are inverted by bisection on temperature against the forward equations,
//! with the saturation dome handled explicitly through the lever rule.

pub mod constants;
mod region1;
mod region2;
mod region3;
mod region4;
mod region5;

use crate::engine::{PropertyEngine, validation};
use crate::error::{PropsError, PropsResult};
use crate::state::{Phase, Region, StateInput, StateParts, SteamState};
use constants::*;
use region3::Branch;
use sc_core::units::{to_kelvin, to_mpa};

/// Specific volume [m³/kg], enthalpy [kJ/kg] and entropy [kJ/(kg·K)].
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Props {
    pub v: f64,
    pub h: f64,
    pub s: f64,
}

impl Props {
    fn lever(liquid: Props, vapor: Props, x: f64) -> Props {
        Props {
            v: liquid.v + x * (vapor.v - liquid.v),
            h: liquid.h + x * (vapor.h - liquid.h),
            s: liquid.s + x * (vapor.s - liquid.s),
        }
    }
}

/// Property evaluated by the backward P-h / P-s solves.
#[derive(Debug, Clone, Copy)]
enum Target {
    Enthalpy,
    Entropy,
}

impl Target {
    fn pick(self, props: &Props) -> f64 {
        match self {
            Self::Enthalpy => props.h,
            Self::Entropy => props.s,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Enthalpy => "enthalpy",
            Self::Entropy => "entropy",
        }
    }
}

/// IAPWS-IF97 engine covering regions 1 to 5.
#[derive(Debug, Clone, Copy, Default)]
pub struct If97Engine;

impl If97Engine {
    pub fn new() -> Self {
        Self
    }

    fn pt(&self, p_mpa: f64, t_k: f64) -> PropsResult<SteamState> {
        validation::validate_pressure(p_mpa)?;
        validation::validate_temperature(t_k)?;

        let branch = if t_k >= T_MIN_K && t_k < TC_K && p_mpa < region4::psat(t_k)? {
            Branch::Vapor
        } else {
            Branch::Liquid
        };
        let (region, props) = single_phase(p_mpa, t_k, branch)?;
        let phase = match region {
            Region::R1 => Phase::Liquid,
            Region::R3 if branch == Branch::Liquid && t_k < TC_K => Phase::Liquid,
            _ => Phase::Gas,
        };
        build(p_mpa, t_k, props, None, phase, region)
    }

    fn px(&self, p_mpa: f64, x: f64) -> PropsResult<SteamState> {
        validation::validate_pressure(p_mpa)?;
        validation::validate_quality(x)?;
        let t_k = region4::tsat(p_mpa)?;
        let (liquid, vapor) = saturation(p_mpa, t_k)?;
        build(
            p_mpa,
            t_k,
            Props::lever(liquid, vapor, x),
            Some(x),
            Phase::TwoPhase,
            Region::R4,
        )
    }

    fn tx(&self, t_k: f64, x: f64) -> PropsResult<SteamState> {
        validation::validate_temperature(t_k)?;
        validation::validate_quality(x)?;
        let p_mpa = region4::psat(t_k)?;
        let (liquid, vapor) = saturation(p_mpa, t_k)?;
        build(
            p_mpa,
            t_k,
            Props::lever(liquid, vapor, x),
            Some(x),
            Phase::TwoPhase,
            Region::R4,
        )
    }

    /// Shared P-h / P-s inversion.
    fn backward(&self, p_mpa: f64, value: f64, target: Target) -> PropsResult<SteamState> {
        validation::validate_pressure(p_mpa)?;
        validation::validate_finite(value, target.name())?;
        if p_mpa > P_MAX_MPA {
            return Err(PropsError::out_of_bounds(format!(
                "pressure {p_mpa} MPa above {P_MAX_MPA} MPa"
            )));
        }

        let t_max = if p_mpa <= P_R5_MAX_MPA {
            T_R5_MAX_K
        } else {
            T_R2_MAX_K
        };

        if (P_SAT_MIN_MPA..PC_MPA).contains(&p_mpa) {
            let t_sat = region4::tsat(p_mpa)?;
            let (liquid, vapor) = saturation(p_mpa, t_sat)?;
            let (lo, hi) = (target.pick(&liquid), target.pick(&vapor));

            if (lo..=hi).contains(&value) {
                let x = if hi > lo { (value - lo) / (hi - lo) } else { 0.0 };
                return build(
                    p_mpa,
                    t_sat,
                    Props::lever(liquid, vapor, x),
                    Some(x),
                    Phase::TwoPhase,
                    Region::R4,
                );
            }

            let (t_lo, t_hi, branch, known) = if value < lo {
                (T_MIN_K, t_sat, Branch::Liquid, (None, Some(lo)))
            } else {
                (t_sat, t_max, Branch::Vapor, (Some(hi), None))
            };
            let t_k = solve_temperature(p_mpa, value, target, (t_lo, t_hi), branch, known)?;
            let (region, props) = single_phase(p_mpa, t_k, branch)?;
            let phase = match branch {
                Branch::Liquid => Phase::Liquid,
                Branch::Vapor => Phase::Gas,
            };
            return build(p_mpa, t_k, props, None, phase, region);
        }

        // Below the triple-point pressure there is no liquid above 0 °C.
        let branch = if p_mpa < P_SAT_MIN_MPA {
            Branch::Vapor
        } else {
            Branch::Liquid
        };
        let t_k = solve_temperature(p_mpa, value, target, (T_MIN_K, t_max), branch, (None, None))?;
        self.pt(p_mpa, t_k)
    }
}

impl PropertyEngine for If97Engine {
    fn name(&self) -> &str {
        "IAPWS-IF97"
    }

    fn state(&self, input: StateInput) -> PropsResult<SteamState> {
        let result = match input {
            StateInput::PT { p, t } => self.pt(to_mpa(p), to_kelvin(t)),
            StateInput::PH { p, h } => self.backward(to_mpa(p), h, Target::Enthalpy),
            StateInput::PS { p, s } => self.backward(to_mpa(p), s, Target::Entropy),
            StateInput::PX { p, x } => self.px(to_mpa(p), x),
            StateInput::TX { t, x } => self.tx(to_kelvin(t), x),
        };
        if let Err(err) = &result {
            tracing::debug!(input = %input, error = %err, "IF97 evaluation failed");
        }
        result
    }
}

fn build(
    p_mpa: f64,
    t_k: f64,
    props: Props,
    x: Option<f64>,
    phase: Phase,
    region: Region,
) -> PropsResult<SteamState> {
    SteamState::from_parts(StateParts {
        p_mpa,
        t_k,
        h: props.h,
        s: props.s,
        v: props.v,
        x,
        phase,
        region: Some(region),
    })
}

/// Single-phase properties at (p, T). `branch` selects the side of the
/// saturation line where the region layout alone is ambiguous.
fn single_phase(p_mpa: f64, t_k: f64, branch: Branch) -> PropsResult<(Region, Props)> {
    if t_k < T_MIN_K {
        return Err(PropsError::out_of_bounds(format!(
            "temperature {t_k} K below {T_MIN_K} K"
        )));
    }
    if p_mpa > P_MAX_MPA {
        return Err(PropsError::out_of_bounds(format!(
            "pressure {p_mpa} MPa above {P_MAX_MPA} MPa"
        )));
    }

    if t_k <= T_R13_K {
        return Ok(match branch {
            Branch::Liquid => (Region::R1, region1::props(p_mpa, t_k)),
            Branch::Vapor => (Region::R2, region2::props(p_mpa, t_k)),
        });
    }
    if t_k <= T_B23_MAX_K {
        if p_mpa > region4::b23_pressure(t_k) {
            let branch = if t_k < TC_K { branch } else { Branch::Liquid };
            let rho = region3::density(p_mpa, t_k, branch)?;
            return Ok((Region::R3, region3::props(rho, t_k).1));
        }
        return Ok((Region::R2, region2::props(p_mpa, t_k)));
    }
    if t_k <= T_R2_MAX_K {
        return Ok((Region::R2, region2::props(p_mpa, t_k)));
    }
    if t_k <= T_R5_MAX_K && p_mpa <= P_R5_MAX_MPA {
        return Ok((Region::R5, region5::props(p_mpa, t_k)));
    }
    Err(PropsError::out_of_bounds(format!(
        "P={p_mpa} MPa, T={t_k} K outside IAPWS-IF97"
    )))
}

/// Saturated liquid and vapor properties at (p_sat, T_sat).
fn saturation(p_mpa: f64, t_k: f64) -> PropsResult<(Props, Props)> {
    if t_k <= T_R13_K {
        return Ok((region1::props(p_mpa, t_k), region2::props(p_mpa, t_k)));
    }
    let rho_l = region3::density(p_mpa, t_k, Branch::Liquid)?;
    let rho_v = region3::density(p_mpa, t_k, Branch::Vapor)?;
    Ok((region3::props(rho_l, t_k).1, region3::props(rho_v, t_k).1))
}

/// Bisect T in `bracket` until the target property matches `value`.
///
/// `known` carries property values already evaluated at the bracket ends
/// (saturation endpoints), which are used instead of the forward equations.
fn solve_temperature(
    p_mpa: f64,
    value: f64,
    target: Target,
    bracket: (f64, f64),
    branch: Branch,
    known: (Option<f64>, Option<f64>),
) -> PropsResult<f64> {
    const MAX_ITER: usize = 200;
    const T_TOL: f64 = 1e-10;

    let eval = |t_k: f64| -> PropsResult<f64> {
        Ok(target.pick(&single_phase(p_mpa, t_k, branch)?.1))
    };

    let (mut t_low, mut t_high) = bracket;
    let f_low = match known.0 {
        Some(f) => f,
        None => eval(t_low)?,
    };
    let f_high = match known.1 {
        Some(f) => f,
        None => eval(t_high)?,
    };

    if value < f_low || value > f_high {
        return Err(PropsError::out_of_bounds(format!(
            "{} {value} outside [{f_low}, {f_high}] at P={p_mpa} MPa",
            target.name()
        )));
    }

    for _ in 0..MAX_ITER {
        let t_mid = 0.5 * (t_low + t_high);
        let f_mid = eval(t_mid)?;
        if f_mid == value || (t_high - t_low) < T_TOL * t_mid {
            return Ok(t_mid);
        }
        if f_mid < value {
            t_low = t_mid;
        } else {
            t_high = t_mid;
        }
    }

    Ok(0.5 * (t_low + t_high))
}
