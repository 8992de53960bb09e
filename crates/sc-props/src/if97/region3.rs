//! Region 3: near-critical fluid, basic equation f(rho, T).

use super::Props;
use super::constants::{R, RHOC, TC_K};
use crate::error::{PropsError, PropsResult};

const I: [i32; 40] = [
    0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 2, 2, 2, 2, 2, 2, 3, 3, 3, 3, 3, 4, 4, 4, 4, 5, 5, 5, 6, 6,
    6, 7, 8, 9, 9, 10, 10, 11,
];
const J: [i32; 40] = [
    0, 0, 1, 2, 7, 10, 12, 23, 2, 6, 15, 17, 0, 2, 6, 7, 22, 26, 0, 2, 4, 16, 26, 0, 2, 4, 26, 1,
    3, 26, 0, 2, 26, 2, 26, 2, 26, 0, 1, 26,
];
const N: [f64; 40] = [
    1.065_807_002_851_3,
    -15.732_845_290_239,
    20.944_396_974_307,
    -7.686_770_787_871_6,
    2.618_594_778_795_4,
    -2.808_078_114_862,
    1.205_336_969_651_7,
    -8.456_681_281_250_2e-3,
    -1.265_431_547_771_4,
    -1.152_440_780_668_1,
    0.885_210_439_843_18,
    -0.642_077_651_816_07,
    0.384_934_601_866_71,
    -0.852_147_088_242_06,
    4.897_228_154_187_7,
    -3.050_261_725_696_5,
    0.039_420_536_879_154,
    0.125_584_084_243_08,
    -0.279_993_296_987_1,
    1.389_979_956_946,
    -2.018_991_502_357,
    -8.214_763_717_396_3e-3,
    -0.475_960_357_349_23,
    0.043_984_074_473_5,
    -0.444_764_354_287_39,
    0.905_720_707_197_33,
    0.705_224_500_879_67,
    0.107_705_126_263_32,
    -0.329_136_232_589_54,
    -0.508_710_620_411_58,
    -0.022_175_400_873_096,
    0.094_260_751_665_092,
    0.164_362_784_479_61,
    -0.013_503_372_241_348,
    -0.014_834_345_352_472,
    5.792_295_362_808_4e-4,
    3.230_890_470_371_1e-3,
    8.096_480_299_621_5e-5,
    -1.655_767_979_503_7e-4,
    -4.492_389_906_181_5e-5,
];

/// Density bracket scanned for region 3 roots [kg/m³].
const RHO_SCAN_MIN: f64 = 40.0;
const RHO_SCAN_MAX: f64 = 800.0;
const RHO_SCAN_STEP: f64 = 2.0;

/// Which side of the van der Waals loop a density root belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Branch {
    Liquid,
    Vapor,
}

/// Pressure [MPa] at (rho [kg/m³], T [K]).
pub(crate) fn pressure(rho: f64, t_k: f64) -> f64 {
    let delta = rho / RHOC;
    let tau = TC_K / t_k;
    let mut phi_delta = N[0] / delta;
    for ((&n, &i), &j) in N.iter().zip(I.iter()).zip(J.iter()).skip(1) {
        phi_delta += n * f64::from(i) * delta.powi(i - 1) * tau.powi(j);
    }
    rho * R * t_k * delta * phi_delta / 1000.0
}

/// Pressure [MPa] and v/h/s at (rho [kg/m³], T [K]).
pub(crate) fn props(rho: f64, t_k: f64) -> (f64, Props) {
    let delta = rho / RHOC;
    let tau = TC_K / t_k;

    let mut phi = N[0] * delta.ln();
    let mut phi_delta = N[0] / delta;
    let mut phi_tau = 0.0;
    for ((&n, &i), &j) in N.iter().zip(I.iter()).zip(J.iter()).skip(1) {
        phi += n * delta.powi(i) * tau.powi(j);
        phi_delta += n * f64::from(i) * delta.powi(i - 1) * tau.powi(j);
        phi_tau += n * delta.powi(i) * f64::from(j) * tau.powi(j - 1);
    }

    let p = rho * R * t_k * delta * phi_delta / 1000.0;
    let props = Props {
        v: 1.0 / rho,
        h: R * t_k * (tau * phi_tau + delta * phi_delta),
        s: R * (tau * phi_tau - phi),
    };
    (p, props)
}

/// Density [kg/m³] at (p [MPa], T [K]) on the requested branch.
///
/// Scans the density range for a sign change of `pressure(rho) - p`,
/// downward for the liquid branch and upward for the vapor branch, then
/// bisects the bracket.
pub(crate) fn density(p_mpa: f64, t_k: f64, branch: Branch) -> PropsResult<f64> {
    let f = |rho: f64| pressure(rho, t_k) - p_mpa;
    let steps = ((RHO_SCAN_MAX - RHO_SCAN_MIN) / RHO_SCAN_STEP) as usize;

    let mut bracket = None;
    for k in 0..steps {
        let (a, b) = match branch {
            Branch::Liquid => {
                let hi = RHO_SCAN_MAX - k as f64 * RHO_SCAN_STEP;
                (hi - RHO_SCAN_STEP, hi)
            }
            Branch::Vapor => {
                let lo = RHO_SCAN_MIN + k as f64 * RHO_SCAN_STEP;
                (lo, lo + RHO_SCAN_STEP)
            }
        };
        let (fa, fb) = (f(a), f(b));
        if fa == 0.0 {
            return Ok(a);
        }
        if fb == 0.0 {
            return Ok(b);
        }
        if fa.signum() != fb.signum() {
            bracket = Some((a, fa, b));
            break;
        }
    }

    let (mut lo, mut f_lo, mut hi) = bracket.ok_or(PropsError::ConvergenceFailed {
        what: "region 3 density bracket",
    })?;

    for _ in 0..100 {
        let mid = 0.5 * (lo + hi);
        let f_mid = f(mid);
        if f_mid == 0.0 || (hi - lo) < 1e-11 * mid {
            return Ok(mid);
        }
        if f_mid.signum() == f_lo.signum() {
            lo = mid;
            f_lo = f_mid;
        } else {
            hi = mid;
        }
    }
    Ok(0.5 * (lo + hi))
}
