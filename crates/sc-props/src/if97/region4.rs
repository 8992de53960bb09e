//! Region 4: saturation line, plus the region 2/3 boundary (B23).

use super::constants::{P_SAT_MIN_MPA, PC_MPA, T_MIN_K, TC_K};
use crate::error::{PropsError, PropsResult};

const N: [f64; 10] = [
    1_167.052_145_276_7,
    -724_213.167_032_06,
    -17.073_846_940_092,
    12_020.824_702_47,
    -3_232_555.032_233_3,
    14.915_108_613_53,
    -4_823.265_736_159_1,
    405_113.405_420_57,
    -0.238_555_575_678_49,
    650.175_348_447_98,
];

/// Saturation pressure [MPa] at temperature `t_k` in [273.15 K, Tc].
pub(crate) fn psat(t_k: f64) -> PropsResult<f64> {
    if !(T_MIN_K..=TC_K).contains(&t_k) {
        return Err(PropsError::out_of_bounds(format!(
            "saturation temperature {t_k} K outside [{T_MIN_K}, {TC_K}] K"
        )));
    }
    let theta = t_k + N[8] / (t_k - N[9]);
    let a = theta * theta + N[0] * theta + N[1];
    let b = N[2] * theta * theta + N[3] * theta + N[4];
    let c = N[5] * theta * theta + N[6] * theta + N[7];
    let disc = (b * b - 4.0 * a * c).max(0.0);
    Ok((2.0 * c / (-b + disc.sqrt())).powi(4))
}

/// Saturation temperature [K] at pressure `p_mpa` in [611.213 Pa, Pc].
pub(crate) fn tsat(p_mpa: f64) -> PropsResult<f64> {
    if !(P_SAT_MIN_MPA..=PC_MPA).contains(&p_mpa) {
        return Err(PropsError::out_of_bounds(format!(
            "saturation pressure {p_mpa} MPa outside [{P_SAT_MIN_MPA}, {PC_MPA}] MPa"
        )));
    }
    let beta = p_mpa.powf(0.25);
    let e = beta * beta + N[2] * beta + N[5];
    let f = N[0] * beta * beta + N[3] * beta + N[6];
    let g = N[1] * beta * beta + N[4] * beta + N[7];
    let disc = (f * f - 4.0 * e * g).max(0.0);
    let d = 2.0 * g / (-f - disc.sqrt());
    let disc2 = ((N[9] + d) * (N[9] + d) - 4.0 * (N[8] + N[9] * d)).max(0.0);
    Ok((N[9] + d - disc2.sqrt()) / 2.0)
}

/// B23 boundary pressure [MPa] at temperature `t_k`.
pub(crate) fn b23_pressure(t_k: f64) -> f64 {
    348.051_856_289_69 - 1.167_185_987_997_5 * t_k + 1.019_297_003_932_6e-3 * t_k * t_k
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saturation_pressure_reference_points() {
        assert!((psat(300.0).unwrap() - 0.353_658_941e-2).abs() < 5e-12);
        assert!((psat(500.0).unwrap() - 0.263_889_776e1).abs() < 1e-8);
        assert!((psat(600.0).unwrap() - 0.123_443_146e2).abs() < 1e-7);
    }

    #[test]
    fn saturation_temperature_reference_points() {
        assert!((tsat(0.1).unwrap() - 0.372_755_919e3).abs() < 1e-6);
        assert!((tsat(1.0).unwrap() - 0.453_035_632e3).abs() < 1e-6);
        assert!((tsat(10.0).unwrap() - 0.584_149_488e3).abs() < 1e-6);
    }

    #[test]
    fn saturation_line_round_trip() {
        for t in [280.0, 373.15, 500.0, 640.0] {
            let p = psat(t).unwrap();
            assert!((tsat(p).unwrap() - t).abs() < 1e-8);
        }
    }

    #[test]
    fn outside_saturation_line_is_out_of_bounds() {
        assert!(psat(700.0).unwrap_err().is_out_of_bounds());
        assert!(tsat(30.0).unwrap_err().is_out_of_bounds());
        assert!(tsat(1e-5).unwrap_err().is_out_of_bounds());
    }

    #[test]
    fn b23_reference_point() {
        // IAPWS-IF97 Section 4: T = 623.15 K gives p = 16.5291643 MPa
        assert!((b23_pressure(623.15) - 0.165_291_643e2).abs() < 1e-6);
    }
}
