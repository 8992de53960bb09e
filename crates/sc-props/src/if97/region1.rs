//! Region 1: compressed liquid, basic equation g(p, T).

use super::Props;
use super::constants::R;

const I: [i32; 34] = [
    0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 2, 3, 3, 3, 4, 4, 4, 5, 8, 8, 21, 23, 29,
    30, 31, 32,
];
const J: [i32; 34] = [
    -2, -1, 0, 1, 2, 3, 4, 5, -9, -7, -1, 0, 1, 3, -3, 0, 1, 3, 17, -4, 0, 6, -5, -2, 10, -8, -11,
    -6, -29, -31, -38, -39, -40, -41,
];
const N: [f64; 34] = [
    0.146_329_712_131_67,
    -0.845_481_871_691_14,
    -3.756_360_367_204,
    3.385_516_916_838_5,
    -0.957_919_633_878_72,
    0.157_720_385_132_28,
    -0.016_616_417_199_501,
    8.121_462_998_356_8e-4,
    2.831_908_012_380_4e-4,
    -6.070_630_156_587_4e-4,
    -0.018_990_068_218_419,
    -0.032_529_748_770_505,
    -0.021_841_717_175_414,
    -5.283_835_796_993e-5,
    -4.718_432_107_326_7e-4,
    -3.000_178_079_302_6e-4,
    4.766_139_390_698_7e-5,
    -4.414_184_533_084_6e-6,
    -7.269_499_629_759_4e-16,
    -3.167_964_484_505_4e-5,
    -2.827_079_798_531_2e-6,
    -8.520_512_812_010_3e-10,
    -2.242_528_190_8e-6,
    -6.517_122_289_560_1e-7,
    -1.434_172_993_792_4e-13,
    -4.051_699_686_011_7e-7,
    -1.273_430_174_164_1e-9,
    -1.742_487_123_063_4e-10,
    -6.876_213_129_553_1e-19,
    1.447_830_782_852_1e-20,
    2.633_578_166_279_5e-23,
    -1.194_762_264_007_1e-23,
    1.822_809_458_140_4e-24,
    -9.353_708_729_245_8e-26,
];

/// Specific volume, enthalpy and entropy at (p [MPa], T [K]).
pub(crate) fn props(p_mpa: f64, t_k: f64) -> Props {
    let pi = p_mpa / 16.53;
    let tau = 1386.0 / t_k;
    let a = 7.1 - pi;
    let b = tau - 1.222;

    let mut gamma = 0.0;
    let mut gamma_pi = 0.0;
    let mut gamma_tau = 0.0;
    for ((&n, &i), &j) in N.iter().zip(I.iter()).zip(J.iter()) {
        gamma += n * a.powi(i) * b.powi(j);
        gamma_pi -= n * f64::from(i) * a.powi(i - 1) * b.powi(j);
        gamma_tau += n * a.powi(i) * f64::from(j) * b.powi(j - 1);
    }

    Props {
        v: R * t_k / p_mpa * pi * gamma_pi / 1000.0,
        h: R * t_k * tau * gamma_tau,
        s: R * (tau * gamma_tau - gamma),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rel(a: f64, b: f64) -> f64 {
        ((a - b) / b).abs()
    }

    // IAPWS-IF97 Table 5
    #[test]
    fn verification_table() {
        let cases = [
            (3.0, 300.0, 0.100_215_168e-2, 0.115_331_273e3, 0.392_294_792),
            (80.0, 300.0, 0.971_180_894e-3, 0.184_142_828e3, 0.368_563_852),
            (3.0, 500.0, 0.120_241_800e-2, 0.975_542_239e3, 0.258_041_912e1),
        ];
        for (p, t, v, h, s) in cases {
            let props = props(p, t);
            assert!(rel(props.v, v) < 1e-7, "v at {p} MPa, {t} K: {}", props.v);
            assert!(rel(props.h, h) < 1e-7, "h at {p} MPa, {t} K: {}", props.h);
            assert!(rel(props.s, s) < 1e-7, "s at {p} MPa, {t} K: {}", props.s);
        }
    }
}
