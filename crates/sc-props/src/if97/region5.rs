//! Region 5: high-temperature steam above 1073.15 K.

use super::Props;
use super::constants::R;

const J0: [i32; 6] = [0, 1, -3, -2, -1, 2];
const N0: [f64; 6] = [
    -13.179_983_674_201,
    6.854_084_163_443_4,
    -0.024_805_148_933_466,
    0.369_015_349_803_33,
    -3.116_131_821_392_5,
    -0.329_616_265_389_17,
];
const IR: [i32; 5] = [1, 1, 1, 2, 3];
const JR: [i32; 5] = [0, 1, 3, 9, 3];
const NR: [f64; 5] = [
    -1.256_318_358_959_2e-4,
    2.177_467_871_457_1e-3,
    -0.004_594_282_089_991,
    -3.972_482_835_956_9e-6,
    1.291_922_828_978_4e-7,
];

/// Specific volume, enthalpy and entropy at (p [MPa], T [K]).
pub(crate) fn props(p_mpa: f64, t_k: f64) -> Props {
    let pi = p_mpa;
    let tau = 1000.0 / t_k;

    let mut g0 = pi.ln();
    let mut g0_tau = 0.0;
    for (&n, &j) in N0.iter().zip(J0.iter()) {
        g0 += n * tau.powi(j);
        g0_tau += n * f64::from(j) * tau.powi(j - 1);
    }
    let g0_pi = 1.0 / pi;

    let mut gr = 0.0;
    let mut gr_pi = 0.0;
    let mut gr_tau = 0.0;
    for ((&n, &i), &j) in NR.iter().zip(IR.iter()).zip(JR.iter()) {
        gr += n * pi.powi(i) * tau.powi(j);
        gr_pi += n * f64::from(i) * pi.powi(i - 1) * tau.powi(j);
        gr_tau += n * pi.powi(i) * f64::from(j) * tau.powi(j - 1);
    }

    Props {
        v: R * t_k / p_mpa * pi * (g0_pi + gr_pi) / 1000.0,
        h: R * t_k * tau * (g0_tau + gr_tau),
        s: R * (tau * (g0_tau + gr_tau) - (g0 + gr)),
    }
}
