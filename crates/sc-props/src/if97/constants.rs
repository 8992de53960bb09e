//! IAPWS-IF97 constants and region limits.

/// Specific gas constant of water [kJ/(kg·K)].
pub const R: f64 = 0.461_526;

/// Critical temperature [K].
pub const TC_K: f64 = 647.096;

/// Critical pressure [MPa].
pub const PC_MPA: f64 = 22.064;

/// Critical density [kg/m³].
pub const RHOC: f64 = 322.0;

/// Lowest temperature of the formulation (0 °C) [K].
pub const T_MIN_K: f64 = 273.15;

/// Saturation pressure at 273.15 K [MPa].
pub const P_SAT_MIN_MPA: f64 = 611.213e-6;

/// Upper temperature of region 1 and lower bound of region 3 [K].
pub const T_R13_K: f64 = 623.15;

/// Upper temperature of the B23 boundary line [K].
pub const T_B23_MAX_K: f64 = 863.15;

/// Upper temperature of region 2 [K].
pub const T_R2_MAX_K: f64 = 1073.15;

/// Upper temperature of region 5 [K].
pub const T_R5_MAX_K: f64 = 2273.15;

/// Upper pressure of regions 1-3 [MPa].
pub const P_MAX_MPA: f64 = 100.0;

/// Upper pressure of region 5 [MPa].
pub const P_R5_MAX_MPA: f64 = 10.0;
