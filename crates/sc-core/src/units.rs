// sc-core/src/units.rs

use std::fmt;
use std::str::FromStr;

use uom::si::f64::{
    Pressure as UomPressure, ThermodynamicTemperature as UomThermodynamicTemperature,
};
use uom::si::pressure::{atmosphere, bar as bar_unit, megapascal, pascal};
use uom::si::thermodynamic_temperature::{degree_celsius, kelvin};

use crate::error::{CoreError, CoreResult};
use crate::numeric::ensure_finite;

// Public canonical unit types (SI, f64)
pub type Pressure = UomPressure;
pub type Temperature = UomThermodynamicTemperature;

/// Specific enthalpy [kJ/kg].
pub type SpecEnthalpy = f64;

/// Specific entropy [kJ/(kg·K)].
pub type SpecEntropy = f64;

/// Specific volume [m³/kg].
pub type SpecVolume = f64;

#[inline]
pub fn pa(v: f64) -> Pressure {
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn mpa(v: f64) -> Pressure {
    Pressure::new::<megapascal>(v)
}

#[inline]
pub fn bar(v: f64) -> Pressure {
    Pressure::new::<bar_unit>(v)
}

#[inline]
pub fn k(v: f64) -> Temperature {
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn celsius(v: f64) -> Temperature {
    Temperature::new::<degree_celsius>(v)
}

/// Pressure in MPa, the unit every property engine works in.
#[inline]
pub fn to_mpa(p: Pressure) -> f64 {
    p.get::<megapascal>()
}

/// Temperature in K.
#[inline]
pub fn to_kelvin(t: Temperature) -> f64 {
    t.get::<kelvin>()
}

/// Temperature in °C.
#[inline]
pub fn to_celsius(t: Temperature) -> f64 {
    t.get::<degree_celsius>()
}

/// Pressure units accepted on the calculator form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PressureUnit {
    #[default]
    Bar,
    Pa,
    Atm,
}

impl PressureUnit {
    pub fn tag(self) -> &'static str {
        match self {
            Self::Bar => "bar",
            Self::Pa => "pa",
            Self::Atm => "atm",
        }
    }
}

impl fmt::Display for PressureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for PressureUnit {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bar" => Ok(Self::Bar),
            "pa" => Ok(Self::Pa),
            "atm" => Ok(Self::Atm),
            other => Err(CoreError::InvalidUnit {
                unit: other.to_string(),
                quantity: "pressure",
            }),
        }
    }
}

/// Temperature units accepted on the calculator form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TemperatureUnit {
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "c"))]
    Celsius,
    #[cfg_attr(feature = "serde", serde(rename = "k"))]
    Kelvin,
}

impl TemperatureUnit {
    pub fn tag(self) -> &'static str {
        match self {
            Self::Celsius => "c",
            Self::Kelvin => "k",
        }
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for TemperatureUnit {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "c" | "°c" | "celsius" => Ok(Self::Celsius),
            "k" | "kelvin" => Ok(Self::Kelvin),
            other => Err(CoreError::InvalidUnit {
                unit: other.to_string(),
                quantity: "temperature",
            }),
        }
    }
}

/// Convert a user pressure value to a canonical [`Pressure`].
pub fn normalize_pressure(value: f64, unit: PressureUnit) -> CoreResult<Pressure> {
    let value = ensure_finite(value, "pressure")?;
    Ok(match unit {
        PressureUnit::Bar => Pressure::new::<bar_unit>(value),
        PressureUnit::Pa => Pressure::new::<pascal>(value),
        PressureUnit::Atm => Pressure::new::<atmosphere>(value),
    })
}

/// Convert a user temperature value to a canonical [`Temperature`].
pub fn normalize_temperature(value: f64, unit: TemperatureUnit) -> CoreResult<Temperature> {
    let value = ensure_finite(value, "temperature")?;
    Ok(match unit {
        TemperatureUnit::Celsius => Temperature::new::<degree_celsius>(value),
        TemperatureUnit::Kelvin => Temperature::new::<kelvin>(value),
    })
}

/// Express an MPa value in the given form unit.
pub fn from_mpa(value_mpa: f64, unit: PressureUnit) -> f64 {
    let p = mpa(value_mpa);
    match unit {
        PressureUnit::Bar => p.get::<bar_unit>(),
        PressureUnit::Pa => p.get::<pascal>(),
        PressureUnit::Atm => p.get::<atmosphere>(),
    }
}
