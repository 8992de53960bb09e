//! Audit record types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One calculation attempt: the submitted pressure and temperature, whether
/// it succeeded, and when.
///
/// Values that were not numbers on the form are stored as `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryLogEntry {
    pub pressure: Option<f64>,
    pub temperature: Option<f64>,
    pub is_valid: bool,
    pub timestamp: DateTime<Utc>,
}

impl QueryLogEntry {
    /// Stamp a new entry with the current UTC time.
    pub fn new(pressure: f64, temperature: f64, is_valid: bool) -> Self {
        Self::at(pressure, temperature, is_valid, Utc::now())
    }

    pub fn at(pressure: f64, temperature: f64, is_valid: bool, timestamp: DateTime<Utc>) -> Self {
        Self {
            pressure: pressure.is_finite().then_some(pressure),
            temperature: temperature.is_finite().then_some(temperature),
            is_valid,
            timestamp,
        }
    }
}
