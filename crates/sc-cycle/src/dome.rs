//! Saturation dome sampling for the T-s chart.

use serde::{Deserialize, Serialize};
use sc_core::units::celsius;
use sc_props::{PropertyEngine, StateInput};

use crate::points::ChartPoint;

/// Entropy at the critical point [kJ/(kg·K)].
pub const CRITICAL_ENTROPY: f64 = 4.406;

/// Critical temperature [°C].
pub const CRITICAL_TEMPERATURE_C: f64 = 373.946;

/// Temperature sweep for dome sampling, in °C.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomeSweep {
    pub start_c: f64,
    pub end_c: f64,
    pub step_c: f64,
}

impl Default for DomeSweep {
    fn default() -> Self {
        Self {
            start_c: 0.0,
            end_c: 370.0,
            step_c: 10.0,
        }
    }
}

impl DomeSweep {
    /// Largest number of temperatures a sweep may produce.
    pub const MAX_SAMPLES: usize = 100_000;

    /// Number of temperatures from `start_c` through `end_c`, or `None` for a
    /// non-finite bound, a non-positive step, a reversed range, or more than
    /// [`Self::MAX_SAMPLES`] points.
    pub fn sample_count(&self) -> Option<usize> {
        if !self.start_c.is_finite() || !self.end_c.is_finite() || !self.step_c.is_finite() {
            return None;
        }
        if self.step_c <= 0.0 {
            return None;
        }
        let steps = ((self.end_c - self.start_c) / self.step_c + 1e-9).floor();
        if !(0.0..Self::MAX_SAMPLES as f64).contains(&steps) {
            return None;
        }
        Some(steps as usize + 1)
    }

    /// Sample temperatures from `start_c` through `end_c`, kept below the
    /// critical temperature. Empty when [`Self::sample_count`] rejects the
    /// sweep.
    pub fn temperatures(&self) -> Vec<f64> {
        let Some(count) = self.sample_count() else {
            tracing::debug!(sweep = ?self, "unusable dome sweep");
            return Vec::new();
        };
        (0..count)
            .map(|i| self.start_c + i as f64 * self.step_c)
            .filter(|&t| t < CRITICAL_TEMPERATURE_C)
            .collect()
    }
}

/// Liquid and vapor branches, each terminated by the critical point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaturationDome {
    pub liquid: Vec<ChartPoint>,
    pub vapor: Vec<ChartPoint>,
}

pub fn critical_point() -> ChartPoint {
    ChartPoint::new(CRITICAL_ENTROPY, CRITICAL_TEMPERATURE_C)
}

/// Sample the dome. A temperature whose saturated liquid or vapor cannot
/// be evaluated is skipped on both branches.
pub fn sample_dome(engine: &dyn PropertyEngine, sweep: &DomeSweep) -> SaturationDome {
    let temperatures = sweep.temperatures();
    let mut liquid = Vec::with_capacity(temperatures.len() + 1);
    let mut vapor = Vec::with_capacity(temperatures.len() + 1);

    for t_c in temperatures {
        let t = celsius(t_c);
        let pair = engine
            .state(StateInput::TX { t, x: 0.0 })
            .and_then(|l| engine.state(StateInput::TX { t, x: 1.0 }).map(|v| (l, v)));
        match pair {
            Ok((l, v)) => {
                liquid.push(ChartPoint::new(l.entropy(), t_c));
                vapor.push(ChartPoint::new(v.entropy(), t_c));
            }
            Err(err) => tracing::debug!(t_c, error = %err, "dropped dome sample"),
        }
    }

    liquid.push(critical_point());
    vapor.push(critical_point());
    SaturationDome { liquid, vapor }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sc_props::{If97Engine, PropsError, PropsResult, SteamState};

    #[test]
    fn default_sweep_is_zero_to_370_by_ten() {
        let temps = DomeSweep::default().temperatures();
        assert_eq!(temps.len(), 38);
        assert_eq!(temps[0], 0.0);
        assert_eq!(temps[37], 370.0);
    }

    #[test]
    fn sweep_never_reaches_critical_temperature() {
        let sweep = DomeSweep {
            start_c: 300.0,
            end_c: 400.0,
            step_c: 25.0,
        };
        assert_eq!(sweep.temperatures(), vec![300.0, 325.0, 350.0]);
        let bad = DomeSweep {
            step_c: 0.0,
            ..DomeSweep::default()
        };
        assert!(bad.temperatures().is_empty());
    }

    #[test]
    fn oversized_sweeps_are_empty() {
        let tiny_step = DomeSweep {
            step_c: 1e-18,
            ..DomeSweep::default()
        };
        assert_eq!(tiny_step.sample_count(), None);
        assert!(tiny_step.temperatures().is_empty());

        let reversed = DomeSweep {
            start_c: 100.0,
            end_c: 0.0,
            step_c: 10.0,
        };
        assert!(reversed.temperatures().is_empty());

        let at_limit = DomeSweep {
            start_c: 0.0,
            end_c: (DomeSweep::MAX_SAMPLES - 1) as f64,
            step_c: 1.0,
        };
        assert_eq!(at_limit.sample_count(), Some(DomeSweep::MAX_SAMPLES));
        let over_limit = DomeSweep {
            end_c: DomeSweep::MAX_SAMPLES as f64,
            ..at_limit
        };
        assert_eq!(over_limit.sample_count(), None);
    }

    #[test]
    fn branches_end_at_critical_point() {
        let dome = sample_dome(&If97Engine::new(), &DomeSweep::default());
        assert_eq!(dome.liquid.len(), dome.vapor.len());
        assert_eq!(dome.liquid.len(), 39);
        assert_eq!(dome.liquid.last(), Some(&critical_point()));
        assert_eq!(dome.vapor.last(), Some(&critical_point()));
        for (l, v) in dome.liquid.iter().zip(&dome.vapor).take(38) {
            assert!(l.x < v.x, "at {} °C: {} !< {}", l.y, l.x, v.x);
        }
    }

    /// Fails every saturation lookup above 105 °C.
    struct LowOnly;

    impl PropertyEngine for LowOnly {
        fn name(&self) -> &str {
            "low-only"
        }

        fn state(&self, input: StateInput) -> PropsResult<SteamState> {
            match input {
                StateInput::TX { t, .. } if sc_core::units::to_celsius(t) > 105.0 => {
                    Err(PropsError::out_of_bounds("too hot"))
                }
                other => If97Engine::new().state(other),
            }
        }
    }

    #[test]
    fn failed_samples_are_dropped_not_fatal() {
        let dome = sample_dome(&LowOnly, &DomeSweep::default());
        assert_eq!(dome.liquid.len(), 12);
        assert_eq!(dome.vapor.len(), 12);
        assert_eq!(dome.vapor.last(), Some(&critical_point()));
    }
}
