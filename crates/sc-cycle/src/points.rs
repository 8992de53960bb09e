//! Plot-ready points for the T-s chart.

use serde::{Deserialize, Serialize};
use sc_props::SteamState;

/// A point on the T-s chart: entropy on x, temperature [°C] on y.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl ChartPoint {
    pub fn new(s: f64, t_c: f64) -> Self {
        Self {
            x: s,
            y: t_c,
            label: None,
        }
    }

    pub fn labelled(s: f64, t_c: f64, label: impl Into<String>) -> Self {
        Self {
            x: s,
            y: t_c,
            label: Some(label.into()),
        }
    }
}

/// A cycle state tagged with its stage number (1 to 4).
#[derive(Debug, Clone, PartialEq)]
pub struct CyclePoint {
    pub stage: u8,
    pub state: SteamState,
}

impl CyclePoint {
    pub fn label(&self) -> String {
        format!("State {}", self.stage)
    }

    pub fn to_chart(&self) -> ChartPoint {
        ChartPoint::labelled(self.state.entropy(), self.state.temperature_c(), self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlabelled_points_omit_label_field() {
        let json = serde_json::to_string(&ChartPoint::new(4.406, 373.946)).unwrap();
        assert_eq!(json, r#"{"x":4.406,"y":373.946}"#);
    }

    #[test]
    fn labelled_points_carry_label() {
        let json = serde_json::to_value(ChartPoint::labelled(1.0, 2.0, "State 1")).unwrap();
        assert_eq!(json["label"], "State 1");
    }
}
