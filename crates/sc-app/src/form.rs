//! Submitted form fields and their parsing.

use std::collections::HashMap;

use sc_core::units::{PressureUnit, TemperatureUnit};
use sc_cycle::{CalcError, CalcResult, RankineInputs};

/// Raw form submission: field name to submitted text.
pub type Form = HashMap<String, String>;

/// Calculation requested by the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    StatePoint,
    RankineCycle,
}

impl Mode {
    /// `mode=rankine_cycle` selects the cycle; anything else is a state point.
    pub fn from_form(form: &Form) -> Self {
        match form.get("mode").map(|m| m.trim()) {
            Some("rankine_cycle") => Self::RankineCycle,
            _ => Self::StatePoint,
        }
    }

    /// Value of the `active_mode` context key.
    pub fn active_mode(self) -> &'static str {
        match self {
            Self::StatePoint => "state",
            Self::RankineCycle => "rankine",
        }
    }
}

fn parse_number(field: &str, raw: &str) -> CalcResult<f64> {
    let value: f64 = raw.trim().parse().map_err(|_| {
        CalcError::input(field, format!("could not convert string to float: '{raw}'"))
    })?;
    if !value.is_finite() {
        return Err(CalcError::input(field, format!("{field} must be a finite number")));
    }
    Ok(value)
}

/// A field that must be present and numeric.
pub fn required_number(form: &Form, field: &str) -> CalcResult<f64> {
    let raw = form
        .get(field)
        .ok_or_else(|| CalcError::input(field, format!("missing field '{field}'")))?;
    parse_number(field, raw)
}

/// A numeric field that falls back to `default` only when absent.
pub fn optional_number(form: &Form, field: &str, default: f64) -> CalcResult<f64> {
    match form.get(field) {
        Some(raw) => parse_number(field, raw),
        None => Ok(default),
    }
}

/// Best-effort numeric value for the audit trail: NaN when unusable.
pub fn audit_number(form: &Form, field: &str, default: Option<f64>) -> f64 {
    match (form.get(field), default) {
        (Some(raw), _) => raw.trim().parse().unwrap_or(f64::NAN),
        (None, Some(default)) => default,
        (None, None) => f64::NAN,
    }
}

pub fn pressure_unit(form: &Form) -> CalcResult<PressureUnit> {
    let tag = form
        .get("p_unit")
        .ok_or_else(|| CalcError::input("p_unit", "missing field 'p_unit'"))?;
    Ok(tag.parse()?)
}

pub fn temperature_unit(form: &Form) -> CalcResult<TemperatureUnit> {
    let tag = form
        .get("t_unit")
        .ok_or_else(|| CalcError::input("t_unit", "missing field 't_unit'"))?;
    Ok(tag.parse()?)
}

/// Cycle inputs, with absent fields taken from `defaults`.
pub fn rankine_inputs(form: &Form, defaults: &RankineInputs) -> CalcResult<RankineInputs> {
    Ok(RankineInputs {
        p_cond_bar: optional_number(form, "p_cond", defaults.p_cond_bar)?,
        p_boiler_bar: optional_number(form, "p_boiler", defaults.p_boiler_bar)?,
        t_boiler_c: optional_number(form, "t_boiler", defaults.t_boiler_c)?,
        pump_eff_pct: optional_number(form, "pump_eff", defaults.pump_eff_pct)?,
        turbine_eff_pct: optional_number(form, "turbine_eff", defaults.turbine_eff_pct)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sc_cycle::CalcErrorKind;

    fn form(pairs: &[(&str, &str)]) -> Form {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn mode_defaults_to_state_point() {
        assert_eq!(Mode::from_form(&form(&[])), Mode::StatePoint);
        assert_eq!(Mode::from_form(&form(&[("mode", "bogus")])), Mode::StatePoint);
        assert_eq!(
            Mode::from_form(&form(&[("mode", "rankine_cycle")])),
            Mode::RankineCycle
        );
    }

    #[test]
    fn non_numeric_field_is_input_error() {
        let err = required_number(&form(&[("pressure", "ten")]), "pressure").unwrap_err();
        assert_eq!(err.kind(), CalcErrorKind::InputError);
        assert!(err.user_message().contains("'ten'"));
        let err = required_number(&form(&[]), "pressure").unwrap_err();
        assert_eq!(err.kind(), CalcErrorKind::InputError);
        let err = required_number(&form(&[("pressure", "NaN")]), "pressure").unwrap_err();
        assert_eq!(err.kind(), CalcErrorKind::InputError);
    }

    #[test]
    fn absent_cycle_fields_use_defaults_but_blank_ones_do_not() {
        let inputs = rankine_inputs(&form(&[("p_boiler", "100")]), &RankineInputs::default()).unwrap();
        assert_eq!(inputs.p_boiler_bar, 100.0);
        assert_eq!(inputs.p_cond_bar, 0.05);
        assert_eq!(inputs.turbine_eff_pct, 85.0);

        let err = rankine_inputs(&form(&[("p_cond", "")]), &RankineInputs::default()).unwrap_err();
        assert_eq!(err.kind(), CalcErrorKind::InputError);
    }

    #[test]
    fn unit_tags_are_validated() {
        let f = form(&[("p_unit", "psi"), ("t_unit", "K")]);
        assert_eq!(pressure_unit(&f).unwrap_err().kind(), CalcErrorKind::InvalidUnit);
        assert_eq!(temperature_unit(&f).unwrap(), TemperatureUnit::Kelvin);
    }

    #[test]
    fn audit_numbers_never_fail() {
        let f = form(&[("pressure", "abc"), ("temperature", "25")]);
        assert!(audit_number(&f, "pressure", None).is_nan());
        assert_eq!(audit_number(&f, "temperature", None), 25.0);
        assert_eq!(audit_number(&f, "p_boiler", Some(10.0)), 10.0);
    }
}
