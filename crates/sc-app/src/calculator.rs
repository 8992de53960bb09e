//! Request boundary: form in, flat context out, one audit record per attempt.

use std::sync::OnceLock;

use serde_json::{Value, json};
use sc_audit::{AuditSink, JsonlAuditLog, QueryLogEntry};
use sc_core::round_to;
use sc_core::units::{PressureUnit, from_mpa, normalize_pressure, normalize_temperature};
use sc_cycle::{
    CalcResult, DomeSweep, QualityReport, RankineCycle, RankineInputs, SaturationDome,
    evaluate_rankine, evaluate_state_point, sample_dome,
};
use sc_props::{Phase, PropertyEngine};

use crate::config::{AppConfig, build_engine};
use crate::context::CalculationContext;
use crate::error::AppResult;
use crate::form::{self, Form, Mode};

/// Runs calculations against one property engine.
pub struct Calculator {
    engine: Box<dyn PropertyEngine>,
    audit: Option<Box<dyn AuditSink>>,
    dome_sweep: DomeSweep,
    rankine_defaults: RankineInputs,
    dome: OnceLock<SaturationDome>,
}

impl Calculator {
    pub fn new(engine: Box<dyn PropertyEngine>) -> Self {
        Self {
            engine,
            audit: None,
            dome_sweep: DomeSweep::default(),
            rankine_defaults: RankineInputs::default(),
            dome: OnceLock::new(),
        }
    }

    /// Engine, audit log, dome sweep and cycle defaults from `config`.
    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        let mut calculator = Self::new(build_engine(config.engine)?)
            .with_dome_sweep(config.dome)
            .with_rankine_defaults(config.rankine_defaults);
        if let Some(path) = &config.audit_log {
            calculator = calculator.with_audit(Box::new(JsonlAuditLog::new(path)?));
        }
        Ok(calculator)
    }

    pub fn with_audit(mut self, sink: Box<dyn AuditSink>) -> Self {
        self.audit = Some(sink);
        self
    }

    pub fn with_dome_sweep(mut self, sweep: DomeSweep) -> Self {
        self.dome_sweep = sweep;
        self.dome = OnceLock::new();
        self
    }

    pub fn with_rankine_defaults(mut self, defaults: RankineInputs) -> Self {
        self.rankine_defaults = defaults;
        self
    }

    pub fn engine(&self) -> &dyn PropertyEngine {
        self.engine.as_ref()
    }

    /// Saturation dome, sampled once per calculator.
    pub fn dome(&self) -> &SaturationDome {
        self.dome
            .get_or_init(|| sample_dome(self.engine.as_ref(), &self.dome_sweep))
    }

    /// Context with only the dome series, for a page with no submission.
    pub fn blank_context(&self) -> CalculationContext {
        let dome = self.dome();
        let mut ctx = CalculationContext::new();
        ctx.insert_json_string("liquid_line", &dome.liquid);
        ctx.insert_json_string("vapor_line", &dome.vapor);
        ctx
    }

    /// Handle one submission. Never fails: errors land in `error`.
    pub fn handle(&self, form: &Form) -> CalculationContext {
        let mut ctx = self.blank_context();
        let mode = Mode::from_form(form);
        ctx.insert("active_mode", mode.active_mode());

        let (outcome, entry) = match mode {
            Mode::StatePoint => {
                let outcome = self.state_point(form, &mut ctx);
                let entry = QueryLogEntry::new(
                    form::audit_number(form, "pressure", None),
                    form::audit_number(form, "temperature", None),
                    outcome.is_ok(),
                );
                (outcome, entry)
            }
            Mode::RankineCycle => {
                let outcome = self.rankine(form, &mut ctx);
                let entry = QueryLogEntry::new(
                    form::audit_number(form, "p_boiler", Some(self.rankine_defaults.p_boiler_bar)),
                    form::audit_number(form, "t_boiler", Some(self.rankine_defaults.t_boiler_c)),
                    outcome.is_ok(),
                );
                (outcome, entry)
            }
        };

        if let Err(err) = &outcome {
            ctx.insert("error", err.user_message());
            ctx.insert("error_kind", err.kind().as_str());
        }
        self.record(&entry);

        tracing::info!(
            mode = mode.active_mode(),
            engine = self.engine.name(),
            success = outcome.is_ok(),
            "calculation finished"
        );
        ctx
    }

    fn record(&self, entry: &QueryLogEntry) {
        if let Some(sink) = &self.audit
            && let Err(err) = sink.record(entry)
        {
            tracing::warn!(error = %err, "failed to write audit record");
        }
    }

    fn state_point(&self, form: &Form, ctx: &mut CalculationContext) -> CalcResult<()> {
        let p_val = form::required_number(form, "pressure")?;
        let t_val = form::required_number(form, "temperature")?;
        let p_unit = form::pressure_unit(form)?;
        let t_unit = form::temperature_unit(form)?;

        let p = normalize_pressure(p_val, p_unit)?;
        let t = normalize_temperature(t_val, t_unit)?;
        let report = evaluate_state_point(self.engine.as_ref(), p, t)?;
        let state = &report.state;

        ctx.insert("success", true);
        ctx.insert("p", p_val);
        ctx.insert("t", t_val);
        ctx.insert("p_unit", p_unit.tag());
        ctx.insert("t_unit", t_unit.tag());
        ctx.insert("h", round_to(state.enthalpy(), 2));
        ctx.insert("s", round_to(state.entropy(), 4));
        ctx.insert("v", round_to(state.specific_volume(), 5));
        ctx.insert("point_s", report.plot_point.x);
        ctx.insert("point_t", report.plot_point.y);
        ctx.insert("state", report.label.as_str());

        match state.phase() {
            Phase::Liquid => ctx.insert("x", "0"),
            Phase::Gas => ctx.insert("x", "1"),
            Phase::TwoPhase => {
                ctx.insert("x", round_to(report.quality, 4));
                let samples: Vec<Value> = report
                    .intermediate
                    .iter()
                    .map(|sample| {
                        json!({
                            "x": sample.x,
                            "h": round_to(sample.h, 2),
                            "s": round_to(sample.s, 4),
                            "v": round_to(sample.v, 5),
                        })
                    })
                    .collect();
                ctx.insert("intermediate_data", samples);
            }
        }
        Ok(())
    }

    fn rankine(&self, form: &Form, ctx: &mut CalculationContext) -> CalcResult<()> {
        let inputs = form::rankine_inputs(form, &self.rankine_defaults)?;
        let cycle = evaluate_rankine(self.engine.as_ref(), &inputs)?;

        ctx.insert("success", true);
        ctx.insert("rankine_cycle", true);
        ctx.insert_json_string("cycle_points", &cycle.chart_points());
        ctx.insert("p_low", inputs.p_cond_bar);
        ctx.insert("p_high", inputs.p_boiler_bar);
        ctx.insert("t_high", inputs.t_boiler_c);
        ctx.insert("pump_eff", cycle.pump * 100.0);
        ctx.insert("turbine_eff", cycle.turbine * 100.0);
        for stage in 1..=4u8 {
            ctx.insert(&format!("state{stage}"), stage_summary(&cycle, stage));
        }
        ctx.insert("w_pump", round_to(cycle.w_pump, 2));
        ctx.insert("q_in", round_to(cycle.q_in, 2));
        ctx.insert("w_turbine", round_to(cycle.w_turbine, 2));
        ctx.insert("w_net", round_to(cycle.w_net, 2));
        ctx.insert("efficiency", round_to(cycle.efficiency * 100.0, 2));
        ctx.insert("carnot_eff", round_to(cycle.carnot_efficiency * 100.0, 2));
        ctx.insert("ideal_eff", round_to(cycle.ideal_efficiency * 100.0, 2));
        ctx.insert("back_work_ratio", round_to(cycle.back_work_ratio, 4));
        Ok(())
    }
}

fn stage_summary(cycle: &RankineCycle, stage: u8) -> Value {
    let Some(state) = cycle.stage(stage) else {
        return Value::Null;
    };
    let x = match cycle.stage_quality(stage) {
        QualityReport::SaturatedLiquid => json!("0 (sat. liquid)"),
        QualityReport::SaturatedVapor => json!("1 (sat. vapor)"),
        QualityReport::Value(x) => json!(round_to(x, 4)),
        QualityReport::NotApplicable => json!("N/A"),
    };
    json!({
        "p": round_to(from_mpa(state.pressure_mpa(), PressureUnit::Bar), 3),
        "T": round_to(state.temperature_c(), 2),
        "h": round_to(state.enthalpy(), 2),
        "s": round_to(state.entropy(), 4),
        "x": x,
        "phase": cycle.stage_phase(stage),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sc_audit::MemoryAuditLog;
    use sc_props::If97Engine;
    use std::sync::Arc;

    fn calculator() -> (Calculator, Arc<MemoryAuditLog>) {
        let log = Arc::new(MemoryAuditLog::new());
        let calc = Calculator::new(Box::new(If97Engine::new()))
            .with_audit(Box::new(Arc::clone(&log)));
        (calc, log)
    }

    fn form(pairs: &[(&str, &str)]) -> Form {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn blank_context_has_only_dome() {
        let (calc, log) = calculator();
        let ctx = calc.blank_context();
        assert!(ctx.contains("liquid_line"));
        assert!(ctx.contains("vapor_line"));
        assert!(!ctx.contains("active_mode"));
        assert!(log.is_empty());
    }

    #[test]
    fn state_point_success_is_rounded_and_audited() {
        let (calc, log) = calculator();
        let ctx = calc.handle(&form(&[
            ("mode", "state_point"),
            ("pressure", "10"),
            ("temperature", "25"),
            ("p_unit", "bar"),
            ("t_unit", "c"),
        ]));
        assert!(ctx.is_success(), "{:?}", ctx.error());
        assert_eq!(ctx.get("active_mode"), Some(&json!("state")));
        assert_eq!(ctx.get("state"), Some(&json!("Compressed Liquid")));
        assert_eq!(ctx.get("x"), Some(&json!("0")));
        let h = ctx.get("h").and_then(Value::as_f64).unwrap();
        assert_eq!(h, round_to(h, 2));

        let entries = log.entries();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].is_valid);
        assert_eq!(entries[0].pressure, Some(10.0));
        assert_eq!(entries[0].temperature, Some(25.0));
    }

    #[test]
    fn invalid_unit_is_reported_and_audited_as_failure() {
        let (calc, log) = calculator();
        let ctx = calc.handle(&form(&[
            ("pressure", "1"),
            ("temperature", "25"),
            ("p_unit", "psi"),
            ("t_unit", "c"),
        ]));
        assert!(!ctx.is_success());
        assert_eq!(ctx.get("error_kind"), Some(&json!("invalid_unit")));
        assert!(!log.entries()[0].is_valid);
    }

    #[test]
    fn non_numeric_pressure_is_audited_as_null() {
        let (calc, log) = calculator();
        let ctx = calc.handle(&form(&[
            ("pressure", "hot"),
            ("temperature", "25"),
            ("p_unit", "bar"),
            ("t_unit", "c"),
        ]));
        assert!(ctx.error().unwrap().starts_with("Input Error:"));
        let entry = &log.entries()[0];
        assert_eq!(entry.pressure, None);
        assert!(!entry.is_valid);
    }

    #[test]
    fn rankine_context_matches_form_keys() {
        let (calc, log) = calculator();
        let ctx = calc.handle(&form(&[("mode", "rankine_cycle"), ("p_boiler", "100")]));
        assert!(ctx.is_success(), "{:?}", ctx.error());
        assert_eq!(ctx.get("active_mode"), Some(&json!("rankine")));
        for key in [
            "state1", "state2", "state3", "state4", "w_pump", "q_in", "w_turbine", "w_net",
            "efficiency", "carnot_eff", "cycle_points",
        ] {
            assert!(ctx.contains(key), "missing {key}");
        }
        let state1 = ctx.get("state1").unwrap();
        assert_eq!(state1["x"], json!("0 (sat. liquid)"));
        assert_eq!(state1["p"], json!(0.05));
        assert_eq!(ctx.get("state2").unwrap()["x"], json!("N/A"));

        let efficiency = ctx.get("efficiency").and_then(Value::as_f64).unwrap();
        let carnot = ctx.get("carnot_eff").and_then(Value::as_f64).unwrap();
        assert!(efficiency > 0.0 && efficiency < carnot);

        let points: Vec<Value> =
            serde_json::from_str(ctx.get("cycle_points").and_then(Value::as_str).unwrap()).unwrap();
        assert_eq!(points.len(), 5);

        let entry = &log.entries()[0];
        assert_eq!(entry.pressure, Some(100.0));
        assert_eq!(entry.temperature, Some(450.0));
    }

    #[test]
    fn rankine_precondition_message_is_verbatim() {
        let (calc, log) = calculator();
        let ctx = calc.handle(&form(&[
            ("mode", "rankine_cycle"),
            ("p_cond", "10"),
            ("p_boiler", "5"),
        ]));
        assert_eq!(
            ctx.error(),
            Some("Physics Violation: Boiler pressure must be strictly greater than Condenser pressure.")
        );
        assert!(!log.entries()[0].is_valid);
    }
}
