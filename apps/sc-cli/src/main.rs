use clap::{Args, Parser, Subcommand};
use sc_app::{AppConfig, AppError, AppResult, CalculationContext, Calculator, EngineKind, Form};
use serde_json::Value;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "steamcalc")]
#[command(about = "Steam properties and Rankine cycle calculator", long_about = None)]
struct Cli {
    /// Path to a YAML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Property engine (if97 or coolprop), overrides the config file
    #[arg(long, global = true)]
    engine: Option<EngineKind>,

    /// Append an audit record per calculation to this JSON-lines file
    #[arg(long, global = true)]
    audit_log: Option<PathBuf>,

    /// Print the full result context as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Properties of a single state from pressure and temperature
    State(StateArgs),
    /// Rankine cycle performance
    Rankine(RankineArgs),
    /// Saturation dome on the T-s chart
    Dome,
}

#[derive(Args)]
struct StateArgs {
    /// Pressure value
    #[arg(short, long)]
    pressure: String,
    /// Temperature value
    #[arg(short, long)]
    temperature: String,
    /// Pressure unit: bar, pa or atm
    #[arg(long, default_value = "bar")]
    p_unit: String,
    /// Temperature unit: c or k
    #[arg(long, default_value = "c")]
    t_unit: String,
}

#[derive(Args)]
struct RankineArgs {
    /// Condenser pressure [bar]
    #[arg(long)]
    p_cond: Option<String>,
    /// Boiler pressure [bar]
    #[arg(long)]
    p_boiler: Option<String>,
    /// Boiler exit temperature [°C]
    #[arg(long)]
    t_boiler: Option<String>,
    /// Pump isentropic efficiency [%]
    #[arg(long)]
    pump_eff: Option<String>,
    /// Turbine isentropic efficiency [%]
    #[arg(long)]
    turbine_eff: Option<String>,
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let calculator = build_calculator(&cli)?;

    match &cli.command {
        Commands::State(args) => cmd_state(&calculator, args, cli.json),
        Commands::Rankine(args) => cmd_rankine(&calculator, args, cli.json),
        Commands::Dome => cmd_dome(&calculator, cli.json),
    }
}

fn build_calculator(cli: &Cli) -> AppResult<Calculator> {
    let mut config = match &cli.config {
        Some(path) => sc_app::load_config(path)?,
        None => AppConfig::default(),
    };
    if let Some(engine) = cli.engine {
        config.engine = engine;
    }
    if let Some(path) = &cli.audit_log {
        config.audit_log = Some(path.clone());
    }
    tracing::debug!(engine = %config.engine, "building calculator");
    Calculator::from_config(&config)
}

fn form_of(pairs: &[(&str, Option<&String>)]) -> Form {
    pairs
        .iter()
        .filter_map(|(k, v)| v.map(|v| (k.to_string(), v.clone())))
        .collect()
}

/// Print the context (or its error) and turn a failed calculation into an error.
fn finish(
    ctx: &CalculationContext,
    json: bool,
    render: impl FnOnce(&CalculationContext),
) -> AppResult<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(ctx)?);
    } else if ctx.is_success() {
        render(ctx);
    }
    match ctx.error() {
        Some(message) => Err(AppError::Calculation(message.to_string())),
        None => Ok(()),
    }
}

fn num(ctx: &CalculationContext, key: &str) -> String {
    match ctx.get(key) {
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) => s.clone(),
        _ => "-".to_string(),
    }
}

fn cmd_state(calculator: &Calculator, args: &StateArgs, json: bool) -> AppResult<()> {
    let form = form_of(&[
        ("pressure", Some(&args.pressure)),
        ("temperature", Some(&args.temperature)),
        ("p_unit", Some(&args.p_unit)),
        ("t_unit", Some(&args.t_unit)),
    ]);
    let ctx = calculator.handle(&form);
    finish(&ctx, json, |ctx| {
        println!("State: {}", num(ctx, "state"));
        println!("  h = {} kJ/kg", num(ctx, "h"));
        println!("  s = {} kJ/(kg·K)", num(ctx, "s"));
        println!("  v = {} m³/kg", num(ctx, "v"));
        println!("  x = {}", num(ctx, "x"));
        if let Some(Value::Array(samples)) = ctx.get("intermediate_data") {
            println!("  Tie line:");
            for sample in samples {
                println!(
                    "    x = {}: h = {}, s = {}, v = {}",
                    sample["x"], sample["h"], sample["s"], sample["v"]
                );
            }
        }
    })
}

fn cmd_rankine(calculator: &Calculator, args: &RankineArgs, json: bool) -> AppResult<()> {
    let mode = "rankine_cycle".to_string();
    let form = form_of(&[
        ("mode", Some(&mode)),
        ("p_cond", args.p_cond.as_ref()),
        ("p_boiler", args.p_boiler.as_ref()),
        ("t_boiler", args.t_boiler.as_ref()),
        ("pump_eff", args.pump_eff.as_ref()),
        ("turbine_eff", args.turbine_eff.as_ref()),
    ]);
    let ctx = calculator.handle(&form);
    finish(&ctx, json, |ctx| {
        println!(
            "{:<8} {:>10} {:>10} {:>10} {:>8} {:>18}  phase",
            "state", "p [bar]", "T [°C]", "h", "s", "x"
        );
        for stage in 1..=4 {
            if let Some(state) = ctx.get(&format!("state{stage}")) {
                let x = match &state["x"] {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                println!(
                    "{:<8} {:>10} {:>10} {:>10} {:>8} {:>18}  {}",
                    stage,
                    state["p"],
                    state["T"],
                    state["h"],
                    state["s"],
                    x,
                    state["phase"].as_str().unwrap_or_default()
                );
            }
        }
        println!();
        println!("  Pump work:     {} kJ/kg", num(ctx, "w_pump"));
        println!("  Heat input:    {} kJ/kg", num(ctx, "q_in"));
        println!("  Turbine work:  {} kJ/kg", num(ctx, "w_turbine"));
        println!("  Net work:      {} kJ/kg", num(ctx, "w_net"));
        println!("  Efficiency:    {} %", num(ctx, "efficiency"));
        println!("  Carnot limit:  {} %", num(ctx, "carnot_eff"));
        println!("  Back work:     {}", num(ctx, "back_work_ratio"));
    })
}

fn cmd_dome(calculator: &Calculator, json: bool) -> AppResult<()> {
    let dome: &sc_cycle::SaturationDome = calculator.dome();
    if json {
        println!("{}", serde_json::to_string_pretty(dome)?);
        return Ok(());
    }
    println!("{:>10} {:>12} {:>12}", "T [°C]", "s' [kJ/kgK]", "s'' [kJ/kgK]");
    for (liquid, vapor) in dome.liquid.iter().zip(&dome.vapor) {
        println!("{:>10.3} {:>12.4} {:>12.4}", liquid.y, liquid.x, vapor.x);
    }
    Ok(())
}
