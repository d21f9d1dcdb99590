use orbsim::{ScenarioConfig, Scenario, IntegratorConfig, TabulatedEphemeris, TrajectoryRecorder};
use orbsim::{bench_refresh, bench_integrators};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use std::path::PathBuf;

#[derive(ValueEnum, Clone, Copy, Debug)]
enum IntegratorArg {
    Euler,
    Ralston,
    Rk4,
}

impl From<IntegratorArg> for IntegratorConfig {
    fn from(arg: IntegratorArg) -> Self {
        match arg {
            IntegratorArg::Euler => IntegratorConfig::ForwardEuler,
            IntegratorArg::Ralston => IntegratorConfig::Ralston,
            IntegratorArg::Rk4 => IntegratorConfig::Rk4,
        }
    }
}

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file, looked up under `scenarios/` unless it is an existing path
    #[arg(short, default_value = "sol_system.yaml")]
    file_name: String,

    /// Tabulated ephemeris CSV (body,jd,x,y,z,vx,vy,vz in km, km/day)
    #[arg(long)]
    ephemeris: Option<PathBuf>,

    /// Directory for per-body trajectory CSVs
    #[arg(short, long, default_value = "output")]
    output: PathBuf,

    /// Override the configured integrator
    #[arg(long, value_enum)]
    integrator: Option<IntegratorArg>,

    /// Override the configured step size (s)
    #[arg(long)]
    dt: Option<f64>,

    /// Override the configured end time (s)
    #[arg(long)]
    t_end: Option<f64>,

    /// Run the timing benchmarks instead of a scenario
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(args: &Args) -> Result<ScenarioConfig> {
    let direct = PathBuf::from(&args.file_name);
    let config_path = if direct.exists() {
        direct
    } else {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(&args.file_name)
    };

    let mut cfg = ScenarioConfig::from_yaml_path(&config_path)
        .with_context(|| format!("failed to load scenario {}", config_path.display()))?;

    if let Some(integrator) = args.integrator {
        cfg.engine.integrator = integrator.into();
    }
    if let Some(dt) = args.dt {
        cfg.parameters.dt = dt;
    }
    if let Some(t_end) = args.t_end {
        cfg.parameters.t_end = t_end;
    }

    Ok(cfg)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    if args.bench {
        bench_refresh();
        bench_integrators();
        return Ok(());
    }

    let scenario_cfg = load_scenario_from_yaml(&args)?;
    let mut recorder = TrajectoryRecorder::new();

    let eph = match &args.ephemeris {
        Some(path) => Some(
            TabulatedEphemeris::from_csv_path(path)
                .with_context(|| format!("failed to load ephemeris {}", path.display()))?,
        ),
        None => None,
    };

    let mut scenario = match &eph {
        Some(eph) => Scenario::build_scenario_from_ephemeris(&scenario_cfg, eph)?,
        None => Scenario::build_scenario(&scenario_cfg)?,
    };

    let steps = scenario.run_and_write(&mut recorder, &args.output, eph.as_ref())?;
    info!("wrote {} steps to {}", steps, args.output.display());

    Ok(())
}
