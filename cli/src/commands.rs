use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::info;

use life_simulator_core_rs::{format_summary, LifeSimulator, Session, SimulatorConfig};

#[derive(Parser)]
#[command(name = "life-simulator", version, about = "Stochastic year-by-year life simulator")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Simulate a single life and print its summary
    Run(RunArgs),
    /// Simulate several lives as one session
    Batch(BatchArgs),
}

#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// JSON config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Income data CSV (overrides the config file)
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    /// Do not write the bundled dataset when the data file is missing
    #[arg(long, global = true)]
    pub no_bootstrap: bool,
}

impl GlobalArgs {
    /// Config file (or defaults) with command-line flags applied on top
    pub fn load_config(&self) -> anyhow::Result<SimulatorConfig> {
        let mut config = match &self.config {
            Some(path) => SimulatorConfig::from_json_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => SimulatorConfig::default(),
        };
        if let Some(data) = &self.data {
            config.income_data_path = Some(data.clone());
        }
        if self.no_bootstrap {
            config.bootstrap_income_data = false;
        }
        Ok(config)
    }
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// RNG seed (time-derived when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print the final person as JSON instead of the text summary
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct BatchArgs {
    /// Number of lives; values below 1 run a single life
    #[arg(short, long, default_value_t = 1)]
    pub count: usize,

    /// Master seed for the session (time-derived when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write every summary of the session to this file
    #[arg(long)]
    pub save: Option<PathBuf>,
}

/// Explicit seed, the config seed if one was set, or the clock
fn resolve_seed(explicit: Option<u64>, config: &SimulatorConfig) -> u64 {
    explicit
        .or((config.rng_seed != 0).then_some(config.rng_seed))
        .unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|elapsed| elapsed.as_nanos() as u64)
                .unwrap_or_default()
        })
}

pub fn run_single(mut config: SimulatorConfig, args: RunArgs) -> anyhow::Result<()> {
    config.rng_seed = resolve_seed(args.seed, &config);
    info!(seed = config.rng_seed, "Simulating one life");

    let mut simulator = LifeSimulator::from_config(&config);
    let person = simulator.simulate_life().context("simulation failed")?;

    if args.json {
        let json = serde_json::to_string_pretty(&person.snapshot())
            .context("serializing person")?;
        println!("{}", json);
    } else {
        println!("{}", format_summary(&person));
    }
    Ok(())
}

pub fn run_batch(mut config: SimulatorConfig, args: BatchArgs) -> anyhow::Result<()> {
    config.rng_seed = resolve_seed(args.seed, &config);
    info!(seed = config.rng_seed, count = args.count.max(1), "Simulating batch");

    let mut session = Session::from_config(&config);
    session.run_batch(args.count).context("batch simulation failed")?;
    println!("{}", session.latest_batch_text());

    if let Some(path) = &args.save {
        let written = session
            .save(path)
            .with_context(|| format!("saving session to {}", path.display()))?;
        info!(path = %path.display(), lives = written, "Saved");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_seed_wins() {
        let config = SimulatorConfig::with_seed(9);
        assert_eq!(resolve_seed(Some(3), &config), 3);
        assert_eq!(resolve_seed(None, &config), 9);
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::parse_from([
            "life-simulator",
            "--data",
            "custom.csv",
            "--no-bootstrap",
            "batch",
            "--count",
            "3",
        ]);
        let config = cli.global.load_config().unwrap();
        assert_eq!(config.income_data_path, Some(PathBuf::from("custom.csv")));
        assert!(!config.bootstrap_income_data);
        match cli.command {
            Commands::Batch(args) => assert_eq!(args.count, 3),
            _ => panic!("expected batch"),
        }
    }
}
