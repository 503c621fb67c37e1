use std::{fs::File, io::BufReader, path::PathBuf};

use anyhow::Context as _;
use blockfall_engine::{EngineConfig, PieceSeed};
use clap::{Parser, Subcommand};

use crate::logging;

use self::{play::PlayArg, simulate::SimulateArg};

mod play;
mod simulate;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Write logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
    #[command(flatten)]
    engine: EngineArg,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play in the terminal (default)
    Play(#[clap(flatten)] PlayArg),
    /// Play games with random input and print their statistics as JSON
    Simulate(#[clap(flatten)] SimulateArg),
}

/// Engine settings; flags take precedence over the config file.
#[derive(Debug, Clone, Default, clap::Args)]
struct EngineArg {
    /// JSON file with engine settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Number of board columns
    #[arg(long, global = true)]
    columns: Option<i32>,
    /// Number of board rows
    #[arg(long, global = true)]
    rows: Option<i32>,
    /// Drop interval in milliseconds
    #[arg(long, global = true)]
    drop_interval_ms: Option<u64>,
    /// Piece sequence seed (32 hex digits)
    #[arg(long, global = true)]
    seed: Option<PieceSeed>,
}

impl EngineArg {
    fn load_config(&self) -> anyhow::Result<EngineConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let file = File::open(path)
                    .with_context(|| format!("failed to open config {}", path.display()))?;
                serde_json::from_reader(BufReader::new(file))
                    .with_context(|| format!("failed to parse config {}", path.display()))?
            }
            None => EngineConfig::default(),
        };
        self.apply(&mut config);
        config.validate()?;
        Ok(config)
    }

    fn apply(&self, config: &mut EngineConfig) {
        if let Some(columns) = self.columns {
            config.columns = columns;
        }
        if let Some(rows) = self.rows {
            config.rows = rows;
        }
        if let Some(interval) = self.drop_interval_ms {
            config.initial_drop_interval_ms = interval;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
    }
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    logging::init(args.verbose, args.log_file.as_deref())?;
    let config = args.engine.load_config()?;
    tracing::debug!(?config, "loaded engine config");

    match args.mode.unwrap_or(Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg, config)?,
        Mode::Simulate(arg) => simulate::run(&arg, &config)?,
    }
    Ok(())
}
