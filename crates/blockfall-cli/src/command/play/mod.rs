use blockfall_engine::{EngineConfig, GameEngine};

use crate::{command::play::app::PlayApp, tui::Runtime};

mod app;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Hide the dots marking empty cells
    #[clap(long)]
    hide_grid: bool,
}

pub(crate) fn run(arg: &PlayArg, config: EngineConfig) -> anyhow::Result<()> {
    let PlayArg { hide_grid } = arg;

    let engine = GameEngine::new(config)?;
    tracing::info!(seed = %engine.seed(), "starting terminal game");
    let mut app = PlayApp::new(engine, !hide_grid);
    Runtime::new().run(&mut app)?;

    let stats = app.engine().stats();
    tracing::info!(
        score = stats.score(),
        pieces = stats.completed_pieces(),
        "terminal game closed"
    );
    Ok(())
}
