use std::io::{self, Write as _};

use blockfall_engine::{EngineConfig, GameEngine, GameStats, PieceSeed, TickOutcome};
use rand::{Rng, SeedableRng as _, rngs::StdRng};
use serde::Serialize;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    /// Number of games to play
    #[clap(long, default_value_t = 10)]
    games: usize,
    /// Stop a game that is still running after this many drop ticks
    #[clap(long, default_value_t = 100_000)]
    max_ticks: usize,
    /// Seed for the random input (and for piece seeds when `--seed` is not given)
    #[clap(long, default_value_t = 0)]
    input_seed: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct GameReport {
    game: usize,
    seed: PieceSeed,
    ticks: usize,
    game_over: bool,
    stats: GameStats,
}

/// One random key press per drop tick, weighted towards no input.
fn random_input<R: Rng + ?Sized>(engine: &mut GameEngine, rng: &mut R) {
    match rng.random_range(0..8) {
        0 | 1 => _ = engine.on_move_left(),
        2 | 3 => _ = engine.on_move_right(),
        4 => _ = engine.on_rotate(),
        5 => _ = engine.on_soft_drop(),
        _ => {}
    }
}

fn play_game<R: Rng + ?Sized>(
    game: usize,
    config: &EngineConfig,
    max_ticks: usize,
    rng: &mut R,
) -> anyhow::Result<GameReport> {
    let seed = config.seed.unwrap_or_else(|| rng.random());
    let mut engine = GameEngine::new(EngineConfig {
        seed: Some(seed),
        ..config.clone()
    })?;
    engine.new_game()?;

    let mut ticks = 0;
    while ticks < max_ticks && !engine.is_game_over() {
        random_input(&mut engine, rng);
        if engine.on_drop_tick() == TickOutcome::GameOver {
            tracing::debug!(game, ticks, "game finished");
        }
        ticks += 1;
    }

    Ok(GameReport {
        game,
        seed,
        ticks,
        game_over: engine.is_game_over(),
        stats: engine.stats().clone(),
    })
}

fn simulate(arg: &SimulateArg, config: &EngineConfig) -> anyhow::Result<Vec<GameReport>> {
    let mut rng = StdRng::seed_from_u64(arg.input_seed);
    (0..arg.games)
        .map(|game| play_game(game, config, arg.max_ticks, &mut rng))
        .collect()
}

pub(crate) fn run(arg: &SimulateArg, config: &EngineConfig) -> anyhow::Result<()> {
    let reports = simulate(arg, config)?;
    tracing::info!(games = reports.len(), "simulation finished");

    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &reports)?;
    writeln!(stdout)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arg(games: usize, max_ticks: usize) -> SimulateArg {
        SimulateArg {
            games,
            max_ticks,
            input_seed: 11,
        }
    }

    #[test]
    fn test_games_end_within_tick_cap() {
        let config = EngineConfig {
            columns: 6,
            rows: 8,
            ..EngineConfig::default()
        };
        let reports = simulate(&arg(3, 10_000), &config).unwrap();
        assert_eq!(reports.len(), 3);
        for report in &reports {
            assert!(report.game_over, "{report:?}");
            assert!(report.ticks <= 10_000);
            assert!(report.stats.completed_pieces() > 0);
        }
    }

    #[test]
    fn test_tick_cap_stops_game() {
        let reports = simulate(&arg(1, 5), &EngineConfig::default()).unwrap();
        assert_eq!(reports[0].ticks, 5);
        assert!(!reports[0].game_over);
    }

    #[test]
    fn test_simulation_is_reproducible() {
        let config = EngineConfig::default();
        let first = simulate(&arg(2, 2_000), &config).unwrap();
        let second = simulate(&arg(2, 2_000), &config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_report_json_shape() {
        let reports = simulate(&arg(1, 5), &EngineConfig::default()).unwrap();
        let json = serde_json::to_value(&reports).unwrap();
        assert_eq!(json[0]["game"], 0);
        assert_eq!(json[0]["ticks"], 5);
        assert!(json[0]["seed"].as_str().is_some_and(|s| s.len() == 32));
        assert!(json[0]["stats"]["score"].is_u64());
    }
}
