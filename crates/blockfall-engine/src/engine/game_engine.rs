use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{
    ActivePiece, Board, ConfigError, EngineConfig, GameStats, PIECE_FRAME_SIZE, PhaseTransitionError,
    PieceGenerator, PieceSeed,
};

/// Text of the instructions screen.
pub const INSTRUCTIONS_TEXT: &str = "Move and rotate the falling pieces to choose where they land. \
When a piece lands it becomes part of the pile and the next piece, shown in the preview, starts \
falling. A horizontal row completely filled with blocks is removed, every block above it falls by \
one row, and you earn one point. The game ends as soon as a block lands on the top row of the grid.";

/// Text of the controls screen.
pub const CONTROLS_TEXT: &str = "Use the arrow keys. Left and right move the falling piece, up \
rotates it by 90 degrees and down drops it by one row. Press p to pause, r to restart while \
paused and q to quit.";

/// Screen the game is on.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    derive_more::Display,
    derive_more::IsVariant,
    Serialize,
    Deserialize,
)]
pub enum Phase {
    #[display("menu")]
    Menu,
    #[display("instructions")]
    Instructions,
    #[display("controls")]
    Controls,
    #[display("playing")]
    Playing,
    #[display("game over")]
    GameOver,
}

/// Result of a drop tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum TickOutcome {
    /// The game is not running, or is paused.
    Ignored,
    /// The active piece fell by one row.
    Moved,
    /// The active piece landed, was locked and the next piece took its place.
    Locked { cleared_rows: usize },
    /// A lock left terrain on the terminal row.
    GameOver,
}

/// A game: boards, pieces, score and the screen state machine.
///
/// The engine never reads a clock. The frontend calls
/// [`GameEngine::on_drop_tick`] every [`GameEngine::drop_interval`] and
/// forwards player input to the `on_*` methods.
///
/// # Example
///
/// ```
/// use blockfall_engine::{EngineConfig, GameEngine, Phase, TickOutcome};
///
/// let mut engine = GameEngine::new(EngineConfig::default()).unwrap();
/// assert_eq!(engine.phase(), Phase::Menu);
/// assert_eq!(engine.on_drop_tick(), TickOutcome::Ignored);
///
/// engine.new_game().unwrap();
/// assert_eq!(engine.phase(), Phase::Playing);
/// engine.on_move_left();
/// engine.on_rotate();
/// assert_eq!(engine.on_drop_tick(), TickOutcome::Moved);
/// ```
#[derive(Debug, Clone)]
pub struct GameEngine {
    config: EngineConfig,
    generator: PieceGenerator,
    board: Board,
    preview: Board,
    active: Option<ActivePiece>,
    next: Option<ActivePiece>,
    stats: GameStats,
    drop_interval: Duration,
    paused: bool,
    phase: Phase,
}

impl GameEngine {
    /// Creates an engine on the menu screen.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let board = Board::new(config.columns, config.rows).map_err(ConfigError::BoardSize)?;
        let preview =
            Board::new(PIECE_FRAME_SIZE, PIECE_FRAME_SIZE).map_err(ConfigError::BoardSize)?;
        let generator = config
            .seed
            .map_or_else(PieceGenerator::new, PieceGenerator::with_seed);
        Ok(Self {
            drop_interval: config.initial_drop_interval(),
            config,
            generator,
            board,
            preview,
            active: None,
            next: None,
            stats: GameStats::new(),
            paused: false,
            phase: Phase::Menu,
        })
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.stats.score()
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.phase.is_game_over()
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Returns the main play field.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the 4×4 board showing the next piece.
    #[must_use]
    pub fn preview_board(&self) -> &Board {
        &self.preview
    }

    #[must_use]
    pub fn active_piece(&self) -> Option<&ActivePiece> {
        self.active.as_ref()
    }

    #[must_use]
    pub fn next_piece(&self) -> Option<&ActivePiece> {
        self.next.as_ref()
    }

    /// Returns how often [`GameEngine::on_drop_tick`] should be called.
    #[must_use]
    pub fn drop_interval(&self) -> Duration {
        self.drop_interval
    }

    /// Returns the seed of the piece sequence.
    #[must_use]
    pub fn seed(&self) -> PieceSeed {
        self.generator.seed()
    }

    fn is_running(&self) -> bool {
        self.phase.is_playing() && !self.paused
    }

    fn transition(&mut self, allowed: &[Phase], to: Phase) -> Result<(), PhaseTransitionError> {
        if !allowed.contains(&self.phase) {
            return Err(PhaseTransitionError {
                from: self.phase,
                to,
            });
        }
        tracing::debug!(from = %self.phase, %to, "phase change");
        self.phase = to;
        Ok(())
    }

    /// Starts a new game, discarding any game in progress.
    ///
    /// Allowed from the menu, from the game over screen and while playing
    /// (restart).
    pub fn new_game(&mut self) -> Result<(), PhaseTransitionError> {
        self.transition(
            &[Phase::Menu, Phase::Playing, Phase::GameOver],
            Phase::Playing,
        )?;
        self.board.clear_all();
        self.preview.clear_all();
        self.next = Some(self.generator.spawn(&mut self.preview));
        self.active = Some(self.generator.spawn(&mut self.board));
        self.drop_interval = self.config.initial_drop_interval();
        self.stats = GameStats::new();
        self.paused = false;
        tracing::info!(
            seed = %self.generator.seed(),
            columns = self.board.columns(),
            rows = self.board.rows(),
            "new game"
        );
        Ok(())
    }

    pub fn go_to_menu(&mut self) -> Result<(), PhaseTransitionError> {
        self.transition(
            &[Phase::Instructions, Phase::Controls, Phase::GameOver],
            Phase::Menu,
        )
    }

    pub fn show_instructions(&mut self) -> Result<(), PhaseTransitionError> {
        self.transition(&[Phase::Menu], Phase::Instructions)
    }

    pub fn show_controls(&mut self) -> Result<(), PhaseTransitionError> {
        self.transition(&[Phase::Menu, Phase::Instructions], Phase::Controls)
    }

    /// Suspends drop ticks and input. Has no effect outside of a game.
    pub fn pause(&mut self) {
        if self.phase.is_playing() {
            self.paused = true;
        }
    }

    pub fn resume(&mut self) {
        if self.phase.is_playing() {
            self.paused = false;
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    /// Advances the game by one gravity step.
    ///
    /// The active piece falls one row. If it cannot, it is locked, the next
    /// piece moves from the preview onto the top of the main board, full rows
    /// are cleared and the terminal row is checked.
    pub fn on_drop_tick(&mut self) -> TickOutcome {
        if !self.is_running() {
            return TickOutcome::Ignored;
        }
        let Some(active) = self.active.take() else {
            return TickOutcome::Ignored;
        };
        if active.move_down(&mut self.board) {
            self.active = Some(active);
            return TickOutcome::Moved;
        }

        active.lock(&mut self.board);
        if let Some(next) = self.next.take() {
            let next = next.transfer(&mut self.preview, &mut self.board);
            for _ in 0..PIECE_FRAME_SIZE {
                next.move_up(&mut self.board);
            }
            for _ in 0..(self.board.columns() - PIECE_FRAME_SIZE) / 2 {
                next.move_right(&mut self.board);
            }
            self.active = Some(next);
        }
        self.preview.clear_all();
        self.next = Some(self.generator.spawn(&mut self.preview));

        let cleared_rows = self.board.sweep_full_rows();
        self.stats.complete_piece_drop(cleared_rows);
        tracing::debug!(cleared_rows, score = self.stats.score(), "piece locked");

        if self.board.is_block_on_terminal_row() {
            self.phase = Phase::GameOver;
            self.paused = true;
            tracing::info!(
                score = self.stats.score(),
                pieces = self.stats.completed_pieces(),
                "game over"
            );
            return TickOutcome::GameOver;
        }
        TickOutcome::Locked { cleared_rows }
    }

    fn apply_input(&mut self, op: impl FnOnce(&ActivePiece, &mut Board) -> bool) -> bool {
        if !self.is_running() {
            return false;
        }
        let Some(active) = &self.active else {
            return false;
        };
        let moved = op(active, &mut self.board);
        active.stay_within_bounds(&mut self.board);
        moved
    }

    /// Returns whether the active piece moved.
    pub fn on_move_left(&mut self) -> bool {
        self.apply_input(ActivePiece::move_left)
    }

    /// Returns whether the active piece moved.
    pub fn on_move_right(&mut self) -> bool {
        self.apply_input(ActivePiece::move_right)
    }

    /// Returns whether the active piece rotated.
    pub fn on_rotate(&mut self) -> bool {
        self.apply_input(ActivePiece::rotate)
    }

    /// Runs one drop tick immediately, which may lock the piece.
    pub fn on_soft_drop(&mut self) -> TickOutcome {
        let outcome = self.on_drop_tick();
        if !outcome.is_ignored()
            && let Some(active) = &self.active
        {
            active.stay_within_bounds(&mut self.board);
        }
        outcome
    }
}
