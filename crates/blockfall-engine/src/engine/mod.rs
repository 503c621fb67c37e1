//! Game progression on top of the core board and piece types.
//!
//! - [`GameEngine`] - phases, drop ticks, input, locking and scoring
//! - [`PieceGenerator`] - seeded source of new pieces ([`PieceSeed`])
//! - [`GameStats`] - score and per-game counters
//! - [`EngineConfig`] - board size and drop interval
//!
//! # Game Flow
//!
//! 1. [`GameEngine::new_game`] fills the preview with the next piece and puts
//!    the first active piece on the main board
//! 2. The frontend calls [`GameEngine::on_drop_tick`] on a timer and forwards
//!    player input
//! 3. When the active piece cannot fall it is locked, the next piece moves to
//!    the top of the main board and full rows are cleared
//! 4. The game ends when a lock leaves terrain on the terminal row

pub use self::{config::*, game_engine::*, game_stats::*, piece_generator::*};

mod config;
mod game_engine;
mod game_stats;
mod piece_generator;
