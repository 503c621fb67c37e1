pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Error returned when a board is too small to hold the 4×4 piece frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("board must be at least 4x4 cells, got {columns}x{rows}")]
pub struct BoardSizeError {
    pub columns: i32,
    pub rows: i32,
}

/// Error returned when a screen transition is not allowed from the current phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("cannot go from {from} to {to}")]
pub struct PhaseTransitionError {
    pub from: Phase,
    pub to: Phase,
}

/// Error returned when an [`EngineConfig`] is unusable.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("invalid board size: {_0}")]
    BoardSize(BoardSizeError),
    #[display("board of {columns}x{rows} cells exceeds {max} cells per side")]
    BoardTooLarge { columns: i32, rows: i32, max: i32 },
    #[display("drop interval must be positive")]
    ZeroDropInterval,
}

/// Error returned when a [`PieceSeed`] cannot be parsed from its hex form.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid piece seed {input:?}: expected 32 hex digits")]
pub struct ParseSeedError {
    pub input: String,
}
