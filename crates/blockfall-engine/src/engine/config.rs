use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{Board, ConfigError, PieceSeed};

/// Largest board side accepted by [`EngineConfig::validate`].
pub const MAX_BOARD_SIDE: i32 = 1000;

/// Board geometry and timing of a game.
///
/// Missing fields fall back to [`EngineConfig::default`], so a partial JSON
/// document such as `{"rows": 20}` is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub columns: i32,
    pub rows: i32,
    pub initial_drop_interval_ms: u64,
    /// Seed for the piece sequence; a random one is drawn when absent.
    pub seed: Option<PieceSeed>,
}

impl Default for EngineConfig {
    /// 10×16 cells (a 500×800 px play area) with a 500 ms drop interval.
    fn default() -> Self {
        Self {
            columns: 10,
            rows: 16,
            initial_drop_interval_ms: 500,
            seed: None,
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn initial_drop_interval(&self) -> Duration {
        Duration::from_millis(self.initial_drop_interval_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        Board::new(self.columns, self.rows).map_err(ConfigError::BoardSize)?;
        if self.columns > MAX_BOARD_SIDE || self.rows > MAX_BOARD_SIDE {
            return Err(ConfigError::BoardTooLarge {
                columns: self.columns,
                rows: self.rows,
                max: MAX_BOARD_SIDE,
            });
        }
        if self.initial_drop_interval_ms == 0 {
            return Err(ConfigError::ZeroDropInterval);
        }
        Ok(())
    }
}
