use serde::{Deserialize, Serialize};

/// Largest number of rows a single lock can clear (the height of a piece).
pub const MAX_ROWS_PER_LOCK: usize = 4;

/// Statistics of a single game.
///
/// - **Score**: one point per cleared row, no combos or multipliers
/// - **Completed pieces**: number of pieces locked into terrain
/// - **Row clear histogram**: how many locks cleared 0, 1, 2, 3 or 4 rows
///
/// # Example
///
/// ```
/// use blockfall_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.complete_piece_drop(0);
/// stats.complete_piece_drop(3);
///
/// assert_eq!(stats.score(), 3);
/// assert_eq!(stats.completed_pieces(), 2);
/// assert_eq!(stats.row_clear_counter()[3], 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GameStats {
    score: usize,
    completed_pieces: usize,
    total_cleared_rows: usize,
    row_clear_counter: [usize; MAX_ROWS_PER_LOCK + 1],
}

impl GameStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            completed_pieces: 0,
            total_cleared_rows: 0,
            row_clear_counter: [0; MAX_ROWS_PER_LOCK + 1],
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    #[must_use]
    pub const fn total_cleared_rows(&self) -> usize {
        self.total_cleared_rows
    }

    /// Returns a histogram of locks by the number of rows they cleared.
    #[must_use]
    pub const fn row_clear_counter(&self) -> &[usize; MAX_ROWS_PER_LOCK + 1] {
        &self.row_clear_counter
    }

    /// Records a locked piece and the rows its lock cleared.
    pub fn complete_piece_drop(&mut self, cleared_rows: usize) {
        self.completed_pieces += 1;
        self.total_cleared_rows += cleared_rows;
        self.score += cleared_rows;
        if let Some(count) = self.row_clear_counter.get_mut(cleared_rows) {
            *count += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_is_one_point_per_row() {
        let mut stats = GameStats::new();
        for rows in [1, 0, 2, 4, 0] {
            stats.complete_piece_drop(rows);
        }
        assert_eq!(stats.score(), 7);
        assert_eq!(stats.total_cleared_rows(), 7);
        assert_eq!(stats.completed_pieces(), 5);
        assert_eq!(stats.row_clear_counter(), &[2, 1, 1, 0, 1]);
    }

    #[test]
    fn test_serialize() {
        let mut stats = GameStats::new();
        stats.complete_piece_drop(2);
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["score"], 2);
        assert_eq!(json["completed_pieces"], 1);
        assert_eq!(json["row_clear_counter"], serde_json::json!([0, 0, 1, 0, 0]));
    }
}
