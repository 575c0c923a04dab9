use serde::Serialize;

/// Score values for line clears.
///
/// Index corresponds to number of lines cleared by a single lock:
/// - 0 lines: 0 points
/// - 1 line: 100 points
/// - 2 lines: 300 points
/// - 3 lines: 500 points
/// - 4 lines: 800 points
///
/// Clears of more than 4 lines score like 4.
pub const SCORE_TABLE: [usize; 5] = [0, 100, 300, 500, 800];

/// Cumulative statistics of a board: score, locked pieces and line clears.
///
/// # Example
///
/// ```
/// use blockfall_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.record_piece_lock();
/// stats.record_line_clear(2);
///
/// assert_eq!(stats.score(), 300);
/// assert_eq!(stats.completed_pieces(), 1);
/// assert_eq!(stats.line_cleared_counter()[2], 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameStats {
    score: usize,
    completed_pieces: usize,
    total_cleared_lines: usize,
    line_cleared_counter: [usize; 5],
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            completed_pieces: 0,
            total_cleared_lines: 0,
            line_cleared_counter: [0; 5],
        }
    }

    /// Returns the current score (sum of all line clear points).
    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    /// Returns the number of pieces locked into the grid.
    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Returns a histogram of locks by number of lines cleared.
    ///
    /// Index 4 also counts the (unreachable in normal play) clears above 4 lines.
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    pub const fn record_piece_lock(&mut self) {
        self.completed_pieces += 1;
    }

    /// Adds the points for one line-clear pass and returns them.
    pub fn record_line_clear(&mut self, cleared_lines: usize) -> usize {
        let index = cleared_lines.min(SCORE_TABLE.len() - 1);
        let gained = SCORE_TABLE[index];
        self.total_cleared_lines += cleared_lines;
        self.line_cleared_counter[index] += 1;
        self.score += gained;
        gained
    }
}
