use rand::Rng as _;
use tracing::debug;

use crate::{
    PieceCollisionError,
    core::{
        grid::Grid,
        piece::{Piece, PiecePosition},
    },
};

use super::{
    game_stats::GameStats,
    piece_generator::{PieceGenerator, PieceSeed},
    snapshot::BoardSnapshot,
};

/// Outcome of locking the current piece into the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockReport {
    /// Number of full rows removed by this lock.
    pub cleared_lines: usize,
    /// Points added to the score by this lock.
    pub score_gained: usize,
    /// Whether the spawn that followed the lock failed.
    pub game_over: bool,
}

/// The game board: one [`Grid`] plus the currently falling [`Piece`].
///
/// The board implements movement, collision, locking, line clearing, scoring
/// and game-over detection. Every successful lock runs a line-clear pass,
/// updates the score and spawns the next piece. A spawn that cannot fit ends
/// the game permanently; afterwards all commands are no-ops and the frozen
/// state stays queryable. Start over by constructing a new `Board`.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Board, PieceSeed};
///
/// let mut board = Board::with_seed(PieceSeed::from_u128(1));
/// board.move_piece_left();
/// board.rotate_piece();
/// let report = board.drop_piece().unwrap();
///
/// assert_eq!(report.cleared_lines, 0);
/// assert_eq!(board.stats().completed_pieces(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Board {
    grid: Grid,
    current_piece: Piece,
    stats: GameStats,
    game_over: bool,
    generator: PieceGenerator,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Creates an empty board with a random seed and spawns the first piece.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for deterministic pieces.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self::from_grid(Grid::EMPTY, seed)
    }

    /// Creates a board over an existing grid and spawns the first piece.
    ///
    /// If the first piece does not fit, the board starts in game-over.
    #[must_use]
    pub fn from_grid(grid: Grid, seed: PieceSeed) -> Self {
        let mut generator = PieceGenerator::with_seed(seed);
        let current_piece = generator.next_piece();
        let mut board = Self {
            grid,
            current_piece,
            stats: GameStats::new(),
            game_over: false,
            generator,
        };
        board.place_spawned_piece(current_piece);
        board
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn current_piece(&self) -> &Piece {
        &self.current_piece
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.stats.score()
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Replaces the current piece if it fits at its own position.
    pub fn set_current_piece(&mut self, piece: Piece) -> Result<(), PieceCollisionError> {
        let PiecePosition { x, y } = piece.position();
        if !self.is_piece_fit(&piece, x, y) {
            return Err(PieceCollisionError);
        }
        self.current_piece = piece;
        Ok(())
    }

    /// Returns `true` if `piece`, anchored at `(x, y)`, fits on the grid.
    ///
    /// Every cell must be within the side walls, above the bottom, and, when
    /// on the visible grid, unoccupied. Cells above the grid always pass.
    #[must_use]
    pub fn is_piece_fit(&self, piece: &Piece, x: i32, y: i32) -> bool {
        piece.occupied_positions_at(x, y).all(|(cx, cy)| {
            PiecePosition::is_within_walls(cx, cy) && !self.grid.is_occupied(cx, cy)
        })
    }

    /// Spawns a new random piece at the top center.
    ///
    /// The piece is validated at its on-grid position (row 0). If it does not
    /// fit there the game is over and the piece stays at its spawn anchor.
    pub fn spawn_piece(&mut self) {
        if self.game_over {
            return;
        }
        let piece = self.generator.next_piece();
        self.place_spawned_piece(piece);
    }

    fn place_spawned_piece(&mut self, mut piece: Piece) {
        let PiecePosition { x, y } = piece.position();
        if !self.is_piece_fit(&piece, x, y + 2) {
            debug!(
                kind = ?piece.kind(),
                score = self.stats.score(),
                pieces = self.stats.completed_pieces(),
                "game over: spawned piece does not fit"
            );
            self.game_over = true;
            self.current_piece = piece;
            return;
        }
        piece.set_position(PiecePosition::new(x, 0));
        debug!(kind = ?piece.kind(), color = ?piece.color(), "spawned piece");
        self.current_piece = piece;
    }

    /// Moves the current piece one column left. Returns whether it moved.
    pub fn move_piece_left(&mut self) -> bool {
        self.try_shift(self.current_piece.position().left())
    }

    /// Moves the current piece one column right. Returns whether it moved.
    pub fn move_piece_right(&mut self) -> bool {
        self.try_shift(self.current_piece.position().right())
    }

    fn try_shift(&mut self, position: PiecePosition) -> bool {
        if self.game_over || !self.is_piece_fit(&self.current_piece, position.x, position.y) {
            return false;
        }
        self.current_piece.set_position(position);
        true
    }

    /// Moves the current piece one row down, locking it if it cannot move.
    ///
    /// Returns the lock report when the piece was locked.
    pub fn move_piece_down(&mut self) -> Option<LockReport> {
        if self.game_over {
            return None;
        }
        if self.try_shift(self.current_piece.position().down()) {
            return None;
        }
        Some(self.lock_piece())
    }

    /// Hard-drops the current piece to its resting row and locks it.
    pub fn drop_piece(&mut self) -> Option<LockReport> {
        if self.game_over {
            return None;
        }
        self.current_piece = self.drop_position(&self.current_piece);
        Some(self.lock_piece())
    }

    /// Rotates the current piece, restoring its orientation if it does not fit.
    ///
    /// Returns whether the rotation was kept.
    pub fn rotate_piece(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        self.current_piece.rotate();
        let PiecePosition { x, y } = self.current_piece.position();
        if self.is_piece_fit(&self.current_piece, x, y) {
            return true;
        }
        for _ in 0..3 {
            self.current_piece.rotate();
        }
        false
    }

    /// Returns `piece` moved down as far as it fits, without touching the board.
    #[must_use]
    pub fn drop_position(&self, piece: &Piece) -> Piece {
        let mut position = piece.position();
        while self.is_piece_fit(piece, position.x, position.y + 1) {
            position = position.down();
        }
        piece.with_position(position)
    }

    /// Returns a copy of the grid with `piece` written at its position.
    ///
    /// No line clear is applied. The live grid is left untouched.
    #[must_use]
    pub fn probe_placement(&self, piece: &Piece) -> Grid {
        let mut grid = self.grid.clone();
        grid.fill_piece(piece);
        grid
    }

    #[must_use]
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::from_board(self)
    }

    fn lock_piece(&mut self) -> LockReport {
        self.grid.fill_piece(&self.current_piece);
        self.stats.record_piece_lock();
        let (cleared_lines, score_gained) = self.clear_lines();
        debug!(
            kind = ?self.current_piece.kind(),
            position = ?self.current_piece.position(),
            cleared_lines,
            score = self.stats.score(),
            "locked piece"
        );
        self.spawn_piece();
        LockReport {
            cleared_lines,
            score_gained,
            game_over: self.game_over,
        }
    }

    fn clear_lines(&mut self) -> (usize, usize) {
        let cleared_lines = self.grid.clear_full_rows();
        let score_gained = self.stats.record_line_clear(cleared_lines);
        (cleared_lines, score_gained)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::core::{
        grid::{GRID_HEIGHT, GRID_WIDTH},
        piece::{PieceColor, PieceKind, Rgb},
    };

    const GRAY: Rgb = Rgb::new(128, 128, 128);
    const SEED: PieceSeed = PieceSeed::from_u128(0x5eed);

    fn board_with(grid: Grid, kind: PieceKind) -> Board {
        let mut board = Board::with_seed(SEED);
        board.grid = grid;
        board.current_piece =
            Piece::new(kind, PieceColor::Red).with_position(PiecePosition::new(5, 0));
        board
    }

    fn fill_row_except(grid: &mut Grid, y: usize, holes: &[usize]) {
        for x in (0..GRID_WIDTH).filter(|x| !holes.contains(x)) {
            grid.set_cell(x, y, GRAY);
        }
    }

    fn cells(piece: &Piece) -> HashSet<(i32, i32)> {
        piece.occupied_positions().collect()
    }

    #[test]
    fn test_new_board_spawns_at_row_zero() {
        let board = Board::with_seed(SEED);
        assert!(!board.is_game_over());
        assert_eq!(board.score(), 0);
        assert_eq!(board.current_piece().position(), PiecePosition::new(5, 0));
        assert_eq!(board.current_piece().blocks(), board.current_piece().kind().shape());
    }

    #[test]
    fn test_is_piece_fit_matches_cell_rules() {
        let mut grid = Grid::EMPTY;
        grid.set_cell(4, 10, GRAY);
        let board = board_with(grid, PieceKind::O);
        let piece = *board.current_piece();

        for x in -3..GRID_WIDTH as i32 + 3 {
            for y in -4..GRID_HEIGHT as i32 + 3 {
                let expected = piece.occupied_positions_at(x, y).all(|(cx, cy)| {
                    (0..GRID_WIDTH as i32).contains(&cx)
                        && cy < GRID_HEIGHT as i32
                        && !(cx == 4 && cy == 10)
                });
                assert_eq!(board.is_piece_fit(&piece, x, y), expected, "at ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_cells_above_grid_are_passable() {
        let board = board_with(Grid::EMPTY, PieceKind::I);
        let piece = *board.current_piece();
        assert!(board.is_piece_fit(&piece, 0, -5));
        assert!(!board.is_piece_fit(&piece, -1, -5));
    }

    #[test]
    fn test_move_left_right_stop_at_walls() {
        let mut board = board_with(Grid::EMPTY, PieceKind::O);
        while board.move_piece_left() {}
        assert_eq!(board.current_piece().position().x, 0);
        assert!(!board.move_piece_left());
        while board.move_piece_right() {}
        assert_eq!(board.current_piece().position().x, 8);
        assert!(!board.move_piece_right());
    }

    #[test]
    fn test_move_blocked_by_filled_cell() {
        let mut grid = Grid::EMPTY;
        grid.set_cell(4, 0, GRAY);
        let mut board = board_with(grid, PieceKind::O);
        assert!(!board.move_piece_left());
        assert_eq!(board.current_piece().position(), PiecePosition::new(5, 0));
    }

    #[test]
    fn test_move_down_until_lock() {
        let mut board = board_with(Grid::EMPTY, PieceKind::T);
        let mut last = *board.current_piece();
        let report = loop {
            if let Some(report) = board.move_piece_down() {
                break report;
            }
            last = *board.current_piece();
        };
        assert_eq!(report.cleared_lines, 0);
        assert_eq!(last.position(), PiecePosition::new(5, 18));

        let locked: HashSet<_> = board
            .grid()
            .filled_cells()
            .map(|(x, y, color)| {
                assert_eq!(color, PieceColor::Red.rgb());
                (x as i32, y as i32)
            })
            .collect();
        assert_eq!(locked, cells(&last));
        assert_eq!(board.stats().completed_pieces(), 1);
    }

    #[test]
    fn test_lock_drops_cells_above_grid() {
        // Column 5 filled below row 2; a vertical I at row 0 spans rows -1..=2.
        let mut grid = Grid::EMPTY;
        for y in 3..GRID_HEIGHT {
            grid.set_cell(5, y, GRAY);
        }
        let mut board = board_with(grid, PieceKind::I);

        let report = board.move_piece_down().unwrap();
        assert!(report.game_over);
        for y in 0..3 {
            assert!(board.grid().is_occupied(5, y));
        }
        assert_eq!(board.grid().filled_cells().count(), GRID_HEIGHT);
    }

    #[test]
    fn test_drop_piece_lands_on_stack() {
        let mut grid = Grid::EMPTY;
        grid.set_cell(5, 15, GRAY);
        let mut board = board_with(grid, PieceKind::O);
        board.drop_piece().unwrap();
        for (x, y) in [(5, 13), (5, 14), (6, 13), (6, 14)] {
            assert!(board.grid().is_occupied(x, y), "({x}, {y})");
        }
    }

    #[test]
    fn test_drop_position_does_not_mutate() {
        let board = board_with(Grid::EMPTY, PieceKind::O);
        let dropped = board.drop_position(board.current_piece());
        assert_eq!(dropped.position(), PiecePosition::new(5, 18));
        assert_eq!(board.current_piece().position(), PiecePosition::new(5, 0));
        assert_eq!(board.grid(), &Grid::EMPTY);
    }

    #[test]
    fn test_rotate_reverts_when_blocked() {
        // A vertical I against the left wall would need columns -2..=1 when horizontal.
        let mut board = board_with(Grid::EMPTY, PieceKind::I);
        let piece =
            Piece::new(PieceKind::I, PieceColor::Red).with_position(PiecePosition::new(0, 5));
        board.set_current_piece(piece).unwrap();
        let before = *board.current_piece();
        assert!(!board.rotate_piece());
        assert_eq!(board.current_piece(), &before);
    }

    #[test]
    fn test_rotate_succeeds_in_open_space() {
        let mut board = board_with(Grid::EMPTY, PieceKind::L);
        let expected = board.current_piece().rotated();
        assert!(board.rotate_piece());
        assert_eq!(board.current_piece(), &expected);
    }

    #[test]
    fn test_clear_lines_two_rows_scores_300() {
        let mut grid = Grid::EMPTY;
        fill_row_except(&mut grid, 3, &[]);
        fill_row_except(&mut grid, 7, &[]);
        grid.set_cell(2, 1, GRAY);
        grid.set_cell(8, 5, GRAY);
        let mut board = board_with(grid, PieceKind::O);

        assert_eq!(board.clear_lines(), (2, 300));
        assert_eq!(board.score(), 300);
        assert!(board.grid().is_occupied(2, 3));
        assert!(board.grid().is_occupied(8, 6));
        assert_eq!(board.grid().filled_cells().count(), 2);
    }

    #[test]
    fn test_lock_clears_lines_and_scores() {
        // Bottom two rows are full except columns 5 and 6: an O fills both gaps.
        let mut grid = Grid::EMPTY;
        fill_row_except(&mut grid, 18, &[5, 6]);
        fill_row_except(&mut grid, 19, &[5, 6]);
        grid.set_cell(0, 17, GRAY);
        let mut board = board_with(grid, PieceKind::O);

        let report = board.drop_piece().unwrap();
        assert_eq!(report.cleared_lines, 2);
        assert_eq!(report.score_gained, 300);
        assert!(!report.game_over);
        assert_eq!(board.score(), 300);
        assert_eq!(
            board.grid().filled_cells().map(|(x, y, _)| (x, y)).collect::<Vec<_>>(),
            vec![(0, 19)]
        );
    }

    #[test]
    fn test_spawn_fails_when_top_blocked() {
        let mut grid = Grid::EMPTY;
        fill_row_except(&mut grid, 0, &[0]);
        fill_row_except(&mut grid, 1, &[0]);
        let board = Board::from_grid(grid, SEED);
        assert!(board.is_game_over());
        assert_eq!(board.current_piece().position(), PiecePosition::SPAWN);
    }

    #[test]
    fn test_commands_are_noops_after_game_over() {
        let mut grid = Grid::EMPTY;
        fill_row_except(&mut grid, 0, &[0]);
        fill_row_except(&mut grid, 1, &[0]);
        let mut board = Board::from_grid(grid.clone(), SEED);
        let piece = *board.current_piece();

        assert!(!board.move_piece_left());
        assert!(!board.move_piece_right());
        assert!(!board.rotate_piece());
        assert_eq!(board.move_piece_down(), None);
        assert_eq!(board.drop_piece(), None);
        board.spawn_piece();

        assert!(board.is_game_over());
        assert_eq!(board.current_piece(), &piece);
        assert_eq!(board.grid(), &grid);
    }

    #[test]
    fn test_play_until_game_over() {
        let mut board = Board::with_seed(SEED);
        let mut last_score = 0;
        for _ in 0..1000 {
            let was_over = board.is_game_over();
            board.drop_piece();
            assert!(board.score() >= last_score);
            last_score = board.score();
            if was_over {
                assert!(board.is_game_over());
            }
        }
        assert!(board.is_game_over());
    }

    #[test]
    fn test_set_current_piece_rejects_collision() {
        let mut grid = Grid::EMPTY;
        grid.set_cell(5, 5, GRAY);
        let mut board = board_with(grid, PieceKind::O);
        let piece =
            Piece::new(PieceKind::O, PieceColor::Red).with_position(PiecePosition::new(4, 4));
        assert!(board.set_current_piece(piece).is_err());
        assert_eq!(board.current_piece().position(), PiecePosition::new(5, 0));
    }

    #[test]
    fn test_probe_placement_leaves_grid_untouched() {
        let board = board_with(Grid::EMPTY, PieceKind::O);
        let landed = board.drop_position(board.current_piece());
        let probe = board.probe_placement(&landed);
        assert_eq!(probe.filled_cells().count(), 4);
        assert_eq!(board.grid(), &Grid::EMPTY);
    }

    #[test]
    fn test_same_seed_same_game() {
        let mut a = Board::with_seed(SEED);
        let mut b = Board::with_seed(SEED);
        for _ in 0..30 {
            assert_eq!(a.current_piece(), b.current_piece());
            a.drop_piece();
            b.drop_piece();
        }
        assert_eq!(a.grid(), b.grid());
    }
}
