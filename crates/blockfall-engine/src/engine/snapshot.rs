use serde::Serialize;

use crate::core::piece::{PieceColor, PieceKind, Rgb};

use super::board::Board;

/// Read-only view of a board for drawing or reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardSnapshot {
    pub score: usize,
    pub game_over: bool,
    pub current_piece: PieceSnapshot,
    pub filled_cells: Vec<CellSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PieceSnapshot {
    pub kind: PieceKind,
    pub color: PieceColor,
    pub rgb: Rgb,
    /// Absolute `(x, y)` coordinates; may include rows above the grid.
    pub cells: [(i32, i32); 4],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellSnapshot {
    pub x: usize,
    pub y: usize,
    pub color: Rgb,
}

impl BoardSnapshot {
    pub(crate) fn from_board(board: &Board) -> Self {
        let piece = board.current_piece();
        let mut cells = [(0, 0); 4];
        for (slot, cell) in cells.iter_mut().zip(piece.occupied_positions()) {
            *slot = cell;
        }
        Self {
            score: board.score(),
            game_over: board.is_game_over(),
            current_piece: PieceSnapshot {
                kind: piece.kind(),
                color: piece.color(),
                rgb: piece.rgb(),
                cells,
            },
            filled_cells: board
                .grid()
                .filled_cells()
                .map(|(x, y, color)| CellSnapshot { x, y, color })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Board, PieceSeed};

    #[test]
    fn test_snapshot_matches_board() {
        let mut board = Board::with_seed(PieceSeed::from_u128(9));
        board.drop_piece();
        let snapshot = board.snapshot();

        assert_eq!(snapshot.score, board.score());
        assert!(!snapshot.game_over);
        assert_eq!(snapshot.filled_cells.len(), 4);
        let expected: Vec<_> = board.current_piece().occupied_positions().collect();
        assert_eq!(snapshot.current_piece.cells.to_vec(), expected);
        assert_eq!(snapshot.current_piece.rgb, board.current_piece().rgb());
    }

    #[test]
    fn test_snapshot_serializes_to_json() {
        let board = Board::with_seed(PieceSeed::from_u128(3));
        let value = serde_json::to_value(board.snapshot()).unwrap();

        assert_eq!(value["score"], 0);
        assert_eq!(value["game_over"], false);
        assert_eq!(value["filled_cells"].as_array().unwrap().len(), 0);
        assert_eq!(value["current_piece"]["cells"].as_array().unwrap().len(), 4);
    }
}
