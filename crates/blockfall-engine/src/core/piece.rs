use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

use super::grid::{GRID_HEIGHT, GRID_WIDTH};

/// A falling tetromino: its shape offsets, color and anchor position.
///
/// Absolute cell coordinates are `position + offset` for each of the four
/// block offsets. Rotation rewrites the offsets in place around the anchor
/// without any wall kick or re-centering, so asymmetric pieces drift away
/// from their spawn pivot when rotated repeatedly.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Piece, PieceColor, PieceKind};
///
/// let mut piece = Piece::new(PieceKind::T, PieceColor::Purple);
/// let original = piece.blocks();
/// for _ in 0..4 {
///     piece.rotate();
/// }
/// assert_eq!(piece.blocks(), original);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    kind: PieceKind,
    color: PieceColor,
    blocks: [BlockOffset; 4],
    position: PiecePosition,
}

impl Distribution<Piece> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Piece {
        let kind = rng.random();
        let color = rng.random();
        Piece::new(kind, color)
    }
}

impl Piece {
    /// Creates a piece in its canonical orientation at [`PiecePosition::SPAWN`].
    #[must_use]
    pub fn new(kind: PieceKind, color: PieceColor) -> Self {
        Self {
            kind,
            color,
            blocks: kind.shape(),
            position: PiecePosition::SPAWN,
        }
    }

    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub fn color(&self) -> PieceColor {
        self.color
    }

    #[must_use]
    pub fn rgb(&self) -> Rgb {
        self.color.rgb()
    }

    #[must_use]
    pub fn blocks(&self) -> [BlockOffset; 4] {
        self.blocks
    }

    #[must_use]
    pub fn position(&self) -> PiecePosition {
        self.position
    }

    pub fn set_position(&mut self, position: PiecePosition) {
        self.position = position;
    }

    /// Returns a copy of this piece anchored at `position`.
    #[must_use]
    pub fn with_position(mut self, position: PiecePosition) -> Self {
        self.position = position;
        self
    }

    /// Resets the offsets to the canonical shape of `kind`.
    pub fn set_kind(&mut self, kind: PieceKind) {
        self.kind = kind;
        self.blocks = kind.shape();
    }

    pub fn set_color(&mut self, color: PieceColor) {
        self.color = color;
    }

    /// Rotates all four offsets by 90° with `(dx, dy) -> (-dy, dx)`.
    ///
    /// Rotation never fails by itself; callers check the result against the
    /// grid and revert with three more rotations when it does not fit.
    pub fn rotate(&mut self) {
        for block in &mut self.blocks {
            *block = block.rotated();
        }
    }

    /// Like [`Self::rotate`], but returns a rotated copy.
    #[must_use]
    pub fn rotated(mut self) -> Self {
        self.rotate();
        self
    }

    /// Absolute cell coordinates at the current anchor position.
    pub fn occupied_positions(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.occupied_positions_at(self.position.x, self.position.y)
    }

    /// Absolute cell coordinates if this piece were anchored at `(x, y)`.
    pub fn occupied_positions_at(&self, x: i32, y: i32) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.blocks.iter().map(move |b| (x + b.dx, y + b.dy))
    }
}

/// A block offset relative to the piece anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockOffset {
    pub dx: i32,
    pub dy: i32,
}

impl BlockOffset {
    #[must_use]
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    #[must_use]
    pub const fn rotated(self) -> Self {
        Self::new(-self.dy, self.dx)
    }
}

/// Anchor position of a piece on the grid.
///
/// - X increases rightward (columns)
/// - Y increases downward (rows), row 0 is the top visible row
/// - Negative Y lies above the visible grid and is always free space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PiecePosition {
    pub x: i32,
    pub y: i32,
}

impl PiecePosition {
    /// Horizontal center, two rows above the visible grid.
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub const SPAWN: Self = Self::new((GRID_WIDTH / 2) as i32, -2);

    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn left(self) -> Self {
        Self::new(self.x - 1, self.y)
    }

    #[must_use]
    pub const fn right(self) -> Self {
        Self::new(self.x + 1, self.y)
    }

    #[must_use]
    pub const fn down(self) -> Self {
        Self::new(self.x, self.y + 1)
    }

    /// Returns `true` if `(x, y)` is inside the grid horizontally and not below it.
    ///
    /// Rows above the grid (`y < 0`) are inside.
    #[must_use]
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub const fn is_within_walls(x: i32, y: i32) -> bool {
        x >= 0 && x < GRID_WIDTH as i32 && y < GRID_HEIGHT as i32
    }
}

/// Enum representing the type of piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 0,
    /// O-piece.
    O = 1,
    /// T-piece.
    T = 2,
    /// S-piece.
    S = 3,
    /// Z-piece.
    Z = 4,
    /// J-piece.
    J = 5,
    /// L-piece.
    L = 6,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    pub const ALL: [Self; Self::LEN] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Canonical block offsets of this kind.
    #[must_use]
    pub const fn shape(self) -> [BlockOffset; 4] {
        PIECE_SHAPES[self as usize]
    }

    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::T => 'T',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
        }
    }
}

const PIECE_SHAPES: [[BlockOffset; 4]; PieceKind::LEN] = {
    const fn b(dx: i32, dy: i32) -> BlockOffset {
        BlockOffset::new(dx, dy)
    }
    [
        // I-piece (vertical)
        [b(0, -1), b(0, 0), b(0, 1), b(0, 2)],
        // O-piece
        [b(0, 0), b(0, 1), b(1, 0), b(1, 1)],
        // T-piece
        [b(-1, 0), b(0, 0), b(1, 0), b(0, 1)],
        // S-piece
        [b(-1, 0), b(0, 0), b(0, 1), b(1, 1)],
        // Z-piece
        [b(0, 0), b(1, 0), b(-1, 1), b(0, 1)],
        // J-piece
        [b(-1, 0), b(0, 0), b(1, 0), b(1, 1)],
        // L-piece
        [b(-1, 0), b(0, 0), b(1, 0), b(-1, 1)],
    ]
};

/// Named piece colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceColor {
    Red,
    Green,
    Blue,
    Yellow,
    Purple,
    Aqua,
}

impl Distribution<PieceColor> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceColor {
        PieceColor::ALL[rng.random_range(0..PieceColor::LEN)]
    }
}

impl PieceColor {
    /// Number of colors (6).
    pub const LEN: usize = 6;

    pub const ALL: [Self; Self::LEN] = [
        PieceColor::Red,
        PieceColor::Green,
        PieceColor::Blue,
        PieceColor::Yellow,
        PieceColor::Purple,
        PieceColor::Aqua,
    ];

    #[must_use]
    pub const fn rgb(self) -> Rgb {
        match self {
            PieceColor::Red => Rgb::new(255, 0, 0),
            PieceColor::Green => Rgb::new(0, 255, 0),
            PieceColor::Blue => Rgb::new(0, 0, 255),
            PieceColor::Yellow => Rgb::new(255, 255, 0),
            PieceColor::Purple => Rgb::new(255, 0, 255),
            PieceColor::Aqua => Rgb::new(0, 255, 255),
        }
    }
}

/// An RGB color triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}
