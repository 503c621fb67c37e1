use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

/// Width and height of the local frame every piece is built in.
pub const PIECE_FRAME_SIZE: i32 = 4;

/// Palette a piece draws its color from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Color {
    Blue,
    Red,
    Cyan,
    Green,
    Yellow,
    Orange,
    Gray,
    Pink,
}

impl Color {
    /// Number of palette entries (8).
    pub const LEN: usize = 8;

    pub const ALL: [Self; Self::LEN] = [
        Color::Blue,
        Color::Red,
        Color::Cyan,
        Color::Green,
        Color::Yellow,
        Color::Orange,
        Color::Gray,
        Color::Pink,
    ];
}

impl Distribution<Color> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Color {
        Color::ALL[rng.random_range(0..Color::LEN)]
    }
}

/// Grid coordinate of a cell.
///
/// `row` grows downward and may be negative while a freshly spawned piece
/// sits above the visible board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
pub struct Position {
    pub col: i32,
    pub row: i32,
}

impl Position {
    #[must_use]
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            col: self.col + dx,
            row: self.row + dy,
        }
    }
}

/// A single occupiable grid cell.
///
/// An unlocked cell belongs to the active piece and moves with it. A locked
/// cell is board terrain and only moves when a row below it is cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct Cell {
    position: Position,
    color: Color,
    locked: bool,
}

impl Cell {
    #[must_use]
    pub const fn new(position: Position, color: Color, locked: bool) -> Self {
        Self {
            position,
            color,
            locked,
        }
    }

    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    #[must_use]
    pub const fn col(&self) -> i32 {
        self.position.col
    }

    #[must_use]
    pub const fn row(&self) -> i32 {
        self.position.row
    }

    #[must_use]
    pub const fn color(&self) -> Color {
        self.color
    }

    #[must_use]
    pub const fn is_locked(&self) -> bool {
        self.locked
    }

    pub(crate) fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    pub(crate) fn shift_down(&mut self) {
        self.position.row += 1;
    }

    pub(crate) fn lock(&mut self) {
        self.locked = true;
    }
}
