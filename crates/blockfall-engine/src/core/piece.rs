use std::fmt;

use arrayvec::ArrayVec;
use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

use super::{
    board::{Board, CellId},
    cell::{Cell, Color, PIECE_FRAME_SIZE, Position},
};

/// Number of cells in every piece.
pub const PIECE_CELLS: usize = 4;

/// Cell positions of a piece, in cell order.
pub type PiecePositions = ArrayVec<Position, PIECE_CELLS>;

/// Enum representing the shape of a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 0,
    /// J-piece.
    J = 1,
    /// L-piece.
    L = 2,
    /// O-piece.
    O = 3,
    /// S-piece.
    S = 4,
    /// Z-piece.
    Z = 5,
    /// T-piece.
    T = 6,
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
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::T,
    ];

    /// Returns the cell positions of this shape inside the 4×4 spawn frame.
    #[must_use]
    pub fn frame_positions(self) -> [Position; PIECE_CELLS] {
        PIECE_SHAPES[self as usize].map(|(col, row)| Position::new(col, row))
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::S.as_char(), 'S');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
            PieceKind::O => 'O',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::T => 'T',
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

// Shapes in the 4×4 frame, as (col, row):
//
//   I      J      L      O      S      Z      T
//   .#..   ..#.   .#..   .##.   ..##   .##.   .###
//   .#..   ..#.   .#..   .##.   .##.   ..##   ..#.
//   .#..   .##.   .##.   ....   ....   ....   ....
//   .#..   ....   ....   ....   ....   ....   ....
const PIECE_SHAPES: [[(i32, i32); PIECE_CELLS]; PieceKind::LEN] = [
    [(1, 0), (1, 1), (1, 2), (1, 3)],
    [(2, 0), (2, 1), (2, 2), (1, 2)],
    [(1, 0), (1, 1), (1, 2), (2, 2)],
    [(1, 0), (2, 0), (1, 1), (2, 1)],
    [(3, 0), (2, 0), (2, 1), (1, 1)],
    [(1, 0), (2, 0), (2, 1), (3, 1)],
    [(1, 0), (2, 0), (3, 0), (2, 1)],
];

/// Unit translation a piece can attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Left,
    Right,
    Down,
}

impl MoveDirection {
    const fn delta(self) -> (i32, i32) {
        match self {
            MoveDirection::Left => (-1, 0),
            MoveDirection::Right => (1, 0),
            MoveDirection::Down => (0, 1),
        }
    }
}

/// The player-controlled piece.
///
/// The piece does not own its cells: they live in a [`Board`] and the piece
/// keeps [`CellId`] handles to them. Every operation therefore takes the
/// board the piece was spawned on (or transferred to).
///
/// # Example
///
/// ```
/// use blockfall_engine::{ActivePiece, Board, Color, PieceKind};
///
/// let mut board = Board::new(6, 10).unwrap();
/// let piece = ActivePiece::spawn(&mut board, PieceKind::O, Color::Red, 0);
///
/// assert!(piece.move_down(&mut board));
/// assert!(piece.move_right(&mut board));
/// assert!(piece.rotate(&mut board));
///
/// piece.lock(&mut board);
/// assert!(board.cells().all(|cell| cell.is_locked()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivePiece {
    kind: PieceKind,
    color: Color,
    cells: ArrayVec<CellId, PIECE_CELLS>,
}

impl ActivePiece {
    /// Builds a piece in its spawn frame, rotates it `rotations` times and
    /// inserts its cells into `board`.
    ///
    /// Each rotation is speculative against `board`, so a rotation that would
    /// collide with terrain is skipped.
    pub fn spawn(board: &mut Board, kind: PieceKind, color: Color, rotations: u8) -> Self {
        let mut positions = kind.frame_positions().into_iter().collect::<PiecePositions>();
        for _ in 0..rotations {
            if let Some(rotated) = try_rotate(board, &positions) {
                positions = rotated;
            }
        }
        let cells = positions
            .into_iter()
            .map(|position| board.insert(Cell::new(position, color, false)))
            .collect();
        Self { kind, color, cells }
    }

    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns the handles of the piece's cells.
    #[must_use]
    pub fn cell_ids(&self) -> &[CellId] {
        &self.cells
    }

    /// Returns the positions of the piece's cells still present on `board`.
    #[must_use]
    pub fn positions(&self, board: &Board) -> PiecePositions {
        self.cells
            .iter()
            .filter_map(|id| board.cell(*id))
            .map(Cell::position)
            .collect()
    }

    fn live_cells(&self, board: &Board) -> ArrayVec<(CellId, Position), PIECE_CELLS> {
        self.cells
            .iter()
            .filter_map(|id| board.cell(*id).map(|cell| (*id, cell.position())))
            .collect()
    }

    fn write_positions(board: &mut Board, cells: impl IntoIterator<Item = (CellId, Position)>) {
        for (id, position) in cells {
            if let Some(cell) = board.cell_mut(id) {
                cell.set_position(position);
            }
        }
    }

    fn shift(&self, board: &mut Board, dx: i32, dy: i32) {
        for id in &self.cells {
            if let Some(cell) = board.cell_mut(*id) {
                cell.set_position(cell.position().offset(dx, dy));
            }
        }
    }

    /// Returns whether the piece can move one cell in `direction`.
    ///
    /// Horizontal moves are blocked by terrain at exactly the target cell.
    /// Downward moves use a looser test: any locked cell in the same column
    /// at or above the row below the piece cell blocks the move.
    #[must_use]
    pub fn can_move(&self, board: &Board, direction: MoveDirection) -> bool {
        let (dx, dy) = direction.delta();
        self.positions(board).iter().all(|position| {
            let target = position.offset(dx, dy);
            match direction {
                MoveDirection::Left | MoveDirection::Right => {
                    (0..board.columns()).contains(&target.col)
                        && !board
                            .locked_cells()
                            .any(|locked| locked.col() == target.col && locked.row() == position.row)
                }
                MoveDirection::Down => {
                    target.row <= board.rows() - 1
                        && !board.locked_cells().any(|locked| {
                            position.row + 1 >= locked.row() && position.col == locked.col()
                        })
                }
            }
        })
    }

    fn try_move(&self, board: &mut Board, direction: MoveDirection) -> bool {
        if !self.can_move(board, direction) {
            return false;
        }
        let (dx, dy) = direction.delta();
        self.shift(board, dx, dy);
        true
    }

    /// Moves the piece one row down if possible and returns whether it moved.
    ///
    /// A `false` result means the piece has landed.
    pub fn move_down(&self, board: &mut Board) -> bool {
        self.try_move(board, MoveDirection::Down)
    }

    pub fn move_left(&self, board: &mut Board) -> bool {
        self.try_move(board, MoveDirection::Left)
    }

    pub fn move_right(&self, board: &mut Board) -> bool {
        self.try_move(board, MoveDirection::Right)
    }

    /// Moves the piece one row up without any bounds or collision check.
    pub fn move_up(&self, board: &mut Board) {
        self.shift(board, 0, -1);
    }

    /// Rotates the piece 90° clockwise around its bounding-box corner.
    ///
    /// The rotation is first tried on a detached copy of the positions. The
    /// live cells change only when the rotated and repaired copy does not
    /// overlap terrain, so a rejected rotation leaves the piece untouched.
    pub fn rotate(&self, board: &mut Board) -> bool {
        let live = self.live_cells(board);
        let positions = live.iter().map(|(_, position)| *position).collect();
        let Some(rotated) = try_rotate(board, &positions) else {
            return false;
        };
        Self::write_positions(
            board,
            live.iter().map(|(id, _)| *id).zip(rotated),
        );
        true
    }

    /// Shifts the whole piece back inside the left, right and bottom edges.
    pub fn stay_within_bounds(&self, board: &mut Board) {
        let live = self.live_cells(board);
        let mut positions = live.iter().map(|(_, position)| *position).collect::<PiecePositions>();
        keep_within_grid(board, &mut positions);
        Self::write_positions(board, live.iter().map(|(id, _)| *id).zip(positions));
    }

    /// Turns the piece's cells into terrain.
    pub fn lock(self, board: &mut Board) {
        for id in &self.cells {
            if let Some(cell) = board.cell_mut(*id) {
                cell.lock();
            }
        }
    }

    /// Moves the piece's cells from one board to another, keeping their
    /// coordinates and color.
    #[must_use]
    pub fn transfer(self, from: &mut Board, to: &mut Board) -> Self {
        let cells = self
            .cells
            .iter()
            .filter_map(|id| from.remove(*id))
            .map(|cell| to.insert(cell))
            .collect();
        Self {
            kind: self.kind,
            color: self.color,
            cells,
        }
    }
}

/// Rotates `positions` 90° clockwise inside a 4×4 frame anchored at their
/// minimum column and row.
fn rotate_in_frame(positions: &mut [Position]) {
    let (Some(offset_col), Some(offset_row)) = (
        positions.iter().map(|p| p.col).min(),
        positions.iter().map(|p| p.row).min(),
    ) else {
        return;
    };
    for position in positions {
        let local_col = position.col - offset_col;
        let local_row = position.row - offset_row;
        *position = Position::new(
            local_row + offset_col,
            PIECE_FRAME_SIZE - local_col - 1 + offset_row,
        );
    }
}

/// Shifts the whole group until every position is inside the left, right
/// and bottom edges of `board`. The top edge is not enforced.
fn keep_within_grid(board: &Board, positions: &mut [Position]) {
    let shift = |positions: &mut [Position], dx: i32, dy: i32| {
        for position in positions.iter_mut() {
            *position = position.offset(dx, dy);
        }
    };
    for i in 0..positions.len() {
        while positions[i].col < 0 {
            shift(positions, 1, 0);
        }
        while positions[i].col > board.columns() - 1 {
            shift(positions, -1, 0);
        }
        while positions[i].row > board.rows() - 1 {
            shift(positions, 0, -1);
        }
    }
}

/// Rotates and repairs a copy of `positions`, returning it if it does not
/// overlap terrain.
fn try_rotate(board: &Board, positions: &PiecePositions) -> Option<PiecePositions> {
    let mut trial = positions.clone();
    rotate_in_frame(&mut trial);
    keep_within_grid(board, &mut trial);
    if trial
        .iter()
        .any(|position| board.has_locked_cell_at(position.col, position.row))
    {
        return None;
    }
    Some(trial)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(mut positions: Vec<(i32, i32)>) -> Vec<(i32, i32)> {
        positions.sort_unstable();
        positions
    }

    fn coords(positions: &[Position]) -> Vec<(i32, i32)> {
        positions.iter().map(|p| (p.col, p.row)).collect()
    }

    fn normalized(positions: &[Position]) -> Vec<(i32, i32)> {
        let min_col = positions.iter().map(|p| p.col).min().unwrap();
        let min_row = positions.iter().map(|p| p.row).min().unwrap();
        sorted(
            positions
                .iter()
                .map(|p| (p.col - min_col, p.row - min_row))
                .collect(),
        )
    }

    #[test]
    fn test_frame_positions_inside_frame() {
        for kind in PieceKind::ALL {
            let positions = kind.frame_positions();
            for p in positions {
                assert!((0..4).contains(&p.col), "{kind:?}: {p:?}");
                assert!((0..4).contains(&p.row), "{kind:?}: {p:?}");
            }
            let mut unique = coords(&positions);
            unique.sort_unstable();
            unique.dedup();
            assert_eq!(unique.len(), PIECE_CELLS, "{kind:?} has overlapping cells");
        }
    }

    #[test]
    fn test_frame_positions_shapes() {
        let shape = |kind: PieceKind| sorted(coords(&kind.frame_positions()));
        assert_eq!(shape(PieceKind::I), vec![(1, 0), (1, 1), (1, 2), (1, 3)]);
        assert_eq!(shape(PieceKind::J), vec![(1, 2), (2, 0), (2, 1), (2, 2)]);
        assert_eq!(shape(PieceKind::L), vec![(1, 0), (1, 1), (1, 2), (2, 2)]);
        assert_eq!(shape(PieceKind::O), vec![(1, 0), (1, 1), (2, 0), (2, 1)]);
        assert_eq!(shape(PieceKind::S), vec![(1, 1), (2, 0), (2, 1), (3, 0)]);
        assert_eq!(shape(PieceKind::Z), vec![(1, 0), (2, 0), (2, 1), (3, 1)]);
        assert_eq!(shape(PieceKind::T), vec![(1, 0), (2, 0), (2, 1), (3, 0)]);
    }

    #[test]
    fn test_display_uses_kind_letter() {
        let letters = PieceKind::ALL.map(|kind| kind.to_string()).concat();
        assert_eq!(letters, "IJLOSZT");
    }

    #[test]
    fn test_spawn_inserts_unlocked_cells() {
        let mut board = Board::new(6, 10).unwrap();
        let piece = ActivePiece::spawn(&mut board, PieceKind::L, Color::Orange, 0);
        assert_eq!(board.cells().count(), PIECE_CELLS);
        assert!(board.cells().all(|cell| !cell.is_locked()));
        assert!(board.cells().all(|cell| cell.color() == Color::Orange));
        assert_eq!(
            coords(&piece.positions(&board)),
            coords(&PieceKind::L.frame_positions())
        );
    }

    #[test]
    fn test_o_piece_falls_to_floor() {
        let mut board = Board::new(6, 10).unwrap();
        let piece = ActivePiece::spawn(&mut board, PieceKind::O, Color::Yellow, 0);
        for i in 0..8 {
            assert!(piece.move_down(&mut board), "move {i} should succeed");
        }
        assert!(!piece.move_down(&mut board));
        assert_eq!(
            sorted(coords(&piece.positions(&board))),
            vec![(1, 8), (1, 9), (2, 8), (2, 9)]
        );
    }

    #[test]
    fn test_move_down_blocked_by_terrain() {
        let mut board = Board::new(6, 10).unwrap();
        let piece = ActivePiece::spawn(&mut board, PieceKind::O, Color::Red, 0);
        board.place_locked(1, 2, Color::Blue);

        let before = piece.positions(&board);
        assert!(!piece.move_down(&mut board));
        assert_eq!(piece.positions(&board), before);
    }

    #[test]
    fn test_move_down_blocked_by_terrain_above_in_same_column() {
        let mut board = Board::new(6, 10).unwrap();
        let piece = ActivePiece::spawn(&mut board, PieceKind::O, Color::Red, 0);
        for _ in 0..5 {
            assert!(piece.move_down(&mut board));
        }
        board.place_locked(2, 1, Color::Blue);
        assert!(!piece.can_move(&board, MoveDirection::Down));
    }

    #[test]
    fn test_horizontal_moves() {
        let mut board = Board::new(6, 10).unwrap();
        let piece = ActivePiece::spawn(&mut board, PieceKind::O, Color::Cyan, 0);

        assert!(piece.move_left(&mut board));
        assert!(!piece.move_left(&mut board));
        assert_eq!(
            sorted(coords(&piece.positions(&board))),
            vec![(0, 0), (0, 1), (1, 0), (1, 1)]
        );

        for _ in 0..4 {
            assert!(piece.move_right(&mut board));
        }
        assert!(!piece.move_right(&mut board));
        assert_eq!(
            sorted(coords(&piece.positions(&board))),
            vec![(4, 0), (4, 1), (5, 0), (5, 1)]
        );
    }

    #[test]
    fn test_horizontal_collision_is_exact() {
        let mut board = Board::new(6, 10).unwrap();
        let piece = ActivePiece::spawn(&mut board, PieceKind::O, Color::Cyan, 0);
        // Diagonally below the target cells: does not block a sideways move.
        board.place_locked(3, 2, Color::Gray);
        assert!(piece.can_move(&board, MoveDirection::Right));

        board.place_locked(3, 1, Color::Gray);
        assert!(!piece.move_right(&mut board));
    }

    #[test]
    fn test_move_up_is_unchecked() {
        let mut board = Board::new(6, 10).unwrap();
        let piece = ActivePiece::spawn(&mut board, PieceKind::I, Color::Blue, 0);
        for _ in 0..4 {
            piece.move_up(&mut board);
        }
        assert_eq!(
            coords(&piece.positions(&board)),
            vec![(1, -4), (1, -3), (1, -2), (1, -1)]
        );
    }

    #[test]
    fn test_rotate_transform() {
        let mut board = Board::new(6, 10).unwrap();
        let piece = ActivePiece::spawn(&mut board, PieceKind::T, Color::Green, 0);
        assert!(piece.rotate(&mut board));
        assert_eq!(
            coords(&piece.positions(&board)),
            vec![(1, 3), (1, 2), (1, 1), (2, 2)]
        );
    }

    #[test]
    fn test_rotate_rejected_on_collision() {
        let mut board = Board::new(6, 10).unwrap();
        let piece = ActivePiece::spawn(&mut board, PieceKind::T, Color::Green, 0);
        board.place_locked(1, 3, Color::Red);

        let before = piece.positions(&board);
        assert!(!piece.rotate(&mut board));
        assert_eq!(piece.positions(&board), before);
    }

    #[test]
    fn test_rotate_rejected_when_repaired_copy_collides() {
        let mut board = Board::new(4, 8).unwrap();
        let piece = ActivePiece::spawn(&mut board, PieceKind::I, Color::Blue, 0);
        piece.move_right(&mut board);
        piece.move_right(&mut board);
        // the raw rotation spans cols 3..=6 on row 3; repair pulls it onto col 0
        board.place_locked(0, 3, Color::Red);

        let before = piece.positions(&board);
        assert!(!piece.rotate(&mut board));
        assert_eq!(piece.positions(&board), before);
        assert_eq!(coords(&before), vec![(3, 0), (3, 1), (3, 2), (3, 3)]);
    }

    #[test]
    fn test_rotate_repairs_right_edge() {
        let mut board = Board::new(4, 8).unwrap();
        let piece = ActivePiece::spawn(&mut board, PieceKind::I, Color::Blue, 0);
        piece.move_right(&mut board);
        piece.move_right(&mut board);
        assert!(piece.rotate(&mut board));
        assert_eq!(
            coords(&piece.positions(&board)),
            vec![(0, 3), (1, 3), (2, 3), (3, 3)]
        );
    }

    #[test]
    fn test_four_rotations_restore_shape_in_open_space() {
        for kind in PieceKind::ALL {
            let mut board = Board::new(10, 20).unwrap();
            let piece = ActivePiece::spawn(&mut board, kind, Color::Gray, 0);
            piece.move_right(&mut board);
            piece.move_right(&mut board);
            let before = piece.positions(&board);
            for _ in 0..4 {
                assert!(piece.rotate(&mut board));
            }
            let after = piece.positions(&board);
            assert_eq!(normalized(&after), normalized(&before), "{kind:?}");
            assert_eq!(
                after.iter().map(|p| p.col).min(),
                before.iter().map(|p| p.col).min(),
                "{kind:?}"
            );
        }
    }

    #[test]
    fn test_four_rotations_on_floor_restore_cells() {
        for kind in PieceKind::ALL {
            let mut board = Board::new(6, 10).unwrap();
            let piece = ActivePiece::spawn(&mut board, kind, Color::Pink, 0);
            while piece.move_down(&mut board) {}
            let before = piece.positions(&board);
            for _ in 0..4 {
                assert!(piece.rotate(&mut board));
            }
            assert_eq!(piece.positions(&board), before, "{kind:?}");
        }
    }

    #[test]
    fn test_stay_within_bounds_shifts_rigidly() {
        let mut board = Board::new(6, 10).unwrap();
        let piece = ActivePiece::spawn(&mut board, PieceKind::Z, Color::Red, 0);
        for _ in 0..3 {
            piece.shift(&mut board, 1, 0);
        }
        for _ in 0..9 {
            piece.shift(&mut board, 0, 1);
        }
        piece.stay_within_bounds(&mut board);
        assert_eq!(
            sorted(coords(&piece.positions(&board))),
            vec![(3, 8), (4, 8), (4, 9), (5, 9)]
        );
    }

    #[test]
    fn test_lock_marks_all_cells() {
        let mut board = Board::new(6, 10).unwrap();
        let piece = ActivePiece::spawn(&mut board, PieceKind::S, Color::Cyan, 0);
        while piece.move_down(&mut board) {}
        piece.lock(&mut board);
        assert_eq!(board.cells().filter(|cell| cell.is_locked()).count(), 4);
    }

    #[test]
    fn test_transfer_between_boards() {
        let mut preview = Board::new(4, 4).unwrap();
        let mut main = Board::new(10, 16).unwrap();
        let piece = ActivePiece::spawn(&mut preview, PieceKind::J, Color::Blue, 1);
        let positions = piece.positions(&preview);

        let old_ids = piece.cell_ids().to_vec();

        let piece = piece.transfer(&mut preview, &mut main);
        assert_eq!(preview.cells().count(), 0);
        assert!(old_ids.iter().all(|id| preview.cell(*id).is_none()));
        assert!(piece.cell_ids().iter().all(|id| main.cell(*id).is_some()));
        assert_eq!(piece.positions(&main), positions);
        assert_eq!(piece.kind(), PieceKind::J);
        assert!(main.cells().all(|cell| cell.color() == Color::Blue));
    }

    #[test]
    fn test_spawn_rotation_stays_inside_preview() {
        for kind in PieceKind::ALL {
            for rotations in 0..4 {
                let mut preview = Board::new(4, 4).unwrap();
                let piece = ActivePiece::spawn(&mut preview, kind, Color::Red, rotations);
                for p in piece.positions(&preview) {
                    assert!((0..4).contains(&p.col), "{kind:?}/{rotations}: {p:?}");
                    assert!(p.row <= 3, "{kind:?}/{rotations}: {p:?}");
                }
            }
        }
    }
}
