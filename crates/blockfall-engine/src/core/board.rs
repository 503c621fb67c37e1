use crate::BoardSizeError;

use super::cell::{Cell, Color, PIECE_FRAME_SIZE, Position};

/// Edge length of a cell, in pixels, used when a board is sized from a pixel area.
pub const CELL_SIZE: u16 = 50;

/// The row whose occupation by terrain ends the game.
pub const TERMINAL_ROW: i32 = 0;

/// Handle to a cell stored in a [`Board`].
///
/// Handles are generational: once a cell is removed, its handle never
/// resolves again, even if the storage slot is reused by a later cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellId {
    index: u32,
    generation: u32,
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    cell: Option<Cell>,
}

/// Fixed-size grid owning every cell on it, both terrain and the active piece.
///
/// Pieces refer to their cells through [`CellId`] handles, so a locked piece
/// is just four cells with their `locked` flag set.
///
/// # Coordinate System
///
/// - Columns grow to the right, rows grow downward
/// - Row 0 is the terminal row
/// - Active cells may sit at negative rows while entering the board
///
/// # Example
///
/// ```
/// use blockfall_engine::{Board, Color};
///
/// let mut board = Board::new(4, 6).unwrap();
/// for col in 0..4 {
///     board.place_locked(col, 5, Color::Red);
/// }
/// assert!(board.is_row_full(5));
/// assert_eq!(board.sweep_full_rows(), 1);
/// assert_eq!(board.cells().count(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct Board {
    columns: i32,
    rows: i32,
    slots: Vec<Slot>,
    free: Vec<u32>,
}

impl Board {
    /// Creates an empty board with the given number of columns and rows.
    ///
    /// Both dimensions must fit the 4×4 piece frame.
    pub fn new(columns: i32, rows: i32) -> Result<Self, BoardSizeError> {
        if columns < PIECE_FRAME_SIZE || rows < PIECE_FRAME_SIZE {
            return Err(BoardSizeError { columns, rows });
        }
        Ok(Self {
            columns,
            rows,
            slots: Vec::new(),
            free: Vec::new(),
        })
    }

    /// Creates an empty board covering a pixel area, one cell per [`CELL_SIZE`] square.
    pub fn from_pixels(width: u16, height: u16) -> Result<Self, BoardSizeError> {
        Self::new(
            i32::from(width / CELL_SIZE),
            i32::from(height / CELL_SIZE),
        )
    }

    #[must_use]
    pub fn columns(&self) -> i32 {
        self.columns
    }

    #[must_use]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// Returns an iterator over every cell on the board, locked or not.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.slots.iter().filter_map(|slot| slot.cell.as_ref())
    }

    #[must_use]
    pub fn cell(&self, id: CellId) -> Option<&Cell> {
        let slot = self.slots.get(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.cell.as_ref()
    }

    pub(crate) fn cell_mut(&mut self, id: CellId) -> Option<&mut Cell> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.cell.as_mut()
    }

    pub(crate) fn insert(&mut self, cell: Cell) -> CellId {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.cell = Some(cell);
            return CellId {
                index,
                generation: slot.generation,
            };
        }
        let index = u32::try_from(self.slots.len()).expect("cell store exceeds u32::MAX slots");
        self.slots.push(Slot {
            generation: 0,
            cell: Some(cell),
        });
        CellId {
            index,
            generation: 0,
        }
    }

    pub(crate) fn remove(&mut self, id: CellId) -> Option<Cell> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        let cell = slot.cell.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        Some(cell)
    }

    /// Adds a terrain cell at the given coordinate.
    pub fn place_locked(&mut self, col: i32, row: i32, color: Color) -> CellId {
        debug_assert!(
            !self.has_locked_cell_at(col, row),
            "locked cells must not overlap at ({col}, {row})"
        );
        self.insert(Cell::new(Position::new(col, row), color, true))
    }

    pub(crate) fn locked_cells(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.cells().filter(|cell| cell.is_locked())
    }

    #[must_use]
    pub fn has_locked_cell_at(&self, col: i32, row: i32) -> bool {
        self.locked_cells()
            .any(|cell| cell.col() == col && cell.row() == row)
    }

    /// Returns whether `row` holds at least `columns` locked cells.
    #[must_use]
    pub fn is_row_full(&self, row: i32) -> bool {
        self.debug_check_row(row);
        let count = self.locked_cells().filter(|cell| cell.row() == row).count();
        count >= self.columns.unsigned_abs() as usize
    }

    /// Removes every cell on `row`, locked or not.
    pub fn clear_row(&mut self, row: i32) {
        self.debug_check_row(row);
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.cell.is_some_and(|cell| cell.row() == row) {
                slot.cell = None;
                slot.generation = slot.generation.wrapping_add(1);
                #[expect(clippy::cast_possible_truncation)]
                self.free.push(index as u32);
            }
        }
    }

    /// Moves every locked cell above `row` down by one row.
    pub fn collapse_above(&mut self, row: i32) {
        self.debug_check_row(row);
        for cell in self.slots.iter_mut().filter_map(|slot| slot.cell.as_mut()) {
            if cell.is_locked() && cell.row() < row {
                cell.shift_down();
            }
        }
    }

    /// Returns whether any locked cell sits on the terminal row.
    ///
    /// Active cells passing through the terminal row are ignored.
    #[must_use]
    pub fn is_block_on_terminal_row(&self) -> bool {
        self.locked_cells().any(|cell| cell.row() == TERMINAL_ROW)
    }

    /// Removes every cell from the board.
    pub fn clear_all(&mut self) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.cell.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
                #[expect(clippy::cast_possible_truncation)]
                self.free.push(index as u32);
            }
        }
    }

    /// Clears every full row below the terminal row and returns how many were cleared.
    ///
    /// Rows are scanned top to bottom and each full row is cleared and
    /// collapsed before the next row is checked, so rows that shift down
    /// during the sweep are still seen.
    pub fn sweep_full_rows(&mut self) -> usize {
        let mut cleared = 0;
        for row in TERMINAL_ROW + 1..self.rows {
            if self.is_row_full(row) {
                self.clear_row(row);
                self.collapse_above(row);
                tracing::debug!(row, "cleared full row");
                cleared += 1;
            }
        }
        cleared
    }

    fn debug_check_row(&self, row: i32) {
        debug_assert!(
            (0..self.rows).contains(&row),
            "row {row} outside board of {} rows",
            self.rows
        );
    }
}
