use std::iter;

use blockfall_engine::{Board, TERMINAL_ROW};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt, Widget},
};

use crate::view::widgets::{CellDisplay, Square};

#[derive(Debug)]
pub struct BoardDisplay<'a> {
    board: &'a Board,
    show_dots: bool,
    show_terminal_row: bool,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self {
            board,
            show_dots: true,
            show_terminal_row: false,
            block: None,
        }
    }

    pub fn show_dots(self, show_dots: bool) -> Self {
        Self { show_dots, ..self }
    }

    pub fn show_terminal_row(self, show_terminal_row: bool) -> Self {
        Self {
            show_terminal_row,
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    fn columns(&self) -> u16 {
        u16::try_from(self.board.columns()).unwrap_or(u16::MAX)
    }

    fn rows(&self) -> u16 {
        u16::try_from(self.board.rows()).unwrap_or(u16::MAX)
    }

    pub fn width(&self) -> u16 {
        self.columns()
            .saturating_mul(CellDisplay::width())
            .saturating_add(super::block_horizontal_margin(self.block.as_ref()))
    }

    pub fn height(&self) -> u16 {
        self.rows()
            .saturating_mul(CellDisplay::height())
            .saturating_add(super::block_vertical_margin(self.block.as_ref()))
    }

    /// Lays the board out as rows of squares. Cells outside the grid, such
    /// as a piece still entering from above, are not shown.
    pub fn squares(&self) -> Vec<Vec<Square>> {
        let columns = usize::from(self.columns());
        let rows = usize::from(self.rows());
        let mut squares = vec![vec![Square::Empty; columns]; rows];
        if self.show_terminal_row
            && let Some(row) = usize::try_from(TERMINAL_ROW)
                .ok()
                .and_then(|row| squares.get_mut(row))
        {
            row.fill(Square::Terminal);
        }
        for cell in self.board.cells() {
            let (Ok(col), Ok(row)) = (usize::try_from(cell.col()), usize::try_from(cell.row()))
            else {
                continue;
            };
            if let Some(square) = squares.get_mut(row).and_then(|r| r.get_mut(col)) {
                *square = Square::Filled(cell.color());
            }
        }
        squares
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let col_constraints =
            (0..self.columns()).map(|_| Constraint::Length(CellDisplay::width()));
        let row_constraints = (0..self.rows()).map(|_| Constraint::Length(CellDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        let grid_rows = vertical.split(area);
        for (grid_row, row) in iter::zip(grid_rows.iter(), self.squares()) {
            let grid_cells = horizontal.split(*grid_row);
            for (grid_cell, square) in iter::zip(grid_cells.iter(), row) {
                CellDisplay::from_square(square, self.show_dots).render(*grid_cell, buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use blockfall_engine::Color;
    use ratatui::widgets::Borders;

    use super::*;

    #[test]
    fn test_squares() {
        let mut board = Board::new(4, 5).unwrap();
        board.place_locked(1, 4, Color::Green);
        board.place_locked(3, 0, Color::Pink);

        let squares = BoardDisplay::new(&board).show_terminal_row(true).squares();
        assert_eq!(squares.len(), 5);
        assert_eq!(
            squares[0],
            vec![
                Square::Terminal,
                Square::Terminal,
                Square::Terminal,
                Square::Filled(Color::Pink)
            ]
        );
        assert_eq!(squares[4][1], Square::Filled(Color::Green));
        assert_eq!(squares[2][2], Square::Empty);
    }

    #[test]
    fn test_size_with_border() {
        let board = Board::new(10, 16).unwrap();
        let display = BoardDisplay::new(&board).block(BlockWidget::new().borders(Borders::ALL));
        assert_eq!(display.width(), 22);
        assert_eq!(display.height(), 18);
    }

    #[test]
    fn test_size_saturates_on_huge_board() {
        let board = Board::new(40_000, 70_000).unwrap();
        let display = BoardDisplay::new(&board).block(BlockWidget::new().borders(Borders::ALL));
        assert_eq!(display.width(), u16::MAX);
        assert_eq!(display.height(), u16::MAX);
    }

    #[test]
    fn test_render_filled_cell() {
        let mut board = Board::new(4, 4).unwrap();
        board.place_locked(0, 3, Color::Red);
        let display = BoardDisplay::new(&board);
        let area = Rect::new(0, 0, display.width(), display.height());
        let mut buf = Buffer::empty(area);
        (&display).render(area, &mut buf);
        assert_eq!(buf[(0, 3)].bg, ratatui::style::Color::Rgb(255, 0, 0));
        assert_eq!(buf[(2, 0)].symbol(), ".");
    }
}
