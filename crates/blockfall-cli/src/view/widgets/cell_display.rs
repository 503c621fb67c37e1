use blockfall_engine::Color;
use ratatui::{
    prelude::{Buffer, Rect},
    style::Style,
    widgets::{Paragraph, Widget},
};

use crate::view::widgets::style;

/// What occupies one grid square on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Square {
    Empty,
    /// Empty square on the terminal row.
    Terminal,
    Filled(Color),
}

/// One grid square, two terminal columns wide.
#[derive(Debug)]
pub struct CellDisplay {
    style: Style,
    symbol: &'static str,
}

impl CellDisplay {
    pub const fn new(style: Style, symbol: &'static str) -> Self {
        Self { style, symbol }
    }

    pub const fn width() -> u16 {
        2
    }

    pub const fn height() -> u16 {
        1
    }

    pub fn from_square(square: Square, show_dots: bool) -> Self {
        match square {
            Square::Empty if show_dots => Self::new(style::EMPTY_DOT, "."),
            Square::Empty => Self::new(style::EMPTY, ""),
            Square::Terminal => Self::new(style::TERMINAL_ROW, "__"),
            Square::Filled(color) => {
                let style = match color {
                    Color::Blue => style::BLUE_CELL,
                    Color::Red => style::RED_CELL,
                    Color::Cyan => style::CYAN_CELL,
                    Color::Green => style::GREEN_CELL,
                    Color::Yellow => style::YELLOW_CELL,
                    Color::Orange => style::ORANGE_CELL,
                    Color::Gray => style::GRAY_CELL,
                    Color::Pink => style::PINK_CELL,
                };
                Self::new(style, "")
            }
        }
    }
}

impl Widget for &CellDisplay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // A Paragraph fills the whole area, not just the cells under the symbol
        Paragraph::new(self.symbol)
            .style(self.style)
            .centered()
            .render(area, buf);
    }
}
