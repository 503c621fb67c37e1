use ratatui::{layout::Rect, widgets::Block as BlockWidget};

pub use self::{board_display::*, cell_display::*, game_display::*, key_binding_display::*};

mod board_display;
mod cell_display;
mod game_display;
mod key_binding_display;

mod color {
    use ratatui::style::Color;

    pub const BLUE: Color = Color::Rgb(0, 0, 255);
    pub const RED: Color = Color::Rgb(255, 0, 0);
    pub const CYAN: Color = Color::Rgb(0, 255, 255);
    pub const GREEN: Color = Color::Rgb(0, 255, 0);
    pub const YELLOW: Color = Color::Rgb(255, 255, 0);
    pub const ORANGE: Color = Color::Rgb(255, 127, 0);
    pub const GRAY: Color = Color::Rgb(127, 127, 127);
    pub const PINK: Color = Color::Rgb(255, 105, 180);
    pub const DARK_GRAY: Color = Color::Rgb(64, 64, 64);
    pub const DARK_RED: Color = Color::Rgb(96, 0, 0);
    pub const BLACK: Color = Color::Rgb(0, 0, 0);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);
}

pub mod style {
    use ratatui::style::{Color, Modifier, Style};

    use crate::view::widgets::color;

    const fn fg_bg(fg: Color, bg: Color) -> Style {
        Style::new().fg(fg).bg(bg)
    }

    const fn bg_only(color: Color) -> Style {
        Style::new().fg(color).bg(color)
    }

    pub const DEFAULT: Style = fg_bg(color::WHITE, color::BLACK);
    pub const TITLE: Style = Style::new().fg(color::YELLOW).add_modifier(Modifier::BOLD);
    pub const SELECTED: Style = fg_bg(color::BLACK, color::YELLOW);
    pub const EMPTY: Style = bg_only(color::BLACK);
    pub const EMPTY_DOT: Style = fg_bg(color::DARK_GRAY, color::BLACK);
    pub const TERMINAL_ROW: Style = fg_bg(color::DARK_RED, color::BLACK);

    pub const BLUE_CELL: Style = bg_only(color::BLUE);
    pub const RED_CELL: Style = bg_only(color::RED);
    pub const CYAN_CELL: Style = bg_only(color::CYAN);
    pub const GREEN_CELL: Style = bg_only(color::GREEN);
    pub const YELLOW_CELL: Style = bg_only(color::YELLOW);
    pub const ORANGE_CELL: Style = bg_only(color::ORANGE);
    pub const GRAY_CELL: Style = bg_only(color::GRAY);
    pub const PINK_CELL: Style = bg_only(color::PINK);
}

fn block_vertical_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.height - inner_rect.height
}

fn block_horizontal_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.width - inner_rect.width
}
