use blockfall_engine::GameEngine;
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Paragraph, Widget},
};

use crate::view::widgets::{BoardDisplay, color, style};

/// Main board with the next-piece preview and score beside it.
#[derive(Debug)]
pub struct GameDisplay<'a> {
    engine: &'a GameEngine,
    show_dots: bool,
}

impl<'a> GameDisplay<'a> {
    pub fn new(engine: &'a GameEngine, show_dots: bool) -> Self {
        Self { engine, show_dots }
    }

    fn popup(&self) -> Option<(Vec<Line<'static>>, Style)> {
        if self.engine.is_game_over() {
            let lines = vec![
                Line::from("GAME OVER"),
                Line::from(format!("Final score: {}", self.engine.score())),
            ];
            return Some((lines, Style::new().fg(color::WHITE).bg(color::RED)));
        }
        if self.engine.is_paused() {
            return Some((
                vec![Line::from("PAUSED")],
                Style::new().fg(color::BLACK).bg(color::YELLOW),
            ));
        }
        None
    }
}

impl Widget for &GameDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.engine.is_game_over() {
            color::RED
        } else if self.engine.is_paused() {
            color::YELLOW
        } else {
            color::WHITE
        };
        let panel = |title: &'static str| {
            Block::bordered()
                .title(Line::from(title).centered())
                .padding(Padding::horizontal(1))
                .border_style(border_style)
                .style(style::DEFAULT)
        };

        let game_board = BoardDisplay::new(self.engine.board())
            .show_dots(self.show_dots)
            .show_terminal_row(true)
            .block(Block::bordered().border_style(border_style).style(style::DEFAULT));
        let preview = BoardDisplay::new(self.engine.preview_board())
            .show_dots(false)
            .block(panel("NEXT"));
        let stats = self.engine.stats();
        let stats_text = Text::from(vec![
            Line::from(format!("Score  {:>6}", stats.score())),
            Line::from(format!("Rows   {:>6}", stats.total_cleared_rows())),
            Line::from(format!("Pieces {:>6}", stats.completed_pieces())),
        ]);
        let stats_panel = Paragraph::new(stats_text).block(panel("STATS"));
        // 13 text columns, borders and padding
        let stats_width = 17;
        let stats_height = 5;

        let side_width = u16::max(preview.width(), stats_width);
        let [side_column, board_column] = Layout::horizontal([
            Constraint::Length(side_width),
            Constraint::Length(game_board.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [preview_area, stats_area] = Layout::vertical([
            Constraint::Length(preview.height()),
            Constraint::Length(stats_height),
        ])
        .spacing(1)
        .areas(side_column);
        let [preview_area] = Layout::horizontal([Constraint::Length(preview.width())])
            .flex(Flex::End)
            .areas(preview_area);
        let [board_area] =
            Layout::vertical([Constraint::Length(game_board.height())]).areas(board_column);

        (&preview).render(preview_area, buf);
        stats_panel.render(stats_area, buf);
        (&game_board).render(board_area, buf);

        if let Some((lines, style)) = self.popup() {
            let height = u16::try_from(lines.len()).unwrap_or(1) + 2;
            let area = board_area.centered(
                Constraint::Length(game_board.width()),
                Constraint::Length(height),
            );
            let block = Block::new().style(style);
            let inner = block.inner(area);
            Clear.render(area, buf);
            block.render(area, buf);
            Text::from(lines)
                .style(style)
                .centered()
                .render(
                    inner.centered_vertically(Constraint::Length(height - 2)),
                    buf,
                );
        }
    }
}
