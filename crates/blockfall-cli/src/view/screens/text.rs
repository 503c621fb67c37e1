use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout},
    text::Line,
    widgets::{Block, Padding, Paragraph, Wrap},
};

use crate::view::widgets::{KeyBinding, KeyBindingDisplay, style};

const TEXT_WIDTH: u16 = 60;

/// Draws a titled page of wrapped text with a help bar below it.
pub fn draw_text_screen(frame: &mut Frame, title: &str, body: &str, bindings: &[KeyBinding]) {
    let [page_area, help_area] = Layout::vertical([Constraint::Fill(1), Constraint::Length(1)])
        .areas(frame.area());
    let [page_area] = Layout::horizontal([Constraint::Length(TEXT_WIDTH)])
        .flex(Flex::Center)
        .areas(page_area);

    let page = Paragraph::new(body)
        .wrap(Wrap { trim: true })
        .style(style::DEFAULT)
        .block(
            Block::bordered()
                .title(Line::styled(title, style::TITLE).centered())
                .padding(Padding::uniform(1)),
        );
    frame.render_widget(page, page_area);
    frame.render_widget(KeyBindingDisplay::new(bindings), help_area);
}
