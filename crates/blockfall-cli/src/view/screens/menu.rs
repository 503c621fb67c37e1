use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    text::{Line, Text},
    widgets::{Block, Paragraph},
};

use crate::view::widgets::{KeyBinding, KeyBindingDisplay, style};

/// Entries of the main menu, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Play,
    Instructions,
    Controls,
    Quit,
}

impl MenuItem {
    pub const ALL: [Self; 4] = [
        MenuItem::Play,
        MenuItem::Instructions,
        MenuItem::Controls,
        MenuItem::Quit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuItem::Play => "Play",
            MenuItem::Instructions => "Instructions",
            MenuItem::Controls => "Controls",
            MenuItem::Quit => "Quit",
        }
    }

    fn index(self) -> usize {
        self as usize
    }

    /// Returns the item below, wrapping to the top.
    #[must_use]
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Returns the item above, wrapping to the bottom.
    #[must_use]
    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

const MENU_BINDINGS: &[KeyBinding] = &[
    (&["↑", "↓"], "Select"),
    (&["Enter"], "Confirm"),
    (&["i"], "Instructions"),
    (&["c"], "Controls"),
    (&["q"], "Quit"),
];

pub fn draw_menu(frame: &mut Frame, selected: MenuItem) {
    let [menu_area, help_area] = Layout::vertical([Constraint::Fill(1), Constraint::Length(1)])
        .areas(frame.area());
    let area = menu_area.centered(
        Constraint::Length(24),
        Constraint::Length(u16::try_from(MenuItem::ALL.len()).unwrap_or(4) * 2 + 3),
    );

    let mut lines = vec![Line::raw("")];
    for item in MenuItem::ALL {
        let style = if item == selected {
            style::SELECTED
        } else {
            style::DEFAULT
        };
        lines.push(Line::styled(format!("  {}  ", item.label()), style).centered());
        lines.push(Line::raw(""));
    }
    let menu = Paragraph::new(Text::from(lines)).style(style::DEFAULT).block(
        Block::bordered().title(Line::styled(" BLOCKFALL ", style::TITLE).centered()),
    );
    frame.render_widget(menu, area);
    frame.render_widget(KeyBindingDisplay::new(MENU_BINDINGS), help_area);
}
