use blockfall_engine::GameEngine;
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
};

use crate::view::widgets::{GameDisplay, KeyBinding, KeyBindingDisplay};

const PLAYING_BINDINGS: &[KeyBinding] = &[
    (&["←", "→"], "Move"),
    (&["↑"], "Rotate"),
    (&["↓"], "Drop"),
    (&["p"], "Pause"),
    (&["q"], "Quit"),
];
const PAUSED_BINDINGS: &[KeyBinding] = &[
    (&["p"], "Resume"),
    (&["r"], "Restart"),
    (&["q"], "Quit"),
];
const GAME_OVER_BINDINGS: &[KeyBinding] = &[
    (&["Enter", "r"], "Play again"),
    (&["m", "Esc"], "Menu"),
    (&["q"], "Quit"),
];

pub fn draw_game(frame: &mut Frame, engine: &GameEngine, show_dots: bool) {
    let bindings = if engine.is_game_over() {
        GAME_OVER_BINDINGS
    } else if engine.is_paused() {
        PAUSED_BINDINGS
    } else {
        PLAYING_BINDINGS
    };

    let [game_area, help_area] = Layout::vertical([Constraint::Fill(1), Constraint::Length(1)])
        .areas(frame.area());
    frame.render_widget(&GameDisplay::new(engine, show_dots), game_area);
    frame.render_widget(KeyBindingDisplay::new(bindings), help_area);
}
