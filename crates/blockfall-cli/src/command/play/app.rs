use blockfall_engine::{CONTROLS_TEXT, GameEngine, INSTRUCTIONS_TEXT, Phase, PhaseTransitionError};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::Frame;

use crate::{
    tui::{App, Runtime},
    view::{
        screens::{self, MenuItem},
        widgets::KeyBinding,
    },
};

const INSTRUCTIONS_BINDINGS: &[KeyBinding] = &[
    (&["c", "Enter"], "Continue to controls"),
    (&["Esc"], "Menu"),
    (&["q"], "Quit"),
];
const CONTROLS_BINDINGS: &[KeyBinding] = &[(&["Esc", "Enter"], "Menu"), (&["q"], "Quit")];

fn log_rejected(result: Result<(), PhaseTransitionError>) {
    if let Err(err) = result {
        tracing::warn!(%err, "ignored navigation key");
    }
}

/// Maps key presses to engine calls and draws the screen for each phase.
#[derive(Debug)]
pub struct PlayApp {
    engine: GameEngine,
    selected: MenuItem,
    show_dots: bool,
    is_exiting: bool,
}

impl PlayApp {
    pub fn new(engine: GameEngine, show_dots: bool) -> Self {
        Self {
            engine,
            selected: MenuItem::Play,
            show_dots,
            is_exiting: false,
        }
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    fn activate(&mut self, item: MenuItem) {
        match item {
            MenuItem::Play => {
                log_rejected(self.engine.new_game());
            }
            MenuItem::Instructions => {
                log_rejected(self.engine.show_instructions());
            }
            MenuItem::Controls => {
                log_rejected(self.engine.show_controls());
            }
            MenuItem::Quit => self.is_exiting = true,
        }
    }

    fn handle_menu_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up => self.selected = self.selected.prev(),
            KeyCode::Down => self.selected = self.selected.next(),
            KeyCode::Enter => self.activate(self.selected),
            KeyCode::Char('i') => self.activate(MenuItem::Instructions),
            KeyCode::Char('c') => self.activate(MenuItem::Controls),
            _ => {}
        }
    }

    fn handle_instructions_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('c') | KeyCode::Enter => {
                log_rejected(self.engine.show_controls());
            }
            KeyCode::Esc => {
                log_rejected(self.engine.go_to_menu());
            }
            _ => {}
        }
    }

    fn handle_controls_key(&mut self, code: KeyCode) {
        if matches!(code, KeyCode::Esc | KeyCode::Enter) {
            log_rejected(self.engine.go_to_menu());
        }
    }

    fn handle_playing_key(&mut self, code: KeyCode) {
        let engine = &mut self.engine;
        if engine.is_paused() {
            match code {
                KeyCode::Char('p') => engine.resume(),
                KeyCode::Char('r') => log_rejected(engine.new_game()),
                _ => {}
            }
            return;
        }
        match code {
            KeyCode::Left => _ = engine.on_move_left(),
            KeyCode::Right => _ = engine.on_move_right(),
            KeyCode::Up => _ = engine.on_rotate(),
            KeyCode::Down => _ = engine.on_soft_drop(),
            KeyCode::Char('p') => engine.pause(),
            _ => {}
        }
    }

    fn handle_game_over_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Enter | KeyCode::Char('r') => log_rejected(self.engine.new_game()),
            KeyCode::Char('m') | KeyCode::Esc => log_rejected(self.engine.go_to_menu()),
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.code == KeyCode::Char('q') {
            self.is_exiting = true;
            return;
        }
        match self.engine.phase() {
            Phase::Menu => self.handle_menu_key(key.code),
            Phase::Instructions => self.handle_instructions_key(key.code),
            Phase::Controls => self.handle_controls_key(key.code),
            Phase::Playing => self.handle_playing_key(key.code),
            Phase::GameOver => self.handle_game_over_key(key.code),
        }
    }

    /// Drop ticks run only while a game is in progress and not paused.
    fn sync_drop_timer(&self, runtime: &mut Runtime) {
        let running = self.engine.phase().is_playing() && !self.engine.is_paused();
        let interval = running.then(|| self.engine.drop_interval());
        if runtime.drop_interval() != interval {
            runtime.set_drop_interval(interval);
        }
    }
}

impl App for PlayApp {
    fn init(&mut self, runtime: &mut Runtime) {
        self.sync_drop_timer(runtime);
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, runtime: &mut Runtime, event: &Event) {
        if let Some(key) = event.as_key_event() {
            self.handle_key(key);
            self.sync_drop_timer(runtime);
        }
    }

    fn draw(&self, frame: &mut Frame) {
        match self.engine.phase() {
            Phase::Menu => screens::draw_menu(frame, self.selected),
            Phase::Instructions => screens::draw_text_screen(
                frame,
                " INSTRUCTIONS ",
                INSTRUCTIONS_TEXT,
                INSTRUCTIONS_BINDINGS,
            ),
            Phase::Controls => {
                screens::draw_text_screen(frame, " CONTROLS ", CONTROLS_TEXT, CONTROLS_BINDINGS);
            }
            Phase::Playing | Phase::GameOver => {
                screens::draw_game(frame, &self.engine, self.show_dots);
            }
        }
    }

    fn on_drop_tick(&mut self, runtime: &mut Runtime) {
        self.engine.on_drop_tick();
        self.sync_drop_timer(runtime);
    }
}
