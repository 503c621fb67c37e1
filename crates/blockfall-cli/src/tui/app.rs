use crossterm::event::Event;
use ratatui::Frame;

use crate::tui::Runtime;

/// Trait for applications driven by [`Runtime::run`].
pub trait App {
    /// Called once before the first event. Use this to set the drop interval.
    fn init(&mut self, runtime: &mut Runtime);

    fn should_exit(&self) -> bool;

    /// Handles terminal events (key input, resize, etc.).
    fn handle_event(&mut self, runtime: &mut Runtime, event: &Event);

    /// Draws the screen.
    fn draw(&self, frame: &mut Frame);

    /// Called every time the drop interval elapses.
    fn on_drop_tick(&mut self, runtime: &mut Runtime);
}
