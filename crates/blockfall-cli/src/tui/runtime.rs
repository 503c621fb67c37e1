use std::{io, time::Duration};

use crate::tui::{App, event::TuiEvent, event_loop::EventLoop};

/// Terminal runtime: owns the event loop and dispatches its events to an [`App`].
#[derive(Default, Debug)]
pub struct Runtime {
    events: EventLoop,
}

impl Runtime {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how often [`App::on_drop_tick`] is called; `None` stops the ticks.
    pub fn set_drop_interval(&mut self, interval: Option<Duration>) {
        self.events.set_drop_interval(interval);
    }

    #[must_use]
    pub fn drop_interval(&self) -> Option<Duration> {
        self.events.drop_interval()
    }

    /// Runs `app` until [`App::should_exit`] returns true.
    pub fn run<A>(mut self, app: &mut A) -> io::Result<()>
    where
        A: App,
    {
        app.init(&mut self);

        ratatui::run(|terminal| {
            while !app.should_exit() {
                match self.events.next()? {
                    TuiEvent::DropTick => app.on_drop_tick(&mut self),
                    TuiEvent::Render => {
                        terminal.draw(|frame| app.draw(frame))?;
                    }
                    TuiEvent::Crossterm(event) => app.handle_event(&mut self, &event),
                }
            }
            Ok(())
        })
    }
}
