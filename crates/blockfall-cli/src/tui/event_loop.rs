use std::time::{Duration, Instant};

use crossterm::event;

use crate::tui::event::TuiEvent;

/// Event loop state.
///
/// Yields a drop tick each time the drop interval elapses, a render after
/// anything that may have changed the screen, and terminal events otherwise.
#[derive(Debug)]
pub(super) struct EventLoop {
    drop_interval: Option<Duration>,
    last_drop: Instant,
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLoop {
    /// Creates an event loop without drop ticks.
    pub(super) fn new() -> Self {
        Self {
            drop_interval: None,
            last_drop: Instant::now(),
            dirty: true, // first frame
        }
    }

    /// Sets the drop interval; `None` stops drop ticks.
    ///
    /// Turning ticks back on restarts the timer, so a resumed game waits a
    /// full interval before its next drop.
    pub(super) fn set_drop_interval(&mut self, interval: Option<Duration>) {
        if self.drop_interval.is_none() && interval.is_some() {
            self.last_drop = Instant::now();
        }
        self.drop_interval = interval;
    }

    pub(super) fn drop_interval(&self) -> Option<Duration> {
        self.drop_interval
    }

    /// Returns the next event, blocking until one is due.
    pub(super) fn next(&mut self) -> std::io::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if let Some(interval) = self.drop_interval
                && now.duration_since(self.last_drop) >= interval
            {
                self.last_drop = now;
                self.dirty = true;
                return Ok(TuiEvent::DropTick);
            }

            if self.dirty {
                self.dirty = false;
                return Ok(TuiEvent::Render);
            }

            if let Some(timeout) = self.compute_timeout(now)
                && !event::poll(timeout)?
            {
                continue;
            }

            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }

    fn compute_timeout(&self, now: Instant) -> Option<Duration> {
        let next_drop_at = self.last_drop + self.drop_interval?;
        Some(next_drop_at.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_timeout_without_drop_interval() {
        let events = EventLoop::new();
        assert_eq!(events.compute_timeout(Instant::now()), None);
    }

    #[test]
    fn test_timeout_counts_down_to_next_drop() {
        let mut events = EventLoop::new();
        events.set_drop_interval(Some(Duration::from_millis(500)));
        let now = events.last_drop + Duration::from_millis(200);
        assert_eq!(
            events.compute_timeout(now),
            Some(Duration::from_millis(300))
        );
        let late = events.last_drop + Duration::from_secs(1);
        assert_eq!(events.compute_timeout(late), Some(Duration::ZERO));
    }

    #[test]
    fn test_enabling_ticks_restarts_timer() {
        let mut events = EventLoop::new();
        let before = events.last_drop;
        events.set_drop_interval(Some(Duration::from_millis(500)));
        let started = events.last_drop;
        assert!(started >= before);

        events.set_drop_interval(Some(Duration::from_millis(250)));
        assert_eq!(events.last_drop, started);
        assert_eq!(events.drop_interval(), Some(Duration::from_millis(250)));
    }

    #[test]
    fn test_first_event_is_render() {
        let mut events = EventLoop::new();
        assert!(matches!(events.next().unwrap(), TuiEvent::Render));
    }
}
