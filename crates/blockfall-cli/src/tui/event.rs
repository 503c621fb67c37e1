use crossterm::event::Event as CrosstermEvent;

/// Events processed by TUI applications.
#[derive(Debug, Clone, derive_more::From)]
pub(super) enum TuiEvent {
    /// The drop interval elapsed.
    DropTick,
    /// The screen changed and should be redrawn.
    Render,
    /// Terminal events such as key input and resize.
    Crossterm(CrosstermEvent),
}
