use ratatui::{
    prelude::{Buffer, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// Keys and what they do, e.g. `(&["←", "→"], "Move")`.
pub type KeyBinding<'a> = (&'a [&'a str], &'a str);

/// One-line help bar listing key bindings.
#[derive(Debug)]
pub struct KeyBindingDisplay<'a> {
    bindings: &'a [KeyBinding<'a>],
}

impl<'a> KeyBindingDisplay<'a> {
    pub fn new(bindings: &'a [KeyBinding<'a>]) -> Self {
        Self { bindings }
    }

    fn line(&self) -> Line<'a> {
        let mut spans = vec![];
        for (i, (keys, desc)) in self.bindings.iter().copied().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" | ", SEPARATOR_STYLE));
            }
            for (j, key) in keys.iter().copied().enumerate() {
                if j > 0 {
                    spans.push(Span::styled("/", SEPARATOR_STYLE));
                }
                spans.push(Span::styled(key, KEY_STYLE));
            }
            spans.push(Span::raw(" "));
            spans.push(Span::styled(desc, DESCRIPTION_STYLE));
        }
        Line::from(spans).centered()
    }
}

const KEY_STYLE: Style = Style::new().fg(Color::Cyan);
const SEPARATOR_STYLE: Style = Style::new().fg(Color::DarkGray);
const DESCRIPTION_STYLE: Style = Style::new().fg(Color::Gray);

impl Widget for KeyBindingDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.line().render(area, buf);
    }
}
