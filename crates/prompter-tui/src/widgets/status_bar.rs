//! Status line widget
//!
//! Shows the last recoverable error when there is one, key hints otherwise.

use prompter_app::state::AppState;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use crate::theme::styles;

const KEY_HINTS: &[(&str, &str)] = &[
    ("s", "Start/Stop"),
    ("m", "Mirror"),
    ("a", "Autoscroll"),
    ("↑↓", "Scroll"),
    ("o", "Open URL"),
    ("q", "Quit"),
];

pub struct StatusBar<'a> {
    state: &'a AppState,
}

impl<'a> StatusBar<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    fn hints_line() -> Line<'static> {
        let mut spans = vec![Span::raw(" ")];
        for (key, action) in KEY_HINTS {
            spans.push(Span::styled("[", styles::text_muted()));
            spans.push(Span::styled(*key, styles::keybinding()));
            spans.push(Span::styled(format!("] {}  ", action), styles::text_muted()));
        }
        Line::from(spans)
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let line = match &self.state.last_error {
            Some(error) => Line::from(vec![
                Span::raw(" "),
                Span::styled(format!("✗ {}", error), styles::status_red()),
            ]),
            None => Self::hints_line(),
        };

        buf.set_line(area.x, area.y, &line, area.width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;

    #[test]
    fn test_status_bar_shows_key_hints() {
        let mut term = TestTerminal::with_size(100, 1);
        let state = AppState::new();

        term.render_widget(StatusBar::new(&state), term.area());

        assert!(term.buffer_contains("Start/Stop"));
        assert!(term.buffer_contains("Mirror"));
        assert!(term.buffer_contains("Quit"));
    }

    #[test]
    fn test_status_bar_prefers_last_error() {
        let mut term = TestTerminal::with_size(100, 1);
        let mut state = AppState::new();
        state.last_error = Some("Failed to bind 0.0.0.0:8080".into());

        term.render_widget(StatusBar::new(&state), term.area());

        assert!(term.buffer_contains("Failed to bind 0.0.0.0:8080"));
        assert!(!term.buffer_contains("Start/Stop"));
    }
}
