//! Semantic style builders.

use prompter_core::ServerState;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders};

use super::palette;

// --- Text styles ---
pub fn text_primary() -> Style {
    Style::default().fg(palette::TEXT_PRIMARY)
}

pub fn text_secondary() -> Style {
    Style::default().fg(palette::TEXT_SECONDARY)
}

pub fn text_muted() -> Style {
    Style::default().fg(palette::TEXT_MUTED)
}

// --- Border styles ---
pub fn border_inactive() -> Style {
    Style::default().fg(palette::BORDER_DIM)
}

pub fn border_active() -> Style {
    Style::default().fg(palette::BORDER_ACTIVE)
}

// --- Accent styles ---
pub fn accent() -> Style {
    Style::default().fg(palette::ACCENT)
}

pub fn accent_bold() -> Style {
    Style::default()
        .fg(palette::ACCENT)
        .add_modifier(Modifier::BOLD)
}

pub fn status_red() -> Style {
    Style::default().fg(palette::STATUS_RED)
}

// --- Keybinding hint style ---
pub fn keybinding() -> Style {
    Style::default().fg(palette::STATUS_YELLOW)
}

// --- Block builders ---
pub fn glass_block(focused: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            border_active()
        } else {
            border_inactive()
        })
}

/// Icon, label and style for the server state badge
pub fn server_indicator(state: ServerState) -> (&'static str, &'static str, Style) {
    let color = match state {
        ServerState::Stopped => palette::STATUS_RED,
        ServerState::Loading => palette::STATUS_YELLOW,
        ServerState::Running => palette::STATUS_GREEN,
    };
    let icon = match state {
        ServerState::Stopped => "○",
        ServerState::Loading => "◐",
        ServerState::Running => "●",
    };
    (icon, state.label(), Style::default().fg(color))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_indicator_labels() {
        assert_eq!(server_indicator(ServerState::Stopped).1, "Stopped");
        assert_eq!(server_indicator(ServerState::Loading).1, "Working…");
        assert_eq!(server_indicator(ServerState::Running).1, "Running");
    }

    #[test]
    fn test_server_indicator_colors() {
        let (_, _, running) = server_indicator(ServerState::Running);
        let (_, _, stopped) = server_indicator(ServerState::Stopped);
        assert_eq!(running.fg, Some(palette::STATUS_GREEN));
        assert_eq!(stopped.fg, Some(palette::STATUS_RED));
    }
}
