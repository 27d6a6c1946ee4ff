//! Main render/view function (View in TEA pattern)

#[cfg(test)]
mod tests;

use prompter_app::state::AppState;
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

use super::{layout, widgets};
use crate::theme::palette;

/// Render the complete UI (View function in TEA)
///
/// Reads the app state and never modifies it. `prompter` holds the wrapped
/// rows between frames.
pub fn view(frame: &mut Frame, state: &AppState, prompter: &mut widgets::PrompterViewState) {
    let area = frame.area();

    let bg_block = Block::default().style(Style::default().bg(palette::DEEPEST_BG));
    frame.render_widget(bg_block, area);

    let areas = layout::create(area);

    frame.render_widget(widgets::MainHeader::new(state), areas.header);
    frame.render_stateful_widget(
        widgets::PrompterView::new(&state.display, state.text_revision),
        areas.body,
        prompter,
    );
    frame.render_widget(widgets::StatusBar::new(state), areas.status);

    if state.display.show_connection_overlay {
        frame.render_widget(widgets::PairingOverlay::new(&state.pairing), area);
    }
}
