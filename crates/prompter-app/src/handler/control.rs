//! Control event handlers
//!
//! Remote commands and the equivalent local keys both arrive here as
//! [`ControlEvent`]s. Each event is applied completely before the next one.

use prompter_core::ControlEvent;
use tracing::{debug, trace};

use crate::state::AppState;

use super::{UpdateAction, UpdateResult};

pub fn handle_control(state: &mut AppState, event: ControlEvent) -> UpdateResult {
    trace!("Applying {}", event.name());

    match event {
        ControlEvent::ScrollUp => {
            let step = state.scroll_step();
            state.display.scroll_up(step);
            UpdateResult::none()
        }

        ControlEvent::ScrollDown => {
            let step = state.scroll_step();
            state.display.scroll_down(step);
            UpdateResult::none()
        }

        ControlEvent::ToggleMirror => {
            state.display.mirrored = !state.display.mirrored;
            UpdateResult::none()
        }

        ControlEvent::ToggleAutoscroll => {
            if state.display.autoscroll_enabled {
                stop_autoscroll(state)
            } else {
                start_autoscroll(state)
            }
        }

        ControlEvent::SetText(text) => {
            state.display.text = text;
            state.text_revision = state.text_revision.wrapping_add(1);
            UpdateResult::none()
        }

        ControlEvent::PageLoaded => {
            state.display.show_connection_overlay = false;
            UpdateResult::none()
        }
    }
}

/// Enable autoscroll under a new generation
pub fn start_autoscroll(state: &mut AppState) -> UpdateResult {
    state.display.autoscroll_enabled = true;
    let generation = state.next_autoscroll_generation();
    debug!("Autoscroll on (generation {})", generation);

    UpdateResult::action(UpdateAction::StartAutoscroll {
        generation,
        interval: state.settings.display.autoscroll_interval(),
    })
}

/// Disable autoscroll; ticks already queued become stale
pub fn stop_autoscroll(state: &mut AppState) -> UpdateResult {
    state.display.autoscroll_enabled = false;
    let generation = state.next_autoscroll_generation();
    debug!("Autoscroll off (now generation {})", generation);

    UpdateResult::action(UpdateAction::CancelAutoscroll)
}

pub fn handle_autoscroll_tick(state: &mut AppState, generation: u64) -> UpdateResult {
    if state.display.autoscroll_enabled && generation == state.autoscroll_generation {
        let step = state.scroll_step();
        state.display.scroll_down(step);
    } else {
        trace!(
            "Ignoring stale autoscroll tick (generation {}, current {})",
            generation,
            state.autoscroll_generation
        );
    }
    UpdateResult::none()
}
