//! Main update function - handles state transitions (TEA pattern)

use crate::message::Message;
use crate::state::AppState;

use super::{control, keys::handle_key, server_lifecycle, UpdateResult};

/// Process a message and update state
/// Returns optional follow-up message and/or action
pub fn update(state: &mut AppState, message: Message) -> UpdateResult {
    match message {
        Message::Quit => {
            state.request_quit();
            if state.display.autoscroll_enabled {
                control::stop_autoscroll(state)
            } else {
                UpdateResult::none()
            }
        }

        Message::Key(key) => match handle_key(state, key) {
            Some(msg) => UpdateResult::message(msg),
            None => UpdateResult::none(),
        },

        Message::Tick => UpdateResult::none(),

        // ─────────────────────────────────────────────────────────
        // Display Messages
        // ─────────────────────────────────────────────────────────
        Message::Control(event) => control::handle_control(state, event),
        Message::AutoscrollTick { generation } => control::handle_autoscroll_tick(state, generation),
        Message::DismissOverlay => {
            state.display.show_connection_overlay = false;
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Server Lifecycle Messages
        // ─────────────────────────────────────────────────────────
        Message::ToggleServer => server_lifecycle::handle_toggle_server(state),
        Message::StartServer => server_lifecycle::handle_start_server(state),
        Message::StopServer => server_lifecycle::handle_stop_server(state),
        Message::ServerStarted { local_addr, events } => {
            server_lifecycle::handle_server_started(state, local_addr, events)
        }
        Message::ServerStartFailed {
            error,
            state: lifecycle_state,
        } => server_lifecycle::handle_server_start_failed(state, error, lifecycle_state),
        Message::ServerStopped => server_lifecycle::handle_server_stopped(state),
        Message::ServerStopFailed {
            error,
            state: lifecycle_state,
        } => server_lifecycle::handle_server_stop_failed(state, error, lifecycle_state),

        // ─────────────────────────────────────────────────────────
        // Pairing Messages
        // ─────────────────────────────────────────────────────────
        Message::ResolveAddress => server_lifecycle::handle_resolve_address(state),
        Message::AddressResolved { server_addr, url } => {
            server_lifecycle::handle_address_resolved(state, server_addr, url)
        }
        Message::AddressLookupFailed { server_addr, error } => {
            server_lifecycle::handle_address_lookup_failed(state, server_addr, error)
        }
        Message::ShareAddress => server_lifecycle::handle_share_address(state),
        Message::ShareFailed { error } => {
            tracing::warn!("Share failed: {}", error);
            state.last_error = Some(error);
            UpdateResult::none()
        }
    }
}
