//! Server lifecycle and pairing handlers
//!
//! `server_state` follows the lifecycle controller: it moves to `Loading` when
//! a start or stop is dispatched and settles when the background task reports
//! back.

use std::net::SocketAddr;

use prompter_core::ServerState;
use tracing::{debug, info, warn};

use crate::channel::CommandSubscription;
use crate::message::Message;
use crate::state::{AppState, PairingAddress};

use super::{control, UpdateAction, UpdateResult};

pub fn handle_toggle_server(state: &mut AppState) -> UpdateResult {
    match state.server_state {
        ServerState::Stopped => UpdateResult::message(Message::StartServer),
        ServerState::Running => UpdateResult::message(Message::StopServer),
        ServerState::Loading => {
            debug!("Server is busy, ignoring toggle");
            UpdateResult::none()
        }
    }
}

pub fn handle_start_server(state: &mut AppState) -> UpdateResult {
    if state.server_state != ServerState::Stopped {
        debug!("Server is {}, ignoring start", state.server_state);
        return UpdateResult::none();
    }

    state.server_state = ServerState::Loading;
    state.last_error = None;
    UpdateResult::action(UpdateAction::StartServer)
}

pub fn handle_stop_server(state: &mut AppState) -> UpdateResult {
    if state.server_state != ServerState::Running {
        debug!("Server is {}, ignoring stop", state.server_state);
        return UpdateResult::none();
    }

    state.server_state = ServerState::Loading;
    state.display.show_connection_overlay = false;
    state.pairing = PairingAddress::Unknown;

    // Invalidate queued ticks; the engine cancels the task itself
    if state.display.autoscroll_enabled {
        let _ = control::stop_autoscroll(state);
    }

    UpdateResult::action(UpdateAction::StopServer)
}

pub fn handle_server_started(
    state: &mut AppState,
    local_addr: SocketAddr,
    events: CommandSubscription,
) -> UpdateResult {
    info!("Control server running on {}", local_addr);

    state.server_state = ServerState::Running;
    state.server_addr = Some(local_addr);
    state.display.show_connection_overlay = true;
    state.pairing = PairingAddress::Resolving;

    UpdateResult::action_then(UpdateAction::AttachRemote { events }, Message::ResolveAddress)
}

pub fn handle_server_start_failed(
    state: &mut AppState,
    error: String,
    lifecycle_state: ServerState,
) -> UpdateResult {
    warn!("Control server failed to start: {}", error);
    state.server_state = lifecycle_state;
    state.last_error = Some(error);
    UpdateResult::none()
}

pub fn handle_server_stopped(state: &mut AppState) -> UpdateResult {
    info!("Control server stopped");
    state.server_state = ServerState::Stopped;
    state.server_addr = None;
    state.pairing = PairingAddress::Unknown;
    state.display.show_connection_overlay = false;
    UpdateResult::none()
}

pub fn handle_server_stop_failed(
    state: &mut AppState,
    error: String,
    lifecycle_state: ServerState,
) -> UpdateResult {
    warn!("Control server failed to stop: {}", error);
    state.server_state = lifecycle_state;
    state.last_error = Some(error);
    UpdateResult::none()
}

pub fn handle_resolve_address(state: &mut AppState) -> UpdateResult {
    match (state.server_state, state.server_addr) {
        (ServerState::Running, Some(server_addr)) => {
            state.pairing = PairingAddress::Resolving;
            UpdateResult::action(UpdateAction::ResolveAddress { server_addr })
        }
        _ => UpdateResult::none(),
    }
}

pub fn handle_address_resolved(
    state: &mut AppState,
    server_addr: SocketAddr,
    url: String,
) -> UpdateResult {
    if state.server_addr == Some(server_addr) {
        info!("Control URL: {}", url);
        state.pairing = PairingAddress::Resolved(url);
    } else {
        debug!("Dropping address for stale server {}", server_addr);
    }
    UpdateResult::none()
}

pub fn handle_address_lookup_failed(
    state: &mut AppState,
    server_addr: SocketAddr,
    error: String,
) -> UpdateResult {
    if state.server_addr == Some(server_addr) {
        warn!("{}", error);
        state.pairing = PairingAddress::Failed(error);
    }
    UpdateResult::none()
}

pub fn handle_share_address(state: &mut AppState) -> UpdateResult {
    match state.control_url() {
        Some(url) => UpdateResult::action(UpdateAction::ShareAddress {
            url: url.to_string(),
        }),
        None => {
            debug!("No control URL to share");
            UpdateResult::none()
        }
    }
}
