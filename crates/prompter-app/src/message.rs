//! Message types for the application (TEA pattern)

use std::net::SocketAddr;

use prompter_core::{ControlEvent, ServerState};

use crate::channel::CommandSubscription;
use crate::input_key::InputKey;

/// All possible messages in the application.
///
/// Not `Clone`: [`Message::ServerStarted`] hands over the new session's
/// command subscription.
#[derive(Debug)]
pub enum Message {
    /// Keyboard event from the terminal
    Key(InputKey),

    /// Tick event for periodic updates
    Tick,

    /// Quit (key, signal handler or stdin)
    Quit,

    // ─────────────────────────────────────────────────────────
    // Display Messages
    // ─────────────────────────────────────────────────────────
    /// A control command, from a remote client or a local key
    Control(ControlEvent),

    /// One autoscroll step from the task started for `generation`
    AutoscrollTick { generation: u64 },

    /// Hide the pairing overlay without a client attaching
    DismissOverlay,

    // ─────────────────────────────────────────────────────────
    // Server Lifecycle Messages
    // ─────────────────────────────────────────────────────────
    /// Start the server if stopped, stop it if running
    ToggleServer,
    StartServer,
    StopServer,

    /// `start()` succeeded
    ServerStarted {
        local_addr: SocketAddr,
        events: CommandSubscription,
    },
    /// `start()` failed; `state` is the lifecycle state afterwards
    ServerStartFailed { error: String, state: ServerState },
    /// `stop()` finished and the port is released
    ServerStopped,
    /// `stop()` was refused; `state` is the lifecycle state afterwards
    ServerStopFailed { error: String, state: ServerState },

    // ─────────────────────────────────────────────────────────
    // Pairing Messages
    // ─────────────────────────────────────────────────────────
    /// Look up the LAN address of the running server
    ResolveAddress,
    /// The control URL for the server bound at `server_addr` is known
    AddressResolved { server_addr: SocketAddr, url: String },
    AddressLookupFailed {
        server_addr: SocketAddr,
        error: String,
    },
    /// Share the control URL (open it in a browser)
    ShareAddress,
    ShareFailed { error: String },
}
