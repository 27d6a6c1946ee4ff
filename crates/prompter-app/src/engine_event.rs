//! Domain events emitted by the Engine for external consumers
//!
//! Events are broadcast after each message processing cycle via
//! `Engine::subscribe()`. The headless runner prints them as NDJSON.

use std::net::SocketAddr;

use prompter_core::ServerState;

/// State changes observed across one processed message.
///
/// Subscribers see a consistent view: every event from one cycle is sent
/// before the next message is processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    // ─────────────────────────────────────────────────────────
    // Server Lifecycle
    // ─────────────────────────────────────────────────────────
    /// The control server moved between Stopped, Loading and Running
    ServerStateChanged {
        old: ServerState,
        new: ServerState,
        /// Bound address while running
        addr: Option<SocketAddr>,
    },

    /// The pairing URL for the running server is known
    AddressResolved { url: String },

    /// The pairing URL could not be determined
    AddressLookupFailed { error: String },

    // ─────────────────────────────────────────────────────────
    // Display
    // ─────────────────────────────────────────────────────────
    /// Displayed text was replaced
    TextReplaced { len: usize },

    MirrorChanged { mirrored: bool },

    AutoscrollChanged { enabled: bool },

    ScrollChanged { offset: u32 },

    /// The pairing overlay was shown or hidden
    OverlayChanged { visible: bool },

    // ─────────────────────────────────────────────────────────
    // Engine Lifecycle
    // ─────────────────────────────────────────────────────────
    /// A recoverable error was reported
    Error { message: String },

    /// Engine is shutting down
    Shutdown,
}

impl EngineEvent {
    /// Returns a short string label for this event type (for logging/debugging).
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::ServerStateChanged { .. } => "server_state_changed",
            Self::AddressResolved { .. } => "address_resolved",
            Self::AddressLookupFailed { .. } => "address_lookup_failed",
            Self::TextReplaced { .. } => "text_replaced",
            Self::MirrorChanged { .. } => "mirror_changed",
            Self::AutoscrollChanged { .. } => "autoscroll_changed",
            Self::ScrollChanged { .. } => "scroll_changed",
            Self::OverlayChanged { .. } => "overlay_changed",
            Self::Error { .. } => "error",
            Self::Shutdown => "shutdown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_labels() {
        let event = EngineEvent::ServerStateChanged {
            old: ServerState::Loading,
            new: ServerState::Running,
            addr: None,
        };
        assert_eq!(event.event_type(), "server_state_changed");
        assert_eq!(EngineEvent::Shutdown.event_type(), "shutdown");
        assert_eq!(
            EngineEvent::TextReplaced { len: 3 }.event_type(),
            "text_replaced"
        );
    }
}
