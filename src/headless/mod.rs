//! Headless mode - JSON event output instead of the TUI
//!
//! Runs the engine without a terminal and writes every [`EngineEvent`] to
//! stdout as NDJSON (newline-delimited JSON), one event per line. Each event
//! has an "event" field naming its type and a millisecond "timestamp".
//!
//! # Example Output
//!
//! ```json
//! {"event":"server_state_changed","old":"stopped","new":"loading","addr":null,"timestamp":1704700001000}
//! {"event":"server_state_changed","old":"loading","new":"running","addr":"0.0.0.0:8080","timestamp":1704700001004}
//! {"event":"address_resolved","url":"http://192.168.1.23:8080","timestamp":1704700001010}
//! {"event":"text_replaced","length":5,"timestamp":1704700002000}
//! ```

pub mod runner;

use std::io::{self, Write};

use chrono::Utc;
use prompter_app::EngineEvent;
use prompter_core::ServerState;
use serde::Serialize;
use tracing::error;

pub use runner::run_headless;

/// Events emitted in headless mode
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HeadlessEvent {
    ServerStateChanged {
        old: ServerState,
        new: ServerState,
        addr: Option<String>,
        timestamp: i64,
    },

    AddressResolved { url: String, timestamp: i64 },

    AddressLookupFailed { error: String, timestamp: i64 },

    TextReplaced { length: usize, timestamp: i64 },

    MirrorChanged { mirrored: bool, timestamp: i64 },

    AutoscrollChanged { enabled: bool, timestamp: i64 },

    ScrollChanged { offset: u32, timestamp: i64 },

    OverlayChanged { visible: bool, timestamp: i64 },

    Error {
        message: String,
        fatal: bool,
        timestamp: i64,
    },

    Shutdown { timestamp: i64 },
}

impl HeadlessEvent {
    /// Emit this event to stdout as JSON
    pub fn emit(&self) {
        let mut stdout = io::stdout().lock();
        if let Err(e) = self.write_to(&mut stdout) {
            error!("Failed to write headless event to stdout: {}", e);
        }
    }

    /// Write this event as one NDJSON line and flush
    pub fn write_to(&self, out: &mut impl Write) -> io::Result<()> {
        serde_json::to_writer(&mut *out, self)?;
        writeln!(out)?;
        out.flush()
    }

    /// Get current timestamp in milliseconds
    fn now() -> i64 {
        Utc::now().timestamp_millis()
    }

    pub fn error(message: String, fatal: bool) -> Self {
        Self::Error {
            message,
            fatal,
            timestamp: Self::now(),
        }
    }
}

impl From<&EngineEvent> for HeadlessEvent {
    fn from(event: &EngineEvent) -> Self {
        let timestamp = Self::now();
        match event {
            EngineEvent::ServerStateChanged { old, new, addr } => Self::ServerStateChanged {
                old: *old,
                new: *new,
                addr: addr.map(|a| a.to_string()),
                timestamp,
            },
            EngineEvent::AddressResolved { url } => Self::AddressResolved {
                url: url.clone(),
                timestamp,
            },
            EngineEvent::AddressLookupFailed { error } => Self::AddressLookupFailed {
                error: error.clone(),
                timestamp,
            },
            EngineEvent::TextReplaced { len } => Self::TextReplaced {
                length: *len,
                timestamp,
            },
            EngineEvent::MirrorChanged { mirrored } => Self::MirrorChanged {
                mirrored: *mirrored,
                timestamp,
            },
            EngineEvent::AutoscrollChanged { enabled } => Self::AutoscrollChanged {
                enabled: *enabled,
                timestamp,
            },
            EngineEvent::ScrollChanged { offset } => Self::ScrollChanged {
                offset: *offset,
                timestamp,
            },
            EngineEvent::OverlayChanged { visible } => Self::OverlayChanged {
                visible: *visible,
                timestamp,
            },
            EngineEvent::Error { message } => Self::Error {
                message: message.clone(),
                fatal: false,
                timestamp,
            },
            EngineEvent::Shutdown => Self::Shutdown { timestamp },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::SocketAddr;

    fn to_value(event: &HeadlessEvent) -> serde_json::Value {
        let mut out = Vec::new();
        event.write_to(&mut out).expect("write failed");
        let line = String::from_utf8(out).expect("not UTF-8");
        assert!(line.ends_with('\n'), "NDJSON lines end with a newline");
        assert_eq!(line.matches('\n').count(), 1, "one event per line");
        serde_json::from_str(line.trim_end()).expect("invalid JSON")
    }

    #[test]
    fn test_server_state_changed_serialization() {
        let addr: SocketAddr = "0.0.0.0:8080".parse().unwrap();
        let event = HeadlessEvent::from(&EngineEvent::ServerStateChanged {
            old: ServerState::Loading,
            new: ServerState::Running,
            addr: Some(addr),
        });

        let value = to_value(&event);

        assert_eq!(value["event"], "server_state_changed");
        assert_eq!(value["old"], "loading");
        assert_eq!(value["new"], "running");
        assert_eq!(value["addr"], "0.0.0.0:8080");
        assert!(value["timestamp"].is_number());
    }

    #[test]
    fn test_stopped_state_has_null_addr() {
        let event = HeadlessEvent::from(&EngineEvent::ServerStateChanged {
            old: ServerState::Loading,
            new: ServerState::Stopped,
            addr: None,
        });

        let value = to_value(&event);

        assert_eq!(value["new"], "stopped");
        assert!(value["addr"].is_null());
    }

    #[test]
    fn test_address_resolved_serialization() {
        let event = HeadlessEvent::from(&EngineEvent::AddressResolved {
            url: "http://192.168.1.23:8080".into(),
        });

        let value = to_value(&event);

        assert_eq!(value["event"], "address_resolved");
        assert_eq!(value["url"], "http://192.168.1.23:8080");
    }

    #[test]
    fn test_text_replaced_serialization() {
        let event = HeadlessEvent::from(&EngineEvent::TextReplaced { len: 5 });

        let value = to_value(&event);

        assert_eq!(value["event"], "text_replaced");
        assert_eq!(value["length"], 5);
    }

    #[test]
    fn test_display_change_serialization() {
        let value = to_value(&HeadlessEvent::from(&EngineEvent::MirrorChanged {
            mirrored: true,
        }));
        assert_eq!(value["event"], "mirror_changed");
        assert_eq!(value["mirrored"], true);

        let value = to_value(&HeadlessEvent::from(&EngineEvent::ScrollChanged {
            offset: 400,
        }));
        assert_eq!(value["event"], "scroll_changed");
        assert_eq!(value["offset"], 400);

        let value = to_value(&HeadlessEvent::from(&EngineEvent::OverlayChanged {
            visible: false,
        }));
        assert_eq!(value["event"], "overlay_changed");
        assert_eq!(value["visible"], false);
    }

    #[test]
    fn test_engine_error_is_not_fatal() {
        let event = HeadlessEvent::from(&EngineEvent::Error {
            message: "Failed to bind 0.0.0.0:8080".into(),
        });

        let value = to_value(&event);

        assert_eq!(value["event"], "error");
        assert_eq!(value["fatal"], false);
        assert_eq!(value["message"], "Failed to bind 0.0.0.0:8080");
    }

    #[test]
    fn test_shutdown_serialization() {
        let value = to_value(&HeadlessEvent::from(&EngineEvent::Shutdown));
        assert_eq!(value["event"], "shutdown");
        assert!(value["timestamp"].is_number());
    }
}
