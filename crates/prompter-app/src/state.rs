//! Application state (Model in TEA pattern)

use std::net::SocketAddr;

use prompter_core::{AppPhase, DisplayState, ServerState};

use crate::config::Settings;

/// What the pairing overlay can tell the user about the control address
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PairingAddress {
    /// No server session
    #[default]
    Unknown,
    /// Server is up, address lookup in flight
    Resolving,
    /// Full control URL, e.g. `http://192.168.1.23:8080`
    Resolved(String),
    /// Lookup failed; shown instead of an address
    Failed(String),
}

impl PairingAddress {
    pub fn url(&self) -> Option<&str> {
        match self {
            PairingAddress::Resolved(url) => Some(url),
            _ => None,
        }
    }
}

/// Complete application state
#[derive(Debug, Default)]
pub struct AppState {
    pub phase: AppPhase,

    /// Everything the prompter body renders
    pub display: DisplayState,

    /// Mirrors the lifecycle controller
    pub server_state: ServerState,

    /// Address the running server is bound to
    pub server_addr: Option<SocketAddr>,

    pub pairing: PairingAddress,

    /// Bumped on every autoscroll start or cancel; ticks from an older
    /// generation are ignored
    pub autoscroll_generation: u64,

    /// Bumped on every text replacement, including identical text
    pub text_revision: u64,

    /// Most recent recoverable error, shown in the header
    pub last_error: Option<String>,

    pub settings: Settings,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state showing `text`, configured by `settings`
    pub fn with_settings(settings: Settings, text: impl Into<String>) -> Self {
        Self {
            display: DisplayState::with_text(text),
            settings,
            ..Default::default()
        }
    }

    pub fn should_quit(&self) -> bool {
        self.phase == AppPhase::Quitting
    }

    pub fn request_quit(&mut self) {
        self.phase = AppPhase::Quitting;
    }

    pub fn scroll_step(&self) -> u32 {
        self.settings.display.scroll_step
    }

    /// Control URL of the running server, once resolved
    pub fn control_url(&self) -> Option<&str> {
        self.pairing.url()
    }

    /// Invalidate any running autoscroll task and return the new generation
    pub fn next_autoscroll_generation(&mut self) -> u64 {
        self.autoscroll_generation = self.autoscroll_generation.wrapping_add(1);
        self.autoscroll_generation
    }
}
