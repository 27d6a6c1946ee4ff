//! Core domain types

use serde::Serialize;

/// Default port of the control server
pub const DEFAULT_PORT: u16 = 8080;

/// Scroll distance applied by one ScrollUp/ScrollDown, in display units
pub const DEFAULT_SCROLL_STEP: u32 = 200;

/// Interval between autoscroll steps
pub const DEFAULT_AUTOSCROLL_INTERVAL_MS: u64 = 1000;

/// Text shown until a client replaces it
pub const SAMPLE_TEXT: &str = "\
Welcome to prompter.

Open the address shown on screen from a phone or tablet on the same network \
to control this display remotely.

Use the up and down buttons to move through your script, toggle mirroring \
when reading through a beam splitter, and start autoscroll to let the text \
roll at a steady pace.

Paste your own script into the text box on the control page and press send \
to replace this text.";

/// Lifecycle of the control server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ServerState {
    #[default]
    Stopped,
    /// A start or stop is in progress
    Loading,
    Running,
}

impl ServerState {
    /// Whether moving from `self` to `next` is a legal transition.
    ///
    /// Stopped and Running are never adjacent: every change passes
    /// through Loading.
    pub fn can_transition_to(self, next: ServerState) -> bool {
        matches!(
            (self, next),
            (ServerState::Stopped, ServerState::Loading)
                | (ServerState::Loading, ServerState::Running)
                | (ServerState::Loading, ServerState::Stopped)
                | (ServerState::Running, ServerState::Loading)
        )
    }

    pub fn is_running(self) -> bool {
        self == ServerState::Running
    }

    pub fn is_transitioning(self) -> bool {
        self == ServerState::Loading
    }

    /// Short label for status displays
    pub fn label(self) -> &'static str {
        match self {
            ServerState::Stopped => "Stopped",
            ServerState::Loading => "Working…",
            ServerState::Running => "Running",
        }
    }
}

impl std::fmt::Display for ServerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServerState::Stopped => write!(f, "stopped"),
            ServerState::Loading => write!(f, "loading"),
            ServerState::Running => write!(f, "running"),
        }
    }
}

/// What the prompter currently shows.
///
/// Written only by the event loop; renderers read it after each message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayState {
    pub text: String,
    pub mirrored: bool,
    pub autoscroll_enabled: bool,
    /// Distance from the top of the text, in display units
    pub scroll_offset: u32,
    pub show_connection_overlay: bool,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self::with_text(SAMPLE_TEXT)
    }
}

impl DisplayState {
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            mirrored: false,
            autoscroll_enabled: false,
            scroll_offset: 0,
            show_connection_overlay: false,
        }
    }

    pub fn scroll_up(&mut self, step: u32) {
        self.scroll_offset = self.scroll_offset.saturating_sub(step);
    }

    pub fn scroll_down(&mut self, step: u32) {
        self.scroll_offset = self.scroll_offset.saturating_add(step);
    }
}

/// Overall application phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppPhase {
    #[default]
    Running,
    Quitting,
}
