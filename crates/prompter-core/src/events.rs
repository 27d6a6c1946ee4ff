//! Control events sent by remote clients
//!
//! The set is closed: every route of the control server maps to exactly one
//! constructor here, and nothing else produces a `ControlEvent`.

use serde::Serialize;

/// A command received from a remote control client
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "text", rename_all = "snake_case")]
pub enum ControlEvent {
    ScrollUp,
    ScrollDown,
    ToggleMirror,
    ToggleAutoscroll,
    /// Replacement text body, exactly as received
    SetText(String),
    /// The control page was served, so a client has attached
    PageLoaded,
}

impl ControlEvent {
    /// The route that produces this event
    pub fn route(&self) -> &'static str {
        match self {
            ControlEvent::ScrollUp => "/up",
            ControlEvent::ScrollDown => "/down",
            ControlEvent::ToggleMirror => "/mirror",
            ControlEvent::ToggleAutoscroll => "/scroll",
            ControlEvent::SetText(_) => "/setText",
            ControlEvent::PageLoaded => "/",
        }
    }

    /// Stable label used in logs and headless output
    pub fn name(&self) -> &'static str {
        match self {
            ControlEvent::ScrollUp => "scroll_up",
            ControlEvent::ScrollDown => "scroll_down",
            ControlEvent::ToggleMirror => "toggle_mirror",
            ControlEvent::ToggleAutoscroll => "toggle_autoscroll",
            ControlEvent::SetText(_) => "set_text",
            ControlEvent::PageLoaded => "page_loaded",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routes_are_distinct() {
        let events = [
            ControlEvent::ScrollUp,
            ControlEvent::ScrollDown,
            ControlEvent::ToggleMirror,
            ControlEvent::ToggleAutoscroll,
            ControlEvent::SetText(String::new()),
            ControlEvent::PageLoaded,
        ];
        let mut routes: Vec<_> = events.iter().map(|e| e.route()).collect();
        routes.sort();
        routes.dedup();
        assert_eq!(routes.len(), events.len());
    }

    #[test]
    fn test_set_text_serializes_payload() {
        let json = serde_json::to_string(&ControlEvent::SetText("Hi".into())).unwrap();
        assert_eq!(json, r#"{"event":"set_text","text":"Hi"}"#);
    }

    #[test]
    fn test_unit_variant_serializes_tag_only() {
        let json = serde_json::to_string(&ControlEvent::ToggleMirror).unwrap();
        assert_eq!(json, r#"{"event":"toggle_mirror"}"#);
    }
}
