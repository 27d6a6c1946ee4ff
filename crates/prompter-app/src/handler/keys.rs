//! Key event handlers

use prompter_core::ControlEvent;

use crate::input_key::InputKey;
use crate::message::Message;
use crate::state::AppState;

/// Convert key events to messages.
///
/// While the pairing overlay is up, Enter and Esc dismiss it; every other
/// key keeps its normal meaning.
pub fn handle_key(state: &AppState, key: InputKey) -> Option<Message> {
    if state.display.show_connection_overlay {
        if let Some(msg) = handle_key_overlay(key) {
            return Some(msg);
        }
    }
    handle_key_normal(key)
}

fn handle_key_overlay(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Enter | InputKey::Esc => Some(Message::DismissOverlay),
        _ => None,
    }
}

fn handle_key_normal(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Char('q') | InputKey::Esc => Some(Message::Quit),
        InputKey::CharCtrl('c') => Some(Message::Quit),

        InputKey::Char('s') => Some(Message::ToggleServer),
        InputKey::Char('o') => Some(Message::ShareAddress),

        InputKey::Char('m') => Some(Message::Control(ControlEvent::ToggleMirror)),
        InputKey::Char('a') => Some(Message::Control(ControlEvent::ToggleAutoscroll)),
        InputKey::Up | InputKey::Char('k') => Some(Message::Control(ControlEvent::ScrollUp)),
        InputKey::Down | InputKey::Char('j') => Some(Message::Control(ControlEvent::ScrollDown)),

        _ => None,
    }
}
