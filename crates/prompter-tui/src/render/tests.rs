//! Full-screen rendering tests

use super::*;
use crate::test_utils::TestTerminal;
use crate::widgets::PrompterViewState;
use prompter_app::state::PairingAddress;
use prompter_core::ServerState;

#[test]
fn test_view_initial_screen() {
    let mut term = TestTerminal::new();
    let state = AppState::new();

    term.draw_with(|frame| view(frame, &state, &mut PrompterViewState::new()));

    assert!(term.buffer_contains("prompter"));
    assert!(term.buffer_contains("Stopped"));
    assert!(term.buffer_contains("Welcome to prompter."));
    assert!(!term.buffer_contains("Please use server at"));
}

#[test]
fn test_view_shows_overlay_when_running() {
    let mut term = TestTerminal::new();
    let mut state = AppState::new();
    state.server_state = ServerState::Running;
    state.pairing = PairingAddress::Resolved("http://192.168.1.23:8080".into());
    state.display.show_connection_overlay = true;

    term.draw_with(|frame| view(frame, &state, &mut PrompterViewState::new()));

    assert!(term.buffer_contains("Please use server at"));
    assert!(term.buffer_contains("http://192.168.1.23:8080"));
}

#[test]
fn test_view_after_overlay_dismissed() {
    let mut term = TestTerminal::new();
    let mut state = AppState::new();
    state.server_state = ServerState::Running;
    state.pairing = PairingAddress::Resolved("http://192.168.1.23:8080".into());
    state.display.show_connection_overlay = false;

    term.draw_with(|frame| view(frame, &state, &mut PrompterViewState::new()));

    assert!(!term.buffer_contains("Please use server at"));
    // Address stays visible in the header
    assert!(term.line_contains(1, "http://192.168.1.23:8080"));
}

#[test]
fn test_view_replaced_text() {
    let mut term = TestTerminal::new();
    let mut state = AppState::new();
    state.display.text = "Hello".into();

    term.draw_with(|frame| view(frame, &state, &mut PrompterViewState::new()));

    assert!(term.line_contains(3, "Hello"));
    assert!(!term.buffer_contains("Welcome"));
}

#[test]
fn test_view_empty_text() {
    let mut term = TestTerminal::new();
    let mut state = AppState::new();
    state.display.text = String::new();

    term.draw_with(|frame| view(frame, &state, &mut PrompterViewState::new()));

    assert!(term.buffer_contains("prompter"));
}

#[test]
fn test_view_compact_terminal() {
    let mut term = TestTerminal::compact();
    let mut state = AppState::new();
    state.display.show_connection_overlay = true;
    state.pairing = PairingAddress::Resolving;

    term.draw_with(|frame| view(frame, &state, &mut PrompterViewState::new()));

    assert!(term.buffer_contains("Please use server at"));
}
