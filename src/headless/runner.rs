//! Headless mode runner - main event loop without TUI
//!
//! Processes messages like the TUI does and prints the resulting engine
//! events as NDJSON. Commands for the control server are read from stdin.

use std::io::BufRead;

use tokio::sync::{broadcast, mpsc};
use tracing::{error, info, warn};

use prompter_app::{Engine, EngineEvent, Message};
use prompter_core::prelude::*;

use super::HeadlessEvent;

/// Run in headless mode - output JSON events instead of TUI
pub async fn run_headless(mut engine: Engine) -> Result<()> {
    info!("prompter starting in headless mode");

    // Subscribe before anything can emit
    let mut events = engine.subscribe();

    let stdin_tx = engine.msg_sender();
    std::thread::spawn(move || {
        read_stdin_commands(std::io::stdin().lock(), stdin_tx);
    });

    engine.auto_start();
    flush_events(&mut events);

    let result = headless_event_loop(&mut engine, &mut events).await;
    if let Err(e) = &result {
        HeadlessEvent::error(e.to_string(), true).emit();
    }

    engine.shutdown().await;
    flush_events(&mut events);

    info!("prompter headless mode exiting");
    result
}

/// Main headless event loop
async fn headless_event_loop(
    engine: &mut Engine,
    events: &mut broadcast::Receiver<EngineEvent>,
) -> Result<()> {
    while !engine.should_quit() {
        match engine.next_message().await {
            Some(msg) => {
                engine.process_message(msg);
                flush_events(events);
            }
            None => {
                info!("Message channel closed");
                break;
            }
        }
    }

    Ok(())
}

/// Print every engine event received so far
fn flush_events(events: &mut broadcast::Receiver<EngineEvent>) {
    loop {
        match events.try_recv() {
            Ok(event) => HeadlessEvent::from(&event).emit(),
            Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                warn!("Headless output fell behind, {} events skipped", skipped);
            }
            Err(_) => break,
        }
    }
}

/// Map a line of stdin to a message
fn stdin_command(line: &str) -> Option<Message> {
    match line.trim() {
        "s" | "start" => Some(Message::StartServer),
        "x" | "stop" => Some(Message::StopServer),
        "q" | "quit" => Some(Message::Quit),
        "" => None,
        other => {
            warn!("Unknown stdin command: {}", other);
            None
        }
    }
}

/// Forward stdin commands until quit, EOF or a closed engine (blocking)
fn read_stdin_commands(reader: impl BufRead, msg_tx: mpsc::Sender<Message>) {
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                error!("Failed to read stdin: {}", e);
                break;
            }
        };

        let Some(msg) = stdin_command(&line) else {
            continue;
        };
        let quit = matches!(msg, Message::Quit);

        info!("Stdin: {:?}", msg);
        if msg_tx.blocking_send(msg).is_err() || quit {
            break;
        }
    }

    info!("Stdin reader exiting");
}
