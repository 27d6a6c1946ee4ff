//! Main TUI runner - entry point and event loop

use prompter_app::Engine;
use prompter_core::prelude::*;

use super::{event, render, terminal, widgets};

/// Run the terminal display until the user quits.
///
/// Starts the control server when configured to, renders after every batch
/// of messages, and stops the server before restoring the terminal.
pub async fn run(mut engine: Engine) -> Result<()> {
    terminal::install_panic_hook();
    let mut term = terminal::init()?;

    engine.auto_start();

    let result = run_loop(&mut term, &mut engine);
    if let Err(e) = &result {
        error!("TUI loop failed: {}", e);
    }

    engine.shutdown().await;
    ratatui::restore();

    result
}

/// Main event loop
fn run_loop(terminal: &mut ratatui::DefaultTerminal, engine: &mut Engine) -> Result<()> {
    let mut prompter = widgets::PrompterViewState::new();

    while !engine.should_quit() {
        // Remote commands, task results and signals queued since the last frame
        engine.drain_pending_messages();

        terminal.draw(|frame| render::view(frame, &engine.state, &mut prompter))?;

        if let Some(message) = event::poll()? {
            engine.process_message(message);
        }
    }

    info!("Leaving TUI loop");
    Ok(())
}
