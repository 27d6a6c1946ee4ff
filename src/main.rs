//! prompter - A network-controlled teleprompter for the terminal
//!
//! This is the binary entry point. All logic lives in the library.

use clap::Parser;
use prompter::cli::Args;
use prompter_app::Engine;
use tracing::info;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();

    prompter_core::logging::init()?;

    let settings = args.settings();
    let text = args.initial_text(&settings)?;
    info!(
        "Control server on {} (auto_start={})",
        settings.server.socket_addr(),
        settings.server.auto_start
    );

    let engine = Engine::new(settings, text);

    if args.headless {
        prompter::run_headless(engine).await?;
    } else {
        prompter::run(engine).await?;
    }

    Ok(())
}
