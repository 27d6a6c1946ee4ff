//! Command-line arguments and how they combine with the config file

use std::net::IpAddr;
use std::path::PathBuf;

use clap::Parser;
use prompter_app::config::{self, Settings};
use prompter_core::prelude::*;

/// prompter - A network-controlled teleprompter for the terminal
#[derive(Parser, Debug, Default)]
#[command(name = "prompter")]
#[command(about = "A network-controlled teleprompter for the terminal", long_about = None)]
pub struct Args {
    /// Port for the control server
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Address the control server binds to
    #[arg(short, long, value_name = "ADDR")]
    pub bind: Option<IpAddr>,

    /// Text file to show instead of the sample text
    #[arg(short, long, value_name = "FILE")]
    pub text: Option<PathBuf>,

    /// Config file (defaults to <config dir>/prompter/config.toml)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Don't start the control server at launch
    #[arg(long)]
    pub no_auto_start: bool,

    /// Run in headless mode (JSON output, no TUI)
    #[arg(long)]
    pub headless: bool,
}

impl Args {
    /// Apply flags on top of file settings
    pub fn apply_to(&self, settings: &mut Settings) {
        if let Some(port) = self.port {
            settings.server.port = port;
        }
        if let Some(bind) = self.bind {
            settings.server.bind_address = bind;
        }
        if let Some(text) = &self.text {
            settings.display.initial_text_path = Some(text.clone());
        }
        if self.no_auto_start {
            settings.server.auto_start = false;
        }
    }

    /// Settings from the config file with flags applied
    pub fn settings(&self) -> Settings {
        let mut settings = config::load_settings(self.config.as_deref());
        self.apply_to(&mut settings);
        settings
    }

    /// Text to display at startup.
    ///
    /// A file named on the command line must be readable; one named in the
    /// config file falls back to the sample text.
    pub fn initial_text(&self, settings: &Settings) -> Result<String> {
        match &self.text {
            Some(path) => config::read_text_file(path)
                .with_context(|| format!("--text {} can't be shown", path.display())),
            None => Ok(config::load_initial_text(settings)),
        }
    }
}
