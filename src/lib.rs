//! prompter library
//!
//! A network-controlled teleprompter. The terminal display lives in
//! `prompter-tui`; this crate adds the headless runner and the glue the
//! binary uses to build an engine from configuration and flags.

pub mod cli;
pub mod headless;

// Re-export main entry points
pub use headless::run_headless;
pub use prompter_tui::run;
