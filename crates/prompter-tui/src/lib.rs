//! prompter-tui - Terminal UI for prompter
//!
//! This crate provides the ratatui-based display. It drives an Engine from
//! prompter-app and adds terminal rendering, key polling, and the prompter,
//! header and pairing overlay widgets.

pub mod event;
pub mod layout;
pub mod render;
pub mod runner;
pub mod terminal;
pub mod theme;
pub mod widgets;

#[cfg(test)]
pub mod test_utils;

// Re-export main entry point
pub use runner::run;
