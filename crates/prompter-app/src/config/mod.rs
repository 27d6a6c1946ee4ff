//! Configuration file parsing for prompter
//!
//! Settings are read once at startup from `config.toml` and never written
//! back. Command-line flags are applied on top by the binary.

pub mod settings;
pub mod types;

pub use settings::{
    default_config_path, load_initial_text, load_settings, read_text_file, CONFIG_DIR,
    CONFIG_FILENAME,
};
pub use types::*;
