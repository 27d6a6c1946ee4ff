//! # prompter-core - Core Domain Types
//!
//! Foundation crate for prompter. Provides the control event model, server
//! and display state types, error handling and logging setup.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, thiserror, tracing).
//!
//! ## Public API
//!
//! ### Events (`events`)
//! - [`ControlEvent`] - Closed set of commands a remote client can send
//!
//! ### Domain Types (`types`)
//! - [`ServerState`] - Control server lifecycle (Stopped, Loading, Running)
//! - [`DisplayState`] - Text, mirroring, autoscroll, scroll offset, overlay
//! - [`AppPhase`] - Running or quitting
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum with `fatal` vs `recoverable` classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use prompter_core::prelude::*;
//! ```

pub mod error;
pub mod events;
pub mod logging;
pub mod types;

/// Prelude for common imports used throughout all prompter crates
pub mod prelude {
    pub use super::error::{Error, Result, ResultExt};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

// Re-export commonly used types at crate root for convenience
pub use error::{Error, Result, ResultExt};
pub use events::ControlEvent;
pub use types::{
    AppPhase, DisplayState, ServerState, DEFAULT_AUTOSCROLL_INTERVAL_MS, DEFAULT_PORT,
    DEFAULT_SCROLL_STEP, SAMPLE_TEXT,
};
