//! prompter-app - Remote control and orchestration for prompter
//!
//! This crate implements the control channel end to end: the embedded HTTP
//! server, the command channel it publishes into, the server lifecycle, and
//! the TEA (The Elm Architecture) event loop that applies commands to the
//! display state. It also loads configuration and provides the platform
//! capabilities (LAN address lookup, sharing the control URL).

pub mod actions;
pub mod channel;
pub mod config;
pub mod engine;
pub mod engine_event;
pub mod handler;
pub mod input_key;
pub mod lifecycle;
pub mod message;
pub mod platform;
pub mod server;
pub mod signals;
pub mod state;

// Re-export primary types
pub use channel::{CommandChannel, CommandSubscription};
pub use engine::{Engine, Services};
pub use engine_event::EngineEvent;
pub use handler::{UpdateAction, UpdateResult};
pub use input_key::InputKey;
pub use lifecycle::{LifecycleController, ServerOptions, StartedServer};
pub use message::Message;
pub use state::{AppState, PairingAddress};
