//! Handler module - TEA update function and event handlers
//!
//! Organized into submodules:
//! - `update`: Main update() function and message dispatch
//! - `control`: Control events (remote or local) and autoscroll ticks
//! - `server_lifecycle`: Server start/stop and pairing address handlers
//! - `keys`: Key event handlers

pub(crate) mod control;
pub(crate) mod keys;
pub(crate) mod server_lifecycle;
pub(crate) mod update;


use std::net::SocketAddr;
use std::time::Duration;

use crate::channel::CommandSubscription;
use crate::message::Message;

// Re-export main entry point
pub use update::update;

#[cfg(test)]
pub(crate) use keys::handle_key;

/// Actions that the engine should perform after update
#[derive(Debug)]
pub enum UpdateAction {
    /// Run `LifecycleController::start` in the background
    StartServer,

    /// Cancel autoscroll, detach the command subscription, then run
    /// `LifecycleController::stop` in the background
    StopServer,

    /// Start consuming a fresh server session's command subscription
    AttachRemote { events: CommandSubscription },

    /// Replace any running autoscroll task with one for `generation`
    StartAutoscroll { generation: u64, interval: Duration },

    /// Stop the autoscroll task, if any
    CancelAutoscroll,

    /// Find the LAN address for the server bound at `server_addr`
    ResolveAddress { server_addr: SocketAddr },

    /// Hand the control URL to the share target
    ShareAddress { url: String },
}

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
    /// Optional action for the engine to perform
    pub action: Option<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: Message) -> Self {
        Self {
            message: Some(msg),
            action: None,
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            message: None,
            action: Some(action),
        }
    }

    /// Perform `action`, then process `msg`
    pub fn action_then(action: UpdateAction, msg: Message) -> Self {
        Self {
            message: Some(msg),
            action: Some(action),
        }
    }
}
