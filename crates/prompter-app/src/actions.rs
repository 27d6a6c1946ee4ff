//! Background tasks spawned for `UpdateAction`s
//!
//! Every task reports back to the event loop through the message channel;
//! none of them touch `AppState` directly.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use prompter_core::prelude::*;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::lifecycle::LifecycleController;
use crate::message::Message;
use crate::platform::{self, AddressLookup, ShareTarget};

/// Handle to a running autoscroll task
#[derive(Debug)]
pub struct AutoscrollTask {
    generation: u64,
    cancel_tx: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl AutoscrollTask {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Stop ticking. Ticks already queued are left for the reducer to
    /// discard by generation.
    pub fn cancel(self) {
        let _ = self.cancel_tx.send(true);
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

/// Send `AutoscrollTick { generation }` every `interval`, first one after a
/// full interval.
///
/// The loop ends when cancelled, when the engine shuts down, or when the
/// message channel closes.
pub fn spawn_autoscroll(
    generation: u64,
    interval: Duration,
    msg_tx: mpsc::Sender<Message>,
    mut shutdown_rx: watch::Receiver<bool>,
) -> AutoscrollTask {
    let (cancel_tx, mut cancel_rx) = watch::channel(false);

    let handle = tokio::spawn(async move {
        let mut ticker = interval_at(Instant::now() + interval, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if msg_tx.send(Message::AutoscrollTick { generation }).await.is_err() {
                        break;
                    }
                }
                changed = cancel_rx.changed() => {
                    if changed.is_err() || *cancel_rx.borrow() {
                        break;
                    }
                }
                changed = shutdown_rx.changed() => {
                    if changed.is_err() || *shutdown_rx.borrow() {
                        break;
                    }
                }
            }
        }

        debug!("Autoscroll task {} finished", generation);
    });

    AutoscrollTask {
        generation,
        cancel_tx,
        handle,
    }
}

/// Start the control server and report the outcome
pub fn spawn_start_server(lifecycle: Arc<LifecycleController>, msg_tx: mpsc::Sender<Message>) {
    tokio::spawn(async move {
        let msg = match lifecycle.start().await {
            Ok(started) => Message::ServerStarted {
                local_addr: started.local_addr,
                events: started.events,
            },
            Err(e) => Message::ServerStartFailed {
                error: e.to_string(),
                state: lifecycle.state(),
            },
        };
        let _ = msg_tx.send(msg).await;
    });
}

/// Stop the control server and report the outcome
pub fn spawn_stop_server(lifecycle: Arc<LifecycleController>, msg_tx: mpsc::Sender<Message>) {
    tokio::spawn(async move {
        let msg = match lifecycle.stop().await {
            Ok(()) => Message::ServerStopped,
            Err(e) => Message::ServerStopFailed {
                error: e.to_string(),
                state: lifecycle.state(),
            },
        };
        let _ = msg_tx.send(msg).await;
    });
}

/// Resolve the control URL for `server_addr` on the blocking pool
pub fn spawn_address_lookup(
    server_addr: SocketAddr,
    lookup: Arc<dyn AddressLookup>,
    msg_tx: mpsc::Sender<Message>,
) {
    tokio::spawn(async move {
        let result = tokio::task::spawn_blocking(move || {
            platform::advertised_ip(server_addr, lookup.as_ref())
                .and_then(|ip| platform::control_url(ip, server_addr.port()))
        })
        .await;

        let msg = match result {
            Ok(Ok(url)) => Message::AddressResolved { server_addr, url },
            Ok(Err(e)) => Message::AddressLookupFailed {
                server_addr,
                error: e.to_string(),
            },
            Err(e) => Message::AddressLookupFailed {
                server_addr,
                error: Error::ip_lookup(e.to_string()).to_string(),
            },
        };
        let _ = msg_tx.send(msg).await;
    });
}

/// Share `url` on the blocking pool; only failures are reported
pub fn spawn_share(url: String, share: Arc<dyn ShareTarget>, msg_tx: mpsc::Sender<Message>) {
    tokio::spawn(async move {
        let result = tokio::task::spawn_blocking(move || share.share(&url)).await;

        let error = match result {
            Ok(Ok(())) => return,
            Ok(Err(e)) => e.to_string(),
            Err(e) => Error::share(e.to_string()).to_string(),
        };
        let _ = msg_tx.send(Message::ShareFailed { error }).await;
    });
}
