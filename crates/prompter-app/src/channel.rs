//! Command channel between the control server and the event loop
//!
//! HTTP handlers publish [`ControlEvent`]s from many tasks at once; the event
//! loop consumes them through a [`CommandSubscription`]. A single lock around
//! the subscriber list serializes publishes, so every subscriber observes the
//! same total order.
//!
//! Delivery is at-most-once: an event published while nobody is subscribed is
//! dropped, and a subscription only sees events published after it was
//! created. Per-subscriber queues are unbounded, so `publish` never waits.

use std::sync::{Arc, Mutex};

use prompter_core::prelude::*;
use prompter_core::ControlEvent;
use tokio::sync::mpsc;

#[derive(Debug, Default)]
struct Subscribers {
    senders: Vec<mpsc::UnboundedSender<ControlEvent>>,
    closed: bool,
}

/// Ordered multi-producer channel of control events.
///
/// Cheap to clone; clones share the same subscriber list.
#[derive(Debug, Clone, Default)]
pub struct CommandChannel {
    inner: Arc<Mutex<Subscribers>>,
}

impl CommandChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event for every live subscriber.
    ///
    /// Returns how many subscribers received it. `Ok(0)` means the event was
    /// dropped because no consumer is attached.
    pub fn publish(&self, event: ControlEvent) -> Result<usize> {
        let Ok(mut subscribers) = self.inner.lock() else {
            return Err(Error::channel_send("command channel lock poisoned"));
        };

        if subscribers.closed {
            return Err(Error::ChannelClosed);
        }

        subscribers.senders.retain(|tx| !tx.is_closed());

        let mut delivered = 0;
        for tx in &subscribers.senders {
            if tx.send(event.clone()).is_ok() {
                delivered += 1;
            }
        }

        if delivered == 0 {
            debug!("No subscriber attached, dropping {}", event.name());
        } else {
            trace!("Published {} to {} subscriber(s)", event.name(), delivered);
        }

        Ok(delivered)
    }

    /// Attach a consumer that receives every event published from now on.
    ///
    /// Subscribing to a closed channel yields a subscription that is already
    /// at its end.
    pub fn subscribe(&self) -> CommandSubscription {
        let (tx, rx) = mpsc::unbounded_channel();
        if let Ok(mut subscribers) = self.inner.lock() {
            if !subscribers.closed {
                subscribers.senders.push(tx);
            }
        }
        CommandSubscription { rx }
    }

    /// Reject further publishes and end every subscription.
    ///
    /// Events already queued in a subscription stay readable until it is
    /// dropped.
    pub fn close(&self) {
        if let Ok(mut subscribers) = self.inner.lock() {
            subscribers.closed = true;
            subscribers.senders.clear();
        }
    }

    pub fn is_closed(&self) -> bool {
        self.inner.lock().map(|s| s.closed).unwrap_or(true)
    }

    /// Number of subscribers that are still attached
    pub fn subscriber_count(&self) -> usize {
        self.inner
            .lock()
            .map(|s| s.senders.iter().filter(|tx| !tx.is_closed()).count())
            .unwrap_or(0)
    }
}

/// Receiving end of a [`CommandChannel`] for a single consumer
#[derive(Debug)]
pub struct CommandSubscription {
    rx: mpsc::UnboundedReceiver<ControlEvent>,
}

impl CommandSubscription {
    /// Wait for the next event. `None` once the channel is closed and drained.
    pub async fn recv(&mut self) -> Option<ControlEvent> {
        self.rx.recv().await
    }

    /// Take the next queued event without waiting
    pub fn try_recv(&mut self) -> Option<ControlEvent> {
        self.rx.try_recv().ok()
    }
}
