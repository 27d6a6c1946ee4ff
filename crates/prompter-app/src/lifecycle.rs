//! Control server lifecycle
//!
//! Wraps bind, serve and shutdown in the `Stopped → Loading → Running →
//! Loading → Stopped` state machine. Every transition out of a resting state
//! is claimed with a single `send_if_modified` on the state watch, so two
//! concurrent `start()` calls can never both reach the bind.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use prompter_core::prelude::*;
use prompter_core::ServerState;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::channel::{CommandChannel, CommandSubscription};
use crate::server::{self, PageSource, DEFAULT_MAX_BODY_BYTES};

/// Static options for every server session
#[derive(Debug, Clone)]
pub struct ServerOptions {
    pub bind_addr: SocketAddr,
    pub max_body_bytes: usize,
    /// Upper bound on waiting for in-flight requests during `stop()`
    pub shutdown_timeout: Duration,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], prompter_core::DEFAULT_PORT)),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            shutdown_timeout: Duration::from_millis(2000),
        }
    }
}

/// Returned by a successful [`LifecycleController::start`]
#[derive(Debug)]
pub struct StartedServer {
    /// Address the socket actually bound (resolves port 0)
    pub local_addr: SocketAddr,
    /// Consumer side of this session's command channel
    pub events: CommandSubscription,
}

struct RunningServer {
    local_addr: SocketAddr,
    channel: CommandChannel,
    shutdown_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

/// Owns the control server for the lifetime of the application.
///
/// Each `start()` creates a fresh [`CommandChannel`]; `stop()` closes it, so
/// nothing published in one session is ever delivered in the next.
pub struct LifecycleController {
    options: ServerOptions,
    page: Arc<dyn PageSource>,
    state_tx: watch::Sender<ServerState>,
    running: Mutex<Option<RunningServer>>,
}

impl LifecycleController {
    pub fn new(options: ServerOptions, page: Arc<dyn PageSource>) -> Self {
        let (state_tx, _) = watch::channel(ServerState::Stopped);
        Self {
            options,
            page,
            state_tx,
            running: Mutex::new(None),
        }
    }

    pub fn options(&self) -> &ServerOptions {
        &self.options
    }

    /// Current lifecycle state
    pub fn state(&self) -> ServerState {
        *self.state_tx.borrow()
    }

    /// Observe lifecycle transitions
    pub fn watch(&self) -> watch::Receiver<ServerState> {
        self.state_tx.subscribe()
    }

    /// Address of the running server, if any
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.running
            .lock()
            .ok()
            .and_then(|running| running.as_ref().map(|r| r.local_addr))
    }

    /// Bind and start serving.
    ///
    /// Only legal from `Stopped`; any other state yields
    /// [`Error::LifecycleBusy`] and leaves everything untouched. A bind failure
    /// returns the state to `Stopped`.
    pub async fn start(&self) -> Result<StartedServer> {
        self.claim(ServerState::Stopped, ServerState::Loading)?;
        info!("Starting control server on {}", self.options.bind_addr);

        let listener = match server::bind(self.options.bind_addr).await {
            Ok(listener) => listener,
            Err(e) => {
                warn!("{}", e);
                self.settle(ServerState::Stopped);
                return Err(e);
            }
        };

        let local_addr = match listener.local_addr() {
            Ok(addr) => addr,
            Err(e) => {
                self.settle(ServerState::Stopped);
                return Err(Error::bind(self.options.bind_addr, e));
            }
        };

        let channel = CommandChannel::new();
        let events = channel.subscribe();
        let app = server::router(channel.clone(), self.page.clone(), self.options.max_body_bytes);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let task = server::spawn_server(listener, app, shutdown_rx);

        if let Ok(mut running) = self.running.lock() {
            *running = Some(RunningServer {
                local_addr,
                channel,
                shutdown_tx,
                task,
            });
        }

        self.settle(ServerState::Running);
        info!("Control server listening on {}", local_addr);

        Ok(StartedServer { local_addr, events })
    }

    /// Stop serving and release the port.
    ///
    /// Only legal from `Running`. Closes the command channel first, then waits
    /// up to `shutdown_timeout` for in-flight requests before aborting the
    /// server task.
    pub async fn stop(&self) -> Result<()> {
        self.claim(ServerState::Running, ServerState::Loading)?;
        info!("Stopping control server");

        let running = self.running.lock().ok().and_then(|mut r| r.take());

        if let Some(mut server) = running {
            server.channel.close();
            let _ = server.shutdown_tx.send(true);

            match tokio::time::timeout(self.options.shutdown_timeout, &mut server.task).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => warn!("Control server task failed: {}", e),
                Err(_) => {
                    warn!(
                        "Control server did not stop within {:?}, aborting",
                        self.options.shutdown_timeout
                    );
                    server.task.abort();
                }
            }
        }

        self.settle(ServerState::Stopped);
        Ok(())
    }

    /// Atomically move `from → to`, or report the state that blocked it
    fn claim(&self, from: ServerState, to: ServerState) -> Result<()> {
        let mut observed = from;
        let claimed = self.state_tx.send_if_modified(|state| {
            if *state == from {
                *state = to;
                true
            } else {
                observed = *state;
                false
            }
        });

        if claimed {
            Ok(())
        } else {
            debug!("Lifecycle claim {} → {} refused in {}", from, to, observed);
            Err(Error::lifecycle_busy(observed))
        }
    }

    /// Leave `Loading` for a resting state
    fn settle(&self, next: ServerState) {
        self.state_tx.send_if_modified(|state| {
            if state.can_transition_to(next) {
                *state = next;
                true
            } else {
                warn!("Ignoring illegal lifecycle transition {} → {}", state, next);
                false
            }
        });
    }
}

impl Drop for LifecycleController {
    fn drop(&mut self) {
        if let Ok(mut running) = self.running.lock() {
            if let Some(server) = running.take() {
                server.channel.close();
                let _ = server.shutdown_tx.send(true);
                server.task.abort();
            }
        }
    }
}
