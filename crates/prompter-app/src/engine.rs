//! Engine - shared orchestration state for TUI and headless runners
//!
//! The Engine owns the application state, the message channel, the control
//! server lifecycle and the command subscription of the running server
//! session. It is the only writer of [`AppState`]: messages from every source
//! (keys, signals, background tasks, remote clients) are applied one at a time
//! through [`handler::update`].

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc, watch};

use prompter_core::prelude::*;
use prompter_core::ServerState;

use crate::actions::{self, AutoscrollTask};
use crate::channel::CommandSubscription;
use crate::config::Settings;
use crate::engine_event::EngineEvent;
use crate::handler::{self, UpdateAction};
use crate::lifecycle::{LifecycleController, ServerOptions};
use crate::message::Message;
use crate::platform::{AddressLookup, BrowserShare, FixedAddress, RouteProbeLookup, ShareTarget};
use crate::server::{EmbeddedPage, FilePage, PageSource};
use crate::signals;
use crate::state::{AppState, PairingAddress};

/// Upper bound on waiting for an in-flight start or stop during shutdown
const SHUTDOWN_SETTLE_TIMEOUT: Duration = Duration::from_secs(2);

/// Platform capabilities used by the engine
#[derive(Clone)]
pub struct Services {
    pub page: Arc<dyn PageSource>,
    pub lookup: Arc<dyn AddressLookup>,
    pub share: Arc<dyn ShareTarget>,
}

impl Services {
    /// Capabilities chosen by the settings
    pub fn from_settings(settings: &Settings) -> Self {
        let page: Arc<dyn PageSource> = match &settings.server.page_path {
            Some(path) => Arc::new(FilePage::new(path)),
            None => Arc::new(EmbeddedPage),
        };
        let lookup: Arc<dyn AddressLookup> = match settings.server.advertise_address {
            Some(ip) => Arc::new(FixedAddress(ip)),
            None => Arc::new(RouteProbeLookup),
        };
        let share = Arc::new(BrowserShare {
            browser: settings.share.browser.clone(),
        });

        Self {
            page,
            lookup,
            share,
        }
    }
}

/// Lightweight snapshot of state for change detection.
///
/// Captured before message processing, compared after to detect
/// what changed and emit appropriate EngineEvents.
#[derive(Debug, Clone, PartialEq)]
struct StateSnapshot {
    server_state: ServerState,
    server_addr: Option<std::net::SocketAddr>,
    pairing: PairingAddress,
    text_revision: u64,
    text_len: usize,
    mirrored: bool,
    autoscroll_enabled: bool,
    scroll_offset: u32,
    overlay: bool,
    last_error: Option<String>,
}

impl StateSnapshot {
    fn capture(state: &AppState) -> Self {
        Self {
            server_state: state.server_state,
            server_addr: state.server_addr,
            pairing: state.pairing.clone(),
            text_revision: state.text_revision,
            text_len: state.display.text.len(),
            mirrored: state.display.mirrored,
            autoscroll_enabled: state.display.autoscroll_enabled,
            scroll_offset: state.display.scroll_offset,
            overlay: state.display.show_connection_overlay,
            last_error: state.last_error.clone(),
        }
    }
}

/// Result of waiting on the two message sources
enum Next {
    Local(Option<Message>),
    Remote(Option<prompter_core::ControlEvent>),
}

/// Orchestration engine for prompter.
///
/// Encapsulates all shared state between TUI and headless runners:
/// - TEA state management
/// - Message channel
/// - Control server lifecycle and the current command subscription
/// - Autoscroll task
/// - Shutdown signaling
/// - Event broadcasting for external consumers
pub struct Engine {
    /// TEA application state (the Model)
    pub state: AppState,

    /// Sender half of the message channel.
    /// Clone this to give to input sources (signal handler, stdin, tasks).
    pub msg_tx: mpsc::Sender<Message>,

    /// Receiver half of the message channel.
    pub msg_rx: mpsc::Receiver<Message>,

    /// Commands from the running server session, if attached
    remote: Option<CommandSubscription>,

    autoscroll: Option<AutoscrollTask>,

    lifecycle: Arc<LifecycleController>,

    services: Services,

    /// Sender for the shutdown signal. Send `true` to initiate shutdown.
    pub shutdown_tx: watch::Sender<bool>,

    /// Receiver for the shutdown signal. Clone for background tasks.
    pub shutdown_rx: watch::Receiver<bool>,

    /// Event broadcaster for external consumers.
    event_tx: broadcast::Sender<EngineEvent>,
}

impl Engine {
    /// Create an Engine showing `text`.
    ///
    /// Builds platform services from `settings` and spawns the signal
    /// handler. Must be called inside a tokio runtime.
    pub fn new(settings: Settings, text: impl Into<String>) -> Self {
        let services = Services::from_settings(&settings);
        let engine = Self::with_services(settings, text, services);
        signals::spawn_signal_handler(engine.msg_tx.clone());
        engine
    }

    /// Create an Engine with explicit platform services and no signal handler
    pub fn with_services(settings: Settings, text: impl Into<String>, services: Services) -> Self {
        let options = ServerOptions {
            bind_addr: settings.server.socket_addr(),
            max_body_bytes: settings.server.max_body_bytes,
            shutdown_timeout: settings.server.shutdown_timeout(),
        };
        let lifecycle = Arc::new(LifecycleController::new(options, services.page.clone()));

        let state = AppState::with_settings(settings, text);

        let (msg_tx, msg_rx) = mpsc::channel::<Message>(256);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let (event_tx, _) = broadcast::channel(256);

        Self {
            state,
            msg_tx,
            msg_rx,
            remote: None,
            autoscroll: None,
            lifecycle,
            services,
            shutdown_tx,
            shutdown_rx,
            event_tx,
        }
    }

    /// Subscribe to engine events.
    ///
    /// If the subscriber falls behind (buffer full), older events are
    /// dropped. Use `broadcast::error::RecvError::Lagged` to detect this.
    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.event_tx.subscribe()
    }

    /// Get a clone of the message sender for spawning input sources.
    pub fn msg_sender(&self) -> mpsc::Sender<Message> {
        self.msg_tx.clone()
    }

    /// Get a clone of the shutdown receiver for background tasks.
    pub fn shutdown_receiver(&self) -> watch::Receiver<bool> {
        self.shutdown_rx.clone()
    }

    pub fn lifecycle(&self) -> &Arc<LifecycleController> {
        &self.lifecycle
    }

    /// Whether a server session's commands are being consumed
    pub fn is_remote_attached(&self) -> bool {
        self.remote.is_some()
    }

    /// Check if the application should quit.
    pub fn should_quit(&self) -> bool {
        self.state.should_quit()
    }

    /// Start the control server if `[server] auto_start` is set
    pub fn auto_start(&mut self) {
        if self.state.settings.server.auto_start {
            info!("Auto-starting control server");
            self.process_message(Message::StartServer);
        }
    }

    /// Process a single message through the TEA update cycle.
    ///
    /// Runs `handler::update()` for the message and every follow-up message,
    /// dispatching each resulting action. Emits EngineEvents based on state
    /// changes detected by comparing before/after snapshots.
    pub fn process_message(&mut self, msg: Message) {
        let pre = StateSnapshot::capture(&self.state);

        let mut msg = Some(msg);
        while let Some(m) = msg {
            let result = handler::update(&mut self.state, m);
            if let Some(action) = result.action {
                self.handle_action(action);
            }
            msg = result.message;
        }

        let post = StateSnapshot::capture(&self.state);
        self.emit_events(&pre, &post);
    }

    /// Drain and process everything already queued, local messages first.
    ///
    /// Returns the number of messages processed. Used by the TUI runner,
    /// which renders between batches.
    pub fn drain_pending_messages(&mut self) -> usize {
        let mut count = 0;
        loop {
            if let Ok(msg) = self.msg_rx.try_recv() {
                self.process_message(msg);
            } else if let Some(event) = self.remote.as_mut().and_then(|r| r.try_recv()) {
                self.process_message(Message::Control(event));
            } else {
                break;
            }
            count += 1;
        }
        count
    }

    /// Wait for the next message from any source.
    ///
    /// Remote commands are returned as [`Message::Control`] in the order the
    /// server published them. Returns `None` only if the message channel
    /// closed.
    pub async fn next_message(&mut self) -> Option<Message> {
        loop {
            let next = match self.remote.as_mut() {
                Some(remote) => tokio::select! {
                    msg = self.msg_rx.recv() => Next::Local(msg),
                    event = remote.recv() => Next::Remote(event),
                },
                None => Next::Local(self.msg_rx.recv().await),
            };

            match next {
                Next::Local(msg) => return msg,
                Next::Remote(Some(event)) => return Some(Message::Control(event)),
                Next::Remote(None) => {
                    debug!("Command subscription ended");
                    self.remote = None;
                }
            }
        }
    }

    fn handle_action(&mut self, action: UpdateAction) {
        match action {
            UpdateAction::StartServer => {
                actions::spawn_start_server(self.lifecycle.clone(), self.msg_tx.clone());
            }

            UpdateAction::StopServer => {
                self.cancel_autoscroll();
                if self.remote.take().is_some() {
                    debug!("Detached command subscription");
                }
                actions::spawn_stop_server(self.lifecycle.clone(), self.msg_tx.clone());
            }

            UpdateAction::AttachRemote { events } => {
                self.remote = Some(events);
            }

            UpdateAction::StartAutoscroll {
                generation,
                interval,
            } => {
                self.cancel_autoscroll();
                self.autoscroll = Some(actions::spawn_autoscroll(
                    generation,
                    interval,
                    self.msg_tx.clone(),
                    self.shutdown_rx.clone(),
                ));
            }

            UpdateAction::CancelAutoscroll => self.cancel_autoscroll(),

            UpdateAction::ResolveAddress { server_addr } => {
                actions::spawn_address_lookup(
                    server_addr,
                    self.services.lookup.clone(),
                    self.msg_tx.clone(),
                );
            }

            UpdateAction::ShareAddress { url } => {
                actions::spawn_share(url, self.services.share.clone(), self.msg_tx.clone());
            }
        }
    }

    fn cancel_autoscroll(&mut self) {
        if let Some(task) = self.autoscroll.take() {
            trace!("Cancelling autoscroll task {}", task.generation());
            task.cancel();
        }
    }

    /// Emit events for any state changes between snapshots.
    fn emit_events(&self, pre: &StateSnapshot, post: &StateSnapshot) {
        if pre == post {
            return;
        }

        if pre.server_state != post.server_state {
            self.emit(EngineEvent::ServerStateChanged {
                old: pre.server_state,
                new: post.server_state,
                addr: post.server_addr,
            });
        }

        if pre.pairing != post.pairing {
            match &post.pairing {
                PairingAddress::Resolved(url) => {
                    self.emit(EngineEvent::AddressResolved { url: url.clone() })
                }
                PairingAddress::Failed(error) => self.emit(EngineEvent::AddressLookupFailed {
                    error: error.clone(),
                }),
                PairingAddress::Unknown | PairingAddress::Resolving => {}
            }
        }

        if pre.text_revision != post.text_revision {
            self.emit(EngineEvent::TextReplaced { len: post.text_len });
        }

        if pre.mirrored != post.mirrored {
            self.emit(EngineEvent::MirrorChanged {
                mirrored: post.mirrored,
            });
        }

        if pre.autoscroll_enabled != post.autoscroll_enabled {
            self.emit(EngineEvent::AutoscrollChanged {
                enabled: post.autoscroll_enabled,
            });
        }

        if pre.scroll_offset != post.scroll_offset {
            self.emit(EngineEvent::ScrollChanged {
                offset: post.scroll_offset,
            });
        }

        if pre.overlay != post.overlay {
            self.emit(EngineEvent::OverlayChanged {
                visible: post.overlay,
            });
        }

        if pre.last_error != post.last_error {
            if let Some(message) = &post.last_error {
                self.emit(EngineEvent::Error {
                    message: message.clone(),
                });
            }
        }
    }

    /// Broadcast an event to all subscribers.
    ///
    /// Silently drops the event if there are no subscribers.
    fn emit(&self, event: EngineEvent) {
        let _ = self.event_tx.send(event);
    }

    /// Stop the server, cancel background tasks and announce shutdown.
    pub async fn shutdown(&mut self) {
        self.cancel_autoscroll();
        self.remote = None;

        // Let an in-flight start or stop settle first
        let mut states = self.lifecycle.watch();
        let settled = matches!(
            tokio::time::timeout(
                SHUTDOWN_SETTLE_TIMEOUT,
                states.wait_for(|s| !s.is_transitioning())
            )
            .await,
            Ok(Ok(_))
        );
        if !settled {
            warn!("Control server still busy at shutdown");
        }

        if self.lifecycle.state().is_running() {
            match self.lifecycle.stop().await {
                Ok(()) => self.process_message(Message::ServerStopped),
                Err(e) => warn!("Failed to stop control server: {}", e),
            }
        }

        self.emit(EngineEvent::Shutdown);
        let _ = self.shutdown_tx.send(true);

        info!("Engine shutdown complete");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MockShareTarget;
    use prompter_core::ControlEvent;
    use std::net::{Ipv4Addr, SocketAddr};
    use std::sync::Mutex;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;

    #[derive(Default)]
    struct RecordingShare {
        urls: Mutex<Vec<String>>,
    }

    impl ShareTarget for RecordingShare {
        fn share(&self, url: &str) -> Result<()> {
            if let Ok(mut urls) = self.urls.lock() {
                urls.push(url.to_string());
            }
            Ok(())
        }
    }

    fn test_settings() -> Settings {
        let mut settings = Settings::default();
        settings.server.bind_address = Ipv4Addr::LOCALHOST.into();
        settings.server.port = 0;
        settings.server.shutdown_timeout_ms = 500;
        settings
    }

    fn services(share: Arc<dyn ShareTarget>) -> Services {
        Services {
            page: Arc::new(EmbeddedPage),
            lookup: Arc::new(FixedAddress(Ipv4Addr::new(192, 168, 7, 7))),
            share,
        }
    }

    fn engine() -> Engine {
        Engine::with_services(
            test_settings(),
            "Line one",
            services(Arc::new(MockShareTarget::new())),
        )
    }

    /// Process messages until `done` holds, failing after a few seconds
    async fn pump_until(engine: &mut Engine, done: impl Fn(&AppState) -> bool) {
        tokio::time::timeout(Duration::from_secs(5), async {
            while !done(&engine.state) {
                let msg = engine.next_message().await.expect("message channel open");
                engine.process_message(msg);
            }
        })
        .await
        .expect("condition reached in time");
    }

    async fn request(addr: SocketAddr, method: &str, path: &str, body: &str) -> String {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        let request = format!(
            "{method} {path} HTTP/1.1\r\nHost: {addr}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(request.as_bytes()).await.unwrap();

        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        response
    }

    async fn started(engine: &mut Engine) -> SocketAddr {
        engine.process_message(Message::StartServer);
        pump_until(engine, |s| s.server_state == ServerState::Running).await;
        engine.state.server_addr.unwrap()
    }

    #[tokio::test]
    async fn test_start_attaches_remote_and_shows_overlay() {
        let mut engine = engine();
        let mut events = engine.subscribe();

        started(&mut engine).await;
        assert!(engine.is_remote_attached());
        assert!(engine.state.display.show_connection_overlay);

        pump_until(&mut engine, |s| s.control_url().is_some()).await;
        let url = engine.state.control_url().unwrap().to_string();
        assert!(url.starts_with("http://127.0.0.1:"));

        let mut seen = Vec::new();
        while let Ok(event) = events.try_recv() {
            seen.push(event.event_type());
        }
        assert!(seen.contains(&"server_state_changed"));
        assert!(seen.contains(&"overlay_changed"));
        assert!(seen.contains(&"address_resolved"));

        engine.shutdown().await;
    }

    #[tokio::test]
    async fn test_remote_commands_reach_state_in_order() {
        let mut engine = engine();
        let addr = started(&mut engine).await;

        request(addr, "POST", "/setText", "Hello").await;
        request(addr, "GET", "/", "").await;
        request(addr, "POST", "/setText", "").await;
        request(addr, "POST", "/mirror", "").await;

        pump_until(&mut engine, |s| s.display.mirrored).await;
        assert_eq!(engine.state.display.text, "");
        assert!(!engine.state.display.show_connection_overlay);

        engine.shutdown().await;
    }

    #[tokio::test]
    async fn test_unknown_route_changes_nothing() {
        let mut engine = engine();
        let addr = started(&mut engine).await;

        let response = request(addr, "POST", "/unknown", "").await;
        assert!(response.starts_with("HTTP/1.1 404"));

        request(addr, "POST", "/down", "").await;
        pump_until(&mut engine, |s| s.display.scroll_offset > 0).await;
        assert_eq!(engine.state.display.scroll_offset, 200);
        assert_eq!(engine.state.display.text, "Line one");

        engine.shutdown().await;
    }

    #[tokio::test]
    async fn test_stop_detaches_and_restart_is_fresh() {
        let mut engine = engine();
        started(&mut engine).await;

        engine.process_message(Message::StopServer);
        assert!(!engine.is_remote_attached());
        pump_until(&mut engine, |s| s.server_state == ServerState::Stopped).await;
        assert_eq!(engine.lifecycle().state(), ServerState::Stopped);

        let addr = started(&mut engine).await;
        request(addr, "POST", "/up", "").await;
        request(addr, "POST", "/mirror", "").await;
        pump_until(&mut engine, |s| s.display.mirrored).await;
        assert_eq!(engine.state.display.scroll_offset, 0);

        engine.shutdown().await;
    }

    #[tokio::test]
    async fn test_bind_failure_reported_as_error() {
        let occupied = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let mut settings = test_settings();
        settings.server.port = occupied.local_addr().unwrap().port();

        let mut engine = Engine::with_services(
            settings,
            "",
            services(Arc::new(MockShareTarget::new())),
        );
        engine.process_message(Message::StartServer);
        pump_until(&mut engine, |s| s.last_error.is_some()).await;

        assert_eq!(engine.state.server_state, ServerState::Stopped);
        assert!(engine
            .state
            .last_error
            .as_deref()
            .unwrap()
            .contains("Failed to bind"));
    }

    #[tokio::test]
    async fn test_share_uses_resolved_url() {
        let share = Arc::new(RecordingShare::default());
        let mut engine = Engine::with_services(test_settings(), "", services(share.clone()));
        started(&mut engine).await;
        pump_until(&mut engine, |s| s.control_url().is_some()).await;

        engine.process_message(Message::ShareAddress);
        tokio::time::timeout(Duration::from_secs(5), async {
            while share.urls.lock().unwrap().is_empty() {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .unwrap();

        let urls = share.urls.lock().unwrap().clone();
        assert_eq!(urls.len(), 1);
        assert!(urls[0].starts_with("http://127.0.0.1:"));

        engine.shutdown().await;
    }

    #[tokio::test]
    async fn test_shutdown_stops_server() {
        let mut engine = engine();
        let mut events = engine.subscribe();
        let addr = started(&mut engine).await;

        engine.process_message(Message::Quit);
        assert!(engine.should_quit());
        engine.shutdown().await;

        assert_eq!(engine.lifecycle().state(), ServerState::Stopped);
        assert_eq!(engine.state.server_state, ServerState::Stopped);
        assert!(TcpStream::connect(addr).await.is_err());

        let mut last = None;
        while let Ok(event) = events.try_recv() {
            last = Some(event);
        }
        assert_eq!(last, Some(EngineEvent::Shutdown));
    }

    #[tokio::test(start_paused = true)]
    async fn test_autoscroll_advances_until_toggled_off() {
        let mut engine = engine();

        engine.process_message(Message::Control(ControlEvent::ToggleAutoscroll));
        tokio::time::sleep(Duration::from_millis(3500)).await;
        engine.drain_pending_messages();
        assert_eq!(engine.state.display.scroll_offset, 600);

        engine.process_message(Message::Control(ControlEvent::ToggleAutoscroll));
        tokio::time::sleep(Duration::from_secs(5)).await;
        engine.drain_pending_messages();
        assert_eq!(engine.state.display.scroll_offset, 600);
    }

    #[tokio::test(start_paused = true)]
    async fn test_autoscroll_restart_ignores_old_ticks() {
        let mut engine = engine();

        // Start, let one tick queue up, then restart before draining
        engine.process_message(Message::Control(ControlEvent::ToggleAutoscroll));
        tokio::time::sleep(Duration::from_millis(1100)).await;
        engine.process_message(Message::Control(ControlEvent::ToggleAutoscroll));
        engine.process_message(Message::Control(ControlEvent::ToggleAutoscroll));

        engine.drain_pending_messages();
        assert_eq!(engine.state.display.scroll_offset, 0);

        tokio::time::sleep(Duration::from_millis(1050)).await;
        engine.drain_pending_messages();
        assert_eq!(engine.state.display.scroll_offset, 200);
    }

    #[tokio::test]
    async fn test_auto_start_respects_setting() {
        let mut settings = test_settings();
        settings.server.auto_start = false;
        let mut engine = Engine::with_services(
            settings,
            "",
            services(Arc::new(MockShareTarget::new())),
        );

        engine.auto_start();
        assert_eq!(engine.state.server_state, ServerState::Stopped);

        engine.state.settings.server.auto_start = true;
        engine.auto_start();
        assert_eq!(engine.state.server_state, ServerState::Loading);
        pump_until(&mut engine, |s| s.server_state == ServerState::Running).await;

        engine.shutdown().await;
    }
}
