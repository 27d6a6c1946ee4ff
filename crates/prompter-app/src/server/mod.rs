//! Embedded HTTP control server
//!
//! Translates the fixed route set into [`ControlEvent`]s published on a
//! [`CommandChannel`]. Handlers never touch display state; they only publish.
//!
//! | Method | Path       | Event              |
//! |--------|------------|--------------------|
//! | GET    | `/`        | `PageLoaded`       |
//! | POST   | `/up`      | `ScrollUp`         |
//! | POST   | `/down`    | `ScrollDown`       |
//! | POST   | `/mirror`  | `ToggleMirror`     |
//! | POST   | `/scroll`  | `ToggleAutoscroll` |
//! | POST   | `/setText` | `SetText(body)`    |
//!
//! Anything else, including a known path with the wrong method, is a 404
//! and publishes nothing.

pub mod page;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Router,
};
use prompter_core::prelude::*;
use prompter_core::ControlEvent;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::channel::CommandChannel;

pub use page::{EmbeddedPage, FilePage, PageSource, EMBEDDED_PAGE};

/// Default request body limit for `/setText` (8 MiB)
pub const DEFAULT_MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

#[derive(Clone)]
struct ControlContext {
    channel: CommandChannel,
    page: Arc<dyn PageSource>,
}

/// Build the control router publishing into `channel`.
pub fn router(channel: CommandChannel, page: Arc<dyn PageSource>, max_body_bytes: usize) -> Router {
    let context = ControlContext { channel, page };

    // `get` also answers HEAD unless a HEAD handler is registered
    Router::new()
        .route(
            ControlEvent::PageLoaded.route(),
            get(control_page).head(not_found).fallback(not_found),
        )
        .route(ControlEvent::ScrollUp.route(), post(scroll_up).fallback(not_found))
        .route(ControlEvent::ScrollDown.route(), post(scroll_down).fallback(not_found))
        .route(ControlEvent::ToggleMirror.route(), post(toggle_mirror).fallback(not_found))
        .route(
            ControlEvent::ToggleAutoscroll.route(),
            post(toggle_autoscroll).fallback(not_found),
        )
        .route(
            ControlEvent::SetText(String::new()).route(),
            post(set_text).fallback(not_found),
        )
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(middleware::from_fn(access_log))
        .with_state(context)
}

/// Bind the listening socket.
///
/// Fails with [`Error::Bind`] when the port is taken or not permitted.
pub async fn bind(addr: SocketAddr) -> Result<TcpListener> {
    TcpListener::bind(addr)
        .await
        .map_err(|e| Error::bind(addr, e))
}

/// Serve `app` on `listener` until `shutdown_rx` turns `true`.
///
/// Each connection is handled on its own task. The listener is dropped, and
/// the port released, when the returned task finishes.
pub fn spawn_server(
    listener: TcpListener,
    app: Router,
    mut shutdown_rx: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let result = axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.wait_for(|stop| *stop).await;
            })
            .await;

        match result {
            Ok(()) => info!("Control server stopped"),
            Err(e) => error!("Control server stopped with error: {}", e),
        }
    })
}

// ─────────────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────────────

async fn control_page(State(ctx): State<ControlContext>) -> Response {
    let page = match ctx.page.control_page() {
        Ok(page) => page,
        Err(e) => {
            warn!("Failed to load control page: {}", e);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    match publish(&ctx.channel, ControlEvent::PageLoaded) {
        StatusCode::OK => Html(page).into_response(),
        status => status.into_response(),
    }
}

async fn scroll_up(State(ctx): State<ControlContext>) -> StatusCode {
    publish(&ctx.channel, ControlEvent::ScrollUp)
}

async fn scroll_down(State(ctx): State<ControlContext>) -> StatusCode {
    publish(&ctx.channel, ControlEvent::ScrollDown)
}

async fn toggle_mirror(State(ctx): State<ControlContext>) -> StatusCode {
    publish(&ctx.channel, ControlEvent::ToggleMirror)
}

async fn toggle_autoscroll(State(ctx): State<ControlContext>) -> StatusCode {
    publish(&ctx.channel, ControlEvent::ToggleAutoscroll)
}

async fn set_text(State(ctx): State<ControlContext>, body: String) -> StatusCode {
    publish(&ctx.channel, ControlEvent::SetText(body))
}

async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}

fn publish(channel: &CommandChannel, event: ControlEvent) -> StatusCode {
    let name = event.name();
    match channel.publish(event) {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            warn!("Failed to publish {}: {}", name, e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

async fn access_log(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let response = next.run(request).await;
    info!(%method, %path, status = response.status().as_u16(), "control request");
    response
}
