#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! HTTP front-end: the chat page and its JSON API.
//!
//! Handlers are thin. They resolve the caller's session from its cookie,
//! call the completion gateway and the history store, and shape the
//! response. Each request runs to completion before it answers; nothing is
//! streamed and no work is left running in the background.

pub mod api;
mod error;
mod pages;
mod session;
mod state;
mod template;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub use error::{Result, WebError};
pub use session::{ClientSession, SESSION_COOKIE};
pub use state::AppState;
pub use template::Pages;

/// Create the application router.
pub fn create_router(state: Arc<AppState>) -> Router {
    let mut router = Router::new()
        .route("/", get(pages::home).post(pages::submit))
        .route("/health", get(api::health))
        .nest("/api", api::routes());

    if let Some(dir) = state.static_dir.as_deref() {
        if dir.is_dir() {
            info!("Serving static files from {}", dir.display());
            router = router.nest_service("/static", ServeDir::new(dir));
        } else {
            warn!("Static directory {} not found, skipping", dir.display());
        }
    }

    router.layer(TraceLayer::new_for_http()).with_state(state)
}

/// Serve until `shutdown` resolves.
pub async fn run_with_shutdown<F>(
    state: AppState,
    listen_addr: &str,
    shutdown: F,
) -> anyhow::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let addr: SocketAddr = listen_addr.parse()?;
    let app = create_router(Arc::new(state));

    let listener = TcpListener::bind(addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Server stopped");
    Ok(())
}
