//! JSON API routes.
//!
//! Every response is an envelope discriminated by `status`, except
//! `/api/history` which returns the bare list of turns.

mod chat;
mod history;
pub mod types;

use std::sync::Arc;

use axum::{Json, Router, routing::get, routing::post};
use serde_json::{Value, json};

use crate::state::AppState;

pub use types::{ChatReply, ChatRequest, DeleteRequest, Status, StatusMessage};

/// Create the API routes, mounted under `/api`.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/history", get(history::get_history))
        .route("/clear_history", post(history::clear_history))
        .route("/delete_conversation", post(history::delete_conversation))
        .route("/chat", post(chat::chat))
}

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
