//! History read, clear and delete endpoints.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::{Json, extract::State};
use axum_extra::extract::CookieJar;
use parley_core::Turn;
use tracing::{debug, info};

use crate::error::{Result, WebError};
use crate::session::ClientSession;
use crate::state::AppState;

use super::types::{DeleteRequest, StatusMessage};

pub async fn get_history(
    State(state): State<Arc<AppState>>,
    session: ClientSession,
) -> Result<(CookieJar, Json<Vec<Turn>>)> {
    let history = state.history.get_history(&session.id).await?;
    Ok((session.into_jar(&state).await, Json(history)))
}

pub async fn clear_history(
    State(state): State<Arc<AppState>>,
    session: ClientSession,
) -> Result<(CookieJar, Json<StatusMessage>)> {
    state.history.clear(&session.id).await?;
    Ok((
        session.into_jar(&state).await,
        Json(StatusMessage::success("History cleared")),
    ))
}

pub async fn delete_conversation(
    State(state): State<Arc<AppState>>,
    session: ClientSession,
    body: std::result::Result<Json<DeleteRequest>, JsonRejection>,
) -> Result<(CookieJar, Json<StatusMessage>)> {
    let Json(request) = body.map_err(|rejection| WebError::Unclassified(rejection.body_text()))?;

    let Some(index) = request.position() else {
        debug!(
            "Session {}: index {} names no turn",
            session.id, request.index
        );
        return Err(WebError::InvalidIndex);
    };

    let removed = state.history.delete_at(&session.id, index).await?;
    info!(
        "Session {}: deleted conversation {index} ({} chars)",
        session.id,
        removed.user_input().len()
    );

    Ok((
        session.into_jar(&state).await,
        Json(StatusMessage::success("Conversation deleted")),
    ))
}
