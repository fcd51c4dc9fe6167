use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::{Json, extract::State};
use axum_extra::extract::CookieJar;
use tracing::{info, warn};

use crate::error::{Result, WebError};
use crate::session::ClientSession;
use crate::state::AppState;

use super::types::{ChatReply, ChatRequest};

/// Send one message to the model and record the exchange.
///
/// Gateway failures are recorded too, with the error text as the reply, so
/// the history shows what the user saw.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    session: ClientSession,
    body: std::result::Result<Json<ChatRequest>, JsonRejection>,
) -> Result<(CookieJar, (StatusCode, Json<ChatReply>))> {
    let (status, reply, user_input, bot_response) = match body {
        Err(rejection) => {
            let text = format!("Error: {}", rejection.body_text());
            warn!("Session {}: unreadable chat body", session.id);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                ChatReply::error(text.clone()),
                String::new(),
                text,
            )
        }
        Ok(Json(request)) => {
            let input = request.message.trim().to_string();
            if input.is_empty() {
                return Err(WebError::EmptyMessage);
            }

            match state.provider.complete(&input, &state.api_options).await {
                Ok(text) => {
                    info!("Session {}: chat reply ({} chars)", session.id, text.len());
                    (
                        StatusCode::OK,
                        ChatReply::success(text.clone()),
                        input,
                        text,
                    )
                }
                Err(e) => {
                    let text = format!("Error: {e}");
                    warn!("Session {}: completion failed: {e}", session.id);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        ChatReply::error(text.clone()),
                        input,
                        text,
                    )
                }
            }
        }
    };

    state
        .history
        .append(&session.id, user_input, bot_response)
        .await?;

    Ok((session.into_jar(&state).await, (status, Json(reply))))
}
