//! Server-rendered chat page.

use std::sync::Arc;

use axum::extract::rejection::FormRejection;
use axum::extract::{Form, State};
use axum::response::Html;
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{Result, WebError};
use crate::session::ClientSession;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct HomeForm {
    pub user_input: String,
}

pub async fn home(
    State(state): State<Arc<AppState>>,
    session: ClientSession,
) -> Result<(CookieJar, Html<String>)> {
    let history = state.history.get_history(&session.id).await?;
    let html = state.pages.home(None, &history)?;
    Ok((session.into_jar(&state).await, Html(html)))
}

/// Form post: the input is forwarded as-is, even when blank.
pub async fn submit(
    State(state): State<Arc<AppState>>,
    session: ClientSession,
    form: std::result::Result<Form<HomeForm>, FormRejection>,
) -> Result<(CookieJar, Html<String>)> {
    let Form(form) = form.map_err(|rejection| WebError::InvalidForm(rejection.body_text()))?;

    let output = match state
        .provider
        .complete(&form.user_input, &state.page_options)
        .await
    {
        Ok(text) => {
            debug!("Session {}: page reply ({} chars)", session.id, text.len());
            text
        }
        Err(e) => {
            warn!("Session {}: completion failed: {e}", session.id);
            format!("Error: {e}")
        }
    };

    state
        .history
        .append(&session.id, form.user_input, output.clone())
        .await?;

    let history = state.history.get_history(&session.id).await?;
    let html = state.pages.home(Some(&output), &history)?;
    Ok((session.into_jar(&state).await, Html(html)))
}
