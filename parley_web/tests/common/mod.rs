#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, Request, StatusCode, header};
use parley_core::{CompletionOptions, CompletionProvider, GatewayError};
use parley_session::SessionManager;
use parley_web::{AppState, SESSION_COOKIE, create_router};
use tower::ServiceExt;

/// Provider that answers every prompt the same way and records the calls.
pub struct ScriptedProvider {
    reply: Result<String, String>,
    calls: Mutex<Vec<(String, CompletionOptions)>>,
}

impl ScriptedProvider {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(String, CompletionOptions)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionProvider for ScriptedProvider {
    async fn complete(
        &self,
        prompt: &str,
        options: &CompletionOptions,
    ) -> Result<String, GatewayError> {
        self.calls
            .lock()
            .unwrap()
            .push((prompt.to_string(), options.clone()));
        self.reply.clone().map_err(GatewayError::new)
    }

    fn get_default_model(&self) -> &str {
        "test-model"
    }
}

pub struct Harness {
    pub app: Router,
    pub provider: Arc<ScriptedProvider>,
    pub sessions: Arc<SessionManager>,
}

pub fn harness(provider: ScriptedProvider) -> Harness {
    harness_with(provider, |state| state)
}

pub fn harness_with(
    provider: ScriptedProvider,
    configure: impl FnOnce(AppState) -> AppState,
) -> Harness {
    let provider = Arc::new(provider);
    let sessions = Arc::new(SessionManager::default());
    let state = AppState::new(provider.clone(), sessions.clone()).unwrap();
    let app = create_router(Arc::new(configure(state)));
    Harness {
        app,
        provider,
        sessions,
    }
}

pub struct Reply {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl Reply {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap()
    }

    pub fn text(&self) -> String {
        String::from_utf8(self.body.to_vec()).unwrap()
    }

    /// Full `Set-Cookie` header for the session cookie.
    pub fn set_cookie(&self) -> String {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find(|v| v.starts_with(&format!("{SESSION_COOKIE}=")))
            .unwrap()
            .to_string()
    }

    /// `name=value` pair to send back on the next request.
    pub fn cookie(&self) -> String {
        self.set_cookie().split(';').next().unwrap().to_string()
    }
}

pub async fn send(app: &Router, request: Request<Body>) -> Reply {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    Reply {
        status,
        headers,
        body,
    }
}

fn builder(method: &str, uri: &str, cookie: Option<&str>) -> axum::http::request::Builder {
    let builder = Request::builder().method(method).uri(uri);
    match cookie {
        Some(cookie) => builder.header(header::COOKIE, cookie),
        None => builder,
    }
}

pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    builder("GET", uri, cookie).body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, cookie: Option<&str>, body: &str) -> Request<Body> {
    builder("POST", uri, cookie)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn post_form(uri: &str, cookie: Option<&str>, body: &str) -> Request<Body> {
    builder("POST", uri, cookie)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Send one chat message and return the cookie to continue the session.
pub async fn chat(app: &Router, cookie: Option<&str>, message: &str) -> String {
    let body = serde_json::json!({ "message": message }).to_string();
    send(app, post_json("/api/chat", cookie, &body)).await.cookie()
}

pub async fn history(app: &Router, cookie: &str) -> Vec<serde_json::Value> {
    let reply = send(app, get("/api/history", Some(cookie))).await;
    assert_eq!(reply.status, StatusCode::OK);
    reply.json().as_array().unwrap().clone()
}
