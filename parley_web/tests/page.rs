//! Server-rendered page flow and static assets.

mod common;

use axum::http::StatusCode;

use common::{ScriptedProvider, chat, get, harness, harness_with, history, post_form, send};

#[tokio::test]
async fn test_home_renders_without_output() {
    let h = harness(ScriptedProvider::replying("unused"));

    let reply = send(&h.app, get("/", None)).await;

    assert_eq!(reply.status, StatusCode::OK);
    let html = reply.text();
    assert!(html.contains("id=\"chatForm\""));
    assert!(html.contains("/static/js/main.js"));
    assert!(!html.contains("id=\"server-output\""));
    assert!(h.provider.calls().is_empty());
}

#[tokio::test]
async fn test_home_lists_existing_history() {
    let h = harness(ScriptedProvider::replying("an answer"));
    let cookie = chat(&h.app, None, "an earlier question").await;

    let html = send(&h.app, get("/", Some(&cookie))).await.text();

    assert!(html.contains("an earlier question"));
    assert!(html.contains("an answer"));
    assert!(html.contains("data-index=\"0\""));
}

#[tokio::test]
async fn test_submit_renders_reply_with_page_limits() {
    let h = harness(ScriptedProvider::replying("Bonjour!"));

    let reply = send(&h.app, post_form("/", None, "user_input=say+hello")).await;

    assert_eq!(reply.status, StatusCode::OK);
    let html = reply.text();
    assert!(html.contains("id=\"server-output\""));
    assert!(html.contains("Bonjour!"));
    assert!(reply.set_cookie().contains("Max-Age="));

    let calls = h.provider.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "say hello");
    assert_eq!(calls[0].1.max_tokens, 1000);

    let turns = history(&h.app, &reply.cookie()).await;
    assert_eq!(turns.len(), 1);
    assert_eq!(turns[0]["user_input"], "say hello");
    assert_eq!(turns[0]["bot_response"], "Bonjour!");
}

#[tokio::test]
async fn test_submit_records_gateway_error() {
    let h = harness(ScriptedProvider::failing("status 401: invalid api token"));

    let reply = send(&h.app, post_form("/", None, "user_input=hello")).await;

    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.text().contains("Error: status 401: invalid api token"));

    let turns = history(&h.app, &reply.cookie()).await;
    assert_eq!(turns[0]["bot_response"], "Error: status 401: invalid api token");
}

#[tokio::test]
async fn test_submit_forwards_blank_input() {
    let h = harness(ScriptedProvider::replying("You said nothing."));

    let reply = send(&h.app, post_form("/", None, "user_input=")).await;

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(h.provider.calls()[0].0, "");
    let turns = history(&h.app, &reply.cookie()).await;
    assert_eq!(turns[0]["user_input"], "");
}

#[tokio::test]
async fn test_submit_without_input_field_is_bad_request() {
    let h = harness(ScriptedProvider::replying("unused"));

    let reply = send(&h.app, post_form("/", None, "other=1")).await;

    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.json()["status"], "error");
    assert!(h.provider.calls().is_empty());
}

#[tokio::test]
async fn test_submit_escapes_model_output() {
    let h = harness(ScriptedProvider::replying("<img src=x onerror=alert(1)>"));

    let html = send(&h.app, post_form("/", None, "user_input=hi"))
        .await
        .text();

    assert!(!html.contains("<img src=x"));
    assert!(html.contains("&lt;img"));
}

#[tokio::test]
async fn test_static_files_served_from_configured_dir() {
    let dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("templates");
    let h = harness_with(ScriptedProvider::replying("unused"), |state| {
        state.with_static_dir(dir)
    });

    let reply = send(&h.app, get("/static/home.html", None)).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.text().contains("chatForm"));

    let missing = send(&h.app, get("/static/nope.js", None)).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}
