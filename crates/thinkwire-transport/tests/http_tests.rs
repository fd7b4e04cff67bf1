//! HTTP adapter integration tests
//!
//! These run the adapter against an in-process axum server standing in for
//! the think service; nothing depends on external services.

use axum::{http::StatusCode, routing::post, Json, Router};
use thinkwire_core::Prompt;
use thinkwire_transport::{HttpConfig, HttpThinkClient, TransportError};
use tokio::net::TcpListener;

/// Spawn a local think endpoint and return its URL
async fn spawn_think_server(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });
    format!("http://{}/think", addr)
}

fn client_for(endpoint: String) -> HttpThinkClient {
    HttpThinkClient::new(HttpConfig {
        endpoint,
        ..Default::default()
    })
    .expect("valid endpoint")
}

#[tokio::test]
async fn test_think_returns_echoed_body() {
    let app = Router::new().route(
        "/think",
        post(|Json(body): Json<serde_json::Value>| async move { Json(body) }),
    );
    let endpoint = spawn_think_server(app).await;

    let prompt = Prompt::new("Generate a voicing for MIDI note 60 in C major").unwrap();
    let reply = client_for(endpoint).think(&prompt).await.unwrap();

    assert_eq!(
        reply,
        serde_json::json!({ "prompt": "Generate a voicing for MIDI note 60 in C major" })
    );
}

#[tokio::test]
async fn test_think_returns_voicing() {
    let app = Router::new().route(
        "/think",
        post(|| async { Json(serde_json::json!({ "notes": [60, 64, 67] })) }),
    );
    let endpoint = spawn_think_server(app).await;

    let prompt = Prompt::new("Generate a voicing for MIDI note 60 in C major").unwrap();
    let reply = client_for(endpoint).think(&prompt).await.unwrap();

    assert_eq!(reply, serde_json::json!({ "notes": [60, 64, 67] }));
}

#[tokio::test]
async fn test_non_success_status_is_error() {
    let app = Router::new().route(
        "/think",
        post(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": "overloaded" })),
            )
        }),
    );
    let endpoint = spawn_think_server(app).await;

    let prompt = Prompt::new("anything").unwrap();
    let err = client_for(endpoint).think(&prompt).await.unwrap_err();

    // The body is never parsed on failure; only the status surfaces.
    match err {
        TransportError::Status { code } => assert_eq!(code, 500),
        other => panic!("expected Status error, got {}", other),
    }
}

#[tokio::test]
async fn test_non_json_reply_is_malformed() {
    let app = Router::new().route("/think", post(|| async { "not json" }));
    let endpoint = spawn_think_server(app).await;

    let prompt = Prompt::new("anything").unwrap();
    let err = client_for(endpoint).think(&prompt).await.unwrap_err();

    assert!(matches!(err, TransportError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_connection_refused_is_request_error() {
    // Bind then drop to find a port nothing is listening on.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(format!("http://{}/think", addr));
    let prompt = Prompt::new("anything").unwrap();
    let err = client.think(&prompt).await.unwrap_err();

    assert!(matches!(err, TransportError::Request(_)));
}
