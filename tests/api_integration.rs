//! Integration tests for the host bridge - HTTP API
//!
//! Tests API endpoints against one shared router state

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use futures_util::StreamExt;
use repcount::core::{create_router, SessionController};
use repcount::types::Thresholds;
use serde_json::Value;
use std::time::Duration;
use tokio_tungstenite::tungstenite::Message;
use tower::ServiceExt;

fn create_test_router() -> Router {
    create_router(SessionController::new(Thresholds::new(0.25, 0.35).unwrap()))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn tick(app: &Router, distance: f64) -> Value {
    let body = format!(r#"{{"kind":"tracking","distance_meters":{}}}"#, distance);
    let (status, json) = send(app, "POST", "/session/tick", Some(&body)).await;
    assert_eq!(status, StatusCode::OK);
    json
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_router();
    let (status, json) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["session_active"], false);
}

#[tokio::test]
async fn test_queries_without_session() {
    let app = create_test_router();

    for uri in ["/session/count", "/session/phase", "/session"] {
        let (status, json) = send(&app, "GET", uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
        assert_eq!(json["code"], "NO_SESSION");
        assert_eq!(json["message"], "Pushup session not started");
    }

    let (status, _) = send(&app, "POST", "/session/stop", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_full_session_flow() {
    let app = create_test_router();

    let (status, json) = send(&app, "POST", "/session/start", Some(r#"{"target_reps": 2}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["set_number"], 1);
    assert_eq!(json["websocket_url"], "/ws");

    let out = tick(&app, 0.5).await;
    assert_eq!(out["phase"], "UP");
    let out = tick(&app, 0.2).await;
    assert_eq!(out["phase"], "DOWN");
    assert_eq!(out["reason"], "R005_TRANSITION_TO_DOWN");

    let (_, json) = send(&app, "GET", "/session/phase", None).await;
    assert_eq!(json["phase"], "DOWN");
    assert_eq!(json["is_going_down"], true);

    let out = tick(&app, 0.4).await;
    assert_eq!(out["counted"], true);
    assert_eq!(out["count"], 1);

    tick(&app, 0.1).await;
    tick(&app, 0.45).await;

    let (status, json) = send(&app, "GET", "/session/count", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 2);

    let (status, summary) = send(&app, "POST", "/session/stop", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["reps"], 2);
    assert_eq!(summary["is_goal_achieved"], true);
    assert_eq!(summary["ticks"], 5);

    let (_, sets) = send(&app, "GET", "/sets", None).await;
    assert_eq!(sets.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_start_without_body_and_conflict() {
    let app = create_test_router();

    let (status, _) = send(&app, "POST", "/session/start", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, json) = send(&app, "POST", "/session/start", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "SESSION_ACTIVE");
}

#[tokio::test]
async fn test_pause_resume_and_reset() {
    let app = create_test_router();
    send(&app, "POST", "/session/start", None).await;
    tick(&app, 0.1).await;

    let (status, json) = send(&app, "POST", "/session/pause", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["state"], "PAUSED");

    // Dropped while paused
    let out = tick(&app, 0.4).await;
    assert!(out.is_null());

    let (status, _) = send(&app, "POST", "/session/pause", None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, json) = send(&app, "POST", "/session/resume", None).await;
    assert_eq!(json["state"], "RUNNING");
    assert_eq!(json["phase"], "DOWN");

    let out = tick(&app, 0.4).await;
    assert_eq!(out["count"], 1);

    let (_, json) = send(&app, "POST", "/session/reset", None).await;
    assert_eq!(json["count"], 0);
    assert_eq!(json["phase"], "UP");
}

#[tokio::test]
async fn test_fatal_tick_returns_service_unavailable() {
    let app = create_test_router();
    send(&app, "POST", "/session/start", None).await;

    let (status, json) = send(
        &app,
        "POST",
        "/session/tick",
        Some(r#"{"kind":"unavailable","reason":"permission_denied"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["code"], "TRACKING_UNAVAILABLE");

    let (_, health) = send(&app, "GET", "/health", None).await;
    assert_eq!(health["session_active"], false);
}

#[tokio::test]
async fn test_lost_tick_keeps_phase() {
    let app = create_test_router();
    send(&app, "POST", "/session/start", None).await;
    tick(&app, 0.1).await;

    let (status, out) = send(&app, "POST", "/session/tick", Some(r#"{"kind":"lost"}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(out["phase"], "DOWN");
    assert!(out["distance"].is_null());
    assert_eq!(out["reason"], "R001_SAMPLE_UNAVAILABLE");
}

#[tokio::test]
async fn test_websocket_streams_session_events() {
    let app = create_test_router();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let served = app.clone();
    tokio::spawn(async move {
        axum::serve(listener, served).await.unwrap();
    });

    let (mut ws, _) = tokio_tungstenite::connect_async(format!("ws://{}/ws", addr))
        .await
        .unwrap();

    // Same shared state as the served router
    send(&app, "POST", "/session/start", None).await;
    tick(&app, 0.1).await;
    tick(&app, 0.4).await;

    let mut events = Vec::new();
    while events.len() < 4 {
        let frame = tokio::time::timeout(Duration::from_secs(5), ws.next())
            .await
            .expect("websocket frame")
            .unwrap()
            .unwrap();
        if let Message::Text(text) = frame {
            events.push(serde_json::from_str::<Value>(&text).unwrap());
        }
    }

    assert_eq!(events[0]["event"], "onSessionStarted");
    assert_eq!(events[0]["set_number"], 1);
    assert_eq!(events[1]["event"], "onPhaseChange");
    assert_eq!(events[1]["phase"], "DOWN");
    assert_eq!(events[2]["event"], "onPhaseChange");
    assert_eq!(events[2]["phase"], "UP");
    assert_eq!(events[3]["event"], "onPushupCount");
    assert_eq!(events[3]["count"], 1);

    ws.close(None).await.unwrap();
}
