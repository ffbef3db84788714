//! Host bridge: HTTP + WebSocket API over the session controller
//!
//! Endpoints:
//! - GET  /health - Health check
//! - POST /session/start - Start a set
//! - POST /session/stop - Stop the set, get its summary
//! - POST /session/pause | /session/resume
//! - POST /session/tick - Feed one tracker event
//! - POST /session/reset - Reset the counter
//! - GET  /session - Session status
//! - GET  /session/count - Current count
//! - GET  /session/phase - Current phase
//! - GET  /sets - Completed sets
//! - WS   /ws - Live events

use axum::{
    extract::{ws::{Message, WebSocket}, State, WebSocketUpgrade},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tracing::{debug, info, warn};

use crate::core::{SessionController, SessionStatus};
use crate::error::Error;
use crate::types::{BridgeEvent, Phase, SetSummary, TickOutput, TrackerEvent};

/// App state
pub struct AppState {
    pub controller: RwLock<SessionController>,
}

/// Error response, `{ "code": ..., "message": ... }`
#[derive(Debug)]
pub struct ApiError(pub Error);

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
}

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        ApiError(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            Error::NoSession => StatusCode::NOT_FOUND,
            Error::SessionAlreadyActive | Error::InvalidTransition { .. } => StatusCode::CONFLICT,
            Error::TrackingUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Error::InvalidSample { .. } | Error::InvalidThresholds { .. } => StatusCode::BAD_REQUEST,
            Error::Config(_) | Error::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = ErrorBody {
            code: self.0.code(),
            message: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

type ApiResult<T> = Result<Json<T>, ApiError>;

/// Start session request
#[derive(Debug, Default, Deserialize)]
pub struct StartRequest {
    pub target_reps: Option<u32>,
}

/// Start session response
#[derive(Debug, Serialize)]
pub struct StartResponse {
    pub set_number: u32,
    pub websocket_url: String,
}

#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub count: u64,
}

#[derive(Debug, Serialize)]
pub struct PhaseResponse {
    pub phase: Phase,
    pub is_going_down: bool,
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub session_active: bool,
}

/// Create the API router
pub fn create_router(controller: SessionController) -> Router {
    let state = Arc::new(AppState {
        controller: RwLock::new(controller),
    });

    Router::new()
        .route("/health", get(health))
        .route("/session", get(get_session))
        .route("/session/start", post(start_session))
        .route("/session/stop", post(stop_session))
        .route("/session/pause", post(pause_session))
        .route("/session/resume", post(resume_session))
        .route("/session/tick", post(tick))
        .route("/session/reset", post(reset_session))
        .route("/session/count", get(get_count))
        .route("/session/phase", get(get_phase))
        .route("/sets", get(list_sets))
        .route("/ws", get(websocket_handler))
        .with_state(state)
}

/// Health check endpoint
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let controller = state.controller.read().await;
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        session_active: controller.state().is_active(),
    })
}

/// Start a set; body is optional
async fn start_session(
    State(state): State<Arc<AppState>>,
    body: Option<Json<StartRequest>>,
) -> ApiResult<StartResponse> {
    let req = body.map(|Json(req)| req).unwrap_or_default();
    let set_number = state.controller.write().await.start(req.target_reps)?;
    Ok(Json(StartResponse {
        set_number,
        websocket_url: "/ws".to_string(),
    }))
}

async fn stop_session(State(state): State<Arc<AppState>>) -> ApiResult<SetSummary> {
    Ok(Json(state.controller.write().await.stop()?))
}

async fn pause_session(State(state): State<Arc<AppState>>) -> ApiResult<SessionStatus> {
    Ok(Json(state.controller.write().await.pause()?))
}

async fn resume_session(State(state): State<Arc<AppState>>) -> ApiResult<SessionStatus> {
    Ok(Json(state.controller.write().await.resume()?))
}

/// Feed one tracker event; `null` when dropped while paused
async fn tick(
    State(state): State<Arc<AppState>>,
    Json(event): Json<TrackerEvent>,
) -> ApiResult<Option<TickOutput>> {
    Ok(Json(state.controller.write().await.handle(event)?))
}

async fn reset_session(State(state): State<Arc<AppState>>) -> ApiResult<SessionStatus> {
    Ok(Json(state.controller.write().await.reset()?))
}

async fn get_session(State(state): State<Arc<AppState>>) -> ApiResult<SessionStatus> {
    Ok(Json(state.controller.read().await.status()?))
}

async fn get_count(State(state): State<Arc<AppState>>) -> ApiResult<CountResponse> {
    let count = state.controller.read().await.current_count()?;
    Ok(Json(CountResponse { count }))
}

async fn get_phase(State(state): State<Arc<AppState>>) -> ApiResult<PhaseResponse> {
    let phase = state.controller.read().await.current_phase()?;
    Ok(Json(PhaseResponse {
        phase,
        is_going_down: phase.is_going_down(),
    }))
}

async fn list_sets(State(state): State<Arc<AppState>>) -> Json<Vec<SetSummary>> {
    Json(state.controller.read().await.log().sets().to_vec())
}

/// WebSocket handler for live events
async fn websocket_handler(
    State(state): State<Arc<AppState>>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    let rx = state.controller.read().await.subscribe();
    ws.on_upgrade(move |socket| handle_websocket(socket, rx))
}

/// Forward bridge events until either side goes away
async fn handle_websocket(socket: WebSocket, mut rx: broadcast::Receiver<BridgeEvent>) {
    let (mut sender, mut receiver) = socket.split();
    debug!("WebSocket subscriber connected");

    loop {
        tokio::select! {
            event = rx.recv() => match event {
                Ok(event) => {
                    let json = match serde_json::to_string(&event) {
                        Ok(json) => json,
                        Err(e) => {
                            warn!(error = %e, "Failed to encode bridge event");
                            continue;
                        }
                    };
                    if sender.send(Message::Text(json)).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "WebSocket subscriber lagging");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
            incoming = receiver.next() => match incoming {
                Some(Ok(Message::Close(_))) | None | Some(Err(_)) => break,
                Some(Ok(_)) => {}
            },
        }
    }
    debug!("WebSocket subscriber disconnected");
}

/// Run the API server
pub async fn run_server(addr: &str, controller: SessionController) -> Result<(), Error> {
    let router = create_router(controller);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr, "Pushup bridge listening");
    println!("repcount bridge running on {}", addr);
    println!("  POST /session/start   - Start a set");
    println!("  POST /session/tick    - Feed a tracker event");
    println!("  GET  /session/count   - Current count");
    println!("  GET  /session/phase   - Current phase");
    println!("  POST /session/stop    - Stop and summarize");
    println!("  WS   /ws              - Live events");
    println!("  GET  /health          - Health check");
    axum::serve(listener, router).await?;
    Ok(())
}
