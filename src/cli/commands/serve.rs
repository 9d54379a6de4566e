//! HTTP API server.
//!
//! JSON endpoints for creating sessions, requesting autocomplete suggestions,
//! listing and deleting sessions.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::error::{ErrorKind, VidnotesError};
use crate::orchestrator::{AutocompleteRequest, Orchestrator};
use crate::session::SessionId;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info, warn};

type ApiResult<T> = std::result::Result<Json<T>, VidnotesError>;

/// Run the HTTP API server until Ctrl+C.
pub async fn run_serve(host: Option<&str>, port: Option<u16>, settings: Settings) -> anyhow::Result<()> {
    preflight::check(Operation::Suggest, &settings)?;

    let host = host.unwrap_or(settings.server.host.as_str()).to_string();
    let port = port.unwrap_or(settings.server.port);
    let cors = settings.server.cors;

    let orchestrator = Arc::new(Orchestrator::new(settings)?);
    let app = router(orchestrator.clone(), cors);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("vidnotes API Server");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    println!();
    println!("Endpoints:");
    Output::kv("Health", "GET    /health");
    Output::kv("Create session", "POST   /api/create-session");
    Output::kv("Autocomplete", "POST   /api/autocomplete");
    Output::kv("List sessions", "GET    /api/sessions");
    Output::kv("Delete session", "DELETE /api/session/{session_id}");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    orchestrator.shutdown().await;
    info!("Server stopped");

    Ok(())
}

/// Build the API router over a shared orchestrator.
pub fn router(orchestrator: Arc<Orchestrator>, cors: bool) -> Router {
    let app = Router::new()
        .route("/health", get(health))
        .route("/api/create-session", post(create_session))
        .route("/api/autocomplete", post(autocomplete))
        .route("/api/sessions", get(list_sessions))
        .route("/api/session/{session_id}", delete(delete_session))
        .with_state(orchestrator);

    if cors {
        app.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
    } else {
        app
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}

// === Request/Response Types ===

#[derive(Deserialize)]
struct CreateSessionRequest {
    youtube_url: String,
}

#[derive(Serialize)]
struct SessionResponse {
    session_id: String,
    video_title: String,
    transcript_length: usize,
}

#[derive(Deserialize)]
struct AutocompleteBody {
    session_id: String,
    current_text: String,
    #[serde(default)]
    cursor_position: usize,
}

#[derive(Serialize)]
struct AutocompleteResponse {
    suggestion: String,
    full_context: String,
}

#[derive(Serialize)]
struct SessionsResponse {
    sessions: Vec<SessionInfo>,
}

#[derive(Serialize)]
struct SessionInfo {
    session_id: String,
    video_title: String,
    video_id: String,
}

#[derive(Serialize)]
struct MessageResponse {
    message: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    detail: String,
    code: &'static str,
}

impl IntoResponse for VidnotesError {
    fn into_response(self) -> Response {
        let kind = self.kind();
        let status = match (&self, kind) {
            // Missing or disabled captions
            (VidnotesError::Transcript(_), _) => StatusCode::BAD_REQUEST,
            (_, ErrorKind::InvalidInput) => StatusCode::BAD_REQUEST,
            (_, ErrorKind::NotFound) => StatusCode::NOT_FOUND,
            (_, ErrorKind::UpstreamFailure) | (_, ErrorKind::InternalFailure) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        if status.is_server_error() {
            error!(error = %self, code = kind.as_str(), "request failed");
        } else {
            warn!(error = %self, code = kind.as_str(), "request rejected");
        }

        let body = Json(ErrorResponse {
            detail: self.to_string(),
            code: kind.as_str(),
        });

        (status, body).into_response()
    }
}

/// Unparseable identifiers are reported as unknown sessions.
fn parse_session_id(raw: &str) -> std::result::Result<SessionId, VidnotesError> {
    raw.parse()
        .map_err(|_| VidnotesError::SessionNotFound(raw.to_string()))
}

// === Handlers ===

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn create_session(
    State(orchestrator): State<Arc<Orchestrator>>,
    Json(req): Json<CreateSessionRequest>,
) -> ApiResult<SessionResponse> {
    let created = orchestrator.create_session(&req.youtube_url).await?;
    Ok(Json(SessionResponse {
        session_id: created.session_id.to_string(),
        video_title: created.title,
        transcript_length: created.transcript_length,
    }))
}

async fn autocomplete(
    State(orchestrator): State<Arc<Orchestrator>>,
    Json(req): Json<AutocompleteBody>,
) -> ApiResult<AutocompleteResponse> {
    let request = AutocompleteRequest {
        session_id: parse_session_id(&req.session_id)?,
        current_text: req.current_text,
        cursor_position: req.cursor_position,
    };

    let suggestion = orchestrator.autocomplete(&request).await?;
    Ok(Json(AutocompleteResponse {
        suggestion: suggestion.suggestion,
        full_context: suggestion.context,
    }))
}

async fn list_sessions(State(orchestrator): State<Arc<Orchestrator>>) -> Json<SessionsResponse> {
    let sessions = orchestrator
        .list_sessions()
        .await
        .into_iter()
        .map(|s| SessionInfo {
            session_id: s.session_id.to_string(),
            video_title: s.title,
            video_id: s.video_id,
        })
        .collect();

    Json(SessionsResponse { sessions })
}

async fn delete_session(
    State(orchestrator): State<Arc<Orchestrator>>,
    Path(session_id): Path<String>,
) -> ApiResult<MessageResponse> {
    let id = parse_session_id(&session_id)?;
    orchestrator.delete_session(&id).await?;
    Ok(Json(MessageResponse {
        message: "Session deleted successfully".to_string(),
    }))
}
