//! Session HTTP handlers.
//!
//! Endpoints:
//! - POST /api/sessions      - Create a session
//! - GET  /api/sessions      - List all sessions
//! - GET  /api/sessions/{id} - Get a single session

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Deserialize;
use uuid::Uuid;

use podscription_types::session::Session;

use crate::http::error::AppError;
use crate::http::response::SessionList;
use crate::state::AppState;

/// Request body for session creation.
#[derive(Debug, Deserialize)]
pub struct CreateSessionRequest {
    /// An empty name is replaced with `Session {n}`.
    #[serde(default)]
    pub name: String,
}

/// Parse a UUID from a path parameter, returning a 400 error on invalid format.
fn parse_uuid(s: &str) -> Result<Uuid, AppError> {
    s.parse::<Uuid>()
        .map_err(|_| AppError::InvalidSessionId(s.to_string()))
}

/// POST /api/sessions - Create a session.
pub async fn create_session(
    State(state): State<AppState>,
    payload: Result<Json<CreateSessionRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Session>), AppError> {
    let Json(req) = payload.map_err(|e| AppError::InvalidPayload(e.body_text()))?;

    let session = state.consultation.create_session(&req.name).await?;

    Ok((StatusCode::CREATED, Json(session)))
}

/// GET /api/sessions - List all sessions in store order.
pub async fn list_sessions(State(state): State<AppState>) -> Result<Json<SessionList>, AppError> {
    let sessions = state
        .consultation
        .list_sessions()
        .await
        .map_err(|e| AppError::ListingFailed(e.to_string()))?;

    Ok(Json(SessionList { sessions }))
}

/// GET /api/sessions/{id} - Get a session with its full message history.
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<Session>, AppError> {
    let id = parse_uuid(&session_id)?;
    let session = state.consultation.get_session(&id).await?;

    Ok(Json(session))
}
