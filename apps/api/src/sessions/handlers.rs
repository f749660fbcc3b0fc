//! Axum route handlers for generator sessions.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::errors::AppError;
use crate::notes::models::GenerationDraft;
use crate::sessions::{generate_in_session, BeginError, GenerateError, SessionView};
use crate::state::AppState;

fn session_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Session {id} not found"))
}

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<SessionView>) {
    (StatusCode::CREATED, Json(state.sessions.create().await))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    state
        .sessions
        .view(id)
        .await
        .map(Json)
        .ok_or_else(|| session_not_found(id))
}

/// DELETE /api/v1/sessions/:id
///
/// Closing a session with a generation in flight drops that generation's result.
pub async fn handle_close_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.sessions.remove(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(session_not_found(id))
    }
}

/// PATCH /api/v1/sessions/:id/draft
pub async fn handle_update_draft(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<GenerationDraft>,
) -> Result<Json<SessionView>, AppError> {
    state
        .sessions
        .update_draft(id, patch)
        .await
        .map(Json)
        .ok_or_else(|| session_not_found(id))
}

/// POST /api/v1/sessions/:id/prefill/:profile_id
pub async fn handle_prefill(
    State(state): State<AppState>,
    Path((id, profile_id)): Path<(Uuid, String)>,
) -> Result<Json<SessionView>, AppError> {
    let profile = state
        .profiles
        .read()
        .await
        .get(&profile_id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("Profile {profile_id} not found")))?;

    state
        .sessions
        .prefill(id, &profile)
        .await
        .map(Json)
        .ok_or_else(|| session_not_found(id))
}

/// POST /api/v1/sessions/:id/generate
///
/// Generates from the session's current draft. Fails with 409 while another
/// generation for the same session is still running.
pub async fn handle_generate_in_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    generate_in_session(&state.sessions, state.generator.clone(), id)
        .await
        .map(Json)
        .map_err(|e| match e {
            GenerateError::Begin(BeginError::NotFound) => session_not_found(id),
            GenerateError::Begin(BeginError::InFlight) => AppError::Conflict(
                "A note is already being generated for this session".to_string(),
            ),
            GenerateError::Begin(BeginError::Invalid(missing)) => {
                AppError::Validation(missing.to_string())
            }
            GenerateError::Failed => AppError::GenerationFailed,
            GenerateError::Discarded => {
                AppError::NotFound(format!("Session {id} was closed during generation"))
            }
        })
}
