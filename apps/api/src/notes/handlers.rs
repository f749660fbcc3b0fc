//! Axum route handlers for stateless note generation.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::notes::models::{GeneratedNote, GenerationDraft};
use crate::notes::voice::{check_note, VoiceReport};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct GenerateNoteResponse {
    pub note: GeneratedNote,
    pub voice_check: VoiceReport,
}

/// POST /api/v1/notes/generate
///
/// Validates the draft, then makes exactly one generation call.
/// A draft missing name, occasion, or detail never reaches the generator.
pub async fn handle_generate_note(
    State(state): State<AppState>,
    Json(draft): Json<GenerationDraft>,
) -> Result<Json<GenerateNoteResponse>, AppError> {
    let request = draft
        .into_request()
        .map_err(|missing| AppError::Validation(missing.to_string()))?;

    let note = state.generator.generate(&request).await?;
    let voice_check = check_note(&note, request.length);

    Ok(Json(GenerateNoteResponse { note, voice_check }))
}
