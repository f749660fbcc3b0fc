//! Axum route handlers for the Profiles API and the profile editor.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::errors::AppError;
use crate::profiles::editor::{EditorError, EditorState};
use crate::profiles::models::{Profile, ProfileDraft};
use crate::state::AppState;

/// Runs a store mutation on the blocking pool. Every mutation ends in a
/// synchronous write, fsync and rename of the profiles file.
async fn run_blocking<T, F>(mutation: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, AppError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(mutation).await.map_err(|e| {
        AppError::Internal(anyhow::anyhow!("spawn_blocking failed in profile store: {e}"))
    })?
}

fn profile_not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Profile {id} not found"))
}

// ────────────────────────────────────────────────────────────────────────────
// Collection
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/profiles
pub async fn handle_list_profiles(State(state): State<AppState>) -> Json<Vec<Profile>> {
    Json(state.profiles.read().await.list().to_vec())
}

/// POST /api/v1/profiles
///
/// Updates in place when the body carries the id of an existing profile,
/// otherwise appends under a fresh id.
pub async fn handle_save_profile(
    State(state): State<AppState>,
    Json(draft): Json<ProfileDraft>,
) -> Result<(StatusCode, Json<Profile>), AppError> {
    let mut store = state.profiles.clone().write_owned().await;
    run_blocking(move || {
        let is_update = draft.id.as_deref().is_some_and(|id| store.get(id).is_some());
        let profile = store.save(draft)?;
        let status = if is_update {
            StatusCode::OK
        } else {
            StatusCode::CREATED
        };
        Ok((status, Json(profile)))
    })
    .await
}

/// GET /api/v1/profiles/:id
pub async fn handle_get_profile(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Profile>, AppError> {
    state
        .profiles
        .read()
        .await
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| profile_not_found(&id))
}

/// PUT /api/v1/profiles/:id
///
/// Replaces the profile in place. Omitted fields fall back to their defaults.
pub async fn handle_update_profile(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(mut draft): Json<ProfileDraft>,
) -> Result<Json<Profile>, AppError> {
    let mut store = state.profiles.clone().write_owned().await;
    if store.get(&id).is_none() {
        return Err(profile_not_found(&id));
    }
    draft.id = Some(id);
    run_blocking(move || Ok(Json(store.save(draft)?))).await
}

/// DELETE /api/v1/profiles/:id
///
/// Idempotent: deleting an unknown id succeeds and changes nothing.
pub async fn handle_delete_profile(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let mut store = state.profiles.clone().write_owned().await;
    run_blocking(move || {
        store.remove(&id)?;
        Ok(StatusCode::NO_CONTENT)
    })
    .await
}

// ────────────────────────────────────────────────────────────────────────────
// Editor
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/profiles/editor
pub async fn handle_get_editor(State(state): State<AppState>) -> Json<EditorState> {
    Json(state.editor.lock().await.state())
}

/// POST /api/v1/profiles/editor/add
pub async fn handle_begin_add(State(state): State<AppState>) -> Json<EditorState> {
    let mut editor = state.editor.lock().await;
    editor.begin_add();
    Json(editor.state())
}

/// POST /api/v1/profiles/editor/edit/:id
pub async fn handle_begin_edit(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<EditorState>, AppError> {
    let mut editor = state.editor.lock().await;
    let store = state.profiles.read().await;
    let profile = store.get(&id).ok_or_else(|| profile_not_found(&id))?;
    editor.begin_edit(profile);
    Ok(Json(editor.state()))
}

/// PATCH /api/v1/profiles/editor
pub async fn handle_update_editor(
    State(state): State<AppState>,
    Json(patch): Json<ProfileDraft>,
) -> Result<Json<EditorState>, AppError> {
    let mut editor = state.editor.lock().await;
    if !editor.update(patch) {
        return Err(AppError::Validation(
            "No profile is being edited. Start an add or edit first.".to_string(),
        ));
    }
    Ok(Json(editor.state()))
}

/// POST /api/v1/profiles/editor/save
///
/// Saving an edit whose profile was removed meanwhile is a 404 and clears the editor.
pub async fn handle_save_editor(
    State(state): State<AppState>,
) -> Result<Json<Profile>, AppError> {
    let mut editor = state.editor.clone().lock_owned().await;
    let mut store = state.profiles.clone().write_owned().await;
    run_blocking(move || match editor.save(&mut store) {
        Ok(Some(profile)) => Ok(Json(profile)),
        Ok(None) => Err(AppError::Validation(
            "No profile is being edited. Start an add or edit first.".to_string(),
        )),
        Err(EditorError::ProfileGone(id)) => Err(profile_not_found(&id)),
        Err(EditorError::Store(e)) => Err(e.into()),
    })
    .await
}

/// DELETE /api/v1/profiles/editor
pub async fn handle_cancel_editor(State(state): State<AppState>) -> StatusCode {
    state.editor.lock().await.cancel();
    StatusCode::NO_CONTENT
}
