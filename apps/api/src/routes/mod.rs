pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::knowledge::handlers as knowledge;
use crate::notes::handlers as notes;
use crate::profiles::handlers as profiles;
use crate::sessions::handlers as sessions;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Knowledge base
        .route("/api/v1/knowledge", get(knowledge::handle_get_knowledge))
        // Profiles
        .route(
            "/api/v1/profiles",
            get(profiles::handle_list_profiles).post(profiles::handle_save_profile),
        )
        .route(
            "/api/v1/profiles/editor",
            get(profiles::handle_get_editor)
                .patch(profiles::handle_update_editor)
                .delete(profiles::handle_cancel_editor),
        )
        .route(
            "/api/v1/profiles/editor/add",
            post(profiles::handle_begin_add),
        )
        .route(
            "/api/v1/profiles/editor/edit/:id",
            post(profiles::handle_begin_edit),
        )
        .route(
            "/api/v1/profiles/editor/save",
            post(profiles::handle_save_editor),
        )
        .route(
            "/api/v1/profiles/:id",
            get(profiles::handle_get_profile)
                .put(profiles::handle_update_profile)
                .delete(profiles::handle_delete_profile),
        )
        // Stateless generation
        .route("/api/v1/notes/generate", post(notes::handle_generate_note))
        // Generator sessions
        .route("/api/v1/sessions", post(sessions::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(sessions::handle_get_session).delete(sessions::handle_close_session),
        )
        .route(
            "/api/v1/sessions/:id/draft",
            patch(sessions::handle_update_draft),
        )
        .route(
            "/api/v1/sessions/:id/prefill/:profile_id",
            post(sessions::handle_prefill),
        )
        .route(
            "/api/v1/sessions/:id/generate",
            post(sessions::handle_generate_in_session),
        )
        .with_state(state)
}
