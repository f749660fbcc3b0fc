use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use crate::notes::builder::NoteGenerator;
use crate::profiles::editor::ProfileEditor;
use crate::profiles::store::ProfileStore;
use crate::sessions::SessionRegistry;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// When both are needed, lock `editor` before `profiles`.
#[derive(Clone)]
pub struct AppState {
    pub profiles: Arc<RwLock<ProfileStore>>,
    /// Profile manager's add/edit form. One editor per process.
    pub editor: Arc<Mutex<ProfileEditor>>,
    pub sessions: SessionRegistry,
    /// Pluggable note generator. Default: LlmNoteGenerator.
    pub generator: Arc<dyn NoteGenerator>,
}

impl AppState {
    pub fn new(profiles: ProfileStore, generator: Arc<dyn NoteGenerator>) -> Self {
        Self {
            profiles: Arc::new(RwLock::new(profiles)),
            editor: Arc::new(Mutex::new(ProfileEditor::default())),
            sessions: SessionRegistry::default(),
            generator,
        }
    }
}
