//! Profile editor — the manager view's single in-progress edit.
//!
//! At most one draft exists at a time. Starting an add or an edit discards
//! whatever was there before.

use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use crate::profiles::models::{Profile, ProfileDraft};
use crate::profiles::store::{ProfileStore, StoreError};

#[derive(Debug, Error)]
pub enum EditorError {
    /// The profile being edited was removed before the edit was saved.
    #[error("Profile {0} no longer exists")]
    ProfileGone(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EditorMode {
    Idle,
    Adding,
    Editing,
}

#[derive(Debug, Default)]
pub struct ProfileEditor {
    editing_id: Option<String>,
    draft: Option<ProfileDraft>,
}

/// Serializable view of the editor.
#[derive(Debug, Serialize)]
pub struct EditorState {
    pub mode: EditorMode,
    pub editing_id: Option<String>,
    pub draft: Option<ProfileDraft>,
}

impl ProfileEditor {
    pub fn state(&self) -> EditorState {
        EditorState {
            mode: self.mode(),
            editing_id: self.editing_id.clone(),
            draft: self.draft.clone(),
        }
    }

    pub fn mode(&self) -> EditorMode {
        match (&self.editing_id, &self.draft) {
            (Some(_), _) => EditorMode::Editing,
            (None, Some(_)) => EditorMode::Adding,
            (None, None) => EditorMode::Idle,
        }
    }

    pub fn begin_add(&mut self) {
        self.editing_id = None;
        self.draft = Some(ProfileDraft::default());
    }

    pub fn begin_edit(&mut self, profile: &Profile) {
        self.editing_id = Some(profile.id.clone());
        self.draft = Some(ProfileDraft::from(profile));
    }

    /// Merges `patch` into the active draft. Returns `false` when nothing is being edited.
    pub fn update(&mut self, patch: ProfileDraft) -> bool {
        match self.draft.as_mut() {
            Some(draft) => {
                draft.merge(patch);
                true
            }
            None => false,
        }
    }

    pub fn cancel(&mut self) {
        self.editing_id = None;
        self.draft = None;
    }

    /// Saves the active draft through the store and clears the editor.
    ///
    /// Returns `Ok(None)` when there is no draft. An edit whose profile has since
    /// been removed is dropped rather than re-created. On a blank name the draft
    /// is kept so the caller can fix it and retry.
    pub fn save(&mut self, store: &mut ProfileStore) -> Result<Option<Profile>, EditorError> {
        if self.draft.is_none() {
            return Ok(None);
        }
        if let Some(id) = self.editing_id.clone() {
            if store.get(&id).is_none() {
                warn!("Dropping edit for removed profile {id}");
                self.cancel();
                return Err(EditorError::ProfileGone(id));
            }
        }
        let Some(draft) = self.draft.as_ref() else {
            return Ok(None);
        };
        if draft.valid_name().is_none() {
            return Err(StoreError::BlankName.into());
        }

        let mut draft = draft.clone();
        draft.id = self.editing_id.clone();
        let profile = store.save(draft)?;
        self.cancel();
        Ok(Some(profile))
    }
}
