//! Profile Store — the single owned collection of recipient profiles.
//!
//! The collection is loaded once at startup and written through to a JSON file
//! after every mutation. The file holds a versioned document:
//!
//! ```json
//! {"version": 1, "profiles": [ ... ]}
//! ```
//!
//! A bare array (the old unversioned blob) is migrated on load. Anything that
//! cannot be read or validated falls back to the seed profiles; load never fails.

use std::collections::HashSet;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::profiles::models::{seed_profiles, Profile, ProfileDraft};

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Profile name is required")]
    BlankName,

    #[error("I/O error writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredProfiles {
    version: u32,
    profiles: Vec<Profile>,
}

/// Why a stored document was rejected. Only ever logged.
#[derive(Debug, Error)]
enum LoadError {
    #[error("unreadable: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported schema version {0}")]
    UnsupportedVersion(u64),
    #[error("unrecognized document shape")]
    UnknownShape,
    #[error("profile at position {0} has a blank name")]
    BlankName(usize),
    #[error("duplicate profile id '{0}'")]
    DuplicateId(String),
}

pub struct ProfileStore {
    path: PathBuf,
    profiles: Vec<Profile>,
}

impl ProfileStore {
    /// Loads the collection from `path`, falling back to the seed profiles when the
    /// file is absent, unreadable, malformed, or fails validation.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        let profiles = if !path.exists() {
            info!(
                "No profile store at {}; starting from seed profiles",
                path.display()
            );
            seed_profiles()
        } else {
            match read_document(&path) {
                Ok(profiles) => {
                    info!("Loaded {} profiles from {}", profiles.len(), path.display());
                    profiles
                }
                Err(e) => {
                    warn!(
                        "Profile store at {} rejected ({e}); falling back to seed profiles",
                        path.display()
                    );
                    seed_profiles()
                }
            }
        };

        Self { path, profiles }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All profiles in insertion order.
    pub fn list(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn get(&self, id: &str) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.id == id)
    }

    /// Saves a draft. A draft whose id matches an existing profile replaces it in
    /// place; anything else is appended under a fresh id.
    pub fn save(&mut self, draft: ProfileDraft) -> Result<Profile, StoreError> {
        let existing = draft
            .id
            .as_deref()
            .and_then(|id| self.profiles.iter().position(|p| p.id == id));

        match existing {
            Some(index) => {
                let id = self.profiles[index].id.clone();
                let profile = draft.into_profile(id).ok_or(StoreError::BlankName)?;
                let previous = std::mem::replace(&mut self.profiles[index], profile.clone());
                if let Err(e) = self.persist() {
                    self.profiles[index] = previous;
                    return Err(e);
                }
                debug!("Updated profile {} at position {index}", profile.id);
                Ok(profile)
            }
            None => {
                let profile = draft
                    .into_profile(self.fresh_id())
                    .ok_or(StoreError::BlankName)?;
                self.profiles.push(profile.clone());
                if let Err(e) = self.persist() {
                    self.profiles.pop();
                    return Err(e);
                }
                debug!("Added profile {}", profile.id);
                Ok(profile)
            }
        }
    }

    /// Removes the profile with `id`. Returns whether anything was removed; an
    /// unknown id is a no-op and does not touch storage.
    pub fn remove(&mut self, id: &str) -> Result<bool, StoreError> {
        let Some(index) = self.profiles.iter().position(|p| p.id == id) else {
            return Ok(false);
        };
        let removed = self.profiles.remove(index);
        if let Err(e) = self.persist() {
            self.profiles.insert(index, removed);
            return Err(e);
        }
        debug!("Removed profile {id}");
        Ok(true)
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().simple().to_string();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }

    /// Writes the full collection atomically: temp file in the same directory, then rename.
    fn persist(&self) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir).map_err(io_err)?;

        let document = StoredProfiles {
            version: SCHEMA_VERSION,
            profiles: self.profiles.clone(),
        };
        let bytes = serde_json::to_vec_pretty(&document)?;

        let mut tmp = NamedTempFile::new_in(dir).map_err(io_err)?;
        tmp.write_all(&bytes).map_err(io_err)?;
        tmp.as_file().sync_all().map_err(io_err)?;
        tmp.persist(&self.path).map_err(|e| io_err(e.error))?;
        Ok(())
    }
}

fn read_document(path: &Path) -> Result<Vec<Profile>, LoadError> {
    let raw = std::fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&raw)?;
    let profiles = migrate(value)?;
    validate(&profiles)?;
    Ok(profiles)
}

/// Upgrades any known document shape to the current profile list.
fn migrate(value: Value) -> Result<Vec<Profile>, LoadError> {
    match value {
        // v0: the bare array written before the document was versioned
        Value::Array(_) => {
            let profiles: Vec<Profile> = serde_json::from_value(value)?;
            info!("Migrating unversioned profile list to schema v{SCHEMA_VERSION}");
            Ok(profiles)
        }
        Value::Object(ref map) => match map.get("version").and_then(Value::as_u64) {
            Some(v) if v == u64::from(SCHEMA_VERSION) => {
                let doc: StoredProfiles = serde_json::from_value(value)?;
                Ok(doc.profiles)
            }
            Some(v) => Err(LoadError::UnsupportedVersion(v)),
            None => Err(LoadError::UnknownShape),
        },
        _ => Err(LoadError::UnknownShape),
    }
}

fn validate(profiles: &[Profile]) -> Result<(), LoadError> {
    let mut seen = HashSet::new();
    for (index, profile) in profiles.iter().enumerate() {
        if profile.name.trim().is_empty() {
            return Err(LoadError::BlankName(index));
        }
        if !seen.insert(profile.id.as_str()) {
            return Err(LoadError::DuplicateId(profile.id.clone()));
        }
    }
    Ok(())
}
