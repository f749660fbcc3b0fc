//! Generator sessions — one per open note generator view.
//!
//! A session holds the in-progress draft, the last successful note, and at most
//! one in-flight generation. The in-flight generation is identified by a
//! [`RequestHandle`]; its result is applied only if the handle is still the
//! session's current one when it completes. Deleting the session invalidates
//! the handle, so a late result is discarded.
//!
//! The registry lock is never held across the generation call.

pub mod handlers;

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::notes::builder::NoteGenerator;
use crate::notes::models::{GeneratedNote, GenerationDraft, GenerationRequest, MissingFields};
use crate::notes::voice::{check_note, VoiceReport};
use crate::profiles::models::Profile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Idle,
    Generating,
}

#[derive(Debug)]
struct GeneratorSession {
    draft: GenerationDraft,
    note: Option<GeneratedNote>,
    voice_check: Option<VoiceReport>,
    in_flight: Option<u64>,
    next_ticket: u64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl GeneratorSession {
    fn new() -> Self {
        let now = Utc::now();
        Self {
            draft: GenerationDraft::default(),
            note: None,
            voice_check: None,
            in_flight: None,
            next_ticket: 0,
            created_at: now,
            updated_at: now,
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    fn view(&self, id: Uuid) -> SessionView {
        SessionView {
            id,
            status: if self.in_flight.is_some() {
                SessionStatus::Generating
            } else {
                SessionStatus::Idle
            },
            draft: self.draft.clone(),
            note: self.note.clone(),
            voice_check: self.voice_check.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Serializable snapshot of a session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub id: Uuid,
    pub status: SessionStatus,
    pub draft: GenerationDraft,
    pub note: Option<GeneratedNote>,
    pub voice_check: Option<VoiceReport>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Ties an in-flight generation to the session that started it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestHandle {
    session_id: Uuid,
    ticket: u64,
}

#[derive(Debug, PartialEq, Eq)]
pub enum BeginError {
    NotFound,
    InFlight,
    Invalid(MissingFields),
}

#[derive(Debug, PartialEq, Eq)]
pub enum GenerateError {
    Begin(BeginError),
    /// The generator failed. The session is idle again with its previous note intact.
    Failed,
    /// The session was deleted while the call was outstanding; the result was dropped.
    Discarded,
}

#[derive(Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<Mutex<HashMap<Uuid, GeneratorSession>>>,
}

impl SessionRegistry {
    pub async fn create(&self) -> SessionView {
        let id = Uuid::new_v4();
        let session = GeneratorSession::new();
        let view = session.view(id);
        self.sessions.lock().await.insert(id, session);
        info!("Opened generator session {id}");
        view
    }

    pub async fn view(&self, id: Uuid) -> Option<SessionView> {
        self.sessions.lock().await.get(&id).map(|s| s.view(id))
    }

    /// Tears a session down. Any in-flight handle for it becomes invalid.
    pub async fn remove(&self, id: Uuid) -> bool {
        let removed = self.sessions.lock().await.remove(&id);
        if let Some(session) = &removed {
            if session.in_flight.is_some() {
                info!("Closed generator session {id} mid-generation; its result will be dropped");
            } else {
                info!("Closed generator session {id}");
            }
        }
        removed.is_some()
    }

    pub async fn update_draft(&self, id: Uuid, patch: GenerationDraft) -> Option<SessionView> {
        let mut sessions = self.sessions.lock().await;
        let session = sessions.get_mut(&id)?;
        session.draft.merge(patch);
        session.touch();
        Some(session.view(id))
    }

    pub async fn prefill(&self, id: Uuid, profile: &Profile) -> Option<SessionView> {
        let mut sessions = self.sessions.lock().await;
        let session = sessions.get_mut(&id)?;
        session.draft.prefill_from(profile);
        session.touch();
        Some(session.view(id))
    }

    /// Validates the session's draft and marks it in flight.
    ///
    /// Nothing changes when the draft is invalid or a generation is already running.
    pub async fn begin_generation(
        &self,
        id: Uuid,
    ) -> Result<(RequestHandle, GenerationRequest), BeginError> {
        let mut sessions = self.sessions.lock().await;
        let session = sessions.get_mut(&id).ok_or(BeginError::NotFound)?;
        if session.in_flight.is_some() {
            return Err(BeginError::InFlight);
        }
        let request = session.draft.into_request().map_err(BeginError::Invalid)?;

        session.next_ticket += 1;
        let ticket = session.next_ticket;
        session.in_flight = Some(ticket);
        session.touch();

        Ok((
            RequestHandle {
                session_id: id,
                ticket,
            },
            request,
        ))
    }

    /// Finishes a generation. `outcome` is `None` on failure.
    ///
    /// Returns `false` when the handle is stale and the outcome was discarded.
    /// On failure the session goes back to idle with its previous note untouched.
    pub async fn complete(
        &self,
        handle: RequestHandle,
        outcome: Option<(GeneratedNote, VoiceReport)>,
    ) -> bool {
        let mut sessions = self.sessions.lock().await;
        let Some(session) = sessions.get_mut(&handle.session_id) else {
            debug!("Dropping result for closed session {}", handle.session_id);
            return false;
        };
        if session.in_flight != Some(handle.ticket) {
            debug!(
                "Dropping stale result (ticket {}) for session {}",
                handle.ticket, handle.session_id
            );
            return false;
        }

        session.in_flight = None;
        if let Some((note, report)) = outcome {
            session.note = Some(note);
            session.voice_check = Some(report);
        }
        session.touch();
        true
    }
}

/// Runs one generation for a session: begin, call the generator, complete.
///
/// The call runs on its own task, so it finishes and records its result even if
/// the caller stops waiting.
pub async fn generate_in_session(
    registry: &SessionRegistry,
    generator: Arc<dyn NoteGenerator>,
    id: Uuid,
) -> Result<SessionView, GenerateError> {
    let (handle, request) = registry
        .begin_generation(id)
        .await
        .map_err(GenerateError::Begin)?;

    let task_registry = registry.clone();
    let task = tokio::spawn(async move {
        match generator.generate(&request).await {
            Ok(note) => {
                let report = check_note(&note, request.length);
                if task_registry.complete(handle, Some((note, report))).await {
                    Ok(())
                } else {
                    Err(GenerateError::Discarded)
                }
            }
            Err(e) => {
                warn!("Generation failed for session {id}: {e}");
                task_registry.complete(handle, None).await;
                Err(GenerateError::Failed)
            }
        }
    });

    match task.await {
        Ok(Ok(())) => registry.view(id).await.ok_or(GenerateError::Discarded),
        Ok(Err(e)) => Err(e),
        Err(join_error) => {
            warn!("Generation task for session {id} aborted: {join_error}");
            registry.complete(handle, None).await;
            Err(GenerateError::Failed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notes::builder::GenerationError;
    use crate::profiles::models::seed_profiles;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;

    /// Scripted generator: returns the body it was built with, or fails when `None`.
    struct FakeGenerator {
        body: Option<&'static str>,
        calls: AtomicUsize,
    }

    impl FakeGenerator {
        fn new(body: Option<&'static str>) -> Arc<Self> {
            Arc::new(Self {
                body,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl NoteGenerator for FakeGenerator {
        async fn generate(
            &self,
            _request: &GenerationRequest,
        ) -> Result<GeneratedNote, GenerationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let body = self.body.ok_or(GenerationError::MissingBody)?;
            Ok(GeneratedNote {
                id: Uuid::new_v4().to_string(),
                subject: None,
                body: body.to_string(),
                alternates: vec![],
                score: None,
                created_at: Utc::now(),
            })
        }
    }

    /// Blocks until released, so tests can act while a call is outstanding.
    struct GatedGenerator {
        gate: Arc<Notify>,
    }

    #[async_trait]
    impl NoteGenerator for GatedGenerator {
        async fn generate(
            &self,
            _request: &GenerationRequest,
        ) -> Result<GeneratedNote, GenerationError> {
            self.gate.notified().await;
            Ok(GeneratedNote {
                id: "late".to_string(),
                subject: None,
                body: "Late".to_string(),
                alternates: vec![],
                score: None,
                created_at: Utc::now(),
            })
        }
    }

    fn valid_draft() -> GenerationDraft {
        GenerationDraft {
            recipient_name: Some("Jordan Lee".to_string()),
            occasion: Some("Coffee meeting".to_string()),
            detail: Some("remembered my dog's name".to_string()),
            ..Default::default()
        }
    }

    async fn ready_session(registry: &SessionRegistry) -> Uuid {
        let id = registry.create().await.id;
        registry.update_draft(id, valid_draft()).await.unwrap();
        id
    }

    #[tokio::test]
    async fn test_successful_generation_sets_note_and_returns_to_idle() {
        let registry = SessionRegistry::default();
        let id = ready_session(&registry).await;
        let generator = FakeGenerator::new(Some("Thanks for coffee."));

        let view = generate_in_session(&registry, generator.clone(), id)
            .await
            .unwrap();

        assert_eq!(view.status, SessionStatus::Idle);
        assert_eq!(view.note.unwrap().body, "Thanks for coffee.");
        assert!(view.voice_check.unwrap().passed);
        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_invalid_draft_never_reaches_generator() {
        let registry = SessionRegistry::default();
        let id = registry.create().await.id;
        registry
            .update_draft(
                id,
                GenerationDraft {
                    recipient_name: Some("Jordan Lee".to_string()),
                    ..Default::default()
                },
            )
            .await;
        let generator = FakeGenerator::new(Some("unused"));

        let err = generate_in_session(&registry, generator.clone(), id)
            .await
            .unwrap_err();

        assert_eq!(
            err,
            GenerateError::Begin(BeginError::Invalid(MissingFields(vec![
                "occasion", "detail"
            ])))
        );
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
        assert_eq!(registry.view(id).await.unwrap().status, SessionStatus::Idle);
    }

    #[tokio::test]
    async fn test_failed_regeneration_keeps_previous_note() {
        let registry = SessionRegistry::default();
        let id = ready_session(&registry).await;

        let first = generate_in_session(&registry, FakeGenerator::new(Some("First draft")), id)
            .await
            .unwrap();
        let first_note = first.note.unwrap();

        let err = generate_in_session(&registry, FakeGenerator::new(None), id)
            .await
            .unwrap_err();
        assert_eq!(err, GenerateError::Failed);

        let view = registry.view(id).await.unwrap();
        assert_eq!(view.status, SessionStatus::Idle);
        assert_eq!(view.note.unwrap(), first_note);
    }

    #[tokio::test]
    async fn test_second_submit_while_in_flight_is_rejected() {
        let registry = SessionRegistry::default();
        let id = ready_session(&registry).await;

        let (_handle, _request) = registry.begin_generation(id).await.unwrap();
        assert_eq!(
            registry.view(id).await.unwrap().status,
            SessionStatus::Generating
        );
        assert_eq!(
            registry.begin_generation(id).await.unwrap_err(),
            BeginError::InFlight
        );
    }

    #[tokio::test]
    async fn test_late_result_after_teardown_is_discarded() {
        let registry = SessionRegistry::default();
        let id = ready_session(&registry).await;
        let gate = Arc::new(Notify::new());
        let generator = Arc::new(GatedGenerator { gate: gate.clone() });

        let pending = {
            let registry = registry.clone();
            tokio::spawn(async move { generate_in_session(&registry, generator, id).await })
        };

        // Wait until the session is marked in flight, then tear it down.
        while registry.view(id).await.map(|v| v.status) != Some(SessionStatus::Generating) {
            tokio::task::yield_now().await;
        }
        assert!(registry.remove(id).await);
        gate.notify_one();

        let result = pending.await.unwrap();
        assert_eq!(result.unwrap_err(), GenerateError::Discarded);
        assert!(registry.view(id).await.is_none());
    }

    #[tokio::test]
    async fn test_stale_handle_cannot_complete() {
        let registry = SessionRegistry::default();
        let id = ready_session(&registry).await;

        let (handle, _) = registry.begin_generation(id).await.unwrap();
        assert!(registry.complete(handle, None).await);
        // Completing the same handle twice is a no-op.
        assert!(!registry.complete(handle, None).await);
    }

    #[tokio::test]
    async fn test_prefill_copies_profile_into_draft() {
        let registry = SessionRegistry::default();
        let id = registry.create().await.id;
        let taylor = &seed_profiles()[2];

        let view = registry.prefill(id, taylor).await.unwrap();
        assert_eq!(view.draft.recipient_name.as_deref(), Some("Taylor Kim"));
        assert_eq!(view.draft.channel, Some(taylor.channel));
        assert_eq!(view.draft.tone, Some(taylor.formality));
    }

    #[tokio::test]
    async fn test_unknown_session_is_not_found() {
        let registry = SessionRegistry::default();
        assert_eq!(
            registry.begin_generation(Uuid::new_v4()).await.unwrap_err(),
            BeginError::NotFound
        );
        assert!(!registry.remove(Uuid::new_v4()).await);
    }
}
