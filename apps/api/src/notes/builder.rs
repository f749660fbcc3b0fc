//! Note Request Builder — turns a validated request into one LLM call and a typed note.
//!
//! Flow: system instruction (knowledge base) + request prompt + output schema →
//!       one call through llm_client → schema validation → fresh id.
//!
//! Validation of the request is the caller's job and is enforced by the type:
//! a `GenerationRequest` only comes out of `GenerationDraft::into_request`.

use async_trait::async_trait;
use chrono::Utc;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::knowledge::{channel_guidance, HARD_RULES, PLAYBOOK, VOICE};
use crate::llm_client::prompts::STRUCTURED_OUTPUT_INSTRUCTION;
use crate::llm_client::{LlmClient, LlmError, OutputTool};
use crate::notes::models::{GeneratedNote, GenerationRequest};
use crate::notes::prompts::{
    DEFAULT_IMPACT, INTENSIFIERS_ALLOWED, INTENSIFIERS_BANNED, NOTE_PROMPT_TEMPLATE,
    NOTE_SYSTEM_TEMPLATE, NOTE_TOOL_DESCRIPTION, NOTE_TOOL_NAME, NOT_PROVIDED, SUBJECT_OMITTED,
    SUBJECT_REQUIRED,
};
use crate::notes::schema::{note_output_schema, parse_note_payload};
use crate::notes::tone::{allows_intensifiers, get_tone_guidance, length_target};

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("generation service call failed: {0}")]
    Upstream(#[from] LlmError),

    #[error("response is missing the required 'body' field")]
    MissingBody,

    #[error("response does not match the note schema: {0}")]
    Schema(String),

    #[error("failed to build prompt: {0}")]
    Prompt(#[from] serde_json::Error),
}

/// The note generator seam. Implement this to swap backends without touching
/// handlers or sessions.
///
/// Carried in `AppState` as `Arc<dyn NoteGenerator>`.
#[async_trait]
pub trait NoteGenerator: Send + Sync {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GeneratedNote, GenerationError>;
}

/// The production generator: one Claude call per request.
pub struct LlmNoteGenerator {
    llm: LlmClient,
    system: String,
    schema: serde_json::Value,
}

impl LlmNoteGenerator {
    pub fn new(llm: LlmClient) -> Self {
        Self {
            llm,
            system: build_system_instruction(),
            schema: note_output_schema(),
        }
    }
}

#[async_trait]
impl NoteGenerator for LlmNoteGenerator {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GeneratedNote, GenerationError> {
        let prompt = build_note_prompt(request)?;
        let tool = OutputTool {
            name: NOTE_TOOL_NAME,
            description: NOTE_TOOL_DESCRIPTION,
            input_schema: &self.schema,
        };

        info!(
            "Generating {} note ({}, {}) for {}",
            request.channel, request.tone, request.length, request.recipient_name
        );
        let payload = self
            .llm
            .call_structured(&prompt, &self.system, &tool)
            .await?;

        let content = parse_note_payload(payload, request.channel)?;

        Ok(GeneratedNote {
            id: Uuid::new_v4().to_string(),
            subject: content.subject,
            body: content.body,
            alternates: content.alternates,
            score: None,
            created_at: Utc::now(),
        })
    }
}

/// The fixed style-guide preamble sent as the system instruction on every call.
pub fn build_system_instruction() -> String {
    let rules = HARD_RULES
        .iter()
        .enumerate()
        .map(|(i, rule)| format!("{}. {rule}", i + 1))
        .collect::<Vec<_>>()
        .join("\n");

    fill_template(
        NOTE_SYSTEM_TEMPLATE,
        &[
            ("voice", VOICE),
            ("playbook", PLAYBOOK),
            ("rules", &rules),
            ("structured_output", STRUCTURED_OUTPUT_INSTRUCTION),
        ],
    )
}

/// Fills the per-request prompt template.
pub fn build_note_prompt(request: &GenerationRequest) -> Result<String, GenerationError> {
    let tone = get_tone_guidance(request.tone);
    let tone_json = serde_json::to_string(&serde_json::json!({
        "register": tone.register,
        "greeting_examples": tone.greeting_examples,
        "avoid": tone.avoid,
    }))?;

    let guidance = channel_guidance(request.channel);
    let subject_rule = if request.channel.has_subject() {
        SUBJECT_REQUIRED
    } else {
        SUBJECT_OMITTED
    };
    let intensifier_rule = if allows_intensifiers(request.length) {
        INTENSIFIERS_ALLOWED
    } else {
        INTENSIFIERS_BANNED
    };

    let length_target = length_target(request.channel, request.length);

    Ok(fill_template(
        NOTE_PROMPT_TEMPLATE,
        &[
            ("tone_json", &tone_json),
            ("length_target", &length_target),
            ("format", guidance.format),
            ("intensifier_rule", intensifier_rule),
            ("subject_rule", subject_rule),
            ("channel", request.channel.label()),
            ("tone", request.tone.label()),
            ("length", request.length.label()),
            ("recipient_name", &request.recipient_name),
            (
                "recipient_role",
                request.recipient_role.as_deref().unwrap_or(NOT_PROVIDED),
            ),
            ("occasion", &request.occasion),
            ("detail", &request.detail),
            ("impact", request.impact.as_deref().unwrap_or(DEFAULT_IMPACT)),
            (
                "next_step",
                request.next_step.as_deref().unwrap_or(NOT_PROVIDED),
            ),
        ],
    ))
}

/// Substitutes `{name}` placeholders in a single pass over `template`.
///
/// Substituted values are never rescanned, so user text that happens to contain
/// `{occasion}` stays literal. Braces that don't name a known placeholder are kept.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let matched = after.find('}').and_then(|end| {
            let key = &after[..end];
            values
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (*value, end))
        });
        match matched {
            Some((value, end)) => {
                out.push_str(value);
                rest = &after[end + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}
