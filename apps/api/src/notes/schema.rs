//! Output contract for note generation: the JSON schema sent to the model, and the
//! validation applied to whatever comes back.
//!
//! Normalization rules:
//! - `subject` is kept only for channels that have one (Email).
//! - Alternates with a blank label or content are dropped.
//! - At most [`MAX_ALTERNATES`] alternates are kept; zero or one is accepted.

use serde::Deserialize;
use serde_json::{json, Value};
use tracing::warn;

use crate::notes::builder::GenerationError;
use crate::notes::models::Alternate;
use crate::profiles::models::Channel;

pub const MAX_ALTERNATES: usize = 2;

/// Machine-checkable schema for the model's answer.
pub fn note_output_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "body": { "type": "string" },
            "subject": { "type": "string" },
            "alternates": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "label": { "type": "string" },
                        "content": { "type": "string" }
                    },
                    "required": ["label", "content"]
                }
            }
        },
        "required": ["body"]
    })
}

#[derive(Debug, Deserialize)]
struct NotePayload {
    body: String,
    #[serde(default)]
    subject: Option<String>,
    #[serde(default)]
    alternates: Option<Vec<Alternate>>,
}

/// The validated, normalized content of a model answer.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteContent {
    pub subject: Option<String>,
    pub body: String,
    pub alternates: Vec<Alternate>,
}

/// Validates a raw payload against the schema and normalizes it for `channel`.
pub fn parse_note_payload(value: Value, channel: Channel) -> Result<NoteContent, GenerationError> {
    let Some(object) = value.as_object() else {
        return Err(GenerationError::Schema(format!(
            "expected a JSON object, got {}",
            json_type(&value)
        )));
    };
    if object.get("body").map_or(true, Value::is_null) {
        return Err(GenerationError::MissingBody);
    }

    let payload: NotePayload =
        serde_json::from_value(value).map_err(|e| GenerationError::Schema(e.to_string()))?;

    if payload.body.trim().is_empty() {
        return Err(GenerationError::MissingBody);
    }

    let subject = payload
        .subject
        .filter(|s| !s.trim().is_empty())
        .filter(|_| channel.has_subject());

    let mut alternates: Vec<Alternate> = payload
        .alternates
        .unwrap_or_default()
        .into_iter()
        .filter(|a| !a.label.trim().is_empty() && !a.content.trim().is_empty())
        .collect();
    if alternates.len() > MAX_ALTERNATES {
        warn!(
            "Model returned {} alternates; keeping the first {MAX_ALTERNATES}",
            alternates.len()
        );
        alternates.truncate(MAX_ALTERNATES);
    }

    Ok(NoteContent {
        subject,
        body: payload.body,
        alternates,
    })
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
