use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::profiles::models::{Channel, Formality, Profile};

/// Target length of a note relative to the channel's norm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Length {
    Short,
    #[default]
    Standard,
    Elevated,
}

impl Length {
    pub fn label(self) -> &'static str {
        match self {
            Length::Short => "Short",
            Length::Standard => "Standard",
            Length::Elevated => "Elevated",
        }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Form state for a generation. Nothing is required until it is turned into a request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationDraft {
    pub recipient_name: Option<String>,
    pub recipient_role: Option<String>,
    pub occasion: Option<String>,
    pub detail: Option<String>,
    pub impact: Option<String>,
    pub next_step: Option<String>,
    pub channel: Option<Channel>,
    pub tone: Option<Formality>,
    pub length: Option<Length>,
}

/// A validated request. Only produced by [`GenerationDraft::into_request`], so the
/// three required fields are always present and non-blank.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationRequest {
    pub recipient_name: String,
    pub occasion: String,
    pub detail: String,
    pub recipient_role: Option<String>,
    pub impact: Option<String>,
    pub next_step: Option<String>,
    pub channel: Channel,
    pub tone: Formality,
    pub length: Length,
}

/// The required fields a draft is missing, in form order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingFields(pub Vec<&'static str>);

impl fmt::Display for MissingFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Please fill in the minimum required fields: Name, Occasion, and Detail (missing: {})",
            self.0.join(", ")
        )
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl GenerationDraft {
    /// Overlays every field present in `patch`.
    pub fn merge(&mut self, patch: GenerationDraft) {
        macro_rules! overlay {
            ($($field:ident),*) => {
                $(if patch.$field.is_some() {
                    self.$field = patch.$field;
                })*
            };
        }
        overlay!(
            recipient_name,
            recipient_role,
            occasion,
            detail,
            impact,
            next_step,
            channel,
            tone,
            length
        );
    }

    /// Quick-fill: copies the profile's name, role, formality and channel.
    pub fn prefill_from(&mut self, profile: &Profile) {
        self.recipient_name = Some(profile.name.clone());
        self.recipient_role = Some(profile.role.clone());
        self.tone = Some(profile.formality);
        self.channel = Some(profile.channel);
    }

    /// Validates the draft. Blank optional fields are treated as absent.
    pub fn into_request(&self) -> Result<GenerationRequest, MissingFields> {
        let recipient_name = non_blank(&self.recipient_name);
        let occasion = non_blank(&self.occasion);
        let detail = non_blank(&self.detail);

        match (recipient_name, occasion, detail) {
            (Some(recipient_name), Some(occasion), Some(detail)) => Ok(GenerationRequest {
                recipient_name,
                occasion,
                detail,
                recipient_role: non_blank(&self.recipient_role),
                impact: non_blank(&self.impact),
                next_step: non_blank(&self.next_step),
                channel: self.channel.unwrap_or_default(),
                tone: self.tone.unwrap_or_default(),
                length: self.length.unwrap_or_default(),
            }),
            (name, occasion, detail) => {
                let mut missing = Vec::new();
                if name.is_none() {
                    missing.push("recipient_name");
                }
                if occasion.is_none() {
                    missing.push("occasion");
                }
                if detail.is_none() {
                    missing.push("detail");
                }
                Err(MissingFields(missing))
            }
        }
    }
}

/// A labeled alternate phrasing of the primary draft, e.g. "Tighter".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alternate {
    pub label: String,
    pub content: String,
}

/// The note returned for one request. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedNote {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub body: String,
    #[serde(default)]
    pub alternates: Vec<Alternate>,
    /// Reserved; nothing populates it yet.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    pub created_at: DateTime<Utc>,
}
