use std::fmt;

use serde::{Deserialize, Serialize};

/// How formal a note should sound. Also used as the generation tone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Formality {
    Executive,
    // Older stored profiles carry the form label, suffix included.
    #[default]
    #[serde(alias = "Professional (default)")]
    Professional,
    Friendly,
}

impl Formality {
    pub const ALL: [Formality; 3] = [
        Formality::Executive,
        Formality::Professional,
        Formality::Friendly,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Formality::Executive => "Executive",
            Formality::Professional => "Professional",
            Formality::Friendly => "Friendly",
        }
    }
}

impl fmt::Display for Formality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Delivery medium for a note. Drives length targets and whether a subject line exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Channel {
    #[default]
    Email,
    #[serde(rename = "LinkedIn DM")]
    LinkedIn,
    Text,
    Handwritten,
}

impl Channel {
    pub const ALL: [Channel; 4] = [
        Channel::Email,
        Channel::LinkedIn,
        Channel::Text,
        Channel::Handwritten,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Channel::Email => "Email",
            Channel::LinkedIn => "LinkedIn DM",
            Channel::Text => "Text",
            Channel::Handwritten => "Handwritten",
        }
    }

    pub fn has_subject(self) -> bool {
        matches!(self, Channel::Email)
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A stored recipient profile, used only to pre-fill the generation form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub relationship: String,
    #[serde(default)]
    pub formality: Formality,
    #[serde(default)]
    pub channel: Channel,
    #[serde(default)]
    pub notes: String,
}

/// Editable form of a profile. Every field is optional until save.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: Option<String>,
    pub role: Option<String>,
    pub relationship: Option<String>,
    pub formality: Option<Formality>,
    pub channel: Option<Channel>,
    pub notes: Option<String>,
}

impl ProfileDraft {
    /// Overlays every field present in `patch`. The id is never patched.
    pub fn merge(&mut self, patch: ProfileDraft) {
        if patch.name.is_some() {
            self.name = patch.name;
        }
        if patch.role.is_some() {
            self.role = patch.role;
        }
        if patch.relationship.is_some() {
            self.relationship = patch.relationship;
        }
        if patch.formality.is_some() {
            self.formality = patch.formality;
        }
        if patch.channel.is_some() {
            self.channel = patch.channel;
        }
        if patch.notes.is_some() {
            self.notes = patch.notes;
        }
    }

    /// Trimmed name, or `None` when blank or missing.
    pub fn valid_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    /// Builds a profile with the given id, defaulting every optional field.
    /// Returns `None` when the name is blank.
    pub fn into_profile(self, id: String) -> Option<Profile> {
        let name = self.valid_name()?.to_string();
        Some(Profile {
            id,
            name,
            role: self.role.unwrap_or_default(),
            relationship: self.relationship.unwrap_or_default(),
            formality: self.formality.unwrap_or_default(),
            channel: self.channel.unwrap_or_default(),
            notes: self.notes.unwrap_or_default(),
        })
    }
}

impl From<&Profile> for ProfileDraft {
    fn from(profile: &Profile) -> Self {
        ProfileDraft {
            id: Some(profile.id.clone()),
            name: Some(profile.name.clone()),
            role: Some(profile.role.clone()),
            relationship: Some(profile.relationship.clone()),
            formality: Some(profile.formality),
            channel: Some(profile.channel),
            notes: Some(profile.notes.clone()),
        }
    }
}

/// The three example profiles used when nothing usable is stored.
pub fn seed_profiles() -> Vec<Profile> {
    vec![
        Profile {
            id: "1".to_string(),
            name: "Jordan Lee".to_string(),
            role: "VP Marketing, Acme".to_string(),
            relationship: "Prospect".to_string(),
            formality: Formality::Executive,
            channel: Channel::Email,
            notes: "Hates fluff; likes clarity".to_string(),
        },
        Profile {
            id: "2".to_string(),
            name: "Sam Rivera".to_string(),
            role: "Founder, StudioX".to_string(),
            relationship: "Partner".to_string(),
            formality: Formality::Professional,
            channel: Channel::LinkedIn,
            notes: "Fast-moving, direct".to_string(),
        },
        Profile {
            id: "3".to_string(),
            name: "Taylor Kim".to_string(),
            role: "Friend".to_string(),
            relationship: "Friendly".to_string(),
            formality: Formality::Friendly,
            channel: Channel::Text,
            notes: "Keep it light".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_formality_label_is_accepted() {
        let f: Formality = serde_json::from_str("\"Professional (default)\"").unwrap();
        assert_eq!(f, Formality::Professional);
        assert_eq!(serde_json::to_string(&f).unwrap(), "\"Professional\"");
    }

    #[test]
    fn test_linkedin_channel_uses_display_label_on_the_wire() {
        assert_eq!(
            serde_json::to_string(&Channel::LinkedIn).unwrap(),
            "\"LinkedIn DM\""
        );
        let c: Channel = serde_json::from_str("\"LinkedIn DM\"").unwrap();
        assert_eq!(c, Channel::LinkedIn);
    }

    #[test]
    fn test_only_email_has_subject() {
        assert!(Channel::Email.has_subject());
        assert!(!Channel::Text.has_subject());
        assert!(!Channel::LinkedIn.has_subject());
        assert!(!Channel::Handwritten.has_subject());
    }

    #[test]
    fn test_draft_defaults_optional_fields() {
        let draft = ProfileDraft {
            name: Some("  Alex Doe ".to_string()),
            ..Default::default()
        };
        let profile = draft.into_profile("abc".to_string()).unwrap();
        assert_eq!(profile.name, "Alex Doe");
        assert_eq!(profile.role, "");
        assert_eq!(profile.formality, Formality::Professional);
        assert_eq!(profile.channel, Channel::Email);
    }

    #[test]
    fn test_draft_with_blank_name_is_rejected() {
        let draft = ProfileDraft {
            name: Some("   ".to_string()),
            role: Some("CTO".to_string()),
            ..Default::default()
        };
        assert!(draft.into_profile("x".to_string()).is_none());
        assert!(ProfileDraft::default().into_profile("y".to_string()).is_none());
    }

    #[test]
    fn test_merge_overlays_present_fields_only() {
        let mut draft = ProfileDraft {
            id: Some("1".to_string()),
            name: Some("Jordan".to_string()),
            role: Some("VP".to_string()),
            ..Default::default()
        };
        draft.merge(ProfileDraft {
            id: Some("other".to_string()),
            role: Some("CMO".to_string()),
            channel: Some(Channel::Handwritten),
            ..Default::default()
        });
        assert_eq!(draft.id.as_deref(), Some("1"));
        assert_eq!(draft.name.as_deref(), Some("Jordan"));
        assert_eq!(draft.role.as_deref(), Some("CMO"));
        assert_eq!(draft.channel, Some(Channel::Handwritten));
    }

    #[test]
    fn test_seed_has_three_unique_profiles() {
        let seed = seed_profiles();
        let names: Vec<_> = seed.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Jordan Lee", "Sam Rivera", "Taylor Kim"]);
        assert_eq!(seed[1].channel, Channel::LinkedIn);
    }
}
