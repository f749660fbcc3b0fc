//! Tone calibration — maps the requested formality to register and phrasing,
//! and the requested length to a concrete target for the channel.
//!
//! Intensifiers ("truly", "sincerely", "deeply") are banned by the voice rules
//! except at Elevated length. That exception lives here and nowhere else.

use crate::knowledge::{channel_guidance, ChannelGuidance};
use crate::notes::models::Length;
use crate::profiles::models::{Channel, Formality};

/// Register and phrasing calibrated to one formality level.
#[derive(Debug, Clone)]
pub struct ToneGuidance {
    pub register: &'static str,
    pub greeting_examples: Vec<&'static str>,
    pub avoid: Vec<&'static str>,
}

/// Returns tone-calibrated phrasing for the requested formality.
pub fn get_tone_guidance(tone: Formality) -> ToneGuidance {
    match tone {
        Formality::Executive => ToneGuidance {
            register: "Brief and peer-level. Lead with the outcome. No warmth padding.",
            greeting_examples: vec!["Jordan,", "Hi Jordan,"],
            avoid: vec!["honored", "humbled", "hope this finds you well", "at your convenience"],
        },
        Formality::Professional => ToneGuidance {
            register: "Warm, confident, and plain-spoken. Specific over effusive.",
            greeting_examples: vec!["Hi Jordan,", "Jordan,"],
            avoid: vec!["amazing", "awesome", "per our conversation", "circling back"],
        },
        Formality::Friendly => ToneGuidance {
            register: "Relaxed and first-name. Still no emojis or exclamation points.",
            greeting_examples: vec!["Hey Jordan,", "Jordan -"],
            avoid: vec!["Dear", "Kind regards", "per our conversation"],
        },
    }
}

/// Intensifiers are only allowed when the note is deliberately elevated.
pub fn allows_intensifiers(length: Length) -> bool {
    matches!(length, Length::Elevated)
}

/// Concrete length instruction for a channel, e.g. "4-5 sentences".
pub fn length_target(channel: Channel, length: Length) -> String {
    let ChannelGuidance { min, max, unit, .. } = channel_guidance(channel);
    let (low, high) = match length {
        // Lower bound plus one, never above the channel maximum.
        Length::Short => (min, (min + 1).min(max)),
        Length::Standard => (min, max),
        Length::Elevated => (max.saturating_sub(1).max(min), max),
    };
    if low == high {
        format!("{low} {}", unit.as_str())
    } else {
        format!("{low}-{high} {}", unit.as_str())
    }
}
