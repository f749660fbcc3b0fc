//! Knowledge Base — the static style guide embedded in every generation prompt.
//!
//! Read-only. Nothing here is mutated at runtime.

pub mod handlers;

use serde::Serialize;

use crate::profiles::models::Channel;

pub const VOICE: &str = "\
Core Voice Principles:
- Warm-professional, confident, human
- Crisp over clever
- Respectful, never gushy
- Forward-moving by default
- Sounds like a real person who pays attention

Style Rules:
- Email: 4-7 sentences
- LinkedIn DM/Text: 2-3 sentences
- Handwritten: 3-5 short lines
- Plain language > polished fluff
- No emojis unless explicitly requested
- No exclamation points by default

Banned / Overused:
- \"I just wanted to...\"
- \"Thank you so much for your time...\"
- \"It means the world...\"
- \"Truly / sincerely / deeply\" (unless elevated and earned)
- Vague praise with no proof (\"Great meeting\", \"So insightful\")";

pub const PLAYBOOK: &str = "\
The Formula:
1. Thanks + context: what I'm thanking them for
2. Impact: why it mattered
3. Specific detail: proof I was paying attention
4. Forward motion: next step or relationship signal
5. Clean close

Belated Pattern: Briefly acknowledge delay. Lead with gratitude, not apology. Shorter than normal.
Approved opener: \"I've been meaning to reach out since [moment]. Your [specific action] stuck with me.\"";

/// Hard rules restated in every system instruction.
pub const HARD_RULES: &[&str] = &[
    "NEVER use exclamation points unless specifically asked.",
    "NEVER use emojis.",
    "Be specific and include forward motion (next steps).",
    "No fluff or \"just wanted to\" language.",
    "Use plain, professional English.",
];

pub const SIGNOFFS: &[&str] = &[
    "Thanks again,",
    "Appreciate it,",
    "With thanks,",
    "Best,",
    "Gratefully,",
];

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Template {
    pub key: &'static str,
    pub name: &'static str,
}

pub const TEMPLATES: &[Template] = &[
    Template {
        key: "A",
        name: "Email (Standard)",
    },
    Template {
        key: "B",
        name: "LinkedIn DM",
    },
    Template {
        key: "C",
        name: "Text Message",
    },
    Template {
        key: "D",
        name: "Handwritten Card",
    },
    Template {
        key: "E",
        name: "Belated Thank-You",
    },
    Template {
        key: "F",
        name: "Thank-You + Follow-Up",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthUnit {
    Sentences,
    Lines,
}

impl LengthUnit {
    pub fn as_str(self) -> &'static str {
        match self {
            LengthUnit::Sentences => "sentences",
            LengthUnit::Lines => "short lines",
        }
    }
}

/// Length target and format notes for one channel.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ChannelGuidance {
    pub channel: Channel,
    pub min: u8,
    pub max: u8,
    pub unit: LengthUnit,
    pub format: &'static str,
}

pub fn channel_guidance(channel: Channel) -> ChannelGuidance {
    match channel {
        Channel::Email => ChannelGuidance {
            channel,
            min: 4,
            max: 7,
            unit: LengthUnit::Sentences,
            format: "Include a short, specific subject line. Greeting, body, sign-off.",
        },
        Channel::LinkedIn => ChannelGuidance {
            channel,
            min: 2,
            max: 3,
            unit: LengthUnit::Sentences,
            format: "No subject line. Open with their first name. No sign-off block.",
        },
        Channel::Text => ChannelGuidance {
            channel,
            min: 2,
            max: 3,
            unit: LengthUnit::Sentences,
            format: "No subject line. Conversational, no greeting formula, no sign-off block.",
        },
        Channel::Handwritten => ChannelGuidance {
            channel,
            min: 3,
            max: 5,
            unit: LengthUnit::Lines,
            format: "No subject line. Short lines that fit a card. Close with a sign-off.",
        },
    }
}
