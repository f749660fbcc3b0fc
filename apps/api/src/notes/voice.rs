//! Voice check — flags drafts that break the house voice rules.
//!
//! Advisory only: a failing report is returned next to the note, it never
//! blocks or rewrites one.

use serde::{Deserialize, Serialize};

use crate::notes::models::{GeneratedNote, Length};
use crate::notes::tone::allows_intensifiers;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceFlag {
    /// Which text was checked: "body" or an alternate label.
    pub source: String,
    pub reason: String,
    pub suggestion: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceReport {
    pub passed: bool,
    pub flags: Vec<VoiceFlag>,
}

const BANNED_PHRASES: &[&str] = &[
    "i just wanted to",
    "just wanted to",
    "thank you so much for your time",
    "it means the world",
    "great meeting",
    "so insightful",
];

const INTENSIFIERS: &[&str] = &["truly", "sincerely", "deeply"];

/// Checks a single text for voice-rule violations.
///
/// FLAGS:
/// - any `!`
/// - emoji or pictographic symbols
/// - banned / overused phrases
/// - intensifiers, unless `length` is Elevated
pub fn check_voice(source: &str, text: &str, length: Length) -> Vec<VoiceFlag> {
    let text_lower = text.to_lowercase();
    let mut flags = Vec::new();

    if text.contains('!') {
        flags.push(VoiceFlag {
            source: source.to_string(),
            reason: "Contains an exclamation point".to_string(),
            suggestion: "End the sentence with a period".to_string(),
        });
    }

    if text.chars().any(is_emoji) {
        flags.push(VoiceFlag {
            source: source.to_string(),
            reason: "Contains an emoji".to_string(),
            suggestion: "Remove emojis unless explicitly requested".to_string(),
        });
    }

    // Report only the first banned phrase; one rewrite usually clears the rest.
    if let Some(&phrase) = BANNED_PHRASES.iter().find(|&&p| text_lower.contains(p)) {
        flags.push(VoiceFlag {
            source: source.to_string(),
            reason: format!("Uses banned phrase '{phrase}'"),
            suggestion: "Replace with the specific thing they did and why it mattered".to_string(),
        });
    }

    if !allows_intensifiers(length) {
        for &word in INTENSIFIERS {
            if contains_word(&text_lower, word) {
                flags.push(VoiceFlag {
                    source: source.to_string(),
                    reason: format!("Uses intensifier '{word}' outside an elevated note"),
                    suggestion: format!("Drop '{word}'; let the detail carry the weight"),
                });
            }
        }
    }

    flags
}

/// Checks the body and every alternate of a note.
pub fn check_note(note: &GeneratedNote, length: Length) -> VoiceReport {
    let mut flags = check_voice("body", &note.body, length);
    for alternate in &note.alternates {
        flags.extend(check_voice(&alternate.label, &alternate.content, length));
    }
    VoiceReport {
        passed: flags.is_empty(),
        flags,
    }
}

fn contains_word(haystack: &str, word: &str) -> bool {
    haystack
        .split(|c: char| !c.is_alphanumeric())
        .any(|token| token == word)
}

fn is_emoji(c: char) -> bool {
    matches!(
        c as u32,
        0x1F300..=0x1FAFF // pictographs, emoticons, transport, supplemental symbols
            | 0x2600..=0x27BF // misc symbols and dingbats
            | 0x1F1E6..=0x1F1FF // regional indicators
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notes::models::Alternate;
    use chrono::Utc;

    fn note(body: &str, alternates: Vec<Alternate>) -> GeneratedNote {
        GeneratedNote {
            id: "n1".to_string(),
            subject: None,
            body: body.to_string(),
            alternates,
            score: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_clean_note_passes() {
        let text = "Jordan, thanks for the coffee on Tuesday. You remembered Biscuit's name, \
                    which says a lot. I'll send the brief by Friday.";
        assert!(check_voice("body", text, Length::Standard).is_empty());
    }

    #[test]
    fn test_exclamation_point_flagged() {
        let flags = check_voice("body", "Thanks for everything!", Length::Standard);
        assert_eq!(flags.len(), 1);
        assert!(flags[0].reason.contains("exclamation"));
    }

    #[test]
    fn test_emoji_flagged() {
        let flags = check_voice("body", "Thanks for lunch \u{1F64F}", Length::Standard);
        assert!(flags.iter().any(|f| f.reason.contains("emoji")));
    }

    #[test]
    fn test_banned_phrase_flagged_case_insensitively() {
        let flags = check_voice("body", "I Just Wanted To say thanks.", Length::Short);
        assert_eq!(flags.len(), 1);
        assert!(flags[0].reason.contains("i just wanted to"));
    }

    #[test]
    fn test_intensifier_flagged_unless_elevated() {
        let text = "I truly appreciated the introduction.";
        assert_eq!(check_voice("body", text, Length::Standard).len(), 1);
        assert!(check_voice("body", text, Length::Elevated).is_empty());
    }

    #[test]
    fn test_intensifier_matches_whole_words_only() {
        // "deeply" inside another token must not count
        assert!(check_voice("body", "The deeplyrooted plan worked.", Length::Short).is_empty());
    }

    #[test]
    fn test_check_note_covers_alternates() {
        let n = note(
            "Thanks for the intro.",
            vec![Alternate {
                label: "Tighter".to_string(),
                content: "Thanks so much!".to_string(),
            }],
        );
        let report = check_note(&n, Length::Standard);
        assert!(!report.passed);
        assert_eq!(report.flags.len(), 1);
        assert_eq!(report.flags[0].source, "Tighter");
    }

    #[test]
    fn test_check_note_passes_clean_note() {
        let report = check_note(&note("Thanks for the intro to Dana.", vec![]), Length::Short);
        assert!(report.passed);
        assert!(report.flags.is_empty());
    }
}
