// All LLM prompt constants for the notes module.
// Reuses cross-cutting fragments from llm_client::prompts.

/// Name of the forced output tool the model answers through.
pub const NOTE_TOOL_NAME: &str = "emit_thank_you_note";

pub const NOTE_TOOL_DESCRIPTION: &str =
    "Return the finished thank-you note: the primary draft, an optional email subject, \
    and exactly two labeled alternate phrasings.";

/// System instruction template.
/// Replace: {voice}, {playbook}, {rules}, {structured_output}
pub const NOTE_SYSTEM_TEMPLATE: &str = r#"You are an executive communication assistant. Your goal is to write thank-you notes that follow the house voice exactly.

KNOWLEDGE BASE:
{voice}

PLAYBOOK:
{playbook}

RULES:
{rules}

{structured_output}"#;

/// Per-request prompt template.
/// Replace: {channel}, {recipient_name}, {recipient_role}, {occasion}, {detail},
///          {impact}, {next_step}, {tone}, {length}, {tone_json}, {length_target},
///          {format}, {intensifier_rule}, {subject_rule}
pub const NOTE_PROMPT_TEMPLATE: &str = r#"Generate a thank-you note for the {channel} channel based on these inputs:
- Recipient Name: {recipient_name}
- Recipient Role/Context: {recipient_role}
- Occasion: {occasion}
- Specific Detail: {detail}
- Impact: {impact}
- Next Step: {next_step}
- Tone: {tone}
- Length: {length}

TONE CALIBRATION:
{tone_json}

LENGTH TARGET: {length_target}
FORMAT: {format}
{intensifier_rule}

Format the output as a JSON object with:
- body: the main text
- subject: {subject_rule}
- alternates: an array of exactly 2 objects { "label": string, "content": string } (e.g., "Tighter", "Elevated")"#;

pub const SUBJECT_REQUIRED: &str = "a short, specific subject line (Email only)";
pub const SUBJECT_OMITTED: &str = "omit this field; the channel has no subject line";

pub const INTENSIFIERS_ALLOWED: &str =
    "Intensifiers (truly, sincerely, deeply) are allowed only where the detail earns them.";
pub const INTENSIFIERS_BANNED: &str = "Do NOT use truly, sincerely, or deeply.";

/// Used when the request carries no impact statement.
pub const DEFAULT_IMPACT: &str = "General gratitude";
pub const NOT_PROVIDED: &str = "Not provided";
