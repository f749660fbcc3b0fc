// Shared prompt constants and prompt-building utilities.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// System prompt fragment that enforces structured output.
pub const STRUCTURED_OUTPUT_INSTRUCTION: &str = "\
    You MUST answer by calling the provided tool exactly once. \
    If you cannot call the tool, respond with a single valid JSON object matching its schema. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";
