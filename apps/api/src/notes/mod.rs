// Note generation: request model, prompt assembly, output contract, voice check.
// All LLM calls go through llm_client — no direct Anthropic calls here.

pub mod builder;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod schema;
pub mod tone;
pub mod voice;
