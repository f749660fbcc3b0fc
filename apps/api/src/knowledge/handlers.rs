//! Axum route handlers for the Knowledge Base.

use axum::Json;
use serde::Serialize;

use crate::knowledge::{
    channel_guidance, ChannelGuidance, Template, HARD_RULES, PLAYBOOK, SIGNOFFS, TEMPLATES, VOICE,
};
use crate::notes::models::Length;
use crate::profiles::models::{Channel, Formality};

#[derive(Debug, Serialize)]
pub struct KnowledgeResponse {
    pub voice: &'static str,
    pub playbook: &'static str,
    pub rules: &'static [&'static str],
    pub signoffs: &'static [&'static str],
    pub templates: &'static [Template],
    pub channels: Vec<ChannelGuidance>,
    pub formalities: [Formality; 3],
    pub lengths: [Length; 3],
}

/// GET /api/v1/knowledge
pub async fn handle_get_knowledge() -> Json<KnowledgeResponse> {
    Json(KnowledgeResponse {
        voice: VOICE,
        playbook: PLAYBOOK,
        rules: HARD_RULES,
        signoffs: SIGNOFFS,
        templates: TEMPLATES,
        channels: Channel::ALL.into_iter().map(channel_guidance).collect(),
        formalities: Formality::ALL,
        lengths: [Length::Short, Length::Standard, Length::Elevated],
    })
}
