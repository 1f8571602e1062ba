// Email Generation Engine
// Implements: prompt construction, provider orchestration, generation endpoints.
// All Gemini calls go through the gemini module — no direct HTTP calls here.

pub mod engine;
pub mod handlers;
pub mod prompts;

use serde::{Deserialize, Serialize};

/// Email style selector. Drives which prompt template is rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmailStyle {
    /// Connection-finding outreach, under 150 words.
    #[default]
    Default,
    /// Direct referral ask, under 80 words.
    Minimal,
    /// Entirely recipient-focused, under 120 words. No job-seeking language.
    AboutThem,
    /// Caller supplies the instructions verbatim.
    Custom,
}

/// The sender's background, used to personalize the email.
/// Mirrors the stored user profile minus row bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SenderProfile {
    pub full_name: String,
    pub current_role: Option<String>,
    pub target_roles: String,
    pub about_me: String,
    pub linked_in_url: Option<String>,
}

/// Everything the engine needs to draft one email. Built per request,
/// discarded once the provider answers.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Free-form scraped text describing the outreach target.
    pub recipient_profile_text: String,
    pub style: EmailStyle,
    /// Required when `style` is Custom; validated at the HTTP layer.
    pub custom_instructions: Option<String>,
    /// None for guest callers and users without a saved profile.
    pub sender: Option<SenderProfile>,
}
