//! # AI Assist
//!
//! Optional enrichment over the text-completion gateway. Every failure
//! degrades to a harmless default; nothing here may ever block the article
//! write path.

use std::sync::Arc;

use domains::TextAssist;

const POLISH_INSTRUCTION: &str = "You are a helpful editor for a children's newspaper. \
Please fix grammar mistakes and make the following text more engaging and easy to \
understand for elementary school students (in Korean). Keep the HTML formatting if present.";

const SUMMARY_INSTRUCTION: &str = "Summarize the following news article for a children's \
newspaper in Korean. Keep it under 150 characters and make it exciting.";

/// Shown in place of a summary when the gateway fails.
pub const SUMMARY_FAILURE_PLACEHOLDER: &str = "Summary generation failed.";

pub struct AssistService {
    assist: Arc<dyn TextAssist>,
}

impl AssistService {
    pub fn new(assist: Arc<dyn TextAssist>) -> Self {
        Self { assist }
    }

    /// Rewrites the article body for readability. On any failure or empty
    /// response the original content comes back unchanged.
    pub async fn polish_article(&self, content: &str) -> String {
        match self.assist.complete(POLISH_INSTRUCTION, content).await {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => content.to_string(),
            Err(err) => {
                tracing::warn!(%err, "assist polish failed, keeping original text");
                content.to_string()
            }
        }
    }

    /// Produces a short listing summary. A failing gateway yields an
    /// explicit placeholder rather than an error.
    pub async fn generate_summary(&self, content: &str) -> String {
        match self.assist.complete(SUMMARY_INSTRUCTION, content).await {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(%err, "assist summary failed");
                SUMMARY_FAILURE_PLACEHOLDER.to_string()
            }
        }
    }
}
