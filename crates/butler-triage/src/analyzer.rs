//! Turns raw model output into a [`MessageAnalysis`].
//!
//! Models drift: they wrap JSON in markdown fences, drop fields, invent
//! priority labels, or return prose. Everything recoverable is recovered
//! per field; anything unrecoverable falls back to a safe default that
//! still notifies the owner. Only transport failures surface as errors.

use std::sync::Arc;

use serde::Deserialize;
use tracing::warn;

use butler_core::{MessageAnalysis, Priority};

use crate::prompt;
use crate::provider::{LlmProvider, ProviderError};

/// Runs one message through the LLM and decodes the verdict.
pub struct MessageAnalyzer {
    provider: Arc<dyn LlmProvider>,
}

impl MessageAnalyzer {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self { provider }
    }

    /// Analyze a single message. Returns `Err` only when the provider
    /// itself fails; malformed model output never fails the call.
    pub async fn analyze(
        &self,
        text: &str,
        sender: &str,
    ) -> Result<MessageAnalysis, ProviderError> {
        let prompt = prompt::triage_prompt(text, sender);
        let raw = self.provider.generate(&prompt).await?;
        Ok(parse_analysis(&raw, text))
    }
}

/// Decode a model response, recovering field by field.
fn parse_analysis(raw: &str, original_text: &str) -> MessageAnalysis {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        warn!("model returned an empty response, using fallback analysis");
        return MessageAnalysis::fallback(original_text);
    }

    let body = strip_code_fence(trimmed);
    let parsed: RawAnalysis = match serde_json::from_str(body) {
        Ok(parsed) => parsed,
        Err(error) => {
            warn!(%error, response = %trimmed, "model response is not valid JSON, using fallback analysis");
            return MessageAnalysis::fallback(original_text);
        }
    };

    MessageAnalysis {
        priority: parsed
            .priority
            .as_deref()
            .map(Priority::parse_lenient)
            .unwrap_or_default(),
        vibe: non_empty(parsed.vibe)
            .unwrap_or_else(|| butler_core::types::FALLBACK_VIBE.to_string()),
        tldr: non_empty(parsed.tldr)
            .unwrap_or_else(|| butler_core::types::derived_tldr(original_text)),
        suggested_reply: non_empty(parsed.suggested_reply)
            .unwrap_or_else(|| butler_core::types::FALLBACK_REPLY.to_string()),
        should_notify: parsed.should_notify.unwrap_or(true),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// Strip a markdown code fence if the whole response is wrapped in one.
/// Handles ```json, bare ```, and fences with other language tags.
fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = match rest.find('\n') {
        Some(pos) => &rest[pos + 1..],
        None => rest.strip_prefix("json").unwrap_or(rest),
    };
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}

#[derive(Debug, Deserialize)]
struct RawAnalysis {
    priority: Option<String>,
    vibe: Option<String>,
    tldr: Option<String>,
    suggested_reply: Option<String>,
    should_notify: Option<bool>,
}
