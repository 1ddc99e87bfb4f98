use serde::{Deserialize, Serialize};

/// Vibe used when the model omits or blanks the field.
pub const FALLBACK_VIBE: &str = "neutral";
/// Reply suggestion used when the model omits or blanks the field.
pub const FALLBACK_REPLY: &str = "Got it, thanks for the update!";
/// Maximum characters of the original text carried into a derived tldr.
pub const TLDR_MAX_CHARS: usize = 140;

/// A message received from the watched messaging stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundMessage {
    /// Plain text content, if the message carried any.
    pub text: Option<String>,

    /// Platform-native identifier for the sender (user ID, phone number, …).
    pub sender: String,

    /// Human-readable display name for the sender, if available.
    pub sender_name: Option<String>,
}

impl InboundMessage {
    /// Name shown in notifications: the display name when present and
    /// non-empty, otherwise the raw sender identifier.
    pub fn display_name(&self) -> &str {
        self.sender_name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.sender)
    }
}

/// Triage priority assigned to a message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Lenient parse for model output; unrecognized values fall back to
    /// [`Priority::Medium`].
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "low" => Priority::Low,
            "high" => Priority::High,
            _ => Priority::Medium,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured triage verdict for one inbound message.
///
/// All five fields are always populated: the analyzer fills gaps with the
/// documented defaults and never returns a partial record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageAnalysis {
    /// Overall priority, weighing importance and urgency together.
    pub priority: Priority,

    /// One-line description of the emotional tone.
    pub vibe: String,

    /// One- or two-sentence summary of the message.
    pub tldr: String,

    /// A short, natural reply the owner could send back.
    pub suggested_reply: String,

    /// Whether the owner should be notified about this message.
    pub should_notify: bool,
}

impl MessageAnalysis {
    /// The full fallback set, used when the model response is unusable.
    ///
    /// Defaults bias toward notifying: a spurious notification is cheaper
    /// than a silently dropped urgent message.
    pub fn fallback(text: &str) -> Self {
        Self {
            priority: Priority::Medium,
            vibe: FALLBACK_VIBE.to_string(),
            tldr: derived_tldr(text),
            suggested_reply: FALLBACK_REPLY.to_string(),
            should_notify: true,
        }
    }
}

/// First [`TLDR_MAX_CHARS`] characters of `text`, with a trailing ellipsis
/// when truncated. Counts characters, never bytes.
pub fn derived_tldr(text: &str) -> String {
    match text.char_indices().nth(TLDR_MAX_CHARS) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
