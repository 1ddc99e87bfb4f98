//! Renders the owner-facing notification.

use butler_core::{InboundMessage, MessageAnalysis};

/// Build the notification body. Layout is fixed so the owner can scan
/// it at a glance; priority is uppercased to stand out in the feed.
pub fn notification_body(message: &InboundMessage, analysis: &MessageAnalysis) -> String {
    [
        "🧸 *Text Butler*".to_string(),
        String::new(),
        format!("From: {}", message.display_name()),
        format!("Vibe: {}", analysis.vibe),
        format!("Priority: {}", analysis.priority.as_str().to_ascii_uppercase()),
        String::new(),
        format!("TL;DR: {}", analysis.tldr),
        String::new(),
        format!("Reply idea: \"{}\"", analysis.suggested_reply),
    ]
    .join("\n")
}
