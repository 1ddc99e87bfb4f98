//! End-to-end triage: length gate, analysis, owner notification.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use butler_core::{ChannelError, InboundMessage, Notifier};

use crate::analyzer::MessageAnalyzer;
use crate::format;
use crate::provider::ProviderError;

#[derive(Debug, Error)]
pub enum TriageError {
    #[error("analysis failed: {0}")]
    Analysis(#[from] ProviderError),
    #[error("notification failed: {0}")]
    Notify(#[from] ChannelError),
}

/// What the pipeline did with one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriageOutcome {
    /// Below the length threshold; never analyzed.
    Skipped,
    /// Analyzed, but the model said not to notify.
    Suppressed,
    /// Analyzed and delivered to the owner.
    Notified,
}

/// Triages one inbound message at a time. Messages are independent:
/// a failure here never affects any other message.
pub struct TriagePipeline {
    analyzer: MessageAnalyzer,
    notifier: Arc<dyn Notifier>,
    owner: String,
    min_chars: usize,
}

impl TriagePipeline {
    pub fn new(
        analyzer: MessageAnalyzer,
        notifier: Arc<dyn Notifier>,
        owner: impl Into<String>,
        min_chars: usize,
    ) -> Self {
        Self {
            analyzer,
            notifier,
            owner: owner.into(),
            min_chars,
        }
    }

    /// Run one message through the full triage flow.
    pub async fn handle(&self, message: InboundMessage) -> Result<TriageOutcome, TriageError> {
        let text = message.text.as_deref().unwrap_or("");
        let len = text.chars().count();
        if len < self.min_chars {
            debug!(
                sender = %message.sender,
                len,
                min = self.min_chars,
                "message below triage threshold"
            );
            return Ok(TriageOutcome::Skipped);
        }

        info!(sender = %message.sender, "butler analyzing message");
        let analysis = self.analyzer.analyze(text, &message.sender).await?;

        if !analysis.should_notify {
            info!(
                sender = %message.sender,
                priority = %analysis.priority,
                "butler decided not to notify"
            );
            return Ok(TriageOutcome::Suppressed);
        }

        let body = format::notification_body(&message, &analysis);
        self.notifier.send(&self.owner, &body).await?;
        info!(
            sender = %message.sender,
            priority = %analysis.priority,
            "notification sent to owner"
        );
        Ok(TriageOutcome::Notified)
    }
}
