use async_trait::async_trait;
use thiserror::Error;

/// Outbound delivery seam between the triage pipeline and the transport.
///
/// Implementations must be `Send + Sync` so a single notifier can be shared
/// by every in-flight pipeline task.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver `text` to `recipient` (a platform-native address).
    async fn send(&self, recipient: &str, text: &str) -> Result<(), ChannelError>;
}

/// Errors that can occur while delivering a notification.
#[derive(Debug, Error)]
pub enum ChannelError {
    /// The recipient address is not valid for the transport.
    #[error("Invalid recipient: {0}")]
    InvalidRecipient(String),

    /// A message could not be delivered to the remote endpoint.
    #[error("Send failed: {0}")]
    SendFailed(String),
}
