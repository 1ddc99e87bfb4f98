//! Notification delivery for Telegram.
//!
//! Telegram's message limit is 4096 characters. We use 4090 for safety.
//! Notifications go out as plain text so message content quoted in the
//! TL;DR is never mangled by markdown escaping.

use std::time::Duration;

use async_trait::async_trait;
use teloxide::prelude::*;
use tracing::warn;

use butler_core::config::TelegramConfig;
use butler_core::{ChannelError, Notifier};

/// Maximum bytes per Telegram message (limit is 4096; we use 4090 for safety).
const CHUNK_MAX: usize = 4090;

/// Delivers butler notifications to a Telegram chat.
pub struct TelegramNotifier {
    bot: Bot,
}

impl TelegramNotifier {
    pub fn new(config: &TelegramConfig) -> Self {
        Self {
            bot: Bot::new(&config.bot_token),
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    /// Send `text` to `recipient` (a chat ID encoded as a string) in
    /// size-limited chunks.
    ///
    /// A 100ms delay is inserted between consecutive chunks to avoid
    /// hitting rate limits.
    async fn send(&self, recipient: &str, text: &str) -> Result<(), ChannelError> {
        let chat_id: i64 = recipient
            .parse()
            .map_err(|_| ChannelError::InvalidRecipient(recipient.to_string()))?;

        let chunks = split_chunks(text);
        for (i, chunk) in chunks.iter().enumerate() {
            if let Err(e) = self.bot.send_message(ChatId(chat_id), chunk).await {
                warn!(error = %e, chunk_index = i, "Telegram: failed to send notification chunk");
                return Err(ChannelError::SendFailed(e.to_string()));
            }
            if i + 1 < chunks.len() {
                tokio::time::sleep(Duration::from_millis(100)).await;
            }
        }
        Ok(())
    }
}

/// Split `text` into chunks of at most `CHUNK_MAX` bytes, preferring
/// newline boundaries.
fn split_chunks(text: &str) -> Vec<String> {
    if text.len() <= CHUNK_MAX {
        return vec![text.to_string()];
    }

    let mut chunks: Vec<String> = Vec::new();
    let mut current = String::new();

    for line in text.split('\n') {
        let cost = if current.is_empty() {
            line.len()
        } else {
            1 + line.len()
        };
        if !current.is_empty() && current.len() + cost > CHUNK_MAX {
            chunks.push(current);
            current = String::new();
        }
        if !current.is_empty() {
            current.push('\n');
        }
        current.push_str(line);
    }
    if !current.is_empty() {
        chunks.push(current);
    }

    // Safety net: force-split any chunk that still exceeds CHUNK_MAX
    // (a single line longer than the limit).
    let mut result = Vec::new();
    for chunk in chunks {
        if chunk.len() <= CHUNK_MAX {
            result.push(chunk);
        } else {
            result.extend(split_line(&chunk).into_iter().map(str::to_string));
        }
    }
    result
}

/// Split one oversized line into byte windows, backing up to the nearest
/// char boundary so multi-byte characters are never cut.
fn split_line(line: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut rest = line;
    while rest.len() > CHUNK_MAX {
        let mut cut = CHUNK_MAX;
        while !rest.is_char_boundary(cut) {
            cut -= 1;
        }
        pieces.push(&rest[..cut]);
        rest = &rest[cut..];
    }
    if !rest.is_empty() {
        pieces.push(rest);
    }
    pieces
}
