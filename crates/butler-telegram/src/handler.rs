//! Telegram message handler registered in the teloxide Dispatcher.

use std::sync::Arc;

use teloxide::prelude::*;
use tracing::{debug, warn};

use butler_core::config::TelegramConfig;
use butler_core::InboundMessage;
use butler_triage::TriagePipeline;

/// Main message handler registered in the teloxide Dispatcher.
///
/// Runs for every incoming `Message`. Performs:
/// 1. Bot-message filter
/// 2. Sender extraction
/// 3. Owner's-own-message filter
/// 4. Text extraction (media without a caption is ignored)
/// 5. Non-blocking triage pipeline invocation
pub async fn handle_message(
    msg: Message,
    pipeline: Arc<TriagePipeline>,
    config: TelegramConfig,
) -> ResponseResult<()> {
    // 1. Ignore messages from other bots.
    if msg.from.as_ref().map(|u| u.is_bot).unwrap_or(false) {
        return Ok(());
    }

    // 2. Extract sender identity.
    let from = match msg.from.as_ref() {
        Some(u) => u,
        None => return Ok(()),
    };

    // 3. Skip the owner's own messages — the butler only watches inbound traffic.
    if from.id.0 as i64 == config.owner_chat_id {
        return Ok(());
    }

    // 4. Text only; a photo or sticker has nothing to triage.
    let text = match msg.text() {
        Some(t) => t.to_string(),
        None => return Ok(()),
    };

    let message = InboundMessage {
        text: Some(text),
        sender: from.id.0.to_string(),
        sender_name: display_name(&from.first_name, from.last_name.as_deref()),
    };

    // 5. Triage in a separate task so a slow model never blocks the dispatcher.
    //    Each message is isolated: failures are logged here and go no further.
    let sender = message.sender.clone();
    tokio::spawn(async move {
        match pipeline.handle(message).await {
            Ok(outcome) => debug!(%sender, ?outcome, "triage finished"),
            Err(e) => warn!(error = %e, %sender, "Telegram: triage pipeline failed"),
        }
    });

    Ok(())
}

/// Join first and last name into a display name. Returns `None` when the
/// profile has no usable name, so callers fall back to the sender handle.
fn display_name(first_name: &str, last_name: Option<&str>) -> Option<String> {
    let full = match last_name {
        Some(last) if !last.is_empty() => format!("{first_name} {last}"),
        _ => first_name.to_string(),
    };
    let trimmed = full.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_joins_first_and_last() {
        assert_eq!(
            display_name("Dana", Some("Reyes")),
            Some("Dana Reyes".to_string())
        );
    }

    #[test]
    fn display_name_first_only() {
        assert_eq!(display_name("Dana", None), Some("Dana".to_string()));
    }

    #[test]
    fn display_name_ignores_empty_last() {
        assert_eq!(display_name("Dana", Some("")), Some("Dana".to_string()));
    }

    #[test]
    fn display_name_empty_profile_is_none() {
        assert_eq!(display_name("", None), None);
    }

    #[test]
    fn display_name_whitespace_is_none() {
        assert_eq!(display_name("  ", None), None);
    }
}
