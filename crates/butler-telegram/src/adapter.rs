//! Telegram watcher.
//!
//! Wraps a teloxide `Bot` + `Dispatcher` and drives the long-polling event loop
//! until the process exits. Reconnects automatically on transport errors.

use std::sync::Arc;

use teloxide::prelude::*;
use tracing::info;

use butler_core::config::TelegramConfig;
use butler_triage::TriagePipeline;

use crate::handler::handle_message;

/// Watches the owner's Telegram stream and feeds messages into the
/// triage pipeline.
///
/// Wraps a teloxide `Bot` and drives the Dispatcher event loop until the
/// process exits. Long polling — no public URL required.
pub struct TelegramWatcher {
    config: TelegramConfig,
    pipeline: Arc<TriagePipeline>,
}

impl TelegramWatcher {
    pub fn new(config: &TelegramConfig, pipeline: Arc<TriagePipeline>) -> Self {
        Self {
            config: config.clone(),
            pipeline,
        }
    }

    /// Connect to Telegram and drive the long-polling loop.
    ///
    /// Never returns — runs for the lifetime of the process.
    pub async fn run(self) {
        let bot = Bot::new(&self.config.bot_token);

        info!("Telegram: starting long-polling dispatcher");

        let pipeline = Arc::clone(&self.pipeline);
        let config = self.config.clone();

        let handler = Update::filter_message().endpoint(handle_message);

        Dispatcher::builder(bot, handler)
            .dependencies(dptree::deps![pipeline, config])
            .default_handler(|_upd| async {})
            .build()
            .dispatch()
            .await;
    }
}
