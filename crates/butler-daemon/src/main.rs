use std::sync::Arc;

use clap::Parser;
use tracing::info;

use butler_core::ButlerConfig;
use butler_telegram::{TelegramNotifier, TelegramWatcher};
use butler_triage::{GeminiProvider, MessageAnalyzer, TriagePipeline};

/// Text Butler: watches the owner's Telegram stream, triages every
/// qualifying message with an LLM, and notifies the owner when it matters.
#[derive(Debug, Parser)]
#[command(name = "butler-daemon")]
struct Args {
    /// Path to butler.toml. Falls back to BUTLER_CONFIG, then
    /// ~/.butler/butler.toml.
    #[arg(long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional; real environment variables always win.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "butler_daemon=info,butler_triage=info,butler_telegram=info".into()
            }),
        )
        .init();

    let args = Args::parse();

    // load config: --config flag > BUTLER_CONFIG env > ~/.butler/butler.toml
    let config_path = args.config.or_else(|| std::env::var("BUTLER_CONFIG").ok());
    let config = ButlerConfig::load(config_path.as_deref())?;
    config.validate()?;

    info!(model = %config.gemini.model, "LLM provider: Gemini");
    let provider = Arc::new(GeminiProvider::new(
        config.gemini.api_key.clone(),
        config.gemini.model.clone(),
    ));
    let analyzer = MessageAnalyzer::new(provider);

    let notifier = Arc::new(TelegramNotifier::new(&config.telegram));
    let pipeline = Arc::new(TriagePipeline::new(
        analyzer,
        notifier,
        config.telegram.owner_chat_id.to_string(),
        config.triage.min_chars,
    ));

    info!(
        owner_chat_id = config.telegram.owner_chat_id,
        min_chars = config.triage.min_chars,
        "Text Butler is watching your messages"
    );

    let watcher = TelegramWatcher::new(&config.telegram, pipeline);
    watcher.run().await;

    Ok(())
}
