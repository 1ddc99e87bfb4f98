use async_trait::async_trait;

/// Common interface for text-generation backends.
///
/// The analyzer holds its provider as `Arc<dyn LlmProvider>`, so tests can
/// substitute a recording fake for the real Gemini client.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Provider name for logging and error messages.
    fn name(&self) -> &str;

    /// Send a single prompt, wait for the full response text.
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}
