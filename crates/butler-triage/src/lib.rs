pub mod analyzer;
pub mod format;
pub mod gemini;
pub mod pipeline;
pub mod prompt;
pub mod provider;

pub use analyzer::MessageAnalyzer;
pub use gemini::GeminiProvider;
pub use pipeline::{TriageError, TriageOutcome, TriagePipeline};
pub use provider::{LlmProvider, ProviderError};
