use thiserror::Error;

/// Errors raised while loading or validating the daemon configuration.
///
/// Any of these is fatal at startup: the daemon refuses to run half-configured.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file or environment could not be read or parsed.
    #[error("Configuration error: {0}")]
    Read(String),

    /// A setting the daemon cannot run without is absent.
    #[error("Missing required config `{key}`: {hint}")]
    MissingRequired {
        key: &'static str,
        hint: &'static str,
    },
}
