use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Gemini model used for triage unless overridden.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
/// Messages shorter than this many characters are never triaged.
pub const DEFAULT_MIN_CHARS: usize = 100;

/// Top-level config (butler.toml + BUTLER_* env overrides).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ButlerConfig {
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub gemini: GeminiConfig,
    #[serde(default)]
    pub triage: TriageConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TelegramConfig {
    /// Bot token from @BotFather. Env override: TELEGRAM_BOT_TOKEN.
    #[serde(default)]
    pub bot_token: String,

    /// Chat that receives every notification (the owner's DM with the bot).
    #[serde(default)]
    pub owner_chat_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// Generative Language API key. Env override: GEMINI_API_KEY.
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_model")]
    pub model: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_model(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriageConfig {
    /// Minimum text length (in characters) for a message to be analyzed.
    #[serde(default = "default_min_chars")]
    pub min_chars: usize,
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            min_chars: default_min_chars(),
        }
    }
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}
fn default_min_chars() -> usize {
    DEFAULT_MIN_CHARS
}

impl ButlerConfig {
    /// Load config from a TOML file with BUTLER_* env var overrides.
    ///
    /// Checks in order:
    ///   1. Explicit path argument
    ///   2. ~/.butler/butler.toml
    ///
    /// `GEMINI_API_KEY` and `TELEGRAM_BOT_TOKEN` are honored as credential
    /// overrides and take precedence over the file.
    pub fn load(config_path: Option<&str>) -> Result<Self, ConfigError> {
        let path = config_path
            .map(String::from)
            .unwrap_or_else(default_config_path);

        let mut config: ButlerConfig = Figment::new()
            .merge(Toml::file(&path))
            .merge(Env::prefixed("BUTLER_").split("_"))
            .extract()
            .map_err(|e| ConfigError::Read(e.to_string()))?;

        if let Ok(key) = std::env::var("GEMINI_API_KEY") {
            if !key.is_empty() {
                config.gemini.api_key = key;
            }
        }
        if let Ok(token) = std::env::var("TELEGRAM_BOT_TOKEN") {
            if !token.is_empty() {
                config.telegram.bot_token = token;
            }
        }

        Ok(config)
    }

    /// Reject configurations the daemon cannot run with.
    ///
    /// Called once at startup; any error here is fatal.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gemini.api_key.is_empty() {
            return Err(ConfigError::MissingRequired {
                key: "gemini.api_key",
                hint: "set it in butler.toml or export GEMINI_API_KEY",
            });
        }
        if self.telegram.bot_token.is_empty() {
            return Err(ConfigError::MissingRequired {
                key: "telegram.bot_token",
                hint: "set it in butler.toml or export TELEGRAM_BOT_TOKEN",
            });
        }
        if self.telegram.owner_chat_id == 0 {
            return Err(ConfigError::MissingRequired {
                key: "telegram.owner_chat_id",
                hint: "set it to the chat that should receive notifications",
            });
        }
        Ok(())
    }
}

fn default_config_path() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    format!("{}/.butler/butler.toml", home)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> ButlerConfig {
        ButlerConfig {
            telegram: TelegramConfig {
                bot_token: "123456:token".to_string(),
                owner_chat_id: 42,
            },
            gemini: GeminiConfig {
                api_key: "test-key".to_string(),
                model: default_model(),
            },
            triage: TriageConfig::default(),
        }
    }

    #[test]
    fn defaults_cover_model_and_threshold() {
        let config = ButlerConfig::default();
        assert_eq!(config.gemini.model, DEFAULT_MODEL);
        assert_eq!(config.triage.min_chars, DEFAULT_MIN_CHARS);
        assert!(config.gemini.api_key.is_empty());
    }

    #[test]
    fn validate_accepts_complete_config() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn validate_rejects_missing_api_key() {
        let mut config = valid_config();
        config.gemini.api_key.clear();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("gemini.api_key"));
    }

    #[test]
    fn validate_rejects_missing_bot_token() {
        let mut config = valid_config();
        config.telegram.bot_token.clear();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("telegram.bot_token"));
    }

    #[test]
    fn validate_rejects_unset_owner_chat() {
        let mut config = valid_config();
        config.telegram.owner_chat_id = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("owner_chat_id"));
    }
}
