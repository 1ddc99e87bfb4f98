pub mod channel;
pub mod config;
pub mod error;
pub mod types;

pub use channel::{ChannelError, Notifier};
pub use config::ButlerConfig;
pub use error::ConfigError;
pub use types::{InboundMessage, MessageAnalysis, Priority};
