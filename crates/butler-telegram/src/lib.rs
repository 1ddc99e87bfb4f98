pub mod adapter;
pub mod handler;
pub mod send;

pub use adapter::TelegramWatcher;
pub use send::TelegramNotifier;
