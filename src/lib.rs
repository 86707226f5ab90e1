// miyoo-gamelist - Game list generator for the Miyoo frontend
//
// This is the library crate containing the reconciliation, classification and
// serialisation logic. The binary crate (main.rs) provides the command line entry point.

pub mod config;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;

// Re-export commonly used types for convenience
pub use config::ConfigManager;
pub use metrics::Metrics;
pub use models::{AppConfig, DiscoveredItem, DiscoveryQueue, EntryType, GameEntry, OldEntrySet, PlatformConfig};
pub use services::GameListError;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
