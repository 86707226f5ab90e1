//! Data models for the game list generator.
//!
//! - [`GameEntry`]: One title in the game list, either carried forward from an old list or new
//! - [`EntryType`]: Whether an entry is written as `<game>` or `<folder>`
//! - [`DiscoveredItem`] / [`DiscoveryQueue`]: On-disk candidates still waiting for metadata
//! - [`AppConfig`]: User settings loaded from `miyoo-gamelist.yaml`
//! - [`PlatformConfig`]: The immutable per-run snapshot handed to the core services
//!
//! # Architecture Note
//!
//! No core service reads ambient state. Each operation receives a [`PlatformConfig`]
//! value explicitly, built once per run by [`AppConfig::platform_config`].

pub mod config;
pub mod discovery;
pub mod game_entry;

pub use config::{AppConfig, PlatformConfig};
pub use discovery::{DiscoveredItem, DiscoveryQueue};
pub use game_entry::{EntryType, GameEntry, OldEntrySet};
