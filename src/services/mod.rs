//! Services module - the game list pipeline.
//!
//! Everything here is synchronous and single-threaded. Services take their inputs as
//! explicit parameters (a [`PlatformConfig`](crate::models::PlatformConfig) snapshot and an
//! [`FsProbe`]) and never read global state.
//!
//! # Components
//!
//! - [`reconciler`]: Drops already-listed games from the discovery queue and merges
//!   carried-forward entries with new ones
//! - [`classifier`]: Decides `<game>` vs `<folder>` for an entry, including folder promotion
//! - [`normalizer`]: Platform path aliases and relative-path output
//! - [`assembler`]: Serialises the final list to XML
//! - [`game_list`]: Reads a previous game list and writes the new one
//! - [`discovery`]: Scans the ROM folder and builds entries from local files
//! - [`platform`]: Built-in ROM extensions per platform
//! - [`frontend`]: Folder layout and supported assets of the Miyoo frontend
//! - [`fs_probe`]: The filesystem seam used by reconciliation and classification
//!
//! # Usage Example
//!
//! ```ignore
//! use miyoo_gamelist::services::{assembler, discovery, game_list, reconciler, LocalFs};
//!
//! let old = game_list::load_old_game_list_or_empty(&list_path, &platform.input_folder);
//! let mut queue = discovery::scan(&platform, true)?;
//! let carried = reconciler::reconcile_set(&old, &mut queue, &LocalFs);
//! let scraped = queue.iter().map(|item| discovery::local_entry(item, None)).collect();
//! let entries = reconciler::merge_entries(carried, scraped, &old);
//! let xml = assembler::assemble(entries, &platform)?;
//! game_list::write_game_list(&list_path, &xml)?;
//! ```

pub mod assembler;
pub mod classifier;
pub mod discovery;
pub mod frontend;
pub mod fs_probe;
pub mod game_list;
pub mod normalizer;
pub mod platform;
pub mod reconciler;

pub use assembler::{GameListDocument, ListAssembler, assemble};
pub use classifier::{Classification, PathClassifier, classify};
pub use frontend::{AssetKind, MiyooFrontend};
pub use fs_probe::{FsProbe, LocalFs, PathKind};
pub use game_list::{GameListError, load_old_game_list, load_old_game_list_or_empty, write_game_list};
pub use normalizer::normalize;
pub use platform::ExtensionSet;
pub use reconciler::{merge_entries, reconcile, reconcile_set};
