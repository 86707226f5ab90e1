//! Decides whether an entry is written as a `<game>` or a `<folder>`.
//!
//! Rules, first match wins:
//! 1. `daphne` entries are always games.
//! 2. A file whose parent folder sits exactly one level below the input root is promoted
//!    to a folder (pointing at that parent) when the parent holds exactly one playable
//!    unit. A `*.bin` pattern is ignored while counting if the platform also knows
//!    `*.cue`, so a cue/bin pair counts once.
//! 3. A directory is a folder.
//! 4. Anything else is a game.

use crate::models::{EntryType, GameEntry, PlatformConfig};
use crate::services::fs_probe::{FsProbe, PathKind};
use crate::services::game_list::GameListError;
use crate::services::platform::{self, ExtensionSet};
use camino::{Utf8Path, Utf8PathBuf};

pub const DAPHNE: &str = "daphne";

/// Outcome of classifying one entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub entry_type: EntryType,
    pub path: Utf8PathBuf,
}

/// Classifier bound to one platform configuration.
///
/// The counting extension set is resolved once at construction.
#[derive(Debug, Clone)]
pub struct PathClassifier {
    is_daphne: bool,
    input_depth: usize,
    count_set: ExtensionSet,
}

impl PathClassifier {
    pub fn new(config: &PlatformConfig) -> Result<Self, GameListError> {
        let count_set = platform::unit_formats(&config.platform, &config.extensions, &config.add_extensions)?;

        Ok(Self {
            is_daphne: config.is_platform(DAPHNE),
            input_depth: depth(config.input_folder()),
            count_set,
        })
    }

    /// Extension set used for sibling counts
    pub fn count_set(&self) -> &ExtensionSet {
        &self.count_set
    }

    pub fn classify(&self, entry: &GameEntry, probe: &dyn FsProbe) -> Classification {
        let unchanged = |entry_type: EntryType| Classification {
            entry_type,
            path: entry.path.clone(),
        };

        if self.is_daphne {
            return unchanged(EntryType::Game);
        }

        match probe.kind(&entry.path) {
            PathKind::File => {
                let Some(parent) = entry.path.parent() else {
                    return unchanged(EntryType::Game);
                };

                if depth(parent) == self.input_depth + 1 {
                    let units = probe.count_matching(parent, &self.count_set);
                    if units == 1 {
                        tracing::debug!("Promoting {} to folder {}", entry.path, parent);
                        return Classification {
                            entry_type: EntryType::Folder,
                            path: parent.to_path_buf(),
                        };
                    }
                    tracing::trace!("{} holds {} playable files, keeping game entry", parent, units);
                }
                unchanged(EntryType::Game)
            }
            PathKind::Dir => unchanged(EntryType::Folder),
            PathKind::Missing => {
                tracing::debug!("{} no longer exists, writing it as a game", entry.path);
                unchanged(EntryType::Game)
            }
        }
    }
}

/// Classify a single entry.
pub fn classify(
    entry: &GameEntry,
    config: &PlatformConfig,
    probe: &dyn FsProbe,
) -> Result<Classification, GameListError> {
    Ok(PathClassifier::new(config)?.classify(entry, probe))
}

fn depth(path: &Utf8Path) -> usize {
    path.components().count()
}
