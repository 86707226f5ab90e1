//! Finding candidate ROMs on disk, and building entries for them without a network scraper.

use crate::models::{DiscoveredItem, DiscoveryQueue, GameEntry, PlatformConfig};
use crate::services::frontend::SCREENSHOTS_FOLDER_NAME;
use crate::services::game_list::GameListError;
use crate::services::platform;
use camino::{Utf8Path, Utf8PathBuf};
use walkdir::WalkDir;

/// Extensions tried, in order, when looking for a local screenshot
const SCREENSHOT_EXTENSIONS: &[&str] = &["png", "jpg"];

/// Scan the input folder for files matching the platform's extensions.
///
/// With `subdirs` the whole tree is walked, otherwise only the top level. The screenshot
/// folder is never descended into. Results are sorted by file name within each folder.
/// Bin tracks are left out when the platform also lists cue sheets, so a cue/bin game
/// is queued once.
pub fn scan(config: &PlatformConfig, subdirs: bool) -> Result<DiscoveryQueue, GameListError> {
    let extensions = platform::unit_formats(&config.platform, &config.extensions, &config.add_extensions)?;
    let root = config.input_folder();

    let mut walker = WalkDir::new(root).min_depth(1).sort_by_file_name();
    if !subdirs {
        walker = walker.max_depth(1);
    }

    let mut queue = DiscoveryQueue::new();
    let entries = walker
        .into_iter()
        .filter_entry(|e| !(e.file_type().is_dir() && e.depth() == 1 && e.file_name() == SCREENSHOTS_FOLDER_NAME));

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Skipping unreadable path under {}: {}", root, e);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let Ok(path) = Utf8PathBuf::try_from(entry.into_path()) else {
            tracing::warn!("Skipping non UTF-8 path under {}", root);
            continue;
        };

        if path.file_name().is_some_and(|name| extensions.matches(name)) {
            queue.push(DiscoveredItem::file(path));
        }
    }

    tracing::info!("Found {} candidate files in {}", queue.len(), root);
    Ok(queue)
}

/// Build a new entry for `item` from what is on disk.
///
/// The title is the file stem. A screenshot named after the stem in `screenshots_folder`
/// is used when present.
pub fn local_entry(item: &DiscoveredItem, screenshots_folder: Option<&Utf8Path>) -> GameEntry {
    let path = item.path();
    let stem = path.file_stem().unwrap_or_else(|| item.file_name());
    let mut entry = GameEntry::new(path.to_path_buf(), stem);

    let image = screenshots_folder.and_then(|folder| {
        SCREENSHOT_EXTENSIONS
            .iter()
            .map(|ext| folder.join(format!("{}.{}", stem, ext)))
            .find(|candidate| candidate.is_file())
    });
    if let Some(image) = image {
        entry.screenshot_file = image.into_string();
    }

    entry
}
