//! Removes already-listed games from the discovery queue.
//!
//! Every old entry is carried forward unchanged. For each one, the first queue item that
//! refers to the same game is dropped so it is not scraped again:
//! - a file entry matches a queued item with the same base file name;
//! - a folder entry matches a queued item whose parent folder is that folder (the file a
//!   folder entry was promoted from) or a queued directory with the same absolute path.
//!
//! Matches are flagged in one pass and the queue is compacted afterwards, so queue order
//! is preserved and every old entry removes at most one item.

use crate::models::{DiscoveredItem, DiscoveryQueue, GameEntry, OldEntrySet};
use crate::services::fs_probe::{FsProbe, PathKind};
use camino::Utf8Path;

/// Reconcile `old_entries` against `queue`.
///
/// # Returns
/// The carry-forward list (all old entries, in order). `queue` is left holding only the
/// items that still need metadata.
pub fn reconcile(
    old_entries: &[GameEntry],
    queue: &mut DiscoveryQueue,
    probe: &dyn FsProbe,
) -> Vec<GameEntry> {
    let mut removed = vec![false; queue.len()];
    let mut matched = 0usize;

    for entry in old_entries {
        let found = match probe.kind(&entry.path) {
            PathKind::File => match entry.file_name() {
                Some(name) => first_unremoved(queue, &removed, |item| item.file_name() == name),
                None => None,
            },
            PathKind::Dir => first_unremoved(queue, &removed, |item| {
                matches_folder(item, &entry.path)
            }),
            PathKind::Missing => {
                tracing::debug!("Old entry {} is no longer on disk, keeping it", entry.path);
                None
            }
        };

        if let Some(index) = found {
            tracing::trace!("{} already listed, skipping", queue.as_slice()[index].path());
            removed[index] = true;
            matched += 1;
        }
    }

    let before = queue.len();
    queue.compact(&removed);
    tracing::info!(
        "Reconciled {} old entries: {} queued items already listed, {} left to scrape (of {})",
        old_entries.len(),
        matched,
        queue.len(),
        before
    );

    old_entries.to_vec()
}

/// Reconcile against an [`OldEntrySet`] in document order.
pub fn reconcile_set(
    old_entries: &OldEntrySet,
    queue: &mut DiscoveryQueue,
    probe: &dyn FsProbe,
) -> Vec<GameEntry> {
    let entries: Vec<GameEntry> = old_entries.values().cloned().collect();
    reconcile(&entries, queue, probe)
}

/// Combine carried-forward and freshly scraped entries into the final list order.
///
/// Carried entries come first in their original order, followed by scraped entries in
/// scrape order. A scraped entry that also exists in `old_entries` takes any metadata it
/// lacks from the old one; a carried entry with the same path is then dropped in favour of
/// the merged fresh entry.
pub fn merge_entries(
    carried: Vec<GameEntry>,
    scraped: Vec<GameEntry>,
    old_entries: &OldEntrySet,
) -> Vec<GameEntry> {
    let mut scraped = scraped;
    for entry in &mut scraped {
        if let Some(old) = old_entries.get(&entry.path) {
            entry.preserve_from(old);
        }
    }

    let mut merged: Vec<GameEntry> = carried
        .into_iter()
        .filter(|old| !scraped.iter().any(|fresh| fresh.path == old.path))
        .collect();
    merged.extend(scraped);
    merged
}

fn first_unremoved<F>(queue: &DiscoveryQueue, removed: &[bool], predicate: F) -> Option<usize>
where
    F: Fn(&DiscoveredItem) -> bool,
{
    queue
        .iter()
        .enumerate()
        .find(|(index, item)| !removed[*index] && predicate(*item))
        .map(|(index, _)| index)
}

fn matches_folder(item: &DiscoveredItem, folder: &Utf8Path) -> bool {
    if item.is_dir() {
        item.path() == folder
    } else {
        item.parent() == folder
    }
}
