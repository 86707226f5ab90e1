use camino::{Utf8Path, Utf8PathBuf};
use indexmap::IndexMap;
use std::fmt;

/// Old game list entries keyed by their recorded path, in document order.
pub type OldEntrySet = IndexMap<Utf8PathBuf, GameEntry>;

/// Shape of an entry in the emitted game list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryType {
    Game,
    Folder,
}

impl EntryType {
    /// XML element name for this entry type
    pub fn tag(self) -> &'static str {
        match self {
            EntryType::Game => "game",
            EntryType::Folder => "folder",
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// One title in the game list.
///
/// Entries come either from a previously written game list (carried forward) or from a
/// metadata source for files that were not listed before. An empty `screenshot_file`
/// means the entry has no image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameEntry {
    /// Absolute path to the ROM file or folder
    pub path: Utf8PathBuf,

    /// Display name
    pub title: String,

    /// Absolute path to the preview image, empty when there is none
    pub screenshot_file: String,

    /// Favorite flag as recorded by the frontend, empty when unknown
    pub favorite: String,
}

impl GameEntry {
    pub fn new(path: impl Into<Utf8PathBuf>, title: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_screenshot(mut self, screenshot_file: impl Into<String>) -> Self {
        self.screenshot_file = screenshot_file.into();
        self
    }

    pub fn with_favorite(mut self, favorite: impl Into<String>) -> Self {
        self.favorite = favorite.into();
        self
    }

    /// True when a screenshot is recorded for this entry
    pub fn has_screenshot(&self) -> bool {
        !self.screenshot_file.is_empty()
    }

    /// Base file name of the recorded path
    pub fn file_name(&self) -> Option<&str> {
        self.path.file_name()
    }

    /// Fill empty metadata from an older entry for the same title.
    ///
    /// Freshly scraped values always win; the old value is only used where the new one
    /// is empty.
    pub fn preserve_from(&mut self, old: &GameEntry) {
        if self.favorite.is_empty() && !old.favorite.is_empty() {
            self.favorite = old.favorite.clone();
        }
        if self.screenshot_file.is_empty() && !old.screenshot_file.is_empty() {
            self.screenshot_file = old.screenshot_file.clone();
        }
        if self.title.is_empty() && !old.title.is_empty() {
            self.title = old.title.clone();
        }
    }

    /// Is this entry recorded under `root`?
    pub fn is_under(&self, root: &Utf8Path) -> bool {
        self.path.starts_with(root)
    }
}
