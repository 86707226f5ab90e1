//! Serialises the merged entry list into a `miyoogamelist.xml` document.
//!
//! Entries are written in input order. Each one is classified, normalised and emitted
//! as a `<game>` or `<folder>` element with `<path>`, `<name>` and `<image>` children;
//! `<image />` is written when there is no screenshot.

use crate::models::{EntryType, GameEntry, PlatformConfig};
use crate::services::classifier::PathClassifier;
use crate::services::fs_probe::{FsProbe, LocalFs};
use crate::services::game_list::{GameListError, xml_escape};
use crate::services::normalizer;
use camino::Utf8Path;
use std::collections::HashSet;

const XML_HEADER: &str = "<?xml version=\"1.0\"?>\n<gameList>\n";
const XML_FOOTER: &str = "</gameList>";

/// An assembled document and what went into it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameListDocument {
    pub xml: String,
    pub games: usize,
    pub folders: usize,
}

impl GameListDocument {
    pub fn len(&self) -> usize {
        self.games + self.folders
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub struct ListAssembler<'a> {
    config: &'a PlatformConfig,
    classifier: PathClassifier,
}

impl<'a> ListAssembler<'a> {
    pub fn new(config: &'a PlatformConfig) -> Result<Self, GameListError> {
        Ok(Self {
            config,
            classifier: PathClassifier::new(config)?,
        })
    }

    pub fn assemble(&self, entries: Vec<GameEntry>, probe: &dyn FsProbe) -> GameListDocument {
        let mut xml = String::from(XML_HEADER);
        let mut games = 0;
        let mut folders = 0;

        let mut emitted = HashSet::new();

        for mut entry in entries {
            if entry.path.as_str().is_empty() {
                tracing::warn!("Skipping entry '{}' without a path", entry.title);
                continue;
            }

            let classification = self.classifier.classify(&entry, probe);
            entry.path = classification.path;
            let mut entry = normalizer::normalize(entry, self.config);

            if !emitted.insert(entry.path.clone()) {
                tracing::debug!("{} is already listed, skipping duplicate", entry.path);
                continue;
            }
            if entry.title.trim().is_empty() {
                entry.title = fallback_title(&entry.path);
                tracing::debug!("Entry {} has no title, using '{}'", entry.path, entry.title);
            }

            match classification.entry_type {
                EntryType::Game => games += 1,
                EntryType::Folder => folders += 1,
            }
            write_entry(&mut xml, classification.entry_type, &entry);
        }

        xml.push_str(XML_FOOTER);
        tracing::debug!("Assembled game list: {} games, {} folders", games, folders);

        GameListDocument { xml, games, folders }
    }
}

/// Assemble `entries` against the local filesystem.
pub fn assemble(entries: Vec<GameEntry>, config: &PlatformConfig) -> Result<String, GameListError> {
    Ok(ListAssembler::new(config)?.assemble(entries, &LocalFs).xml)
}

/// Title for an entry that has none: the file stem of its written path.
fn fallback_title(path: &Utf8Path) -> String {
    path.file_stem().unwrap_or(path.as_str()).to_string()
}

fn write_entry(xml: &mut String, entry_type: EntryType, entry: &GameEntry) {
    let tag = entry_type.tag();
    let image = if entry.has_screenshot() {
        format!("<image>{}</image>", xml_escape(&entry.screenshot_file))
    } else {
        "<image />".to_string()
    };

    xml.push_str(&format!(
        "  <{tag}>\n    <path>{}</path>\n    <name>{}</name>\n    {image}\n  </{tag}>\n",
        xml_escape(entry.path.as_str()),
        xml_escape(&entry.title),
    ));
}
