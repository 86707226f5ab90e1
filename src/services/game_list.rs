//! Reading and writing `miyoogamelist.xml` documents.
//!
//! The reader only understands the flat layout this crate writes (`<game>`/`<folder>`
//! elements holding `<path>`, `<name>`, `<image>` and optionally `<favorite>`), which is
//! all carry-forward needs. Paths recorded relative to the input folder (`./Game.zip`)
//! are resolved back to absolute paths so they can be matched against the disk.

use crate::models::{GameEntry, OldEntrySet};
use camino::{Utf8Path, Utf8PathBuf};
use regex::Regex;
use std::fs;
use std::io::Write;
use std::sync::LazyLock;
use thiserror::Error;

/// Errors that can occur while reading or producing a game list
#[derive(Error, Debug)]
pub enum GameListError {
    #[error("Could not read previous game list {path}: {source}")]
    MissingSourceList {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not write game list {path}: {source}")]
    UnwritableOutput {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid extension pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

static ENTRY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<(game|folder)>(.*?)</(?:game|folder)>").expect("Invalid entry regex")
});

static PATH_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<path>(.*?)</path>").expect("Invalid path regex"));

static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<name>(.*?)</name>").expect("Invalid name regex"));

static IMAGE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<image>(.*?)</image>").expect("Invalid image regex"));

static FAVORITE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<favorite>(.*?)</favorite>").expect("Invalid favorite regex")
});

/// Escape the five XML-reserved characters.
pub fn xml_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}

/// Reverse [`xml_escape`]. `&amp;` is replaced last so `&amp;lt;` stays `&lt;`.
pub fn xml_unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Parse a game list document into an [`OldEntrySet`].
///
/// Elements without a `<path>` are skipped. When a path occurs twice the first
/// occurrence wins.
pub fn parse_game_list(xml: &str, input_root: &Utf8Path) -> OldEntrySet {
    let mut entries = OldEntrySet::new();

    for captures in ENTRY_PATTERN.captures_iter(xml) {
        let body = &captures[2];

        let Some(raw_path) = capture_text(&PATH_PATTERN, body).filter(|p| !p.is_empty()) else {
            tracing::debug!("Skipping <{}> element without a path", &captures[1]);
            continue;
        };

        let path = Utf8PathBuf::from(resolve(&raw_path, input_root));
        let title = capture_text(&NAME_PATTERN, body).unwrap_or_default();
        let screenshot = capture_text(&IMAGE_PATTERN, body)
            .map(|image| resolve(&image, input_root))
            .unwrap_or_default();
        let favorite = capture_text(&FAVORITE_PATTERN, body).unwrap_or_default();

        let entry = GameEntry::new(path.clone(), title)
            .with_screenshot(screenshot)
            .with_favorite(favorite);

        if entries.contains_key(&path) {
            tracing::warn!("Duplicate game list entry for {}, keeping the first", path);
            continue;
        }
        entries.insert(path, entry);
    }

    entries
}

/// Load the previous game list from `path`.
pub fn load_old_game_list(path: &Utf8Path, input_root: &Utf8Path) -> Result<OldEntrySet, GameListError> {
    let xml = fs::read_to_string(path).map_err(|source| GameListError::MissingSourceList {
        path: path.to_path_buf(),
        source,
    })?;

    let entries = parse_game_list(&xml, input_root);
    tracing::info!("Loaded {} entries from previous game list {}", entries.len(), path);
    Ok(entries)
}

/// Load the previous game list, treating any failure as "no previous list".
pub fn load_old_game_list_or_empty(path: &Utf8Path, input_root: &Utf8Path) -> OldEntrySet {
    match load_old_game_list(path, input_root) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!("{}; every game will be treated as new", e);
            OldEntrySet::new()
        }
    }
}

/// Write `document` to `path`.
///
/// The document is written to a sibling temporary file first and renamed into place, so
/// an existing game list is never left half written.
pub fn write_game_list(path: &Utf8Path, document: &str) -> Result<(), GameListError> {
    let unwritable = |source| GameListError::UnwritableOutput {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_str().is_empty()) {
        fs::create_dir_all(parent).map_err(unwritable)?;
    }

    let tmp_path = Utf8PathBuf::from(format!("{}.tmp", path));
    let result = fs::File::create(&tmp_path)
        .and_then(|mut file| {
            file.write_all(document.as_bytes())?;
            file.sync_all()
        })
        .and_then(|()| fs::rename(&tmp_path, path));

    if let Err(e) = result {
        let _ = fs::remove_file(&tmp_path);
        return Err(unwritable(e));
    }

    tracing::info!("Wrote game list {} ({} bytes)", path, document.len());
    Ok(())
}

fn capture_text(pattern: &Regex, body: &str) -> Option<String> {
    pattern
        .captures(body)
        .map(|c| xml_unescape(c[1].trim()))
}

fn resolve(path: &str, input_root: &Utf8Path) -> String {
    if path == "." {
        input_root.to_string()
    } else if let Some(rest) = path.strip_prefix("./") {
        input_root.join(rest).into_string()
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"<?xml version="1.0"?>
<gameList>
  <game>
    <path>/roms/snes/Mario.zip</path>
    <name>Super Mario World</name>
    <image>/roms/snes/Imgs/Mario.png</image>
  </game>
  <folder>
    <path>./Zelda</path>
    <name>Zelda &amp; Link</name>
    <image />
  </folder>
</gameList>"#;

    #[test]
    fn test_xml_escape() {
        assert_eq!(xml_escape(r#"A & B "Test""#), "A &amp; B &quot;Test&quot;");
        assert_eq!(xml_escape("<it's>"), "&lt;it&apos;s&gt;");
    }

    #[test]
    fn test_xml_unescape_order() {
        assert_eq!(xml_unescape("&amp;lt;"), "&lt;");
        assert_eq!(xml_unescape("A &amp; B &quot;Test&quot;"), r#"A & B "Test""#);
    }

    #[test]
    fn test_parse_game_list() {
        let entries = parse_game_list(SAMPLE, Utf8Path::new("/roms/snes"));
        assert_eq!(entries.len(), 2);

        let mario = &entries[0];
        assert_eq!(mario.path, Utf8PathBuf::from("/roms/snes/Mario.zip"));
        assert_eq!(mario.title, "Super Mario World");
        assert_eq!(mario.screenshot_file, "/roms/snes/Imgs/Mario.png");

        let zelda = entries.get(Utf8Path::new("/roms/snes/Zelda")).unwrap();
        assert_eq!(zelda.title, "Zelda & Link");
        assert!(!zelda.has_screenshot());
    }

    #[test]
    fn test_parse_skips_entries_without_path() {
        let xml = "<gameList><game><name>Nothing</name></game></gameList>";
        assert!(parse_game_list(xml, Utf8Path::new("/roms")).is_empty());
    }

    #[test]
    fn test_parse_favorite() {
        let xml = "<gameList><game><path>/r/a.nes</path><name>A</name><favorite>true</favorite></game></gameList>";
        let entries = parse_game_list(xml, Utf8Path::new("/r"));
        assert_eq!(entries[0].favorite, "true");
    }

    #[test]
    fn test_load_missing_list() {
        let temp_dir = TempDir::new().unwrap();
        let path = Utf8PathBuf::try_from(temp_dir.path().join("missing.xml")).unwrap();

        let err = load_old_game_list(&path, Utf8Path::new("/roms")).unwrap_err();
        assert!(matches!(err, GameListError::MissingSourceList { .. }));
        assert!(load_old_game_list_or_empty(&path, Utf8Path::new("/roms")).is_empty());
    }

    #[test]
    fn test_write_game_list_replaces_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = Utf8PathBuf::try_from(temp_dir.path().join("out/miyoogamelist.xml")).unwrap();

        write_game_list(&path, "first").unwrap();
        write_game_list(&path, "second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
        assert!(!Utf8PathBuf::from(format!("{}.tmp", path)).exists());
    }

    #[test]
    fn test_write_game_list_unwritable() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, b"").unwrap();
        let path = Utf8PathBuf::try_from(blocker.join("miyoogamelist.xml")).unwrap();

        let err = write_game_list(&path, "doc").unwrap_err();
        assert!(matches!(err, GameListError::UnwritableOutput { .. }));
    }
}
