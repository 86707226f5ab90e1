//! Frontend-specific path rewriting. Pure string work, no filesystem access.

use crate::models::{GameEntry, PlatformConfig};
use crate::services::classifier::DAPHNE;
use camino::Utf8PathBuf;

const DAPHNE_ROMS_SEGMENT: &str = "daphne/roms/";
const DAPHNE_SEGMENT: &str = "daphne/";
const ZIP_SUFFIX: &str = ".zip";
const DAPHNE_SUFFIX: &str = ".daphne";

/// Apply the platform alias rules, then relative-path substitution.
///
/// The daphne override runs first since it can change the prefix that relative mode
/// replaces.
pub fn normalize(mut entry: GameEntry, config: &PlatformConfig) -> GameEntry {
    if config.is_platform(DAPHNE) {
        entry.path = Utf8PathBuf::from(daphne_alias(entry.path.as_str()));
    }

    if config.relative_paths {
        let root = config.input_folder().as_str();
        entry.path = Utf8PathBuf::from(relativize(entry.path.as_str(), root));
        if entry.has_screenshot() {
            entry.screenshot_file = relativize(&entry.screenshot_file, root);
        }
    }

    entry
}

/// `.../daphne/roms/lair.zip` becomes `.../daphne/lair.daphne`
fn daphne_alias(path: &str) -> String {
    let path = path.replace(DAPHNE_ROMS_SEGMENT, DAPHNE_SEGMENT);
    match path.strip_suffix(ZIP_SUFFIX) {
        Some(stem) => format!("{}{}", stem, DAPHNE_SUFFIX),
        None => path,
    }
}

/// Replace a leading `root` with `.`. Other occurrences of the root string are left alone.
fn relativize(path: &str, root: &str) -> String {
    let root = root.trim_end_matches('/');
    if root.is_empty() {
        return path.to_string();
    }

    match path.strip_prefix(root) {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => format!(".{}", rest),
        _ => path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_mode() {
        let config = PlatformConfig::new("snes", "/roms/snes").with_relative_paths(true);
        let entry = GameEntry::new("/roms/snes/Mario.zip", "Mario");
        assert_eq!(normalize(entry, &config).path, Utf8PathBuf::from("./Mario.zip"));
    }

    #[test]
    fn test_absolute_mode_is_unchanged() {
        let config = PlatformConfig::new("snes", "/roms/snes");
        let entry = GameEntry::new("/roms/snes/Mario.zip", "Mario");
        assert_eq!(normalize(entry, &config).path, Utf8PathBuf::from("/roms/snes/Mario.zip"));
    }

    #[test]
    fn test_relative_mode_only_replaces_leading_root() {
        let config = PlatformConfig::new("snes", "/roms/snes").with_relative_paths(true);
        let entry = GameEntry::new("/roms/snes/backup/roms/snes/Mario.zip", "Mario");
        assert_eq!(
            normalize(entry, &config).path,
            Utf8PathBuf::from("./backup/roms/snes/Mario.zip")
        );

        let outside = GameEntry::new("/mnt/roms/snes/Mario.zip", "Mario");
        assert_eq!(
            normalize(outside, &config).path,
            Utf8PathBuf::from("/mnt/roms/snes/Mario.zip")
        );
    }

    #[test]
    fn test_relative_mode_respects_segment_boundary() {
        let config = PlatformConfig::new("snes", "/roms/snes").with_relative_paths(true);
        let entry = GameEntry::new("/roms/snes-hacks/Mario.zip", "Mario");
        assert_eq!(
            normalize(entry, &config).path,
            Utf8PathBuf::from("/roms/snes-hacks/Mario.zip")
        );
    }

    #[test]
    fn test_relative_mode_screenshot() {
        let config = PlatformConfig::new("snes", "/roms/snes/").with_relative_paths(true);
        let entry = GameEntry::new("/roms/snes/Mario.zip", "Mario")
            .with_screenshot("/roms/snes/Imgs/Mario.png");
        let entry = normalize(entry, &config);
        assert_eq!(entry.screenshot_file, "./Imgs/Mario.png");

        let bare = normalize(GameEntry::new("/roms/snes/Zelda.zip", "Zelda"), &config);
        assert!(bare.screenshot_file.is_empty());
    }

    #[test]
    fn test_daphne_alias() {
        let config = PlatformConfig::new("daphne", "/roms/daphne");
        let entry = GameEntry::new("/roms/daphne/roms/lair.zip", "Dragon's Lair");
        assert_eq!(
            normalize(entry, &config).path,
            Utf8PathBuf::from("/roms/daphne/lair.daphne")
        );
    }

    #[test]
    fn test_daphne_only_rewrites_trailing_zip() {
        assert_eq!(daphne_alias("/roms/daphne/roms/a.zip.d/x"), "/roms/daphne/a.zip.d/x");
    }

    #[test]
    fn test_daphne_override_before_relative() {
        let config = PlatformConfig::new("daphne", "/roms/daphne").with_relative_paths(true);
        let entry = GameEntry::new("/roms/daphne/roms/lair.zip", "Dragon's Lair");
        assert_eq!(normalize(entry, &config).path, Utf8PathBuf::from("./lair.daphne"));
    }

    #[test]
    fn test_daphne_rules_not_applied_to_other_platforms() {
        let config = PlatformConfig::new("snes", "/roms");
        let entry = GameEntry::new("/roms/daphne/roms/lair.zip", "Lair");
        assert_eq!(
            normalize(entry, &config).path,
            Utf8PathBuf::from("/roms/daphne/roms/lair.zip")
        );
    }
}
