//! Filesystem queries used by reconciliation and classification.
//!
//! Both passes look at the disk only through [`FsProbe`], so they stay deterministic
//! for a fixed probe and can be exercised without real ROM folders.

use crate::services::platform::ExtensionSet;
use camino::Utf8Path;
use std::fs;

/// What a path currently points at on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    File,
    Dir,
    Missing,
}

#[cfg_attr(test, mockall::automock)]
pub trait FsProbe {
    /// Current kind of `path`
    fn kind(&self, path: &Utf8Path) -> PathKind;

    /// Number of regular files directly inside `dir` whose names match `extensions`
    fn count_matching(&self, dir: &Utf8Path, extensions: &ExtensionSet) -> usize;
}

/// [`FsProbe`] backed by the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl FsProbe for LocalFs {
    fn kind(&self, path: &Utf8Path) -> PathKind {
        match fs::metadata(path) {
            Ok(meta) if meta.is_file() => PathKind::File,
            Ok(meta) if meta.is_dir() => PathKind::Dir,
            Ok(_) => PathKind::Missing,
            Err(e) => {
                tracing::trace!("{} is not accessible: {}", path, e);
                PathKind::Missing
            }
        }
    }

    fn count_matching(&self, dir: &Utf8Path, extensions: &ExtensionSet) -> usize {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("Failed to read directory {}: {}", dir, e);
                return 0;
            }
        };

        entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
            .filter(|entry| {
                entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| extensions.matches(name))
            })
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use std::fs;
    use tempfile::TempDir;

    fn utf8_temp_dir() -> (TempDir, Utf8PathBuf) {
        let temp_dir = TempDir::new().unwrap();
        let path = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
        (temp_dir, path)
    }

    #[test]
    fn test_kind() {
        let (_temp_dir, root) = utf8_temp_dir();
        let file = root.join("Mario.nes");
        fs::write(&file, b"rom").unwrap();

        assert_eq!(LocalFs.kind(&file), PathKind::File);
        assert_eq!(LocalFs.kind(&root), PathKind::Dir);
        assert_eq!(LocalFs.kind(&root.join("gone.nes")), PathKind::Missing);
    }

    #[test]
    fn test_count_matching_ignores_other_files_and_dirs() {
        let (_temp_dir, root) = utf8_temp_dir();
        fs::write(root.join("Game.cue"), b"").unwrap();
        fs::write(root.join("Game.bin"), b"").unwrap();
        fs::write(root.join("notes.txt"), b"").unwrap();
        fs::create_dir(root.join("extra.cue")).unwrap();

        let cue_only = ExtensionSet::new(["*.cue"]).unwrap();
        let both = ExtensionSet::new(["*.cue", "*.bin"]).unwrap();

        assert_eq!(LocalFs.count_matching(&root, &cue_only), 1);
        assert_eq!(LocalFs.count_matching(&root, &both), 2);
    }

    #[test]
    fn test_count_matching_missing_dir_is_zero() {
        let (_temp_dir, root) = utf8_temp_dir();
        let set = ExtensionSet::new(["*.zip"]).unwrap();
        assert_eq!(LocalFs.count_matching(&root.join("missing"), &set), 0);
    }
}
