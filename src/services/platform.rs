//! Recognised ROM extensions per platform.
//!
//! Extensions are kept as glob patterns (`*.cue`) in the order they were configured, and
//! compiled into a single case-insensitive matcher for directory counts.

use crate::services::game_list::GameListError;
use indexmap::IndexSet;
use regex::Regex;

/// Formats accepted on every platform
const GENERIC_FORMATS: &[&str] = &["*.zip", "*.7z", "*.ml"];

/// Built-in per-platform formats, appended after the generic ones.
const PLATFORM_FORMATS: &[(&str, &[&str])] = &[
    ("3do", &["*.iso", "*.cue", "*.chd"]),
    ("amiga", &["*.uae", "*.adf", "*.dms", "*.adz", "*.rp9", "*.lha", "*.hdf"]),
    ("arcade", &[]),
    ("atari2600", &["*.a26", "*.bin", "*.rom", "*.gz"]),
    ("atari7800", &["*.a78", "*.bin"]),
    ("atarilynx", &["*.lnx"]),
    ("daphne", &["*.daphne"]),
    ("fba", &[]),
    ("gamegear", &["*.gg"]),
    ("gb", &["*.gb", "*.gz"]),
    ("gba", &["*.gba"]),
    ("gbc", &["*.gbc", "*.gz"]),
    ("mame", &[]),
    ("mastersystem", &["*.sms"]),
    ("megadrive", &["*.gen", "*.md", "*.smd", "*.bin", "*.iso"]),
    ("n64", &["*.z64", "*.n64", "*.v64"]),
    ("neogeo", &[]),
    ("nes", &["*.nes", "*.fds", "*.unf", "*.unif"]),
    ("ngpc", &["*.ngc", "*.ngp"]),
    ("pcengine", &["*.pce", "*.cue", "*.ccd", "*.chd", "*.iso", "*.bin"]),
    ("psx", &["*.cue", "*.bin", "*.img", "*.iso", "*.chd", "*.m3u", "*.pbp", "*.toc", "*.cbn", "*.mdf"]),
    ("saturn", &["*.cue", "*.bin", "*.iso", "*.chd", "*.mdf"]),
    ("segacd", &["*.cue", "*.bin", "*.iso", "*.chd"]),
    ("sg-1000", &["*.sg"]),
    ("snes", &["*.smc", "*.sfc", "*.fig", "*.swc", "*.mgd", "*.bin"]),
    ("virtualboy", &["*.vb"]),
    ("wonderswan", &["*.ws"]),
    ("wonderswancolor", &["*.wsc"]),
];

/// An ordered, de-duplicated set of extension globs with a compiled matcher.
#[derive(Debug, Clone)]
pub struct ExtensionSet {
    patterns: IndexSet<String>,
    matcher: Option<Regex>,
}

impl ExtensionSet {
    /// Build a set from glob patterns. Bare extensions (`cue`, `.cue`) are normalised to `*.cue`.
    pub fn new<I, S>(patterns: I) -> Result<Self, GameListError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns: IndexSet<String> = patterns
            .into_iter()
            .flat_map(|p| {
                p.as_ref()
                    .split_whitespace()
                    .map(normalize_pattern)
                    .collect::<Vec<_>>()
            })
            .filter(|p| !p.is_empty())
            .collect();

        let matcher = compile(&patterns)?;
        Ok(Self { patterns, matcher })
    }

    pub fn contains(&self, pattern: &str) -> bool {
        self.patterns.contains(&normalize_pattern(pattern))
    }

    /// Copy of this set with `pattern` removed.
    pub fn without(&self, pattern: &str) -> Result<Self, GameListError> {
        let pattern = normalize_pattern(pattern);
        Self::new(self.patterns.iter().filter(|p| **p != pattern))
    }

    /// Does `file_name` match any pattern in the set?
    pub fn matches(&self, file_name: &str) -> bool {
        self.matcher
            .as_ref()
            .is_some_and(|matcher| matcher.is_match(file_name))
    }

    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Resolve the extension set for a platform.
///
/// # Arguments
/// * `platform` - Platform identifier (case-insensitive)
/// * `extensions` - User list that replaces the built-in one when non-empty
/// * `add_extensions` - User list appended in either case
pub fn formats(
    platform: &str,
    extensions: &[String],
    add_extensions: &[String],
) -> Result<ExtensionSet, GameListError> {
    let mut patterns: Vec<String> = Vec::new();

    if extensions.iter().any(|e| !e.trim().is_empty()) {
        patterns.extend(extensions.iter().cloned());
    } else {
        patterns.extend(GENERIC_FORMATS.iter().map(|s| s.to_string()));
        match PLATFORM_FORMATS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(platform))
        {
            Some((_, list)) => patterns.extend(list.iter().map(|s| s.to_string())),
            None => tracing::debug!("No built-in formats for platform '{}', using generic formats", platform),
        }
    }

    patterns.extend(add_extensions.iter().cloned());
    ExtensionSet::new(patterns)
}

/// Resolve the set that counts one pattern per playable unit.
///
/// A cue sheet and its bin tracks are one title, so `*.bin` is dropped when the
/// set also holds `*.cue`.
pub fn unit_formats(
    platform: &str,
    extensions: &[String],
    add_extensions: &[String],
) -> Result<ExtensionSet, GameListError> {
    let extensions = formats(platform, extensions, add_extensions)?;
    if extensions.contains("*.cue") && extensions.contains("*.bin") {
        extensions.without("*.bin")
    } else {
        Ok(extensions)
    }
}

/// Names of all platforms with built-in formats
pub fn known_platforms() -> impl Iterator<Item = &'static str> {
    PLATFORM_FORMATS.iter().map(|(name, _)| *name)
}

fn normalize_pattern(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() || raw.contains('*') || raw.contains('?') {
        raw.to_lowercase()
    } else if let Some(ext) = raw.strip_prefix('.') {
        format!("*.{}", ext.to_lowercase())
    } else {
        format!("*.{}", raw.to_lowercase())
    }
}

fn compile(patterns: &IndexSet<String>) -> Result<Option<Regex>, GameListError> {
    if patterns.is_empty() {
        return Ok(None);
    }

    let alternatives: Vec<String> = patterns.iter().map(|p| glob_to_regex(p)).collect();
    let source = format!("(?i)^(?:{})$", alternatives.join("|"));

    Regex::new(&source)
        .map(Some)
        .map_err(|source| GameListError::InvalidPattern {
            pattern: patterns.iter().cloned().collect::<Vec<_>>().join(" "),
            source,
        })
}

fn glob_to_regex(glob: &str) -> String {
    let mut out = String::with_capacity(glob.len() * 2);
    for ch in glob.chars() {
        match ch {
            '*' => out.push_str(".*"),
            '?' => out.push('.'),
            other => {
                let mut buf = [0u8; 4];
                out.push_str(&regex::escape(other.encode_utf8(&mut buf)));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_formats_include_generic() {
        let set = formats("nes", &[], &[]).unwrap();
        assert!(set.contains("*.zip"));
        assert!(set.contains("*.nes"));
        assert!(!set.contains("*.cue"));
    }

    #[test]
    fn test_user_extensions_replace_defaults() {
        let set = formats("nes", &["*.foo *.bar".to_string()], &[]).unwrap();
        assert!(set.contains("*.foo"));
        assert!(set.contains("*.bar"));
        assert!(!set.contains("*.nes"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_add_extensions_append() {
        let set = formats("psx", &[], &["chd".to_string(), ".pbp".to_string()]).unwrap();
        assert!(set.contains("*.chd"));
        assert!(set.contains("*.pbp"));
        // De-duplicated against the built-in list
        assert_eq!(set.patterns().filter(|p| *p == "*.chd").count(), 1);
    }

    #[test]
    fn test_unknown_platform_uses_generic_formats() {
        let set = formats("notaplatform", &[], &[]).unwrap();
        assert_eq!(set.patterns().collect::<Vec<_>>(), vec!["*.zip", "*.7z", "*.ml"]);
    }

    #[test]
    fn test_matches_is_case_insensitive() {
        let set = ExtensionSet::new(["*.cue", "*.bin"]).unwrap();
        assert!(set.matches("Game (Disc 1).CUE"));
        assert!(set.matches("track01.bin"));
        assert!(!set.matches("readme.txt"));
        assert!(!set.matches("game.cue.txt"));
    }

    #[test]
    fn test_without_drops_pattern() {
        let set = ExtensionSet::new(["*.cue", "*.bin"]).unwrap();
        let reduced = set.without("*.bin").unwrap();
        assert!(reduced.contains("*.cue"));
        assert!(!reduced.contains("*.bin"));
        assert!(!reduced.matches("track01.bin"));
    }

    #[test]
    fn test_unit_formats_drop_bin_only_beside_cue() {
        let psx = unit_formats("psx", &[], &[]).unwrap();
        assert!(psx.matches("Crash.cue"));
        assert!(!psx.matches("Crash.bin"));

        let megadrive = unit_formats("megadrive", &[], &[]).unwrap();
        assert!(megadrive.matches("Sonic.bin"));

        let custom = unit_formats("psx", &["*.bin".to_string()], &[]).unwrap();
        assert!(custom.matches("Crash.bin"));
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        let set = ExtensionSet::new(["*.p+s"]).unwrap();
        assert!(set.matches("game.p+s"));
        assert!(!set.matches("game.pps"));
    }

    #[test]
    fn test_empty_set_matches_nothing() {
        let set = ExtensionSet::new(Vec::<String>::new()).unwrap();
        assert!(set.is_empty());
        assert!(!set.matches("anything.zip"));
    }
}
