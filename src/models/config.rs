use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

/// Application configuration from `miyoo-gamelist.yaml`
///
/// Every field has a default so a partial (or missing) file still loads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Platform identifier, e.g. `snes` or `daphne`
    #[serde(default = "default_platform")]
    pub platform: String,

    /// ROM folder for the platform; defaults to `~/RetroPie/roms/<platform>`
    #[serde(default)]
    pub input_folder: Option<Utf8PathBuf>,

    /// Folder the game list is written to; defaults to the input folder
    #[serde(default)]
    pub game_list_folder: Option<Utf8PathBuf>,

    /// Replaces the built-in extension list for the platform when non-empty
    #[serde(default)]
    pub extensions: Vec<String>,

    /// Extra extensions appended to the platform list
    #[serde(default)]
    pub add_extensions: Vec<String>,

    /// Write paths relative to the input folder (`./Game.zip`)
    #[serde(default)]
    pub relative_paths: bool,

    /// Look for games in sub-folders of the input folder
    #[serde(default = "default_subdirs")]
    pub subdirs: bool,

    #[serde(default)]
    pub debug_mode: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            platform: default_platform(),
            input_folder: None,
            game_list_folder: None,
            extensions: Vec::new(),
            add_extensions: Vec::new(),
            relative_paths: false,
            subdirs: true,
            debug_mode: false,
        }
    }
}

fn default_platform() -> String {
    "snes".to_string()
}

fn default_subdirs() -> bool {
    true
}

impl AppConfig {
    /// Input folder, falling back to the frontend default for the platform
    pub fn resolved_input_folder(&self) -> Utf8PathBuf {
        match &self.input_folder {
            Some(folder) => folder.clone(),
            None => crate::services::frontend::default_input_folder(&self.platform),
        }
    }

    /// Game list folder, falling back to the input folder
    pub fn resolved_game_list_folder(&self) -> Utf8PathBuf {
        self.game_list_folder
            .clone()
            .unwrap_or_else(|| self.resolved_input_folder())
    }

    /// Freeze the per-run settings the core operations need.
    pub fn platform_config(&self) -> PlatformConfig {
        PlatformConfig {
            platform: self.platform.clone(),
            input_folder: self.resolved_input_folder(),
            extensions: self.extensions.clone(),
            add_extensions: self.add_extensions.clone(),
            relative_paths: self.relative_paths,
        }
    }
}

/// Immutable per-run platform settings passed into every core operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformConfig {
    pub platform: String,
    pub input_folder: Utf8PathBuf,
    pub extensions: Vec<String>,
    pub add_extensions: Vec<String>,
    pub relative_paths: bool,
}

impl PlatformConfig {
    pub fn new(platform: impl Into<String>, input_folder: impl Into<Utf8PathBuf>) -> Self {
        Self {
            platform: platform.into(),
            input_folder: input_folder.into(),
            extensions: Vec::new(),
            add_extensions: Vec::new(),
            relative_paths: false,
        }
    }

    pub fn with_relative_paths(mut self, relative_paths: bool) -> Self {
        self.relative_paths = relative_paths;
        self
    }

    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions;
        self
    }

    pub fn with_add_extensions(mut self, add_extensions: Vec<String>) -> Self {
        self.add_extensions = add_extensions;
        self
    }

    pub fn is_platform(&self, platform: &str) -> bool {
        self.platform.eq_ignore_ascii_case(platform)
    }

    pub fn input_folder(&self) -> &Utf8Path {
        &self.input_folder
    }
}
