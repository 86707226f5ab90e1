//! Layout conventions of the Miyoo game list frontend.
//!
//! The frontend only understands path, name and image. Callers ask which asset kinds are
//! supported instead of checking for missing folders.

use crate::models::AppConfig;
use camino::Utf8PathBuf;

/// Asset kinds a scraper may produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Screenshot,
    Cover,
    Wheel,
    Marquee,
    Texture,
    Video,
}

impl AssetKind {
    pub const ALL: [AssetKind; 6] = [
        AssetKind::Screenshot,
        AssetKind::Cover,
        AssetKind::Wheel,
        AssetKind::Marquee,
        AssetKind::Texture,
        AssetKind::Video,
    ];
}

pub const GAME_LIST_FILE_NAME: &str = "miyoogamelist.xml";
pub const SCREENSHOTS_FOLDER_NAME: &str = "Imgs";

#[derive(Debug, Clone, Copy, Default)]
pub struct MiyooFrontend;

impl MiyooFrontend {
    pub const SUPPORTED_ASSETS: &'static [AssetKind] = &[AssetKind::Screenshot];

    pub fn supports(&self, kind: AssetKind) -> bool {
        Self::SUPPORTED_ASSETS.contains(&kind)
    }

    /// Folder where assets of `kind` are stored, `None` if the frontend has no use for them
    pub fn asset_folder(&self, kind: AssetKind, config: &AppConfig) -> Option<Utf8PathBuf> {
        match kind {
            AssetKind::Screenshot => {
                Some(self.game_list_folder(config).join(SCREENSHOTS_FOLDER_NAME))
            }
            _ => None,
        }
    }

    pub fn game_list_file_name(&self) -> &'static str {
        GAME_LIST_FILE_NAME
    }

    pub fn game_list_folder(&self, config: &AppConfig) -> Utf8PathBuf {
        config.resolved_game_list_folder()
    }

    pub fn game_list_path(&self, config: &AppConfig) -> Utf8PathBuf {
        self.game_list_folder(config).join(GAME_LIST_FILE_NAME)
    }

    /// Existing entries can be carried forward instead of being rescraped
    pub fn can_skip(&self) -> bool {
        true
    }
}

/// `~/RetroPie/roms/<platform>`, or a relative `RetroPie/roms/<platform>` without a home directory
pub fn default_input_folder(platform: &str) -> Utf8PathBuf {
    let base = dirs::home_dir()
        .and_then(|home| Utf8PathBuf::try_from(home).ok())
        .unwrap_or_default();
    base.join("RetroPie").join("roms").join(platform)
}
