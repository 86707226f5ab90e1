//! miyoo-gamelist - writes `miyoogamelist.xml` for a ROM folder
//!
//! # Execution Flow
//!
//! 1. Parse the command line and initialize logging → `<config dir>/logs/miyoo-gamelist.<date>`
//! 2. Load `miyoo-gamelist.yaml` (plus `MIYOO_GAMELIST_*` variables) and apply CLI overrides
//! 3. Load the previous game list; an unreadable list counts as empty
//! 4. Scan the input folder for ROMs
//! 5. Reconcile: games already listed are dropped from the queue and carried forward
//! 6. Build entries for the remaining files from local data (title from the file name,
//!    screenshot from `Imgs/`)
//! 7. Assemble the XML and write it next to the ROMs
//!
//! Only a configuration failure or an unwritable game list makes the run fail.

use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use clap::Parser;
use miyoo_gamelist::services::{
    ListAssembler, LocalFs, MiyooFrontend, discovery, frontend::AssetKind, game_list, platform, reconciler,
};
use miyoo_gamelist::{APP_NAME, AppConfig, ConfigManager, Metrics, VERSION};

#[derive(Parser, Debug)]
#[command(name = "miyoo-gamelist", version, about = "Generate miyoogamelist.xml for a ROM folder", long_about = None)]
struct Cli {
    /// Directory holding miyoo-gamelist.yaml and the logs folder
    #[arg(long, default_value = "miyoo-gamelist")]
    config_dir: Utf8PathBuf,

    /// Platform identifier (e.g. snes, psx, daphne)
    #[arg(short, long)]
    platform: Option<String>,

    /// ROM folder for the platform
    #[arg(short, long)]
    input: Option<Utf8PathBuf>,

    /// Folder to write miyoogamelist.xml to (defaults to the ROM folder)
    #[arg(short, long)]
    gamelist: Option<Utf8PathBuf>,

    /// Write paths relative to the ROM folder
    #[arg(long)]
    relative: bool,

    /// Replace the platform's ROM extensions (e.g. "*.zip *.sfc")
    #[arg(long, value_delimiter = ',')]
    extensions: Option<Vec<String>>,

    /// Extra ROM extensions to accept
    #[arg(long, value_delimiter = ',')]
    add_extensions: Option<Vec<String>>,

    /// Only look at the top level of the ROM folder
    #[arg(long)]
    no_subdirs: bool,

    /// Rebuild every entry instead of carrying forward the previous list
    #[arg(long)]
    refresh: bool,

    /// Also log to the console
    #[arg(short, long)]
    verbose: bool,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

impl Cli {
    fn apply(&self, config: &mut AppConfig) {
        if let Some(platform) = &self.platform {
            config.platform = platform.clone();
        }
        if let Some(input) = &self.input {
            config.input_folder = Some(input.clone());
        }
        if let Some(gamelist) = &self.gamelist {
            config.game_list_folder = Some(gamelist.clone());
        }
        if let Some(extensions) = &self.extensions {
            config.extensions = extensions.clone();
        }
        if let Some(add_extensions) = &self.add_extensions {
            config.add_extensions = add_extensions.clone();
        }
        config.relative_paths |= self.relative;
        config.subdirs &= !self.no_subdirs;
        config.debug_mode |= self.debug;
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_manager = ConfigManager::new(&cli.config_dir)?;
    let mut config = config_manager.load_app_config()?;
    cli.apply(&mut config);

    let _log_guard = miyoo_gamelist::logging::setup_logging(
        &config_manager.config_dir().join("logs"),
        config.debug_mode,
        cli.verbose,
    )?;

    tracing::info!("Starting {} v{}", APP_NAME, VERSION);

    if config.extensions.is_empty()
        && !platform::known_platforms().any(|known| known.eq_ignore_ascii_case(&config.platform))
    {
        tracing::warn!(
            "Unknown platform '{}', only generic formats will be scanned unless extensions are set",
            config.platform
        );
    }

    let frontend = MiyooFrontend;
    let platform = config.platform_config();
    let list_path = frontend.game_list_path(&config);
    let mut metrics = Metrics::new();

    tracing::info!(
        "Platform '{}', input folder {}, game list {}",
        platform.platform,
        platform.input_folder,
        list_path
    );

    let old_entries = if cli.refresh || !frontend.can_skip() {
        Default::default()
    } else {
        game_list::load_old_game_list_or_empty(&list_path, platform.input_folder())
    };
    metrics.old_entries = old_entries.len();

    let mut queue = discovery::scan(&platform, config.subdirs)
        .context("Failed to resolve ROM extensions")?;
    let queue_before = queue.len();

    let carried = reconciler::reconcile_set(&old_entries, &mut queue, &LocalFs);
    metrics.record_reconcile(queue_before, queue.len());

    let screenshots = frontend.asset_folder(AssetKind::Screenshot, &config);
    let scraped: Vec<_> = queue
        .iter()
        .map(|item| discovery::local_entry(item, screenshots.as_deref()))
        .collect();
    metrics.new_entries = scraped.len();

    let entries = reconciler::merge_entries(carried, scraped, &old_entries);

    let assembler = ListAssembler::new(&platform).context("Failed to resolve ROM extensions")?;
    let document = assembler.assemble(entries, &LocalFs);
    metrics.record_document(document.games, document.folders);

    game_list::write_game_list(&list_path, &document.xml).map_err(|e| {
        tracing::error!("{}", e);
        anyhow::Error::new(e)
    })?;

    metrics.log_summary();
    Ok(())
}
