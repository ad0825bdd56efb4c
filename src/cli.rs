use std::path::PathBuf;

use clap::{ArgAction, Parser};
use tracing::Level;

use crate::config::StoreConfig;
use crate::overlay::BackResolution;

#[derive(Debug, Parser)]
#[command(name = "xp-store", version, about = "Browse the XP store catalog and send orders")]
pub struct Cli {
    /// Configuration file (defaults to <config dir>/xp-store/config.toml).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Catalog JSON to load instead of the bundled one.
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Open this product at start: its details screen, or the salary
    /// window for salary programs.
    #[arg(long)]
    pub product: Option<String>,

    /// Chat number orders are sent to.
    #[arg(long)]
    pub contact: Option<String>,

    /// Preferences file (theme, tutorial banner).
    #[arg(long)]
    pub prefs: Option<PathBuf>,

    /// Open overlays without navigation history frames.
    #[arg(long)]
    pub no_history: bool,

    /// How Esc picks the overlay to close.
    #[arg(long, value_enum)]
    pub back_policy: Option<BackResolution>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn apply(&self, config: &mut StoreConfig) {
        if let Some(catalog) = &self.catalog {
            config.catalog_path = Some(catalog.clone());
        }
        if let Some(contact) = &self.contact {
            config.contact_number = contact.clone();
        }
        if let Some(prefs) = &self.prefs {
            config.prefs_path = Some(prefs.clone());
        }
        if self.no_history {
            config.history_enabled = false;
        }
        if let Some(policy) = self.back_policy {
            config.back_policy = policy;
        }
    }

    pub fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}
