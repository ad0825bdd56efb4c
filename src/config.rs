//! Optional TOML configuration. Every field has a default, so a missing file
//! or a partial one is fine; the command line overrides whatever is here.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::launcher::DEFAULT_CONTACT_NUMBER;
use crate::overlay::BackResolution;
use crate::pricing::DEFAULT_USD_DIVISOR;

const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// An account shown in the payment sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethod {
    pub name: String,
    pub account: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub contact_number: String,
    pub catalog_path: Option<PathBuf>,
    pub usd_divisor: u64,
    pub back_policy: BackResolution,
    pub history_enabled: bool,
    pub prefs_path: Option<PathBuf>,
    pub payment_methods: Vec<PaymentMethod>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            contact_number: DEFAULT_CONTACT_NUMBER.to_string(),
            catalog_path: None,
            usd_divisor: DEFAULT_USD_DIVISOR,
            back_policy: BackResolution::default(),
            history_enabled: true,
            prefs_path: None,
            payment_methods: vec![PaymentMethod {
                name: "واتساب XP".to_string(),
                account: DEFAULT_CONTACT_NUMBER.to_string(),
            }],
        }
    }
}

impl StoreConfig {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("xp-store").join(CONFIG_FILE))
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// An explicit path must exist; the default location is optional.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }
}
