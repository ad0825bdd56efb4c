//! The two flags that survive between runs: theme and tutorial banner.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::theme::ThemeMode;

const PREFS_FILE: &str = "prefs.toml";

#[derive(Debug, Error)]
pub enum PrefsError {
    #[error("failed to access preferences {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed preferences: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to encode preferences: {0}")]
    Encode(#[from] toml::ser::Error),
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(rename = "xp-theme", default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<ThemeMode>,
    #[serde(
        rename = "xp-tutorial-banner-closed",
        default,
        skip_serializing_if = "is_false"
    )]
    pub tutorial_banner_closed: bool,
}

fn is_false(v: &bool) -> bool {
    !*v
}

/// Preferences plus the file they persist to. Without a path every change
/// lives only for the current run.
#[derive(Debug, Default)]
pub struct PreferenceStore {
    path: Option<PathBuf>,
    prefs: Preferences,
}

impl PreferenceStore {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("xp-store").join(PREFS_FILE))
    }

    pub fn in_memory() -> Self {
        Self::default()
    }

    /// A missing file is an empty preference set, not an error.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, PrefsError> {
        let path = path.into();
        let prefs = match fs::read_to_string(&path) {
            Ok(raw) => toml::from_str(&raw)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Preferences::default(),
            Err(source) => return Err(PrefsError::Io { path, source }),
        };
        debug!(path = %path.display(), ?prefs, "preferences loaded");
        Ok(Self {
            path: Some(path),
            prefs,
        })
    }

    /// Load, degrading to in-memory preferences on any error.
    pub fn load_or_default(path: Option<PathBuf>) -> Self {
        let Some(path) = path else {
            return Self::in_memory();
        };
        match Self::load(&path) {
            Ok(store) => store,
            Err(err) => {
                warn!(error = %err, "ignoring unreadable preferences");
                Self {
                    path: Some(path),
                    prefs: Preferences::default(),
                }
            }
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn preferences(&self) -> &Preferences {
        &self.prefs
    }

    pub fn theme(&self) -> Option<ThemeMode> {
        self.prefs.theme
    }

    pub fn tutorial_banner_closed(&self) -> bool {
        self.prefs.tutorial_banner_closed
    }

    pub fn set_theme(&mut self, theme: ThemeMode) -> Result<(), PrefsError> {
        self.prefs.theme = Some(theme);
        self.save()
    }

    pub fn close_tutorial_banner(&mut self) -> Result<(), PrefsError> {
        self.prefs.tutorial_banner_closed = true;
        self.save()
    }

    fn save(&self) -> Result<(), PrefsError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let io_err = |source| PrefsError::Io {
            path: path.clone(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let encoded = toml::to_string(&self.prefs)?;
        fs::write(path, encoded).map_err(io_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_means_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferenceStore::load(dir.path().join("prefs.toml")).unwrap();
        assert_eq!(store.preferences(), &Preferences::default());
    }

    #[test]
    fn changes_are_persisted_under_storage_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("prefs.toml");
        let mut store = PreferenceStore::load(&path).unwrap();
        store.set_theme(ThemeMode::Light).unwrap();
        store.close_tutorial_banner().unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("xp-theme = \"light\""));
        assert!(raw.contains("xp-tutorial-banner-closed = true"));

        let reloaded = PreferenceStore::load(&path).unwrap();
        assert_eq!(reloaded.theme(), Some(ThemeMode::Light));
        assert!(reloaded.tutorial_banner_closed());
    }

    #[test]
    fn unset_banner_flag_is_not_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.toml");
        let mut store = PreferenceStore::load(&path).unwrap();
        store.set_theme(ThemeMode::Dark).unwrap();
        let raw = fs::read_to_string(&path).unwrap();
        assert!(!raw.contains("banner"));
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.toml");
        fs::write(&path, "xp-theme = 7").unwrap();
        assert!(matches!(
            PreferenceStore::load(&path),
            Err(PrefsError::Parse(_))
        ));
        let store = PreferenceStore::load_or_default(Some(path));
        assert_eq!(store.theme(), None);
    }

    #[test]
    fn in_memory_store_never_touches_disk() {
        let mut store = PreferenceStore::in_memory();
        store.set_theme(ThemeMode::Light).unwrap();
        assert!(store.path().is_none());
        assert_eq!(store.theme(), Some(ThemeMode::Light));
    }
}
