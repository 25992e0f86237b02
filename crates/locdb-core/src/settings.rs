//! Plugin settings and their persisted JSON form.
//!
//! Settings are loaded once at startup, passed explicitly into each flow,
//! and saved only when changed.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::defaults;
use crate::error::Result;

/// Vault-relative location of the settings file.
pub const SETTINGS_FILE: &str = ".obsidian/plugins/location-database/data.json";

/// User-editable configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Folder where location notes are written and scanned.
    pub entry_folder: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            entry_folder: defaults::ENTRY_FOLDER.to_string(),
        }
    }
}

/// JSON file holding [`Settings`].
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the conventional location inside a vault directory.
    pub fn for_vault(vault_root: &Path) -> Self {
        Self::new(vault_root.join(SETTINGS_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings, filling absent keys from defaults.
    ///
    /// A missing file yields [`Settings::default`].
    pub async fn load(&self) -> Result<Settings> {
        if !tokio::fs::try_exists(&self.path).await? {
            debug!(path = %self.path.display(), "No settings file, using defaults");
            return Ok(Settings::default());
        }
        let raw = tokio::fs::read_to_string(&self.path).await?;
        if raw.trim().is_empty() {
            return Ok(Settings::default());
        }
        Ok(serde_json::from_str(&raw)?)
    }

    /// Persist settings, creating parent directories as needed.
    pub async fn save(&self, settings: &Settings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(settings)?;
        tokio::fs::write(&self.path, json).await?;
        debug!(path = %self.path.display(), "Settings saved");
        Ok(())
    }
}
