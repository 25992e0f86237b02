//! Command handlers wired over a vault directory.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use locdb_core::{
    defaults, Clipboard, MapProvisioner, Notifier, Result, Settings, SettingsStore, UrlPrompt,
};
use locdb_flows::{EntryCreator, EntryOutcome, RepairReport, Repairer};
use locdb_vault::FilesystemVault;
use tracing::{info, warn};

/// Host capabilities other than file storage.
pub struct Host {
    pub notifier: Arc<dyn Notifier>,
    pub provisioner: Arc<dyn MapProvisioner>,
    pub prompt: Arc<dyn UrlPrompt>,
    pub clipboard: Arc<dyn Clipboard>,
}

/// A vault directory and its settings file.
pub struct App {
    vault: FilesystemVault,
    store: SettingsStore,
}

impl App {
    /// Open the vault at `root`. `settings_path` overrides the settings file
    /// that normally lives inside the vault.
    pub async fn open(root: &Path, settings_path: Option<PathBuf>) -> Result<Self> {
        let vault = FilesystemVault::new(root);
        vault.validate().await?;
        let store = match settings_path {
            Some(path) => SettingsStore::new(path),
            None => SettingsStore::for_vault(root),
        };
        info!(vault = %root.display(), settings = %store.path().display(), "Vault opened");
        Ok(Self { vault, store })
    }

    pub fn vault(&self) -> &FilesystemVault {
        &self.vault
    }

    pub fn settings_store(&self) -> &SettingsStore {
        &self.store
    }

    /// Build the entry flow for this vault.
    pub fn creator(&self, host: Host) -> Arc<EntryCreator> {
        Arc::new(EntryCreator::new(
            Arc::new(self.vault.clone()),
            host.notifier,
            host.provisioner,
            host.prompt,
            host.clipboard,
        ))
    }

    /// Add a location entry from `url`, or from the clipboard/prompt.
    pub async fn new_entry(&self, creator: &EntryCreator, url: Option<&str>) -> Result<EntryOutcome> {
        let settings = self.store.load().await?;
        let outcome = match url {
            Some(url) => creator.create_from_url(&settings, url).await,
            None => creator.create_from_clipboard(&settings).await,
        };
        info!(outcome = ?outcome, "New location entry finished");
        Ok(outcome)
    }

    /// Run the repair pass over the entry folder.
    pub async fn repair(&self, creator: &Arc<EntryCreator>) -> Result<RepairReport> {
        let settings = self.store.load().await?;
        Repairer::new(creator.clone()).repair_all(&settings).await
    }

    pub async fn settings(&self) -> Result<Settings> {
        self.store.load().await
    }

    /// Change the entry folder and persist it.
    pub async fn set_entry_folder(&self, folder: &str) -> Result<Settings> {
        let mut settings = self.store.load().await?;
        settings.entry_folder = folder.to_string();
        self.store.save(&settings).await?;
        info!(entry_folder = %folder, "Entry folder updated");
        Ok(settings)
    }
}

/// Give detached marker requests a chance to finish before the runtime stops.
pub async fn drain_markers(creator: &EntryCreator) {
    let abandoned = creator
        .pending_markers()
        .drain(Duration::from_secs(defaults::MARKER_DRAIN_TIMEOUT_SECS))
        .await;
    if abandoned > 0 {
        warn!(abandoned, "Exiting with marker requests still in flight");
    }
}
