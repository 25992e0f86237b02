//! New location entry flow.
//!
//! Resolves a share URL (clipboard first, then a prompt), extracts its
//! fields, creates a map for it and writes the note. Every abort path leaves
//! the vault untouched and surfaces at most one notice, except cancellation
//! and clipboard failure which are silent.

use std::sync::Arc;
use std::time::Duration;

use locdb_core::{
    defaults, extract, is_maps_url, Clipboard, MapProvisioner, Notifier, PromptOutcome, Settings,
    UrlPrompt, Vault,
};
use tracing::{debug, error, info, instrument, warn};

use crate::markers::PendingMarkers;
use crate::writer::{NoteWriter, WriteOutcome};

/// Result of one run of the entry flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryOutcome {
    /// Note created at this path.
    Created(String),
    /// Note overwritten at this path after a create conflict.
    Overwritten(String),
    /// User dismissed the URL prompt.
    Cancelled,
    /// Input did not look like a map-share URL.
    InvalidUrl,
    /// Clipboard could not be read.
    ClipboardUnavailable,
    /// Map creation failed for this title.
    ProvisioningFailed(String),
    /// Configured entry folder is missing.
    FolderMissing(String),
    /// A note with this file name already exists.
    AlreadyExists(String),
    /// The vault rejected the write of this file.
    WriteFailed(String),
}

impl EntryOutcome {
    /// Whether a note was persisted.
    pub fn is_written(&self) -> bool {
        matches!(self, EntryOutcome::Created(_) | EntryOutcome::Overwritten(_))
    }

    /// Whether the flow ended without error. Cancellation counts as success.
    pub fn is_success(&self) -> bool {
        self.is_written() || *self == EntryOutcome::Cancelled
    }
}

impl From<WriteOutcome> for EntryOutcome {
    fn from(outcome: WriteOutcome) -> Self {
        match outcome {
            WriteOutcome::Created(path) => EntryOutcome::Created(path),
            WriteOutcome::Overwritten(path) => EntryOutcome::Overwritten(path),
            WriteOutcome::FolderMissing(folder) => EntryOutcome::FolderMissing(folder),
            WriteOutcome::AlreadyExists(name) => EntryOutcome::AlreadyExists(name),
        }
    }
}

/// Orchestrates creation of a location entry against the host capabilities.
pub struct EntryCreator {
    vault: Arc<dyn Vault>,
    notifier: Arc<dyn Notifier>,
    provisioner: Arc<dyn MapProvisioner>,
    prompt: Arc<dyn UrlPrompt>,
    clipboard: Arc<dyn Clipboard>,
    writer: NoteWriter,
    markers: PendingMarkers,
}

impl EntryCreator {
    pub fn new(
        vault: Arc<dyn Vault>,
        notifier: Arc<dyn Notifier>,
        provisioner: Arc<dyn MapProvisioner>,
        prompt: Arc<dyn UrlPrompt>,
        clipboard: Arc<dyn Clipboard>,
    ) -> Self {
        Self {
            writer: NoteWriter::new(vault.clone(), notifier.clone()),
            vault,
            notifier,
            provisioner,
            prompt,
            clipboard,
            markers: PendingMarkers::new(),
        }
    }

    pub fn vault(&self) -> &Arc<dyn Vault> {
        &self.vault
    }

    pub fn notifier(&self) -> &Arc<dyn Notifier> {
        &self.notifier
    }

    pub fn provisioner(&self) -> &Arc<dyn MapProvisioner> {
        &self.provisioner
    }

    /// Marker requests fired by this creator that may still be running.
    pub fn pending_markers(&self) -> &PendingMarkers {
        &self.markers
    }

    /// Create an entry from the clipboard, prompting when it holds no
    /// map-share URL.
    #[instrument(skip(self, settings), fields(subsystem = "flows", op = "create_from_clipboard"))]
    pub async fn create_from_clipboard(&self, settings: &Settings) -> EntryOutcome {
        let text = match self.clipboard.read_text().await {
            Ok(text) => text,
            Err(e) => {
                error!(error = ?e, "Error reading clipboard");
                return EntryOutcome::ClipboardUnavailable;
            }
        };

        let candidate = text.trim();
        if is_maps_url(candidate) {
            debug!("Using maps URL from clipboard");
            return self.add_entry(settings, candidate).await;
        }

        debug!("Clipboard holds no maps URL, prompting");
        let submitted = match self.prompt.prompt_url().await {
            Ok(PromptOutcome::Submitted(url)) => url,
            Ok(PromptOutcome::Cancelled) => {
                debug!("URL prompt cancelled");
                return EntryOutcome::Cancelled;
            }
            Err(e) => {
                warn!(error = ?e, "URL prompt failed; treating as cancelled");
                return EntryOutcome::Cancelled;
            }
        };
        self.create_from_url(settings, &submitted).await
    }

    /// Create an entry from an explicit URL.
    #[instrument(skip(self, settings), fields(subsystem = "flows", op = "create_from_url"))]
    pub async fn create_from_url(&self, settings: &Settings, url: &str) -> EntryOutcome {
        let url = url.trim();
        if !is_maps_url(url) {
            self.reject_url(url);
            return EntryOutcome::InvalidUrl;
        }
        self.add_entry(settings, url).await
    }

    fn reject_url(&self, url: &str) {
        info!(url = %url, "Rejected input that is not a maps URL");
        self.notifier.notify(
            "Invalid maps URL",
            Some(Duration::from_millis(defaults::INVALID_URL_NOTICE_MS)),
        );
    }

    async fn add_entry(&self, settings: &Settings, url: &str) -> EntryOutcome {
        let request = match extract(url) {
            Ok(request) => request,
            Err(e) => {
                debug!(error = ?e, "Extraction failed");
                self.reject_url(url);
                return EntryOutcome::InvalidUrl;
            }
        };
        info!(title = %request.title, coordinates = %request.coordinates, "Creating location entry");

        let map = match self.provisioner.create_map(&request.title).await {
            Ok(map) => map,
            Err(e) => {
                error!(title = %request.title, error = ?e, "Map creation failed");
                self.notifier.notify(
                    &format!(
                        "Failed to create entry for {}. You may be rate limited, try again later",
                        request.title
                    ),
                    None,
                );
                return EntryOutcome::ProvisioningFailed(request.title);
            }
        };

        // Best-effort: the note is written whether or not the marker lands.
        self.markers.spawn(
            self.provisioner.clone(),
            map.map_id.clone(),
            request.coordinates.clone(),
        );

        match self
            .writer
            .write(&settings.entry_folder, &request, &map, self.provisioner.urls())
            .await
        {
            Ok(outcome) => outcome.into(),
            Err(e) => {
                let file_name = request.file_name();
                error!(file_name = %file_name, error = ?e, "Writing location entry failed");
                self.notifier.notify(
                    &format!("Failed to write entry {}: {}", file_name, e),
                    None,
                );
                EntryOutcome::WriteFailed(file_name)
            }
        }
    }
}
