//! Persisting rendered location notes into the vault.

use std::sync::Arc;

use locdb_core::{
    join_path, normalize_folder, render_note, Error, LocationRequest, MapUrls, Notifier,
    ProvisionedMap, Result, Vault,
};
use tracing::{debug, info, warn};

/// What happened when a note was handed to [`NoteWriter::write`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// A new file was created at this path.
    Created(String),
    /// The file appeared between the existence check and the create; its
    /// content was overwritten.
    Overwritten(String),
    /// The configured folder does not exist. Nothing was written.
    FolderMissing(String),
    /// A note with this file name already exists. Nothing was written.
    AlreadyExists(String),
}

impl WriteOutcome {
    pub fn is_written(&self) -> bool {
        matches!(self, WriteOutcome::Created(_) | WriteOutcome::Overwritten(_))
    }
}

/// Writes location notes under the configured entry folder.
///
/// Local precondition failures (missing folder, existing file) are reported
/// to the user and returned as outcomes. Only unexpected vault errors are
/// returned as `Err`.
pub struct NoteWriter {
    vault: Arc<dyn Vault>,
    notifier: Arc<dyn Notifier>,
}

impl NoteWriter {
    pub fn new(vault: Arc<dyn Vault>, notifier: Arc<dyn Notifier>) -> Self {
        Self { vault, notifier }
    }

    pub async fn write(
        &self,
        folder: &str,
        request: &LocationRequest,
        map: &ProvisionedMap,
        urls: &MapUrls,
    ) -> Result<WriteOutcome> {
        if !self.vault.is_folder(&normalize_folder(folder)).await? {
            warn!(folder = %folder, "Entry folder does not exist");
            self.notifier
                .notify(&format!("Folder {} does not exist", folder), None);
            return Ok(WriteOutcome::FolderMissing(folder.to_string()));
        }

        let file_name = request.file_name();
        let path = join_path(folder, &file_name);
        if self.vault.exists(&path).await? {
            info!(note_path = %path, "Entry already exists, not overwriting");
            self.notifier
                .notify(&format!("File {} already exists", file_name), None);
            return Ok(WriteOutcome::AlreadyExists(file_name));
        }

        let content = render_note(request, map, urls);
        let outcome = match self.vault.create(&path, &content).await {
            Ok(()) => WriteOutcome::Created(path),
            Err(Error::AlreadyExists(_)) => {
                debug!(note_path = %path, "Create raced with another writer; overwriting");
                self.vault.modify(&path, &content).await?;
                WriteOutcome::Overwritten(path)
            }
            Err(e) => return Err(e),
        };

        info!(outcome = ?outcome, map_id = %map.map_id, "Location entry written");
        self.notifier.notify(
            &format!("New location entry created: {}", file_name),
            None,
        );
        Ok(outcome)
    }
}
