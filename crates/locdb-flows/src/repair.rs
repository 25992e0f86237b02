//! Repair pass over existing location notes.
//!
//! Scans the immediate children of the entry folder and fixes two defects:
//!
//! - **No map identifier** in the `image` field: the note is regenerated
//!   from its source URL. The old file is parked as `<stem> (old).md` while
//!   the entry flow runs, then deleted on success or renamed back on failure.
//! - **Empty body** on a note that does have a map identifier: the embed tag
//!   is rendered from that identifier and the coordinates in the source URL,
//!   and appended after the untouched front-matter block.
//!
//! A note that needs regeneration never goes through the embed repair in the
//! same pass: regeneration already writes a complete note.

use std::sync::Arc;

use locdb_core::{
    coordinates_of, defaults, join_path, normalize_folder, parse_note, render_embed, Error,
    ProvisionedMap, Result, Settings, VaultEntry,
};
use serde::Serialize;
use tracing::{debug, error, info, instrument, warn};

use crate::entry::EntryCreator;

/// Counts from one repair pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RepairReport {
    /// The entry folder did not exist; nothing was scanned.
    pub folder_missing: bool,
    /// Markdown files examined.
    pub scanned: usize,
    /// Files without a front-matter block or `Location` link.
    pub skipped: usize,
    /// Notes regenerated from their source URL.
    pub regenerated: usize,
    /// Regenerations that failed and were restored from backup.
    pub regeneration_failed: usize,
    /// Notes that had their embed body re-rendered.
    pub embeds_restored: usize,
    /// Empty-body notes whose source URL has no coordinates.
    pub embed_skipped: usize,
    /// Files that hit a vault error; they were left as the error found them.
    pub errors: usize,
}

impl RepairReport {
    /// Whether the pass ran to completion without failures.
    pub fn is_clean(&self) -> bool {
        !self.folder_missing && self.errors == 0 && self.regeneration_failed == 0
    }
}

/// Runs the repair pass through an [`EntryCreator`].
pub struct Repairer {
    creator: Arc<EntryCreator>,
}

impl Repairer {
    pub fn new(creator: Arc<EntryCreator>) -> Self {
        Self { creator }
    }

    /// Repair every note directly inside the configured folder.
    ///
    /// Per-file failures are logged and counted; only failing to list the
    /// folder itself is returned as an error.
    #[instrument(skip(self, settings), fields(subsystem = "flows", op = "repair_all", folder = %settings.entry_folder))]
    pub async fn repair_all(&self, settings: &Settings) -> Result<RepairReport> {
        let vault = self.creator.vault();
        let folder = &settings.entry_folder;
        let mut report = RepairReport::default();

        if !vault.is_folder(&normalize_folder(folder)).await? {
            warn!("Entry folder does not exist");
            self.creator
                .notifier()
                .notify(&format!("Folder {} does not exist", folder), None);
            report.folder_missing = true;
            return Ok(report);
        }

        let entries = vault.list_folder(folder).await?;
        for entry in entries {
            if !entry.is_file() {
                continue;
            }
            if !entry.name().ends_with(&format!(".{}", defaults::NOTE_EXTENSION)) {
                debug!(note_path = %entry.path, "Skipping non-note file");
                continue;
            }

            report.scanned += 1;
            if let Err(e) = self.repair_note(settings, &entry, &mut report).await {
                error!(note_path = %entry.path, error = ?e, "Repair failed for note");
                report.errors += 1;
            }
        }

        info!(
            scanned = report.scanned,
            regenerated = report.regenerated,
            regeneration_failed = report.regeneration_failed,
            embeds_restored = report.embeds_restored,
            errors = report.errors,
            "Repair pass finished"
        );
        Ok(report)
    }

    async fn repair_note(
        &self,
        settings: &Settings,
        entry: &VaultEntry,
        report: &mut RepairReport,
    ) -> Result<()> {
        let text = self.creator.vault().read(&entry.path).await?;

        let Some(note) = parse_note(&text) else {
            debug!(note_path = %entry.path, "No front-matter, skipping");
            report.skipped += 1;
            return Ok(());
        };
        let Some(source_url) = note.source_url() else {
            debug!(note_path = %entry.path, "No Location link, skipping");
            report.skipped += 1;
            return Ok(());
        };

        match note.map_id() {
            None => self.regenerate(settings, entry, source_url, report).await,
            Some(map_id) if note.is_body_empty() => {
                let Some(coordinates) = coordinates_of(source_url) else {
                    warn!(note_path = %entry.path, url = %source_url, "No coordinates in source URL");
                    self.creator
                        .notifier()
                        .notify(&format!("No coordinates found in URL: {}", source_url), None);
                    report.embed_skipped += 1;
                    return Ok(());
                };

                let embed = render_embed(
                    &ProvisionedMap::new(map_id),
                    &coordinates,
                    self.creator.provisioner().urls(),
                );
                self.creator
                    .vault()
                    .modify(&entry.path, &note.with_appended_embed(&embed))
                    .await?;
                info!(note_path = %entry.path, map_id = %map_id, "Embed restored");
                report.embeds_restored += 1;
                Ok(())
            }
            Some(_) => Ok(()),
        }
    }

    async fn regenerate(
        &self,
        settings: &Settings,
        entry: &VaultEntry,
        source_url: &str,
        report: &mut RepairReport,
    ) -> Result<()> {
        let vault = self.creator.vault();
        let backup = join_path(
            &settings.entry_folder,
            &format!(
                "{}{}.{}",
                entry.stem(),
                defaults::BACKUP_SUFFIX,
                defaults::NOTE_EXTENSION
            ),
        );

        info!(note_path = %entry.path, backup = %backup, "Regenerating note without map id");
        vault.rename(&entry.path, &backup).await?;

        let outcome = self.creator.create_from_url(settings, source_url).await;
        if outcome.is_written() {
            match vault.delete(&backup).await {
                Ok(()) => {}
                Err(Error::NotFound(_)) => {
                    self.creator
                        .notifier()
                        .notify(&format!("File {} does not exist", backup), None);
                }
                Err(e) => return Err(e),
            }
            report.regenerated += 1;
        } else {
            warn!(note_path = %entry.path, outcome = ?outcome, "Regeneration failed, restoring backup");
            vault.rename(&backup, &entry.path).await?;
            report.regeneration_failed += 1;
        }
        Ok(())
    }
}
