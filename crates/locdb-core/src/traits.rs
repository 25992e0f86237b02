//! Core traits for host capabilities.
//!
//! These traits define the interfaces the flows call into, so the same
//! orchestration runs against a real vault directory, a terminal, and the
//! live mapping service, or against in-memory doubles in tests.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Coordinates, MapUrls, ProvisionedMap, VaultEntry};

// =============================================================================
// FILE STORAGE
// =============================================================================

/// Note storage addressed by vault-relative path strings.
#[async_trait]
pub trait Vault: Send + Sync {
    /// Check whether any entry (file or folder) exists at `path`.
    async fn exists(&self, path: &str) -> Result<bool>;

    /// Check whether `path` is an existing folder. `""` is the vault root.
    async fn is_folder(&self, path: &str) -> Result<bool>;

    /// Create a new file. Fails with `Error::AlreadyExists` if `path` is taken.
    async fn create(&self, path: &str, content: &str) -> Result<()>;

    /// Read a file's text.
    async fn read(&self, path: &str) -> Result<String>;

    /// Overwrite an existing file's text.
    async fn modify(&self, path: &str, content: &str) -> Result<()>;

    /// Move a file. Fails with `Error::AlreadyExists` if `to` is taken.
    async fn rename(&self, from: &str, to: &str) -> Result<()>;

    /// Delete a file.
    async fn delete(&self, path: &str) -> Result<()>;

    /// List the immediate children of a folder.
    async fn list_folder(&self, path: &str) -> Result<Vec<VaultEntry>>;
}

// =============================================================================
// USER INTERFACE
// =============================================================================

/// Transient user-visible status messages.
pub trait Notifier: Send + Sync {
    /// Show `message`, optionally for a specific duration.
    fn notify(&self, message: &str, duration: Option<Duration>);
}

/// Outcome of asking the user for a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptOutcome {
    Submitted(String),
    Cancelled,
}

/// Modal text prompt requesting a maps URL.
#[async_trait]
pub trait UrlPrompt: Send + Sync {
    async fn prompt_url(&self) -> Result<PromptOutcome>;
}

/// System clipboard text access.
#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn read_text(&self) -> Result<String>;
}

// =============================================================================
// MAPPING SERVICE
// =============================================================================

/// Client for the external mapping service.
#[async_trait]
pub trait MapProvisioner: Send + Sync {
    /// Create an unlisted map titled `title`.
    async fn create_map(&self, title: &str) -> Result<ProvisionedMap>;

    /// Place a marker on an existing map.
    async fn create_marker(&self, map_id: &str, coordinates: &Coordinates) -> Result<()>;

    /// Base URLs for templating image and embed links of created maps.
    fn urls(&self) -> &MapUrls;
}
