//! Filesystem-backed vault.
//!
//! Maps vault-relative paths onto a directory tree:
//! `"locations/Cafe.md"` → `{root}/locations/Cafe.md`. Paths that try to
//! leave the root (`..`, absolute components) are rejected.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use locdb_core::{normalize_folder, Error, Result, Vault, VaultEntry};
use tokio::fs;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Vault stored as plain files under a root directory.
#[derive(Debug, Clone)]
pub struct FilesystemVault {
    root: PathBuf,
}

impl FilesystemVault {
    /// Create a vault rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Validate that the root exists and is a directory.
    pub async fn validate(&self) -> Result<()> {
        let meta = fs::metadata(&self.root)
            .await
            .map_err(|e| map_io(e, &self.root.display().to_string()))?;
        if !meta.is_dir() {
            return Err(Error::InvalidPath(format!(
                "{} is not a directory",
                self.root.display()
            )));
        }
        Ok(())
    }

    fn full_path(&self, path: &str) -> Result<PathBuf> {
        let relative = path.trim_matches('/');
        let mut full = self.root.clone();
        for component in Path::new(relative).components() {
            match component {
                Component::Normal(part) => full.push(part),
                Component::CurDir => {}
                _ => return Err(Error::InvalidPath(path.to_string())),
            }
        }
        Ok(full)
    }
}

/// Translate an I/O error into the vault's error vocabulary.
fn map_io(e: std::io::Error, path: &str) -> Error {
    match e.kind() {
        ErrorKind::NotFound => Error::NotFound(path.to_string()),
        ErrorKind::AlreadyExists => Error::AlreadyExists(path.to_string()),
        _ => Error::Io(e),
    }
}

/// Hidden sibling of `full` with no `.md` extension, unique per call.
fn temp_path_for(full: &Path) -> PathBuf {
    let name = full
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("note");
    let n = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    full.with_file_name(format!(".{}.{}-{}.tmp", name, std::process::id(), n))
}

/// Write all of `content` and wait until the writer has accepted it.
///
/// `tokio::fs::File` completes writes in the background; their errors
/// (disk full, file size limit) are only reported by `flush`.
async fn write_fully<W>(writer: &mut W, content: &[u8]) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    writer.write_all(content).await?;
    writer.flush().await
}

/// Write `content` to a new temp file next to `full`.
///
/// On any failure the temp file is removed and nothing else is touched.
async fn write_temp(full: &Path, content: &str) -> std::io::Result<PathBuf> {
    let temp = temp_path_for(full);
    let written = async {
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp)
            .await?;
        write_fully(&mut file, content.as_bytes()).await?;
        file.sync_all().await
    }
    .await;
    if let Err(e) = written {
        discard_temp(&temp).await;
        return Err(e);
    }
    Ok(temp)
}

async fn discard_temp(temp: &Path) {
    match fs::remove_file(temp).await {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => {
            warn!(temp_path = %temp.display(), error = %e, "vault: failed to remove temp file")
        }
    }
}

/// Move `temp` to `full` without replacing an existing file.
///
/// A hard link fails atomically when `full` exists. Filesystems without
/// hard links fall back to a checked rename.
async fn place_new(temp: &Path, full: &Path) -> std::io::Result<()> {
    match fs::hard_link(temp, full).await {
        Ok(()) => {
            discard_temp(temp).await;
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            discard_temp(temp).await;
            Err(e)
        }
        Err(e) => {
            debug!(error = %e, "vault: hard link unavailable, renaming");
            if fs::try_exists(full).await? {
                discard_temp(temp).await;
                return Err(ErrorKind::AlreadyExists.into());
            }
            let renamed = fs::rename(temp, full).await;
            if renamed.is_err() {
                discard_temp(temp).await;
            }
            renamed
        }
    }
}

#[async_trait]
impl Vault for FilesystemVault {
    async fn exists(&self, path: &str) -> Result<bool> {
        Ok(fs::try_exists(self.full_path(path)?).await?)
    }

    async fn is_folder(&self, path: &str) -> Result<bool> {
        match fs::metadata(self.full_path(path)?).await {
            Ok(meta) => Ok(meta.is_dir()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn create(&self, path: &str, content: &str) -> Result<()> {
        let full_path = self.full_path(path)?;
        debug!(note_path = %path, size = content.len(), "vault: create");

        let temp_path = write_temp(&full_path, content)
            .await
            .map_err(|e| map_io(e, path))?;
        place_new(&temp_path, &full_path)
            .await
            .map_err(|e| map_io(e, path))
    }

    async fn read(&self, path: &str) -> Result<String> {
        fs::read_to_string(self.full_path(path)?)
            .await
            .map_err(|e| map_io(e, path))
    }

    async fn modify(&self, path: &str, content: &str) -> Result<()> {
        let full_path = self.full_path(path)?;
        debug!(note_path = %path, size = content.len(), "vault: modify");

        if !fs::try_exists(&full_path).await? {
            return Err(Error::NotFound(path.to_string()));
        }

        // Atomic write: temp file + rename
        let temp_path = write_temp(&full_path, content).await.map_err(|e| {
            warn!(note_path = %path, error = %e, "vault: temp write failed");
            e
        })?;
        if let Err(e) = fs::rename(&temp_path, &full_path).await {
            warn!(from = %temp_path.display(), to = %full_path.display(), error = %e, "vault: rename failed");
            discard_temp(&temp_path).await;
            return Err(e.into());
        }
        Ok(())
    }

    async fn rename(&self, from: &str, to: &str) -> Result<()> {
        let from_path = self.full_path(from)?;
        let to_path = self.full_path(to)?;
        debug!(from = %from, to = %to, "vault: rename");

        if fs::try_exists(&to_path).await? {
            return Err(Error::AlreadyExists(to.to_string()));
        }
        fs::rename(&from_path, &to_path)
            .await
            .map_err(|e| map_io(e, from))
    }

    async fn delete(&self, path: &str) -> Result<()> {
        debug!(note_path = %path, "vault: delete");
        fs::remove_file(self.full_path(path)?)
            .await
            .map_err(|e| map_io(e, path))
    }

    async fn list_folder(&self, path: &str) -> Result<Vec<VaultEntry>> {
        let folder = normalize_folder(path);
        let mut dir = fs::read_dir(self.full_path(&folder)?)
            .await
            .map_err(|e| map_io(e, path))?;

        let mut entries = Vec::new();
        while let Some(entry) = dir.next_entry().await? {
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                warn!(path = %entry.path().display(), "vault: skipping non-UTF-8 file name");
                continue;
            };
            let child = if folder.is_empty() {
                name
            } else {
                format!("{}/{}", folder, name)
            };
            if entry.file_type().await?.is_dir() {
                entries.push(VaultEntry::folder(child));
            } else {
                entries.push(VaultEntry::file(child));
            }
        }
        entries.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(entries)
    }
}
