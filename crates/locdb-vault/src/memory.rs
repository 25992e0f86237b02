//! In-memory vault for tests.
//!
//! Holds files and folders in maps and records every mutating call, so
//! tests can assert on the exact sequence of renames and deletes.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use locdb_core::{normalize_folder, Error, Result, Vault, VaultEntry};

/// A mutating call recorded by [`MemoryVault`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VaultOp {
    Create(String),
    Modify(String),
    Rename { from: String, to: String },
    Delete(String),
}

#[derive(Debug, Default)]
struct State {
    files: BTreeMap<String, String>,
    folders: BTreeSet<String>,
    ops: Vec<VaultOp>,
}

/// Vault held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryVault {
    state: Arc<Mutex<State>>,
}

fn key(path: &str) -> String {
    path.trim_matches('/').to_string()
}

fn parent_of(path: &str) -> String {
    match path.rfind('/') {
        Some(idx) => path[..idx].to_string(),
        None => String::new(),
    }
}

impl MemoryVault {
    /// Create an empty vault containing only the root folder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a folder (and its ancestors).
    pub fn with_folder(self, path: &str) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            let mut current = normalize_folder(path);
            while !current.is_empty() {
                state.folders.insert(current.clone());
                current = parent_of(&current);
            }
        }
        self
    }

    /// Add a file without recording an operation.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .files
            .insert(key(path), content.to_string());
        self
    }

    /// Current content of a file, if present.
    pub fn file(&self, path: &str) -> Option<String> {
        self.state.lock().unwrap().files.get(&key(path)).cloned()
    }

    /// All file paths, sorted.
    pub fn file_paths(&self) -> Vec<String> {
        self.state.lock().unwrap().files.keys().cloned().collect()
    }

    /// Recorded mutating operations, in order.
    pub fn ops(&self) -> Vec<VaultOp> {
        self.state.lock().unwrap().ops.clone()
    }

    fn folder_exists(state: &State, folder: &str) -> bool {
        folder.is_empty() || state.folders.contains(folder)
    }
}

#[async_trait]
impl Vault for MemoryVault {
    async fn exists(&self, path: &str) -> Result<bool> {
        let state = self.state.lock().unwrap();
        let k = key(path);
        Ok(state.files.contains_key(&k) || Self::folder_exists(&state, &k))
    }

    async fn is_folder(&self, path: &str) -> Result<bool> {
        let state = self.state.lock().unwrap();
        Ok(Self::folder_exists(&state, &normalize_folder(path)))
    }

    async fn create(&self, path: &str, content: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        let k = key(path);
        if state.files.contains_key(&k) || state.folders.contains(&k) {
            return Err(Error::AlreadyExists(path.to_string()));
        }
        if !Self::folder_exists(&state, &parent_of(&k)) {
            return Err(Error::NotFound(path.to_string()));
        }
        state.files.insert(k.clone(), content.to_string());
        state.ops.push(VaultOp::Create(k));
        Ok(())
    }

    async fn read(&self, path: &str) -> Result<String> {
        self.state
            .lock()
            .unwrap()
            .files
            .get(&key(path))
            .cloned()
            .ok_or_else(|| Error::NotFound(path.to_string()))
    }

    async fn modify(&self, path: &str, content: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        let k = key(path);
        match state.files.get_mut(&k) {
            Some(existing) => *existing = content.to_string(),
            None => return Err(Error::NotFound(path.to_string())),
        }
        state.ops.push(VaultOp::Modify(k));
        Ok(())
    }

    async fn rename(&self, from: &str, to: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        let (from_key, to_key) = (key(from), key(to));
        if state.files.contains_key(&to_key) {
            return Err(Error::AlreadyExists(to.to_string()));
        }
        let content = state
            .files
            .remove(&from_key)
            .ok_or_else(|| Error::NotFound(from.to_string()))?;
        state.files.insert(to_key.clone(), content);
        state.ops.push(VaultOp::Rename {
            from: from_key,
            to: to_key,
        });
        Ok(())
    }

    async fn delete(&self, path: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        let k = key(path);
        if state.files.remove(&k).is_none() {
            return Err(Error::NotFound(path.to_string()));
        }
        state.ops.push(VaultOp::Delete(k));
        Ok(())
    }

    async fn list_folder(&self, path: &str) -> Result<Vec<VaultEntry>> {
        let state = self.state.lock().unwrap();
        let folder = normalize_folder(path);
        if !Self::folder_exists(&state, &folder) {
            return Err(Error::NotFound(path.to_string()));
        }
        let mut entries: Vec<VaultEntry> = state
            .files
            .keys()
            .filter(|f| parent_of(f) == folder)
            .map(VaultEntry::file)
            .chain(
                state
                    .folders
                    .iter()
                    .filter(|d| parent_of(d) == folder)
                    .map(VaultEntry::folder),
            )
            .collect();
        entries.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(entries)
    }
}
