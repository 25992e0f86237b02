//! Host doubles shared by the flow integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use locdb_cartes::mock::MockProvisioner;
use locdb_core::{
    Clipboard, Error, Notifier, PromptOutcome, Result, Settings, UrlPrompt, Vault, VaultEntry,
};
use locdb_flows::EntryCreator;
use locdb_vault::MemoryVault;

pub const CAFE_URL: &str = "https://maps.apple.com/?q=Cafe&address=123+Main+St&ll=40.7128,-74.0060";

// ============================================================================
// NOTIFIER
// ============================================================================

#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<(String, Option<Duration>)>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.notices
            .lock()
            .unwrap()
            .iter()
            .map(|(m, _)| m.clone())
            .collect()
    }

    pub fn all(&self) -> Vec<(String, Option<Duration>)> {
        self.notices.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str, duration: Option<Duration>) {
        self.notices
            .lock()
            .unwrap()
            .push((message.to_string(), duration));
    }
}

// ============================================================================
// CLIPBOARD / PROMPT
// ============================================================================

pub struct FixedClipboard(pub String);

#[async_trait]
impl Clipboard for FixedClipboard {
    async fn read_text(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}

pub struct FailingClipboard;

#[async_trait]
impl Clipboard for FailingClipboard {
    async fn read_text(&self) -> Result<String> {
        Err(Error::Clipboard("permission denied".to_string()))
    }
}

/// Prompt that replays a fixed script of outcomes and counts calls.
#[derive(Default)]
pub struct ScriptedPrompt {
    script: Mutex<VecDeque<PromptOutcome>>,
    calls: Mutex<usize>,
}

impl ScriptedPrompt {
    pub fn new(script: impl IntoIterator<Item = PromptOutcome>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            calls: Mutex::new(0),
        }
    }

    pub fn submitting(url: &str) -> Self {
        Self::new([PromptOutcome::Submitted(url.to_string())])
    }

    pub fn cancelling() -> Self {
        Self::new([PromptOutcome::Cancelled])
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl UrlPrompt for ScriptedPrompt {
    async fn prompt_url(&self) -> Result<PromptOutcome> {
        *self.calls.lock().unwrap() += 1;
        Ok(self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(PromptOutcome::Cancelled))
    }
}

// ============================================================================
// VAULT WRAPPERS
// ============================================================================

/// Vault whose existence check misses files, so a create can race an
/// existing file.
pub struct RacingVault(pub MemoryVault);

#[async_trait]
impl Vault for RacingVault {
    async fn exists(&self, _path: &str) -> Result<bool> {
        Ok(false)
    }
    async fn is_folder(&self, path: &str) -> Result<bool> {
        self.0.is_folder(path).await
    }
    async fn create(&self, path: &str, content: &str) -> Result<()> {
        self.0.create(path, content).await
    }
    async fn read(&self, path: &str) -> Result<String> {
        self.0.read(path).await
    }
    async fn modify(&self, path: &str, content: &str) -> Result<()> {
        self.0.modify(path, content).await
    }
    async fn rename(&self, from: &str, to: &str) -> Result<()> {
        self.0.rename(from, to).await
    }
    async fn delete(&self, path: &str) -> Result<()> {
        self.0.delete(path).await
    }
    async fn list_folder(&self, path: &str) -> Result<Vec<VaultEntry>> {
        self.0.list_folder(path).await
    }
}

/// Vault that refuses every create with an I/O error.
pub struct ReadOnlyVault(pub MemoryVault);

#[async_trait]
impl Vault for ReadOnlyVault {
    async fn exists(&self, path: &str) -> Result<bool> {
        self.0.exists(path).await
    }
    async fn is_folder(&self, path: &str) -> Result<bool> {
        self.0.is_folder(path).await
    }
    async fn create(&self, _path: &str, _content: &str) -> Result<()> {
        Err(Error::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "read-only vault",
        )))
    }
    async fn read(&self, path: &str) -> Result<String> {
        self.0.read(path).await
    }
    async fn modify(&self, path: &str, content: &str) -> Result<()> {
        self.0.modify(path, content).await
    }
    async fn rename(&self, from: &str, to: &str) -> Result<()> {
        self.0.rename(from, to).await
    }
    async fn delete(&self, path: &str) -> Result<()> {
        self.0.delete(path).await
    }
    async fn list_folder(&self, path: &str) -> Result<Vec<VaultEntry>> {
        self.0.list_folder(path).await
    }
}

// ============================================================================
// FIXTURE
// ============================================================================

pub struct Harness {
    pub creator: Arc<EntryCreator>,
    pub notifier: Arc<RecordingNotifier>,
    pub prompt: Arc<ScriptedPrompt>,
}

pub fn harness(
    vault: Arc<dyn Vault>,
    provisioner: MockProvisioner,
    clipboard: Arc<dyn Clipboard>,
    prompt: ScriptedPrompt,
) -> Harness {
    let notifier = Arc::new(RecordingNotifier::default());
    let prompt = Arc::new(prompt);
    let creator = Arc::new(EntryCreator::new(
        vault,
        notifier.clone(),
        Arc::new(provisioner),
        prompt.clone(),
        clipboard,
    ));
    Harness {
        creator,
        notifier,
        prompt,
    }
}

pub fn settings(folder: &str) -> Settings {
    Settings {
        entry_folder: folder.to_string(),
    }
}

/// A complete note for `title` pointing at map `map_id`.
pub fn healthy_note(title: &str, map_id: &str) -> String {
    format!(
        "---\nLocation: \"[{t}](https://maps.apple.com/?q={t}&ll=1.5,2.5)\"\ntitle: {t}\naddress: Somewhere\ncoordinates: 1.5,2.5\nimage: https://cartes.io/api/maps/{m}/images/static?zoom=11\n---\n\n<iframe src=\"https://app.cartes.io/maps/{m}/embed?type=map&lat=1.5&lng=2.5&zoom=11\"\nwidth=\"100%\"\nheight=\"600\"\nframeborder=\"0\"></iframe>\n",
        t = title,
        m = map_id
    )
}
