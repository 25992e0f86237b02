//! Integration tests for the new-entry flow.
//!
//! Covers URL resolution (clipboard, prompt, cancel), extraction fallbacks,
//! provisioning failures and the note writer's folder/duplicate policy.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::*;
use locdb_cartes::mock::{MockCall, MockProvisioner};
use locdb_core::{PromptOutcome, Vault};
use locdb_flows::EntryOutcome;
use locdb_vault::{MemoryVault, VaultOp};

fn clipboard(text: &str) -> Arc<FixedClipboard> {
    Arc::new(FixedClipboard(text.to_string()))
}

// ============================================================================
// HAPPY PATH
// ============================================================================

#[tokio::test]
async fn test_cafe_end_to_end_from_clipboard() {
    let vault = MemoryVault::new().with_folder("locations");
    let provisioner = MockProvisioner::new().with_map_id("map-cafe");
    let h = harness(
        Arc::new(vault.clone()),
        provisioner.clone(),
        clipboard(CAFE_URL),
        ScriptedPrompt::default(),
    );

    let outcome = h.creator.create_from_clipboard(&settings("/locations")).await;
    assert_eq!(outcome, EntryOutcome::Created("locations/Cafe.md".to_string()));
    assert_eq!(h.prompt.calls(), 0);

    let note = vault.file("locations/Cafe.md").expect("note written");
    assert!(note.contains("title: Cafe\n"));
    assert!(note.contains("address: 123 Main St\n"));
    assert!(note.contains("coordinates: 40.7128,-74.0060\n"));
    assert!(note.contains(
        "image: https://cartes.io/api/maps/map-cafe/images/static?zoom=11\n"
    ));
    assert!(note.contains(&format!("Location: \"[Cafe]({})\"", CAFE_URL)));
    assert!(note.contains(
        "src=\"https://app.cartes.io/maps/map-cafe/embed?type=map&lat=40.7128&lng=-74.0060&zoom=11\""
    ));
    assert_eq!(
        h.notifier.messages(),
        vec!["New location entry created: Cafe.md"]
    );

    // Marker placement is detached from the flow; wait for it explicitly.
    h.creator
        .pending_markers()
        .drain(Duration::from_secs(5))
        .await;
    assert_eq!(
        provisioner.get_calls(),
        vec![
            MockCall::CreateMap {
                title: "Cafe".to_string()
            },
            MockCall::CreateMarker {
                map_id: "map-cafe".to_string(),
                lat: 40.7128,
                lng: -74.006,
            },
        ]
    );
}

#[tokio::test]
async fn test_clipboard_without_url_falls_back_to_prompt() {
    let vault = MemoryVault::new().with_folder("locations");
    let provisioner = MockProvisioner::new().with_map_id("m");
    let h = harness(
        Arc::new(vault.clone()),
        provisioner.clone(),
        clipboard("grocery list"),
        ScriptedPrompt::submitting(CAFE_URL),
    );

    let outcome = h.creator.create_from_clipboard(&settings("locations")).await;
    assert!(outcome.is_written());
    assert_eq!(h.prompt.calls(), 1);
    assert!(vault.file("locations/Cafe.md").is_some());
}

#[tokio::test]
async fn test_clipboard_url_is_trimmed() {
    let vault = MemoryVault::new();
    let h = harness(
        Arc::new(vault.clone()),
        MockProvisioner::new(),
        clipboard(&format!("  {}\n", CAFE_URL)),
        ScriptedPrompt::default(),
    );

    let outcome = h.creator.create_from_clipboard(&settings("/")).await;
    assert_eq!(outcome, EntryOutcome::Created("Cafe.md".to_string()));
    assert_eq!(h.prompt.calls(), 0);
}

#[tokio::test]
async fn test_missing_parameters_use_fallbacks() {
    let vault = MemoryVault::new();
    let provisioner = MockProvisioner::new().with_map_id("m");
    let h = harness(
        Arc::new(vault.clone()),
        provisioner.clone(),
        clipboard("https://maps.apple.com/?q="),
        ScriptedPrompt::default(),
    );

    let outcome = h.creator.create_from_clipboard(&settings("/")).await;
    assert_eq!(outcome, EntryOutcome::Created("New Location.md".to_string()));

    let note = vault.file("New Location.md").unwrap();
    assert!(note.contains("address: NO ADDRESS\n"));
    assert!(note.contains("coordinates: NO COORDINIATES\n"));

    h.creator
        .pending_markers()
        .drain(Duration::from_secs(5))
        .await;
    match provisioner.get_calls().last() {
        Some(MockCall::CreateMarker { lat, lng, .. }) => {
            assert!(lat.is_nan());
            assert!(lng.is_nan());
        }
        other => panic!("expected marker call, got {:?}", other),
    }
}

// ============================================================================
// ABORTS BEFORE ANY SIDE EFFECT
// ============================================================================

#[tokio::test]
async fn test_prompt_cancel_is_silent() {
    let vault = MemoryVault::new().with_folder("locations");
    let provisioner = MockProvisioner::new();
    let h = harness(
        Arc::new(vault.clone()),
        provisioner.clone(),
        clipboard(""),
        ScriptedPrompt::cancelling(),
    );

    let outcome = h.creator.create_from_clipboard(&settings("locations")).await;
    assert_eq!(outcome, EntryOutcome::Cancelled);
    assert!(h.notifier.messages().is_empty());
    assert!(provisioner.get_calls().is_empty());
    assert!(vault.ops().is_empty());
}

#[tokio::test]
async fn test_prompt_invalid_url_notifies_for_three_seconds() {
    let vault = MemoryVault::new().with_folder("locations");
    let provisioner = MockProvisioner::new();
    let h = harness(
        Arc::new(vault.clone()),
        provisioner.clone(),
        clipboard("nothing useful"),
        ScriptedPrompt::submitting("https://maps.google.com/?q=Cafe"),
    );

    let outcome = h.creator.create_from_clipboard(&settings("locations")).await;
    assert_eq!(outcome, EntryOutcome::InvalidUrl);
    assert_eq!(
        h.notifier.all(),
        vec![(
            "Invalid maps URL".to_string(),
            Some(Duration::from_millis(3000))
        )]
    );
    assert!(provisioner.get_calls().is_empty());
    assert!(vault.ops().is_empty());
}

#[tokio::test]
async fn test_clipboard_failure_aborts_without_notice() {
    let vault = MemoryVault::new();
    let provisioner = MockProvisioner::new();
    let h = harness(
        Arc::new(vault.clone()),
        provisioner.clone(),
        Arc::new(FailingClipboard),
        ScriptedPrompt::submitting(CAFE_URL),
    );

    let outcome = h.creator.create_from_clipboard(&settings("/")).await;
    assert_eq!(outcome, EntryOutcome::ClipboardUnavailable);
    assert_eq!(h.prompt.calls(), 0);
    assert!(h.notifier.messages().is_empty());
    assert!(provisioner.get_calls().is_empty());
}

#[tokio::test]
async fn test_explicit_url_is_validated() {
    let vault = MemoryVault::new();
    let provisioner = MockProvisioner::new();
    let h = harness(
        Arc::new(vault.clone()),
        provisioner.clone(),
        clipboard(""),
        ScriptedPrompt::default(),
    );

    for bad in [
        "ftp://maps.apple.com/?q=Cafe",
        "https://maps.apple.com/?q=Cafe House",
        "https://evil.example/?q=maps.apple.com",
    ] {
        let outcome = h.creator.create_from_url(&settings("/"), bad).await;
        assert_eq!(outcome, EntryOutcome::InvalidUrl, "{}", bad);
    }
    assert!(provisioner.get_calls().is_empty());
    assert!(vault.ops().is_empty());
}

// ============================================================================
// PROVISIONING
// ============================================================================

#[tokio::test]
async fn test_map_failure_writes_nothing() {
    let vault = MemoryVault::new().with_folder("locations");
    let provisioner = MockProvisioner::new().failing_maps();
    let h = harness(
        Arc::new(vault.clone()),
        provisioner.clone(),
        clipboard(""),
        ScriptedPrompt::default(),
    );

    let outcome = h
        .creator
        .create_from_url(&settings("locations"), CAFE_URL)
        .await;
    assert_eq!(outcome, EntryOutcome::ProvisioningFailed("Cafe".to_string()));
    assert_eq!(
        h.notifier.messages(),
        vec!["Failed to create entry for Cafe. You may be rate limited, try again later"]
    );
    assert!(vault.ops().is_empty());
    assert!(h.creator.pending_markers().is_empty());
    assert_eq!(provisioner.marker_call_count(), 0);
}

#[tokio::test]
async fn test_marker_failure_still_writes_note() {
    let vault = MemoryVault::new().with_folder("locations");
    let provisioner = MockProvisioner::new().failing_markers();
    let h = harness(
        Arc::new(vault.clone()),
        provisioner.clone(),
        clipboard(""),
        ScriptedPrompt::default(),
    );

    let outcome = h
        .creator
        .create_from_url(&settings("locations"), CAFE_URL)
        .await;
    assert!(outcome.is_written());

    let abandoned = h
        .creator
        .pending_markers()
        .drain(Duration::from_secs(5))
        .await;
    assert_eq!(abandoned, 0);
    assert_eq!(provisioner.marker_call_count(), 1);
    assert!(vault.file("locations/Cafe.md").is_some());
}

// ============================================================================
// WRITE POLICY
// ============================================================================

#[tokio::test]
async fn test_existing_note_is_rejected() {
    let vault = MemoryVault::new()
        .with_folder("locations")
        .with_file("locations/Cafe.md", "my own notes");
    let provisioner = MockProvisioner::new();
    let h = harness(
        Arc::new(vault.clone()),
        provisioner.clone(),
        clipboard(""),
        ScriptedPrompt::default(),
    );

    let outcome = h
        .creator
        .create_from_url(&settings("/locations"), CAFE_URL)
        .await;
    assert_eq!(outcome, EntryOutcome::AlreadyExists("Cafe.md".to_string()));
    assert_eq!(vault.file("locations/Cafe.md").as_deref(), Some("my own notes"));
    assert_eq!(h.notifier.messages(), vec!["File Cafe.md already exists"]);
    assert!(vault.ops().is_empty());
}

#[tokio::test]
async fn test_missing_folder_after_map_creation() {
    let vault = MemoryVault::new();
    let provisioner = MockProvisioner::new();
    let h = harness(
        Arc::new(vault.clone()),
        provisioner.clone(),
        clipboard(""),
        ScriptedPrompt::default(),
    );

    let outcome = h
        .creator
        .create_from_url(&settings("/locations"), CAFE_URL)
        .await;
    assert_eq!(outcome, EntryOutcome::FolderMissing("/locations".to_string()));
    assert_eq!(h.notifier.messages(), vec!["Folder /locations does not exist"]);
    assert!(!vault.is_folder("locations").await.unwrap());
    assert!(vault.ops().is_empty());
    // The folder check runs after the map is created.
    assert_eq!(provisioner.map_call_count(), 1);
}

#[tokio::test]
async fn test_create_conflict_falls_back_to_overwrite() {
    let inner = MemoryVault::new()
        .with_folder("locations")
        .with_file("locations/Cafe.md", "stale");
    let h = harness(
        Arc::new(RacingVault(inner.clone())),
        MockProvisioner::new().with_map_id("fresh"),
        clipboard(""),
        ScriptedPrompt::default(),
    );

    let outcome = h
        .creator
        .create_from_url(&settings("locations"), CAFE_URL)
        .await;
    assert_eq!(outcome, EntryOutcome::Overwritten("locations/Cafe.md".to_string()));
    assert!(inner.file("locations/Cafe.md").unwrap().contains("/maps/fresh/"));
    assert_eq!(inner.ops(), vec![VaultOp::Modify("locations/Cafe.md".to_string())]);
    assert_eq!(
        h.notifier.messages(),
        vec!["New location entry created: Cafe.md"]
    );
}

#[tokio::test]
async fn test_write_error_is_reported() {
    let inner = MemoryVault::new().with_folder("locations");
    let h = harness(
        Arc::new(ReadOnlyVault(inner.clone())),
        MockProvisioner::new(),
        clipboard(""),
        ScriptedPrompt::default(),
    );

    let outcome = h
        .creator
        .create_from_url(&settings("locations"), CAFE_URL)
        .await;
    assert_eq!(outcome, EntryOutcome::WriteFailed("Cafe.md".to_string()));
    let messages = h.notifier.messages();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].starts_with("Failed to write entry Cafe.md"));
    assert!(inner.file_paths().is_empty());
}

#[tokio::test]
async fn test_second_entry_with_same_title_collides() {
    let vault = MemoryVault::new().with_folder("locations");
    let h = harness(
        Arc::new(vault.clone()),
        MockProvisioner::new(),
        clipboard(""),
        ScriptedPrompt::new([PromptOutcome::Cancelled]),
    );

    let first = h
        .creator
        .create_from_url(&settings("locations"), CAFE_URL)
        .await;
    let second = h
        .creator
        .create_from_url(
            &settings("locations"),
            "https://maps.apple.com/?q=Cafe&address=Elsewhere&ll=1,2",
        )
        .await;
    assert!(first.is_written());
    assert_eq!(second, EntryOutcome::AlreadyExists("Cafe.md".to_string()));
    assert!(vault
        .file("locations/Cafe.md")
        .unwrap()
        .contains("address: 123 Main St"));
}
