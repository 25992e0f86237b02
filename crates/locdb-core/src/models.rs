//! Data model for location entries.

use serde::{Deserialize, Serialize};

use crate::defaults;

// =============================================================================
// LOCATION REQUEST
// =============================================================================

/// Coordinate pair as it appears in a share URL (`"<lat>,<lng>"`).
///
/// The raw text is kept verbatim because it is written back into notes
/// unchanged. Numeric access never fails: a missing or malformed half
/// parses as `NaN`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Coordinates(String);

impl Coordinates {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The raw `ll` text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Text before the first comma.
    pub fn lat_text(&self) -> &str {
        self.0.split(',').next().unwrap_or_default()
    }

    /// Text between the first and second comma, empty if absent.
    pub fn lng_text(&self) -> &str {
        self.0.split(',').nth(1).unwrap_or_default()
    }

    pub fn lat(&self) -> f64 {
        parse_degrees(self.lat_text())
    }

    pub fn lng(&self) -> f64 {
        parse_degrees(self.lng_text())
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

fn parse_degrees(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return f64::NAN;
    }
    trimmed.parse().unwrap_or(f64::NAN)
}

/// Fields extracted from a map-share URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRequest {
    pub title: String,
    pub address: String,
    pub coordinates: Coordinates,
    pub source_url: String,
}

impl LocationRequest {
    /// File name of the note for this request (`<title>.md`).
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.title, defaults::NOTE_EXTENSION)
    }
}

// =============================================================================
// PROVISIONED MAP
// =============================================================================

/// A map created on the mapping service for a single entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisionedMap {
    pub map_id: String,
}

impl ProvisionedMap {
    pub fn new(map_id: impl Into<String>) -> Self {
        Self {
            map_id: map_id.into(),
        }
    }

    /// Static image of the map, rooted at the service API base URL.
    pub fn image_url(&self, api_base: &str) -> String {
        format!(
            "{}/maps/{}/images/static?zoom={}",
            api_base.trim_end_matches('/'),
            self.map_id,
            defaults::MAP_ZOOM
        )
    }

    /// Embeddable viewer centred on the given coordinates.
    pub fn embed_url(&self, embed_base: &str, coordinates: &Coordinates) -> String {
        format!(
            "{}/maps/{}/embed?type=map&lat={}&lng={}&zoom={}",
            embed_base.trim_end_matches('/'),
            self.map_id,
            coordinates.lat_text(),
            coordinates.lng_text(),
            defaults::MAP_ZOOM
        )
    }
}

/// Base URLs used to template image and embed links into notes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapUrls {
    pub api_base: String,
    pub embed_base: String,
}

impl Default for MapUrls {
    fn default() -> Self {
        Self {
            api_base: defaults::CARTES_API_URL.to_string(),
            embed_base: defaults::CARTES_EMBED_URL.to_string(),
        }
    }
}

// =============================================================================
// VAULT ENTRIES
// =============================================================================

/// Kind of an entry listed in a vault folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Folder,
}

/// Immediate child of a vault folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultEntry {
    /// Vault-relative path.
    pub path: String,
    pub kind: EntryKind,
}

impl VaultEntry {
    pub fn file(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::File,
        }
    }

    pub fn folder(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::Folder,
        }
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    /// Last path segment.
    pub fn name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    /// File name without its final extension.
    pub fn stem(&self) -> &str {
        let name = self.name();
        match name.rfind('.') {
            Some(idx) if idx > 0 => &name[..idx],
            _ => name,
        }
    }
}

// =============================================================================
// VAULT PATHS
// =============================================================================

/// Normalise a folder setting to a vault-relative path.
///
/// `"/"`, `""` and `"."` all denote the vault root, returned as `""`.
pub fn normalize_folder(folder: &str) -> String {
    let trimmed = folder.trim().trim_matches('/');
    if trimmed == "." {
        String::new()
    } else {
        trimmed.to_string()
    }
}

/// Join a folder setting and a file name into a vault-relative path.
pub fn join_path(folder: &str, name: &str) -> String {
    let folder = normalize_folder(folder);
    if folder.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", folder, name)
    }
}
