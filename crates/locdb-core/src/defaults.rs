//! Centralized default constants for the location database.
//!
//! Crates reference these constants instead of defining their own literals,
//! so the persisted note format stays identical across writers and the
//! repair scan.

// =============================================================================
// URL FIELD FALLBACKS
// =============================================================================

/// Title used when the share URL has no `q` parameter.
pub const FALLBACK_TITLE: &str = "New Location";

/// Address used when the share URL has no `address` parameter.
pub const FALLBACK_ADDRESS: &str = "NO ADDRESS";

/// Coordinates used when the share URL has no `ll` parameter.
///
/// The misspelling is part of the persisted note format.
pub const FALLBACK_COORDINATES: &str = "NO COORDINIATES";

// =============================================================================
// MAPPING SERVICE
// =============================================================================

/// Default mapping service API endpoint.
pub const CARTES_API_URL: &str = "https://cartes.io/api";

/// Default host serving the embeddable map viewer.
pub const CARTES_EMBED_URL: &str = "https://app.cartes.io";

/// Privacy level for maps created by the plugin.
pub const MAP_PRIVACY: &str = "unlisted";

/// Value sent for `users_can_create_markers`.
pub const MAP_USERS_CAN_CREATE_MARKERS: &str = "yes";

/// Category name attached to the location marker.
pub const MARKER_CATEGORY: &str = "Marker";

/// Zoom level baked into image and embed URLs.
pub const MAP_ZOOM: u8 = 11;

/// Default HTTP timeout for mapping service calls, in seconds.
pub const HTTP_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// NOTES
// =============================================================================

/// Default entry folder (vault root).
pub const ENTRY_FOLDER: &str = "/";

/// Extension of managed notes.
pub const NOTE_EXTENSION: &str = "md";

/// Suffix appended to a note's file stem while it is being regenerated.
pub const BACKUP_SUFFIX: &str = " (old)";

/// Embed viewer height in pixels.
pub const EMBED_HEIGHT: u32 = 600;

// =============================================================================
// NOTICES
// =============================================================================

/// Display duration for the invalid URL notice, in milliseconds.
pub const INVALID_URL_NOTICE_MS: u64 = 3000;

/// Grace period for detached marker requests before the process exits.
pub const MARKER_DRAIN_TIMEOUT_SECS: u64 = 10;
