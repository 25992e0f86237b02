//! cartes.io API request and response types.

use serde::{Deserialize, Serialize};

// =============================================================================
// MAP TYPES
// =============================================================================

/// Request body for `POST /maps`.
#[derive(Debug, Serialize)]
pub struct CreateMapRequest<'a> {
    pub title: &'a str,
    pub privacy: &'a str,
    pub users_can_create_markers: &'a str,
}

/// Response from `POST /maps`. Only the identifier is used.
#[derive(Debug, Deserialize)]
pub struct CreateMapResponse {
    pub uuid: String,
}

// =============================================================================
// MARKER TYPES
// =============================================================================

/// Request body for `POST /maps/{uuid}/markers`.
///
/// Non-finite coordinates serialise as JSON `null`.
#[derive(Debug, Serialize)]
pub struct CreateMarkerRequest<'a> {
    pub lat: f64,
    pub lng: f64,
    pub category_name: &'a str,
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Error body returned by the API on failure.
#[derive(Debug, Deserialize, Default)]
pub struct CartesErrorResponse {
    #[serde(default)]
    pub message: String,
}
