//! Map-share URL recognition and field extraction.
//!
//! A share URL carries the location as query parameters:
//! `q` (title), `address`, and `ll` (`"<lat>,<lng>"`). Extraction is a pure
//! function of the input string.

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Url;

use crate::defaults;
use crate::error::{Error, Result};
use crate::models::{Coordinates, LocationRequest};

const MAPS_HOST: &str = "maps.apple.com";

static MAPS_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^https?://maps\.apple\.com(?:[/?#:]\S*)?$").expect("maps URL pattern is valid")
});

/// Check whether `text` is an accepted map-share URL.
///
/// The parsed host must be exactly the maps host, so look-alikes such as
/// `maps.apple.com.example` or userinfo tricks (`maps.apple.com@example`)
/// are rejected.
pub fn is_maps_url(text: &str) -> bool {
    MAPS_URL.is_match(text)
        && Url::parse(text)
            .ok()
            .is_some_and(|url| url.host_str() == Some(MAPS_HOST))
}

/// Extract location fields from a map-share URL.
///
/// Missing or empty parameters are replaced with the fallback literals in
/// [`defaults`].
pub fn extract(text: &str) -> Result<LocationRequest> {
    if !is_maps_url(text) {
        return Err(Error::InvalidUrl(text.to_string()));
    }
    let url = Url::parse(text).map_err(|e| Error::InvalidUrl(format!("{}: {}", text, e)))?;

    Ok(LocationRequest {
        title: query_param(&url, "q").unwrap_or_else(|| defaults::FALLBACK_TITLE.to_string()),
        address: query_param(&url, "address")
            .unwrap_or_else(|| defaults::FALLBACK_ADDRESS.to_string()),
        coordinates: Coordinates::new(
            query_param(&url, "ll").unwrap_or_else(|| defaults::FALLBACK_COORDINATES.to_string()),
        ),
        source_url: text.to_string(),
    })
}

/// Recover only the coordinate pair from a share URL, if it has one.
pub fn coordinates_of(text: &str) -> Option<Coordinates> {
    let url = Url::parse(text).ok()?;
    query_param(&url, "ll").map(Coordinates::new)
}

/// First non-empty value of `key`, form-decoded.
fn query_param(url: &Url, key: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, v)| k == key && !v.is_empty())
        .map(|(_, v)| v.into_owned())
}
