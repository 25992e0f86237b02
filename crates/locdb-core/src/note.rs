//! Location note rendering and parsing.
//!
//! A location note is a front-matter block followed by an embed body:
//!
//! ```text
//! ---
//! Location: "[Cafe](https://maps.apple.com/?q=Cafe&ll=40.7128,-74.0060)"
//! title: Cafe
//! address: 123 Main St
//! coordinates: 40.7128,-74.0060
//! image: https://cartes.io/api/maps/<id>/images/static?zoom=11
//! ---
//!
//! <iframe src="https://app.cartes.io/maps/<id>/embed?type=map&lat=40.7128&lng=-74.0060&zoom=11"
//! width="100%"
//! height="600"
//! frameborder="0"></iframe>
//! ```
//!
//! Parsing deliberately stays a narrow grammar over fixed delimiter lines and
//! fixed key names; it is not a YAML parser.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::defaults;
use crate::models::{Coordinates, LocationRequest, MapUrls, ProvisionedMap};

static FRONT_MATTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\A---\n(.*?)\n---\n").expect("front-matter pattern is valid"));

static LOCATION_LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"Location: "\[.*\]\((.*)\)""#).expect("location pattern is valid")
});

static IMAGE_MAP_ID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"image: \S*/maps/([^/\s]+)/images/static").expect("image pattern is valid")
});

// =============================================================================
// RENDERING
// =============================================================================

/// Render the front-matter block, delimiters included.
pub fn render_front_matter(req: &LocationRequest, map: &ProvisionedMap, urls: &MapUrls) -> String {
    format!(
        "---\nLocation: \"[{title}]({url})\"\ntitle: {title}\naddress: {address}\ncoordinates: {coords}\nimage: {image}\n---\n",
        title = req.title,
        url = req.source_url,
        address = req.address,
        coords = req.coordinates,
        image = map.image_url(&urls.api_base),
    )
}

/// Render the embedded map viewer tag.
pub fn render_embed(map: &ProvisionedMap, coordinates: &Coordinates, urls: &MapUrls) -> String {
    format!(
        "<iframe src=\"{src}\"\nwidth=\"100%\"\nheight=\"{height}\"\nframeborder=\"0\"></iframe>",
        src = map.embed_url(&urls.embed_base, coordinates),
        height = defaults::EMBED_HEIGHT,
    )
}

/// Render a complete note.
pub fn render_note(req: &LocationRequest, map: &ProvisionedMap, urls: &MapUrls) -> String {
    format!(
        "{}\n{}\n",
        render_front_matter(req, map, urls),
        render_embed(map, &req.coordinates, urls)
    )
}

// =============================================================================
// PARSING
// =============================================================================

/// A note split into its front-matter block and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedNote<'a> {
    /// The full delimited block, `---` lines included.
    pub block: &'a str,
    /// Text between the delimiter lines.
    pub front_matter: &'a str,
    /// Everything after the closing delimiter line.
    pub body: &'a str,
}

/// Split `text` into front-matter and body.
///
/// Returns `None` when the text does not open with a delimited block.
pub fn parse_note(text: &str) -> Option<ParsedNote<'_>> {
    let caps = FRONT_MATTER.captures(text)?;
    let block = caps.get(0)?;
    Some(ParsedNote {
        block: block.as_str(),
        front_matter: caps.get(1)?.as_str(),
        body: &text[block.end()..],
    })
}

impl<'a> ParsedNote<'a> {
    /// Original share URL from the `Location` markdown link.
    pub fn source_url(&self) -> Option<&'a str> {
        LOCATION_LINK
            .captures(self.front_matter)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
    }

    /// Map identifier embedded in the `image` URL.
    pub fn map_id(&self) -> Option<&'a str> {
        IMAGE_MAP_ID
            .captures(self.front_matter)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
    }

    /// Whether the body has no content besides whitespace.
    pub fn is_body_empty(&self) -> bool {
        self.body.trim().is_empty()
    }

    /// Rebuild the note with `embed` appended to the existing body.
    ///
    /// The front-matter block is kept byte-for-byte.
    pub fn with_appended_embed(&self, embed: &str) -> String {
        format!("{}{}{}", self.block, self.body, embed)
    }
}
