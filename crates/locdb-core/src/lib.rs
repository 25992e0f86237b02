//! # locdb-core
//!
//! Core types, traits, and note format for the location database.
//!
//! This crate provides the data model, the host capability traits the flows
//! run against, map-share URL extraction, and location note rendering and
//! parsing. Other locdb crates depend on it.

pub mod defaults;
pub mod error;
pub mod extract;
pub mod models;
pub mod note;
pub mod settings;
pub mod traits;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use extract::{coordinates_of, extract, is_maps_url};
pub use models::*;
pub use note::{parse_note, render_embed, render_front_matter, render_note, ParsedNote};
pub use settings::{Settings, SettingsStore};
pub use traits::*;
