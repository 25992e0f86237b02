//! # locdb-cartes
//!
//! cartes.io mapping service client for the location database.
//!
//! This crate provides:
//! - [`CartesBackend`], the [`MapProvisioner`] used in production
//! - Request/response types for the two endpoints the plugin calls
//! - Status code classification (rate limiting is the expected failure)
//! - A recording mock provisioner (feature `mock`)
//!
//! # Feature Flags
//!
//! - `mock`: Enable [`mock::MockProvisioner`]
//! - `integration`: Enable tests against the live API
//!
//! # Example
//!
//! ```rust,no_run
//! use locdb_cartes::CartesBackend;
//! use locdb_core::{Coordinates, MapProvisioner};
//!
//! #[tokio::main]
//! async fn main() {
//!     let backend = CartesBackend::from_env().unwrap();
//!     let map = backend.create_map("Cafe").await.unwrap();
//!     backend
//!         .create_marker(&map.map_id, &Coordinates::new("40.7128,-74.0060"))
//!         .await
//!         .unwrap();
//! }
//! ```

mod backend;
mod error;
mod types;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use backend::{CartesBackend, CartesConfig};
pub use error::{to_locdb_error, CartesErrorCode};
pub use types::*;

// Re-export the trait implemented here
pub use locdb_core::MapProvisioner;
