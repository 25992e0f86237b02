//! # locdb-flows
//!
//! User-triggered flows of the location database.
//!
//! - [`EntryCreator`]: share URL → map on the mapping service → location note
//! - [`Repairer`]: scan the entry folder and fix notes missing a map id or
//!   their embed body
//! - [`NoteWriter`]: folder/duplicate checks and the create-or-overwrite write
//! - [`PendingMarkers`]: detached marker requests, drained by the host at exit
//!
//! The flows only talk to the host through the traits in `locdb_core`.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use locdb_flows::{EntryCreator, Repairer};
//!
//! let creator = Arc::new(EntryCreator::new(vault, notifier, provisioner, prompt, clipboard));
//! let outcome = creator.create_from_clipboard(&settings).await;
//!
//! let report = Repairer::new(creator.clone()).repair_all(&settings).await?;
//! creator.pending_markers().drain(Duration::from_secs(10)).await;
//! ```

pub mod entry;
pub mod markers;
pub mod repair;
pub mod writer;

pub use entry::{EntryCreator, EntryOutcome};
pub use markers::PendingMarkers;
pub use repair::{RepairReport, Repairer};
pub use writer::{NoteWriter, WriteOutcome};
