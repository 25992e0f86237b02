//! # locdb-vault
//!
//! Storage backends implementing [`locdb_core::Vault`].
//!
//! - [`FilesystemVault`]: notes as plain files under a vault directory
//! - [`MemoryVault`]: in-memory vault that records operations, for tests
//!
//! ## Example
//!
//! ```rust,no_run
//! use locdb_core::Vault;
//! use locdb_vault::FilesystemVault;
//!
//! # async fn run() -> locdb_core::Result<()> {
//! let vault = FilesystemVault::new("/home/me/notes");
//! vault.validate().await?;
//! if vault.is_folder("locations").await? {
//!     for entry in vault.list_folder("locations").await? {
//!         println!("{}", entry.path);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod filesystem;
pub mod memory;

pub use filesystem::FilesystemVault;
pub use memory::{MemoryVault, VaultOp};
