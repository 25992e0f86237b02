//! # locdb-cli
//!
//! Terminal host for the location database: the `locdb` binary runs the
//! entry and repair flows over a vault directory, with notices on stderr,
//! the clipboard read through platform tools and the URL prompt on stdin.

pub mod app;
pub mod host;
pub mod logging;

pub use app::{drain_markers, App, Host};
pub use host::{ClipboardCommand, CommandClipboard, EmptyClipboard, LinePrompt, StderrNotifier, StdinPrompt};
