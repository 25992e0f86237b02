//! Terminal implementations of the host capabilities.
//!
//! - [`StderrNotifier`]: notices printed to stderr and logged
//! - [`CommandClipboard`]: clipboard read through platform tools
//! - [`LinePrompt`]: one-line URL prompt over any async reader (stdin in the binary)

use std::time::Duration;

use async_trait::async_trait;
use locdb_core::{Clipboard, Error, Notifier, PromptOutcome, Result, UrlPrompt};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWriteExt, BufReader, Stdin};
use tokio::process::Command;
use tokio::sync::Mutex;
use tracing::debug;

// =============================================================================
// NOTICES
// =============================================================================

/// Prints each notice on its own line to stderr.
///
/// The log record is at debug level; the console layer also writes to
/// stderr, so an info record would show every notice twice.
#[derive(Debug, Default)]
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify(&self, message: &str, duration: Option<Duration>) {
        debug!(
            notice = %message,
            duration_ms = duration.map(|d| d.as_millis() as u64),
            "Notice"
        );
        eprintln!("{}", message);
    }
}

// =============================================================================
// CLIPBOARD
// =============================================================================

const CLIPBOARD_TIMEOUT_SECS: u64 = 5;

/// An external program that prints the clipboard text on stdout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl ClipboardCommand {
    pub fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }
}

/// Clipboard read by running the first available platform tool.
#[derive(Debug, Clone)]
pub struct CommandClipboard {
    commands: Vec<ClipboardCommand>,
    timeout: Duration,
}

impl CommandClipboard {
    pub fn new(commands: Vec<ClipboardCommand>) -> Self {
        Self {
            commands,
            timeout: Duration::from_secs(CLIPBOARD_TIMEOUT_SECS),
        }
    }

    /// Per-tool time limit; a tool that hangs counts as unavailable.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Wayland, X11 and macOS tools, tried in that order.
    pub fn system() -> Self {
        Self::new(vec![
            ClipboardCommand::new("wl-paste", &["--no-newline"]),
            ClipboardCommand::new("xclip", &["-selection", "clipboard", "-o"]),
            ClipboardCommand::new("pbpaste", &[]),
        ])
    }
}

#[async_trait]
impl Clipboard for CommandClipboard {
    async fn read_text(&self) -> Result<String> {
        let mut failures = Vec::new();
        for command in &self.commands {
            let run = Command::new(&command.program)
                .args(&command.args)
                .kill_on_drop(true)
                .output();
            let Ok(result) = tokio::time::timeout(self.timeout, run).await else {
                failures.push(format!(
                    "{} timed out after {}s",
                    command.program,
                    self.timeout.as_secs()
                ));
                continue;
            };
            match result {
                Ok(output) if output.status.success() => {
                    debug!(program = %command.program, bytes = output.stdout.len(), "Read clipboard");
                    return String::from_utf8(output.stdout).map_err(|e| {
                        Error::Clipboard(format!("{} returned non-UTF-8 text: {}", command.program, e))
                    });
                }
                Ok(output) => {
                    failures.push(format!("{} exited with {}", command.program, output.status))
                }
                Err(e) => failures.push(format!("{}: {}", command.program, e)),
            }
        }
        if failures.is_empty() {
            return Err(Error::Clipboard("no clipboard tool configured".to_string()));
        }
        Err(Error::Clipboard(failures.join("; ")))
    }
}

/// Clipboard that is always empty, so the flow goes straight to the prompt.
#[derive(Debug, Default)]
pub struct EmptyClipboard;

#[async_trait]
impl Clipboard for EmptyClipboard {
    async fn read_text(&self) -> Result<String> {
        Ok(String::new())
    }
}

// =============================================================================
// PROMPT
// =============================================================================

/// Reads one line per prompt. End of input or an empty line cancels.
pub struct LinePrompt<R> {
    reader: Mutex<R>,
    label: String,
}

/// Prompt reading from the process's stdin.
pub type StdinPrompt = LinePrompt<BufReader<Stdin>>;

impl StdinPrompt {
    pub fn stdin() -> Self {
        LinePrompt::new(BufReader::new(tokio::io::stdin()))
    }
}

impl<R> LinePrompt<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    pub fn new(reader: R) -> Self {
        Self {
            reader: Mutex::new(reader),
            label: "Maps URL: ".to_string(),
        }
    }
}

#[async_trait]
impl<R> UrlPrompt for LinePrompt<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    async fn prompt_url(&self) -> Result<PromptOutcome> {
        let mut stderr = tokio::io::stderr();
        stderr.write_all(self.label.as_bytes()).await?;
        stderr.flush().await?;

        let mut line = String::new();
        let read = self.reader.lock().await.read_line(&mut line).await?;
        let url = line.trim();
        if read == 0 || url.is_empty() {
            return Ok(PromptOutcome::Cancelled);
        }
        Ok(PromptOutcome::Submitted(url.to_string()))
    }
}
