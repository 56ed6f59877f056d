//! Command handlers for the ledger CLI.
//!
//! Each handler is one user event: it loads the ledger, dispatches an `Action` (or only reads),
//! recomputes what needs showing and returns an `Out`.

mod add;
mod backup;
mod delete;
mod edit;
mod init;
mod list;
mod report;
mod restore;

use serde::Serialize;
use std::fmt::Debug;
use tracing::{debug, info};

pub use add::add;
pub use backup::backup;
pub use delete::{ask, delete};
pub use edit::edit;
pub use init::init;
pub use list::list;
pub use report::report;
pub use restore::restore;

/// The output type for a command. This allows the command to return a consistent message,
/// optionally some text for stdout, and optionally structured data.
#[derive(Debug, Clone, Serialize)]
pub struct Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// A message that can be printed to the user regarding the outcome of the command execution.
    message: String,

    /// Text that is the actual output of the command, e.g. a rendered table.
    stdout: Option<String>,

    /// Any structured data that needs to be output from the call.
    structure: Option<T>,
}

impl<T, S> From<S> for Out<T>
where
    T: Debug + Clone + Serialize,
    S: Into<String>,
{
    fn from(value: S) -> Self {
        Out::new_message(value)
    }
}

impl<T> Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// Create a new `Out` object that has `Some(structure)`.
    pub fn new<S>(message: S, structure: T) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            stdout: None,
            structure: Some(structure),
        }
    }

    /// Create a new `Out` object that has `None` for `structure`.
    pub fn new_message<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            stdout: None,
            structure: None,
        }
    }

    /// Attach text to be written to stdout.
    pub fn with_stdout<S>(mut self, text: S) -> Self
    where
        S: Into<String>,
    {
        self.stdout = Some(text.into());
        self
    }

    /// Get the `message`.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the text destined for stdout.
    pub fn stdout(&self) -> Option<&str> {
        self.stdout.as_deref()
    }

    /// Get the structured data stored in `structure`.
    pub fn structure(&self) -> Option<&T> {
        self.structure.as_ref()
    }

    /// Print the stdout text (if any), the message to `info!` and the structured data (if it
    /// exists) as JSON to `debug!`.
    pub fn print(&self) {
        if let Some(text) = self.stdout() {
            print!("{text}");
            if !text.ends_with('\n') {
                println!();
            }
        }
        info!("{}", self.message);
        if let Some(structure) = self.structure() {
            if let Ok(json) = serde_json::to_string_pretty(structure) {
                debug!("Command output:\n\n{json}\n\n");
            }
        }
    }
}

/// `"{count} transaction"` or `"{count} transactions"`.
fn transactions(count: usize) -> String {
    format!(
        "{} transaction{}",
        count,
        if count == 1 { "" } else { "s" }
    )
}
