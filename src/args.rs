//! These structs provide the CLI interface for the ledger CLI.

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// ledger: A command-line tool for tracking investments and projecting net worth.
///
/// Record each investment with its type, amount, date and expected annual growth. The ledger
/// keeps them in order in a local data directory, shows them as a table, and reports your net
/// worth, a per-type breakdown, the amounts over time and a five year projection.
///
/// Use `backup` and `restore` to move the whole ledger in and out of a JSON file.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the data directory and initialize the configuration file.
    ///
    /// This is the first command you should run. By default the data directory is
    /// $HOME/ledger; pass --ledger-home or set LEDGER_HOME to put it somewhere else.
    Init(InitArgs),
    /// Record a new transaction at the end of the ledger.
    Add(AddArgs),
    /// Show all transactions as a table, followed by the net worth.
    List(ListArgs),
    /// Delete the transaction at the given position.
    Delete(DeleteArgs),
    /// Take the transaction at the given position out of the ledger for editing.
    ///
    /// The transaction is removed immediately and its values are printed along with the `add`
    /// command that re-enters them. Change what you need and run that command. If you never run
    /// it, the transaction stays deleted.
    Edit(EditArgs),
    /// Show net worth, the breakdown by type, amounts over time and the projection.
    Report(ReportArgs),
    /// Export the whole ledger to investments_backup.json.
    Backup(BackupArgs),
    /// Replace the whole ledger with the contents of a backup file.
    Restore(RestoreArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where ledger data and configuration is held. Defaults to ~/ledger
    #[arg(long, env = "LEDGER_HOME", default_value_t = default_ledger_home())]
    ledger_home: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, ledger_home: PathBuf) -> Self {
        Self {
            log_level,
            ledger_home: ledger_home.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn ledger_home(&self) -> &DisplayPath {
        &self.ledger_home
    }
}

/// How `list` and `report` print their results.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Aligned text for the terminal.
    #[default]
    Table,
    /// Pretty-printed JSON.
    Json,
}

serde_plain::derive_display_from_serialize!(OutputFormat);
serde_plain::derive_fromstr_from_deserialize!(OutputFormat);

/// Args for the `ledger init` command.
#[derive(Debug, Parser, Clone)]
pub struct InitArgs {
    /// The symbol shown in front of amounts. Defaults to ₹
    #[arg(long)]
    currency: Option<String>,
}

impl InitArgs {
    pub fn new(currency: Option<String>) -> Self {
        Self { currency }
    }

    pub fn currency(&self) -> Option<&str> {
        self.currency.as_deref()
    }
}

/// Args for the `ledger add` command. Values are stored exactly as given.
#[derive(Debug, Parser, Clone)]
pub struct AddArgs {
    /// The kind of investment, e.g. Stock, Mutual Fund, Gold.
    #[arg(long = "type", allow_hyphen_values = true)]
    kind: String,

    /// The amount invested. Use a negative amount for a withdrawal.
    #[arg(long, allow_hyphen_values = true)]
    amount: String,

    /// The date of the transaction, e.g. 2024-01-31.
    #[arg(long, allow_hyphen_values = true)]
    date: String,

    /// Expected annual growth in percent. When omitted, 5% is assumed for projections.
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    growth: String,
}

impl AddArgs {
    pub fn new(
        kind: impl Into<String>,
        amount: impl Into<String>,
        date: impl Into<String>,
        growth: impl Into<String>,
    ) -> Self {
        Self {
            kind: kind.into(),
            amount: amount.into(),
            date: date.into(),
            growth: growth.into(),
        }
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn growth(&self) -> &str {
        &self.growth
    }
}

/// Args for the `ledger list` command.
#[derive(Debug, Parser, Clone)]
pub struct ListArgs {
    /// Output format: table or json
    #[arg(long, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

impl ListArgs {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }
}

/// Args for the `ledger delete` command.
#[derive(Debug, Parser, Clone)]
pub struct DeleteArgs {
    /// The position of the transaction, as shown by `ledger list`.
    index: usize,

    /// Delete without asking for confirmation.
    #[arg(long, short = 'y')]
    yes: bool,
}

impl DeleteArgs {
    pub fn new(index: usize, yes: bool) -> Self {
        Self { index, yes }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn yes(&self) -> bool {
        self.yes
    }
}

/// Args for the `ledger edit` command.
#[derive(Debug, Parser, Clone)]
pub struct EditArgs {
    /// The position of the transaction, as shown by `ledger list`.
    index: usize,
}

impl EditArgs {
    pub fn new(index: usize) -> Self {
        Self { index }
    }

    pub fn index(&self) -> usize {
        self.index
    }
}

/// Args for the `ledger report` command.
#[derive(Debug, Parser, Clone)]
pub struct ReportArgs {
    /// Output format: table or json
    #[arg(long, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

impl ReportArgs {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }
}

/// Args for the `ledger backup` command.
#[derive(Debug, Parser, Clone)]
pub struct BackupArgs {
    /// The directory to write investments_backup.json into. Defaults to the current directory.
    #[arg(long)]
    out: Option<PathBuf>,
}

impl BackupArgs {
    pub fn new(out: Option<PathBuf>) -> Self {
        Self { out }
    }

    pub fn out(&self) -> Option<&Path> {
        self.out.as_deref()
    }
}

/// Args for the `ledger restore` command.
#[derive(Debug, Parser, Clone)]
pub struct RestoreArgs {
    /// The backup file to restore from.
    file: PathBuf,
}

impl RestoreArgs {
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self { file: file.into() }
    }

    pub fn file(&self) -> &Path {
        &self.file
    }
}

fn default_ledger_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("ledger"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --ledger-home or LEDGER_HOME instead of relying on the default \
                ledger home directory. If you continue using the program right now, you may have \
                problems!",
            );
            PathBuf::from("ledger")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn new(path: PathBuf) -> Self {
        Self(path)
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}
