//! These structs provide the CLI interface for the expense CLI.

use crate::model::DEFAULT_CURRENCY_SYMBOL;
use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// expense: A small expense tracker.
///
/// Add, edit, view and delete expenses and keep an eye on the running total. Expenses are held in
/// memory for as long as the session runs; nothing is saved when it ends.
///
/// Use the shell subcommand for an interactive session in your terminal, or the mcp subcommand to
/// let an AI agent drive a session through the Model Context Protocol.
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
    /// Create the home directory and write the configuration file.
    Init(InitArgs),
    /// Start an interactive session on stdin and stdout. Type `help` for the list of commands.
    Shell(ShellArgs),
    /// Run an MCP server over stdio so that an AI agent can manage expenses.
    Mcp(McpArgs),
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

    /// The directory where the configuration is held. Defaults to ~/expense
    #[arg(long, env = "EXPENSE_HOME", default_value_t = default_expense_home())]
    expense_home: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, expense_home: PathBuf) -> Self {
        Self {
            log_level,
            expense_home: expense_home.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn expense_home(&self) -> &DisplayPath {
        &self.expense_home
    }
}

/// Args for the `expense init` command.
#[derive(Debug, Parser, Clone)]
pub struct InitArgs {
    /// The symbol written in front of amounts.
    #[arg(long, default_value = DEFAULT_CURRENCY_SYMBOL)]
    currency_symbol: String,

    /// Write amounts with commas as thousands separators.
    #[arg(long)]
    thousands_separators: bool,
}

impl InitArgs {
    pub fn new(currency_symbol: impl Into<String>, thousands_separators: bool) -> Self {
        Self {
            currency_symbol: currency_symbol.into(),
            thousands_separators,
        }
    }

    pub fn currency_symbol(&self) -> &str {
        &self.currency_symbol
    }

    pub fn thousands_separators(&self) -> bool {
        self.thousands_separators
    }
}

/// Args for the `expense shell` command.
#[derive(Debug, Parser, Clone, Default)]
pub struct ShellArgs {
    /// Do not print the prompt. Useful when piping a script of commands into the shell.
    #[arg(long)]
    quiet: bool,
}

impl ShellArgs {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    pub fn quiet(&self) -> bool {
        self.quiet
    }
}

/// Args for the `expense mcp` command.
#[derive(Debug, Parser, Clone, Default)]
pub struct McpArgs {}

fn default_expense_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("expense"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --expense-home or EXPENSE_HOME instead of relying on the \
                default home directory.",
            );
            PathBuf::from("expense")
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
    pub fn path(&self) -> &Path {
        &self.0
    }
}
