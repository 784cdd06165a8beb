//! A line-oriented interactive front end.
//!
//! Each input line is one command. Errors are printed and the session carries on, so a mistyped
//! command or a failed validation never loses the expenses entered so far.

use crate::commands::{self, Out};
use crate::form::Field;
use crate::model::AmountFormat;
use crate::session::Session;
use crate::Result;
use anyhow::{bail, Context};
use serde::Serialize;
use std::fmt::Debug;
use std::str::FromStr;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, trace};

const PROMPT: &str = "expense> ";

const HELP: &str = "\
Commands:
  list                      show the expenses and the total
  total                     show the total
  add                       open the form for a new expense
  edit <n|id>               open the form for an existing expense
  set <field> <text>        set name, amount or description in the open form
  save                      add or update the expense in the open form
  cancel                    close the form without saving
  view <n|id>               show the details of an expense
  close                     close the detail view
  delete [<n|id>]           delete an expense, or the one being viewed
  show                      show whatever is on screen
  help                      show this message
  quit                      end the session (expenses are not saved)";

/// A parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    List,
    Total,
    Add,
    Edit(String),
    Set(Field, String),
    Save,
    Cancel,
    View(String),
    Close,
    Delete(Option<String>),
    Show,
    Help,
    Quit,
}

impl FromStr for ShellCommand {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let reference = |what: &str| -> Result<String> {
            if rest.is_empty() {
                bail!("'{word}' needs the number or id of the expense to {what}")
            }
            Ok(rest.to_string())
        };

        Ok(match word.to_lowercase().as_str() {
            "list" | "ls" => ShellCommand::List,
            "total" => ShellCommand::Total,
            "add" | "new" => ShellCommand::Add,
            "edit" => ShellCommand::Edit(reference("edit")?),
            "set" => {
                let (field, value) = match rest.split_once(char::is_whitespace) {
                    Some((field, value)) => (field, value.trim()),
                    None => (rest, ""),
                };
                let field = Field::from_str(field).map_err(|_| {
                    anyhow::anyhow!(
                        "Unknown field '{field}', expected name, amount or description"
                    )
                })?;
                ShellCommand::Set(field, value.to_string())
            }
            "save" | "submit" => ShellCommand::Save,
            "cancel" => ShellCommand::Cancel,
            "view" => ShellCommand::View(reference("view")?),
            "close" => ShellCommand::Close,
            "delete" | "rm" => ShellCommand::Delete((!rest.is_empty()).then(|| rest.to_string())),
            "show" | "state" => ShellCommand::Show,
            "help" | "?" => ShellCommand::Help,
            "quit" | "exit" => ShellCommand::Quit,
            other => bail!("Unknown command '{other}', type 'help' for the list of commands"),
        })
    }
}

/// Runs `command` against `session` and returns the text to show the user.
pub fn execute(session: &mut Session, format: &AmountFormat, command: ShellCommand) -> Result<String> {
    debug!("Shell command: {command:?}");
    Ok(match command {
        ShellCommand::List => message(commands::list_expenses(session, format)?),
        ShellCommand::Total => message(commands::total(session, format)?),
        ShellCommand::Add => message(commands::open_add_form(session)?),
        ShellCommand::Edit(reference) => message(commands::open_edit_form(session, &reference)?),
        ShellCommand::Set(field, value) => message(commands::set_field(session, field, value)?),
        ShellCommand::Save => message(commands::submit_form(session, format)?),
        ShellCommand::Cancel => message(commands::cancel_form(session)?),
        ShellCommand::View(reference) => {
            message(commands::view_expense(session, &reference, format)?)
        }
        ShellCommand::Close => message(commands::close_detail(session)?),
        ShellCommand::Delete(Some(reference)) => {
            message(commands::delete_expense(session, &reference, format)?)
        }
        ShellCommand::Delete(None) => message(commands::delete_selected(session, format)?),
        ShellCommand::Show => message(commands::state(session, format)?),
        ShellCommand::Help => HELP.to_string(),
        ShellCommand::Quit => String::new(),
    })
}

fn message<T>(out: Out<T>) -> String
where
    T: Serialize + Clone + Debug,
{
    out.message().to_string()
}

/// Reads commands from `input` until `quit` or end of input, writing responses to `output`.
pub async fn run<R, W>(
    session: &mut Session,
    format: &AmountFormat,
    input: R,
    mut output: W,
    quiet: bool,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    loop {
        if !quiet {
            output.write_all(PROMPT.as_bytes()).await?;
            output.flush().await?;
        }
        let Some(line) = lines.next_line().await.context("Unable to read input")? else {
            break;
        };
        trace!("{line:?}");
        if line.trim().is_empty() {
            continue;
        }

        let response = match ShellCommand::from_str(&line) {
            Ok(ShellCommand::Quit) => break,
            Ok(command) => match execute(session, format, command) {
                Ok(text) => text,
                Err(e) => format!("Error: {e}"),
            },
            Err(e) => format!("Error: {e}"),
        };
        output.write_all(response.as_bytes()).await?;
        output.write_all(b"\n").await?;
        output.flush().await?;
    }
    Ok(())
}
