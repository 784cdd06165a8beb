//! An in-memory expense tracker: a list of named expenses with a running total, an add/edit form,
//! and a detail view, driven by a small screen state machine.
//!
//! The core types are [`store::ExpenseStore`], [`form::FormController`],
//! [`selection::SelectionController`] and [`session::Session`], which ties them together. The
//! `expense` binary puts an interactive shell and an MCP server in front of a `Session`.
//!
//! ```
//! use expense_tracker::model::NewExpense;
//! use expense_tracker::store::ExpenseStore;
//!
//! let mut store = ExpenseStore::new();
//! store.add(NewExpense::new("Coffee", "3.50", ""));
//! store.add(NewExpense::new("Lunch", "12", ""));
//! assert_eq!(store.total().to_string(), "15.50");
//! ```

pub mod args;
pub mod commands;
mod config;
mod error;
pub mod form;
mod mcp;
pub mod model;
pub mod selection;
pub mod session;
pub mod shell;
pub mod store;
mod utils;
pub mod view;

#[cfg(test)]
mod test;

pub use config::Config;
pub use error::{Error, ExpenseError, Result, ValidationError};
