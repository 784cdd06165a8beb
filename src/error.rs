//! Error types.
//!
//! Application plumbing (config files, the MCP transport, the shell's I/O) uses `anyhow` through
//! the crate-level [`Result`] alias. The expense core reports its recoverable conditions through
//! [`ExpenseError`] so that front ends can decide how to present them.

use crate::model::ExpenseId;
use crate::session::Screen;

pub type Error = anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// A required form field was left blank when the form was submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please enter an expense name")]
    EmptyName,
    #[error("Please enter an amount")]
    EmptyAmount,
}

/// Recoverable failures of the expense core. None of these are fatal; each one leaves the state
/// as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExpenseError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Expense not found: {id}")]
    NotFound { id: ExpenseId },

    #[error("Cannot {action} while the screen is {screen}")]
    InvalidState { action: &'static str, screen: Screen },
}

impl ExpenseError {
    pub(crate) fn not_found(id: &ExpenseId) -> Self {
        ExpenseError::NotFound { id: id.clone() }
    }

    /// True when the error came from form validation, i.e. the user should correct the input.
    pub fn is_validation(&self) -> bool {
        matches!(self, ExpenseError::Validation(_))
    }
}
