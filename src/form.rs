//! The edit buffer behind the add/edit expense form.

use crate::error::ValidationError;
use crate::model::{Draft, Expense, ExpenseId};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The editable fields of the expense form.
#[derive(
    Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Amount,
    Description,
}

serde_plain::derive_display_from_serialize!(Field);
serde_plain::derive_fromstr_from_deserialize!(Field);

/// Holds the values typed into the form for one expense that is being created or edited.
///
/// Nothing here is validated until [`FormController::submit`] is called, and the controller never
/// touches the store itself.
#[derive(Debug, Default, Clone, Eq, PartialEq, Serialize)]
pub struct FormController {
    #[serde(skip_serializing_if = "Option::is_none")]
    editing: Option<ExpenseId>,
    name: String,
    amount: String,
    description: String,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears the buffer for a new expense.
    pub fn begin_create(&mut self) {
        self.reset();
    }

    /// Fills the buffer from an existing expense. The expense's id is carried through to the
    /// draft produced by `submit`.
    pub fn begin_edit(&mut self, expense: &Expense) {
        debug!("Editing expense {}", expense.id());
        self.editing = Some(expense.id().clone());
        self.name = expense.name.clone();
        self.amount = expense.amount.clone();
        self.description = expense.description.clone();
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Name => self.name = value,
            Field::Amount => self.amount = value,
            Field::Description => self.description = value,
        }
    }

    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Amount => &self.amount,
            Field::Description => &self.description,
        }
    }

    /// Validates the buffer and, if it is complete, returns its contents as a `Draft` and clears
    /// the buffer.
    ///
    /// # Errors
    /// - `ValidationError::EmptyName` when the name is blank.
    /// - `ValidationError::EmptyAmount` when the amount is blank.
    ///
    /// On error the buffer is left exactly as it was.
    pub fn submit(&mut self) -> Result<Draft, ValidationError> {
        self.validate()?;
        let draft = Draft {
            id: self.editing.take(),
            name: std::mem::take(&mut self.name),
            amount: std::mem::take(&mut self.amount),
            description: std::mem::take(&mut self.description),
        };
        Ok(draft)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.amount.trim().is_empty() {
            return Err(ValidationError::EmptyAmount);
        }
        Ok(())
    }

    /// Blank values and no edit target.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// The id of the expense being edited, or `None` when creating.
    pub fn editing(&self) -> Option<&ExpenseId> {
        self.editing.as_ref()
    }

    pub fn title(&self) -> &'static str {
        if self.editing.is_some() {
            "Edit Expense"
        } else {
            "Add New Expense"
        }
    }

    pub fn submit_label(&self) -> &'static str {
        if self.editing.is_some() {
            "Update"
        } else {
            "Add"
        }
    }
}
