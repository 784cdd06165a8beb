//! A `Session` ties the store, the form and the selection together and models which part of the
//! screen is active.
//!
//! ```text
//!             open_create / open_edit
//!    Idle  ------------------------------>  Composing
//!     ^  <------------------------------      ^
//!     |        cancel_form / submit_form       |
//!     |                                        | edit_from_detail
//!     | open_detail / close_detail             |
//!     v                                        |
//!   Viewing -----------------------------------+
//! ```
//!
//! Deleting an expense is allowed from any state and always lands on `Idle`.

use crate::error::ExpenseError;
use crate::form::{Field, FormController};
use crate::model::{Amount, Expense, ExpenseId};
use crate::selection::SelectionController;
use crate::store::{ExpenseStore, StoreEvent, StoreObserver};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The three states of the expense screen.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    /// Only the list and total are showing.
    #[default]
    Idle,
    /// The add/edit form is open.
    Composing,
    /// The detail view of the selected expense is open.
    Viewing,
}

serde_plain::derive_display_from_serialize!(Screen);
serde_plain::derive_fromstr_from_deserialize!(Screen);

#[derive(Debug, Default, Clone)]
pub struct Session {
    store: ExpenseStore,
    form: FormController,
    selection: SelectionController,
    screen: Screen,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn store(&self) -> &ExpenseStore {
        &self.store
    }

    pub fn form(&self) -> &FormController {
        &self.form
    }

    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    pub fn expenses(&self) -> &[Expense] {
        self.store.expenses()
    }

    pub fn total(&self) -> Amount {
        self.store.total()
    }

    /// Opens a blank form.
    pub fn open_create(&mut self) -> Result<(), ExpenseError> {
        self.require(Screen::Idle, "open the add form")?;
        self.form.begin_create();
        self.transition(Screen::Composing);
        Ok(())
    }

    /// Opens the form populated from the expense with `id`.
    pub fn open_edit(&mut self, id: &ExpenseId) -> Result<Expense, ExpenseError> {
        self.require(Screen::Idle, "open the edit form")?;
        let expense = self.find(id)?;
        self.form.begin_edit(&expense);
        self.transition(Screen::Composing);
        Ok(expense)
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) -> Result<(), ExpenseError> {
        self.require(Screen::Composing, "edit a field")?;
        self.form.set_field(field, value);
        Ok(())
    }

    /// Validates the form and applies it to the store: an `add` for a new expense, an `update`
    /// for an edited one. The form closes on success.
    ///
    /// # Errors
    /// - `ExpenseError::Validation` if a required field is blank. The form stays open with its
    ///   contents intact.
    /// - `ExpenseError::NotFound` if the edited expense no longer exists. The form stays open.
    pub fn submit_form(&mut self) -> Result<Expense, ExpenseError> {
        self.require(Screen::Composing, "submit the form")?;
        let before = self.form.clone();
        let (id, fields) = self.form.submit()?.into_parts();

        let (expense, event) = match id {
            None => self.store.add(fields),
            Some(id) => {
                let current = match self.store.get(&id) {
                    Some(current) => current.with_fields(fields),
                    None => {
                        self.form = before;
                        return Err(ExpenseError::not_found(&id));
                    }
                };
                match self.store.update(current) {
                    Ok(updated) => updated,
                    Err(e) => {
                        self.form = before;
                        return Err(e);
                    }
                }
            }
        };
        self.publish(&event);
        self.transition(Screen::Idle);
        Ok(expense)
    }

    /// Closes the form without saving.
    pub fn cancel_form(&mut self) -> Result<(), ExpenseError> {
        self.require(Screen::Composing, "cancel the form")?;
        self.form.reset();
        self.transition(Screen::Idle);
        Ok(())
    }

    /// Shows the detail view of the expense with `id`.
    pub fn open_detail(&mut self, id: &ExpenseId) -> Result<Expense, ExpenseError> {
        self.require(Screen::Idle, "view an expense")?;
        let expense = self.find(id)?;
        self.selection.select(expense.clone());
        self.transition(Screen::Viewing);
        Ok(expense)
    }

    /// Closes the detail view. The selection is kept so that it can be edited from there.
    pub fn close_detail(&mut self) -> Result<(), ExpenseError> {
        self.require(Screen::Viewing, "close the detail view")?;
        self.transition(Screen::Idle);
        Ok(())
    }

    /// Closes the detail view and opens the form populated from the selected expense.
    pub fn edit_from_detail(&mut self) -> Result<Expense, ExpenseError> {
        self.require(Screen::Viewing, "edit from the detail view")?;
        let id = self.selected_id()?;
        self.transition(Screen::Idle);
        self.open_edit(&id)
    }

    /// Deletes the expense with `id` and returns to `Idle`. Deleting an expense that does not
    /// exist is not an error and leaves the screen as it was.
    pub fn delete(&mut self, id: &ExpenseId) -> Option<Expense> {
        let (removed, event) = self.store.delete(id)?;
        self.publish(&event);
        if self.screen != Screen::Idle {
            self.form.reset();
            self.transition(Screen::Idle);
        }
        Some(removed)
    }

    /// Deletes the expense shown in the detail view.
    pub fn delete_selected(&mut self) -> Result<Option<Expense>, ExpenseError> {
        self.require(Screen::Viewing, "delete from the detail view")?;
        let id = self.selected_id()?;
        Ok(self.delete(&id))
    }

    fn find(&self, id: &ExpenseId) -> Result<Expense, ExpenseError> {
        self.store
            .get(id)
            .cloned()
            .ok_or_else(|| ExpenseError::not_found(id))
    }

    fn selected_id(&self) -> Result<ExpenseId, ExpenseError> {
        self.selection
            .selected()
            .map(|e| e.id().clone())
            .ok_or(ExpenseError::InvalidState {
                action: "use the detail view without a selection",
                screen: self.screen,
            })
    }

    fn publish(&mut self, event: &StoreEvent) {
        debug!("Store event: {event:?}");
        self.selection.on_store_event(event);
    }

    fn require(&self, screen: Screen, action: &'static str) -> Result<(), ExpenseError> {
        if self.screen == screen {
            Ok(())
        } else {
            Err(ExpenseError::InvalidState {
                action,
                screen: self.screen,
            })
        }
    }

    fn transition(&mut self, to: Screen) {
        if self.screen != to {
            debug!("Screen {} -> {}", self.screen, to);
            self.screen = to;
        }
    }
}
