//! Tracks the expense shown in the detail view.

use crate::model::{Expense, ExpenseId};
use crate::store::{StoreEvent, StoreObserver};
use tracing::debug;

/// Holds a snapshot of the currently selected expense, if any, and keeps it in step with the
/// store by observing its events.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SelectionController {
    selected: Option<Expense>,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, expense: Expense) {
        self.selected = Some(expense);
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&Expense> {
        self.selected.as_ref()
    }

    pub fn is_selected(&self, id: &ExpenseId) -> bool {
        self.selected.as_ref().is_some_and(|e| e.id() == id)
    }

    /// Replaces the selection with `expense` if it is the same record.
    pub fn on_record_updated(&mut self, expense: &Expense) {
        if self.is_selected(expense.id()) {
            debug!("Refreshing selected expense {}", expense.id());
            self.selected = Some(expense.clone());
        }
    }

    /// Clears the selection if it is the record with `id`. Returns true if the selection was
    /// cleared, in which case any open detail view must be closed.
    pub fn on_record_deleted(&mut self, id: &ExpenseId) -> bool {
        if self.is_selected(id) {
            debug!("Selected expense {id} was deleted");
            self.selected = None;
            true
        } else {
            false
        }
    }
}

impl StoreObserver for SelectionController {
    fn on_store_event(&mut self, event: &StoreEvent) {
        match event {
            StoreEvent::Added(_) => {}
            StoreEvent::Updated(expense) => self.on_record_updated(expense),
            StoreEvent::Deleted(id) => {
                let _ = self.on_record_deleted(id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewExpense;
    use crate::store::ExpenseStore;

    fn two() -> (ExpenseStore, Expense, Expense) {
        let mut store = ExpenseStore::new();
        let (a, _) = store.add(NewExpense::new("A", "1", ""));
        let (b, _) = store.add(NewExpense::new("B", "2", ""));
        (store, a, b)
    }

    #[test]
    fn test_select_and_clear() {
        let (_, a, _) = two();
        let mut selection = SelectionController::new();
        assert!(selection.selected().is_none());
        selection.select(a.clone());
        assert_eq!(selection.selected(), Some(&a));
        selection.clear();
        assert!(selection.selected().is_none());
    }

    #[test]
    fn test_update_of_selected_refreshes() {
        let (mut store, a, _) = two();
        let mut selection = SelectionController::new();
        selection.select(a.clone());

        let mut edited = a.clone();
        edited.amount = "9".to_string();
        let (_, event) = store.update(edited.clone()).unwrap();
        selection.on_store_event(&event);

        assert_eq!(selection.selected(), Some(&edited));
    }

    #[test]
    fn test_update_of_other_is_ignored() {
        let (mut store, a, b) = two();
        let mut selection = SelectionController::new();
        selection.select(a.clone());

        let mut edited = b.clone();
        edited.name = "B2".to_string();
        let (_, event) = store.update(edited).unwrap();
        selection.on_store_event(&event);

        assert_eq!(selection.selected(), Some(&a));
    }

    #[test]
    fn test_delete_of_selected_clears() {
        let (mut store, a, _) = two();
        let mut selection = SelectionController::new();
        selection.select(a.clone());

        let (_, event) = store.delete(a.id()).unwrap();
        selection.on_store_event(&event);
        assert!(selection.selected().is_none());
    }

    #[test]
    fn test_delete_of_other_keeps_selection() {
        let (_, a, b) = two();
        let mut selection = SelectionController::new();
        selection.select(a.clone());
        assert!(!selection.on_record_deleted(b.id()));
        assert_eq!(selection.selected(), Some(&a));
        assert!(selection.on_record_deleted(a.id()));
    }
}
