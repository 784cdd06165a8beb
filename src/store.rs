//! The in-memory expense collection.

use crate::error::ExpenseError;
use crate::model::{Amount, Expense, ExpenseId, NewExpense};
use chrono::Utc;
use tracing::debug;

/// A change that was made to the `ExpenseStore`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    Added(Expense),
    Updated(Expense),
    Deleted(ExpenseId),
}

/// Implemented by anything that keeps state derived from the store and needs to hear about
/// changes to it.
pub trait StoreObserver {
    fn on_store_event(&mut self, event: &StoreEvent);
}

/// Owns the authoritative, insertion-ordered list of expenses.
///
/// Mutations return the `StoreEvent` that describes them alongside their result so that the owner
/// can forward it to observers.
#[derive(Debug, Default, Clone)]
pub struct ExpenseStore {
    expenses: Vec<Expense>,
}

impl ExpenseStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns a fresh id to `fields` and appends the new expense.
    pub fn add(&mut self, fields: NewExpense) -> (Expense, StoreEvent) {
        let mut id = ExpenseId::generate();
        while self.position(&id).is_some() {
            id = ExpenseId::generate();
        }
        let expense = Expense::create(id, fields, Utc::now());
        debug!("Adding expense {}", expense.id());
        self.expenses.push(expense.clone());
        (expense.clone(), StoreEvent::Added(expense))
    }

    /// Replaces the expense that has the same id as `expense`, keeping its position and creation
    /// time.
    ///
    /// # Errors
    /// - `ExpenseError::NotFound` if no expense has that id. The store is left unchanged.
    pub fn update(&mut self, expense: Expense) -> Result<(Expense, StoreEvent), ExpenseError> {
        let ix = self
            .position(expense.id())
            .ok_or_else(|| ExpenseError::not_found(expense.id()))?;
        let existing = &mut self.expenses[ix];
        let updated = existing.with_fields(NewExpense::new(
            expense.name,
            expense.amount,
            expense.description,
        ));
        debug!("Updating expense {} at position {ix}", updated.id());
        *existing = updated.clone();
        Ok((updated.clone(), StoreEvent::Updated(updated)))
    }

    /// Removes the expense with `id`. Removing an id that is not present does nothing and returns
    /// `None`.
    pub fn delete(&mut self, id: &ExpenseId) -> Option<(Expense, StoreEvent)> {
        let ix = self.position(id)?;
        let removed = self.expenses.remove(ix);
        debug!("Deleted expense {id}");
        Some((removed, StoreEvent::Deleted(id.clone())))
    }

    /// The sum of every expense amount. Amounts that do not parse contribute zero.
    pub fn total(&self) -> Amount {
        self.expenses.iter().map(Expense::amount_value).sum()
    }

    pub fn get(&self, id: &ExpenseId) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id() == id)
    }

    /// The expenses in the order they were added.
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    fn position(&self, id: &ExpenseId) -> Option<usize> {
        self.expenses.iter().position(|e| e.id() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::collections::HashSet;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn add(store: &mut ExpenseStore, name: &str, amount: &str) -> Expense {
        store.add(NewExpense::new(name, amount, "")).0
    }

    #[test]
    fn test_add_assigns_unique_ids_and_appends() {
        let mut store = ExpenseStore::new();
        let mut ids = HashSet::new();
        for i in 0..50 {
            let e = add(&mut store, &format!("item {i}"), "1");
            assert!(ids.insert(e.id().clone()));
        }
        assert_eq!(store.len(), 50);
        assert_eq!(store.expenses()[0].name, "item 0");
        assert_eq!(store.expenses()[49].name, "item 49");
    }

    #[test]
    fn test_add_returns_added_event() {
        let mut store = ExpenseStore::new();
        let (expense, event) = store.add(NewExpense::new("Coffee", "3.50", "latte"));
        assert_eq!(event, StoreEvent::Added(expense.clone()));
        assert_eq!(store.get(expense.id()), Some(&expense));
    }

    #[test]
    fn test_update_preserves_position() {
        let mut store = ExpenseStore::new();
        let a = add(&mut store, "A", "1");
        let b = add(&mut store, "B", "2");
        let c = add(&mut store, "C", "3");

        let mut edited = b.clone();
        edited.name = "B2".to_string();
        edited.amount = "20".to_string();
        let (updated, event) = store.update(edited.clone()).unwrap();

        assert_eq!(updated, edited);
        assert_eq!(event, StoreEvent::Updated(edited.clone()));
        assert_eq!(store.expenses(), &[a, edited, c]);
    }

    #[test]
    fn test_update_keeps_created_at() {
        let mut store = ExpenseStore::new();
        let a = add(&mut store, "A", "1");
        let mut edited = a.clone();
        edited.amount = "5".to_string();
        let (updated, _) = store.update(edited).unwrap();
        assert_eq!(updated.created_at(), a.created_at());
    }

    #[test]
    fn test_update_missing_is_not_found() {
        let mut store = ExpenseStore::new();
        let a = add(&mut store, "A", "1");
        store.delete(a.id());

        let err = store.update(a.clone()).unwrap_err();
        assert_eq!(err, ExpenseError::NotFound { id: a.id().clone() });
        assert!(store.is_empty());
    }

    #[test]
    fn test_delete_is_idempotent() {
        let mut store = ExpenseStore::new();
        let a = add(&mut store, "A", "1");
        let b = add(&mut store, "B", "2");

        let (removed, event) = store.delete(a.id()).unwrap();
        assert_eq!(removed, a);
        assert_eq!(event, StoreEvent::Deleted(a.id().clone()));
        assert_eq!(store.expenses(), &[b.clone()]);

        assert!(store.delete(a.id()).is_none());
        assert_eq!(store.expenses(), &[b]);
    }

    #[test]
    fn test_total_empty_is_zero() {
        assert!(ExpenseStore::new().total().is_zero());
    }

    #[test]
    fn test_total_ignores_unparseable() {
        let mut store = ExpenseStore::new();
        add(&mut store, "A", "3.50");
        add(&mut store, "B", "not a number");
        add(&mut store, "C", "");
        add(&mut store, "D", "1,000");
        assert_eq!(store.total().value(), dec("1003.50"));
    }

    #[test]
    fn test_total_does_not_overflow() {
        let mut store = ExpenseStore::new();
        add(&mut store, "A", "79228162514264337593543950335");
        add(&mut store, "B", "1");
        assert_eq!(store.total().value(), Decimal::MAX);

        add(&mut store, "C", "1e40");
        add(&mut store, "D", "-5");
        assert_eq!(
            store.total().value(),
            dec("79228162514264337593543950330")
        );
    }

    #[test]
    fn test_coffee_and_lunch_scenario() {
        let mut store = ExpenseStore::new();
        let coffee = add(&mut store, "Coffee", "3.50");
        assert_eq!(store.len(), 1);
        assert_eq!(store.total().value(), dec("3.50"));

        let lunch = add(&mut store, "Lunch", "12");
        assert_eq!(store.total().value(), dec("15.50"));

        let mut cheaper = coffee.clone();
        cheaper.amount = "4.00".to_string();
        store.update(cheaper).unwrap();
        assert_eq!(store.total().value(), dec("16.00"));

        store.delete(lunch.id());
        assert_eq!(store.total().value(), dec("4.00"));
        assert_eq!(store.len(), 1);
        assert_eq!(store.expenses()[0].id(), coffee.id());
    }
}
