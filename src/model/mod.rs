//! Types that represent the core data model, such as `Expense` and `Amount`.
mod amount;
mod expense;

pub use amount::{Amount, AmountError, AmountFormat, DEFAULT_CURRENCY_SYMBOL};
pub use expense::{Draft, Expense, ExpenseId, NewExpense};
