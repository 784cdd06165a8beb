//! Plain-text rendering of the expense screen.

use crate::form::{Field, FormController};
use crate::model::{Amount, AmountFormat, Expense};
use chrono::Local;
use std::fmt::Write;

const EMPTY_LIST: &str = "No expenses yet. Add one!";
const NO_DESCRIPTION: &str = "No description provided";
const DESCRIPTION_PREVIEW: usize = 40;

/// `Total: ₱15.50`
pub fn header(total: Amount, format: &AmountFormat) -> String {
    format!("Total: {}", total.display(format))
}

/// One numbered row per expense, with a truncated first line of the description underneath when
/// there is one.
pub fn list(expenses: &[Expense], format: &AmountFormat) -> String {
    if expenses.is_empty() {
        return EMPTY_LIST.to_string();
    }
    let mut out = String::new();
    for (ix, expense) in expenses.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>3}. {}  {}",
            ix + 1,
            expense.name,
            expense.amount_value().display(format)
        );
        if expense.has_description() {
            let _ = writeln!(out, "     {}", preview(&expense.description));
        }
    }
    out.trim_end().to_string()
}

pub fn detail(expense: &Expense, format: &AmountFormat) -> String {
    let description = if expense.has_description() {
        expense.description.as_str()
    } else {
        NO_DESCRIPTION
    };
    let added = expense.created_at().with_timezone(&Local);
    format!(
        "{}  {}\n\nDescription\n{}\n\nDate Added\n{}\n\nid: {}",
        expense.name,
        expense.amount_value().display(format),
        description,
        added.format("%Y-%m-%d at %H:%M:%S"),
        expense.id()
    )
}

pub fn form(form: &FormController) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", form.title());
    for (label, field) in [
        ("Name", Field::Name),
        ("Amount", Field::Amount),
        ("Description (optional)", Field::Description),
    ] {
        let _ = writeln!(out, "  {label}: {}", form.field(field));
    }
    let _ = write!(out, "[cancel] [{}]", form.submit_label().to_lowercase());
    out
}

fn preview(description: &str) -> String {
    let description = description.trim();
    let first = description.lines().next().unwrap_or_default().trim();
    if first.chars().count() > DESCRIPTION_PREVIEW || description.lines().count() > 1 {
        let cut: String = first.chars().take(DESCRIPTION_PREVIEW).collect();
        format!("{}…", cut.trim_end())
    } else {
        first.to_string()
    }
}
