//! Handlers for the expense screen. Each one performs a single user intent against a `Session`
//! and describes the outcome as an `Out`.

use crate::commands::Out;
use crate::form::{Field, FormController};
use crate::model::{Amount, AmountFormat, Expense, ExpenseId};
use crate::session::{Screen, Session};
use crate::{view, Result};
use serde::Serialize;
use tracing::debug;

/// A snapshot of the whole screen.
#[derive(Debug, Clone, Serialize)]
pub struct StateView {
    pub screen: Screen,
    pub total: Amount,
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form: Option<FormController>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<Expense>,
}

/// Turns `reference` into an expense id. A reference is either a 1-based position in the list or
/// an id.
pub fn resolve(session: &Session, reference: &str) -> ExpenseId {
    let reference = reference.trim();
    match reference.parse::<usize>() {
        Ok(n) if n >= 1 && n <= session.expenses().len() => {
            session.expenses()[n - 1].id().clone()
        }
        _ => ExpenseId::from(reference),
    }
}

/// Lists every expense under the running total.
pub fn list_expenses(session: &Session, format: &AmountFormat) -> Result<Out<Vec<Expense>>> {
    let message = format!(
        "{}\n\n{}",
        view::header(session.total(), format),
        view::list(session.expenses(), format)
    );
    Ok(Out::new(message, session.expenses().to_vec()))
}

pub fn total(session: &Session, format: &AmountFormat) -> Result<Out<Amount>> {
    let total = session.total();
    Ok(Out::new(view::header(total, format), total))
}

pub fn open_add_form(session: &mut Session) -> Result<Out<FormController>> {
    session.open_create()?;
    Ok(Out::new(view::form(session.form()), session.form().clone()))
}

pub fn open_edit_form(session: &mut Session, reference: &str) -> Result<Out<FormController>> {
    let id = resolve(session, reference);
    session.open_edit(&id)?;
    Ok(Out::new(view::form(session.form()), session.form().clone()))
}

pub fn set_field(
    session: &mut Session,
    field: Field,
    value: impl Into<String>,
) -> Result<Out<FormController>> {
    session.set_field(field, value)?;
    debug!("Form is now {:?}", session.form());
    Ok(Out::new(
        format!("Set {field} to '{}'", session.form().field(field)),
        session.form().clone(),
    ))
}

/// Submits the form, adding or updating an expense.
///
/// # Errors
/// - Returns the validation error if a required field is blank. The form stays open.
pub fn submit_form(session: &mut Session, format: &AmountFormat) -> Result<Out<Expense>> {
    let verb = if session.form().editing().is_some() {
        "Updated"
    } else {
        "Added"
    };
    let expense = session.submit_form()?;
    let message = format!(
        "{verb} expense '{}' ({}). {}",
        expense.name,
        expense.amount_value().display(format),
        view::header(session.total(), format)
    );
    Ok(Out::new(message, expense))
}

pub fn cancel_form(session: &mut Session) -> Result<Out<()>> {
    session.cancel_form()?;
    Ok("Form closed without saving".into())
}

pub fn view_expense(
    session: &mut Session,
    reference: &str,
    format: &AmountFormat,
) -> Result<Out<Expense>> {
    let id = resolve(session, reference);
    let expense = session.open_detail(&id)?;
    Ok(Out::new(view::detail(&expense, format), expense))
}

pub fn close_detail(session: &mut Session) -> Result<Out<()>> {
    session.close_detail()?;
    Ok("Detail view closed".into())
}

pub fn edit_from_detail(session: &mut Session) -> Result<Out<FormController>> {
    session.edit_from_detail()?;
    Ok(Out::new(view::form(session.form()), session.form().clone()))
}

/// Deletes an expense. Deleting an expense that does not exist is reported but is not an error.
pub fn delete_expense(
    session: &mut Session,
    reference: &str,
    format: &AmountFormat,
) -> Result<Out<Option<Expense>>> {
    let id = resolve(session, reference);
    let removed = session.delete(&id);
    let missing = format!("No expense with id '{id}', nothing was deleted");
    Ok(deleted(session, removed, missing, format))
}

/// Deletes the expense shown in the detail view.
pub fn delete_selected(session: &mut Session, format: &AmountFormat) -> Result<Out<Option<Expense>>> {
    let removed = session.delete_selected()?;
    let missing = "The selected expense no longer exists, nothing was deleted".to_string();
    Ok(deleted(session, removed, missing, format))
}

pub fn state(session: &Session, format: &AmountFormat) -> Result<Out<StateView>> {
    let screen = session.screen();
    let message = match screen {
        Screen::Idle => format!(
            "{}\n\n{}",
            view::header(session.total(), format),
            view::list(session.expenses(), format)
        ),
        Screen::Composing => view::form(session.form()),
        Screen::Viewing => match session.selection().selected() {
            Some(expense) => view::detail(expense, format),
            None => "Nothing is selected".to_string(),
        },
    };
    let structure = StateView {
        screen,
        total: session.total(),
        count: session.expenses().len(),
        form: (screen == Screen::Composing).then(|| session.form().clone()),
        selected: session.selection().selected().cloned(),
    };
    Ok(Out::new(message, structure))
}

fn deleted(
    session: &Session,
    removed: Option<Expense>,
    missing: String,
    format: &AmountFormat,
) -> Out<Option<Expense>> {
    let message = match &removed {
        Some(expense) => format!(
            "Deleted expense '{}'. {}",
            expense.name,
            view::header(session.total(), format)
        ),
        None => missing,
    };
    Out::new(message, removed)
}
