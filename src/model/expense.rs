use crate::model::Amount;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// The opaque identifier of an expense. It is assigned when the expense is added to the store and
/// never changes afterwards.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(String);

impl ExpenseId {
    /// Creates a new random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ExpenseId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ExpenseId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ExpenseId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for ExpenseId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The fields of an expense that has not been added to the store yet.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct NewExpense {
    pub name: String,
    pub amount: String,
    #[serde(default)]
    pub description: String,
}

impl NewExpense {
    pub fn new(
        name: impl Into<String>,
        amount: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            amount: amount.into(),
            description: description.into(),
        }
    }
}

/// A single expense record held by the `ExpenseStore`.
///
/// The `amount` is kept exactly as it was typed. Use [`Expense::amount_value`] when a number is
/// needed.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Expense {
    id: ExpenseId,
    pub name: String,
    pub amount: String,
    #[serde(default)]
    pub description: String,
    created_at: DateTime<Utc>,
}

impl Expense {
    pub(crate) fn create(id: ExpenseId, fields: NewExpense, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: fields.name,
            amount: fields.amount,
            description: fields.description,
            created_at,
        }
    }

    pub fn id(&self) -> &ExpenseId {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// The amount as a number. Text that does not parse counts as zero.
    pub fn amount_value(&self) -> Amount {
        Amount::lenient(&self.amount)
    }

    /// Returns a copy of this expense with the editable fields replaced by `fields`.
    pub fn with_fields(&self, fields: NewExpense) -> Self {
        Self::create(self.id.clone(), fields, self.created_at)
    }

    pub fn has_description(&self) -> bool {
        !self.description.trim().is_empty()
    }
}

/// The result of submitting the expense form.
///
/// A draft that carries an `id` was opened from an existing expense and should be routed to
/// `ExpenseStore::update`; one without an `id` should be routed to `ExpenseStore::add`.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Draft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<ExpenseId>,
    pub name: String,
    pub amount: String,
    pub description: String,
}

impl Draft {
    pub fn is_edit(&self) -> bool {
        self.id.is_some()
    }

    /// Splits the draft into its target id (if any) and its field values.
    pub fn into_parts(self) -> (Option<ExpenseId>, NewExpense) {
        (
            self.id,
            NewExpense {
                name: self.name,
                amount: self.amount,
                description: self.description,
            },
        )
    }
}
