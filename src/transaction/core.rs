//! Defines the core data model for transactions and the rules for creating them.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::{Error, category::Category};

// ============================================================================
// MODELS
// ============================================================================

/// Identifier for a transaction, derived from its creation time in Unix milliseconds.
pub type TransactionId = i64;

time::serde::format_description!(pub(crate) iso_date, Date, "[year]-[month]-[day]");

/// Whether money was earned or spent.
///
/// Also used to group categories, e.g. "Salary" is an income category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money earned.
    Income,
    /// Money spent.
    Expense,
}

impl TransactionKind {
    /// The lowercase name used in URLs, forms and persisted documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }

    /// The capitalized name shown to users.
    pub fn label(&self) -> &'static str {
        match self {
            TransactionKind::Income => "Income",
            TransactionKind::Expense => "Expense",
        }
    }
}

impl Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An income or expense, i.e. an event where money was either earned or spent.
///
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// Whether the transaction is an income or an expense.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// The amount of money earned or spent, always positive when created.
    pub amount: f64,
    /// The name of the category the transaction was filed under.
    ///
    /// This is not kept in sync with the category list, removing a category
    /// leaves the name on existing transactions.
    pub category: String,
    /// When the transaction happened.
    #[serde(with = "iso_date")]
    pub date: Date,
    /// Free text about the transaction, empty when none was given.
    #[serde(default)]
    pub notes: String,
    /// When the transaction was recorded.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(
        kind: TransactionKind,
        amount: f64,
        category: &str,
        date: Date,
    ) -> TransactionBuilder {
        TransactionBuilder {
            kind,
            amount,
            category: category.to_owned(),
            date,
            notes: String::new(),
        }
    }
}

/// A builder for creating [Transaction] instances.
///
/// The builder holds everything the user enters. The ID and creation time are
/// added by [TransactionBuilder::finalize] once the builder has passed
/// [TransactionBuilder::validate].
#[derive(Debug, PartialEq, Clone)]
pub struct TransactionBuilder {
    /// Whether the transaction is an income or an expense.
    pub kind: TransactionKind,
    /// The amount of money, must be greater than zero.
    pub amount: f64,
    /// The category name, must match a category of the same kind.
    pub category: String,
    /// When the transaction happened.
    pub date: Date,
    /// Free text about the transaction.
    pub notes: String,
}

impl TransactionBuilder {
    /// Set the notes for the transaction.
    pub fn notes(mut self, notes: &str) -> Self {
        self.notes = notes.to_owned();
        self
    }

    /// Check the transaction against the known `categories`.
    ///
    /// # Errors
    /// Returns:
    /// - [Error::NonPositiveAmount] if the amount is zero, negative, NaN or infinite,
    /// - [Error::InvalidCategory] if no category in `categories` has the same
    ///   name and kind.
    pub fn validate(&self, categories: &[Category]) -> Result<(), Error> {
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(Error::NonPositiveAmount(self.amount));
        }

        let category_exists = categories.iter().any(|category| {
            category.kind == self.kind && category.name.as_ref() == self.category
        });

        if !category_exists {
            return Err(Error::InvalidCategory(self.category.clone(), self.kind));
        }

        Ok(())
    }

    /// Create the transaction with its ID and creation time.
    pub fn finalize(self, id: TransactionId, created_at: OffsetDateTime) -> Transaction {
        Transaction {
            id,
            kind: self.kind,
            amount: self.amount,
            category: self.category,
            date: self.date,
            notes: self.notes,
            created_at,
        }
    }
}
