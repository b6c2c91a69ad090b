//! Core category domain types.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Error, transaction::TransactionKind};

/// A validated, non-empty category name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct CategoryName(String);

impl CategoryName {
    /// Create a category name, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::EmptyCategoryName] if `name` is
    /// empty or only whitespace.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            Err(Error::EmptyCategoryName)
        } else {
            Ok(Self(name.to_string()))
        }
    }

    /// Create a category name without validation.
    ///
    /// The caller should ensure that the string is not empty.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for CategoryName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CategoryName::new(s)
    }
}

impl Display for CategoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier for a category.
///
/// Built-in categories use "1" to "13", user categories use their creation
/// time in Unix milliseconds.
pub type CategoryId = String;

/// A label for transactions of one kind, e.g. "Salary" for income or "Food" for expenses.
///
/// Names are not required to be unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct Category {
    /// The ID of the category.
    pub id: CategoryId,
    /// The name shown to users and stored on transactions.
    pub name: CategoryName,
    /// Which kind of transaction the category can be used for.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
}

impl Category {
    fn builtin(id: &str, name: &str, kind: TransactionKind) -> Self {
        Self {
            id: id.to_owned(),
            name: CategoryName::new_unchecked(name),
            kind,
        }
    }
}

/// The categories available before the user has changed anything.
pub fn default_categories() -> Vec<Category> {
    use TransactionKind::{Expense, Income};

    vec![
        Category::builtin("1", "Salary", Income),
        Category::builtin("2", "Freelance", Income),
        Category::builtin("3", "Investments", Income),
        Category::builtin("4", "Gifts", Income),
        Category::builtin("5", "Other Income", Income),
        Category::builtin("6", "Food", Expense),
        Category::builtin("7", "Housing", Expense),
        Category::builtin("8", "Transportation", Expense),
        Category::builtin("9", "Utilities", Expense),
        Category::builtin("10", "Entertainment", Expense),
        Category::builtin("11", "Healthcare", Expense),
        Category::builtin("12", "Shopping", Expense),
        Category::builtin("13", "Other Expense", Expense),
    ]
}

/// Form data for adding a category.
#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryFormData {
    pub name: String,
    pub kind: TransactionKind,
}
