//! Filtering and sorting of the transaction list.

use std::{cmp::Ordering, collections::BTreeSet};

use serde::{Deserialize, Serialize};

use crate::transaction::{Transaction, TransactionKind};

/// Which kinds of transaction to show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeFilter {
    /// Show income and expenses.
    #[default]
    All,
    /// Show income only.
    Income,
    /// Show expenses only.
    Expense,
}

impl TypeFilter {
    fn matches(&self, kind: TransactionKind) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Income => kind == TransactionKind::Income,
            TypeFilter::Expense => kind == TransactionKind::Expense,
        }
    }

    /// The value used in query strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeFilter::All => "all",
            TypeFilter::Income => "income",
            TypeFilter::Expense => "expense",
        }
    }
}

/// The column the transaction list is sorted by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    /// The day the transaction happened.
    #[default]
    Date,
    /// Income or expense.
    Type,
    /// The category name.
    Category,
    /// The amount of money.
    Amount,
}

impl SortField {
    /// The value used in query strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Date => "date",
            SortField::Type => "type",
            SortField::Category => "category",
            SortField::Amount => "amount",
        }
    }
}

/// The order in which rows are sorted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smallest first.
    Asc,
    /// Largest first.
    #[default]
    Desc,
}

impl SortDirection {
    /// The opposite direction.
    pub fn reverse(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    /// The value used in query strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// The filter and sort criteria for the transaction list.
///
/// The default shows every transaction, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArrangeOptions {
    /// Which kinds of transaction to keep.
    pub type_filter: TypeFilter,
    /// Keep only transactions with this category name.
    pub category: Option<String>,
    /// The column to sort by.
    pub sort_field: SortField,
    /// The order to sort in.
    pub sort_direction: SortDirection,
}

impl ArrangeOptions {
    /// The sort that clicking the header for `field` should switch to.
    ///
    /// Clicking the current sort column flips the direction, clicking any
    /// other column sorts by it in ascending order.
    pub fn toggle_sort(&self, field: SortField) -> (SortField, SortDirection) {
        if field == self.sort_field {
            (field, self.sort_direction.reverse())
        } else {
            (field, SortDirection::Asc)
        }
    }

    fn keeps(&self, transaction: &Transaction) -> bool {
        self.type_filter.matches(transaction.kind)
            && self
                .category
                .as_deref()
                .is_none_or(|category| category.is_empty() || transaction.category == category)
    }

    fn compare(&self, a: &Transaction, b: &Transaction) -> Ordering {
        let ordering = match self.sort_field {
            SortField::Date => a.date.cmp(&b.date),
            SortField::Type => compare_text(a.kind.as_str(), b.kind.as_str()),
            SortField::Category => compare_text(&a.category, &b.category),
            SortField::Amount => a.amount.total_cmp(&b.amount),
        };

        match self.sort_direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// Case-insensitive ordering with a case-sensitive tie-break, so "apple" sorts
/// before "Banana" and "Food" and "food" still have a fixed order.
fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Filter and sort `transactions` for display.
///
/// The sort is stable, so transactions that compare equal keep the order they
/// have in `transactions`. The input is not changed.
pub fn arrange<'a>(
    transactions: &'a [Transaction],
    options: &ArrangeOptions,
) -> Vec<&'a Transaction> {
    let mut arranged = transactions
        .iter()
        .filter(|transaction| options.keeps(transaction))
        .collect::<Vec<_>>();

    arranged.sort_by(|a, b| options.compare(a, b));

    arranged
}

/// The category names used by `transactions`, sorted and without duplicates.
pub fn distinct_categories(transactions: &[Transaction]) -> Vec<&str> {
    transactions
        .iter()
        .map(|transaction| transaction.category.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
