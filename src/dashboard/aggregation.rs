//! Totals and time-bucketed series for the dashboard.
//!
//! Everything here is a pure function of the transactions passed in, the
//! current date is always an argument so the results are reproducible.

use serde::{Deserialize, Serialize};
use time::{Date, Month};

use crate::transaction::{Transaction, TransactionKind};

/// The sums of all income and all expenses.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Totals {
    /// The sum of income amounts.
    pub income: f64,
    /// The sum of expense amounts.
    pub expense: f64,
    /// Income minus expenses.
    pub balance: f64,
}

impl Totals {
    fn add(&mut self, transaction: &Transaction) {
        match transaction.kind {
            TransactionKind::Income => self.income += transaction.amount,
            TransactionKind::Expense => self.expense += transaction.amount,
        }

        self.balance = self.income - self.expense;
    }
}

/// Sum the income and expenses in `transactions`.
pub fn totals<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> Totals {
    transactions
        .into_iter()
        .fold(Totals::default(), |mut totals, transaction| {
            totals.add(transaction);
            totals
        })
}

/// The width of each bucket in the chart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// One bucket per calendar month.
    #[default]
    Monthly,
    /// One bucket per calendar year.
    Yearly,
}

impl Granularity {
    /// The number of buckets the chart shows for this granularity.
    pub fn default_window(&self) -> usize {
        match self {
            Granularity::Monthly => 6,
            Granularity::Yearly => 3,
        }
    }

    /// The value used in query strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Monthly => "monthly",
            Granularity::Yearly => "yearly",
        }
    }
}

/// The totals for one month or year.
#[derive(Debug, Clone, PartialEq)]
pub struct Bucket {
    /// The month and year, e.g. "Jan 2024", or just the year, e.g. "2024".
    pub label: String,
    /// The sum of income in the period.
    pub income: f64,
    /// The sum of expenses in the period.
    pub expense: f64,
    /// Income minus expenses in the period.
    pub balance: f64,
}

/// A calendar period identified by a running count, months since year 0 for
/// [Granularity::Monthly] or the year itself for [Granularity::Yearly].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Period(i64);

impl Period {
    fn of(date: Date, granularity: Granularity) -> Self {
        match granularity {
            Granularity::Monthly => {
                Self(i64::from(date.year()) * 12 + i64::from(u8::from(date.month())) - 1)
            }
            Granularity::Yearly => Self(i64::from(date.year())),
        }
    }

    fn label(&self, granularity: Granularity) -> String {
        match granularity {
            Granularity::Monthly => {
                let year = self.0.div_euclid(12);
                let month = month_abbreviation(self.0.rem_euclid(12));
                format!("{month} {year}")
            }
            Granularity::Yearly => self.0.to_string(),
        }
    }
}

/// `index` is zero based, 0 is January.
fn month_abbreviation(index: i64) -> &'static str {
    let month = Month::January.nth_next(index as u8);

    match month {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    }
}

/// Split `transactions` into the `window` most recent months or years,
/// ending with the one containing `today`.
///
/// Buckets are ordered oldest first. Periods without transactions have zero
/// totals and transactions outside the window are ignored.
pub fn bucketize(
    transactions: &[Transaction],
    granularity: Granularity,
    window: usize,
    today: Date,
) -> Vec<Bucket> {
    let current = Period::of(today, granularity);
    let first = Period(current.0 - window as i64 + 1);

    let mut bucket_totals = vec![Totals::default(); window];

    for transaction in transactions {
        let period = Period::of(transaction.date, granularity);

        if period < first || period > current {
            continue;
        }

        bucket_totals[(period.0 - first.0) as usize].add(transaction);
    }

    bucket_totals
        .into_iter()
        .enumerate()
        .map(|(offset, totals)| Bucket {
            label: Period(first.0 + offset as i64).label(granularity),
            income: totals.income,
            expense: totals.expense,
            balance: totals.balance,
        })
        .collect()
}


#[cfg(test)]
mod bucketize_tests {
    use time::{
        Date,
        macros::{date, datetime},
    };

    use crate::transaction::{Transaction, TransactionKind};

    use super::{Bucket, Granularity, bucketize};

    fn transaction(kind: TransactionKind, amount: f64, date: Date) -> Transaction {
        Transaction::build(kind, amount, "Other", date).finalize(1, datetime!(2024-01-01 00:00 UTC))
    }

    fn labels(buckets: &[Bucket]) -> Vec<&str> {
        buckets.iter().map(|bucket| bucket.label.as_str()).collect()
    }

    #[test]
    fn monthly_window_without_transactions() {
        let buckets = bucketize(&[], Granularity::Monthly, 6, date!(2024 - 03 - 10));

        assert_eq!(
            labels(&buckets),
            vec!["Oct 2023", "Nov 2023", "Dec 2023", "Jan 2024", "Feb 2024", "Mar 2024"]
        );
        assert!(
            buckets
                .iter()
                .all(|bucket| bucket.income == 0.0 && bucket.expense == 0.0 && bucket.balance == 0.0)
        );
    }

    #[test]
    fn monthly_window_always_has_six_buckets_ending_this_month() {
        for today in [
            date!(2024 - 01 - 01),
            date!(2024 - 06 - 30),
            date!(2024 - 12 - 31),
            date!(2025 - 02 - 28),
        ] {
            let buckets = bucketize(&[], Granularity::Monthly, 6, today);

            assert_eq!(buckets.len(), 6);
            let want_last = format!(
                "{} {}",
                &today.month().to_string()[..3],
                today.year()
            );
            assert_eq!(buckets[5].label, want_last);
        }
    }

    #[test]
    fn monthly_buckets_sum_matching_transactions() {
        let transactions = [
            transaction(TransactionKind::Income, 5000.0, date!(2024 - 01 - 15)),
            transaction(TransactionKind::Expense, 1200.0, date!(2024 - 01 - 20)),
            transaction(TransactionKind::Expense, 30.0, date!(2024 - 03 - 01)),
        ];

        let buckets = bucketize(&transactions, Granularity::Monthly, 3, date!(2024 - 03 - 10));

        assert_eq!(
            buckets,
            vec![
                Bucket {
                    label: "Jan 2024".to_owned(),
                    income: 5000.0,
                    expense: 1200.0,
                    balance: 3800.0,
                },
                Bucket {
                    label: "Feb 2024".to_owned(),
                    income: 0.0,
                    expense: 0.0,
                    balance: 0.0,
                },
                Bucket {
                    label: "Mar 2024".to_owned(),
                    income: 0.0,
                    expense: 30.0,
                    balance: -30.0,
                },
            ]
        );
    }

    #[test]
    fn same_month_of_another_year_is_excluded() {
        let transactions = [transaction(
            TransactionKind::Income,
            100.0,
            date!(2023 - 03 - 15),
        )];

        let buckets = bucketize(&transactions, Granularity::Monthly, 6, date!(2024 - 03 - 10));

        assert!(buckets.iter().all(|bucket| bucket.income == 0.0));
    }

    #[test]
    fn future_transactions_are_excluded() {
        let transactions = [transaction(
            TransactionKind::Expense,
            100.0,
            date!(2024 - 04 - 01),
        )];

        let buckets = bucketize(&transactions, Granularity::Monthly, 6, date!(2024 - 03 - 10));

        assert!(buckets.iter().all(|bucket| bucket.expense == 0.0));
    }

    #[test]
    fn yearly_buckets_are_labelled_by_year() {
        let transactions = [
            transaction(TransactionKind::Income, 100.0, date!(2022 - 06 - 01)),
            transaction(TransactionKind::Expense, 40.0, date!(2024 - 01 - 20)),
            transaction(TransactionKind::Income, 999.0, date!(2021 - 12 - 31)),
        ];

        let buckets = bucketize(&transactions, Granularity::Yearly, 3, date!(2024 - 03 - 10));

        assert_eq!(labels(&buckets), vec!["2022", "2023", "2024"]);
        assert_eq!(buckets[0].income, 100.0);
        assert_eq!(buckets[1].balance, 0.0);
        assert_eq!(buckets[2].expense, 40.0);
        assert_eq!(buckets[2].balance, -40.0);
    }

    #[test]
    fn zero_window_gives_no_buckets() {
        let buckets = bucketize(&[], Granularity::Yearly, 0, date!(2024 - 03 - 10));

        assert!(buckets.is_empty());
    }
}
