//! Exports the transactions as a CSV file.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};

use crate::{Error, app_state::DatedLedgerState, timezone::local_today, transaction::Transaction};

const CSV_HEADER: &str = "Date,Type,Category,Amount,Notes";

/// Convert `transactions` to CSV text, one row per transaction in the given order.
///
/// Only the notes are quoted, with inner quotes doubled. Rows are separated by
/// `\n` and there is no trailing newline.
pub fn to_csv(transactions: &[Transaction]) -> String {
    let mut lines = Vec::with_capacity(transactions.len() + 1);
    lines.push(CSV_HEADER.to_owned());

    for transaction in transactions {
        lines.push(format!(
            "{},{},{},{},\"{}\"",
            transaction.date,
            transaction.kind,
            transaction.category,
            transaction.amount,
            transaction.notes.replace('"', "\"\"")
        ));
    }

    lines.join("\n")
}

/// A route handler that downloads every transaction as a CSV attachment.
///
/// # Errors
/// Returns [Error::NothingToExport] if there are no transactions.
pub async fn export_endpoint(State(state): State<DatedLedgerState>) -> Result<Response, Error> {
    let today = local_today(&state.local_timezone)?;

    let ledger = state
        .ledger
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire ledger lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    if ledger.transactions().is_empty() {
        tracing::debug!("Refusing to export an empty ledger");
        return Err(Error::NothingToExport);
    }

    let csv = to_csv(ledger.transactions());
    tracing::info!("Exporting {} transactions", ledger.transactions().len());

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_owned()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"finance_tracker_export_{today}.csv\""),
            ),
        ],
        csv,
    )
        .into_response())
}

#[cfg(test)]
mod to_csv_tests {
    use time::{
        Date,
        macros::{date, datetime},
    };

    use crate::transaction::{Transaction, TransactionKind};

    use super::to_csv;

    fn transaction(
        kind: TransactionKind,
        amount: f64,
        category: &str,
        date: Date,
        notes: &str,
    ) -> Transaction {
        Transaction::build(kind, amount, category, date)
            .notes(notes)
            .finalize(1, datetime!(2024-01-01 00:00 UTC))
    }

    #[test]
    fn empty_input_gives_header_only() {
        assert_eq!(to_csv(&[]), "Date,Type,Category,Amount,Notes");
    }

    #[test]
    fn writes_one_row_per_transaction_in_order() {
        let transactions = [
            transaction(
                TransactionKind::Expense,
                12.5,
                "Food",
                date!(2024 - 01 - 20),
                "Lunch",
            ),
            transaction(
                TransactionKind::Income,
                5000.0,
                "Salary",
                date!(2024 - 01 - 15),
                "",
            ),
        ];

        let csv = to_csv(&transactions);

        assert_eq!(
            csv,
            "Date,Type,Category,Amount,Notes\n\
            2024-01-20,expense,Food,12.5,\"Lunch\"\n\
            2024-01-15,income,Salary,5000,\"\""
        );
    }

    #[test]
    fn doubles_quotes_in_notes() {
        let transactions = [transaction(
            TransactionKind::Expense,
            1.0,
            "Food",
            date!(2024 - 01 - 20),
            "He said \"hi\"",
        )];

        let csv = to_csv(&transactions);

        assert!(
            csv.ends_with(r#","He said ""hi""""#),
            "got {csv}"
        );
    }

    #[test]
    fn output_parses_as_csv() {
        let transactions = [
            transaction(
                TransactionKind::Expense,
                12.5,
                "Food",
                date!(2024 - 01 - 20),
                "Lunch, with \"friends\"\nand more",
            ),
            transaction(
                TransactionKind::Income,
                5000.0,
                "Salary",
                date!(2024 - 01 - 15),
                "",
            ),
        ];

        let csv = to_csv(&transactions);
        let mut reader = csv::Reader::from_reader(csv.as_bytes());

        let headers = reader.headers().unwrap().clone();
        assert_eq!(
            headers.iter().collect::<Vec<_>>(),
            vec!["Date", "Type", "Category", "Amount", "Notes"]
        );
        let records = reader
            .records()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(&records[0][0], "2024-01-20");
        assert_eq!(&records[0][3], "12.5");
        assert_eq!(&records[0][4], "Lunch, with \"friends\"\nand more");
        assert_eq!(&records[1][1], "income");
        assert_eq!(&records[1][4], "");
    }
}
