use rusqlite::Connection;
use time::{Date, OffsetDateTime};

use crate::{
    AppState, Ledger, SqliteDocumentStore,
    transaction::{Transaction, TransactionId, TransactionKind},
};

fn get_test_ledger() -> Ledger {
    let connection =
        Connection::open_in_memory().expect("Could not open in-memory SQLite database");
    let store = SqliteDocumentStore::new(connection).expect("Could not create document store");

    Ledger::load(Box::new(store))
}

pub(crate) fn get_test_app_state() -> AppState {
    AppState::new(get_test_ledger(), "Etc/UTC")
}

#[track_caller]
pub(crate) fn add_test_transaction(
    state: &AppState,
    kind: TransactionKind,
    amount: f64,
    category: &str,
    date: Date,
) -> TransactionId {
    state
        .ledger
        .lock()
        .expect("Could not lock ledger")
        .add_transaction(
            Transaction::build(kind, amount, category, date),
            OffsetDateTime::now_utc(),
        )
        .expect("Could not add transaction")
}
