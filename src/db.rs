/*! This module sets up the SQLite database that backs the document store. */

use rusqlite::{Connection, Transaction as SqlTransaction};

/// Create the `document` table that stores one JSON document per key.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn create_document_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS document (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
        (),
    )?;

    Ok(())
}

/// Create all the tables the application needs.
///
/// Safe to call on a database that has already been initialized.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), rusqlite::Error> {
    let transaction =
        SqlTransaction::new_unchecked(connection, rusqlite::TransactionBehavior::Exclusive)?;

    create_document_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
