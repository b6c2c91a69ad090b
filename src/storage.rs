//! Persists the transaction and category collections as JSON documents.
//!
//! Each collection is stored as a single JSON array under a fixed key. Missing
//! or unreadable documents are replaced by the defaults so that a corrupt
//! store never stops the app from starting.

use rusqlite::{Connection, OptionalExtension};
use serde::{Serialize, de::DeserializeOwned};

use crate::{
    Error,
    category::{Category, default_categories},
    db::initialize,
    transaction::Transaction,
};

/// The key of the document holding every transaction.
pub const TRANSACTIONS_KEY: &str = "finance_tracker_transactions";
/// The key of the document holding every category.
pub const CATEGORIES_KEY: &str = "finance_tracker_categories";

/// A key-value store of text documents.
pub trait DocumentStore {
    /// Get the document stored under `key`, or `None` if there is no such document.
    ///
    /// # Errors
    /// Returns an error if the store could not be read.
    fn load(&self, key: &str) -> Result<Option<String>, Error>;

    /// Store `document` under `key`, replacing any existing document.
    ///
    /// # Errors
    /// Returns an error if the store could not be written.
    fn save(&mut self, key: &str, document: &str) -> Result<(), Error>;

    /// Delete the document stored under `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    /// Returns an error if the store could not be written.
    fn remove(&mut self, key: &str) -> Result<(), Error>;
}

/// A [DocumentStore] backed by the `document` table of a SQLite database.
#[derive(Debug)]
pub struct SqliteDocumentStore {
    connection: Connection,
}

impl SqliteDocumentStore {
    /// Create a store on `connection`, creating the `document` table if needed.
    ///
    /// # Errors
    /// Returns an error if the table could not be created.
    pub fn new(connection: Connection) -> Result<Self, Error> {
        initialize(&connection)?;

        Ok(Self { connection })
    }
}

impl DocumentStore for SqliteDocumentStore {
    fn load(&self, key: &str) -> Result<Option<String>, Error> {
        self.connection
            .query_row("SELECT value FROM document WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()
            .map_err(Error::from)
    }

    fn save(&mut self, key: &str, document: &str) -> Result<(), Error> {
        self.connection.execute(
            "INSERT INTO document (key, value) VALUES (?1, ?2)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            (key, document),
        )?;

        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), Error> {
        self.connection
            .execute("DELETE FROM document WHERE key = ?1", [key])?;

        Ok(())
    }
}

/// Load the transactions from `store`.
///
/// Returns an empty list if the document is missing, unreadable or not a valid
/// list of transactions.
pub fn load_transactions(store: &dyn DocumentStore) -> Vec<Transaction> {
    load_or_default(store, TRANSACTIONS_KEY, Vec::new)
}

/// Load the categories from `store`.
///
/// Returns the [default_categories] if the document is missing, unreadable or
/// not a valid list of categories. A stored empty list is kept as is.
pub fn load_categories(store: &dyn DocumentStore) -> Vec<Category> {
    load_or_default(store, CATEGORIES_KEY, default_categories)
}

fn load_or_default<T: DeserializeOwned>(
    store: &dyn DocumentStore,
    key: &str,
    default: impl FnOnce() -> T,
) -> T {
    let document = match store.load(key) {
        Ok(Some(document)) => document,
        Ok(None) => {
            tracing::debug!("No document stored under \"{key}\", using defaults");
            return default();
        }
        Err(error) => {
            tracing::warn!("Could not read \"{key}\", using defaults: {error}");
            return default();
        }
    };

    match serde_json::from_str(&document) {
        Ok(value) => value,
        Err(error) => {
            tracing::warn!("Discarding malformed document \"{key}\", using defaults: {error}");
            default()
        }
    }
}

/// Serialize `value` to JSON and save it under `key`.
///
/// # Errors
/// Returns [Error::PersistenceFailed] if the value could not be serialized or saved.
pub(crate) fn save_document<T: Serialize + ?Sized>(
    store: &mut dyn DocumentStore,
    key: &str,
    value: &T,
) -> Result<(), Error> {
    let document = serde_json::to_string(value).map_err(|error| {
        tracing::error!("Could not serialize \"{key}\": {error}");
        Error::PersistenceFailed(key.to_owned())
    })?;

    store.save(key, &document).map_err(|error| {
        tracing::error!("Could not save \"{key}\": {error}");
        Error::PersistenceFailed(key.to_owned())
    })
}


#[cfg(test)]
mod load_tests {
    use rusqlite::Connection;
    use time::macros::{date, datetime};

    use crate::{
        category::{Category, CategoryName, default_categories},
        transaction::{Transaction, TransactionKind},
    };

    use super::{
        CATEGORIES_KEY, DocumentStore, SqliteDocumentStore, TRANSACTIONS_KEY, load_categories,
        load_transactions, save_document,
    };

    fn get_store() -> SqliteDocumentStore {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");

        SqliteDocumentStore::new(connection).expect("Could not create document store")
    }

    #[test]
    fn empty_store_loads_defaults() {
        let store = get_store();

        assert_eq!(load_transactions(&store), vec![]);
        assert_eq!(load_categories(&store), default_categories());
    }

    #[test]
    fn malformed_documents_load_defaults() {
        let mut store = get_store();
        store.save(TRANSACTIONS_KEY, "not-json").unwrap();
        store.save(CATEGORIES_KEY, "not-json").unwrap();

        assert_eq!(load_transactions(&store), vec![]);
        assert_eq!(load_categories(&store), default_categories());
    }

    #[test]
    fn wrong_shape_loads_defaults() {
        let mut store = get_store();
        store.save(TRANSACTIONS_KEY, r#"{"id": 1}"#).unwrap();

        assert_eq!(load_transactions(&store), vec![]);
    }

    #[test]
    fn stored_empty_category_list_is_kept() {
        let mut store = get_store();
        store.save(CATEGORIES_KEY, "[]").unwrap();

        assert_eq!(load_categories(&store), vec![]);
    }

    #[test]
    fn saved_documents_load_back() {
        let mut store = get_store();
        let transactions = vec![
            Transaction::build(
                TransactionKind::Income,
                5000.0,
                "Salary",
                date!(2024 - 01 - 15),
            )
            .finalize(1, datetime!(2024-01-15 09:00 UTC)),
        ];
        let categories = vec![Category {
            id: "1".to_owned(),
            name: CategoryName::new_unchecked("Salary"),
            kind: TransactionKind::Income,
        }];

        save_document(&mut store, TRANSACTIONS_KEY, &transactions).unwrap();
        save_document(&mut store, CATEGORIES_KEY, &categories).unwrap();

        assert_eq!(load_transactions(&store), transactions);
        assert_eq!(load_categories(&store), categories);
    }
}
