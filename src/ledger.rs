//! The in-memory collections of transactions and categories and the only
//! operations that may change them.
//!
//! Every change is applied in memory first and then written to the
//! [DocumentStore]. If the write fails the change is kept in memory and
//! [Error::PersistenceFailed] is returned so the user can be told.

use time::OffsetDateTime;

use crate::{
    Error,
    category::{Category, CategoryId, default_categories},
    storage::{
        CATEGORIES_KEY, DocumentStore, TRANSACTIONS_KEY, load_categories, load_transactions,
        save_document,
    },
    transaction::{Transaction, TransactionBuilder, TransactionId},
};

/// Owns every transaction and category along with the store they are saved to.
pub struct Ledger {
    transactions: Vec<Transaction>,
    categories: Vec<Category>,
    store: Box<dyn DocumentStore + Send>,
}

impl Ledger {
    /// Load the ledger from `store`, falling back to the defaults for any
    /// document that is missing or malformed.
    pub fn load(store: Box<dyn DocumentStore + Send>) -> Self {
        let transactions = load_transactions(store.as_ref());
        let categories = load_categories(store.as_ref());

        tracing::info!(
            "Loaded {} transactions and {} categories",
            transactions.len(),
            categories.len()
        );

        Self {
            transactions,
            categories,
            store,
        }
    }

    /// All transactions in the order they were added.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// All categories in the order they were added.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Validate `builder` and add the resulting transaction.
    ///
    /// The ID is `created_at` in Unix milliseconds, bumped past the largest
    /// existing ID if needed so IDs stay unique and increasing.
    ///
    /// # Errors
    /// Returns:
    /// - [Error::NonPositiveAmount] or [Error::InvalidCategory] if `builder`
    ///   is invalid, in which case nothing is added,
    /// - [Error::PersistenceFailed] if the transaction was added but could not
    ///   be saved.
    pub fn add_transaction(
        &mut self,
        builder: TransactionBuilder,
        created_at: OffsetDateTime,
    ) -> Result<TransactionId, Error> {
        builder.validate(&self.categories)?;

        let id = next_id(
            created_at,
            self.transactions.iter().map(|transaction| transaction.id),
        );
        self.transactions.push(builder.finalize(id, created_at));
        tracing::debug!("Added transaction {id}");

        self.save_transactions()?;

        Ok(id)
    }

    /// Remove the transaction with `id`.
    ///
    /// # Errors
    /// Returns:
    /// - [Error::DeleteMissingTransaction] if there is no transaction with `id`,
    /// - [Error::PersistenceFailed] if the transaction was removed but the
    ///   change could not be saved.
    pub fn delete_transaction(&mut self, id: TransactionId) -> Result<(), Error> {
        let count_before = self.transactions.len();
        self.transactions.retain(|transaction| transaction.id != id);

        if self.transactions.len() == count_before {
            return Err(Error::DeleteMissingTransaction);
        }

        tracing::debug!("Deleted transaction {id}");
        self.save_transactions()
    }

    /// Replace every category with `categories`.
    ///
    /// Transactions keep their category names even if the category is gone.
    ///
    /// # Errors
    /// Returns [Error::PersistenceFailed] if the categories were replaced but
    /// could not be saved.
    pub fn replace_categories(&mut self, categories: Vec<Category>) -> Result<(), Error> {
        self.categories = categories;
        tracing::debug!("Replaced categories, {} remain", self.categories.len());

        save_document(self.store.as_mut(), CATEGORIES_KEY, &self.categories)
    }

    /// Generate an ID for a category created at `created_at`.
    pub fn next_category_id(&self, created_at: OffsetDateTime) -> CategoryId {
        let existing = self
            .categories
            .iter()
            .filter_map(|category| category.id.parse::<i64>().ok());

        next_id(created_at, existing).to_string()
    }

    /// Remove every transaction and restore the default categories.
    ///
    /// Both documents are removed from the store so the next load also starts
    /// from the defaults.
    ///
    /// # Errors
    /// Returns [Error::PersistenceFailed] if the data was reset in memory but
    /// a document could not be removed.
    pub fn reset(&mut self) -> Result<(), Error> {
        self.transactions.clear();
        self.categories = default_categories();
        tracing::info!("Reset all data");

        let removed_transactions = self.store.remove(TRANSACTIONS_KEY).map_err(|error| {
            tracing::error!("Could not remove \"{TRANSACTIONS_KEY}\": {error}");
            Error::PersistenceFailed(TRANSACTIONS_KEY.to_owned())
        });
        let removed_categories = self.store.remove(CATEGORIES_KEY).map_err(|error| {
            tracing::error!("Could not remove \"{CATEGORIES_KEY}\": {error}");
            Error::PersistenceFailed(CATEGORIES_KEY.to_owned())
        });

        removed_transactions.and(removed_categories)
    }

    fn save_transactions(&mut self) -> Result<(), Error> {
        save_document(self.store.as_mut(), TRANSACTIONS_KEY, &self.transactions)
    }
}

/// The Unix millisecond timestamp of `created_at`, or one more than the
/// largest of `existing` if that is not already larger.
fn next_id(created_at: OffsetDateTime, existing: impl Iterator<Item = i64>) -> i64 {
    let timestamp = (created_at.unix_timestamp_nanos() / 1_000_000) as i64;

    match existing.max() {
        Some(max) if max >= timestamp => max + 1,
        _ => timestamp,
    }
}
