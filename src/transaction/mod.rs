//! Transactions and the pages and endpoints for recording them.
//!
//! This module contains:
//! - The `Transaction` model and `TransactionBuilder` for creating transactions
//! - The filter and sort pipeline used by the transaction list
//! - Route handlers for creating and deleting transactions

mod arrange;
mod core;
mod create_endpoint;
mod create_page;
mod delete_endpoint;

pub use arrange::{ArrangeOptions, SortDirection, SortField, TypeFilter, arrange, distinct_categories};
pub use core::{Transaction, TransactionBuilder, TransactionId, TransactionKind};
pub use create_endpoint::create_transaction_endpoint;
pub use create_page::get_new_transaction_page;
pub use delete_endpoint::delete_transaction_endpoint;
