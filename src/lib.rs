//! Finance Tracker is a web app for recording personal income and expenses.
//!
//! <br>
//!
//! This library provides a web server that directly serves HTML pages. All
//! data is kept in a [Ledger] that persists itself as two JSON documents in a
//! local key-value store.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod category;
mod dashboard;
mod db;
mod endpoints;
mod error;
mod export;
mod html;
mod internal_server_error;
mod ledger;
mod logging;
mod navigation;
mod not_found;
mod reset;
mod routing;
mod storage;
mod timezone;
mod transaction;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use category::{Category, CategoryId, default_categories};
pub use dashboard::{Bucket, Granularity, Totals, bucketize, totals};
pub use db::initialize as initialize_db;
pub use error::Error;
pub use export::to_csv;
pub use ledger::Ledger;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use storage::{
    CATEGORIES_KEY, DocumentStore, SqliteDocumentStore, TRANSACTIONS_KEY, load_categories,
    load_transactions,
};
pub use timezone::get_local_offset;
pub use transaction::{
    ArrangeOptions, SortDirection, SortField, Transaction, TransactionId, TransactionKind,
    TypeFilter, arrange,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
