use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRefresh;

use crate::{
    Error,
    app_state::LedgerState,
    transaction::TransactionId,
};

/// A route handler for deleting a transaction.
///
/// On success the page is refreshed so the totals and chart are recalculated,
/// otherwise responds with an alert.
pub async fn delete_transaction_endpoint(
    State(state): State<LedgerState>,
    Path(transaction_id): Path<TransactionId>,
) -> Response {
    let mut ledger = match state.ledger.lock() {
        Ok(ledger) => ledger,
        Err(error) => {
            tracing::error!("could not acquire ledger lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match ledger.delete_transaction(transaction_id) {
        Ok(()) => (HxRefresh(true), StatusCode::OK).into_response(),
        Err(error) => {
            tracing::error!("Could not delete transaction {transaction_id}: {error}");
            error.into_alert_response()
        }
    }
}
