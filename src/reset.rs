//! The endpoint for clearing all data.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;

use crate::{Error, app_state::LedgerState, endpoints};

/// Delete every transaction and restore the default categories, then redirect
/// to the dashboard.
pub async fn reset_endpoint(State(state): State<LedgerState>) -> Response {
    let mut ledger = match state.ledger.lock() {
        Ok(ledger) => ledger,
        Err(error) => {
            tracing::error!("could not acquire ledger lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match ledger.reset() {
        Ok(()) => (
            HxRedirect(endpoints::DASHBOARD_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => {
            tracing::error!("Could not reset data: {error}");
            error.into_alert_response()
        }
    }
}
