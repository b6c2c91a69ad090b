//! Category creation endpoint.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use time::OffsetDateTime;

use crate::{
    Error,
    app_state::LedgerState,
    category::{Category, CategoryName, domain::CategoryFormData},
    endpoints,
};

/// Handle category creation form submission.
///
/// The new category is appended to the existing ones and the whole collection
/// is saved.
pub async fn create_category_endpoint(
    State(state): State<LedgerState>,
    Form(new_category): Form<CategoryFormData>,
) -> Response {
    let name = match CategoryName::new(&new_category.name) {
        Ok(name) => name,
        Err(error) => return error.into_alert_response(),
    };

    let mut ledger = match state.ledger.lock() {
        Ok(ledger) => ledger,
        Err(error) => {
            tracing::error!("could not acquire ledger lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    let category = Category {
        id: ledger.next_category_id(OffsetDateTime::now_utc()),
        name,
        kind: new_category.kind,
    };
    let mut categories = ledger.categories().to_vec();
    categories.push(category);

    match ledger.replace_categories(categories) {
        Ok(()) => (
            HxRedirect(endpoints::CATEGORIES_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => {
            tracing::error!("An unexpected error occurred while creating a category: {error}");

            error.into_alert_response()
        }
    }
}
