//! Category deletion endpoint.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{Error, app_state::LedgerState, category::CategoryId};

/// Handle category deletion.
///
/// Responds with an empty 200 so htmx removes the table row, or an alert on
/// failure. Transactions that use the category keep its name.
pub async fn delete_category_endpoint(
    Path(category_id): Path<CategoryId>,
    State(state): State<LedgerState>,
) -> Response {
    let mut ledger = match state.ledger.lock() {
        Ok(ledger) => ledger,
        Err(error) => {
            tracing::error!("could not acquire ledger lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    let categories = ledger
        .categories()
        .iter()
        .filter(|category| category.id != category_id)
        .cloned()
        .collect::<Vec<_>>();

    if categories.len() == ledger.categories().len() {
        return Error::DeleteMissingCategory.into_alert_response();
    }

    match ledger.replace_categories(categories) {
        Ok(()) => StatusCode::OK.into_response(),
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while deleting category {category_id}: {error}"
            );
            error.into_alert_response()
        }
    }
}

#[cfg(test)]
mod delete_category_endpoint_tests {
    use axum::{
        extract::{FromRef, Path, State},
        http::StatusCode,
    };
    use time::macros::date;

    use crate::{
        app_state::LedgerState,
        category::default_categories,
        test_utils::{add_test_transaction, get_test_app_state},
        transaction::TransactionKind,
    };

    use super::delete_category_endpoint;

    #[tokio::test]
    async fn can_delete_category() {
        let state = get_test_app_state();

        let response =
            delete_category_endpoint(Path("6".to_owned()), State(LedgerState::from_ref(&state)))
                .await;

        assert_eq!(response.status(), StatusCode::OK);
        let ledger = state.ledger.lock().unwrap();
        assert_eq!(ledger.categories().len(), default_categories().len() - 1);
        assert!(ledger.categories().iter().all(|category| category.id != "6"));
    }

    #[tokio::test]
    async fn transactions_keep_deleted_category_name() {
        let state = get_test_app_state();
        add_test_transaction(
            &state,
            TransactionKind::Expense,
            1200.0,
            "Food",
            date!(2024 - 01 - 20),
        );

        delete_category_endpoint(Path("6".to_owned()), State(LedgerState::from_ref(&state))).await;

        let ledger = state.ledger.lock().unwrap();
        assert_eq!(ledger.transactions()[0].category, "Food");
    }

    #[tokio::test]
    async fn delete_missing_category_is_not_found() {
        let state = get_test_app_state();

        let response =
            delete_category_endpoint(Path("999".to_owned()), State(LedgerState::from_ref(&state)))
                .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            state.ledger.lock().unwrap().categories(),
            default_categories()
        );
    }
}
