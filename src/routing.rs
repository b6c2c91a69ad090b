//! Application router configuration.

use axum::{
    Router, middleware,
    response::Redirect,
    routing::{delete, get, post},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    category::{create_category_endpoint, delete_category_endpoint, get_categories_page},
    dashboard::get_dashboard_page,
    endpoints,
    export::export_endpoint,
    internal_server_error::get_internal_server_error_page,
    logging::logging_middleware,
    not_found::get_404_not_found,
    reset::reset_endpoint,
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, get_new_transaction_page,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let page_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(endpoints::NEW_TRANSACTION_VIEW, get(get_new_transaction_page))
        .route(endpoints::CATEGORIES_VIEW, get(get_categories_page))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    let api_routes = Router::new()
        .route(
            endpoints::TRANSACTIONS_API,
            post(create_transaction_endpoint),
        )
        .route(
            endpoints::DELETE_TRANSACTION,
            delete(delete_transaction_endpoint),
        )
        .route(endpoints::CATEGORIES_API, post(create_category_endpoint))
        .route(endpoints::DELETE_CATEGORY, delete(delete_category_endpoint))
        .route(endpoints::RESET, post(reset_endpoint))
        .route(endpoints::EXPORT, get(export_endpoint));

    // Static files are added after the logging layer so binary bodies are not buffered.
    page_routes
        .merge(api_routes)
        .layer(middleware::from_fn(logging_middleware))
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the dashboard page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::DASHBOARD_VIEW)
}


#[cfg(test)]
mod router_tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;

    use crate::{endpoints, test_utils::get_test_app_state};

    use super::build_router;

    fn get_test_server() -> TestServer {
        TestServer::try_new(build_router(get_test_app_state())).expect("Could not create test server")
    }

    #[tokio::test]
    async fn serves_dashboard() {
        let server = get_test_server();

        let response = server.get(endpoints::DASHBOARD_VIEW).await;

        response.assert_status_ok();
        assert!(response.text().contains("Nothing here yet"));
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let server = get_test_server();

        let response = server.get("/does-not-exist").await;

        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn created_transaction_appears_in_export() {
        let server = get_test_server();

        server.get(endpoints::EXPORT).await.assert_status_bad_request();

        let response = server
            .post(endpoints::TRANSACTIONS_API)
            .form(&[
                ("kind", "expense"),
                ("amount", "12.5"),
                ("category", "Food"),
                ("date", "2024-01-20"),
                ("notes", "Lunch"),
            ])
            .await;
        response.assert_status(StatusCode::SEE_OTHER);

        let response = server.get(endpoints::EXPORT).await;
        response.assert_status_ok();
        assert_eq!(
            response.text(),
            "Date,Type,Category,Amount,Notes\n2024-01-20,expense,Food,12.5,\"Lunch\""
        );
    }

    #[tokio::test]
    async fn empty_date_gets_missing_field_alert() {
        let server = get_test_server();

        let response = server
            .post(endpoints::TRANSACTIONS_API)
            .form(&[
                ("kind", "expense"),
                ("amount", "12.5"),
                ("category", "Food"),
                ("date", ""),
            ])
            .await;

        response.assert_status_bad_request();
        assert!(response.text().contains("Please fill in all required fields"));
    }

    #[tokio::test]
    async fn reset_clears_transactions() {
        let server = get_test_server();
        server
            .post(endpoints::TRANSACTIONS_API)
            .form(&[
                ("kind", "income"),
                ("amount", "500"),
                ("category", "Salary"),
                ("date", "2024-01-15"),
            ])
            .await
            .assert_status(StatusCode::SEE_OTHER);

        server
            .post(endpoints::RESET)
            .await
            .assert_status(StatusCode::SEE_OTHER);

        server.get(endpoints::EXPORT).await.assert_status_bad_request();
    }
}
