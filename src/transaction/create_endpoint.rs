//! Defines the endpoint for creating a new transaction.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use serde::Deserialize;
use time::{Date, OffsetDateTime, macros::format_description};

use crate::{
    Error,
    app_state::LedgerState,
    endpoints,
    transaction::{Transaction, TransactionBuilder, TransactionKind},
};

/// The form data for creating a transaction.
///
/// Every field but `kind` may be left empty by the browser, the missing ones
/// are reported back to the user by name.
#[derive(Debug, Deserialize)]
pub struct TransactionForm {
    /// Whether the transaction is an income or an expense.
    pub kind: TransactionKind,
    /// The amount of money.
    #[serde(default)]
    pub amount: Option<f64>,
    /// The name of the category.
    #[serde(default)]
    pub category: Option<String>,
    /// The date when the transaction ocurred, as `YYYY-MM-DD`.
    #[serde(default)]
    pub date: Option<String>,
    /// Free text about the transaction.
    #[serde(default)]
    pub notes: String,
}

impl TransactionForm {
    fn into_builder(self) -> Result<TransactionBuilder, Error> {
        let amount = self.amount.ok_or(Error::MissingField("Amount"))?;
        let category = self
            .category
            .filter(|category| !category.is_empty())
            .ok_or(Error::MissingField("Category"))?;
        let date = self
            .date
            .filter(|date| !date.is_empty())
            .ok_or(Error::MissingField("Date"))?;
        let date = Date::parse(&date, format_description!("[year]-[month]-[day]"))
            .map_err(|_| Error::InvalidDate(date))?;

        Ok(Transaction::build(self.kind, amount, &category, date).notes(self.notes.trim()))
    }
}

/// A route handler for creating a new transaction, redirects to the dashboard on success.
pub async fn create_transaction_endpoint(
    State(state): State<LedgerState>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let builder = match form.into_builder() {
        Ok(builder) => builder,
        Err(error) => {
            tracing::debug!("rejected transaction form: {error}");
            return error.into_alert_response();
        }
    };

    let mut ledger = match state.ledger.lock() {
        Ok(ledger) => ledger,
        Err(error) => {
            tracing::error!("could not acquire ledger lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    if let Err(error) = ledger.add_transaction(builder, OffsetDateTime::now_utc()) {
        tracing::error!("could not create transaction: {error}");

        return error.into_alert_response();
    }

    (
        HxRedirect(endpoints::DASHBOARD_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use axum::{
        extract::{FromRef, State},
        http::StatusCode,
    };
    use axum_extra::extract::Form;
    use time::macros::date;

    use crate::{
        app_state::LedgerState,
        endpoints,
        test_utils::{assert_hx_redirect, get_test_app_state, parse_html_fragment},
        transaction::TransactionKind,
    };

    use super::{TransactionForm, create_transaction_endpoint};

    fn form(amount: Option<f64>, category: Option<&str>) -> TransactionForm {
        TransactionForm {
            kind: TransactionKind::Expense,
            amount,
            category: category.map(str::to_owned),
            date: Some("2024-01-20".to_owned()),
            notes: "  Lunch ".to_owned(),
        }
    }

    #[tokio::test]
    async fn can_create_transaction() {
        let state = get_test_app_state();

        let response = create_transaction_endpoint(
            State(LedgerState::from_ref(&state)),
            Form(form(Some(12.3), Some("Food"))),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, endpoints::DASHBOARD_VIEW);
        let ledger = state.ledger.lock().unwrap();
        let transactions = ledger.transactions();
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].amount, 12.3);
        assert_eq!(transactions[0].category, "Food");
        assert_eq!(transactions[0].kind, TransactionKind::Expense);
        assert_eq!(transactions[0].date, date!(2024 - 01 - 20));
        assert_eq!(transactions[0].notes, "Lunch");
    }

    #[tokio::test]
    async fn missing_amount_is_rejected() {
        let state = get_test_app_state();

        let response = create_transaction_endpoint(
            State(LedgerState::from_ref(&state)),
            Form(form(None, Some("Food"))),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(state.ledger.lock().unwrap().transactions().is_empty());
    }

    #[tokio::test]
    async fn missing_category_is_rejected() {
        let state = get_test_app_state();

        let response = create_transaction_endpoint(
            State(LedgerState::from_ref(&state)),
            Form(form(Some(10.0), Some(""))),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(state.ledger.lock().unwrap().transactions().is_empty());
    }

    #[tokio::test]
    async fn missing_date_is_rejected() {
        let state = get_test_app_state();
        let form: TransactionForm =
            serde_html_form::from_str("kind=expense&amount=10&category=Food&date=").unwrap();

        let response =
            create_transaction_endpoint(State(LedgerState::from_ref(&state)), Form(form)).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let html = parse_html_fragment(response).await;
        let text = html.root_element().text().collect::<String>();
        assert!(
            text.contains("The field \"Date\" cannot be empty."),
            "got {text}"
        );
        assert!(state.ledger.lock().unwrap().transactions().is_empty());
    }

    #[tokio::test]
    async fn malformed_date_is_rejected() {
        let state = get_test_app_state();
        let mut form = form(Some(10.0), Some("Food"));
        form.date = Some("20/01/2024".to_owned());

        let response =
            create_transaction_endpoint(State(LedgerState::from_ref(&state)), Form(form)).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(state.ledger.lock().unwrap().transactions().is_empty());
    }

    #[tokio::test]
    async fn infinite_amount_is_rejected() {
        let state = get_test_app_state();
        let form: TransactionForm = serde_html_form::from_str(
            "kind=expense&amount=1e999&category=Food&date=2024-01-20",
        )
        .unwrap();

        let response =
            create_transaction_endpoint(State(LedgerState::from_ref(&state)), Form(form)).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(state.ledger.lock().unwrap().transactions().is_empty());
    }

    #[tokio::test]
    async fn non_positive_amount_is_rejected() {
        let state = get_test_app_state();

        let response = create_transaction_endpoint(
            State(LedgerState::from_ref(&state)),
            Form(form(Some(0.0), Some("Food"))),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(state.ledger.lock().unwrap().transactions().is_empty());
    }

    #[tokio::test]
    async fn category_of_other_kind_is_rejected() {
        let state = get_test_app_state();

        let response = create_transaction_endpoint(
            State(LedgerState::from_ref(&state)),
            Form(form(Some(10.0), Some("Salary"))),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(state.ledger.lock().unwrap().transactions().is_empty());
    }

    #[test]
    fn parses_browser_form() {
        let form: TransactionForm = serde_html_form::from_str(
            "kind=income&amount=5000&category=Salary&date=2024-01-15&notes=",
        )
        .unwrap();

        assert_eq!(form.kind, TransactionKind::Income);
        assert_eq!(form.amount, Some(5000.0));
        assert_eq!(form.category.as_deref(), Some("Salary"));
        assert_eq!(form.date.as_deref(), Some("2024-01-15"));
        assert_eq!(form.notes, "");
    }

    #[test]
    fn parses_empty_fields_as_none() {
        let form: TransactionForm =
            serde_html_form::from_str("kind=expense&amount=&category=&date=").unwrap();

        assert_eq!(form.amount, None);
        assert_eq!(form.category, None);
        assert_eq!(form.date, None);
    }
}
