//! Defines the app level error type and conversions to rendered HTML pages and alerts.
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::{
    alert::Alert, html::error_view, internal_server_error::InternalServerError,
    not_found::NotFoundError, transaction::TransactionKind,
};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A required form field was left empty.
    ///
    /// The string is the human readable name of the field.
    #[error("the field \"{0}\" is required")]
    MissingField(&'static str),

    /// A transaction amount of zero or less was submitted.
    #[error("{0} is not a positive amount")]
    NonPositiveAmount(f64),

    /// A transaction date that is not a `YYYY-MM-DD` calendar date.
    #[error("\"{0}\" is not a valid date")]
    InvalidDate(String),

    /// The category name used to create a transaction does not match a
    /// category of the same kind.
    #[error("\"{0}\" is not a valid {1} category")]
    InvalidCategory(String, TransactionKind),

    /// An empty string was used to create a category name.
    #[error("Category name cannot be empty")]
    EmptyCategoryName,

    /// A document could not be written to storage.
    ///
    /// The string is the key of the document. The in-memory state has
    /// already been updated when this error is returned.
    #[error("could not save the document \"{0}\"")]
    PersistenceFailed(String),

    /// The user asked for an export but there are no transactions.
    #[error("there are no transactions to export")]
    NothingToExport,

    /// Tried to delete a transaction that does not exist
    #[error("tried to delete a transaction that does not exist")]
    DeleteMissingTransaction,

    /// Tried to delete a category that does not exist
    #[error("tried to delete a category that does not exist")]
    DeleteMissingCategory,

    /// The requested resource was not found.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the ledger lock
    #[error("could not acquire the ledger lock")]
    DatabaseLockError,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => NotFoundError.into_response(),
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            Error::NothingToExport => (
                StatusCode::BAD_REQUEST,
                Html(
                    error_view(
                        "Nothing to Export",
                        "400",
                        "No transactions to export",
                        "Add a transaction and try again.",
                    )
                    .into_string(),
                ),
            )
                .into_response(),
            Error::DatabaseLockError => InternalServerError::default().into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Convert the error into an HTTP response with an HTML alert.
    pub fn into_alert_response(self) -> Response {
        let (status_code, alert) = match self {
            Error::MissingField(field) => (
                StatusCode::BAD_REQUEST,
                Alert::error(
                    "Please fill in all required fields",
                    &format!("The field \"{field}\" cannot be empty."),
                ),
            ),
            Error::NonPositiveAmount(amount) => (
                StatusCode::BAD_REQUEST,
                Alert::error(
                    "Invalid amount",
                    &format!("{amount} is not allowed. Enter an amount greater than zero."),
                ),
            ),
            Error::InvalidDate(date) => (
                StatusCode::BAD_REQUEST,
                Alert::error(
                    "Invalid date",
                    &format!("\"{date}\" is not a valid date. Pick a date from the calendar."),
                ),
            ),
            Error::InvalidCategory(name, kind) => (
                StatusCode::BAD_REQUEST,
                Alert::error(
                    "Invalid category",
                    &format!(
                        "Could not find the {kind} category \"{name}\". \
                        Pick a category from the list or add it on the categories page."
                    ),
                ),
            ),
            Error::EmptyCategoryName => (
                StatusCode::BAD_REQUEST,
                Alert::error("Please enter a category name", ""),
            ),
            Error::PersistenceFailed(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::error(
                    "Failed to save your data",
                    "Your change is shown but could not be written to storage. \
                    The storage might be full or restricted.",
                ),
            ),
            Error::NothingToExport => (
                StatusCode::BAD_REQUEST,
                Alert::error("No transactions to export", ""),
            ),
            Error::DeleteMissingTransaction => (
                StatusCode::NOT_FOUND,
                Alert::error(
                    "Could not delete transaction",
                    "The transaction could not be found. \
                    Try refreshing the page to see if the transaction has already been deleted.",
                ),
            ),
            Error::DeleteMissingCategory => (
                StatusCode::NOT_FOUND,
                Alert::error(
                    "Could not remove category",
                    "The category could not be found. \
                    Try refreshing the page to see if the category has already been removed.",
                ),
            ),
            Error::InvalidTimezoneError(timezone) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::error(
                    "Invalid Timezone Settings",
                    &format!(
                        "Could not get local timezone \"{timezone}\". Check your server settings and \
                        ensure the timezone has been set to valid, canonical timezone string"
                    ),
                ),
            ),
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Alert::error(
                        "Something went wrong",
                        "An unexpected error occurred, check the server logs for more details.",
                    ),
                )
            }
        };

        (status_code, alert.into_html()).into_response()
    }
}
