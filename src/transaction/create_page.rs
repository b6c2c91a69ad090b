//! Defines the route handler for the page for creating a new transaction.

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;
use time::Date;

use crate::{
    Error,
    app_state::DatedLedgerState,
    category::Category,
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE, base, loading_spinner,
    },
    navigation::NavBar,
    timezone::local_today,
    transaction::TransactionKind,
};

/// The query string for the new transaction page.
#[derive(Debug, Default, Deserialize)]
pub struct NewTransactionQuery {
    /// The kind of transaction to create, defaults to an expense.
    pub kind: Option<TransactionKind>,
}

fn kind_tab(kind: TransactionKind, selected: TransactionKind) -> Markup {
    let style = if kind == selected {
        "flex-1 py-2 text-center font-semibold border-b-2 border-blue-600 text-blue-600 \
        dark:text-blue-500 dark:border-blue-500"
    } else {
        "flex-1 py-2 text-center text-gray-500 border-b-2 border-transparent \
        hover:text-gray-700 dark:text-gray-400 dark:hover:text-gray-300"
    };

    html!(
        a href={ (endpoints::NEW_TRANSACTION_VIEW) "?kind=" (kind) } class=(style)
        {
            (kind.label())
        }
    )
}

fn create_transaction_view(kind: TransactionKind, today: Date, categories: &[&Category]) -> Markup {
    let nav_bar = NavBar::new(endpoints::NEW_TRANSACTION_VIEW).into_html();
    let spinner = loading_spinner();

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            form
                hx-post=(endpoints::TRANSACTIONS_API)
                hx-target-error="#alert-container"
                class="w-full space-y-4 md:space-y-6"
            {
                h2 class="text-xl font-bold" { "New " (kind.label()) }

                div class="flex w-full"
                {
                    (kind_tab(TransactionKind::Income, kind))
                    (kind_tab(TransactionKind::Expense, kind))
                }

                input type="hidden" name="kind" value=(kind);

                div
                {
                    label
                        for="amount"
                        class=(FORM_LABEL_STYLE)
                    {
                        "Amount"
                    }

                    input
                        name="amount"
                        id="amount"
                        type="number"
                        step="0.01"
                        min="0.01"
                        placeholder="0.00"
                        required
                        autofocus
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label
                        for="category"
                        class=(FORM_LABEL_STYLE)
                    {
                        "Category"
                    }

                    select
                        name="category"
                        id="category"
                        required
                        class=(FORM_TEXT_INPUT_STYLE)
                    {
                        option value="" { "Select a category" }

                        @for category in categories {
                            option value=(category.name) { (category.name) }
                        }
                    }
                }

                div
                {
                    label
                        for="date"
                        class=(FORM_LABEL_STYLE)
                    {
                        "Date"
                    }

                    input
                        name="date"
                        id="date"
                        type="date"
                        required
                        value=(today)
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label
                        for="notes"
                        class=(FORM_LABEL_STYLE)
                    {
                        "Notes"
                    }

                    textarea
                        name="notes"
                        id="notes"
                        rows="3"
                        placeholder="Optional notes"
                        class=(FORM_TEXT_INPUT_STYLE)
                    {}
                }

                button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
                {
                    span
                        id="indicator"
                        class="inline htmx-indicator"
                    {
                        (spinner)
                    }
                    " Save " (kind.label())
                }

                a href=(endpoints::DASHBOARD_VIEW) class={ "block text-center " (BUTTON_SECONDARY_STYLE) }
                {
                    "Cancel"
                }
            }
        }
    };

    base("New Transaction", &[], &content)
}

/// Renders the page for creating a transaction.
///
/// Only the categories of the chosen kind are offered.
pub async fn get_new_transaction_page(
    State(state): State<DatedLedgerState>,
    Query(query): Query<NewTransactionQuery>,
) -> Result<Response, Error> {
    let kind = query.kind.unwrap_or(TransactionKind::Expense);
    let today = local_today(&state.local_timezone)?;

    let ledger = state
        .ledger
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire ledger lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let categories = ledger
        .categories()
        .iter()
        .filter(|category| category.kind == kind)
        .collect::<Vec<_>>();

    Ok(create_transaction_view(kind, today, &categories).into_response())
}
