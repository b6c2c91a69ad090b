//! Dashboard HTTP handlers and view rendering.
//!
//! The dashboard is the main page of the app. It shows the summary cards, the
//! income and expense chart, the transaction list and the data controls.

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    Error,
    app_state::DatedLedgerState,
    dashboard::{
        aggregation::{bucketize, totals},
        cards::summary_cards,
        charts::{DashboardChart, chart_view, charts_script, income_expense_chart},
        query::DashboardQuery,
        transaction_list::transaction_list_view,
    },
    endpoints,
    html::{BUTTON_DELETE_STYLE, HeadElement, LINK_STYLE, base, link},
    navigation::NavBar,
    timezone::local_today,
    transaction::{Transaction, TransactionKind},
};

const CHART_ID: &str = "income-expense-chart";

/// Display a page with an overview of the user's data.
pub async fn get_dashboard_page(
    State(state): State<DatedLedgerState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Response, Error> {
    let today = local_today(&state.local_timezone)?;

    let ledger = state
        .ledger
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire ledger lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let transactions = ledger.transactions();

    let chart = if transactions.is_empty() {
        None
    } else {
        let buckets = bucketize(
            transactions,
            query.timeframe,
            query.timeframe.default_window(),
            today,
        );

        Some(DashboardChart {
            id: CHART_ID,
            options: income_expense_chart(&buckets, query.timeframe).to_string(),
        })
    };

    Ok(dashboard_view(transactions, chart.as_ref(), &query).into_response())
}

fn dashboard_view(
    transactions: &[Transaction],
    chart: Option<&DashboardChart>,
    query: &DashboardQuery,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW).into_html();
    let totals = totals(transactions);

    let content = html!(
        (nav_bar)

        div
            id="dashboard-content"
            class="flex flex-col items-center px-2 lg:px-6 lg:py-8 mx-auto
                max-w-screen-xl text-gray-900 dark:text-white"
        {
            (summary_cards(&totals))

            (quick_actions())

            (chart_view(chart, query))

            @if transactions.is_empty() {
                div class="w-full mb-4"
                {
                    h3 class="text-xl font-semibold" { "Nothing here yet..." }

                    p
                    {
                        "Transactions will show up here once you add some. You can add "
                        (link(&new_transaction_url(TransactionKind::Income), "income"))
                        " or "
                        (link(&new_transaction_url(TransactionKind::Expense), "an expense"))
                        "."
                    }
                }
            } @else {
                (transaction_list_view(transactions, query))
            }

            (data_controls(!transactions.is_empty()))
        }
    );

    let scripts = match chart {
        Some(chart) => vec![
            HeadElement::ScriptLink("/static/echarts.6.0.0.min.js".to_owned()),
            charts_script(std::slice::from_ref(chart)),
        ],
        None => Vec::new(),
    };

    base("Dashboard", &scripts, &content)
}

fn new_transaction_url(kind: TransactionKind) -> String {
    format!("{}?kind={kind}", endpoints::NEW_TRANSACTION_VIEW)
}

fn quick_actions() -> Markup {
    html!(
        div class="flex gap-4 w-full mb-4"
        {
            a
                href=(new_transaction_url(TransactionKind::Income))
                class="flex-1 px-4 py-2 text-center text-white rounded
                    bg-green-600 hover:bg-green-700"
            {
                "Add Income"
            }

            a
                href=(new_transaction_url(TransactionKind::Expense))
                class="flex-1 px-4 py-2 text-center text-white rounded
                    bg-red-600 hover:bg-red-700"
            {
                "Add Expense"
            }
        }
    )
}

/// The export and reset controls.
///
/// The export link is replaced by a disabled button when there is nothing to
/// export.
fn data_controls(has_transactions: bool) -> Markup {
    html!(
        section
            id="data-controls"
            class="flex flex-wrap gap-6 items-center w-full mb-8"
        {
            @if has_transactions {
                a
                    id="export-link"
                    href=(endpoints::EXPORT)
                    download
                    class=(LINK_STYLE)
                {
                    "Export to CSV"
                }
            } @else {
                button
                    id="export-link"
                    type="button"
                    disabled
                    title="No transactions to export"
                    class="text-gray-400 dark:text-gray-500 cursor-not-allowed"
                {
                    "Export to CSV"
                }
            }

            button
                id="reset-button"
                hx-post=(endpoints::RESET)
                hx-confirm="Are you sure you want to delete all transactions and restore the \
                    default categories? This cannot be undone."
                hx-target-error="#alert-container"
                class=(BUTTON_DELETE_STYLE)
            {
                "Reset All Data"
            }
        }
    )
}
