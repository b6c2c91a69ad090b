//! The filterable, sortable list of transactions on the dashboard.

use maud::{Markup, html};
use unicode_segmentation::UnicodeSegmentation;

use crate::{
    dashboard::query::DashboardQuery,
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_DELETE_STYLE, CATEGORY_BADGE_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
        LINK_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, format_currency,
    },
    transaction::{
        ArrangeOptions, SortDirection, SortField, Transaction, TransactionKind, TypeFilter,
        arrange, distinct_categories,
    },
};

/// The max number of graphemes to display in the notes column before
/// truncating and displaying ellipses.
const MAX_NOTES_GRAPHEMES: usize = 32;

const EMPTY_MESSAGE: &str = "No transactions found matching your filters.";

fn amount_class(kind: TransactionKind) -> &'static str {
    match kind {
        TransactionKind::Income => "text-green-700 dark:text-green-300",
        TransactionKind::Expense => "text-red-700 dark:text-red-300",
    }
}

/// Renders the filter controls, the summary line and the table of
/// `transactions` arranged according to `query`.
pub(super) fn transaction_list_view(transactions: &[Transaction], query: &DashboardQuery) -> Markup {
    let options = query.arrange_options();
    let arranged = arrange(transactions, &options);
    let categories = distinct_categories(transactions);
    let summary = summary_text(arranged.len(), transactions.len(), &options);

    html!(
        section
            id="transactions"
            class="w-full mb-4"
        {
            h3 class="text-xl font-semibold mb-4" { "Transactions" }

            (filter_form(&categories, query))

            p id="transaction-summary" class="text-sm text-gray-600 dark:text-gray-400 mb-2"
            {
                (summary)
            }

            div class="overflow-x-auto rounded shadow-md"
            {
                table class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            @for (field, title) in [
                                (SortField::Date, "Date"),
                                (SortField::Type, "Type"),
                                (SortField::Category, "Category"),
                                (SortField::Amount, "Amount"),
                            ] {
                                th scope="col" class=(TABLE_CELL_STYLE)
                                {
                                    (sort_header(field, title, query))
                                }
                            }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Notes" }
                            th scope="col" class=(TABLE_CELL_STYLE)
                            {
                                span class="sr-only" { "Actions" }
                            }
                        }
                    }

                    tbody
                    {
                        @for transaction in &arranged {
                            (transaction_row(transaction))
                        }

                        @if arranged.is_empty() {
                            tr class=(TABLE_ROW_STYLE)
                            {
                                td
                                    id="transactions-empty"
                                    colspan="6"
                                    class="px-6 py-4 text-center"
                                {
                                    (EMPTY_MESSAGE)
                                }
                            }
                        }
                    }
                }
            }
        }
    )
}

/// The line above the table, e.g. "Showing 2 of 5 transactions (expense only) in Food".
fn summary_text(shown: usize, total: usize, options: &ArrangeOptions) -> String {
    let mut summary = format!("Showing {shown} of {total} transactions");

    match options.type_filter {
        TypeFilter::All => {}
        TypeFilter::Income => summary.push_str(" (income only)"),
        TypeFilter::Expense => summary.push_str(" (expense only)"),
    }

    if let Some(category) = &options.category {
        summary.push_str(" in ");
        summary.push_str(category);
    }

    summary
}

fn filter_form(categories: &[&str], query: &DashboardQuery) -> Markup {
    let selected_category = query.category.as_deref().unwrap_or_default();

    html!(
        form
            method="get"
            action=(endpoints::DASHBOARD_VIEW)
            class="flex flex-wrap items-end gap-4 mb-4"
        {
            input type="hidden" name="sort" value=(query.sort.as_str());
            input type="hidden" name="direction" value=(query.direction.as_str());
            input type="hidden" name="timeframe" value=(query.timeframe.as_str());

            div
            {
                label for="type-filter" class=(FORM_LABEL_STYLE) { "Type" }
                select
                    id="type-filter"
                    name="type"
                    onchange="this.form.submit()"
                    class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for (filter, title) in [
                        (TypeFilter::All, "All"),
                        (TypeFilter::Income, "Income"),
                        (TypeFilter::Expense, "Expense"),
                    ] {
                        option value=(filter.as_str()) selected[filter == query.type_filter] { (title) }
                    }
                }
            }

            div
            {
                label for="category-filter" class=(FORM_LABEL_STYLE) { "Category" }
                select
                    id="category-filter"
                    name="category"
                    onchange="this.form.submit()"
                    class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value="" selected[selected_category.is_empty()] { "All Categories" }

                    @for category in categories {
                        option value=(category) selected[*category == selected_category] { (category) }
                    }
                }
            }

            noscript
            {
                button type="submit" class=(LINK_STYLE) { "Apply" }
            }
        }
    )
}

fn sort_header(field: SortField, title: &str, query: &DashboardQuery) -> Markup {
    let indicator = if field == query.sort {
        match query.direction {
            SortDirection::Asc => " ▲",
            SortDirection::Desc => " ▼",
        }
    } else {
        ""
    };

    html!(
        a href=(query.with_sort(field).to_url()) class="hover:underline"
        {
            (title) (indicator)
        }
    )
}

fn transaction_row(transaction: &Transaction) -> Markup {
    let (notes, tooltip) = format_notes(&transaction.notes);
    let confirm_message = format!(
        "Are you sure you want to delete this {} of {}? This cannot be undone.",
        transaction.kind,
        format_currency(transaction.amount)
    );

    html!(
        tr class=(TABLE_ROW_STYLE) data-transaction-row="true"
        {
            td class=(TABLE_CELL_STYLE) { time datetime=(transaction.date) { (transaction.date) } }
            td class={ (TABLE_CELL_STYLE) " " (amount_class(transaction.kind)) }
            {
                (transaction.kind.label())
            }
            td class=(TABLE_CELL_STYLE)
            {
                span class=(CATEGORY_BADGE_STYLE) { (transaction.category) }
            }
            td class={ "px-6 py-4 text-right " (amount_class(transaction.kind)) }
            {
                (format_currency(transaction.amount))
            }
            td class=(TABLE_CELL_STYLE) title=[tooltip]
            {
                @if notes.is_empty() {
                    span class="text-gray-400 dark:text-gray-500" { "-" }
                } @else {
                    (notes)
                }
            }
            td class=(TABLE_CELL_STYLE)
            {
                button
                    hx-delete=(format_endpoint(endpoints::DELETE_TRANSACTION, transaction.id))
                    hx-confirm=(confirm_message)
                    hx-target-error="#alert-container"
                    class=(BUTTON_DELETE_STYLE)
                {
                    "Delete"
                }
            }
        }
    )
}

fn format_notes(notes: &str) -> (String, Option<&str>) {
    let notes_length = notes.graphemes(true).count();

    if notes_length <= MAX_NOTES_GRAPHEMES {
        (notes.to_owned(), None)
    } else {
        let truncated: String = notes.graphemes(true).take(MAX_NOTES_GRAPHEMES - 3).collect();
        (truncated + "...", Some(notes))
    }
}
