//! The category management page.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    Error,
    app_state::LedgerState,
    category::Category,
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_DELETE_STYLE, BUTTON_PRIMARY_STYLE, CATEGORY_BADGE_STYLE, FORM_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE,
        TABLE_ROW_STYLE, base,
    },
    navigation::NavBar,
    transaction::TransactionKind,
};

/// Renders the page listing the income and expense categories with a form to
/// add more.
pub async fn get_categories_page(State(state): State<LedgerState>) -> Result<Response, Error> {
    let ledger = state
        .ledger
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire ledger lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    Ok(categories_view(ledger.categories()).into_response())
}

fn categories_view(categories: &[Category]) -> Markup {
    let nav_bar = NavBar::new(endpoints::CATEGORIES_VIEW).into_html();

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-2xl space-y-8"
            {
                h2 class="text-xl font-bold" { "Categories" }

                (new_category_form())

                (category_section(categories, TransactionKind::Income))
                (category_section(categories, TransactionKind::Expense))
            }
        }
    };

    base("Categories", &[], &content)
}

fn new_category_form() -> Markup {
    html! {
        form
            hx-post=(endpoints::CATEGORIES_API)
            hx-target-error="#alert-container"
            class="flex flex-wrap items-end gap-4"
        {
            div class="flex-1 min-w-48"
            {
                label for="name" class=(FORM_LABEL_STYLE) { "Category Name" }

                input
                    id="name"
                    type="text"
                    name="name"
                    placeholder="Category Name"
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="kind" class=(FORM_LABEL_STYLE) { "Type" }

                select id="kind" name="kind" class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value=(TransactionKind::Expense) selected { "Expense" }
                    option value=(TransactionKind::Income) { "Income" }
                }
            }

            div
            {
                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Add Category" }
            }
        }
    }
}

fn category_section(categories: &[Category], kind: TransactionKind) -> Markup {
    let categories = categories
        .iter()
        .filter(|category| category.kind == kind)
        .collect::<Vec<_>>();

    let (title, empty_message) = match kind {
        TransactionKind::Income => ("Income Categories", "No income categories"),
        TransactionKind::Expense => ("Expense Categories", "No expense categories"),
    };

    html! {
        section id={ (kind) "-categories" }
        {
            h3 class="text-lg font-semibold mb-2" { (title) }

            div class="overflow-x-auto rounded shadow-md"
            {
                table class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Name" }
                            th scope="col" class=(TABLE_CELL_STYLE)
                            {
                                span class="sr-only" { "Actions" }
                            }
                        }
                    }

                    tbody
                    {
                        @for category in &categories {
                            tr class=(TABLE_ROW_STYLE)
                            {
                                td class=(TABLE_CELL_STYLE)
                                {
                                    span class=(CATEGORY_BADGE_STYLE) { (category.name) }
                                }

                                td class=(TABLE_CELL_STYLE)
                                {
                                    button
                                        hx-delete=(format_endpoint(endpoints::DELETE_CATEGORY, &category.id))
                                        hx-confirm={
                                            "Are you sure you want to remove '" (category.name)
                                            "'? Existing transactions keep the category name."
                                        }
                                        hx-target="closest tr"
                                        hx-target-error="#alert-container"
                                        hx-swap="delete"
                                        class=(BUTTON_DELETE_STYLE)
                                    {
                                        "Delete"
                                    }
                                }
                            }
                        }

                        @if categories.is_empty() {
                            tr class=(TABLE_ROW_STYLE)
                            {
                                td colspan="2" class="px-6 py-4 text-center" { (empty_message) }
                            }
                        }
                    }
                }
            }
        }
    }
}
