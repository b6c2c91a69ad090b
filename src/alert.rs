//! Alert system for displaying error messages to users.
//!
//! Alerts are rendered as HTML fragments that htmx swaps into the
//! `#alert-container` element of the base page.

use axum::response::Html;
use maud::{Markup, html};

/// A dismissable error message shown at the bottom of the page.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    /// The headline of the alert.
    pub message: String,
    /// Extra information shown under the headline, e.g. how to fix the problem.
    pub details: String,
}

impl Alert {
    /// Create an alert from borrowed strings.
    pub fn error(message: &str, details: &str) -> Self {
        Self {
            message: message.to_owned(),
            details: details.to_owned(),
        }
    }

    pub fn into_markup(self) -> Markup {
        html! {
            div
                role="alert"
                class="p-4 mb-4 text-sm text-red-800 rounded-lg bg-red-50
                    dark:bg-gray-800 dark:text-red-400 border border-red-300"
                hx-on:click="this.parentElement.classList.add('hidden')"
            {
                div class="flex justify-between items-start gap-4"
                {
                    div
                    {
                        p class="font-medium" { (self.message) }

                        @if !self.details.is_empty() {
                            p class="mt-1" { (self.details) }
                        }
                    }

                    button
                        type="button"
                        aria-label="Dismiss"
                        class="font-bold"
                    {
                        "×"
                    }
                }
            }
        }
    }

    pub fn into_html(self) -> Html<String> {
        Html(self.into_markup().into_string())
    }
}
