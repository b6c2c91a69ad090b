//! Summary cards showing total income, expenses and the balance.

use maud::{Markup, html};

use crate::{dashboard::aggregation::Totals, html::format_currency};

const INCOME_TEXT_STYLE: &str = "text-green-600 dark:text-green-400";
const EXPENSE_TEXT_STYLE: &str = "text-red-600 dark:text-red-400";

/// Renders one card per total.
///
/// The balance uses the income color when it is zero or more and the expense
/// color when it is negative.
pub(super) fn summary_cards(totals: &Totals) -> Markup {
    let balance_style = if totals.balance < 0.0 {
        EXPENSE_TEXT_STYLE
    } else {
        INCOME_TEXT_STYLE
    };

    html!(
        section
            id="summary"
            class="grid grid-cols-1 sm:grid-cols-3 gap-4 w-full mb-4"
        {
            (summary_card("total-income", "Total Income", totals.income, INCOME_TEXT_STYLE))
            (summary_card("total-expenses", "Total Expenses", totals.expense, EXPENSE_TEXT_STYLE))
            (summary_card("balance", "Balance", totals.balance, balance_style))
        }
    )
}

fn summary_card(id: &str, title: &str, amount: f64, amount_style: &str) -> Markup {
    html!(
        div
            id=(id)
            class="p-4 rounded-lg shadow-md bg-white dark:bg-gray-800"
        {
            h4 class="text-sm text-gray-600 dark:text-gray-400" { (title) }
            p class={"text-2xl font-bold " (amount_style)} { (format_currency(amount)) }
        }
    )
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use crate::dashboard::aggregation::Totals;

    use super::summary_cards;

    fn card_amount(html: &Html, id: &str) -> String {
        let selector = Selector::parse(&format!("#{id} p")).unwrap();
        html.select(&selector)
            .next()
            .unwrap_or_else(|| panic!("No card with id {id}"))
            .text()
            .collect::<String>()
    }

    #[test]
    fn shows_each_total() {
        let totals = Totals {
            income: 50.0,
            expense: 12.3,
            balance: 37.7,
        };

        let html = Html::parse_fragment(&summary_cards(&totals).into_string());

        assert_eq!(card_amount(&html, "total-income"), "50.00");
        assert_eq!(card_amount(&html, "total-expenses"), "12.30");
        assert_eq!(card_amount(&html, "balance"), "37.70");
    }

    #[test]
    fn negative_balance_uses_expense_color() {
        let totals = Totals {
            income: 0.0,
            expense: 10.0,
            balance: -10.0,
        };

        let html = Html::parse_fragment(&summary_cards(&totals).into_string());

        let balance = html
            .select(&Selector::parse("#balance p").unwrap())
            .next()
            .unwrap();
        assert!(
            balance
                .value()
                .attr("class")
                .unwrap_or_default()
                .contains("text-red-600")
        );
    }
}
