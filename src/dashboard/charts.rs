//! Chart generation and rendering for the dashboard.
//!
//! The income and expense chart is generated as JSON configuration for the
//! ECharts library and rendered with a HTML container and the JavaScript that
//! initializes it.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{
        AxisLabel, AxisPointer, AxisPointerType, AxisType, ItemStyle, JsFunction, Tooltip,
        Trigger,
    },
    series::bar,
};
use maud::{Markup, PreEscaped, html};

use crate::{
    dashboard::{
        aggregation::{Bucket, Granularity},
        query::DashboardQuery,
    },
    html::{HeadElement, LINK_STYLE},
};

const INCOME_COLOR: &str = "#4caf50";
const EXPENSE_COLOR: &str = "#f44336";

/// A dashboard chart with its HTML container ID and ECharts configuration.
pub(super) struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Renders the chart section with the timeframe switcher.
///
/// `chart` is `None` when there are no transactions, in which case a prompt is
/// shown instead of the chart.
pub(super) fn chart_view(chart: Option<&DashboardChart>, query: &DashboardQuery) -> Markup {
    html!(
        section
            id="chart"
            class="w-full mx-auto mb-4"
        {
            div class="flex justify-between items-center mb-2"
            {
                h3 class="text-xl font-semibold" { "Income vs Expenses" }

                div class="flex gap-4 text-sm"
                {
                    @for timeframe in [Granularity::Monthly, Granularity::Yearly] {
                        @if timeframe == query.timeframe {
                            span class="font-semibold" { (timeframe_label(timeframe)) }
                        } @else {
                            a
                                href=(query.with_timeframe(timeframe).to_url())
                                class=(LINK_STYLE)
                            {
                                (timeframe_label(timeframe))
                            }
                        }
                    }
                }
            }

            @match chart {
                Some(chart) => {
                    div
                        id=(chart.id)
                        class="min-h-[380px] rounded dark:bg-gray-100"
                    {}
                }
                None => {
                    div
                        id="chart-placeholder"
                        class="flex items-center justify-center min-h-[380px] rounded
                            bg-white dark:bg-gray-800 text-gray-500 dark:text-gray-400"
                    {
                        p { "Add transactions to see your financial chart" }
                    }
                }
            }
        }
    )
}

fn timeframe_label(timeframe: Granularity) -> &'static str {
    match timeframe {
        Granularity::Monthly => "Monthly",
        Granularity::Yearly => "Yearly",
    }
}

/// Generates JavaScript initialization code for dashboard charts.
///
/// Creates scripts that initialize ECharts instances with dark mode support
/// and responsive resizing.
pub(super) fn charts_script(charts: &[DashboardChart]) -> HeadElement {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    const chart = echarts.init(chartDom);
                    const option = {};
                    chart.setOption(option);

                    window.addEventListener('resize', chart.resize);

                    const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
                    const updateTheme = () => {{
                        const isDarkMode = darkModeMediaQuery.matches;
                        chart.setTheme(isDarkMode ? 'dark' : 'default');
                    }}
                    darkModeMediaQuery.addEventListener('change', updateTheme);
                    updateTheme();
                }})();"#,
                chart.id, chart.options
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let wrapped_script = format!(
        "document.addEventListener('DOMContentLoaded', function() {{\n{}\n}});",
        script_content
    );

    HeadElement::ScriptSource(PreEscaped(wrapped_script))
}

/// A bar chart of income and expenses per bucket.
pub(super) fn income_expense_chart(buckets: &[Bucket], granularity: Granularity) -> Chart {
    let labels = buckets
        .iter()
        .map(|bucket| bucket.label.clone())
        .collect::<Vec<_>>();
    let income = buckets.iter().map(|bucket| bucket.income).collect::<Vec<_>>();
    let expenses = buckets
        .iter()
        .map(|bucket| bucket.expense)
        .collect::<Vec<_>>();

    let subtext = match granularity {
        Granularity::Monthly => format!("Last {} months", buckets.len()),
        Granularity::Yearly => format!("Last {} years", buckets.len()),
    };

    Chart::new()
        .title(Title::new().text("Income vs Expenses").subtext(subtext))
        .tooltip(currency_tooltip())
        .legend(Legend::new().right("4%"))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .top(70)
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(
            bar::Bar::new()
                .name("Income")
                .item_style(ItemStyle::new().color(INCOME_COLOR))
                .data(income),
        )
        .series(
            bar::Bar::new()
                .name("Expenses")
                .item_style(ItemStyle::new().color(EXPENSE_COLOR))
                .data(expenses),
        )
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-US', {
              style: 'currency',
              currency: 'USD'
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}

/// Creates a tooltip configuration for currency values
fn currency_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(currency_formatter())
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}
