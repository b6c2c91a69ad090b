//! The query string of the dashboard page.

use serde::{Deserialize, Serialize};

use crate::{
    dashboard::aggregation::Granularity,
    endpoints,
    transaction::{ArrangeOptions, SortDirection, SortField, TypeFilter},
};

/// The list filters, list sort and chart timeframe chosen on the dashboard.
///
/// Missing parameters take their default value, so `/dashboard` shows every
/// transaction newest first with a monthly chart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardQuery {
    /// Which kinds of transaction to list.
    #[serde(rename = "type")]
    pub type_filter: TypeFilter,
    /// Only list transactions with this category name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// The column to sort the list by.
    pub sort: SortField,
    /// The direction to sort the list in.
    pub direction: SortDirection,
    /// The width of the chart buckets.
    pub timeframe: Granularity,
}

impl DashboardQuery {
    /// The filter and sort criteria for the transaction list.
    ///
    /// An empty category, e.g. from the "All Categories" option, means no
    /// category filter.
    pub fn arrange_options(&self) -> ArrangeOptions {
        ArrangeOptions {
            type_filter: self.type_filter,
            category: self.category.clone().filter(|category| !category.is_empty()),
            sort_field: self.sort,
            sort_direction: self.direction,
        }
    }

    /// The query after clicking the list header for `field`.
    pub fn with_sort(&self, field: SortField) -> Self {
        let (sort, direction) = self.arrange_options().toggle_sort(field);

        Self {
            sort,
            direction,
            ..self.clone()
        }
    }

    /// The query with the chart switched to `timeframe`.
    pub fn with_timeframe(&self, timeframe: Granularity) -> Self {
        Self {
            timeframe,
            ..self.clone()
        }
    }

    /// The dashboard URL for this query.
    ///
    /// Falls back to the plain dashboard URL if the query cannot be encoded.
    pub fn to_url(&self) -> String {
        match serde_urlencoded::to_string(self) {
            Ok(query) => format!("{}?{query}", endpoints::DASHBOARD_VIEW),
            Err(error) => {
                tracing::error!("Could not encode dashboard query {self:?}: {error}");
                endpoints::DASHBOARD_VIEW.to_owned()
            }
        }
    }
}
