//! Dashboard module
//!
//! Provides the overview page showing the totals, the income and expense chart
//! and the filterable transaction list.

mod aggregation;
mod cards;
mod charts;
mod handlers;
mod query;
mod transaction_list;

pub use aggregation::{Bucket, Granularity, Totals, bucketize, totals};
pub use handlers::get_dashboard_page;
