//! Categories for grouping transactions and the page for managing them.

mod create;
mod delete;
mod domain;
mod page;

pub use create::create_category_endpoint;
pub use delete::delete_category_endpoint;
pub use domain::{Category, CategoryId, CategoryName, default_categories};
pub use page::get_categories_page;
