//! Place data - categories, items, and pagination.

mod category;
mod item;
mod page;

pub use category::Category;
pub use item::{Coordinates, Item};
pub use page::{Page, PageMove, PageWindow};
