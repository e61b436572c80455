pub mod filter;
pub mod seed;
pub mod stats;
pub mod store;

pub use filter::{CategoryFilter, ALL_CATEGORIES_LABEL};
pub use seed::seed_products;
pub use stats::{CatalogStatistics, CategoryCount, DEFAULT_LOW_STOCK_THRESHOLD};
pub use store::CatalogStore;
