pub mod draft;
pub mod product;
