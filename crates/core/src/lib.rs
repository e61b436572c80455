pub mod audit;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod errors;

pub use audit::{
    CatalogEvent, CatalogEventOutcome, CatalogEventSink, InMemoryEventSink, NoopEventSink,
};
pub use catalog::{CatalogStatistics, CatalogStore, CategoryCount, CategoryFilter};
pub use config::{AppConfig, CatalogSettings, LoadOptions, LogFormat};
pub use domain::draft::{FieldError, FieldProblem, ProductDraft, ValidationError};
pub use domain::product::{NewProduct, Product, ProductId};
pub use errors::{ApplicationError, CatalogError, InterfaceError};
