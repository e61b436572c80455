//! One-shot read commands over a freshly opened catalog.

use serde_json::json;
use stockroom_core::config::AppConfig;
use stockroom_core::{ApplicationError, CatalogError, CatalogStore, CategoryFilter, ProductId};

use crate::commands::{open_store, to_value, CommandResult, ProductView};

pub fn stats(config: &AppConfig) -> CommandResult {
    let store = open_store(config);
    CommandResult::success_with_data("stats", to_value(&store.statistics()))
}

pub fn list(config: &AppConfig, category: Option<&str>) -> CommandResult {
    let mut store = open_store(config);
    if let Some(category) = category {
        store.set_category_filter(category);
    }
    CommandResult::success_with_data("list", list_payload(&store))
}

pub fn categories(config: &AppConfig) -> CommandResult {
    let store = open_store(config);
    CommandResult::success_with_data("categories", categories_payload(&store))
}

pub fn show(config: &AppConfig, id: u64) -> CommandResult {
    let store = open_store(config);
    match store.get(ProductId(id)) {
        Some(product) => CommandResult::success_with_data(
            "show",
            to_value(&ProductView::new(product, store.low_stock_threshold())),
        ),
        None => {
            let interface = ApplicationError::from(CatalogError::NotFound(ProductId(id)))
                .into_interface("show");
            CommandResult::failure("show", interface.error_class(), interface.to_string(), 4)
        }
    }
}

pub(crate) fn list_payload(store: &CatalogStore) -> serde_json::Value {
    let threshold = store.low_stock_threshold();
    let products = store
        .filtered()
        .into_iter()
        .map(|product| ProductView::new(product, threshold))
        .collect::<Vec<_>>();

    json!({
        "filter": store.category_filter().label(),
        "count": products.len(),
        "products": to_value(&products),
    })
}

/// Filter-bar entries: each category with the number of products it would show.
pub(crate) fn categories_payload(store: &CatalogStore) -> serde_json::Value {
    let entries = store
        .categories()
        .into_iter()
        .map(|category: CategoryFilter| {
            json!({
                "category": category.label(),
                "count": store.count_in(&category),
                "active": &category == store.category_filter(),
            })
        })
        .collect::<Vec<_>>();

    serde_json::Value::Array(entries)
}
