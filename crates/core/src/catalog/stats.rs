use std::collections::{HashMap, HashSet};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::product::Product;

pub const DEFAULT_LOW_STOCK_THRESHOLD: u32 = 5;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// Catalog-wide figures for the statistics panel. Always computed over the
/// full catalog, never over the filtered view.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogStatistics {
    pub total_products: usize,
    pub total_value: Decimal,
    pub category_count: usize,
    pub low_stock_count: usize,
    pub low_stock_threshold: u32,
    pub per_category: Vec<CategoryCount>,
}

impl CatalogStatistics {
    pub fn compute(products: &[Product], low_stock_threshold: u32) -> Self {
        let total_value = products
            .iter()
            .map(Product::subtotal)
            .fold(Decimal::ZERO, |total, subtotal| total.saturating_add(subtotal));
        let low_stock_count =
            products.iter().filter(|product| product.is_low_stock(low_stock_threshold)).count();

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for product in products {
            *counts.entry(product.category.as_str()).or_default() += 1;
        }
        let per_category = distinct_categories(products)
            .into_iter()
            .map(|category| CategoryCount {
                category: category.to_string(),
                count: counts.get(category).copied().unwrap_or_default(),
            })
            .collect::<Vec<_>>();

        Self {
            total_products: products.len(),
            total_value,
            category_count: per_category.len(),
            low_stock_count,
            low_stock_threshold,
            per_category,
        }
    }

    pub fn count_for(&self, category: &str) -> usize {
        self.per_category
            .iter()
            .find(|entry| entry.category == category)
            .map(|entry| entry.count)
            .unwrap_or_default()
    }
}

/// Distinct category labels in order of first appearance.
pub fn distinct_categories(products: &[Product]) -> Vec<&str> {
    let mut seen = HashSet::new();
    products
        .iter()
        .map(|product| product.category.as_str())
        .filter(|category| seen.insert(*category))
        .collect()
}
