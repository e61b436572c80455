use std::fmt;
use std::sync::Arc;

use crate::audit::{CatalogEvent, CatalogEventSink, NoopEventSink};
use crate::catalog::filter::CategoryFilter;
use crate::catalog::seed::seed_products;
use crate::catalog::stats::{distinct_categories, CatalogStatistics};
use crate::config::CatalogSettings;
use crate::domain::draft::{FieldProblem, ProductDraft, ValidationError};
use crate::domain::product::{NewProduct, Product, ProductId};
use crate::errors::CatalogError;

/// Owns the product collection and the view state derived from it.
///
/// Products keep insertion order. Identifiers come from a counter that only
/// moves forward, so an id freed by a delete is never handed out again.
/// The selection is held as an id and resolved against the live collection on
/// every read; a deleted product can never be returned as selected.
pub struct CatalogStore {
    products: Vec<Product>,
    next_id: u64,
    filter: CategoryFilter,
    selection: Option<ProductId>,
    low_stock_threshold: u32,
    sink: Arc<dyn CatalogEventSink>,
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new(&CatalogSettings::default())
    }
}

impl fmt::Debug for CatalogStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogStore")
            .field("products", &self.products.len())
            .field("next_id", &self.next_id)
            .field("filter", &self.filter)
            .field("selection", &self.selection)
            .field("low_stock_threshold", &self.low_stock_threshold)
            .finish()
    }
}

impl CatalogStore {
    /// An empty catalog.
    pub fn new(settings: &CatalogSettings) -> Self {
        Self {
            products: Vec::new(),
            next_id: 1,
            filter: CategoryFilter::All,
            selection: None,
            low_stock_threshold: settings.low_stock_threshold,
            sink: Arc::new(NoopEventSink),
        }
    }

    /// A catalog holding the example products.
    pub fn seeded(settings: &CatalogSettings) -> Self {
        let mut store = Self::new(settings);
        for product in seed_products() {
            store.append(product);
        }
        tracing::debug!(
            event_name = "catalog.seeded",
            product_count = store.products.len(),
            "catalog seeded with example products"
        );
        store
    }

    /// Seeded or empty depending on `settings.load_seed`.
    pub fn from_settings(settings: &CatalogSettings) -> Self {
        if settings.load_seed {
            Self::seeded(settings)
        } else {
            Self::new(settings)
        }
    }

    pub fn with_event_sink(mut self, sink: Arc<dyn CatalogEventSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn low_stock_threshold(&self) -> u32 {
        self.low_stock_threshold
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    /// Parses the draft and appends the resulting product under a fresh id.
    /// A draft that fails validation leaves the catalog untouched.
    pub fn add_product(&mut self, draft: ProductDraft) -> Result<&Product, CatalogError> {
        let new_product = match draft.parse() {
            Ok(new_product) => new_product,
            Err(error) => {
                tracing::warn!(
                    event_name = "catalog.product_add_rejected",
                    error = %error,
                    "product draft failed validation"
                );
                self.sink.emit(
                    CatalogEvent::rejected("catalog.product_added", None)
                        .with_metadata("error", error.to_string()),
                );
                return Err(error.into());
            }
        };

        Ok(self.insert(new_product))
    }

    /// Appends an already validated product under a fresh id.
    pub fn insert(&mut self, product: NewProduct) -> &Product {
        let index = self.append(product);
        let product = &self.products[index];

        tracing::info!(
            event_name = "catalog.product_added",
            product_id = %product.id,
            category = %product.category,
            "product added to catalog"
        );
        self.sink.emit(
            CatalogEvent::applied("catalog.product_added", product.id)
                .with_metadata("name", product.name.clone())
                .with_metadata("category", product.category.clone()),
        );

        product
    }

    /// Applies a signed adjustment and returns the new quantity. The result is
    /// clamped at zero, so large negative deltas empty the stock rather than fail.
    pub fn update_quantity(&mut self, id: ProductId, delta: i64) -> Result<u32, CatalogError> {
        let Some(index) = self.position(id) else {
            return Err(self.not_found("catalog.quantity_adjusted", id));
        };

        let product = &mut self.products[index];
        let previous = product.quantity;
        product.quantity = adjusted_quantity(previous, delta);
        let quantity = product.quantity;

        tracing::debug!(
            event_name = "catalog.quantity_adjusted",
            product_id = %id,
            delta,
            from = previous,
            to = quantity,
            "product quantity adjusted"
        );
        self.sink.emit(
            CatalogEvent::applied("catalog.quantity_adjusted", id)
                .with_metadata("delta", delta.to_string())
                .with_metadata("from", previous.to_string())
                .with_metadata("to", quantity.to_string()),
        );

        Ok(quantity)
    }

    /// Takes one unit out of stock, as a sale does. Fails without changing
    /// anything when the product has nothing left.
    pub fn sell_one(&mut self, id: ProductId) -> Result<u32, CatalogError> {
        let Some(index) = self.position(id) else {
            return Err(self.not_found("catalog.unit_sold", id));
        };

        let product = &mut self.products[index];
        if !product.is_in_stock() {
            tracing::info!(
                event_name = "catalog.unit_sold",
                product_id = %id,
                "sale rejected: product is out of stock"
            );
            self.sink.emit(CatalogEvent::rejected("catalog.unit_sold", Some(id)));
            return Err(CatalogError::OutOfStock(id));
        }

        product.quantity -= 1;
        let quantity = product.quantity;
        self.sink.emit(
            CatalogEvent::applied("catalog.unit_sold", id)
                .with_metadata("remaining", quantity.to_string()),
        );

        Ok(quantity)
    }

    /// Replaces the product carrying `updated.id` wholesale and clears the selection.
    pub fn edit_product(&mut self, updated: Product) -> Result<(), CatalogError> {
        let id = updated.id;
        let Some(index) = self.position(id) else {
            return Err(self.not_found("catalog.product_edited", id));
        };

        if let Err(error) = updated.check_invariants() {
            self.sink.emit(
                CatalogEvent::rejected("catalog.product_edited", Some(id))
                    .with_metadata("error", error.to_string()),
            );
            return Err(error.into());
        }

        self.products[index] = updated;
        self.selection = None;

        tracing::info!(event_name = "catalog.product_edited", product_id = %id, "product replaced");
        self.sink.emit(CatalogEvent::applied("catalog.product_edited", id));

        Ok(())
    }

    /// Changes only the name. Surrounding whitespace is dropped and a blank name is rejected.
    pub fn rename_product(&mut self, id: ProductId, name: &str) -> Result<(), CatalogError> {
        let name = name.trim();
        if name.is_empty() {
            let error = ValidationError::single("name", FieldProblem::Missing);
            self.sink.emit(
                CatalogEvent::rejected("catalog.product_edited", Some(id))
                    .with_metadata("error", error.to_string()),
            );
            return Err(error.into());
        }

        let Some(product) = self.get(id) else {
            return Err(self.not_found("catalog.product_edited", id));
        };

        let renamed = Product { name: name.to_string(), ..product.clone() };
        self.edit_product(renamed)
    }

    /// Removes and returns the product. If it was the selected one the selection empties;
    /// a selection pointing at another product is kept.
    pub fn delete_product(&mut self, id: ProductId) -> Result<Product, CatalogError> {
        let Some(index) = self.position(id) else {
            return Err(self.not_found("catalog.product_deleted", id));
        };

        let removed = self.products.remove(index);
        if self.selection == Some(id) {
            self.selection = None;
        }

        tracing::info!(
            event_name = "catalog.product_deleted",
            product_id = %id,
            remaining = self.products.len(),
            "product removed from catalog"
        );
        self.sink.emit(
            CatalogEvent::applied("catalog.product_deleted", id)
                .with_metadata("name", removed.name.clone()),
        );

        Ok(removed)
    }

    /// Labels are not checked against the catalog; an unknown label just filters everything out.
    pub fn set_category_filter(&mut self, filter: impl Into<CategoryFilter>) {
        self.filter = filter.into();
        tracing::debug!(
            event_name = "catalog.filter_changed",
            filter = %self.filter,
            "category filter changed"
        );
    }

    pub fn category_filter(&self) -> &CategoryFilter {
        &self.filter
    }

    pub fn filtered(&self) -> Vec<&Product> {
        self.products.iter().filter(|product| self.filter.matches(product)).collect()
    }

    /// Number of products a given filter would show.
    pub fn count_in(&self, filter: &CategoryFilter) -> usize {
        self.products.iter().filter(|product| filter.matches(product)).count()
    }

    pub fn select_product(&mut self, id: ProductId) -> Result<&Product, CatalogError> {
        let Some(index) = self.position(id) else {
            return Err(CatalogError::NotFound(id));
        };

        self.selection = Some(id);
        Ok(&self.products[index])
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    pub fn selected(&self) -> Option<&Product> {
        self.selection.and_then(|id| self.get(id))
    }

    /// The `All` sentinel followed by every category label in first-seen order.
    pub fn categories(&self) -> Vec<CategoryFilter> {
        std::iter::once(CategoryFilter::All)
            .chain(
                distinct_categories(&self.products)
                    .into_iter()
                    .map(|label| CategoryFilter::Category(label.to_string())),
            )
            .collect()
    }

    pub fn statistics(&self) -> CatalogStatistics {
        CatalogStatistics::compute(&self.products, self.low_stock_threshold)
    }

    fn append(&mut self, product: NewProduct) -> usize {
        let id = ProductId(self.next_id);
        self.next_id += 1;
        self.products.push(product.with_id(id));
        self.products.len() - 1
    }

    fn position(&self, id: ProductId) -> Option<usize> {
        self.products.iter().position(|product| product.id == id)
    }

    fn not_found(&self, event_type: &str, id: ProductId) -> CatalogError {
        tracing::warn!(
            event_name = event_type,
            product_id = %id,
            "operation targeted a product that is not in the catalog"
        );
        self.sink.emit(CatalogEvent::rejected(event_type, Some(id)));
        CatalogError::NotFound(id)
    }
}

fn adjusted_quantity(current: u32, delta: i64) -> u32 {
    let next = i64::from(current).saturating_add(delta).clamp(0, i64::from(u32::MAX));
    u32::try_from(next).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use rust_decimal::Decimal;

    use crate::audit::{CatalogEventOutcome, InMemoryEventSink};
    use crate::catalog::filter::CategoryFilter;
    use crate::config::CatalogSettings;
    use crate::domain::draft::{FieldProblem, ProductDraft};
    use crate::domain::product::{NewProduct, Product, ProductId, MAX_PRICE};
    use crate::errors::CatalogError;

    use super::{adjusted_quantity, CatalogStore};

    fn seeded() -> CatalogStore {
        CatalogStore::seeded(&CatalogSettings::default())
    }

    fn empty() -> CatalogStore {
        CatalogStore::new(&CatalogSettings::default())
    }

    fn draft(name: &str, category: &str, price: &str, quantity: &str) -> ProductDraft {
        ProductDraft {
            name: name.to_string(),
            category: category.to_string(),
            price: price.to_string(),
            quantity: quantity.to_string(),
            image: "https://example.com/item.png".to_string(),
            description: "test item".to_string(),
            specifications: "n/a".to_string(),
            rating: "4.0".to_string(),
        }
    }

    fn new_product(name: &str, category: &str, price: Decimal, quantity: u32) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            category: category.to_string(),
            price,
            quantity,
            image: "https://example.com/item.png".to_string(),
            description: "test item".to_string(),
            specifications: "n/a".to_string(),
            rating: Decimal::new(4, 0),
        }
    }

    fn ids(store: &CatalogStore) -> Vec<u64> {
        store.products().iter().map(|product| product.id.0).collect()
    }

    #[test]
    fn seeded_store_assigns_ids_one_through_six() {
        let store = seeded();
        assert_eq!(ids(&store), vec![1, 2, 3, 4, 5, 6]);
        assert!(store.selected().is_none());
        assert_eq!(store.category_filter(), &CategoryFilter::All);
    }

    #[test]
    fn add_product_appends_with_next_id() {
        let mut store = seeded();
        let added = store.add_product(draft("Desk Lamp", "Office", "19.99", "4")).expect("add");

        assert_eq!(added.id, ProductId(7));
        assert_eq!(added.price, Decimal::new(1999, 2));
        assert_eq!(store.len(), 7);
        assert_eq!(
            store.products().last().map(|product| product.name.as_str()),
            Some("Desk Lamp")
        );
    }

    #[test]
    fn invalid_draft_is_rejected_before_insertion() {
        let mut store = seeded();
        let error = store
            .add_product(draft("Desk Lamp", "Office", "free", "4"))
            .expect_err("non-numeric price should fail");

        assert!(matches!(
            error,
            CatalogError::Validation(ref validation)
                if validation.problem_for("price") == Some(&FieldProblem::NotANumber)
        ));
        assert_eq!(store.len(), 6);
    }

    #[test]
    fn ids_stay_unique_when_the_last_product_is_deleted_and_another_added() {
        let mut store = empty();
        for name in ["a", "b", "c"] {
            store.add_product(draft(name, "Office", "1", "1")).expect("add");
        }
        store.delete_product(ProductId(3)).expect("delete last");
        let added = store.add_product(draft("d", "Office", "1", "1")).expect("add again");

        assert_eq!(added.id, ProductId(4));
        assert_eq!(ids(&store), vec![1, 2, 4]);
    }

    #[test]
    fn ids_stay_unique_across_interleaved_adds_and_deletes() {
        let mut store = seeded();
        for round in 0..20u64 {
            store.add_product(draft("item", "Office", "1", "1")).expect("add");
            if round % 3 == 0 {
                let first = store.products()[0].id;
                store.delete_product(first).expect("delete first");
            }
            if round % 4 == 0 {
                let last = store.products()[store.len() - 1].id;
                store.delete_product(last).expect("delete last");
            }

            let unique = store.products().iter().map(|product| product.id).collect::<HashSet<_>>();
            assert_eq!(unique.len(), store.len(), "duplicate id after round {round}");
        }
    }

    #[test]
    fn update_quantity_clamps_at_zero() {
        let mut store = seeded();
        // Gaming Laptop starts with 5 units.
        assert_eq!(store.update_quantity(ProductId(1), -1000), Ok(0));
        assert_eq!(store.get(ProductId(1)).map(|product| product.quantity), Some(0));

        assert_eq!(store.update_quantity(ProductId(1), -1), Ok(0));
        assert_eq!(store.update_quantity(ProductId(1), 3), Ok(3));
    }

    #[test]
    fn quantity_never_goes_negative_over_arbitrary_deltas() {
        let mut store = seeded();
        let mut expected = 15i64;
        for delta in [-3, 7, -20, 1, i64::MIN, 4, -4, -1, i64::MAX, -2] {
            expected = expected.saturating_add(delta).clamp(0, i64::from(u32::MAX));
            let quantity = store.update_quantity(ProductId(2), delta).expect("product exists");
            assert_eq!(i64::from(quantity), expected, "after delta {delta}");
        }
        assert_eq!(adjusted_quantity(0, i64::MIN), 0);
        assert_eq!(adjusted_quantity(u32::MAX, i64::MAX), u32::MAX);
        assert_eq!(adjusted_quantity(10, -3), 7);
    }

    #[test]
    fn update_quantity_reports_unknown_ids() {
        let mut store = seeded();
        let before = store.products().to_vec();

        assert_eq!(
            store.update_quantity(ProductId(99), 1),
            Err(CatalogError::NotFound(ProductId(99)))
        );
        assert_eq!(store.products(), before.as_slice());
    }

    #[test]
    fn sell_one_decrements_until_out_of_stock() {
        let mut store = empty();
        let id = store.insert(new_product("Mug", "Kitchen", Decimal::new(8, 0), 2)).id;

        assert_eq!(store.sell_one(id), Ok(1));
        assert_eq!(store.sell_one(id), Ok(0));
        assert_eq!(store.sell_one(id), Err(CatalogError::OutOfStock(id)));
        assert_eq!(store.get(id).map(|product| product.quantity), Some(0));
    }

    #[test]
    fn edit_replaces_product_and_clears_selection() {
        let mut store = seeded();
        store.select_product(ProductId(3)).expect("select");

        let mut watch = store.get(ProductId(3)).cloned().expect("seeded watch");
        watch.price = Decimal::new(19999, 2);
        watch.quantity = 20;
        store.edit_product(watch.clone()).expect("edit");

        assert_eq!(store.get(ProductId(3)), Some(&watch));
        assert!(store.selected().is_none());
        assert_eq!(ids(&store), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn edit_rejects_unknown_id_and_out_of_range_rating() {
        let mut store = seeded();
        let mut ghost = store.get(ProductId(1)).cloned().expect("seeded laptop");
        ghost.id = ProductId(77);
        assert_eq!(store.edit_product(ghost), Err(CatalogError::NotFound(ProductId(77))));

        let mut laptop = store.get(ProductId(1)).cloned().expect("seeded laptop");
        laptop.rating = Decimal::new(6, 0);
        assert!(matches!(store.edit_product(laptop), Err(CatalogError::Validation(_))));
        assert_eq!(
            store.get(ProductId(1)).map(|product| product.rating),
            Some(Decimal::new(48, 1))
        );
    }

    #[test]
    fn rename_trims_and_rejects_blank_names() {
        let mut store = seeded();
        store.rename_product(ProductId(5), "  Pro Blender ").expect("rename");
        assert_eq!(
            store.get(ProductId(5)).map(|product| product.name.as_str()),
            Some("Pro Blender")
        );

        assert!(matches!(
            store.rename_product(ProductId(5), "   "),
            Err(CatalogError::Validation(_))
        ));
        assert_eq!(
            store.rename_product(ProductId(50), "Nothing"),
            Err(CatalogError::NotFound(ProductId(50)))
        );
    }

    #[test]
    fn edit_rejects_blanked_text_fields() {
        let mut store = seeded();
        let mut blanked = store.get(ProductId(2)).cloned().expect("seeded product");
        blanked.description = "  ".to_string();
        blanked.image = String::new();

        let Err(CatalogError::Validation(error)) = store.edit_product(blanked) else {
            panic!("blank text fields should be rejected");
        };
        assert_eq!(error.problem_for("description"), Some(&FieldProblem::Missing));
        assert_eq!(error.problem_for("image"), Some(&FieldProblem::Missing));
        assert_eq!(
            store.get(ProductId(2)).map(|product| product.description.as_str()),
            Some("Premium non-slip yoga mat with carrying strap")
        );
    }

    #[test]
    fn oversized_price_is_rejected_before_statistics() {
        let mut store = seeded();
        let result = store
            .add_product(draft("Yacht", "Outdoor", "100000000000000000000", "1000000000"))
            .map(|product| product.id);

        let Err(CatalogError::Validation(error)) = result else {
            panic!("price above the cap should be rejected");
        };
        assert_eq!(error.problem_for("price"), Some(&FieldProblem::OutOfRange));
        assert_eq!(store.len(), 6);
        assert_eq!(store.statistics().total_value, Decimal::new(1_250_451, 2));
    }

    #[test]
    fn statistics_stay_total_at_price_and_quantity_limits() {
        let mut store = seeded();
        let id = store
            .add_product(draft("Yacht", "Outdoor", "1000000000", "4294967295"))
            .expect("max price and quantity are valid")
            .id;
        store.update_quantity(ProductId(1), i64::MAX).expect("adjust");
        store.update_quantity(id, 1).expect("adjust");

        let expected = store.products().iter().map(Product::subtotal).sum::<Decimal>();
        let stats = store.statistics();
        assert_eq!(stats.total_value, expected);
        assert!(stats.total_value > MAX_PRICE * Decimal::from(u32::MAX));

        let mut unbounded = empty();
        unbounded.insert(new_product("Vault", "Office", Decimal::MAX, u32::MAX));
        unbounded.insert(new_product("Vault", "Office", Decimal::MAX, u32::MAX));
        assert_eq!(unbounded.statistics().total_value, Decimal::MAX);
    }

    #[test]
    fn deleting_selected_product_empties_selection() {
        let mut store = seeded();
        store.select_product(ProductId(3)).expect("select");

        let removed = store.delete_product(ProductId(3)).expect("delete");
        assert_eq!(removed.name, "Smart Watch");
        assert!(store.selected().is_none());
        assert!(store.get(ProductId(3)).is_none());
    }

    #[test]
    fn deleting_another_product_keeps_selection() {
        let mut store = seeded();
        store.select_product(ProductId(3)).expect("select");

        store.delete_product(ProductId(4)).expect("delete");
        assert_eq!(store.selected().map(|product| product.id), Some(ProductId(3)));
    }

    #[test]
    fn selection_reflects_live_catalog_state() {
        let mut store = seeded();
        store.select_product(ProductId(2)).expect("select");
        store.update_quantity(ProductId(2), 5).expect("adjust");

        assert_eq!(store.selected().map(|product| product.quantity), Some(20));

        store.clear_selection();
        assert!(store.selected().is_none());
        assert_eq!(
            store.select_product(ProductId(40)).err(),
            Some(CatalogError::NotFound(ProductId(40)))
        );
    }

    #[test]
    fn delete_of_unknown_id_changes_nothing() {
        let mut store = seeded();
        store.select_product(ProductId(1)).expect("select");

        assert_eq!(
            store.delete_product(ProductId(12)),
            Err(CatalogError::NotFound(ProductId(12)))
        );
        assert_eq!(store.len(), 6);
        assert!(store.selected().is_some());
    }

    #[test]
    fn electronics_filter_shows_two_seeded_products() {
        let mut store = seeded();
        store.set_category_filter("Electronics");

        let filtered = store.filtered();
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|product| product.category == "Electronics"));

        store.set_category_filter(CategoryFilter::All);
        assert_eq!(store.filtered().len(), 6);
    }

    #[test]
    fn unknown_filter_label_yields_empty_view() {
        let mut store = seeded();
        store.set_category_filter("Garden");
        assert!(store.filtered().is_empty());
        assert_eq!(store.count_in(&CategoryFilter::from("Garden")), 0);
    }

    #[test]
    fn categories_start_with_all_then_first_seen_order() {
        let store = seeded();
        let labels = store
            .categories()
            .iter()
            .map(|category| category.label().to_string())
            .collect::<Vec<_>>();

        assert_eq!(labels, vec!["All", "Electronics", "Fitness", "Office", "Kitchen", "Outdoor"]);
        assert_eq!(store.count_in(&CategoryFilter::All), 6);
        assert_eq!(store.count_in(&CategoryFilter::from("Electronics")), 2);
    }

    #[test]
    fn statistics_ignore_active_filter() {
        let mut store = seeded();
        let unfiltered = store.statistics();
        store.set_category_filter("Kitchen");

        assert_eq!(store.statistics(), unfiltered);
        assert_eq!(unfiltered.total_products, 6);
        assert_eq!(unfiltered.category_count, 5);
        assert_eq!(unfiltered.count_for("Electronics"), 2);
        // Gaming Laptop (5) and Standing Desk (3) are at or below the threshold.
        assert_eq!(unfiltered.low_stock_count, 2);
    }

    #[test]
    fn seeded_total_value_matches_hand_computed_sum() {
        let store = seeded();
        // 1299.99*5 + 34.99*15 + 249.99*8 + 399.99*3 + 89.99*12 + 199.99*6
        assert_eq!(store.statistics().total_value, Decimal::new(1_250_451, 2));
    }

    #[test]
    fn total_value_for_two_products() {
        let mut store = empty();
        store.insert(new_product("A", "Office", Decimal::new(10, 0), 2));
        store.insert(new_product("B", "Kitchen", Decimal::new(5, 0), 3));

        assert_eq!(store.statistics().total_value, Decimal::new(35, 0));
    }

    #[test]
    fn low_stock_threshold_comes_from_settings() {
        let settings = CatalogSettings { low_stock_threshold: 10, load_seed: true };
        let store = CatalogStore::from_settings(&settings);

        // Laptop 5, Smart Watch 8, Standing Desk 3, Camping Tent 6.
        assert_eq!(store.statistics().low_stock_count, 4);
        assert_eq!(store.low_stock_threshold(), 10);
    }

    #[test]
    fn from_settings_can_start_empty() {
        let settings = CatalogSettings { load_seed: false, ..CatalogSettings::default() };
        let store = CatalogStore::from_settings(&settings);
        assert!(store.is_empty());
        assert_eq!(store.categories(), vec![CategoryFilter::All]);
    }

    #[test]
    fn mutations_are_recorded_in_event_sink() {
        let sink = InMemoryEventSink::default();
        let mut store = seeded().with_event_sink(Arc::new(sink.clone()));

        store.add_product(draft("Lamp", "Office", "12", "2")).expect("add");
        store.update_quantity(ProductId(1), -1).expect("adjust");
        store.delete_product(ProductId(99)).expect_err("unknown id");
        store.rename_product(ProductId(2), "  ").expect_err("blank name");

        assert_eq!(
            sink.event_types(),
            vec![
                "catalog.product_added",
                "catalog.quantity_adjusted",
                "catalog.product_deleted",
                "catalog.product_edited",
            ]
        );
        let events = sink.events();
        assert_eq!(events[2].outcome, CatalogEventOutcome::Rejected);
        assert_eq!(events[3].outcome, CatalogEventOutcome::Rejected);
        assert_eq!(events[3].product_id, Some(ProductId(2)));
        assert_eq!(events[1].metadata.get("to").map(String::as_str), Some("4"));
    }
}
