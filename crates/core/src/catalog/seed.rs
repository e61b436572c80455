//! Example products a fresh catalog starts with.

use rust_decimal::Decimal;

use crate::domain::product::NewProduct;

struct SeedProduct {
    name: &'static str,
    category: &'static str,
    price_cents: i64,
    quantity: u32,
    image: &'static str,
    description: &'static str,
    specifications: &'static str,
    rating_tenths: i64,
}

const SEED_PRODUCTS: &[SeedProduct] = &[
    SeedProduct {
        name: "Gaming Laptop",
        category: "Electronics",
        price_cents: 129_999,
        quantity: 5,
        image: "https://images.unsplash.com/photo-1603302576837-37561b2e2302?w=400",
        description: "High-performance gaming laptop with RTX graphics",
        specifications: "RTX 4070, 16GB RAM, 1TB SSD, 240Hz display",
        rating_tenths: 48,
    },
    SeedProduct {
        name: "Yoga Mat",
        category: "Fitness",
        price_cents: 3_499,
        quantity: 15,
        image: "https://images.unsplash.com/photo-1599901860904-17e6ed7083a0?w=400",
        description: "Premium non-slip yoga mat with carrying strap",
        specifications: "72\" x 24\", 6mm thickness, 7 colors available",
        rating_tenths: 46,
    },
    SeedProduct {
        name: "Smart Watch",
        category: "Electronics",
        price_cents: 24_999,
        quantity: 8,
        image: "https://images.unsplash.com/photo-1523275335684-37898b6baf30?w=400",
        description: "Advanced smartwatch with health monitoring",
        specifications: "Heart rate, GPS, 7-day battery, Waterproof",
        rating_tenths: 44,
    },
    SeedProduct {
        name: "Standing Desk",
        category: "Office",
        price_cents: 39_999,
        quantity: 3,
        image: "https://images.unsplash.com/photo-1586023492125-27b2c045efd7?w=400",
        description: "Electric height-adjustable standing desk",
        specifications: "60\" x 30\", Memory presets, Cable management",
        rating_tenths: 47,
    },
    SeedProduct {
        name: "Blender",
        category: "Kitchen",
        price_cents: 8_999,
        quantity: 12,
        image: "https://images.unsplash.com/photo-1556909114-f6e7ad7d3136?w=400",
        description: "High-speed professional blender for smoothies",
        specifications: "1500W, 64oz pitcher, 8 pre-programmed settings",
        rating_tenths: 45,
    },
    SeedProduct {
        name: "Camping Tent",
        category: "Outdoor",
        price_cents: 19_999,
        quantity: 6,
        image: "https://images.unsplash.com/photo-1504851149312-7a075b496cc7?w=400",
        description: "4-person waterproof camping tent",
        specifications: "Waterproof 3000mm, 2 doors, 9' x 7' floor",
        rating_tenths: 43,
    },
];

/// Seed products in catalog order. Inserted into an empty store they receive ids 1 through 6.
pub fn seed_products() -> Vec<NewProduct> {
    SEED_PRODUCTS
        .iter()
        .map(|seed| NewProduct {
            name: seed.name.to_string(),
            category: seed.category.to_string(),
            price: Decimal::new(seed.price_cents, 2),
            quantity: seed.quantity,
            image: seed.image.to_string(),
            description: seed.description.to_string(),
            specifications: seed.specifications.to_string(),
            rating: Decimal::new(seed.rating_tenths, 1),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rust_decimal::Decimal;

    use super::seed_products;

    #[test]
    fn seed_spans_five_categories_with_two_electronics() {
        let products = seed_products();
        assert_eq!(products.len(), 6);

        let categories =
            products.iter().map(|product| product.category.as_str()).collect::<HashSet<_>>();
        assert_eq!(categories.len(), 5);
        assert_eq!(products.iter().filter(|product| product.category == "Electronics").count(), 2);
    }

    #[test]
    fn seed_values_satisfy_product_invariants() {
        for product in seed_products() {
            assert!(product.price >= Decimal::ZERO, "{} has a negative price", product.name);
            assert!(
                product.rating >= Decimal::ZERO && product.rating <= Decimal::new(5, 0),
                "{} has an out of range rating",
                product.name
            );
        }
    }

    #[test]
    fn laptop_price_is_exact() {
        let laptop = &seed_products()[0];
        assert_eq!(laptop.name, "Gaming Laptop");
        assert_eq!(laptop.price.to_string(), "1299.99");
    }
}
