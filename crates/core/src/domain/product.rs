use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::draft::{FieldError, FieldProblem, ValidationError};

pub const MAX_RATING: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

/// Highest accepted unit price. Keeps `price * u32::MAX` well inside `Decimal` range.
pub const MAX_PRICE: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProductId(pub u64);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub price: Decimal,
    pub quantity: u32,
    pub image: String,
    pub description: String,
    pub specifications: String,
    pub rating: Decimal,
}

/// A validated product that has not been assigned an identifier yet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub category: String,
    pub price: Decimal,
    pub quantity: u32,
    pub image: String,
    pub description: String,
    pub specifications: String,
    pub rating: Decimal,
}

impl NewProduct {
    pub fn with_id(self, id: ProductId) -> Product {
        Product {
            id,
            name: self.name,
            category: self.category,
            price: self.price,
            quantity: self.quantity,
            image: self.image,
            description: self.description,
            specifications: self.specifications,
            rating: self.rating,
        }
    }
}

impl Product {
    /// Inventory value held for this product. Saturates at `Decimal::MAX`.
    pub fn subtotal(&self) -> Decimal {
        self.price.saturating_mul(Decimal::from(self.quantity))
    }

    pub fn is_low_stock(&self, threshold: u32) -> bool {
        self.quantity <= threshold
    }

    pub fn is_in_stock(&self) -> bool {
        self.quantity > 0
    }

    /// Checks the invariants a replacement record must hold before it enters the catalog.
    /// Quantity is unsigned, so only price, rating and the required text fields are checked.
    pub fn check_invariants(&self) -> Result<(), ValidationError> {
        let mut errors = Vec::new();

        let required = [
            ("name", &self.name),
            ("category", &self.category),
            ("image", &self.image),
            ("description", &self.description),
            ("specifications", &self.specifications),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                errors.push(FieldError::new(field, FieldProblem::Missing));
            }
        }
        if self.price < Decimal::ZERO {
            errors.push(FieldError::new("price", FieldProblem::Negative));
        } else if self.price > MAX_PRICE {
            errors.push(FieldError::new("price", FieldProblem::OutOfRange));
        }
        if self.rating < Decimal::ZERO || self.rating > MAX_RATING {
            errors.push(FieldError::new("rating", FieldProblem::OutOfRange));
        }

        ValidationError::from_errors(errors)
    }
}
