//! Raw product input and the parse step that turns it into a [`NewProduct`].
//!
//! A draft carries every field as entered text. Parsing checks presence first,
//! then numeric shape and range, and reports every failing field at once so a
//! form can mark all of them in a single pass.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::product::{NewProduct, MAX_PRICE, MAX_RATING};

pub const DEFAULT_CATEGORY: &str = "Electronics";

/// Category labels offered when creating a product. The catalog accepts any label.
pub const KNOWN_CATEGORIES: &[&str] =
    &["Electronics", "Fitness", "Office", "Kitchen", "Outdoor", "Sports", "Clothing", "Books"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldProblem {
    Missing,
    NotANumber,
    NotAnInteger,
    Negative,
    OutOfRange,
}

impl FieldProblem {
    pub fn message(&self, field: &str) -> String {
        match self {
            Self::Missing => "This field is required".to_string(),
            Self::NotANumber => format!("{} must be a number", capitalize(field)),
            Self::NotAnInteger => format!("{} must be a whole number", capitalize(field)),
            Self::Negative => format!("{} must not be negative", capitalize(field)),
            Self::OutOfRange if field == "rating" => "Rating must be between 0 and 5".to_string(),
            Self::OutOfRange => format!("{} is out of range", capitalize(field)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub problem: FieldProblem,
}

impl FieldError {
    pub fn new(field: &'static str, problem: FieldProblem) -> Self {
        Self { field, problem }
    }

    pub fn message(&self) -> String {
        self.problem.message(self.field)
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq, Serialize)]
#[error("invalid product fields: {}", summarize(.errors))]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    pub fn single(field: &'static str, problem: FieldProblem) -> Self {
        Self { errors: vec![FieldError::new(field, problem)] }
    }

    pub fn from_errors(errors: Vec<FieldError>) -> Result<(), Self> {
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Self { errors })
        }
    }

    pub fn problem_for(&self, field: &str) -> Option<&FieldProblem> {
        self.errors.iter().find(|error| error.field == field).map(|error| &error.problem)
    }
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|error| format!("{} ({:?})", error.field, error.problem))
        .collect::<Vec<_>>()
        .join(", ")
}

fn capitalize(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductDraft {
    pub name: String,
    pub category: String,
    pub price: String,
    pub quantity: String,
    pub image: String,
    pub description: String,
    pub specifications: String,
    pub rating: String,
}

impl Default for ProductDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            category: DEFAULT_CATEGORY.to_string(),
            price: String::new(),
            quantity: String::new(),
            image: String::new(),
            description: String::new(),
            specifications: String::new(),
            rating: String::new(),
        }
    }
}

impl ProductDraft {
    pub fn parse(&self) -> Result<NewProduct, ValidationError> {
        let mut errors = Vec::new();

        for (field, value) in self.fields() {
            if value.trim().is_empty() {
                errors.push(FieldError::new(field, FieldProblem::Missing));
            }
        }

        let price = parse_price(&self.price, &mut errors);
        let quantity = parse_quantity(&self.quantity, &mut errors);
        let rating = parse_rating(&self.rating, &mut errors);

        match (price, quantity, rating) {
            (Some(price), Some(quantity), Some(rating)) if errors.is_empty() => Ok(NewProduct {
                name: self.name.trim().to_string(),
                category: self.category.trim().to_string(),
                price,
                quantity,
                image: self.image.trim().to_string(),
                description: self.description.trim().to_string(),
                specifications: self.specifications.trim().to_string(),
                rating,
            }),
            _ => Err(ValidationError { errors }),
        }
    }

    /// Sets one field by its name. Returns `false` for names that are not draft fields.
    pub fn set_field(&mut self, field: &str, value: impl Into<String>) -> bool {
        let slot = match field {
            "name" => &mut self.name,
            "category" => &mut self.category,
            "price" => &mut self.price,
            "quantity" => &mut self.quantity,
            "image" => &mut self.image,
            "description" => &mut self.description,
            "specifications" => &mut self.specifications,
            "rating" => &mut self.rating,
            _ => return false,
        };
        *slot = value.into();
        true
    }

    fn fields(&self) -> [(&'static str, &str); 8] {
        [
            ("name", self.name.as_str()),
            ("category", self.category.as_str()),
            ("price", self.price.as_str()),
            ("quantity", self.quantity.as_str()),
            ("image", self.image.as_str()),
            ("description", self.description.as_str()),
            ("specifications", self.specifications.as_str()),
            ("rating", self.rating.as_str()),
        ]
    }
}

// Empty numeric fields are already reported as missing; they yield `None` without a second error.

fn parse_price(raw: &str, errors: &mut Vec<FieldError>) -> Option<Decimal> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match Decimal::from_str(raw) {
        Ok(price) if price < Decimal::ZERO => {
            errors.push(FieldError::new("price", FieldProblem::Negative));
            None
        }
        Ok(price) if price > MAX_PRICE => {
            errors.push(FieldError::new("price", FieldProblem::OutOfRange));
            None
        }
        Ok(price) => Some(price),
        Err(_) => {
            errors.push(FieldError::new("price", FieldProblem::NotANumber));
            None
        }
    }
}

fn parse_quantity(raw: &str, errors: &mut Vec<FieldError>) -> Option<u32> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.parse::<i64>() {
        Ok(quantity) if quantity < 0 => {
            errors.push(FieldError::new("quantity", FieldProblem::Negative));
            None
        }
        Ok(quantity) => match u32::try_from(quantity) {
            Ok(quantity) => Some(quantity),
            Err(_) => {
                errors.push(FieldError::new("quantity", FieldProblem::OutOfRange));
                None
            }
        },
        Err(_) => {
            errors.push(FieldError::new("quantity", FieldProblem::NotAnInteger));
            None
        }
    }
}

fn parse_rating(raw: &str, errors: &mut Vec<FieldError>) -> Option<Decimal> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match Decimal::from_str(raw) {
        Ok(rating) if rating < Decimal::ZERO || rating > MAX_RATING => {
            errors.push(FieldError::new("rating", FieldProblem::OutOfRange));
            None
        }
        Ok(rating) => Some(rating),
        Err(_) => {
            errors.push(FieldError::new("rating", FieldProblem::NotANumber));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{FieldProblem, ProductDraft, DEFAULT_CATEGORY};

    fn complete_draft() -> ProductDraft {
        ProductDraft {
            name: "  Trail Shoes ".to_string(),
            category: "Outdoor".to_string(),
            price: "89.50".to_string(),
            quantity: "12".to_string(),
            image: "https://example.com/shoes.png".to_string(),
            description: "Lightweight trail runners".to_string(),
            specifications: "Sizes 6-13".to_string(),
            rating: "4.2".to_string(),
        }
    }

    #[test]
    fn complete_draft_parses_into_typed_product() {
        let product = complete_draft().parse().expect("complete draft should parse");

        assert_eq!(product.name, "Trail Shoes");
        assert_eq!(product.price, Decimal::new(8950, 2));
        assert_eq!(product.quantity, 12);
        assert_eq!(product.rating, Decimal::new(42, 1));
    }

    #[test]
    fn default_draft_preselects_electronics_and_reports_missing_fields() {
        let draft = ProductDraft::default();
        assert_eq!(draft.category, DEFAULT_CATEGORY);

        let error = draft.parse().expect_err("empty draft should fail");
        assert_eq!(error.errors.len(), 7);
        assert!(error.problem_for("category").is_none());
        assert_eq!(error.problem_for("name"), Some(&FieldProblem::Missing));
        assert_eq!(error.problem_for("price"), Some(&FieldProblem::Missing));
    }

    #[test]
    fn whitespace_only_fields_count_as_missing() {
        let mut draft = complete_draft();
        draft.description = "   ".to_string();

        let error = draft.parse().expect_err("blank description should fail");
        assert_eq!(error.problem_for("description"), Some(&FieldProblem::Missing));
    }

    #[test]
    fn non_numeric_values_are_reported_per_field() {
        let mut draft = complete_draft();
        draft.price = "cheap".to_string();
        draft.quantity = "1.5".to_string();
        draft.rating = "great".to_string();

        let error = draft.parse().expect_err("non-numeric fields should fail");
        assert_eq!(error.problem_for("price"), Some(&FieldProblem::NotANumber));
        assert_eq!(error.problem_for("quantity"), Some(&FieldProblem::NotAnInteger));
        assert_eq!(error.problem_for("rating"), Some(&FieldProblem::NotANumber));
    }

    #[test]
    fn negative_quantity_and_price_are_rejected() {
        let mut draft = complete_draft();
        draft.price = "-1".to_string();
        draft.quantity = "-3".to_string();

        let error = draft.parse().expect_err("negative values should fail");
        assert_eq!(error.problem_for("price"), Some(&FieldProblem::Negative));
        assert_eq!(error.problem_for("quantity"), Some(&FieldProblem::Negative));
    }

    #[test]
    fn rating_must_stay_within_zero_and_five() {
        let mut draft = complete_draft();
        draft.rating = "5.1".to_string();
        let error = draft.parse().expect_err("rating above five should fail");
        assert_eq!(error.problem_for("rating"), Some(&FieldProblem::OutOfRange));
        assert_eq!(error.errors[0].message(), "Rating must be between 0 and 5");

        draft.rating = "5".to_string();
        assert!(draft.parse().is_ok());
        draft.rating = "0".to_string();
        assert!(draft.parse().is_ok());
    }

    #[test]
    fn price_above_cap_is_out_of_range() {
        let mut draft = complete_draft();
        draft.price = "100000000000000000000".to_string();
        let error = draft.parse().expect_err("oversized price should fail");
        assert_eq!(error.problem_for("price"), Some(&FieldProblem::OutOfRange));
        assert_eq!(error.errors[0].message(), "Price is out of range");

        draft.price = "1000000000".to_string();
        assert!(draft.parse().is_ok());
    }

    #[test]
    fn set_field_rejects_unknown_names() {
        let mut draft = ProductDraft::default();
        assert!(draft.set_field("price", "10"));
        assert!(!draft.set_field("sku", "X-1"));
        assert_eq!(draft.price, "10");
    }
}
