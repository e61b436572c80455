pub mod catalog;
pub mod config;
pub mod shell;

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use stockroom_core::config::AppConfig;
use stockroom_core::{CatalogStore, Product};

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    error_class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
}

impl CommandResult {
    pub fn success(command: &str, message: impl Into<String>) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: Some(message.into()),
            data: None,
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }

    pub fn success_with_data(command: &str, data: Value) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: None,
            data: Some(data),
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: Some(message.into()),
            data: None,
        };
        Self { exit_code, output: serialize_payload(payload) }
    }
}

fn serialize_payload(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}

/// A product as the card and detail views render it.
#[derive(Debug, Serialize)]
pub struct ProductView<'a> {
    #[serde(flatten)]
    pub product: &'a Product,
    pub subtotal: Decimal,
    pub low_stock: bool,
    pub in_stock: bool,
}

impl<'a> ProductView<'a> {
    pub fn new(product: &'a Product, low_stock_threshold: u32) -> Self {
        Self {
            product,
            subtotal: product.subtotal(),
            low_stock: product.is_low_stock(low_stock_threshold),
            in_stock: product.is_in_stock(),
        }
    }
}

pub fn open_store(config: &AppConfig) -> CatalogStore {
    CatalogStore::from_settings(&config.catalog)
}

pub(crate) fn to_value<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value)
        .unwrap_or_else(|error| Value::String(format!("serialization failed: {error}")))
}
