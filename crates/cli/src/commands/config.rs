use std::env;
use std::fs;
use std::path::Path;

use serde_json::json;
use stockroom_core::config::{resolve_config_path, AppConfig};
use toml::Value;

use crate::commands::{to_value, CommandResult};

/// Effective configuration with the source each value came from (env > file > default).
pub fn run(config: &AppConfig) -> CommandResult {
    let config_file_path = resolve_config_path(None);
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());
    let source = |key_path: &str, env_keys: &[&str]| {
        field_source(key_path, env_keys, config_file_doc.as_ref(), config_file_path.as_deref())
    };

    let entries = vec![
        entry(
            "catalog.low_stock_threshold",
            json!(config.catalog.low_stock_threshold),
            source("catalog.low_stock_threshold", &["STOCKROOM_CATALOG_LOW_STOCK_THRESHOLD"]),
        ),
        entry(
            "catalog.load_seed",
            json!(config.catalog.load_seed),
            source("catalog.load_seed", &["STOCKROOM_CATALOG_LOAD_SEED"]),
        ),
        entry(
            "logging.level",
            json!(config.logging.level),
            source("logging.level", &["STOCKROOM_LOGGING_LEVEL", "STOCKROOM_LOG_LEVEL"]),
        ),
        entry(
            "logging.format",
            to_value(&config.logging.format),
            source("logging.format", &["STOCKROOM_LOGGING_FORMAT", "STOCKROOM_LOG_FORMAT"]),
        ),
    ];

    CommandResult::success_with_data(
        "config",
        json!({
            "config_file": config_file_path.map(|path| path.display().to_string()),
            "values": entries,
        }),
    )
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    env_keys: &[&str],
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    if let Some(env_key) = env_keys.iter().find(|key| env::var_os(key).is_some()) {
        return format!("env ({env_key})");
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn entry(key: &str, value: serde_json::Value, source: String) -> serde_json::Value {
    json!({ "key": key, "value": value, "source": source })
}
