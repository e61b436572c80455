use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::product::ProductId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogEventOutcome {
    Applied,
    Rejected,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEvent {
    pub event_id: String,
    pub event_type: String,
    pub product_id: Option<ProductId>,
    pub outcome: CatalogEventOutcome,
    pub metadata: BTreeMap<String, String>,
    pub occurred_at: DateTime<Utc>,
}

impl CatalogEvent {
    pub fn new(
        event_type: impl Into<String>,
        product_id: Option<ProductId>,
        outcome: CatalogEventOutcome,
    ) -> Self {
        Self {
            event_id: Uuid::new_v4().to_string(),
            event_type: event_type.into(),
            product_id,
            outcome,
            metadata: BTreeMap::new(),
            occurred_at: Utc::now(),
        }
    }

    pub fn applied(event_type: impl Into<String>, product_id: ProductId) -> Self {
        Self::new(event_type, Some(product_id), CatalogEventOutcome::Applied)
    }

    pub fn rejected(event_type: impl Into<String>, product_id: Option<ProductId>) -> Self {
        Self::new(event_type, product_id, CatalogEventOutcome::Rejected)
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

pub trait CatalogEventSink: Send + Sync {
    fn emit(&self, event: CatalogEvent);
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NoopEventSink;

impl CatalogEventSink for NoopEventSink {
    fn emit(&self, _event: CatalogEvent) {}
}

#[derive(Clone, Default)]
pub struct InMemoryEventSink {
    events: Arc<Mutex<Vec<CatalogEvent>>>,
}

impl InMemoryEventSink {
    pub fn events(&self) -> Vec<CatalogEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn event_types(&self) -> Vec<String> {
        self.events().into_iter().map(|event| event.event_type).collect()
    }
}

impl CatalogEventSink for InMemoryEventSink {
    fn emit(&self, event: CatalogEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event),
            Err(poisoned) => poisoned.into_inner().push(event),
        }
    }
}
