//! Saves the selection as full product records so it survives restarts,
//! even if the catalog changes in the meantime.
//!
//! Storage trouble never reaches the caller: writes that fail are logged and
//! unreadable data loads as an empty selection.

use shared::catalog::Product;
use std::sync::Arc;

use crate::kv_store::KeyValueStore;
use crate::selection::SelectionStore;

pub const SELECTION_KEY: &str = "selectedProducts";

#[derive(Clone)]
pub struct SelectionPersistence {
    store: Arc<dyn KeyValueStore>,
}

impl SelectionPersistence {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Write the selection. Returns false when the write failed (already logged).
    pub fn save(&self, selection: &SelectionStore) -> bool {
        let json = match serde_json::to_string(&selection.snapshot()) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!("could not serialize selection: {}", e);
                return false;
            }
        };
        match self.store.set(SELECTION_KEY, &json) {
            Ok(()) => {
                tracing::debug!(count = selection.len(), "selection saved");
                true
            }
            Err(e) => {
                tracing::warn!("selection not saved, it will not survive a restart: {}", e);
                false
            }
        }
    }

    pub fn load(&self) -> Vec<Product> {
        let raw = match self.store.get(SELECTION_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!("could not read saved selection: {}", e);
                return Vec::new();
            }
        };
        match serde_json::from_str::<Vec<Product>>(&raw) {
            Ok(products) => products,
            Err(e) => {
                tracing::warn!("ignoring malformed saved selection: {}", e);
                Vec::new()
            }
        }
    }

    pub fn load_store(&self) -> SelectionStore {
        SelectionStore::from_products(self.load())
    }
}
