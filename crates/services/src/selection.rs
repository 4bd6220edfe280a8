//! Selection store: which products the user has picked.
//!
//! Membership is the only "selected" signal. Entries keep the order they
//! were inserted in so chips stay put while the user keeps picking.

use shared::catalog::{Product, ProductId};
use std::collections::HashMap;

/// What a toggle did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Selected,
    Deselected,
    /// The id was neither selected nor in the displayed list
    Unresolved,
}

#[derive(Debug, Clone, Default)]
pub struct SelectionStore {
    entries: HashMap<ProductId, Product>,
    /// Insertion order of `entries`
    order: Vec<ProductId>,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a stored list; a repeated id keeps its first record.
    pub fn from_products(products: impl IntoIterator<Item = Product>) -> Self {
        let mut store = Self::new();
        for product in products {
            store.insert(product);
        }
        store
    }

    fn insert(&mut self, product: Product) -> bool {
        if self.entries.contains_key(&product.id) {
            return false;
        }
        self.order.push(product.id);
        self.entries.insert(product.id, product);
        true
    }

    /// Deselect `id` if selected, otherwise select it using the record from `displayed`.
    pub fn toggle(&mut self, id: ProductId, displayed: &[Product]) -> ToggleOutcome {
        if self.remove(id) {
            return ToggleOutcome::Deselected;
        }
        match displayed.iter().find(|p| p.id == id) {
            Some(product) => {
                self.insert(product.clone());
                ToggleOutcome::Selected
            }
            None => ToggleOutcome::Unresolved,
        }
    }

    /// Returns whether anything was removed
    pub fn remove(&mut self, id: ProductId) -> bool {
        if self.entries.remove(&id).is_some() {
            self.order.retain(|pid| *pid != id);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Selected products in insertion order
    pub fn snapshot(&self) -> Vec<Product> {
        self.order
            .iter()
            .filter_map(|id| self.entries.get(id))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
