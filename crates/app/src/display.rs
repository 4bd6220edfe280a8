//! The product list currently on screen.
//!
//! Each catalog load gets a ticket with a rising tag; only the result for the
//! newest ticket is applied, older results are dropped.

use shared::catalog::{filter_by_category, Product, ProductId, ALL_CATEGORIES};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayTicket {
    pub tag: u64,
    pub category: String,
}

#[derive(Debug, Clone)]
pub struct DisplayedSet {
    category: String,
    products: Vec<Product>,
    latest_tag: u64,
}

impl Default for DisplayedSet {
    fn default() -> Self {
        Self {
            category: ALL_CATEGORIES.to_string(),
            products: Vec::new(),
            latest_tag: 0,
        }
    }
}

impl DisplayedSet {
    pub fn begin(&mut self, category: &str) -> DisplayTicket {
        self.latest_tag += 1;
        DisplayTicket {
            tag: self.latest_tag,
            category: category.trim().to_string(),
        }
    }

    /// False once a newer load has been started
    pub fn is_latest(&self, ticket: &DisplayTicket) -> bool {
        ticket.tag == self.latest_tag
    }

    /// Show the `ticket` category out of `catalog`. False if a newer load was started.
    pub fn apply(&mut self, ticket: &DisplayTicket, catalog: Vec<Product>) -> bool {
        if !self.is_latest(ticket) {
            tracing::debug!(
                tag = ticket.tag,
                latest = self.latest_tag,
                "discarding stale catalog result"
            );
            return false;
        }
        self.products = filter_by_category(catalog, &ticket.category);
        self.category = ticket.category.clone();
        true
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }
}
