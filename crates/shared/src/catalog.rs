//! Product records and catalog filtering.

use serde::{Deserialize, Serialize};

pub type ProductId = u64;

/// Category value that matches every product
pub const ALL_CATEGORIES: &str = "all";

/// A single catalog entry. Never mutated after load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub brand: String,
    pub category: String,
    /// Image URL
    pub image: String,
    pub description: String,
}

impl Product {
    /// Short label used on chips and in logs
    pub fn label(&self) -> String {
        format!("{} {}", self.brand, self.name)
    }
}

/// Document shape returned by catalog sources
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogDocument {
    pub products: Vec<Product>,
}

/// Keep products in `category` (case-insensitive); `"all"` or blank keeps everything.
pub fn filter_by_category(products: Vec<Product>, category: &str) -> Vec<Product> {
    let wanted = category.trim();
    if wanted.is_empty() || wanted.eq_ignore_ascii_case(ALL_CATEGORIES) {
        return products;
    }
    products
        .into_iter()
        .filter(|p| p.category.eq_ignore_ascii_case(wanted))
        .collect()
}

/// Distinct categories, sorted case-insensitively
pub fn categories(products: &[Product]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for p in products {
        if !out.iter().any(|c| c.eq_ignore_ascii_case(&p.category)) {
            out.push(p.category.clone());
        }
    }
    out.sort_by_key(|c| c.to_lowercase());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: ProductId, category: &str) -> Product {
        Product {
            id,
            name: format!("Product {}", id),
            brand: "Brand".to_string(),
            category: category.to_string(),
            image: format!("https://img.test/{}.png", id),
            description: "desc".to_string(),
        }
    }

    #[test]
    fn test_filter_all_keeps_everything() {
        let products = vec![product(1, "Cleanser"), product(2, "Serum")];
        assert_eq!(filter_by_category(products.clone(), "All").len(), 2);
        assert_eq!(filter_by_category(products, "  ").len(), 2);
    }

    #[test]
    fn test_filter_by_category_ignores_case() {
        let products = vec![product(1, "Cleanser"), product(2, "Serum"), product(3, "serum")];
        let ids: Vec<ProductId> = filter_by_category(products, "SERUM")
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_categories_are_distinct_and_sorted() {
        let products = vec![
            product(1, "Serum"),
            product(2, "cleanser"),
            product(3, "serum"),
            product(4, "Moisturizer"),
        ];
        assert_eq!(categories(&products), vec!["cleanser", "Moisturizer", "Serum"]);
    }

    #[test]
    fn test_document_parses_catalog_shape() {
        let json = r#"{"products": [{"id": 7, "name": "Gel", "brand": "Acme",
            "category": "Cleanser", "image": "https://img.test/7.png",
            "description": "Gentle gel cleanser"}]}"#;
        let doc: CatalogDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.products.len(), 1);
        assert_eq!(doc.products[0].label(), "Acme Gel");
    }
}
