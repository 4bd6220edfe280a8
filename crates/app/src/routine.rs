//! Prompt for the "generate my routine" action.

use serde::Serialize;
use shared::catalog::{Product, ProductId};

/// Shown instead of calling the service when nothing is selected
pub const EMPTY_SELECTION_ADVICE: &str = "You haven't picked any products yet. \
Select a few products from the catalog and I'll put together a routine for them.";

#[derive(Serialize)]
struct RoutineItem<'a> {
    id: ProductId,
    brand: &'a str,
    name: &'a str,
    category: &'a str,
    image: &'a str,
    description: &'a str,
}

/// User turn asking for a routine built from `products`.
pub fn build_routine_request(products: &[Product]) -> String {
    let items: Vec<RoutineItem> = products
        .iter()
        .map(|p| RoutineItem {
            id: p.id,
            brand: &p.brand,
            name: &p.name,
            category: &p.category,
            image: &p.image,
            description: &p.description,
        })
        .collect();
    let listing = serde_json::to_string_pretty(&items).unwrap_or_else(|_| "[]".to_string());

    format!(
        r#"Here are the products I selected:

```json
{listing}
```

Please build me a daily routine using only these products:
1. Split it into a morning routine and an evening routine.
2. Number the steps in the order they should be applied.
3. For each step say how long to wait before the next one and how often to use it.
4. Warn me about any products or ingredients that should not be combined, and say how to work around it.
5. If one of the products does not belong in a routine, say so instead of forcing it in."#
    )
}
