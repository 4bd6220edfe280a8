//! View descriptions derived from the selection and the displayed products.
//!
//! Both functions are pure: the same inputs always give equal views, and the
//! removal action on a chip is plain data, so re-rendering never stacks up
//! handlers.

use services::selection::SelectionStore;
use shared::catalog::{Product, ProductId};

pub const EMPTY_SELECTION_PLACEHOLDER: &str = "No products selected yet.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChipAction {
    Remove(ProductId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chip {
    pub id: ProductId,
    pub label: String,
    pub image: String,
    pub action: ChipAction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionView {
    Placeholder(&'static str),
    Chips(Vec<Chip>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub id: ProductId,
    pub name: String,
    pub brand: String,
    pub category: String,
    pub selected: bool,
}

pub fn render_selection(selection: &SelectionStore) -> SelectionView {
    if selection.is_empty() {
        return SelectionView::Placeholder(EMPTY_SELECTION_PLACEHOLDER);
    }
    SelectionView::Chips(
        selection
            .snapshot()
            .into_iter()
            .map(|p| Chip {
                id: p.id,
                label: p.label(),
                image: p.image,
                action: ChipAction::Remove(p.id),
            })
            .collect(),
    )
}

/// One card per displayed product, marked selected iff it is in the store.
pub fn reconcile_cards(selection: &SelectionStore, displayed: &[Product]) -> Vec<CardView> {
    displayed
        .iter()
        .map(|p| CardView {
            id: p.id,
            name: p.name.clone(),
            brand: p.brand.clone(),
            category: p.category.clone(),
            selected: selection.contains(p.id),
        })
        .collect()
}
