//! One user session: owns every piece of mutable state and the collaborators
//! it talks to.
//!
//! Selection changes always save first and re-render second. Chat and catalog
//! calls are split into a synchronous begin step and a finish step so the
//! in-flight guard and stale-result checks hold no matter how the awaiting is
//! scheduled; the async helpers just run both back to back.

use providers::catalog::{CatalogError, CatalogProvider};
use providers::completion::CompletionClient;
use services::persistence::SelectionPersistence;
use services::selection::{SelectionStore, ToggleOutcome};
use shared::catalog::{categories, Product, ProductId};
use std::sync::Arc;
use std::time::Instant;

use crate::conversation::{ChatError, ChatPipeline, OutboundRequest};
use crate::display::{DisplayTicket, DisplayedSet};
use crate::projector::{reconcile_cards, render_selection, CardView, SelectionView};
use crate::routine::{build_routine_request, EMPTY_SELECTION_ADVICE};
use crate::tooltip::{Rect, Size, TooltipState, VisibleTooltip};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutineOutcome {
    /// Nothing selected; an advisory message was added instead
    Advised,
    Requested,
}

pub struct Session {
    catalog: Arc<dyn CatalogProvider>,
    completion: Arc<dyn CompletionClient>,
    persistence: SelectionPersistence,
    selection: SelectionStore,
    display: DisplayedSet,
    selection_view: SelectionView,
    cards: Vec<CardView>,
    tooltip: TooltipState,
    chat: ChatPipeline,
}

impl Session {
    pub fn new(
        catalog: Arc<dyn CatalogProvider>,
        completion: Arc<dyn CompletionClient>,
        persistence: SelectionPersistence,
        system_prompt: &str,
    ) -> Self {
        let selection = persistence.load_store();
        tracing::info!(count = selection.len(), "restored selection");
        let mut session = Self {
            catalog,
            completion,
            persistence,
            selection,
            display: DisplayedSet::default(),
            selection_view: SelectionView::Placeholder(""),
            cards: Vec::new(),
            tooltip: TooltipState::default(),
            chat: ChatPipeline::new(system_prompt),
        };
        session.render();
        session
    }

    pub fn selection(&self) -> &SelectionStore {
        &self.selection
    }

    pub fn selection_view(&self) -> &SelectionView {
        &self.selection_view
    }

    pub fn cards(&self) -> &[CardView] {
        &self.cards
    }

    pub fn displayed(&self) -> &DisplayedSet {
        &self.display
    }

    pub fn chat(&self) -> &ChatPipeline {
        &self.chat
    }

    pub fn tooltip(&self) -> Option<&VisibleTooltip> {
        self.tooltip.visible()
    }

    fn render(&mut self) {
        self.selection_view = render_selection(&self.selection);
        self.cards = reconcile_cards(&self.selection, self.display.products());
    }

    fn selection_changed(&mut self) {
        // a failed save is logged inside; the view still has to follow the store
        self.persistence.save(&self.selection);
        self.render();
    }

    // ── Catalog ──────────────────────────────────────────────────────

    pub fn begin_display(&mut self, category: &str) -> DisplayTicket {
        self.display.begin(category)
    }

    /// Apply a finished catalog load. `Ok(false)` means a newer load superseded
    /// it; a superseded load is dropped whether it succeeded or failed.
    pub fn finish_display(
        &mut self,
        ticket: &DisplayTicket,
        result: Result<Vec<Product>, CatalogError>,
    ) -> Result<bool, CatalogError> {
        if !self.display.is_latest(ticket) {
            tracing::debug!(tag = ticket.tag, ok = result.is_ok(), "superseded catalog load dropped");
            return Ok(false);
        }
        if !self.display.apply(ticket, result?) {
            return Ok(false);
        }
        tracing::info!(
            category = %ticket.category,
            shown = self.display.products().len(),
            "catalog displayed"
        );
        self.cards = reconcile_cards(&self.selection, self.display.products());
        Ok(true)
    }

    /// Load the catalog fresh and show `category`.
    pub async fn show_category(&mut self, category: &str) -> Result<bool, CatalogError> {
        let ticket = self.begin_display(category);
        let result = self.catalog.fetch().await;
        let applied = self.finish_display(&ticket, result);
        if let Err(e) = &applied {
            tracing::warn!(source = %self.catalog.source(), "catalog load failed: {}", e);
        }
        applied
    }

    pub async fn list_categories(&self) -> Result<Vec<String>, CatalogError> {
        Ok(categories(&self.catalog.fetch().await?))
    }

    // ── Selection ────────────────────────────────────────────────────

    pub fn toggle(&mut self, id: ProductId) -> ToggleOutcome {
        let outcome = self.selection.toggle(id, self.display.products());
        match outcome {
            ToggleOutcome::Unresolved => {
                tracing::debug!(id, "toggle for a product that is not displayed")
            }
            _ => tracing::info!(id, ?outcome, "selection changed"),
        }
        self.selection_changed();
        outcome
    }

    pub fn remove(&mut self, id: ProductId) -> bool {
        let removed = self.selection.remove(id);
        if removed {
            tracing::info!(id, "removed from selection");
        }
        self.selection_changed();
        removed
    }

    // ── Tooltip ──────────────────────────────────────────────────────

    pub fn hover(
        &mut self,
        id: ProductId,
        card: Rect,
        tooltip: Size,
        viewport: Size,
    ) -> Option<&VisibleTooltip> {
        self.tooltip
            .pointer_enter(id, self.display.products(), card, tooltip, viewport)
    }

    pub fn leave(&mut self, now: Instant) {
        self.tooltip.pointer_leave(now);
    }

    pub fn tick(&mut self, now: Instant) -> bool {
        self.tooltip.tick(now)
    }

    // ── Chat ─────────────────────────────────────────────────────────

    async fn exchange(&mut self, request: OutboundRequest) -> Result<(), ChatError> {
        let result = self.completion.complete(&request.messages).await;
        self.chat.complete(request.seq, result)
    }

    pub async fn send_chat(&mut self, text: &str) -> Result<(), ChatError> {
        let request = self.chat.begin(text)?;
        self.exchange(request).await
    }

    pub async fn generate_routine(&mut self) -> Result<RoutineOutcome, ChatError> {
        if self.selection.is_empty() {
            self.chat.advise(EMPTY_SELECTION_ADVICE)?;
            return Ok(RoutineOutcome::Advised);
        }
        let prompt = build_routine_request(&self.selection.snapshot());
        let request = self.chat.begin(&prompt)?;
        tracing::info!(products = self.selection.len(), "requesting routine");
        self.exchange(request).await?;
        Ok(RoutineOutcome::Requested)
    }
}
