//! Hover tooltip for product cards.
//!
//! Placement prefers the space above the card and drops below it when the
//! viewport is too short up there. Leaving a card starts a short grace period;
//! hovering again before it runs out keeps the tooltip up without flicker.

use shared::catalog::{Product, ProductId};
use std::time::{Duration, Instant};

pub const HIDE_GRACE: Duration = Duration::from_millis(150);
const VIEWPORT_MARGIN: f32 = 8.0;
const CARD_GAP: f32 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Above,
    Below,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f32,
    pub y: f32,
    pub side: Side,
}

fn clamp_axis(value: f32, extent: f32, viewport: f32) -> f32 {
    let max = (viewport - extent - VIEWPORT_MARGIN).max(VIEWPORT_MARGIN);
    value.clamp(VIEWPORT_MARGIN, max)
}

pub fn place_tooltip(card: Rect, tooltip: Size, viewport: Size) -> Placement {
    let x = clamp_axis(
        card.x + card.width / 2.0 - tooltip.width / 2.0,
        tooltip.width,
        viewport.width,
    );

    let above = card.y - CARD_GAP - tooltip.height;
    let (y, side) = if above >= VIEWPORT_MARGIN {
        (above, Side::Above)
    } else {
        (card.y + card.height + CARD_GAP, Side::Below)
    };

    Placement {
        x,
        y: clamp_axis(y, tooltip.height, viewport.height),
        side,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VisibleTooltip {
    pub product_id: ProductId,
    pub text: String,
    pub placement: Placement,
}

#[derive(Debug, Default)]
pub struct TooltipState {
    visible: Option<VisibleTooltip>,
    hide_at: Option<Instant>,
}

impl TooltipState {
    pub fn visible(&self) -> Option<&VisibleTooltip> {
        self.visible.as_ref()
    }

    /// Pointer entered the card for `id`; `displayed` resolves it to a description.
    pub fn pointer_enter(
        &mut self,
        id: ProductId,
        displayed: &[Product],
        card: Rect,
        tooltip: Size,
        viewport: Size,
    ) -> Option<&VisibleTooltip> {
        self.hide_at = None;
        self.visible = displayed.iter().find(|p| p.id == id).map(|p| VisibleTooltip {
            product_id: id,
            text: p.description.clone(),
            placement: place_tooltip(card, tooltip, viewport),
        });
        self.visible.as_ref()
    }

    pub fn pointer_leave(&mut self, now: Instant) {
        if self.visible.is_some() {
            self.hide_at = Some(now + HIDE_GRACE);
        }
    }

    /// Apply a pending hide whose grace period is over. Returns true if the tooltip went away.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.hide_at {
            Some(deadline) if now >= deadline => {
                self.hide_at = None;
                self.visible.take().is_some()
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Size = Size {
        width: 800.0,
        height: 600.0,
    };
    const TIP: Size = Size {
        width: 200.0,
        height: 80.0,
    };

    fn card(x: f32, y: f32) -> Rect {
        Rect {
            x,
            y,
            width: 160.0,
            height: 220.0,
        }
    }

    fn products() -> Vec<Product> {
        vec![Product {
            id: 5,
            name: "Balm".to_string(),
            brand: "Acme".to_string(),
            category: "Lip".to_string(),
            image: "https://img.test/5.png".to_string(),
            description: "Soothing lip balm".to_string(),
        }]
    }

    #[test]
    fn test_prefers_above() {
        let p = place_tooltip(card(300.0, 200.0), TIP, VIEWPORT);
        assert_eq!(p.side, Side::Above);
        assert_eq!(p.y, 200.0 - CARD_GAP - TIP.height);
        assert_eq!(p.x, 300.0 + 80.0 - 100.0);
    }

    #[test]
    fn test_falls_back_below_near_top() {
        let p = place_tooltip(card(300.0, 20.0), TIP, VIEWPORT);
        assert_eq!(p.side, Side::Below);
        assert_eq!(p.y, 20.0 + 220.0 + CARD_GAP);
    }

    #[test]
    fn test_clamped_to_viewport() {
        let left = place_tooltip(card(-40.0, 300.0), TIP, VIEWPORT);
        assert_eq!(left.x, VIEWPORT_MARGIN);

        let right = place_tooltip(card(760.0, 300.0), TIP, VIEWPORT);
        assert_eq!(right.x, VIEWPORT.width - TIP.width - VIEWPORT_MARGIN);

        // tall card at the top of a short viewport: below, but still on screen
        let short = Size {
            width: 800.0,
            height: 250.0,
        };
        let low = place_tooltip(card(300.0, 10.0), TIP, short);
        assert_eq!(low.side, Side::Below);
        assert_eq!(low.y, short.height - TIP.height - VIEWPORT_MARGIN);
    }

    #[test]
    fn test_enter_shows_description() {
        let mut state = TooltipState::default();
        let shown = state
            .pointer_enter(5, &products(), card(300.0, 200.0), TIP, VIEWPORT)
            .cloned()
            .unwrap();
        assert_eq!(shown.text, "Soothing lip balm");

        assert!(state
            .pointer_enter(99, &products(), card(300.0, 200.0), TIP, VIEWPORT)
            .is_none());
    }

    #[test]
    fn test_leave_hides_after_grace() {
        let mut state = TooltipState::default();
        state.pointer_enter(5, &products(), card(300.0, 200.0), TIP, VIEWPORT);

        let t0 = Instant::now();
        state.pointer_leave(t0);
        assert!(!state.tick(t0 + HIDE_GRACE / 2));
        assert!(state.visible().is_some());
        assert!(state.tick(t0 + HIDE_GRACE));
        assert!(state.visible().is_none());
    }

    #[test]
    fn test_reentry_cancels_hide() {
        let mut state = TooltipState::default();
        let t0 = Instant::now();
        state.pointer_enter(5, &products(), card(300.0, 200.0), TIP, VIEWPORT);
        state.pointer_leave(t0);
        state.pointer_enter(5, &products(), card(300.0, 200.0), TIP, VIEWPORT);

        assert!(!state.tick(t0 + HIDE_GRACE * 2));
        assert!(state.visible().is_some());
    }
}
