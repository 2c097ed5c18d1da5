#![forbid(unsafe_code)]

//! Overlay painter abstraction.
//!
//! The engine decides *which* overlays exist and *where* they belong; the
//! host decides how they look and actually draws them. [`OverlayPainter`] is
//! that seam. Painters own the visual layer exclusively and never touch the
//! tracked nodes themselves.

use limelight_core::Rect;

/// Opaque handle to one overlay element owned by the painter.
pub type OverlayId = u32;

/// What an overlay is for. Hosts typically style the two kinds differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayKind {
    /// Persistent per-target bounding-box indicator with a numbered badge.
    Indicator,
    /// The single temporary emphasis overlay.
    Spotlight,
}

/// The visual overlay layer, implemented by the host embedding.
pub trait OverlayPainter {
    /// Create a new overlay. It starts hidden, with no badge.
    fn create(&mut self, kind: OverlayKind) -> OverlayId;

    /// Show the overlay at `rect` (viewport-relative pixels).
    fn place(&mut self, id: OverlayId, rect: Rect);

    /// Hide the overlay without destroying it.
    fn hide(&mut self, id: OverlayId);

    /// Set the overlay's 1-based badge number.
    fn set_badge(&mut self, id: OverlayId, ordinal: u32);

    /// Destroy the overlay and release whatever it held.
    fn destroy(&mut self, id: OverlayId);
}

/// State of one mock overlay inside [`RecordingPainter`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedOverlay {
    /// What the overlay was created as.
    pub kind: OverlayKind,
    /// Where it is currently shown, if shown.
    pub rect: Option<Rect>,
    /// Its badge number, if one was assigned.
    pub badge: Option<u32>,
}

/// A painter for tests: keeps every live overlay's current state and counts
/// paint traffic instead of drawing anything.
#[derive(Debug, Default)]
pub struct RecordingPainter {
    overlays: Vec<Option<RecordedOverlay>>,
    /// Total number of `place` calls observed.
    pub place_calls: u64,
}

impl RecordingPainter {
    /// Create an empty recording painter.
    pub fn new() -> Self {
        Self::default()
    }

    /// State of a live overlay, or `None` if it was destroyed or never
    /// existed.
    pub fn overlay(&self, id: OverlayId) -> Option<&RecordedOverlay> {
        self.overlays.get(id as usize).and_then(|slot| slot.as_ref())
    }

    /// Number of live (not destroyed) overlays.
    pub fn live_count(&self) -> usize {
        self.overlays.iter().filter(|slot| slot.is_some()).count()
    }

    /// Number of live overlays of one kind.
    pub fn live_count_of(&self, kind: OverlayKind) -> usize {
        self.overlays
            .iter()
            .filter_map(|slot| slot.as_ref())
            .filter(|o| o.kind == kind)
            .count()
    }

    /// Badges of live indicator overlays, sorted ascending.
    pub fn badges(&self) -> Vec<u32> {
        let mut badges: Vec<u32> = self
            .overlays
            .iter()
            .filter_map(|slot| slot.as_ref())
            .filter(|o| o.kind == OverlayKind::Indicator)
            .filter_map(|o| o.badge)
            .collect();
        badges.sort_unstable();
        badges
    }
}

impl OverlayPainter for RecordingPainter {
    fn create(&mut self, kind: OverlayKind) -> OverlayId {
        let id = self.overlays.len() as OverlayId;
        self.overlays.push(Some(RecordedOverlay {
            kind,
            rect: None,
            badge: None,
        }));
        id
    }

    fn place(&mut self, id: OverlayId, rect: Rect) {
        self.place_calls += 1;
        if let Some(Some(overlay)) = self.overlays.get_mut(id as usize) {
            overlay.rect = Some(rect);
        }
    }

    fn hide(&mut self, id: OverlayId) {
        if let Some(Some(overlay)) = self.overlays.get_mut(id as usize) {
            overlay.rect = None;
        }
    }

    fn set_badge(&mut self, id: OverlayId, ordinal: u32) {
        if let Some(Some(overlay)) = self.overlays.get_mut(id as usize) {
            overlay.badge = Some(ordinal);
        }
    }

    fn destroy(&mut self, id: OverlayId) {
        if let Some(slot) = self.overlays.get_mut(id as usize) {
            *slot = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{OverlayKind, OverlayPainter, RecordingPainter};
    use limelight_core::Rect;

    #[test]
    fn create_place_destroy_roundtrip() {
        let mut painter = RecordingPainter::new();
        let id = painter.create(OverlayKind::Indicator);
        assert_eq!(painter.live_count(), 1);

        painter.place(id, Rect::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(
            painter.overlay(id).and_then(|o| o.rect),
            Some(Rect::new(1.0, 2.0, 3.0, 4.0))
        );

        painter.hide(id);
        assert_eq!(painter.overlay(id).and_then(|o| o.rect), None);

        painter.destroy(id);
        assert!(painter.overlay(id).is_none());
        assert_eq!(painter.live_count(), 0);
    }

    #[test]
    fn badges_collects_sorted_indicator_badges() {
        let mut painter = RecordingPainter::new();
        let a = painter.create(OverlayKind::Indicator);
        let b = painter.create(OverlayKind::Indicator);
        let s = painter.create(OverlayKind::Spotlight);
        painter.set_badge(b, 2);
        painter.set_badge(a, 1);
        painter.set_badge(s, 99);
        assert_eq!(painter.badges(), vec![1, 2]);
        assert_eq!(painter.live_count_of(OverlayKind::Spotlight), 1);
    }

    #[test]
    fn operations_on_destroyed_overlays_are_ignored() {
        let mut painter = RecordingPainter::new();
        let id = painter.create(OverlayKind::Indicator);
        painter.destroy(id);
        painter.place(id, Rect::from_size(5.0, 5.0));
        painter.set_badge(id, 1);
        assert!(painter.overlay(id).is_none());
    }
}
