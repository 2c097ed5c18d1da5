#![forbid(unsafe_code)]

//! Indicator and spotlight overlay lifecycle.
//!
//! [`IndicatorRenderer`] owns exactly the visual side of tracking: one
//! overlay per tracked target plus one optional spotlight overlay for
//! on-demand emphasis. It never decides *what* is tracked; the engine's
//! registry does, and calls down here.
//!
//! # Repaint discipline
//!
//! `update` repaints only when the rect actually changed. Recompute passes
//! run at up to the throttle rate for every tracked target, and most passes
//! move nothing; skipping redundant placements keeps a large selection cheap
//! and the overlay layer free of per-frame churn.

use limelight_core::Rect;

use crate::painter::{OverlayId, OverlayKind, OverlayPainter};

/// Visual twin of one tracked target.
///
/// Created and destroyed together with its target; hidden (never destroyed)
/// while the target is transiently unmeasurable.
#[derive(Debug, Clone, PartialEq)]
pub struct Indicator {
    overlay: OverlayId,
    badge: u32,
    last_rect: Option<Rect>,
}

impl Indicator {
    /// The overlay handle this indicator paints through.
    #[inline]
    pub fn overlay(&self) -> OverlayId {
        self.overlay
    }

    /// Current 1-based badge number.
    #[inline]
    pub fn badge(&self) -> u32 {
        self.badge
    }

    /// The rect last painted, or `None` while hidden.
    #[inline]
    pub fn rect(&self) -> Option<Rect> {
        self.last_rect
    }
}

/// Owns the overlay lifecycle for all indicators and the spotlight.
#[derive(Debug, Default)]
pub struct IndicatorRenderer {
    spotlight: Option<(OverlayId, Option<Rect>)>,
}

impl IndicatorRenderer {
    /// Create a renderer with no overlays.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a new indicator at `rect` (hidden if `None`) with the given
    /// 1-based badge.
    pub fn create<P: OverlayPainter>(
        &mut self,
        painter: &mut P,
        rect: Option<Rect>,
        ordinal: u32,
    ) -> Indicator {
        let overlay = painter.create(OverlayKind::Indicator);
        tracing::trace!(overlay, ordinal, "creating indicator overlay");
        painter.set_badge(overlay, ordinal);
        if let Some(rect) = rect {
            painter.place(overlay, rect);
        }
        Indicator {
            overlay,
            badge: ordinal,
            last_rect: rect,
        }
    }

    /// Reposition an indicator; `None` hides it. No paint traffic when the
    /// rect is unchanged.
    pub fn update<P: OverlayPainter>(
        &mut self,
        painter: &mut P,
        indicator: &mut Indicator,
        rect: Option<Rect>,
    ) {
        if indicator.last_rect == rect {
            return;
        }
        match rect {
            Some(rect) => painter.place(indicator.overlay, rect),
            None => painter.hide(indicator.overlay),
        }
        indicator.last_rect = rect;
    }

    /// Reassign badge numbers so they form a contiguous `1..=N` sequence
    /// matching the given order.
    pub fn renumber<'a, P, I>(&mut self, painter: &mut P, indicators: I)
    where
        P: OverlayPainter,
        I: IntoIterator<Item = &'a mut Indicator>,
    {
        for (i, indicator) in indicators.into_iter().enumerate() {
            let ordinal = (i + 1) as u32;
            if indicator.badge != ordinal {
                painter.set_badge(indicator.overlay, ordinal);
                indicator.badge = ordinal;
            }
        }
    }

    /// Destroy an indicator's overlay.
    pub fn remove<P: OverlayPainter>(&mut self, painter: &mut P, indicator: Indicator) {
        tracing::trace!(overlay = indicator.overlay, "destroying indicator overlay");
        painter.destroy(indicator.overlay);
    }

    /// Show the spotlight at `rect`, creating its overlay on first use.
    /// `None` hides it while keeping the overlay alive.
    pub fn spotlight<P: OverlayPainter>(&mut self, painter: &mut P, rect: Option<Rect>) {
        let (overlay, last) = match self.spotlight {
            Some(existing) => existing,
            None => {
                let overlay = painter.create(OverlayKind::Spotlight);
                (overlay, None)
            }
        };
        if self.spotlight.is_none() || last != rect {
            match rect {
                Some(rect) => painter.place(overlay, rect),
                None => painter.hide(overlay),
            }
        }
        self.spotlight = Some((overlay, rect));
    }

    /// Destroy the spotlight overlay, if present.
    pub fn clear_spotlight<P: OverlayPainter>(&mut self, painter: &mut P) {
        if let Some((overlay, _)) = self.spotlight.take() {
            painter.destroy(overlay);
        }
    }

    /// Whether the spotlight overlay currently exists.
    #[inline]
    pub fn has_spotlight(&self) -> bool {
        self.spotlight.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::IndicatorRenderer;
    use crate::painter::{OverlayKind, RecordingPainter};
    use limelight_core::Rect;

    #[test]
    fn create_places_and_badges() {
        let mut painter = RecordingPainter::new();
        let mut renderer = IndicatorRenderer::new();

        let ind = renderer.create(&mut painter, Some(Rect::new(1.0, 1.0, 5.0, 5.0)), 1);
        let overlay = painter.overlay(ind.overlay()).unwrap();
        assert_eq!(overlay.rect, Some(Rect::new(1.0, 1.0, 5.0, 5.0)));
        assert_eq!(overlay.badge, Some(1));
        assert_eq!(ind.rect(), Some(Rect::new(1.0, 1.0, 5.0, 5.0)));
    }

    #[test]
    fn create_hidden_when_unmeasurable() {
        let mut painter = RecordingPainter::new();
        let mut renderer = IndicatorRenderer::new();

        let ind = renderer.create(&mut painter, None, 1);
        assert_eq!(painter.overlay(ind.overlay()).unwrap().rect, None);
        assert_eq!(painter.place_calls, 0);
    }

    #[test]
    fn update_skips_unchanged_rect() {
        let mut painter = RecordingPainter::new();
        let mut renderer = IndicatorRenderer::new();
        let rect = Rect::new(2.0, 2.0, 8.0, 8.0);

        let mut ind = renderer.create(&mut painter, Some(rect), 1);
        assert_eq!(painter.place_calls, 1);

        renderer.update(&mut painter, &mut ind, Some(rect));
        assert_eq!(painter.place_calls, 1);

        renderer.update(&mut painter, &mut ind, Some(rect.translate(0.0, 3.0)));
        assert_eq!(painter.place_calls, 2);
    }

    #[test]
    fn update_none_hides_without_destroying() {
        let mut painter = RecordingPainter::new();
        let mut renderer = IndicatorRenderer::new();

        let mut ind = renderer.create(&mut painter, Some(Rect::from_size(4.0, 4.0)), 1);
        renderer.update(&mut painter, &mut ind, None);

        assert_eq!(painter.live_count(), 1);
        assert_eq!(painter.overlay(ind.overlay()).unwrap().rect, None);
        assert_eq!(ind.rect(), None);

        // Recovers when measurable again.
        renderer.update(&mut painter, &mut ind, Some(Rect::from_size(4.0, 4.0)));
        assert!(painter.overlay(ind.overlay()).unwrap().rect.is_some());
    }

    #[test]
    fn renumber_restores_contiguous_badges() {
        let mut painter = RecordingPainter::new();
        let mut renderer = IndicatorRenderer::new();

        let a = renderer.create(&mut painter, None, 1);
        let b = renderer.create(&mut painter, None, 2);
        let c = renderer.create(&mut painter, None, 3);

        // Drop the middle one, as a registry removal would.
        renderer.remove(&mut painter, b);
        let mut rest = [a, c];
        renderer.renumber(&mut painter, rest.iter_mut());

        assert_eq!(painter.badges(), vec![1, 2]);
        assert_eq!(rest[0].badge(), 1);
        assert_eq!(rest[1].badge(), 2);
    }

    #[test]
    fn spotlight_is_single_and_reused() {
        let mut painter = RecordingPainter::new();
        let mut renderer = IndicatorRenderer::new();

        renderer.spotlight(&mut painter, Some(Rect::from_size(10.0, 10.0)));
        renderer.spotlight(&mut painter, Some(Rect::from_size(20.0, 20.0)));
        assert_eq!(painter.live_count_of(OverlayKind::Spotlight), 1);
        assert!(renderer.has_spotlight());

        renderer.clear_spotlight(&mut painter);
        assert_eq!(painter.live_count_of(OverlayKind::Spotlight), 0);
        assert!(!renderer.has_spotlight());
    }

    #[test]
    fn spotlight_skips_unchanged_rect() {
        let mut painter = RecordingPainter::new();
        let mut renderer = IndicatorRenderer::new();
        let rect = Rect::new(0.0, 0.0, 6.0, 6.0);

        renderer.spotlight(&mut painter, Some(rect));
        assert_eq!(painter.place_calls, 1);
        renderer.spotlight(&mut painter, Some(rect));
        assert_eq!(painter.place_calls, 1);
    }
}
