#![forbid(unsafe_code)]

//! Scroll-surface discovery and subscription bookkeeping.
//!
//! A tracked node's on-screen position moves when the root view scrolls, but
//! also when any independently-scrolling ancestor region does. No host
//! exposes an authoritative list of such regions, so the registry derives
//! one: walk the tree, keep every element whose overflow style allows
//! scrolling on an axis where its content actually overflows.
//!
//! Derivation is deliberately bound to structural-mutation signals rather
//! than scroll events: surfaces are structural, scrolling is transient, and
//! the walk is the most expensive thing this engine does.

use ahash::AHashSet;
use limelight_core::{HostTree, SurfaceRef};

/// The live set of scroll surfaces the engine is subscribed to.
#[derive(Debug, Default)]
pub struct ScrollSurfaceRegistry {
    surfaces: AHashSet<SurfaceRef>,
}

impl ScrollSurfaceRegistry {
    /// Create an empty registry. No subscriptions exist until the first
    /// [`resync`](Self::resync).
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-derive the surface set and reconcile subscriptions against it.
    ///
    /// Surfaces that disappeared are unwatched *before* new ones are
    /// watched, so a listener is never left attached to a removed element.
    /// Unchanged surfaces keep their subscription untouched. Returns the new
    /// surface count.
    pub fn resync<H: HostTree>(&mut self, host: &mut H) -> usize {
        let mut found: AHashSet<SurfaceRef> = AHashSet::new();
        found.insert(SurfaceRef::Root);
        host.for_each_element(&mut |node| {
            if host
                .scroll_extent(node)
                .is_some_and(|extent| extent.is_scrollable())
            {
                found.insert(SurfaceRef::Element(node));
            }
        });

        let stale: Vec<SurfaceRef> = self.surfaces.difference(&found).copied().collect();
        for surface in stale {
            tracing::trace!(?surface, "unwatching stale scroll surface");
            host.unwatch_scroll(surface);
        }

        let fresh: Vec<SurfaceRef> = found.difference(&self.surfaces).copied().collect();
        for surface in fresh {
            tracing::trace!(?surface, "watching new scroll surface");
            host.watch_scroll(surface);
        }

        self.surfaces = found;
        self.surfaces.len()
    }

    /// Unwatch every surface and empty the set.
    pub fn detach_all<H: HostTree>(&mut self, host: &mut H) {
        for surface in self.surfaces.drain() {
            host.unwatch_scroll(surface);
        }
    }

    /// Whether a surface is currently subscribed.
    #[inline]
    pub fn contains(&self, surface: SurfaceRef) -> bool {
        self.surfaces.contains(&surface)
    }

    /// Number of subscribed surfaces.
    #[inline]
    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    /// Whether no surface is subscribed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    /// Iterate over the subscribed surfaces, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = SurfaceRef> + '_ {
        self.surfaces.iter().copied()
    }
}
