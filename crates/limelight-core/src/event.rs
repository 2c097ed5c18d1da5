#![forbid(unsafe_code)]

//! Tagged change events.
//!
//! Every upstream notification source (scroll on any surface, per-node
//! resize, structural mutation) funnels into one [`ChangeSource`] value, so
//! throttling and coalescing logic can live in exactly one place instead of
//! one ad hoc handler per source.

use crate::host::{NodeId, SurfaceRef};

/// One viewport-relevant change notification from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeSource {
    /// A scroll surface moved (the root view or a sub-region).
    Scroll(SurfaceRef),
    /// A tracked node changed size.
    Resize(NodeId),
    /// The tree was structurally mutated (nodes added/removed/reparented).
    Mutation,
}

impl ChangeSource {
    /// Whether this change can have added or removed scroll surfaces.
    ///
    /// Structural changes require re-deriving the surface set before the
    /// next recompute; scroll and resize never do.
    #[inline]
    pub const fn is_structural(self) -> bool {
        matches!(self, ChangeSource::Mutation)
    }
}
