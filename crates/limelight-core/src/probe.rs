#![forbid(unsafe_code)]

//! Geometry probing for tracked nodes.
//!
//! [`GeometryProbe`] is the single place that turns a raw host reading into
//! the engine's per-target state input. It is stateless and uncached: every
//! call reflects the host's current layout, which is what keeps indicators
//! from drifting during rapid scrolling.

use crate::geometry::Rect;
use crate::host::{HostTree, NodeId};

/// Outcome of probing one tracked node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Measurement {
    /// The node is attached and has a usable on-screen box.
    Rect(Rect),
    /// The node is attached but currently has no usable box (zero-area or
    /// no layout). Transient; the indicator hides and recovers.
    Hidden,
    /// The node has left the tree. Terminal for the tracked pair.
    Detached,
    /// The probe itself failed or returned nonsensical geometry. Transient
    /// until it persists across consecutive passes.
    Faulted,
}

impl Measurement {
    /// The measured rect, if any.
    #[inline]
    pub fn rect(self) -> Option<Rect> {
        match self {
            Measurement::Rect(rect) => Some(rect),
            _ => None,
        }
    }
}

/// Stateless reader of tracked-node geometry.
pub struct GeometryProbe;

impl GeometryProbe {
    /// Measure a node's current viewport-relative bounding box.
    pub fn measure<H: HostTree + ?Sized>(host: &H, node: NodeId) -> Measurement {
        if !host.is_attached(node) {
            return Measurement::Detached;
        }
        match host.viewport_rect(node) {
            Err(_) => Measurement::Faulted,
            Ok(None) => Measurement::Hidden,
            Ok(Some(rect)) if !rect.is_finite() => Measurement::Faulted,
            Ok(Some(rect)) if rect.is_empty() => Measurement::Hidden,
            Ok(Some(rect)) => Measurement::Rect(rect),
        }
    }
}
