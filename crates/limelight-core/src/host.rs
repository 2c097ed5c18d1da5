#![forbid(unsafe_code)]

//! Host-tree abstraction.
//!
//! The engine is headless: it never owns a document, a layout pass, or an
//! event loop. The embedding (a browser bridge, a test harness) implements
//! [`HostTree`] and calls into the engine from its own callbacks.
//!
//! # Contract
//!
//! - Node handles ([`NodeId`]) are stable for the lifetime of a node. A
//!   detached node keeps its handle but reports `is_attached() == false`.
//! - All geometry is viewport-relative (see [`Rect`](crate::Rect)).
//! - `watch_*`/`unwatch_*` calls are balanced by the engine; a host only has
//!   to maintain simple per-handle subscription bookkeeping.
//! - Hosts without resize or mutation observation primitives report that in
//!   [`caps`](HostTree::caps); the engine degrades instead of failing.

use bitflags::bitflags;

use crate::geometry::Rect;

/// Stable handle to a node in the host's visual tree.
pub type NodeId = u64;

bitflags! {
    /// Observation primitives the host can actually provide.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct HostCaps: u8 {
        /// Per-node size-change notifications exist.
        const RESIZE_OBSERVATION = 1 << 0;
        /// Structural tree-mutation notifications exist.
        const MUTATION_OBSERVATION = 1 << 1;
    }
}

impl Default for HostCaps {
    /// No observation primitives; the conservative assumption for an
    /// unknown host.
    fn default() -> Self {
        HostCaps::empty()
    }
}

/// A region whose internal scroll offset can displace a tracked node on
/// screen: the root view, or an independently-scrolling element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceRef {
    /// The root view itself.
    Root,
    /// An independently-scrolling element inside the tree.
    Element(NodeId),
}

/// Computed overflow behavior of one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overflow {
    /// Content is never clipped and never scrolls.
    Visible,
    /// Content is clipped without a scrolling mechanism.
    Hidden,
    /// Scrolls when content overflows.
    Auto,
    /// Always presents a scrolling mechanism.
    Scroll,
}

impl Overflow {
    /// Whether this overflow mode can ever scroll.
    #[inline]
    pub const fn can_scroll(self) -> bool {
        matches!(self, Overflow::Auto | Overflow::Scroll)
    }
}

/// Overflow and extent data for one element, used to classify scroll
/// surfaces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollExtent {
    /// Computed overflow on the horizontal axis.
    pub overflow_x: Overflow,
    /// Computed overflow on the vertical axis.
    pub overflow_y: Overflow,
    /// Total content size (width, height) in pixels.
    pub content: (f64, f64),
    /// Visible client size (width, height) in pixels.
    pub visible: (f64, f64),
}

impl ScrollExtent {
    /// An element is a scroll surface only if some axis both allows
    /// scrolling and actually overflows. A pure overflow-style check would
    /// flag elements that scroll only under some states.
    pub fn is_scrollable(&self) -> bool {
        (self.overflow_x.can_scroll() && self.content.0 > self.visible.0)
            || (self.overflow_y.can_scroll() && self.content.1 > self.visible.1)
    }
}

/// A geometry probe that could not produce a usable reading.
///
/// The engine treats this as "currently unmeasurable", not as detachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeFault;

/// The tree the engine tracks targets inside of.
///
/// Implementations must not call back into the engine from these methods;
/// the engine holds `&mut self` while querying the host.
pub trait HostTree {
    /// Which observation primitives this host provides.
    fn caps(&self) -> HostCaps;

    /// Whether the node is currently part of the tree.
    fn is_attached(&self, node: NodeId) -> bool;

    /// The node's bounding box in viewport-relative pixels.
    ///
    /// `Ok(None)` means the node has no box right now (e.g. display:none
    /// mid-re-render). `Err` means the probe itself failed.
    fn viewport_rect(&self, node: NodeId) -> Result<Option<Rect>, ProbeFault>;

    /// Visit every element currently in the tree, in tree order.
    fn for_each_element(&self, visit: &mut dyn FnMut(NodeId));

    /// Overflow/extent data for scroll-surface classification, or `None`
    /// for nodes that cannot scroll content at all.
    fn scroll_extent(&self, node: NodeId) -> Option<ScrollExtent>;

    /// Start delivering scroll notifications for a surface.
    fn watch_scroll(&mut self, surface: SurfaceRef);

    /// Stop delivering scroll notifications for a surface.
    fn unwatch_scroll(&mut self, surface: SurfaceRef);

    /// Start delivering size-change notifications for a node.
    ///
    /// Only called when [`HostCaps::RESIZE_OBSERVATION`] is set.
    fn watch_resize(&mut self, node: NodeId);

    /// Stop delivering size-change notifications for a node.
    fn unwatch_resize(&mut self, node: NodeId);

    /// Start delivering structural-mutation notifications for the tree.
    ///
    /// Only called when [`HostCaps::MUTATION_OBSERVATION`] is set.
    fn watch_mutations(&mut self);

    /// Stop delivering structural-mutation notifications.
    fn unwatch_mutations(&mut self);

    /// Ask the host to bring a node into the visible viewport.
    ///
    /// Best-effort; the engine keeps tracking the node's rect while any
    /// scroll animation runs.
    fn request_scroll_into_view(&mut self, node: NodeId);
}
