//! Scripted host tree shared by the engine integration tests.

#![allow(dead_code)]

use std::collections::HashMap;

use limelight_core::{
    ChangeSource, HostCaps, HostTree, NodeId, Overflow, ProbeFault, Rect, ScrollExtent, SurfaceRef,
};
use limelight_engine::Tracker;
use limelight_render::RecordingPainter;
use web_time::{Duration, Instant};

pub const WINDOW: Duration = Duration::from_millis(16);

#[derive(Debug, Clone)]
struct MockNode {
    attached: bool,
    rect: Result<Option<Rect>, ProbeFault>,
    extent: Option<ScrollExtent>,
}

/// An in-memory visual tree with subscription bookkeeping, standing in for
/// a real document host.
#[derive(Debug, Default)]
pub struct MockHost {
    caps: HostCaps,
    order: Vec<NodeId>,
    nodes: HashMap<NodeId, MockNode>,
    pub watched_scroll: Vec<SurfaceRef>,
    pub watched_resize: Vec<NodeId>,
    pub mutations_watched: bool,
    pub scroll_into_view_requests: Vec<NodeId>,
}

impl MockHost {
    /// A fully capable host with no nodes.
    pub fn new() -> Self {
        Self {
            caps: HostCaps::all(),
            ..Self::default()
        }
    }

    /// A host missing the given observation primitives.
    pub fn without_caps(missing: HostCaps) -> Self {
        let mut host = Self::new();
        host.caps = HostCaps::all() - missing;
        host
    }

    /// Add an attached node with a bounding box.
    pub fn add_node(&mut self, node: NodeId, rect: Rect) {
        self.order.push(node);
        self.nodes.insert(
            node,
            MockNode {
                attached: true,
                rect: Ok(Some(rect)),
                extent: None,
            },
        );
    }

    /// Add an attached node that independently scrolls its content.
    pub fn add_scrollable(&mut self, node: NodeId, rect: Rect) {
        self.add_node(node, rect);
        if let Some(state) = self.nodes.get_mut(&node) {
            state.extent = Some(ScrollExtent {
                overflow_x: Overflow::Hidden,
                overflow_y: Overflow::Auto,
                content: (rect.width, rect.height * 4.0),
                visible: (rect.width, rect.height),
            });
        }
    }

    /// Detach a node from the tree; its handle stays valid.
    pub fn detach(&mut self, node: NodeId) {
        if let Some(state) = self.nodes.get_mut(&node) {
            state.attached = false;
        }
    }

    /// Reattach a previously detached node.
    pub fn reattach(&mut self, node: NodeId) {
        if let Some(state) = self.nodes.get_mut(&node) {
            state.attached = true;
        }
    }

    /// Replace a node's bounding box.
    pub fn set_rect(&mut self, node: NodeId, rect: Option<Rect>) {
        if let Some(state) = self.nodes.get_mut(&node) {
            state.rect = Ok(rect);
        }
    }

    /// Make every probe of this node fail.
    pub fn set_faulty(&mut self, node: NodeId) {
        if let Some(state) = self.nodes.get_mut(&node) {
            state.rect = Err(ProbeFault);
        }
    }

    /// Current rect of a node, as the probe would see it.
    pub fn rect_of(&self, node: NodeId) -> Option<Rect> {
        self.nodes.get(&node).and_then(|state| state.rect.ok().flatten())
    }

    /// Scroll the root view by `(dx, dy)`: every attached node's viewport
    /// position shifts by the opposite delta.
    pub fn scroll_root(&mut self, dx: f64, dy: f64) {
        for state in self.nodes.values_mut() {
            if let Ok(Some(rect)) = state.rect {
                state.rect = Ok(Some(rect.translate(-dx, -dy)));
            }
        }
    }

    pub fn is_scroll_watched(&self, surface: SurfaceRef) -> bool {
        self.watched_scroll.contains(&surface)
    }
}

impl HostTree for MockHost {
    fn caps(&self) -> HostCaps {
        self.caps
    }

    fn is_attached(&self, node: NodeId) -> bool {
        self.nodes.get(&node).is_some_and(|state| state.attached)
    }

    fn viewport_rect(&self, node: NodeId) -> Result<Option<Rect>, ProbeFault> {
        self.nodes.get(&node).map_or(Ok(None), |state| state.rect)
    }

    fn for_each_element(&self, visit: &mut dyn FnMut(NodeId)) {
        for &node in &self.order {
            if self.is_attached(node) {
                visit(node);
            }
        }
    }

    fn scroll_extent(&self, node: NodeId) -> Option<ScrollExtent> {
        self.nodes
            .get(&node)
            .filter(|state| state.attached)
            .and_then(|state| state.extent)
    }

    fn watch_scroll(&mut self, surface: SurfaceRef) {
        self.watched_scroll.push(surface);
    }

    fn unwatch_scroll(&mut self, surface: SurfaceRef) {
        self.watched_scroll.retain(|&s| s != surface);
    }

    fn watch_resize(&mut self, node: NodeId) {
        self.watched_resize.push(node);
    }

    fn unwatch_resize(&mut self, node: NodeId) {
        self.watched_resize.retain(|&n| n != node);
    }

    fn watch_mutations(&mut self) {
        self.mutations_watched = true;
    }

    fn unwatch_mutations(&mut self) {
        self.mutations_watched = false;
    }

    fn request_scroll_into_view(&mut self, node: NodeId) {
        self.scroll_into_view_requests.push(node);
    }
}

/// Deliver a scroll notification the way a real host would: only if the
/// engine actually holds a subscription on that surface.
pub fn deliver_scroll(host: &MockHost, tracker: &mut Tracker, surface: SurfaceRef) -> bool {
    if host.is_scroll_watched(surface) {
        tracker.notify(ChangeSource::Scroll(surface));
        true
    } else {
        false
    }
}

/// Deliver a resize notification, honoring the host's subscription state.
pub fn deliver_resize(host: &MockHost, tracker: &mut Tracker, node: NodeId) -> bool {
    if host.watched_resize.contains(&node) {
        tracker.notify(ChangeSource::Resize(node));
        true
    } else {
        false
    }
}

/// Deliver a mutation notification, honoring the host's subscription state.
pub fn deliver_mutation(host: &MockHost, tracker: &mut Tracker) -> bool {
    if host.mutations_watched {
        tracker.notify(ChangeSource::Mutation);
        true
    } else {
        false
    }
}

/// An attached/observing tracker over a host with `n` plain nodes with
/// distinct rects, plus a fresh painter and a base timestamp.
pub fn attached_setup(n: u64) -> (MockHost, RecordingPainter, Tracker, Instant) {
    let mut host = MockHost::new();
    for node in 1..=n {
        let offset = node as f64 * 100.0;
        host.add_node(node, Rect::new(10.0, offset, 80.0, 40.0));
    }
    let painter = RecordingPainter::new();
    let mut tracker = Tracker::default();
    tracker.attach(&mut host);
    (host, painter, tracker, Instant::now())
}
