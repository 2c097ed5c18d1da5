#![forbid(unsafe_code)]

//! The tracking registry: engine state and orchestration.
//!
//! [`Tracker`] owns the ordered list of tracked pairs, the scroll-surface
//! set (delegated to [`ScrollSurfaceRegistry`]), the change-signal bus, and
//! the indicator renderer, and guarantees eventual consistency between the
//! host tree and the overlay layer.
//!
//! # How it works
//!
//! 1. The excluded targeting layer calls [`add`](Tracker::add) /
//!    [`remove`](Tracker::remove) / [`clear`](Tracker::clear) /
//!    [`spotlight`](Tracker::spotlight).
//! 2. The host forwards every scroll/resize/mutation notification to
//!    [`notify`](Tracker::notify).
//! 3. The host's frame callback calls [`run_pending`](Tracker::run_pending),
//!    which executes at most one coalesced recompute pass: optional surface
//!    resync, then a single re-measure/repaint sweep over every pair and the
//!    spotlight.
//!
//! Within one pass all pairs are repositioned before control returns, so two
//! indicators are never visibly out of sync with each other, even though
//! both may lag true geometry by up to one throttle window.

use limelight_core::{
    ChangeSource, GeometryProbe, HostCaps, HostTree, Measurement, NodeId, Rect, TrackedTarget,
};
use limelight_render::{Indicator, IndicatorRenderer, OverlayPainter};
use web_time::{Duration, Instant};

use crate::bus::ChangeSignalBus;
use crate::config::TrackerConfig;
use crate::surfaces::ScrollSurfaceRegistry;

/// One tracked target together with its visual twin.
#[derive(Debug)]
struct TrackedPair {
    target: TrackedTarget,
    indicator: Indicator,
    /// Consecutive faulted measurements; reset by any usable reading.
    faults: u32,
}

/// The live overlay synchronization engine.
///
/// All state lives behind `&mut self`; the engine is single-threaded and
/// cooperative, driven entirely by host callbacks. Constructing a `Tracker`
/// performs no observation until [`attach`](Self::attach).
#[derive(Debug)]
pub struct Tracker {
    config: TrackerConfig,
    pairs: Vec<TrackedPair>,
    surfaces: ScrollSurfaceRegistry,
    bus: ChangeSignalBus,
    renderer: IndicatorRenderer,
    observing: bool,
    next_seq: u64,
    spotlit: Option<NodeId>,
    warned_no_mutation: bool,
    warned_no_resize: bool,
}

impl Tracker {
    /// Create an engine with the given configuration.
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            bus: ChangeSignalBus::new(config.throttle_window),
            config,
            pairs: Vec::new(),
            surfaces: ScrollSurfaceRegistry::new(),
            renderer: IndicatorRenderer::new(),
            observing: false,
            next_seq: 0,
            spotlit: None,
            warned_no_mutation: false,
            warned_no_resize: false,
        }
    }

    /// Start observing the host: mutation watch (when the host has the
    /// capability) and scroll-surface subscriptions. Idempotent.
    pub fn attach<H: HostTree>(&mut self, host: &mut H) {
        if self.observing {
            return;
        }
        self.observing = true;
        if host.caps().contains(HostCaps::MUTATION_OBSERVATION) {
            host.watch_mutations();
        } else if !self.warned_no_mutation {
            self.warned_no_mutation = true;
            tracing::warn!(
                "host lacks mutation observation; scroll surfaces added after \
                 selection will not be auto-detected"
            );
        }
        let tracked: Vec<NodeId> = self.pairs.iter().map(|pair| pair.target.node).collect();
        for node in tracked {
            self.watch_resize_checked(host, node);
        }
        let surfaces = self.surfaces.resync(host);
        tracing::debug!(surfaces, "observation started");
    }

    /// Stop all observation and destroy all engine state, returning to the
    /// state of a freshly constructed instance.
    pub fn detach<H: HostTree, P: OverlayPainter>(&mut self, host: &mut H, painter: &mut P) {
        self.clear(host, painter);
        if self.observing && host.caps().contains(HostCaps::MUTATION_OBSERVATION) {
            host.unwatch_mutations();
        }
        self.observing = false;
    }

    /// Track a node. Returns `false` (no state change) if it is already
    /// tracked.
    ///
    /// On success the new indicator is positioned immediately from a fresh
    /// measurement, outside the throttle, so it never flashes at a wrong
    /// place.
    pub fn add<H: HostTree, P: OverlayPainter>(
        &mut self,
        host: &mut H,
        painter: &mut P,
        node: NodeId,
    ) -> bool {
        if self.pairs.iter().any(|pair| pair.target.node == node) {
            tracing::debug!(node, "node already selected");
            return false;
        }
        // Surface detection can be empty right after a clear(); catch up so
        // sub-region scrolling is tracked for this target too.
        if self.observing && self.surfaces.is_empty() {
            self.surfaces.resync(host);
        }

        self.next_seq += 1;
        let target = TrackedTarget::new(self.next_seq, node);
        let rect = GeometryProbe::measure(host, node).rect();
        let ordinal = (self.pairs.len() + 1) as u32;
        let indicator = self.renderer.create(painter, rect, ordinal);
        if self.observing {
            self.watch_resize_checked(host, node);
        }
        tracing::debug!(id = %target.id, node, ordinal, "target tracked");
        self.pairs.push(TrackedPair {
            target,
            indicator,
            faults: 0,
        });
        true
    }

    /// Stop tracking the pair at `index`. Out-of-range indices are a no-op.
    pub fn remove<H: HostTree, P: OverlayPainter>(
        &mut self,
        host: &mut H,
        painter: &mut P,
        index: usize,
    ) {
        if index >= self.pairs.len() {
            return;
        }
        let pair = self.pairs.remove(index);
        self.unwatch_resize_checked(host, pair.target.node);
        if self.spotlit == Some(pair.target.node) {
            self.spotlit = None;
            self.renderer.clear_spotlight(painter);
        }
        tracing::debug!(id = %pair.target.id, node = pair.target.node, "target removed");
        self.renderer.remove(painter, pair.indicator);
        self.renderer
            .renumber(painter, self.pairs.iter_mut().map(|p| &mut p.indicator));
    }

    /// Drop every tracked pair, every indicator, every per-node and
    /// per-surface subscription, and the spotlight.
    ///
    /// Safe to call at any time, including while a throttled pass is
    /// pending: the bus generation is invalidated so the pending pass
    /// becomes a no-op.
    pub fn clear<H: HostTree, P: OverlayPainter>(&mut self, host: &mut H, painter: &mut P) {
        let cleared = self.pairs.len();
        for pair in self.pairs.drain(..) {
            if self.observing && host.caps().contains(HostCaps::RESIZE_OBSERVATION) {
                host.unwatch_resize(pair.target.node);
            }
            self.renderer.remove(painter, pair.indicator);
        }
        self.spotlit = None;
        self.renderer.clear_spotlight(painter);
        self.surfaces.detach_all(host);
        self.bus.invalidate();
        if cleared > 0 {
            tracing::debug!(cleared, "selection cleared");
        }
    }

    /// Emphasize the pair at `index`: show the spotlight at its current
    /// rect, ask the host to scroll it into view, and keep following it
    /// through the ordinary coalesced recompute path. Out-of-range indices
    /// are a no-op.
    pub fn spotlight<H: HostTree, P: OverlayPainter>(
        &mut self,
        host: &mut H,
        painter: &mut P,
        index: usize,
    ) {
        let Some(pair) = self.pairs.get(index) else {
            return;
        };
        let node = pair.target.node;
        self.spotlit = Some(node);
        let rect = GeometryProbe::measure(host, node).rect();
        self.renderer.spotlight(painter, rect);
        host.request_scroll_into_view(node);
    }

    /// Record one change signal from the host. O(1), never repaints.
    pub fn notify(&mut self, source: ChangeSource) {
        if !self.observing {
            return;
        }
        self.bus.notify(source);
    }

    /// How long until a pending recompute pass may run. `None` when nothing
    /// is pending; hosts use this to schedule their next frame callback.
    pub fn due_in(&self, now: Instant) -> Option<Duration> {
        self.bus.due_in(now)
    }

    /// Execute the coalesced recompute pass if one is due. Returns whether a
    /// pass ran.
    pub fn run_pending<H: HostTree, P: OverlayPainter>(
        &mut self,
        host: &mut H,
        painter: &mut P,
        now: Instant,
    ) -> bool {
        let Some(ticket) = self.bus.begin_pass(now) else {
            return false;
        };
        if !self.bus.is_current(&ticket) {
            return false;
        }
        // A mutation may have added or removed scrollable regions; refresh
        // the subscriptions before repositioning against them.
        if ticket.resync_surfaces {
            self.surfaces.resync(host);
        }
        self.recompute_all(host, painter);
        true
    }

    /// Ordered snapshot of the tracked targets, for the selection-list and
    /// export layers.
    pub fn targets(&self) -> impl Iterator<Item = &TrackedTarget> {
        self.pairs.iter().map(|pair| &pair.target)
    }

    /// The tracked nodes in registry order.
    pub fn nodes(&self) -> Vec<NodeId> {
        self.pairs.iter().map(|pair| pair.target.node).collect()
    }

    /// The rect last painted for the pair at `index`, or `None` when hidden
    /// or out of range.
    pub fn indicator_rect(&self, index: usize) -> Option<Rect> {
        self.pairs.get(index).and_then(|pair| pair.indicator.rect())
    }

    /// Number of tracked pairs.
    #[inline]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether nothing is tracked.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Whether observation is active.
    #[inline]
    pub fn is_observing(&self) -> bool {
        self.observing
    }

    /// Number of currently subscribed scroll surfaces.
    #[inline]
    pub fn surface_count(&self) -> usize {
        self.surfaces.len()
    }

    /// One re-measure/repaint sweep over every pair and the spotlight.
    fn recompute_all<H: HostTree, P: OverlayPainter>(&mut self, host: &mut H, painter: &mut P) {
        let threshold = self.config.fault_eviction_threshold;
        let mut evict: Vec<usize> = Vec::new();

        for (index, pair) in self.pairs.iter_mut().enumerate() {
            match GeometryProbe::measure(host, pair.target.node) {
                Measurement::Rect(rect) => {
                    pair.faults = 0;
                    self.renderer.update(painter, &mut pair.indicator, Some(rect));
                }
                Measurement::Hidden => {
                    pair.faults = 0;
                    self.renderer.update(painter, &mut pair.indicator, None);
                }
                Measurement::Faulted => {
                    pair.faults += 1;
                    if pair.faults >= threshold {
                        evict.push(index);
                    } else {
                        self.renderer.update(painter, &mut pair.indicator, None);
                    }
                }
                Measurement::Detached => evict.push(index),
            }
        }

        if !evict.is_empty() {
            for &index in evict.iter().rev() {
                let pair = self.pairs.remove(index);
                self.unwatch_resize_checked(host, pair.target.node);
                if self.spotlit == Some(pair.target.node) {
                    self.spotlit = None;
                    self.renderer.clear_spotlight(painter);
                }
                tracing::debug!(
                    id = %pair.target.id,
                    node = pair.target.node,
                    "evicting target whose node left the tree"
                );
                self.renderer.remove(painter, pair.indicator);
            }
            self.renderer
                .renumber(painter, self.pairs.iter_mut().map(|p| &mut p.indicator));
        }

        if let Some(node) = self.spotlit {
            match GeometryProbe::measure(host, node) {
                Measurement::Rect(rect) => self.renderer.spotlight(painter, Some(rect)),
                Measurement::Hidden | Measurement::Faulted => {
                    self.renderer.spotlight(painter, None)
                }
                Measurement::Detached => {
                    self.spotlit = None;
                    self.renderer.clear_spotlight(painter);
                }
            }
        }
    }

    fn watch_resize_checked<H: HostTree>(&mut self, host: &mut H, node: NodeId) {
        if host.caps().contains(HostCaps::RESIZE_OBSERVATION) {
            host.watch_resize(node);
        } else if !self.warned_no_resize {
            self.warned_no_resize = true;
            tracing::warn!("host lacks resize observation; size changes repaint only on the next scroll or mutation");
        }
    }

    fn unwatch_resize_checked<H: HostTree>(&mut self, host: &mut H, node: NodeId) {
        if self.observing && host.caps().contains(HostCaps::RESIZE_OBSERVATION) {
            host.unwatch_resize(node);
        }
    }
}

impl Default for Tracker {
    fn default() -> Self {
        Self::new(TrackerConfig::default())
    }
}
