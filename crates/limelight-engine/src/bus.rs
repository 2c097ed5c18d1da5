#![forbid(unsafe_code)]

//! Change-signal coalescing and throttling.
//!
//! Scroll, resize, and mutation notifications can arrive in bursts of many
//! per millisecond. [`ChangeSignalBus`] collapses everything that lands
//! inside one throttle window into a single recompute pass and enforces a
//! fixed upper bound on pass frequency.
//!
//! # Design
//!
//! The bus holds no queue: a pending *flag* is the whole coalescing state,
//! because one pass re-measures every tracked target regardless of which
//! signal asked for it. Mutation signals additionally raise a resync flag so
//! the scroll-surface set is re-derived before that window's recompute.
//!
//! Time is an explicit parameter. The host drives the bus from its frame
//! callback: [`due_in`](ChangeSignalBus::due_in) tells it when to come back,
//! [`begin_pass`](ChangeSignalBus::begin_pass) consumes the pending state.
//! A generation counter makes passes cancellable: `clear()` invalidates the
//! generation, turning any already-scheduled callback into a no-op instead
//! of letting it fire against destroyed state.

use limelight_core::ChangeSource;
use web_time::{Duration, Instant};

/// Authorization for one recompute pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassTicket {
    /// Bus generation the ticket was issued under.
    pub generation: u64,
    /// Whether the scroll-surface set must be re-derived before the pass.
    pub resync_surfaces: bool,
}

/// Single subscription point for all heterogeneous change sources.
#[derive(Debug, Clone)]
pub struct ChangeSignalBus {
    window: Duration,
    pending: bool,
    resync_surfaces: bool,
    generation: u64,
    last_pass: Option<Instant>,
    coalesced: u64,
}

impl ChangeSignalBus {
    /// Create a bus with the given throttle window.
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: false,
            resync_surfaces: false,
            generation: 0,
            last_pass: None,
            coalesced: 0,
        }
    }

    /// Record one change signal. O(1); never schedules anything itself.
    pub fn notify(&mut self, source: ChangeSource) {
        self.pending = true;
        self.coalesced += 1;
        if source.is_structural() {
            self.resync_surfaces = true;
        }
    }

    /// Whether any signal is waiting for a pass.
    #[inline]
    pub fn has_pending(&self) -> bool {
        self.pending
    }

    /// Number of signals coalesced since the last pass began.
    #[inline]
    pub fn coalesced_signals(&self) -> u64 {
        self.coalesced
    }

    /// How long until a pending pass may run: `Some(ZERO)` when due now,
    /// the remaining wait when throttled, `None` when nothing is pending.
    pub fn due_in(&self, now: Instant) -> Option<Duration> {
        if !self.pending {
            return None;
        }
        match self.last_pass {
            None => Some(Duration::ZERO),
            Some(last) => {
                let elapsed = now.saturating_duration_since(last);
                Some(self.window.saturating_sub(elapsed))
            }
        }
    }

    /// Consume the pending state and authorize a pass, if the throttle
    /// window has elapsed. Signals recorded before this call are all covered
    /// by the returned ticket.
    pub fn begin_pass(&mut self, now: Instant) -> Option<PassTicket> {
        if self.due_in(now) != Some(Duration::ZERO) {
            return None;
        }
        let ticket = PassTicket {
            generation: self.generation,
            resync_surfaces: self.resync_surfaces,
        };
        tracing::trace!(
            coalesced = self.coalesced,
            resync = ticket.resync_surfaces,
            "beginning recompute pass"
        );
        self.pending = false;
        self.resync_surfaces = false;
        self.coalesced = 0;
        self.last_pass = Some(now);
        Some(ticket)
    }

    /// Whether a ticket is still from the current generation.
    #[inline]
    pub fn is_current(&self, ticket: &PassTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Drop all pending state and invalidate outstanding tickets. Returns
    /// the bus to its freshly-constructed timing state.
    pub fn invalidate(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.pending = false;
        self.resync_surfaces = false;
        self.coalesced = 0;
        self.last_pass = None;
    }

    /// The configured throttle window.
    #[inline]
    pub fn window(&self) -> Duration {
        self.window
    }
}
