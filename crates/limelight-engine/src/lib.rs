#![forbid(unsafe_code)]

//! Limelight Engine
//!
//! The live overlay synchronization engine: keeps one bounding-box
//! indicator pixel-aligned with every tracked node of a host-owned visual
//! tree while the tree scrolls, resizes, and mutates, within a bounded,
//! jitter-free latency budget.
//!
//! # Key Components
//!
//! - [`Tracker`] - The engine façade: registry, orchestration, public API
//! - [`ChangeSignalBus`] - One throttled subscription point for all change
//!   sources
//! - [`ScrollSurfaceRegistry`] - Discovery of independently-scrolling
//!   regions
//! - [`TrackerConfig`] - Throttle window and fault-eviction tuning
//!
//! # How it fits in the system
//! The engine consumes `limelight-core` (geometry, host abstraction,
//! events) and drives `limelight-render` (overlay lifecycle). Higher-level
//! collaborators (targeting, export, a selection panel) talk only to
//! [`Tracker`]'s public API.
//!
//! # Example
//!
//! ```no_run
//! use limelight_engine::{Tracker, TrackerConfig};
//! use limelight_core::ChangeSource;
//! use web_time::Instant;
//! # fn demo<H: limelight_core::HostTree, P: limelight_render::OverlayPainter>(
//! #     host: &mut H, painter: &mut P, some_node: u64,
//! # ) {
//! let mut tracker = Tracker::new(TrackerConfig::default());
//! tracker.attach(host);
//! tracker.add(host, painter, some_node);
//! // From the host's scroll callback:
//! tracker.notify(ChangeSource::Scroll(limelight_core::SurfaceRef::Root));
//! // From the host's frame callback:
//! tracker.run_pending(host, painter, Instant::now());
//! # }
//! ```

pub mod bus;
pub mod config;
pub mod surfaces;
pub mod tracker;

pub use bus::{ChangeSignalBus, PassTicket};
pub use config::TrackerConfig;
pub use surfaces::ScrollSurfaceRegistry;
pub use tracker::Tracker;
