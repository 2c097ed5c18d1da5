#![forbid(unsafe_code)]

//! Limelight Render
//!
//! Overlay lifecycle for the Limelight engine: one bounding-box indicator
//! per tracked target plus a single spotlight overlay, painted through a
//! host-implemented [`OverlayPainter`].
//!
//! # Key Components
//!
//! - [`OverlayPainter`] - Trait the host implements to draw overlays
//! - [`IndicatorRenderer`] - Creation, repositioning, badge numbering, removal
//! - [`Indicator`] - The visual twin of one tracked target
//! - [`RecordingPainter`] - In-memory painter for tests
//!
//! # Role in Limelight
//! Side effects here are confined to the overlay layer: this crate never
//! mutates tracked nodes and never touches the engine's registry. The
//! engine (`limelight-engine`) decides what exists; this crate makes it
//! visible.

pub mod indicator;
pub mod painter;

pub use indicator::{Indicator, IndicatorRenderer};
pub use painter::{OverlayId, OverlayKind, OverlayPainter, RecordedOverlay, RecordingPainter};
