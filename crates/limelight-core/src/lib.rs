#![forbid(unsafe_code)]

//! Limelight Core
//!
//! Foundation types for the Limelight live overlay synchronization engine:
//! viewport geometry, the host-tree abstraction, geometry probing, tagged
//! change events, and tracked-target identity.
//!
//! # Key Components
//!
//! - [`Rect`] - Axis-aligned box in viewport-relative pixels
//! - [`HostTree`] - Trait the embedding implements to expose its tree
//! - [`GeometryProbe`] / [`Measurement`] - Uncached per-node geometry reads
//! - [`ChangeSource`] - One tagged event for all notification sources
//! - [`TrackedTarget`] / [`TargetId`] - Identity of a selected node
//!
//! # Role in Limelight
//! This crate is a leaf: it defines the vocabulary shared by
//! `limelight-render` (overlay lifecycle) and `limelight-engine`
//! (orchestration). It holds no engine state of its own.

pub mod event;
pub mod geometry;
pub mod host;
pub mod probe;
pub mod target;

pub use event::ChangeSource;
pub use geometry::Rect;
pub use host::{HostCaps, HostTree, NodeId, Overflow, ProbeFault, ScrollExtent, SurfaceRef};
pub use probe::{GeometryProbe, Measurement};
pub use target::{TargetId, TrackedTarget};
