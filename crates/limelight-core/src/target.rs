#![forbid(unsafe_code)]

//! Tracked-target identity.

use std::fmt;

use web_time::Instant;

use crate::host::NodeId;

/// Opaque unique key for a tracked target.
///
/// Generated at registration time from a per-engine sequence counter and
/// stable for the target's whole lifetime. Every other component (badge
/// numbering, indicator lookup, removal) keys off this rather than the node
/// handle, so a recycled node handle can never alias a dead target.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TargetId(String);

impl TargetId {
    /// Build the id for the `seq`-th registration of an engine instance.
    pub fn from_seq(seq: u64) -> Self {
        TargetId(format!("target-{seq}"))
    }

    /// The id as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One node the user has marked selected.
#[derive(Debug, Clone)]
pub struct TrackedTarget {
    /// Stable registration key.
    pub id: TargetId,
    /// The host's handle for the underlying tree node.
    pub node: NodeId,
    /// When the target was registered.
    pub created_at: Instant,
}

impl TrackedTarget {
    /// Register a node as tracked, stamping it with the current time.
    pub fn new(seq: u64, node: NodeId) -> Self {
        Self {
            id: TargetId::from_seq(seq),
            node,
            created_at: Instant::now(),
        }
    }
}
