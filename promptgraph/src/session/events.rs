//! Session change events for rendering collaborators.
//!
//! Every mutation that affects what a node displays emits an event; the
//! rendering surface subscribes and redraws. Serde derives let a front end
//! bridge events as JSON.

use serde::{Deserialize, Serialize};

use crate::graph::{NodeId, Point};

/// One observable change in the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SessionEvent {
    /// A node was created at the given placement.
    NodeCreated { id: NodeId, at: Point },
    /// A node's visible state (prompt, response, status, flags) changed.
    NodeChanged { id: NodeId },
    NodeRemoved { id: NodeId },
    EdgeAdded { source: NodeId, target: NodeId },
    EdgeRemoved { source: NodeId, target: NodeId },
    /// The whole workspace was cleared (reset or template load).
    Cleared,
}
