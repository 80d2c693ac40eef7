//! Context aggregation: the ordered ancestor (prompt, response) pairs a node
//! sends along with its own prompt.
//!
//! The walk is pre-order depth-first over inbound edges: for each inbound
//! edge in store order, the parent's entry is emitted immediately, then that
//! parent's own ancestors, then the next sibling edge. The order is part of
//! the contract — it determines the context digest the provider sees, so mock
//! output and test expectations stay reproducible.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::graph::{GraphStore, NodeId};
use crate::state::StateTable;

/// One ancestor's contribution to a descendant's request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextEntry {
    pub source_id: NodeId,
    pub prompt: String,
    pub response: String,
}

/// Collects every strict ancestor's (prompt, response) pair exactly once.
///
/// The visited set is seeded with `node_id` itself, so the node never appears
/// in its own context, cycles terminate, and diamond-shaped ancestry yields
/// each ancestor once. Ancestors with no recorded state are silently skipped
/// and not traversed through. Pure read; no side effects.
///
/// Implemented as an explicit worklist of (node, inbound-edge cursor) frames
/// rather than recursion, so adversarial graphs cannot overflow the stack.
pub fn collect_context(
    graph: &GraphStore,
    states: &StateTable,
    node_id: NodeId,
) -> Vec<ContextEntry> {
    let mut entries = Vec::new();
    let mut visited: HashSet<NodeId> = HashSet::new();
    visited.insert(node_id);

    // Each frame is a node whose inbound edges are being scanned, plus the
    // index of the next edge to look at.
    let mut stack: Vec<(NodeId, usize)> = vec![(node_id, 0)];
    while let Some((current, cursor)) = stack.pop() {
        let inbound = graph.inbound_of(current);
        if cursor >= inbound.len() {
            continue;
        }
        // Come back for the remaining sibling edges after this parent's
        // ancestry is exhausted.
        stack.push((current, cursor + 1));

        let parent = inbound[cursor].source;
        if visited.contains(&parent) {
            continue;
        }
        let Some(state) = states.get(parent) else {
            // Never created or already removed: skip, and do not walk past it.
            continue;
        };
        visited.insert(parent);
        entries.push(ContextEntry {
            source_id: parent,
            prompt: state.prompt.clone(),
            response: state.response.clone(),
        });
        stack.push((parent, 0));
    }
    entries
}
