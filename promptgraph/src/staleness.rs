//! Staleness propagation: when a node's response changes, every descendant's
//! inherited context may be out of date.
//!
//! Triggered after a successful send, and after a prompt edit on a node that
//! already carries a response. A failed send never propagates.

use std::collections::HashSet;

use crate::graph::{GraphStore, NodeId};
use crate::state::{StatePatch, StateTable, Status};

/// Flags the full descendant closure of `node_id` as needing refresh.
///
/// Walks outbound edges with an explicit worklist and a visited set, so each
/// reachable node is patched exactly once (diamonds included) and cyclic
/// graphs terminate. Each reached node gets `context_dirty = true` and its
/// status demoted to `Stale` — unless it is currently `Loading`: an in-flight
/// request is never interrupted, it is evaluated when it completes. The
/// origin itself is left untouched. Patches go through the table's upsert
/// `set`, so edges into nodes with no recorded state are tolerated.
///
/// Returns the ids that were patched, in visit order, so callers can emit a
/// change event per node.
pub fn mark_descendants_dirty(
    graph: &GraphStore,
    states: &mut StateTable,
    node_id: NodeId,
) -> Vec<NodeId> {
    let mut touched = Vec::new();
    let mut visited: HashSet<NodeId> = HashSet::new();
    visited.insert(node_id);

    let mut worklist = vec![node_id];
    while let Some(current) = worklist.pop() {
        for edge in graph.outbound_of(current) {
            let child = edge.target;
            if !visited.insert(child) {
                continue;
            }
            let next_status = match states.get(child).map(|s| s.status) {
                Some(Status::Loading) => Status::Loading,
                _ => Status::Stale,
            };
            states.set(
                child,
                StatePatch {
                    context_dirty: Some(true),
                    status: Some(next_status),
                    ..Default::default()
                },
            );
            touched.push(child);
            worklist.push(child);
        }
    }
    touched
}
