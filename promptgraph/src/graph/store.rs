//! Node and edge storage with insertion-ordered neighbor queries.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GraphError;

/// Opaque node identifier, unique and stable for the node's lifetime.
///
/// Allocated by [`GraphStore::add_node`]; never reused within a store, even
/// after `clear()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// 2D placement on the rendering surface. Structural only; the core never
/// interprets coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Placement shifted by (dx, dy). Used for child and duplicate spawn
    /// offsets.
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Directed edge: `source`'s context flows into `target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
}

/// Nodes plus directed edges, with insertion-ordered neighbor queries.
///
/// Multiple inbound and outbound edges per node are allowed (multiple
/// parents, fan-out). Self-loops are accepted; traversals tolerate them.
/// Lookups on removed or never-existing ids return empty results rather than
/// erroring — only `add_edge` with a missing endpoint is an error.
#[derive(Debug, Default)]
pub struct GraphStore {
    nodes: HashMap<NodeId, Point>,
    /// Insertion order is the traversal order contract for `inbound_of` /
    /// `outbound_of`.
    edges: Vec<Edge>,
    next_id: u64,
}

impl GraphStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node at the given placement and returns its fresh id.
    pub fn add_node(&mut self, at: Point) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, at);
        id
    }

    /// Adds a directed edge `source → target`.
    ///
    /// Both endpoints must exist; otherwise returns
    /// [`GraphError::UnknownNode`] naming the missing one. A self-loop is
    /// accepted and treated as a no-op by traversals.
    pub fn add_edge(&mut self, source: NodeId, target: NodeId) -> Result<(), GraphError> {
        if !self.nodes.contains_key(&source) {
            return Err(GraphError::UnknownNode(source));
        }
        if !self.nodes.contains_key(&target) {
            return Err(GraphError::UnknownNode(target));
        }
        self.edges.push(Edge { source, target });
        Ok(())
    }

    /// Removes the first edge matching `source → target`; no-op when absent.
    pub fn remove_edge(&mut self, source: NodeId, target: NodeId) {
        if let Some(pos) = self
            .edges
            .iter()
            .position(|e| e.source == source && e.target == target)
        {
            self.edges.remove(pos);
        }
    }

    /// Removes a node and all incident edges; no-op when absent.
    pub fn remove_node(&mut self, id: NodeId) {
        self.nodes.remove(&id);
        self.edges.retain(|e| e.source != id && e.target != id);
    }

    /// Edges whose target is `id`, in insertion order. Empty for unknown ids.
    pub fn inbound_of(&self, id: NodeId) -> Vec<Edge> {
        self.edges.iter().filter(|e| e.target == id).copied().collect()
    }

    /// Edges whose source is `id`, in insertion order. Empty for unknown ids.
    pub fn outbound_of(&self, id: NodeId) -> Vec<Edge> {
        self.edges.iter().filter(|e| e.source == id).copied().collect()
    }

    /// Placement the node was created at; `None` for unknown ids.
    pub fn position_of(&self, id: NodeId) -> Option<Point> {
        self.nodes.get(&id).copied()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// All node ids, unordered.
    pub fn node_ids(&self) -> Vec<NodeId> {
        self.nodes.keys().copied().collect()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Removes every node and edge. Id allocation keeps counting up so ids
    /// from before the clear stay dead.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
    }
}
