//! Graph store: nodes + directed edges (parent → child).
//!
//! The store owns structural placement only; conversational content lives in
//! [`crate::state::StateTable`]. Neighbor queries return edges in insertion
//! order and fail soft on unknown ids.

mod store;

pub use store::{Edge, GraphStore, NodeId, Point};
