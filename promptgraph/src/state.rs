//! Node state table: id → mutable conversation state.
//!
//! Owns prompt, response, submission status, staleness flag, and the per-node
//! error message. The graph store owns only structural placement; everything
//! a node *says* lives here. `set` is an idempotent upsert with field-wise
//! merge, so callers can patch a single field without touching the rest.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::graph::NodeId;

/// Submission status of one node.
///
/// `Stale` is set by staleness propagation when an ancestor's response
/// changed; it re-enters the send cycle exactly like `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Idle,
    Loading,
    Ready,
    Stale,
    Error,
}

/// Conversation state of one node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeState {
    pub prompt: String,
    /// Empty until the first successful send.
    pub response: String,
    pub status: Status,
    /// True when an ancestor's response changed since this node last sent.
    pub context_dirty: bool,
    /// Per-node inline message: validation or provider failure.
    pub error: Option<String>,
}

impl Default for NodeState {
    fn default() -> Self {
        Self {
            prompt: String::new(),
            response: String::new(),
            status: Status::Idle,
            context_dirty: false,
            error: None,
        }
    }
}

impl NodeState {
    /// Default state with the given initial prompt.
    pub fn with_prompt(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Self::default()
        }
    }
}

/// Partial update merged into a node's state by [`StateTable::set`].
///
/// `None` fields are preserved. `error` is doubly optional so a patch can
/// distinguish "leave the message alone" (`None`) from "clear it"
/// (`Some(None)`).
#[derive(Debug, Clone, Default)]
pub struct StatePatch {
    pub prompt: Option<String>,
    pub response: Option<String>,
    pub status: Option<Status>,
    pub context_dirty: Option<bool>,
    pub error: Option<Option<String>>,
}

/// Mapping from node id to conversation state.
///
/// Exclusive owner of node content. Lookups fail soft: `get` on a removed or
/// never-created id returns `None`, and `set` on an unknown id creates the
/// default state first (idempotent upsert).
#[derive(Debug, Default)]
pub struct StateTable {
    entries: HashMap<NodeId, NodeState>,
}

impl StateTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// State for `id`, or `None` when absent.
    pub fn get(&self, id: NodeId) -> Option<&NodeState> {
        self.entries.get(&id)
    }

    /// Inserts the default state with an initial prompt, replacing any
    /// previous state for `id`.
    pub fn insert_default(&mut self, id: NodeId, initial_prompt: impl Into<String>) {
        self.entries.insert(id, NodeState::with_prompt(initial_prompt));
    }

    /// Merges `patch` into the state for `id`, creating the default state
    /// first when `id` is unknown.
    pub fn set(&mut self, id: NodeId, patch: StatePatch) {
        let state = self.entries.entry(id).or_default();
        if let Some(prompt) = patch.prompt {
            state.prompt = prompt;
        }
        if let Some(response) = patch.response {
            state.response = response;
        }
        if let Some(status) = patch.status {
            state.status = status;
        }
        if let Some(dirty) = patch.context_dirty {
            state.context_dirty = dirty;
        }
        if let Some(error) = patch.error {
            state.error = error;
        }
    }

    /// Removes the state for `id`; no-op when absent.
    pub fn remove(&mut self, id: NodeId) {
        self.entries.remove(&id);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
