//! Error types for graph edits and prompt submission.
//!
//! Failures are strictly node-scoped: nothing in this module ever affects a
//! node other than the one the operation targeted. Provider-boundary errors
//! live in [`crate::provider::ProviderError`].

use thiserror::Error;

use crate::graph::NodeId;

/// Structural graph edit error.
///
/// Returned by `GraphStore::add_edge` and the session operations that need an
/// existing node (`spawn_child`, `duplicate`). Lookups never raise this:
/// `inbound_of` / `outbound_of` on a missing node return an empty result so
/// traversal code needs no defensive branching.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    /// An edge endpoint or operation target does not exist in the store.
    #[error("no such node: {0}")]
    UnknownNode(NodeId),
}

/// Prompt submission error.
///
/// Returned by `PromptSession::begin_send` / `send`. `EmptyPrompt` also
/// records a validation message in the node's `error` field; the node's
/// `status` and `response` are left untouched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SendError {
    /// The node has no recorded state (never created or already removed).
    #[error("no such node: {0}")]
    UnknownNode(NodeId),
    /// The prompt is empty or whitespace-only.
    #[error("prompt is empty")]
    EmptyPrompt,
    /// A request for this node is already in flight; the send is rejected,
    /// not queued.
    #[error("node {0} already has a request in flight")]
    InFlight(NodeId),
}
