//! Logging for session mutations and the send cycle.
//!
//! Structured via the `tracing` crate when feature `tracing` is enabled,
//! stderr fallback otherwise.

use crate::graph::NodeId;
use crate::provider::ProviderError;

/// Log a send leaving the session, with the amount of inherited context.
pub(super) fn log_send_start(node_id: NodeId, context_len: usize) {
    #[cfg(feature = "tracing")]
    tracing::debug!(%node_id, context_len, "send started");

    #[cfg(not(feature = "tracing"))]
    eprintln!(
        "[DEBUG] send started: {} ({} context entries)",
        node_id, context_len
    );
}

/// Log a send completing with a stored response.
pub(super) fn log_send_ready(node_id: NodeId) {
    #[cfg(feature = "tracing")]
    tracing::debug!(%node_id, "send completed");

    #[cfg(not(feature = "tracing"))]
    eprintln!("[DEBUG] send completed: {}", node_id);
}

/// Log a provider failure routed into the node's error field.
pub(super) fn log_send_failed(node_id: NodeId, error: &ProviderError) {
    #[cfg(feature = "tracing")]
    tracing::warn!(%node_id, %error, "send failed");

    #[cfg(not(feature = "tracing"))]
    eprintln!("[WARN] send failed: {}: {}", node_id, error);
}

/// Log staleness propagation fan-out.
pub(super) fn log_dirty_propagation(origin: NodeId, touched: usize) {
    #[cfg(feature = "tracing")]
    tracing::debug!(%origin, touched, "descendants marked stale");

    #[cfg(not(feature = "tracing"))]
    eprintln!(
        "[DEBUG] descendants marked stale: {} ({} nodes)",
        origin, touched
    );
}
