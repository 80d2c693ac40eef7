//! Answer provider boundary: prompt + ancestor context in, response text out.
//!
//! The orchestrator depends on the [`AnswerProvider`] trait only; this module
//! defines the trait, the request/error types, and the shared context-block
//! serialization. [`ChatGateway`] is the production implementation: a
//! deterministic offline mock when no API key is configured, OpenAI Chat
//! Completions (feature `openai`) when one is.

mod gateway;

#[cfg(feature = "openai")]
mod openai;

pub use gateway::ChatGateway;

use async_trait::async_trait;
use thiserror::Error;

use crate::context::ContextEntry;

/// One submission: the node's own prompt plus its ordered ancestor context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AskRequest {
    pub prompt: String,
    pub context_entries: Vec<ContextEntry>,
}

/// External-call failure, carried into the node's `error` field.
///
/// Caught at the orchestrator boundary; never propagates past the node that
/// sent. No automatic retry — the user re-issues the send.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderError {
    /// The external call did not succeed.
    #[error("provider request failed: {0}")]
    RequestFailed(String),
    /// The call succeeded but returned no usable content.
    #[error("provider returned no content")]
    EmptyContent,
}

/// Turns a prompt plus inherited context into a response, asynchronously.
///
/// **Interaction**: called by `PromptSession::send` with the request built by
/// `begin_send`; implementations: [`ChatGateway`], test doubles in the
/// session test suite.
#[async_trait]
pub trait AnswerProvider: Send + Sync {
    async fn ask(&self, request: AskRequest) -> Result<String, ProviderError>;
}

/// Serializes ancestor context for the model and for the offline digest.
///
/// One block per entry, `[n] title` then the answer, joined by blank lines.
/// The title is the trimmed prompt or `Parent #n` when blank; the answer is
/// the trimmed response or `No response yet.`. With no entries the block is
/// exactly `No parent context provided.` — tests key on that sentinel.
pub fn format_context_block(entries: &[ContextEntry]) -> String {
    if entries.is_empty() {
        return "No parent context provided.".to_string();
    }
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let title = if entry.prompt.trim().is_empty() {
                format!("Parent #{}", index + 1)
            } else {
                entry.prompt.trim().to_string()
            };
            let answer = if entry.response.trim().is_empty() {
                "No response yet.".to_string()
            } else {
                entry.response.trim().to_string()
            };
            format!("[{}] {}\n{}", index + 1, title, answer)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
