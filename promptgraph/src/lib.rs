//! # promptgraph
//!
//! Core for a node-graph editor of branching chat prompts: nodes hold one
//! prompt/response pair, directed edges make ancestor context flow into
//! descendants, and each node submits its prompt plus inherited context to an
//! answer provider (or a deterministic offline mock).
//!
//! ## Design Principles
//!
//! - **Explicit ownership**: [`GraphStore`] owns structure and placement,
//!   [`StateTable`] owns conversation content; both are plain values injected
//!   into [`PromptSession`], never ambient singletons — tests run as many
//!   independent sessions as they like.
//! - **Fail-soft lookups**: queries against removed or never-existing nodes
//!   return empty results; only structural edits (`add_edge`) error.
//! - **Cycle-safe traversal**: context collection and staleness propagation
//!   use iterative worklists with visited sets, so they terminate on any
//!   graph and never overflow the stack.
//! - **Node-scoped failures**: a provider error lands in that node's `error`
//!   field and nowhere else.
//!
//! ## Main Modules
//!
//! - [`graph`]: `GraphStore`, `NodeId`, `Edge`, `Point` — nodes and directed
//!   edges with insertion-ordered neighbor queries.
//! - [`state`]: `StateTable`, `NodeState`, `Status`, `StatePatch` — per-node
//!   conversation state with merge-upsert patches.
//! - [`context`]: `collect_context` — ordered ancestor (prompt, response)
//!   pairs, deduplicated, pre-order depth-first.
//! - [`staleness`]: `mark_descendants_dirty` — flags the descendant closure
//!   when a response changes; never demotes an in-flight node.
//! - [`provider`]: `AnswerProvider` trait, `ChatGateway` (offline mock, or
//!   OpenAI via feature `openai`).
//! - [`session`]: `PromptSession` — node lifecycle, the send state machine,
//!   and change-event subscriptions.
//! - [`credential`]: `KeyStore` — the persisted API key; absence means
//!   offline mode.
//!
//! ## Features
//!
//! - `openai`: real Chat Completions through `async-openai`.
//! - `tracing`: structured logging via the `tracing` crate.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use promptgraph::{ChatGateway, Point, PromptSession, Status};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let mut session = PromptSession::new(Arc::new(ChatGateway::new()));
//! let root = session.create_node(Point::ORIGIN, "Explain how bread is made.");
//! let child = session.spawn_child(root).unwrap();
//! session.edit_prompt(child, "Give me a soft bread recipe.");
//!
//! session.send(root).await.unwrap();
//! assert_eq!(session.state_of(root).unwrap().status, Status::Ready);
//! // The child inherits the root's fresh answer as context.
//! assert_eq!(session.collect_context(child).len(), 1);
//! session.send(child).await.unwrap();
//! # }
//! ```

pub mod context;
pub mod credential;
pub mod error;
pub mod graph;
pub mod provider;
pub mod session;
pub mod staleness;
pub mod state;

pub use context::{collect_context, ContextEntry};
pub use credential::KeyStore;
pub use error::{GraphError, SendError};
pub use graph::{Edge, GraphStore, NodeId, Point};
pub use provider::{AnswerProvider, AskRequest, ChatGateway, ProviderError};
pub use session::{PromptSession, SessionEvent, Template};
pub use staleness::mark_descendants_dirty;
pub use state::{NodeState, StatePatch, StateTable, Status};
