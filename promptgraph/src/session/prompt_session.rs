//! The per-workspace orchestrator: node lifecycle plus the send state
//! machine.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio_stream::wrappers::ReceiverStream;

use crate::context::{collect_context, ContextEntry};
use crate::error::{GraphError, SendError};
use crate::graph::{GraphStore, NodeId, Point};
use crate::provider::{AnswerProvider, AskRequest, ProviderError};
use crate::staleness::mark_descendants_dirty;
use crate::state::{NodeState, StatePatch, StateTable, Status};

use super::events::SessionEvent;
use super::logging;
use super::templates::Template;

/// Starter prompt seeded by `reset`.
const SEED_PROMPT: &str = "Explain how bread is made.";
const SEED_POSITION: Point = Point { x: 240.0, y: 120.0 };

/// Child nodes spawn to the right of their parent.
const CHILD_OFFSET: (f64, f64) = (420.0, 20.0);
/// Duplicates land just below the original.
const DUPLICATE_OFFSET: (f64, f64) = (20.0, 220.0);

const EVENT_CHANNEL_CAPACITY: usize = 128;

const EMPTY_PROMPT_MESSAGE: &str = "Enter a prompt before sending.";

/// One branching-prompt workspace.
///
/// Owns the graph store and the node state table; the answer provider is
/// injected at construction, so independent sessions (and test sessions with
/// scripted providers) coexist freely. All mutations happen on the caller's
/// single logical thread; the only suspension point is the provider call
/// inside [`send`](Self::send), split out as
/// [`begin_send`](Self::begin_send) / [`complete_send`](Self::complete_send)
/// for hosts that interleave other work while a request is in flight.
pub struct PromptSession {
    graph: GraphStore,
    states: StateTable,
    provider: Arc<dyn AnswerProvider>,
    subscribers: Vec<mpsc::Sender<SessionEvent>>,
}

impl PromptSession {
    /// Creates an empty session around the given provider.
    pub fn new(provider: Arc<dyn AnswerProvider>) -> Self {
        Self {
            graph: GraphStore::new(),
            states: StateTable::new(),
            provider,
            subscribers: Vec::new(),
        }
    }

    /// Subscribes to session change events.
    ///
    /// Events are delivered best-effort over a bounded channel: a subscriber
    /// that stops polling misses events rather than blocking mutations, and a
    /// dropped receiver is pruned on the next emit.
    pub fn subscribe(&mut self) -> ReceiverStream<SessionEvent> {
        let (tx, rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        self.subscribers.push(tx);
        ReceiverStream::new(rx)
    }

    fn emit(&mut self, event: SessionEvent) {
        self.subscribers.retain(|tx| match tx.try_send(event.clone()) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => true,
            Err(TrySendError::Closed(_)) => false,
        });
    }

    /// Read-only view of the structural graph.
    pub fn graph(&self) -> &GraphStore {
        &self.graph
    }

    /// Conversation state for `id`, or `None` when absent.
    pub fn state_of(&self, id: NodeId) -> Option<&NodeState> {
        self.states.get(id)
    }

    /// Ordered ancestor context `id` would send right now. Pure read.
    pub fn collect_context(&self, id: NodeId) -> Vec<ContextEntry> {
        collect_context(&self.graph, &self.states, id)
    }

    /// Creates a node with default state and the given initial prompt.
    pub fn create_node(&mut self, at: Point, initial_prompt: &str) -> NodeId {
        let id = self.graph.add_node(at);
        self.states.insert_default(id, initial_prompt);
        self.emit(SessionEvent::NodeCreated { id, at });
        id
    }

    /// Connects `source → target` so source's context flows into target.
    pub fn connect(&mut self, source: NodeId, target: NodeId) -> Result<(), GraphError> {
        self.graph.add_edge(source, target)?;
        self.emit(SessionEvent::EdgeAdded { source, target });
        Ok(())
    }

    /// Removes one `source → target` connection; no-op when absent.
    pub fn disconnect(&mut self, source: NodeId, target: NodeId) {
        self.graph.remove_edge(source, target);
        self.emit(SessionEvent::EdgeRemoved { source, target });
    }

    /// Removes a node, its state, and all incident edges.
    pub fn remove_node(&mut self, id: NodeId) {
        self.graph.remove_node(id);
        self.states.remove(id);
        self.emit(SessionEvent::NodeRemoved { id });
    }

    /// Updates a node's prompt.
    ///
    /// Editing a node that already carries a response invalidates its
    /// descendants immediately, before any resend — their inherited context
    /// no longer matches what the edit will produce.
    pub fn edit_prompt(&mut self, id: NodeId, text: &str) {
        self.states.set(
            id,
            StatePatch {
                prompt: Some(text.to_string()),
                ..Default::default()
            },
        );
        self.emit(SessionEvent::NodeChanged { id });
        let has_response = self
            .states
            .get(id)
            .is_some_and(|s| !s.response.is_empty());
        if has_response {
            self.propagate_staleness(id);
        }
    }

    /// Creates an empty child to the right of `parent` and connects it.
    pub fn spawn_child(&mut self, parent: NodeId) -> Result<NodeId, GraphError> {
        let at = self
            .graph
            .position_of(parent)
            .ok_or(GraphError::UnknownNode(parent))?;
        let child = self.create_node(at.offset(CHILD_OFFSET.0, CHILD_OFFSET.1), "");
        self.connect(parent, child)?;
        Ok(child)
    }

    /// Copies a node's prompt and response into a fresh, unconnected node
    /// with status reset to `Idle`.
    pub fn duplicate(&mut self, id: NodeId) -> Result<NodeId, GraphError> {
        let at = self
            .graph
            .position_of(id)
            .ok_or(GraphError::UnknownNode(id))?;
        let source_state = self.states.get(id).cloned().unwrap_or_default();
        let copy = self.create_node(
            at.offset(DUPLICATE_OFFSET.0, DUPLICATE_OFFSET.1),
            &source_state.prompt,
        );
        self.states.set(
            copy,
            StatePatch {
                response: Some(source_state.response),
                status: Some(Status::Idle),
                ..Default::default()
            },
        );
        self.emit(SessionEvent::NodeChanged { id: copy });
        Ok(copy)
    }

    /// Clears the workspace and seeds the starter node.
    pub fn reset(&mut self) -> NodeId {
        self.clear();
        self.create_node(SEED_POSITION, SEED_PROMPT)
    }

    /// Clears the workspace and loads a template. Returns the created node
    /// ids in template order.
    pub fn apply_template(&mut self, template: Template) -> Vec<NodeId> {
        self.clear();
        let spec = template.spec();
        let ids: Vec<NodeId> = spec
            .nodes
            .iter()
            .map(|n| self.create_node(n.at, n.prompt))
            .collect();
        for &(source, target) in spec.edges {
            // Template indices are static and in range.
            let _ = self.connect(ids[source], ids[target]);
        }
        ids
    }

    fn clear(&mut self) {
        self.graph.clear();
        self.states.clear();
        self.emit(SessionEvent::Cleared);
    }

    /// First half of a send: validates, transitions to `Loading`, and builds
    /// the provider request.
    ///
    /// - Unknown node → [`SendError::UnknownNode`].
    /// - A node already `Loading` → [`SendError::InFlight`]; the second send
    ///   is rejected, not queued.
    /// - Empty or whitespace-only prompt → records a validation message in
    ///   the node's `error` and returns [`SendError::EmptyPrompt`]; `status`,
    ///   `response`, and the prompt itself are untouched.
    ///
    /// On success the node is `Loading` with `error` and `context_dirty`
    /// cleared, and the returned request carries the trimmed prompt plus the
    /// ancestor context collected at this instant.
    pub fn begin_send(&mut self, id: NodeId) -> Result<AskRequest, SendError> {
        let state = self.states.get(id).ok_or(SendError::UnknownNode(id))?;
        if state.status == Status::Loading {
            return Err(SendError::InFlight(id));
        }
        let prompt = state.prompt.trim().to_string();
        if prompt.is_empty() {
            self.states.set(
                id,
                StatePatch {
                    error: Some(Some(EMPTY_PROMPT_MESSAGE.to_string())),
                    ..Default::default()
                },
            );
            self.emit(SessionEvent::NodeChanged { id });
            return Err(SendError::EmptyPrompt);
        }

        self.states.set(
            id,
            StatePatch {
                status: Some(Status::Loading),
                error: Some(None),
                context_dirty: Some(false),
                ..Default::default()
            },
        );
        self.emit(SessionEvent::NodeChanged { id });

        let context_entries = collect_context(&self.graph, &self.states, id);
        logging::log_send_start(id, context_entries.len());
        Ok(AskRequest {
            prompt,
            context_entries,
        })
    }

    /// Second half of a send: routes the provider outcome into node state.
    ///
    /// Success stores the response, moves to `Ready`, and invalidates the
    /// descendant closure. A `context_dirty` flag set by an ancestor while
    /// this node was in flight is preserved. Failure stores the message,
    /// moves to `Error`, leaves the previous response as-is, and does not
    /// propagate — a failed send invalidates nobody. If the node was removed
    /// while in flight the outcome is dropped.
    pub fn complete_send(&mut self, id: NodeId, outcome: Result<String, ProviderError>) {
        if self.states.get(id).is_none() {
            return;
        }
        match outcome {
            Ok(response) => {
                self.states.set(
                    id,
                    StatePatch {
                        response: Some(response),
                        status: Some(Status::Ready),
                        error: Some(None),
                        ..Default::default()
                    },
                );
                logging::log_send_ready(id);
                self.emit(SessionEvent::NodeChanged { id });
                self.propagate_staleness(id);
            }
            Err(error) => {
                logging::log_send_failed(id, &error);
                self.states.set(
                    id,
                    StatePatch {
                        status: Some(Status::Error),
                        error: Some(Some(error.to_string())),
                        ..Default::default()
                    },
                );
                self.emit(SessionEvent::NodeChanged { id });
            }
        }
    }

    /// Submits a node's prompt with its inherited context.
    ///
    /// Provider failures are node-scoped and land in the node's `error`
    /// field, so they return `Ok(())` here; only validation and lookup
    /// problems surface as [`SendError`].
    pub async fn send(&mut self, id: NodeId) -> Result<(), SendError> {
        let request = self.begin_send(id)?;
        let provider = Arc::clone(&self.provider);
        let outcome = provider.ask(request).await;
        self.complete_send(id, outcome);
        Ok(())
    }

    fn propagate_staleness(&mut self, origin: NodeId) {
        let touched = mark_descendants_dirty(&self.graph, &mut self.states, origin);
        logging::log_dirty_propagation(origin, touched.len());
        for id in touched {
            self.emit(SessionEvent::NodeChanged { id });
        }
    }
}
