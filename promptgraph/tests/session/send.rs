//! Send state machine: validation, transitions, the in-flight guard, and
//! mid-flight edge cases.

use std::sync::Arc;

use promptgraph::{
    ChatGateway, Point, PromptSession, ProviderError, SendError, Status,
};

use crate::common::{session_with, ScriptedProvider};

/// **Scenario**: send with an empty prompt leaves status and response
/// unchanged and sets a non-empty validation error.
#[tokio::test]
async fn empty_prompt_is_rejected_without_transition() {
    let provider = ScriptedProvider::answering("unused");
    let mut session = session_with(provider.clone());
    let node = session.create_node(Point::ORIGIN, "");

    assert_eq!(session.send(node).await, Err(SendError::EmptyPrompt));
    let state = session.state_of(node).unwrap();
    assert_eq!(state.status, Status::Idle);
    assert_eq!(state.response, "");
    assert!(!state.error.as_deref().unwrap_or("").is_empty());
    assert!(provider.recorded().is_empty(), "provider must not be called");
}

/// **Scenario**: a whitespace-only prompt counts as empty and keeps the
/// prompt text untouched.
#[tokio::test]
async fn whitespace_prompt_is_rejected() {
    let mut session = session_with(ScriptedProvider::answering("unused"));
    let node = session.create_node(Point::ORIGIN, "   ");

    assert_eq!(session.send(node).await, Err(SendError::EmptyPrompt));
    let state = session.state_of(node).unwrap();
    assert_eq!(state.prompt, "   ");
    assert_eq!(state.status, Status::Idle);
}

/// **Scenario**: a successful send stores the response, moves to Ready, and
/// clears a validation error left by an earlier attempt.
#[tokio::test]
async fn successful_send_reaches_ready() {
    let provider = ScriptedProvider::answering("fresh answer");
    let mut session = session_with(provider.clone());
    let node = session.create_node(Point::ORIGIN, "");
    let _ = session.send(node).await;
    session.edit_prompt(node, "  Explain X  ");

    session.send(node).await.unwrap();
    let state = session.state_of(node).unwrap();
    assert_eq!(state.status, Status::Ready);
    assert_eq!(state.response, "fresh answer");
    assert!(state.error.is_none());

    let requests = provider.recorded();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].prompt, "Explain X", "prompt is trimmed");
}

/// **Scenario**: a provider failure moves the node to Error with the message
/// stored and the previous response left as-is.
#[tokio::test]
async fn provider_failure_keeps_previous_response() {
    let provider = ScriptedProvider::answering("first answer");
    let mut session = session_with(provider.clone());
    let node = session.create_node(Point::ORIGIN, "Explain X");
    session.send(node).await.unwrap();

    provider.set_outcome(Err(ProviderError::RequestFailed("status 500".into())));
    session.send(node).await.unwrap();

    let state = session.state_of(node).unwrap();
    assert_eq!(state.status, Status::Error);
    assert_eq!(state.response, "first answer");
    assert!(state.error.as_deref().unwrap().contains("status 500"));
}

/// **Scenario**: a second send while one is in flight is rejected with
/// InFlight; after completion the node can send again.
#[tokio::test]
async fn in_flight_send_is_guarded() {
    let mut session = session_with(ScriptedProvider::answering("answer"));
    let node = session.create_node(Point::ORIGIN, "Explain X");

    let request = session.begin_send(node).unwrap();
    assert_eq!(session.state_of(node).unwrap().status, Status::Loading);
    assert_eq!(session.begin_send(node), Err(SendError::InFlight(node)));
    assert_eq!(session.send(node).await, Err(SendError::InFlight(node)));

    session.complete_send(node, Ok("answer".into()));
    assert_eq!(session.state_of(node).unwrap().status, Status::Ready);
    assert_eq!(request.prompt, "Explain X");
    session.send(node).await.unwrap();
}

/// **Scenario**: send on a removed node is UnknownNode, not a panic.
#[tokio::test]
async fn send_on_removed_node_is_unknown() {
    let mut session = session_with(ScriptedProvider::answering("answer"));
    let node = session.create_node(Point::ORIGIN, "Explain X");
    session.remove_node(node);
    assert_eq!(session.send(node).await, Err(SendError::UnknownNode(node)));
}

/// **Scenario**: a node removed while its request is in flight drops the
/// outcome instead of resurrecting state.
#[tokio::test]
async fn removal_mid_flight_drops_outcome() {
    let mut session = session_with(ScriptedProvider::answering("answer"));
    let node = session.create_node(Point::ORIGIN, "Explain X");
    let _request = session.begin_send(node).unwrap();
    session.remove_node(node);
    session.complete_send(node, Ok("late answer".into()));
    assert!(session.state_of(node).is_none());
}

/// **Scenario**: the request carries the ancestor's (prompt, response) pair
/// collected at begin time.
#[tokio::test]
async fn request_carries_ancestor_context() {
    let provider = ScriptedProvider::answering("answer-A");
    let mut session = session_with(provider.clone());
    let a = session.create_node(Point::ORIGIN, "Explain X");
    let b = session.create_node(Point::new(420.0, 20.0), "Go deeper");
    session.connect(a, b).unwrap();
    session.send(a).await.unwrap();
    session.send(b).await.unwrap();

    let requests = provider.recorded();
    let for_b = &requests[1];
    assert_eq!(for_b.context_entries.len(), 1);
    assert_eq!(for_b.context_entries[0].source_id, a);
    assert_eq!(for_b.context_entries[0].prompt, "Explain X");
    assert_eq!(for_b.context_entries[0].response, "answer-A");
}

/// **Scenario**: offline mode — send on "Hi" with no parents yields the
/// deterministic placeholder with the no-context sentinel, never an error.
#[tokio::test]
async fn offline_gateway_end_to_end() {
    let mut session = PromptSession::new(Arc::new(ChatGateway::new()));
    let node = session.create_node(Point::ORIGIN, "Hi");
    session.send(node).await.unwrap();

    let state = session.state_of(node).unwrap();
    assert_eq!(state.status, Status::Ready);
    assert!(state.response.contains("Hi"));
    assert!(state.response.contains("No parent context provided."));
    assert!(state.error.is_none());
}

/// **Scenario**: begin_send clears a stale flag; a dirty flag set while in
/// flight survives completion.
#[tokio::test]
async fn dirty_flag_set_in_flight_survives_completion() {
    let provider = ScriptedProvider::answering("answer");
    let mut session = session_with(provider);
    let a = session.create_node(Point::ORIGIN, "root");
    let b = session.create_node(Point::ORIGIN, "child");
    session.connect(a, b).unwrap();

    session.send(a).await.unwrap();
    let b_state = session.state_of(b).unwrap();
    assert_eq!(b_state.status, Status::Stale);
    assert!(b_state.context_dirty);

    let _request = session.begin_send(b).unwrap();
    assert!(!session.state_of(b).unwrap().context_dirty, "cleared at begin");

    // Ancestor's answer changes while b is in flight.
    session.edit_prompt(a, "root, edited");
    let b_state = session.state_of(b).unwrap();
    assert_eq!(b_state.status, Status::Loading, "never demoted in flight");
    assert!(b_state.context_dirty);

    session.complete_send(b, Ok("late".into()));
    let b_state = session.state_of(b).unwrap();
    assert_eq!(b_state.status, Status::Ready);
    assert!(b_state.context_dirty, "in-flight invalidation is preserved");
}
