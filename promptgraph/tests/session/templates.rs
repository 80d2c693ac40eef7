//! Workspace lifecycle: reset, quick-start templates, child spawning and
//! duplication.

use promptgraph::{Point, Status, Template};

use crate::common::{session_with, ScriptedProvider};

/// **Scenario**: the bread template wires one explainer into two children.
#[test]
fn bread_template_shape() {
    let mut session = session_with(ScriptedProvider::answering("answer"));
    let ids = session.apply_template(Template::Bread);
    assert_eq!(ids.len(), 3);
    assert_eq!(
        session.state_of(ids[0]).unwrap().prompt,
        "Explain how bread is made."
    );
    assert_eq!(session.graph().edge_count(), 2);

    let baking_ctx = session.collect_context(ids[1]);
    assert_eq!(baking_ctx.len(), 1);
    assert_eq!(baking_ctx[0].source_id, ids[0]);
}

/// **Scenario**: the science template fans one core node into three
/// follow-ups.
#[test]
fn science_template_shape() {
    let mut session = session_with(ScriptedProvider::answering("answer"));
    let ids = session.apply_template(Template::Science);
    assert_eq!(ids.len(), 4);
    assert_eq!(session.graph().edge_count(), 3);
    for &child in &ids[1..] {
        let ctx = session.collect_context(child);
        assert_eq!(ctx.len(), 1);
        assert_eq!(ctx[0].source_id, ids[0]);
    }
}

/// **Scenario**: the blank template creates three unconnected roots.
#[test]
fn blank_template_shape() {
    let mut session = session_with(ScriptedProvider::answering("answer"));
    let ids = session.apply_template(Template::Blank);
    assert_eq!(ids.len(), 3);
    assert_eq!(session.graph().edge_count(), 0);
    for &id in &ids {
        assert!(session.collect_context(id).is_empty());
    }
}

/// **Scenario**: loading a template clears the previous workspace; old ids
/// are dead afterwards.
#[test]
fn template_clears_previous_workspace() {
    let mut session = session_with(ScriptedProvider::answering("answer"));
    let old = session.create_node(Point::ORIGIN, "old");
    session.apply_template(Template::Blank);
    assert!(session.state_of(old).is_none());
    assert!(!session.graph().contains(old));
    assert_eq!(session.graph().node_count(), 3);
}

/// **Scenario**: reset seeds exactly one starter node.
#[test]
fn reset_seeds_starter_node() {
    let mut session = session_with(ScriptedProvider::answering("answer"));
    session.apply_template(Template::Science);
    let seed = session.reset();
    assert_eq!(session.graph().node_count(), 1);
    let state = session.state_of(seed).unwrap();
    assert_eq!(state.prompt, "Explain how bread is made.");
    assert_eq!(state.status, Status::Idle);
}

/// **Scenario**: spawn_child places the child right of the parent and wires
/// the context edge.
#[test]
fn spawn_child_offsets_and_connects() {
    let mut session = session_with(ScriptedProvider::answering("answer"));
    let parent = session.create_node(Point::new(100.0, 50.0), "root");
    let child = session.spawn_child(parent).unwrap();

    let at = session.graph().position_of(child).unwrap();
    assert_eq!((at.x, at.y), (520.0, 70.0));
    assert_eq!(session.state_of(child).unwrap().prompt, "");
    let ctx_sources: Vec<_> = session
        .graph()
        .inbound_of(child)
        .iter()
        .map(|e| e.source)
        .collect();
    assert_eq!(ctx_sources, vec![parent]);
}

/// **Scenario**: duplicate copies prompt and response but starts Idle, with
/// no edges.
#[tokio::test]
async fn duplicate_copies_content_not_edges() {
    let mut session = session_with(ScriptedProvider::answering("answer"));
    let parent = session.create_node(Point::ORIGIN, "root");
    let node = session.spawn_child(parent).unwrap();
    session.edit_prompt(node, "child prompt");
    session.send(node).await.unwrap();

    let copy = session.duplicate(node).unwrap();
    let copy_state = session.state_of(copy).unwrap();
    assert_eq!(copy_state.prompt, "child prompt");
    assert_eq!(copy_state.response, "answer");
    assert_eq!(copy_state.status, Status::Idle);
    assert!(session.graph().inbound_of(copy).is_empty());
    assert!(session.graph().outbound_of(copy).is_empty());
}

/// **Scenario**: spawn_child and duplicate on an unknown node fail with
/// UnknownNode.
#[test]
fn spawn_and_duplicate_unknown_node() {
    use promptgraph::GraphError;
    let mut session = session_with(ScriptedProvider::answering("answer"));
    let ghost = session.create_node(Point::ORIGIN, "");
    session.remove_node(ghost);
    assert_eq!(session.spawn_child(ghost), Err(GraphError::UnknownNode(ghost)));
    assert_eq!(session.duplicate(ghost), Err(GraphError::UnknownNode(ghost)));
}
