//! Offline branching demo: load the bread template, answer the root, and
//! watch the children go stale.
//!
//! Run: `cargo run -p promptgraph-examples --example offline_branching`

use std::sync::Arc;

use promptgraph::{ChatGateway, PromptSession, Template};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // No API key: the gateway answers with the deterministic offline mock.
    let mut session = PromptSession::new(Arc::new(ChatGateway::new()));
    let ids = session.apply_template(Template::Bread);
    let root = ids[0];

    session.send(root).await.expect("root prompt is non-empty");
    let root_state = session.state_of(root).expect("root exists");
    println!("root [{:?}]\n{}\n", root_state.status, root_state.response);

    for &child in &ids[1..] {
        let state = session.state_of(child).expect("child exists");
        println!(
            "child {:?} [{:?}] dirty={} — {}",
            child, state.status, state.context_dirty, state.prompt
        );
    }

    // Resending a child consumes the root's fresh answer as context.
    let child = ids[1];
    session.send(child).await.expect("child prompt is non-empty");
    let state = session.state_of(child).expect("child exists");
    println!("\nchild after resend [{:?}]\n{}", state.status, state.response);
}
