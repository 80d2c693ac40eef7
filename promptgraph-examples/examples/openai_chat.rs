//! Real-model demo: one root question with a follow-up child, answered by
//! OpenAI. Requires `OPENAI_API_KEY` (read via `.env` or the environment).
//!
//! Run: `cargo run -p promptgraph-examples --features openai --example openai_chat`

use std::sync::Arc;

use tokio_stream::StreamExt;

use promptgraph::{ChatGateway, Point, PromptSession, SessionEvent};

#[tokio::main]
async fn main() {
    let gateway = ChatGateway::from_env();
    if gateway.is_offline() {
        eprintln!("OPENAI_API_KEY is not set; answers will come from the offline mock.");
    }

    let mut session = PromptSession::new(Arc::new(gateway));
    let events = session.subscribe();

    let root = session.create_node(Point::ORIGIN, "Summarize quantum entanglement.");
    let child = session.spawn_child(root).unwrap();
    session.edit_prompt(child, "Explain it like I am five.");

    session.send(root).await.expect("root send");
    session.send(child).await.expect("child send");

    let child_state = session.state_of(child).expect("child exists");
    println!("{}", child_state.response);

    drop(session);
    let seen: Vec<SessionEvent> = events.collect().await;
    eprintln!("({} session events observed)", seen.len());
}
