//! Prompt session: the orchestrator tying graph, state, context, staleness,
//! and the answer provider together.
//!
//! One [`PromptSession`] per workspace. Rendering collaborators subscribe to
//! [`SessionEvent`]s instead of being called directly, so the core stays
//! toolkit-agnostic.

mod events;
mod logging;
mod prompt_session;
mod templates;

pub use events::SessionEvent;
pub use prompt_session::PromptSession;
pub use templates::Template;
