//! Session-level domain types.
//!
//! # Module Structure
//!
//! - `message`: Conversation messages and the append-only `MessageLog`
//! - `state`: The dialogue state machine (`DialogueState`, `transition`)
//! - `event`: Notifications for UIs (`SessionEvent`)

mod event;
pub mod message;
mod state;

pub use event::SessionEvent;

pub use message::{Message, MessageLog, NavAction};
pub use state::{DialogueEvent, DialogueState, transition};

/// Second message of the greeting pair.
pub const HELP_PROMPT: &str = "Ask me about skills, experience, projects, or contact details.";

/// Canned user message synthesized for a navigation action.
pub fn nav_message(label: &str) -> String {
    format!("Show me your {}", label)
}

/// Canned user message synthesized for a detail request.
pub fn detail_message(query: &str) -> String {
    format!("Tell me more about {}", query)
}
