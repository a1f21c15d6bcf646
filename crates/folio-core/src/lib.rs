//! Core domain of the Folio portfolio assistant.
//!
//! Everything here is synchronous and deterministic given an injected random
//! source: the knowledge base, intent classification, reply selection, the
//! typing-delay model and the dialogue state machine. Collaborators with side
//! effects (speech, mail relay, submission ledger) are traits implemented in
//! other crates.

pub mod classifier;
pub mod config;
pub mod contact;
pub mod error;
pub mod knowledge;
pub mod response;
pub mod session;
pub mod speech;
pub mod timing;

// Re-export common types
pub use error::{FolioError, Result};
pub use knowledge::{Category, KnowledgeBase};
