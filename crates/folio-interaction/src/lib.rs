//! Runtime side of the assistant: the per-session dialogue loop with its
//! scheduled, cancellable replies, and the local speech adapter.

pub mod command_speech;
pub mod dialogue_session;
pub mod engine;

pub use command_speech::CommandSpeech;
pub use dialogue_session::{DialogueSession, SendOutcome, SessionOptions};
pub use engine::{DialogueEngine, PlannedReply};
