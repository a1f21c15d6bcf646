use serde::{Deserialize, Serialize};

use super::{DialogueState, Message};

/// Events a dialogue session publishes to its subscribers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// A message was appended to the log.
    MessageAppended { message: Message },
    /// The session moved to a new state.
    StateChanged { state: DialogueState },
    /// The typing indicator should be shown for `delay_ms`.
    TypingStarted { delay_ms: u64 },
    /// A pending reply was dropped because the session closed.
    ReplyCancelled,
}
