//! Dialogue session state machine.
//!
//! Transitions are pure: `transition(state, event)` returns the next state or
//! an error, and the session applies the side effects around it.

use crate::error::{FolioError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Where a session is in its request/reply cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DialogueState {
    /// Created but not yet opened; the log is empty.
    Uninitialized,
    /// Waiting for input.
    Idle,
    /// A user message was appended and is being classified.
    Classifying,
    /// The reply is scheduled and will be appended after `delay_ms`.
    Typing { delay_ms: u64 },
    /// The reply was appended; speech output is being triggered.
    Responded,
    /// Torn down; no further transitions.
    Closed,
}

impl DialogueState {
    /// True while a reply is being produced.
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            DialogueState::Classifying | DialogueState::Typing { .. } | DialogueState::Responded
        )
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, DialogueState::Closed)
    }
}

impl fmt::Display for DialogueState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DialogueState::Uninitialized => write!(f, "uninitialized"),
            DialogueState::Idle => write!(f, "idle"),
            DialogueState::Classifying => write!(f, "classifying"),
            DialogueState::Typing { delay_ms } => write!(f, "typing ({}ms)", delay_ms),
            DialogueState::Responded => write!(f, "responded"),
            DialogueState::Closed => write!(f, "closed"),
        }
    }
}

/// Inputs to the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogueEvent {
    Opened,
    UserMessage,
    Classified { delay: Duration },
    TimerElapsed,
    Delivered,
    Close,
}

impl fmt::Display for DialogueEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DialogueEvent::Opened => write!(f, "opened"),
            DialogueEvent::UserMessage => write!(f, "user message"),
            DialogueEvent::Classified { .. } => write!(f, "classified"),
            DialogueEvent::TimerElapsed => write!(f, "timer elapsed"),
            DialogueEvent::Delivered => write!(f, "delivered"),
            DialogueEvent::Close => write!(f, "close"),
        }
    }
}

/// Computes the next state.
///
/// Re-opening an open session is accepted and leaves the state unchanged,
/// which keeps initialization idempotent.
pub fn transition(state: DialogueState, event: DialogueEvent) -> Result<DialogueState> {
    use DialogueEvent as E;
    use DialogueState as S;

    let next = match (state, event) {
        (S::Closed, _) => None,
        (_, E::Close) => Some(S::Closed),
        (S::Uninitialized, E::Opened) => Some(S::Idle),
        (s, E::Opened) => Some(s),
        (S::Idle, E::UserMessage) => Some(S::Classifying),
        (S::Classifying, E::Classified { delay }) => Some(S::Typing {
            delay_ms: u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
        }),
        (S::Typing { .. }, E::TimerElapsed) => Some(S::Responded),
        (S::Responded, E::Delivered) => Some(S::Idle),
        _ => None,
    };

    next.ok_or_else(|| FolioError::InvalidTransition {
        state: state.to_string(),
        event: event.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_cycle() {
        let s = transition(DialogueState::Uninitialized, DialogueEvent::Opened).unwrap();
        assert_eq!(s, DialogueState::Idle);
        let s = transition(s, DialogueEvent::UserMessage).unwrap();
        assert_eq!(s, DialogueState::Classifying);
        let s = transition(
            s,
            DialogueEvent::Classified {
                delay: Duration::from_millis(1200),
            },
        )
        .unwrap();
        assert_eq!(s, DialogueState::Typing { delay_ms: 1200 });
        assert!(s.is_busy());
        let s = transition(s, DialogueEvent::TimerElapsed).unwrap();
        assert_eq!(s, DialogueState::Responded);
        let s = transition(s, DialogueEvent::Delivered).unwrap();
        assert_eq!(s, DialogueState::Idle);
    }

    #[test]
    fn test_reopen_is_idempotent() {
        assert_eq!(
            transition(DialogueState::Idle, DialogueEvent::Opened).unwrap(),
            DialogueState::Idle
        );
        let typing = DialogueState::Typing { delay_ms: 900 };
        assert_eq!(transition(typing, DialogueEvent::Opened).unwrap(), typing);
    }

    #[test]
    fn test_busy_session_rejects_second_message() {
        let err = transition(DialogueState::Typing { delay_ms: 1 }, DialogueEvent::UserMessage)
            .unwrap_err();
        assert!(matches!(err, FolioError::InvalidTransition { .. }));
    }

    #[test]
    fn test_message_before_open_is_rejected() {
        assert!(transition(DialogueState::Uninitialized, DialogueEvent::UserMessage).is_err());
    }

    #[test]
    fn test_closed_is_terminal() {
        let s = transition(DialogueState::Typing { delay_ms: 5 }, DialogueEvent::Close).unwrap();
        assert_eq!(s, DialogueState::Closed);
        assert!(transition(s, DialogueEvent::TimerElapsed).is_err());
        assert!(transition(s, DialogueEvent::Opened).is_err());
        assert!(transition(s, DialogueEvent::Close).is_err());
    }
}
