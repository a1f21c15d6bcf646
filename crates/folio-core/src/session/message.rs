//! Conversation message types.
//!
//! This module contains the message shape consumed by the rendering layer
//! and the append-only log a session keeps.

use crate::knowledge::Category;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A suggested follow-up topic rendered as a clickable affordance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavAction {
    pub key: Category,
    pub label: String,
}

/// A single message in the conversation.
///
/// Serializes as `{id, text, isUser, timestamp, navActions?}` with an
/// ISO-8601 timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    /// May embed paragraph breaks.
    pub text: String,
    pub is_user: bool,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nav_actions: Option<Vec<NavAction>>,
}

/// Append-only, insertion-ordered message log.
///
/// Ids are UUID v4 and timestamps never go backwards even if the wall clock
/// does.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageLog {
    messages: Vec<Message>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn push_user(&mut self, text: impl Into<String>) -> &Message {
        self.push(text.into(), true, None)
    }

    pub fn push_assistant(
        &mut self,
        text: impl Into<String>,
        nav_actions: Option<Vec<NavAction>>,
    ) -> &Message {
        self.push(text.into(), false, nav_actions)
    }

    fn push(&mut self, text: String, is_user: bool, nav_actions: Option<Vec<NavAction>>) -> &Message {
        let now = Utc::now();
        let timestamp = match self.messages.last() {
            Some(prev) if prev.timestamp > now => prev.timestamp,
            _ => now,
        };
        self.messages.push(Message {
            id: Uuid::new_v4().to_string(),
            text,
            is_user,
            timestamp,
            nav_actions,
        });
        // Safe to unwrap because we just pushed an element
        self.messages.last().unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_log_appends_in_order_with_unique_ids() {
        let mut log = MessageLog::new();
        log.push_user("hi");
        log.push_assistant("hello", None);
        log.push_user("projects?");

        assert_eq!(log.len(), 3);
        let texts: Vec<_> = log.messages().iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["hi", "hello", "projects?"]);

        let ids: HashSet<_> = log.messages().iter().map(|m| m.id.clone()).collect();
        assert_eq!(ids.len(), 3);

        for pair in log.messages().windows(2) {
            assert!(pair[0].timestamp <= pair[1].timestamp);
        }
    }

    #[test]
    fn test_message_json_shape() {
        let mut log = MessageLog::new();
        let msg = log
            .push_assistant(
                "Here you go",
                Some(vec![NavAction {
                    key: Category::Contact,
                    label: "Contact".into(),
                }]),
            )
            .clone();

        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["isUser"], false);
        assert_eq!(json["navActions"][0]["key"], "contact");
        assert_eq!(json["navActions"][0]["label"], "Contact");
        assert!(json["timestamp"].as_str().unwrap().contains('T'));

        let user = log.push_user("ok").clone();
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("navActions").is_none());
    }
}
