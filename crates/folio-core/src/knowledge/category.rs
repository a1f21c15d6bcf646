//! The closed set of topics the assistant can talk about.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumCount, EnumIter, EnumString, IntoEnumIterator};

/// A topic category (intent) the classifier can detect.
///
/// Declaration order is significant: classification results, navigation
/// menus and the fallback listing all follow it.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    EnumString,
    EnumIter,
    EnumCount,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Category {
    About,
    Skills,
    Projects,
    Experience,
    Education,
    Contact,
}

impl Category {
    /// All categories in declaration order.
    pub fn all() -> impl Iterator<Item = Category> {
        Category::iter()
    }

    /// Stable index into per-category tables.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Category id as used by navigation keys and content files.
    pub fn key(self) -> &'static str {
        match self {
            Category::About => "about",
            Category::Skills => "skills",
            Category::Projects => "projects",
            Category::Experience => "experience",
            Category::Education => "education",
            Category::Contact => "contact",
        }
    }

    /// Parses a navigation key, case-insensitively.
    pub fn from_key(key: &str) -> Option<Category> {
        key.trim().parse().ok()
    }
}

/// Conversational pseudo-categories that only own a template pool.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumCount,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ConversationKind {
    Greeting,
    Appreciation,
    Clarification,
    Fallback,
}

impl ConversationKind {
    pub fn index(self) -> usize {
        self as usize
    }
}
