//! Reply text and navigation affordances for a classified input.

use super::personality::{Mood, Personality};
use crate::classifier::SmallTalk;
use crate::config::{AssistantConfig, Joiner, ResponseStrategy};
use crate::knowledge::{Category, ConversationKind, DetailLookup, KnowledgeBase};
use crate::session::message::NavAction;
use rand::Rng;
use rand::seq::SliceRandom;
use std::sync::Arc;
use tracing::debug;

/// A reply ready to be appended to the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    /// Categories the user can jump to next, in declaration order.
    pub nav_actions: Vec<NavAction>,
    /// The categories this reply answered; empty for conversational replies.
    pub categories: Vec<Category>,
}

/// Picks reply text for a set of categories.
///
/// Each matched category contributes one text, joined with the configured
/// joiner. The categories a reply answers are never offered back as
/// navigation actions.
#[derive(Debug, Clone)]
pub struct ResponseSelector {
    knowledge: Arc<KnowledgeBase>,
    strategy: ResponseStrategy,
    joiner: Joiner,
    personality: Personality,
}

impl ResponseSelector {
    pub fn new(knowledge: Arc<KnowledgeBase>, config: &AssistantConfig) -> Self {
        // Section dumps are rendered verbatim.
        let personality = match config.response_strategy {
            ResponseStrategy::Templates => Personality::from_config(config),
            ResponseStrategy::Sections => Personality::disabled(),
        };
        Self {
            knowledge,
            strategy: config.response_strategy,
            joiner: config.joiner,
            personality,
        }
    }

    pub fn with_personality(mut self, personality: Personality) -> Self {
        self.personality = personality;
        self
    }

    pub fn knowledge(&self) -> &Arc<KnowledgeBase> {
        &self.knowledge
    }

    pub fn strategy(&self) -> ResponseStrategy {
        self.strategy
    }

    /// Navigation actions for every category not in `exclude`.
    pub fn nav_actions(&self, exclude: &[Category]) -> Vec<NavAction> {
        Category::all()
            .filter(|c| !exclude.contains(c))
            .map(|key| NavAction {
                key,
                label: self.knowledge.label(key).to_string(),
            })
            .collect()
    }

    /// Builds the reply for a classification result.
    ///
    /// `small_talk` and `input` only matter when `categories` is empty: the
    /// reply is then a greeting or thanks, a clarification request for an
    /// unmatched question, or the fallback, and offers the full menu.
    pub fn respond<R: Rng + ?Sized>(
        &self,
        categories: &[Category],
        small_talk: Option<SmallTalk>,
        input: &str,
        rng: &mut R,
    ) -> Reply {
        if categories.is_empty() {
            return self.conversational(small_talk, input, rng);
        }

        let parts: Vec<String> = categories
            .iter()
            .map(|&category| match self.strategy {
                ResponseStrategy::Templates => self.draw(self.knowledge.templates(category), rng),
                ResponseStrategy::Sections => self.render_section(category),
            })
            .collect();
        let text = parts.join(self.joiner.as_str());
        let text = self
            .personality
            .decorate(text, Mood::Topic(categories[0]), rng);

        debug!(?categories, strategy = ?self.strategy, "selected topic reply");
        Reply {
            text,
            nav_actions: self.nav_actions(categories),
            categories: categories.to_vec(),
        }
    }

    /// Reply for a fine-grained detail request.
    pub fn detail_reply<R: Rng + ?Sized>(
        &self,
        category: Category,
        query: &str,
        rng: &mut R,
    ) -> Reply {
        let lookup = self.knowledge.lookup_detail(category, query);
        let text = lookup.render(self.knowledge.owner_name());
        let text = match lookup {
            DetailLookup::Found(_) => self.personality.decorate(text, Mood::Topic(category), rng),
            DetailLookup::NotFound { .. } => text,
        };
        Reply {
            text,
            nav_actions: self.nav_actions(&[category]),
            categories: vec![category],
        }
    }

    /// `"Please ask about About, Skills, ... or Contact."`
    pub fn menu_prompt(&self) -> String {
        let labels: Vec<&str> = Category::all().map(|c| self.knowledge.label(c)).collect();
        match labels.split_last() {
            Some((last, rest)) if !rest.is_empty() => {
                format!("Please ask about {}, or {}.", rest.join(", "), last)
            }
            _ => format!("Please ask about {}.", labels.join("")),
        }
    }

    fn conversational<R: Rng + ?Sized>(
        &self,
        small_talk: Option<SmallTalk>,
        input: &str,
        rng: &mut R,
    ) -> Reply {
        let kind = match small_talk {
            Some(SmallTalk::Greeting) => ConversationKind::Greeting,
            Some(SmallTalk::Appreciation) => ConversationKind::Appreciation,
            None if input.contains('?') => ConversationKind::Clarification,
            None => ConversationKind::Fallback,
        };

        let text = match (self.strategy, kind) {
            (ResponseStrategy::Sections, ConversationKind::Clarification)
            | (ResponseStrategy::Sections, ConversationKind::Fallback) => self.menu_prompt(),
            _ => {
                let text = self.draw(self.knowledge.conversation_pool(kind), rng);
                self.personality
                    .decorate(text, Mood::Conversation(kind), rng)
            }
        };

        debug!(?kind, "selected conversational reply");
        Reply {
            text,
            nav_actions: self.nav_actions(&[]),
            categories: Vec::new(),
        }
    }

    fn render_section(&self, category: Category) -> String {
        let section = self.knowledge.resolve_section(category);
        format!("Here is my {}:\n{}", section.label, section.content)
    }

    fn draw<R: Rng + ?Sized>(&self, pool: &[String], rng: &mut R) -> String {
        // Pools are validated non-empty when the knowledge base is built.
        pool.choose(rng).cloned().unwrap_or_default()
    }
}
