//! Keyword-containment intent classification.

use crate::knowledge::{Category, KnowledgeBase};
use std::sync::Arc;
use tracing::debug;

/// Small talk recognised only when no topic category matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmallTalk {
    Greeting,
    Appreciation,
}

const GREETING_TOKENS: &[&str] = &["hello", "hi", "hey", "hiya", "greetings", "namaste"];
const GREETING_PHRASES: &[&str] = &["good morning", "good afternoon", "good evening"];
const APPRECIATION_TOKENS: &[&str] = &["thanks", "thank", "thx", "appreciate", "appreciated"];

/// Maps raw text to the categories whose trigger substrings it contains.
#[derive(Debug, Clone)]
pub struct IntentClassifier {
    knowledge: Arc<KnowledgeBase>,
}

impl IntentClassifier {
    pub fn new(knowledge: Arc<KnowledgeBase>) -> Self {
        Self { knowledge }
    }

    /// Classifies `input` into zero or more categories.
    ///
    /// The input is case-folded and nothing else. Results follow category
    /// declaration order regardless of where the keywords appear in the
    /// input. An empty result is a normal outcome.
    pub fn classify(&self, input: &str) -> Vec<Category> {
        let normalized = input.to_lowercase();
        let matched: Vec<Category> = Category::all()
            .filter(|&category| {
                self.knowledge
                    .keywords(category)
                    .iter()
                    .any(|keyword| normalized.contains(keyword.as_str()))
            })
            .collect();

        debug!(input_len = input.len(), ?matched, "classified input");
        matched
    }

    /// Detects greetings and thanks on whole words, so "this" is not "hi".
    pub fn detect_small_talk(&self, input: &str) -> Option<SmallTalk> {
        let normalized = input.to_lowercase();
        let tokens: Vec<&str> = normalized
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .collect();
        let has_token = |list: &[&str]| tokens.iter().any(|t| list.contains(t));

        if has_token(APPRECIATION_TOKENS) {
            Some(SmallTalk::Appreciation)
        } else if has_token(GREETING_TOKENS)
            || GREETING_PHRASES.iter().any(|p| normalized.contains(p))
        {
            Some(SmallTalk::Greeting)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> IntentClassifier {
        IntentClassifier::new(KnowledgeBase::shared_builtin())
    }

    #[test]
    fn test_skills_question_includes_skills() {
        let matched = classifier().classify("tell me about your skills");
        assert!(matched.contains(&Category::Skills));
    }

    #[test]
    fn test_gibberish_matches_nothing() {
        assert!(classifier().classify("totally unrelated gibberish").is_empty());
        assert!(classifier().classify("").is_empty());
    }

    #[test]
    fn test_multiple_categories_in_declaration_order() {
        let matched = classifier().classify("your experience and projects");
        assert_eq!(matched, vec![Category::Projects, Category::Experience]);
    }

    #[test]
    fn test_classification_is_case_insensitive() {
        assert_eq!(classifier().classify("EMAIL?"), vec![Category::Contact]);
    }

    #[test]
    fn test_each_category_matches_its_own_label() {
        let c = classifier();
        for category in Category::all() {
            let text = format!("Show me your {}", c.knowledge.label(category));
            assert!(c.classify(&text).contains(&category), "{}", text);
        }
    }

    #[test]
    fn test_small_talk_uses_whole_words() {
        let c = classifier();
        assert_eq!(c.detect_small_talk("Hi there!"), Some(SmallTalk::Greeting));
        assert_eq!(c.detect_small_talk("good evening"), Some(SmallTalk::Greeting));
        assert_eq!(c.detect_small_talk("thanks a lot"), Some(SmallTalk::Appreciation));
        assert_eq!(c.detect_small_talk("which one is this"), None);
    }
}
