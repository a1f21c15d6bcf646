//! Stateless pipeline from user text to a scheduled reply.

use folio_core::classifier::IntentClassifier;
use folio_core::config::AssistantConfig;
use folio_core::error::{FolioError, Result};
use folio_core::knowledge::{Category, KnowledgeBase};
use folio_core::response::{Reply, ResponseSelector};
use folio_core::timing::TimingModel;
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;

/// A reply together with how long to "type" before showing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedReply {
    pub reply: Reply,
    pub delay: Duration,
}

/// Classifier, selector and timing model bundled for one configuration.
///
/// Holds no per-session state; the random source is passed in so each
/// session can own its own seeded generator.
#[derive(Debug, Clone)]
pub struct DialogueEngine {
    knowledge: Arc<KnowledgeBase>,
    classifier: IntentClassifier,
    selector: ResponseSelector,
    timing: TimingModel,
}

impl DialogueEngine {
    pub fn new(knowledge: Arc<KnowledgeBase>, config: &AssistantConfig) -> Self {
        Self {
            classifier: IntentClassifier::new(knowledge.clone()),
            selector: ResponseSelector::new(knowledge.clone(), config),
            timing: TimingModel::new(config.timing),
            knowledge,
        }
    }

    pub fn knowledge(&self) -> &Arc<KnowledgeBase> {
        &self.knowledge
    }

    pub fn classifier(&self) -> &IntentClassifier {
        &self.classifier
    }

    pub fn selector(&self) -> &ResponseSelector {
        &self.selector
    }

    pub fn timing(&self) -> &TimingModel {
        &self.timing
    }

    /// Classifies `input` and picks the reply for it.
    pub fn plan_reply<R: Rng + ?Sized>(&self, input: &str, rng: &mut R) -> PlannedReply {
        let categories = self.classifier.classify(input);
        let small_talk = if categories.is_empty() {
            self.classifier.detect_small_talk(input)
        } else {
            None
        };
        let reply = self.selector.respond(&categories, small_talk, input, rng);
        PlannedReply {
            delay: self.timing.compute_delay(input, rng),
            reply,
        }
    }

    /// Reply to the canned message of a navigation action.
    ///
    /// The chosen category is always part of the answer even if the canned
    /// text were to classify differently.
    pub fn plan_nav<R: Rng + ?Sized>(
        &self,
        category: Category,
        canned: &str,
        rng: &mut R,
    ) -> PlannedReply {
        let mut categories = self.classifier.classify(canned);
        if !categories.contains(&category) {
            categories.push(category);
            categories.sort();
        }
        let reply = self.selector.respond(&categories, None, canned, rng);
        PlannedReply {
            delay: self.timing.compute_delay(canned, rng),
            reply,
        }
    }

    /// Reply to a fine-grained detail request.
    pub fn plan_detail<R: Rng + ?Sized>(
        &self,
        category: Category,
        query: &str,
        canned: &str,
        rng: &mut R,
    ) -> PlannedReply {
        let reply = self.selector.detail_reply(category, query, rng);
        PlannedReply {
            delay: self.timing.compute_delay(canned, rng),
            reply,
        }
    }

    /// Resolves a navigation key to its category.
    ///
    /// # Errors
    ///
    /// Returns `FolioError::UnknownCategory` for keys outside the category set.
    pub fn resolve_nav_key(&self, key: &str) -> Result<Category> {
        Category::from_key(key.trim()).ok_or_else(|| FolioError::UnknownCategory(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::timing::MIN_DELAY;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn engine() -> DialogueEngine {
        DialogueEngine::new(KnowledgeBase::shared_builtin(), &AssistantConfig::default())
    }

    #[test]
    fn test_plan_reply_for_skills() {
        let mut rng = StdRng::seed_from_u64(1);
        let planned = engine().plan_reply("What are your skills?", &mut rng);
        assert!(planned.reply.categories.contains(&Category::Skills));
        assert!(planned.delay >= MIN_DELAY);
    }

    #[test]
    fn test_plan_nav_always_answers_its_category() {
        let engine = engine();
        let mut rng = StdRng::seed_from_u64(2);
        for category in Category::all() {
            let planned = engine.plan_nav(category, "Show me your stuff", &mut rng);
            assert!(planned.reply.categories.contains(&category));
            assert!(planned.reply.nav_actions.iter().all(|a| a.key != category));
        }
    }

    #[test]
    fn test_unknown_nav_key() {
        let err = engine().resolve_nav_key("hobbies").unwrap_err();
        assert!(matches!(err, FolioError::UnknownCategory(k) if k == "hobbies"));
        assert_eq!(engine().resolve_nav_key("contact").unwrap(), Category::Contact);
    }
}
