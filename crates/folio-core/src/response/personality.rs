//! Cosmetic emoji decoration of replies.

use crate::classifier::SmallTalk;
use crate::config::AssistantConfig;
use crate::knowledge::{Category, ConversationKind};
use rand::Rng;
use rand::seq::SliceRandom;

/// What a reply is about, for picking an emoji.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mood {
    Topic(Category),
    Conversation(ConversationKind),
}

impl From<SmallTalk> for Mood {
    fn from(talk: SmallTalk) -> Self {
        match talk {
            SmallTalk::Greeting => Mood::Conversation(ConversationKind::Greeting),
            SmallTalk::Appreciation => Mood::Conversation(ConversationKind::Appreciation),
        }
    }
}

fn emojis(mood: Mood) -> &'static [&'static str] {
    match mood {
        Mood::Topic(category) => match category {
            Category::About => &["💡", "🎓", "🚀"],
            Category::Skills => &["🔧", "🧠", "📈"],
            Category::Projects => &["💻", "🔧", "📊"],
            Category::Experience => &["💼", "👥", "🏆"],
            Category::Education => &["📚", "🎓", "📖"],
            Category::Contact => &["📧", "📱", "📍"],
        },
        Mood::Conversation(kind) => match kind {
            ConversationKind::Greeting => &["👋", "😊", "🙋"],
            ConversationKind::Appreciation => &["😊", "🙏", "👍"],
            ConversationKind::Clarification => &["🤔", "❓", "🔍"],
            ConversationKind::Fallback => &[],
        },
    }
}

/// Adds an emoji before or after a reply with a fixed probability.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Personality {
    enabled: bool,
    probability: f64,
}

impl Personality {
    pub fn new(enabled: bool, probability: f64) -> Self {
        let probability = if probability.is_finite() {
            probability.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self {
            enabled,
            probability,
        }
    }

    pub fn from_config(config: &AssistantConfig) -> Self {
        Self::new(config.personality, config.personality_probability)
    }

    pub fn disabled() -> Self {
        Self::new(false, 0.0)
    }

    pub fn decorate<R: Rng + ?Sized>(&self, text: String, mood: Mood, rng: &mut R) -> String {
        if !self.enabled || !rng.gen_bool(self.probability) {
            return text;
        }
        let Some(emoji) = emojis(mood).choose(rng) else {
            return text;
        };
        if rng.gen_bool(0.5) {
            format!("{} {}", emoji, text)
        } else {
            format!("{} {}", text, emoji)
        }
    }
}

impl Default for Personality {
    fn default() -> Self {
        Self::new(true, 0.5)
    }
}

/// Strips a leading or trailing decoration added by [`Personality`].
pub fn strip_decoration(text: &str) -> &str {
    let all = Category::all()
        .map(Mood::Topic)
        .chain(
            [
                ConversationKind::Greeting,
                ConversationKind::Appreciation,
                ConversationKind::Clarification,
            ]
            .into_iter()
            .map(Mood::Conversation),
        )
        .flat_map(|mood| emojis(mood).iter());

    for emoji in all {
        if let Some(rest) = text.strip_prefix(emoji).and_then(|r| r.strip_prefix(' ')) {
            return rest;
        }
        if let Some(rest) = text.strip_suffix(emoji).and_then(|r| r.strip_suffix(' ')) {
            return rest;
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_disabled_never_decorates() {
        let mut rng = StdRng::seed_from_u64(1);
        let p = Personality::disabled();
        for _ in 0..50 {
            let out = p.decorate("plain".into(), Mood::Topic(Category::Skills), &mut rng);
            assert_eq!(out, "plain");
        }
    }

    #[test]
    fn test_always_decorates_with_category_emoji() {
        let mut rng = StdRng::seed_from_u64(2);
        let p = Personality::new(true, 1.0);
        for _ in 0..50 {
            let out = p.decorate("plain".into(), Mood::Topic(Category::Contact), &mut rng);
            assert_ne!(out, "plain");
            assert_eq!(strip_decoration(&out), "plain");
            assert!(emojis(Mood::Topic(Category::Contact))
                .iter()
                .any(|e| out.starts_with(e) || out.ends_with(e)));
        }
    }

    #[test]
    fn test_fallback_has_no_decoration() {
        let mut rng = StdRng::seed_from_u64(3);
        let p = Personality::new(true, 1.0);
        let out = p.decorate(
            "plain".into(),
            Mood::Conversation(ConversationKind::Fallback),
            &mut rng,
        );
        assert_eq!(out, "plain");
    }

    #[test]
    fn test_decoration_rate_is_roughly_half() {
        let mut rng = StdRng::seed_from_u64(4);
        let p = Personality::default();
        let decorated = (0..1000)
            .filter(|_| p.decorate("x".into(), Mood::Topic(Category::About), &mut rng) != "x")
            .count();
        assert!((350..650).contains(&decorated), "decorated {}", decorated);
    }
}
