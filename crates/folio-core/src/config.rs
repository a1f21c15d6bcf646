use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How matched categories are turned into reply text.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ResponseStrategy {
    /// Draw one template per category from its pool.
    #[default]
    Templates,
    /// Render each category's section verbatim.
    Sections,
}

/// Separator between per-category texts in a multi-category reply.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Joiner {
    #[default]
    Space,
    Newline,
}

impl Joiner {
    pub fn as_str(self) -> &'static str {
        match self {
            Joiner::Space => " ",
            Joiner::Newline => "\n",
        }
    }
}

/// Which typing-delay computation a session uses.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TimingStrategy {
    #[default]
    Linear,
    Bands,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AssistantConfig {
    pub response_strategy: ResponseStrategy,
    pub joiner: Joiner,
    pub personality: bool,
    pub personality_probability: f64,
    pub timing: TimingStrategy,
    /// Fixed seed for reproducible replies; entropy when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            response_strategy: ResponseStrategy::default(),
            joiner: Joiner::default(),
            personality: true,
            personality_probability: 0.5,
            timing: TimingStrategy::default(),
            seed: None,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct SpeechConfig {
    pub enabled: bool,
    pub speak_replies: bool,
    /// Local text-to-speech command, e.g. `espeak` or `say`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            speak_replies: true,
            command: None,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct KnowledgeConfig {
    /// Content file replacing the builtin knowledge; relative paths resolve
    /// against the config directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

pub const DEFAULT_RELAY_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ContactConfig {
    pub endpoint: String,
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
    pub to_name: String,
    pub to_email: String,
    pub cooldown_secs: u64,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_RELAY_ENDPOINT.to_string(),
            service_id: String::new(),
            template_id: String::new(),
            public_key: String::new(),
            to_name: String::new(),
            to_email: String::new(),
            cooldown_secs: 60,
        }
    }
}

impl ContactConfig {
    /// True when the relay credentials are filled in.
    pub fn is_configured(&self) -> bool {
        !self.service_id.is_empty() && !self.template_id.is_empty() && !self.public_key.is_empty()
    }
}

/// Root of `config.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct RootConfig {
    pub assistant: AssistantConfig,
    pub speech: SpeechConfig,
    pub knowledge: KnowledgeConfig,
    pub contact: ContactConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_yields_defaults() {
        let config: RootConfig = toml::from_str("").unwrap();
        assert_eq!(config, RootConfig::default());
        assert_eq!(config.contact.cooldown_secs, 60);
        assert!((config.assistant.personality_probability - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_partial_sections_keep_other_defaults() {
        let config: RootConfig = toml::from_str(
            r#"
[assistant]
response_strategy = "sections"
joiner = "newline"
timing = "bands"
seed = 7

[speech]
command = "espeak"
"#,
        )
        .unwrap();
        assert_eq!(config.assistant.response_strategy, ResponseStrategy::Sections);
        assert_eq!(config.assistant.joiner, Joiner::Newline);
        assert_eq!(config.assistant.timing, TimingStrategy::Bands);
        assert_eq!(config.assistant.seed, Some(7));
        assert!(config.assistant.personality);
        assert!(config.speech.enabled);
        assert_eq!(config.speech.command.as_deref(), Some("espeak"));
        assert!(!config.contact.is_configured());
    }
}
