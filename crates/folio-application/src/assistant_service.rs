//! Assistant bootstrap.
//!
//! Resolves the knowledge base and speech adapter from configuration and
//! hands out dialogue sessions that share them.

use anyhow::{Context, Result};
use folio_core::config::{RootConfig, SpeechConfig};
use folio_core::knowledge::{KnowledgeBase, KnowledgeRepository};
use folio_core::response::Reply;
use folio_core::speech::{NoSpeech, SpeechAdapter};
use folio_infrastructure::{ConfigService, FolioPaths, TomlKnowledgeRepository};
use folio_interaction::{CommandSpeech, DialogueEngine, DialogueSession, SessionOptions};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Shared state behind every session of one running assistant.
pub struct AssistantService {
    config: RootConfig,
    engine: Arc<DialogueEngine>,
    speech: Arc<dyn SpeechAdapter>,
}

impl AssistantService {
    /// Builds the service from the config file.
    ///
    /// A configured knowledge file replaces the builtin content; its path is
    /// resolved against the config directory when relative.
    pub async fn bootstrap(config_service: &ConfigService) -> Result<Self> {
        let config = config_service
            .try_get_config()
            .context("failed to load configuration")?;
        Self::from_config(config, config_service.config_dir()?).await
    }

    /// Builds the service from an already loaded (and possibly overridden)
    /// configuration.
    pub async fn from_config(config: RootConfig, config_dir: PathBuf) -> Result<Self> {
        let knowledge = match &config.knowledge.path {
            Some(path) => {
                let paths = FolioPaths::new(Some(config_dir));
                let resolved = paths.resolve(path)?;
                let repo = TomlKnowledgeRepository::with_path(resolved.clone());
                let kb = repo.load().await.with_context(|| {
                    format!("failed to load knowledge from {}", resolved.display())
                })?;
                Arc::new(kb)
            }
            None => KnowledgeBase::shared_builtin(),
        };

        let speech = speech_adapter(&config.speech);
        info!(
            owner = knowledge.owner_name(),
            speech = speech.capabilities().synthesis,
            "assistant ready"
        );
        Ok(Self::from_parts(config, knowledge, speech))
    }

    pub fn from_parts(
        config: RootConfig,
        knowledge: Arc<KnowledgeBase>,
        speech: Arc<dyn SpeechAdapter>,
    ) -> Self {
        let engine = Arc::new(DialogueEngine::new(knowledge, &config.assistant));
        Self {
            config,
            engine,
            speech,
        }
    }

    pub fn config(&self) -> &RootConfig {
        &self.config
    }

    pub fn engine(&self) -> &Arc<DialogueEngine> {
        &self.engine
    }

    pub fn knowledge(&self) -> &Arc<KnowledgeBase> {
        self.engine.knowledge()
    }

    /// Creates a new unopened session.
    pub fn new_session(&self) -> DialogueSession {
        DialogueSession::new(
            self.engine.clone(),
            self.speech.clone(),
            SessionOptions {
                seed: self.config.assistant.seed,
                speak_replies: self.config.speech.enabled && self.config.speech.speak_replies,
            },
        )
    }

    /// Answers one message immediately, without a session or typing delay.
    pub fn reply_now(&self, text: &str) -> Reply {
        let mut rng = match self.config.assistant.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.engine.plan_reply(text, &mut rng).reply
    }
}

fn speech_adapter(config: &SpeechConfig) -> Arc<dyn SpeechAdapter> {
    if !config.enabled {
        return Arc::new(NoSpeech);
    }
    let detected = match &config.command {
        Some(command) => Some(CommandSpeech::new(command.clone())),
        None => CommandSpeech::detect(),
    };
    match detected {
        Some(speech) if speech.is_available() => Arc::new(speech),
        _ => Arc::new(NoSpeech),
    }
}
