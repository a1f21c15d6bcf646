//! One conversation with the assistant.
//!
//! A session owns its message log, its state and its random source. Each
//! user message schedules exactly one reply on a background task that sleeps
//! for the computed typing delay; closing the session cancels that task and
//! a task that wakes up late finds the session closed and writes nothing.

use crate::engine::{DialogueEngine, PlannedReply};
use folio_core::error::{FolioError, Result};
use folio_core::knowledge::Category;
use folio_core::response::Reply;
use folio_core::session::{
    DialogueEvent, DialogueState, HELP_PROMPT, Message, MessageLog, SessionEvent, detail_message,
    nav_message, transition,
};
use folio_core::speech::SpeechAdapter;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, broadcast};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

const EVENT_CAPACITY: usize = 64;

/// Result of submitting user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// Blank input; nothing happened.
    Ignored,
    /// The user message was appended and a reply will follow after `delay`.
    Scheduled { delay: Duration },
}

/// Per-session knobs.
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    /// Seed for the session's random source; entropy when absent.
    pub seed: Option<u64>,
    /// Whether replies are handed to the speech adapter.
    pub speak_replies: bool,
}

struct SessionInner {
    state: DialogueState,
    log: MessageLog,
    rng: StdRng,
    listening: bool,
}

/// Shared between the session handle and its reply tasks.
struct Shared {
    id: String,
    inner: Mutex<SessionInner>,
    events: broadcast::Sender<SessionEvent>,
    speech: Arc<dyn SpeechAdapter>,
    speak_replies: bool,
    disposed: CancellationToken,
}

/// A single conversation.
///
/// At most one reply is in flight at a time: sending while the previous
/// reply is still being typed returns `FolioError::ReplyInFlight`.
pub struct DialogueSession {
    engine: Arc<DialogueEngine>,
    shared: Arc<Shared>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl DialogueSession {
    pub fn new(
        engine: Arc<DialogueEngine>,
        speech: Arc<dyn SpeechAdapter>,
        options: SessionOptions,
    ) -> Self {
        let rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        let id = Uuid::new_v4().to_string();
        debug!(session_id = %id, seeded = options.seed.is_some(), "created dialogue session");

        Self {
            engine,
            shared: Arc::new(Shared {
                id,
                inner: Mutex::new(SessionInner {
                    state: DialogueState::Uninitialized,
                    log: MessageLog::new(),
                    rng,
                    listening: false,
                }),
                events,
                speech,
                speak_replies: options.speak_replies,
                disposed: CancellationToken::new(),
            }),
            pending: Mutex::new(None),
        }
    }

    pub fn id(&self) -> &str {
        &self.shared.id
    }

    pub fn engine(&self) -> &Arc<DialogueEngine> {
        &self.engine
    }

    pub async fn state(&self) -> DialogueState {
        self.shared.inner.lock().await.state
    }

    /// Snapshot of the message log.
    pub async fn messages(&self) -> Vec<Message> {
        self.shared.inner.lock().await.log.messages().to_vec()
    }

    /// Receives every event published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.shared.events.subscribe()
    }

    /// Opens the session, emitting the greeting pair into an empty log.
    ///
    /// Calling it again does nothing.
    pub async fn open(&self) -> Result<()> {
        let mut inner = self.shared.inner.lock().await;
        self.shared.ensure_open(&inner)?;

        let was = inner.state;
        inner.state = transition(inner.state, DialogueEvent::Opened)?;
        if inner.log.is_empty() {
            let welcome = self.engine.knowledge().welcome().to_string();
            let message = inner.log.push_assistant(welcome, None).clone();
            self.shared.emit(SessionEvent::MessageAppended { message });
            let message = inner.log.push_assistant(HELP_PROMPT, None).clone();
            self.shared.emit(SessionEvent::MessageAppended { message });
        }
        if was != inner.state {
            self.shared.emit(SessionEvent::StateChanged { state: inner.state });
            info!(session_id = %self.shared.id, "opened dialogue session");
        }
        Ok(())
    }

    /// Appends a user message and schedules the reply.
    ///
    /// Blank input returns [`SendOutcome::Ignored`] and leaves the log as is.
    pub async fn send_user_message(&self, text: &str) -> Result<SendOutcome> {
        if text.trim().is_empty() {
            self.shared.ensure_open(&*self.shared.inner.lock().await)?;
            return Ok(SendOutcome::Ignored);
        }
        let engine = self.engine.clone();
        self.submit(text.to_string(), move |rng| engine.plan_reply(text, rng))
            .await
    }

    /// Follows a navigation action as if the user had asked for that section.
    ///
    /// # Errors
    ///
    /// Returns `FolioError::UnknownCategory` without touching the log when
    /// `key` is not a category id.
    pub async fn handle_nav_action(&self, key: &str) -> Result<SendOutcome> {
        let category = self.engine.resolve_nav_key(key)?;
        let canned = nav_message(self.engine.knowledge().label(category));
        let engine = self.engine.clone();
        let text = canned.clone();
        self.submit(canned, move |rng| engine.plan_nav(category, &text, rng))
            .await
    }

    /// Asks for one record within a category, e.g. a single project.
    pub async fn ask_detail(&self, category: Category, query: &str) -> Result<SendOutcome> {
        let canned = detail_message(query.trim());
        let engine = self.engine.clone();
        let text = canned.clone();
        self.submit(canned, move |rng| {
            engine.plan_detail(category, query, &text, rng)
        })
        .await
    }

    /// Waits for the pending reply, if any, and returns the last message.
    pub async fn wait_for_reply(&self) -> Result<Option<Message>> {
        let handle = self.pending.lock().await.take();
        if let Some(handle) = handle {
            handle
                .await
                .map_err(|e| FolioError::internal(format!("reply task failed: {}", e)))?;
        }
        Ok(self.shared.inner.lock().await.log.last().cloned())
    }

    /// Starts voice capture. Does nothing if recognition is unsupported.
    ///
    /// A capture that is already running is stopped and its transcript
    /// discarded.
    pub async fn start_voice_input(&self) -> Result<()> {
        if !self.shared.speech.capabilities().recognition {
            return Ok(());
        }
        let mut inner = self.shared.inner.lock().await;
        self.shared.ensure_open(&inner)?;
        if inner.listening {
            let dropped = self.shared.speech.stop_listening().await?;
            debug!(session_id = %self.shared.id, discarded = dropped.is_some(), "restarted voice capture");
        }
        self.shared.speech.start_listening().await?;
        inner.listening = true;
        Ok(())
    }

    /// Stops voice capture and sends the transcript when there is one.
    pub async fn stop_voice_input(&self) -> Result<SendOutcome> {
        {
            let mut inner = self.shared.inner.lock().await;
            if !inner.listening {
                return Ok(SendOutcome::Ignored);
            }
            inner.listening = false;
        }
        match self.shared.speech.stop_listening().await? {
            Some(transcript) => self.send_user_message(&transcript).await,
            None => Ok(SendOutcome::Ignored),
        }
    }

    /// Tears the session down. A reply still being typed is dropped.
    pub async fn close(&self) {
        self.shared.disposed.cancel();
        let mut inner = self.shared.inner.lock().await;
        // Only an already closed session rejects Close.
        let Ok(closed) = transition(inner.state, DialogueEvent::Close) else {
            return;
        };
        let was_busy = inner.state.is_busy();
        if inner.listening {
            inner.listening = false;
            if let Err(e) = self.shared.speech.stop_listening().await {
                warn!(session_id = %self.shared.id, error = %e, "failed to stop voice capture");
            }
        }
        inner.state = closed;
        if was_busy {
            self.shared.emit(SessionEvent::ReplyCancelled);
        }
        self.shared.emit(SessionEvent::StateChanged { state: closed });
        info!(session_id = %self.shared.id, messages = inner.log.len(), "closed dialogue session");
    }

    async fn submit<F>(&self, user_text: String, plan: F) -> Result<SendOutcome>
    where
        F: FnOnce(&mut StdRng) -> PlannedReply,
    {
        let mut inner = self.shared.inner.lock().await;
        self.shared.ensure_open(&inner)?;
        if inner.state.is_busy() {
            return Err(FolioError::ReplyInFlight(self.shared.id.clone()));
        }

        inner.state = transition(inner.state, DialogueEvent::UserMessage)?;
        let message = inner.log.push_user(user_text).clone();
        self.shared.emit(SessionEvent::MessageAppended { message });
        self.shared.emit(SessionEvent::StateChanged { state: inner.state });

        let PlannedReply { reply, delay } = plan(&mut inner.rng);
        inner.state = transition(inner.state, DialogueEvent::Classified { delay })?;
        let delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self.shared.emit(SessionEvent::TypingStarted { delay_ms });
        self.shared.emit(SessionEvent::StateChanged { state: inner.state });
        debug!(
            session_id = %self.shared.id,
            categories = ?reply.categories,
            delay_ms,
            "scheduled reply"
        );
        drop(inner);

        let shared = self.shared.clone();
        let handle = tokio::spawn(async move {
            tokio::select! {
                _ = shared.disposed.cancelled() => {
                    debug!(session_id = %shared.id, "reply cancelled before delivery");
                }
                _ = tokio::time::sleep(delay) => {
                    shared.deliver(reply).await;
                }
            }
        });
        *self.pending.lock().await = Some(handle);

        Ok(SendOutcome::Scheduled { delay })
    }
}

impl Shared {
    fn emit(&self, event: SessionEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }

    fn ensure_open(&self, inner: &SessionInner) -> Result<()> {
        if inner.state.is_closed() || self.disposed.is_cancelled() {
            Err(FolioError::SessionClosed(self.id.clone()))
        } else {
            Ok(())
        }
    }

    async fn deliver(self: &Arc<Self>, reply: Reply) {
        let mut inner = self.inner.lock().await;
        if self.disposed.is_cancelled() || inner.state.is_closed() {
            return;
        }
        let responded = match transition(inner.state, DialogueEvent::TimerElapsed) {
            Ok(state) => state,
            Err(e) => {
                warn!(session_id = %self.id, error = %e, "dropping reply");
                return;
            }
        };
        inner.state = responded;

        let message = inner
            .log
            .push_assistant(reply.text, Some(reply.nav_actions))
            .clone();
        let spoken = message.text.clone();
        self.emit(SessionEvent::MessageAppended { message });
        self.emit(SessionEvent::StateChanged { state: inner.state });

        if self.speak_replies && self.speech.capabilities().synthesis {
            let speech = self.speech.clone();
            let id = self.id.clone();
            tokio::spawn(async move {
                if let Err(e) = speech.speak(&spoken).await {
                    warn!(session_id = %id, error = %e, "speech output failed");
                }
            });
        }

        // Responded -> Idle cannot fail.
        if let Ok(state) = transition(inner.state, DialogueEvent::Delivered) {
            inner.state = state;
            self.emit(SessionEvent::StateChanged { state });
        }
    }
}
