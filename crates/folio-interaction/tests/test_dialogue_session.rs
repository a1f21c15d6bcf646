use folio_core::config::AssistantConfig;
use folio_core::error::{FolioError, Result};
use folio_core::knowledge::{Category, KnowledgeBase};
use folio_core::session::{DialogueState, SessionEvent};
use folio_core::speech::{NoSpeech, SpeechAdapter, SpeechCapabilities};
use folio_core::timing::MIN_DELAY;
use folio_interaction::{DialogueEngine, DialogueSession, SendOutcome, SessionOptions};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

fn engine_with(config: AssistantConfig) -> Arc<DialogueEngine> {
    Arc::new(DialogueEngine::new(KnowledgeBase::shared_builtin(), &config))
}

fn plain_config() -> AssistantConfig {
    AssistantConfig {
        personality: false,
        ..AssistantConfig::default()
    }
}

async fn open_session(seed: u64) -> DialogueSession {
    let session = DialogueSession::new(
        engine_with(plain_config()),
        Arc::new(NoSpeech),
        SessionOptions {
            seed: Some(seed),
            speak_replies: true,
        },
    );
    session.open().await.unwrap();
    session
}

fn nav_keys(message: &folio_core::session::Message) -> Vec<Category> {
    message
        .nav_actions
        .as_ref()
        .map(|actions| actions.iter().map(|a| a.key).collect())
        .unwrap_or_default()
}

#[tokio::test(start_paused = true)]
async fn open_emits_greeting_pair_once() {
    let session = open_session(1).await;
    session.open().await.unwrap();

    let messages = session.messages().await;
    assert_eq!(messages.len(), 2);
    assert!(messages.iter().all(|m| !m.is_user));
    assert_eq!(messages[0].text, KnowledgeBase::shared_builtin().welcome());
    assert_eq!(session.state().await, DialogueState::Idle);
}

#[tokio::test(start_paused = true)]
async fn skills_question_gets_skills_reply() {
    let session = open_session(2).await;
    let outcome = session.send_user_message("What are your skills?").await.unwrap();
    assert!(matches!(outcome, SendOutcome::Scheduled { .. }));

    let reply = session.wait_for_reply().await.unwrap().unwrap();
    assert!(!reply.is_user);
    let kb = KnowledgeBase::shared_builtin();
    assert!(kb.templates(Category::Skills).contains(&reply.text));
    assert!(!nav_keys(&reply).contains(&Category::Skills));
    assert_eq!(session.messages().await.len(), 4);
    assert_eq!(session.state().await, DialogueState::Idle);
}

#[tokio::test(start_paused = true)]
async fn gibberish_offers_every_category() {
    let session = open_session(3).await;
    session.send_user_message("asdkjh qwe").await.unwrap();
    let reply = session.wait_for_reply().await.unwrap().unwrap();
    assert_eq!(nav_keys(&reply), Category::all().collect::<Vec<_>>());
}

#[tokio::test(start_paused = true)]
async fn two_topics_are_answered_together() {
    let session = open_session(4).await;
    session
        .send_user_message("Tell me your experience and projects")
        .await
        .unwrap();
    let reply = session.wait_for_reply().await.unwrap().unwrap();

    let kb = KnowledgeBase::shared_builtin();
    let joined = kb.templates(Category::Projects).iter().any(|p| {
        kb.templates(Category::Experience)
            .iter()
            .any(|e| reply.text == format!("{} {}", p, e))
    });
    assert!(joined, "unexpected reply: {}", reply.text);

    let keys = nav_keys(&reply);
    assert!(!keys.contains(&Category::Projects));
    assert!(!keys.contains(&Category::Experience));
    assert_eq!(keys.len(), 4);
}

#[tokio::test(start_paused = true)]
async fn typing_delay_has_a_floor() {
    let session = open_session(5).await;
    for text in ["hi", "a", "What are your skills?"] {
        match session.send_user_message(text).await.unwrap() {
            SendOutcome::Scheduled { delay } => assert!(delay >= MIN_DELAY),
            SendOutcome::Ignored => panic!("non-blank input was ignored"),
        }
        session.wait_for_reply().await.unwrap();
    }
}

#[tokio::test(start_paused = true)]
async fn blank_input_is_ignored() {
    let session = open_session(6).await;
    for text in ["", "   ", "\n\t"] {
        assert_eq!(
            session.send_user_message(text).await.unwrap(),
            SendOutcome::Ignored
        );
    }
    assert_eq!(session.messages().await.len(), 2);
    assert_eq!(session.state().await, DialogueState::Idle);
}

#[tokio::test(start_paused = true)]
async fn nav_action_appends_exactly_two_messages() {
    let session = open_session(7).await;
    session.handle_nav_action("contact").await.unwrap();
    session.wait_for_reply().await.unwrap();

    let messages = session.messages().await;
    assert_eq!(messages.len(), 4);
    assert!(messages[2].is_user);
    assert_eq!(messages[2].text, "Show me your Contact");
    assert!(!nav_keys(&messages[3]).contains(&Category::Contact));
}

#[tokio::test(start_paused = true)]
async fn unknown_nav_key_leaves_log_untouched() {
    let session = open_session(8).await;
    let err = session.handle_nav_action("hobbies").await.unwrap_err();
    assert!(matches!(err, FolioError::UnknownCategory(_)));
    assert_eq!(session.messages().await.len(), 2);
}

#[tokio::test(start_paused = true)]
async fn second_send_while_typing_is_rejected() {
    let session = open_session(9).await;
    session.send_user_message("projects?").await.unwrap();
    let err = session.send_user_message("skills?").await.unwrap_err();
    assert!(matches!(err, FolioError::ReplyInFlight(_)));
    assert!(matches!(session.state().await, DialogueState::Typing { .. }));

    session.wait_for_reply().await.unwrap();
    assert_eq!(session.messages().await.len(), 4);
}

#[tokio::test(start_paused = true)]
async fn close_drops_pending_reply() {
    let session = open_session(10).await;
    session.send_user_message("What are your skills?").await.unwrap();
    session.close().await;

    tokio::time::sleep(Duration::from_secs(10)).await;
    session.wait_for_reply().await.unwrap();

    let messages = session.messages().await;
    assert_eq!(messages.len(), 3);
    assert!(messages[2].is_user);
    assert_eq!(session.state().await, DialogueState::Closed);

    let err = session.send_user_message("hello").await.unwrap_err();
    assert!(matches!(err, FolioError::SessionClosed(_)));
    assert!(session.open().await.is_err());
}

#[tokio::test(start_paused = true)]
async fn same_seed_gives_same_conversation() {
    let a = open_session(42).await;
    let b = open_session(42).await;
    for text in ["skills", "projects and contact", "huh?"] {
        a.send_user_message(text).await.unwrap();
        b.send_user_message(text).await.unwrap();
        let ra = a.wait_for_reply().await.unwrap().unwrap();
        let rb = b.wait_for_reply().await.unwrap().unwrap();
        assert_eq!(ra.text, rb.text);
        assert_eq!(ra.nav_actions, rb.nav_actions);
    }
}

#[tokio::test(start_paused = true)]
async fn ask_detail_renders_record() {
    let session = open_session(11).await;
    session.ask_detail(Category::Projects, "calculator").await.unwrap();
    let reply = session.wait_for_reply().await.unwrap().unwrap();
    assert!(reply.text.starts_with("Project: "));

    let messages = session.messages().await;
    assert_eq!(messages[2].text, "Tell me more about calculator");
}

#[tokio::test(start_paused = true)]
async fn events_follow_the_reply_cycle() {
    let session = open_session(12).await;
    let mut events = session.subscribe();
    session.send_user_message("education").await.unwrap();
    session.wait_for_reply().await.unwrap();

    let mut seen = Vec::new();
    while let Ok(event) = events.try_recv() {
        seen.push(event);
    }
    assert!(matches!(
        &seen[0],
        SessionEvent::MessageAppended { message } if message.is_user
    ));
    assert!(seen.iter().any(|e| matches!(e, SessionEvent::TypingStarted { .. })));
    assert!(matches!(
        seen.last(),
        Some(SessionEvent::StateChanged {
            state: DialogueState::Idle
        })
    ));
}

/// Speech double that records output and replays a fixed transcript.
#[derive(Default)]
struct ScriptedSpeech {
    spoken: Mutex<Vec<String>>,
    transcript: Option<String>,
    /// Report no recognition support.
    output_only: bool,
    starts: AtomicUsize,
    stops: AtomicUsize,
}

#[async_trait::async_trait]
impl SpeechAdapter for ScriptedSpeech {
    fn capabilities(&self) -> SpeechCapabilities {
        SpeechCapabilities {
            synthesis: true,
            recognition: !self.output_only,
        }
    }

    async fn speak(&self, text: &str) -> Result<()> {
        self.spoken.lock().unwrap().push(text.to_string());
        Ok(())
    }

    async fn start_listening(&self) -> Result<()> {
        self.starts.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn stop_listening(&self) -> Result<Option<String>> {
        self.stops.fetch_add(1, Ordering::SeqCst);
        Ok(self.transcript.clone())
    }
}

#[tokio::test(start_paused = true)]
async fn replies_are_spoken_and_transcripts_are_sent() {
    let speech = Arc::new(ScriptedSpeech {
        transcript: Some("what projects have you built".into()),
        ..ScriptedSpeech::default()
    });
    let session = DialogueSession::new(
        engine_with(plain_config()),
        speech.clone(),
        SessionOptions {
            seed: Some(13),
            speak_replies: true,
        },
    );
    session.open().await.unwrap();

    // Stopping without a running capture sends nothing.
    assert_eq!(session.stop_voice_input().await.unwrap(), SendOutcome::Ignored);

    session.start_voice_input().await.unwrap();
    let outcome = session.stop_voice_input().await.unwrap();
    assert!(matches!(outcome, SendOutcome::Scheduled { .. }));
    let reply = session.wait_for_reply().await.unwrap().unwrap();

    // Let the fire-and-forget speech task run.
    tokio::time::sleep(Duration::from_millis(1)).await;
    assert_eq!(*speech.spoken.lock().unwrap(), vec![reply.text.clone()]);
    assert_eq!(
        session.messages().await[2].text,
        "what projects have you built"
    );
}

#[tokio::test(start_paused = true)]
async fn speech_can_be_muted() {
    let speech = Arc::new(ScriptedSpeech::default());
    let session = DialogueSession::new(
        engine_with(plain_config()),
        speech.clone(),
        SessionOptions {
            seed: Some(14),
            speak_replies: false,
        },
    );
    session.open().await.unwrap();
    session.send_user_message("contact").await.unwrap();
    session.wait_for_reply().await.unwrap();
    tokio::time::sleep(Duration::from_millis(1)).await;
    assert!(speech.spoken.lock().unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn restarting_voice_capture_discards_the_running_one() {
    let speech = Arc::new(ScriptedSpeech {
        transcript: Some("tell me about your skills".into()),
        ..ScriptedSpeech::default()
    });
    let session = DialogueSession::new(
        engine_with(plain_config()),
        speech.clone(),
        SessionOptions {
            seed: Some(15),
            speak_replies: false,
        },
    );
    session.open().await.unwrap();

    session.start_voice_input().await.unwrap();
    session.start_voice_input().await.unwrap();
    assert_eq!(speech.starts.load(Ordering::SeqCst), 2);
    assert_eq!(speech.stops.load(Ordering::SeqCst), 1);
    // The first capture's transcript was not sent.
    assert_eq!(session.messages().await.len(), 2);
    assert_eq!(session.state().await, DialogueState::Idle);

    let outcome = session.stop_voice_input().await.unwrap();
    assert!(matches!(outcome, SendOutcome::Scheduled { .. }));
    assert_eq!(speech.stops.load(Ordering::SeqCst), 2);
    session.wait_for_reply().await.unwrap();
    assert_eq!(session.messages().await.len(), 4);
}

#[tokio::test(start_paused = true)]
async fn voice_input_without_recognition_is_a_noop() {
    let speech = Arc::new(ScriptedSpeech {
        transcript: Some("projects".into()),
        output_only: true,
        ..ScriptedSpeech::default()
    });
    let session = DialogueSession::new(
        engine_with(plain_config()),
        speech.clone(),
        SessionOptions {
            seed: Some(16),
            speak_replies: false,
        },
    );
    session.open().await.unwrap();

    session.start_voice_input().await.unwrap();
    assert_eq!(speech.starts.load(Ordering::SeqCst), 0);
    assert_eq!(session.stop_voice_input().await.unwrap(), SendOutcome::Ignored);
    assert_eq!(speech.stops.load(Ordering::SeqCst), 0);
    assert_eq!(session.messages().await.len(), 2);
}

#[tokio::test(start_paused = true)]
async fn close_goes_through_the_state_machine() {
    let session = open_session(17).await;
    let mut events = session.subscribe();
    session.close().await;
    session.close().await;

    assert_eq!(session.state().await, DialogueState::Closed);
    let mut closed = 0;
    while let Ok(event) = events.try_recv() {
        if matches!(event, SessionEvent::StateChanged { state: DialogueState::Closed }) {
            closed += 1;
        }
    }
    assert_eq!(closed, 1);
}
