//! Optional voice input and output.
//!
//! A session holds an `Arc<dyn SpeechAdapter>`. Anything the adapter cannot
//! do is a silent no-op, so a session behaves the same with [`NoSpeech`]
//! apart from nothing being spoken.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// What an adapter can do on this platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SpeechCapabilities {
    pub synthesis: bool,
    pub recognition: bool,
}

#[async_trait::async_trait]
pub trait SpeechAdapter: Send + Sync {
    fn capabilities(&self) -> SpeechCapabilities;

    /// Speaks `text`. Callers do not wait on playback finishing.
    async fn speak(&self, text: &str) -> Result<()>;

    /// Starts a capture, cancelling any capture already running.
    async fn start_listening(&self) -> Result<()>;

    /// Ends the capture and returns the final transcript, if any.
    async fn stop_listening(&self) -> Result<Option<String>>;

    /// Live transcript of the running capture.
    fn transcript(&self) -> Option<watch::Receiver<String>> {
        None
    }
}

/// Adapter for platforms without speech support.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSpeech;

#[async_trait::async_trait]
impl SpeechAdapter for NoSpeech {
    fn capabilities(&self) -> SpeechCapabilities {
        SpeechCapabilities::default()
    }

    async fn speak(&self, _text: &str) -> Result<()> {
        Ok(())
    }

    async fn start_listening(&self) -> Result<()> {
        Ok(())
    }

    async fn stop_listening(&self) -> Result<Option<String>> {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_no_speech_is_silent() {
        let speech = NoSpeech;
        assert_eq!(speech.capabilities(), SpeechCapabilities::default());
        speech.speak("hello").await.unwrap();
        speech.start_listening().await.unwrap();
        assert_eq!(speech.stop_listening().await.unwrap(), None);
        assert!(speech.transcript().is_none());
    }
}
