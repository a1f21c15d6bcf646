//! Speech output through a local text-to-speech program.

use folio_core::error::{FolioError, Result};
use folio_core::speech::{SpeechAdapter, SpeechCapabilities};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, warn};

/// Programs tried by [`CommandSpeech::detect`], in order.
pub const KNOWN_COMMANDS: &[&str] = &["espeak-ng", "espeak", "say"];

/// Speaks replies by running a TTS command such as `espeak` or `say` with
/// the text as its only argument. Recognition is not supported.
#[derive(Debug, Clone)]
pub struct CommandSpeech {
    program: String,
    resolved: Option<PathBuf>,
}

impl CommandSpeech {
    /// Uses `program`, which may be a bare name looked up on `PATH` or a path.
    pub fn new(program: impl Into<String>) -> Self {
        let program = program.into();
        let resolved = resolve_program(&program);
        if resolved.is_none() {
            warn!(program = %program, "speech command not found; output disabled");
        }
        Self { program, resolved }
    }

    /// The first of [`KNOWN_COMMANDS`] available on this machine.
    pub fn detect() -> Option<Self> {
        KNOWN_COMMANDS
            .iter()
            .find(|name| resolve_program(name).is_some())
            .map(|name| Self::new(*name))
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn is_available(&self) -> bool {
        self.resolved.is_some()
    }
}

fn resolve_program(program: &str) -> Option<PathBuf> {
    let candidate = Path::new(program);
    if candidate.components().count() > 1 {
        return candidate.is_file().then(|| candidate.to_path_buf());
    }
    let path = std::env::var_os("PATH")?;
    std::env::split_paths(&path)
        .map(|dir| dir.join(program))
        .find(|p| p.is_file())
}

#[async_trait::async_trait]
impl SpeechAdapter for CommandSpeech {
    fn capabilities(&self) -> SpeechCapabilities {
        SpeechCapabilities {
            synthesis: self.is_available(),
            recognition: false,
        }
    }

    async fn speak(&self, text: &str) -> Result<()> {
        let Some(program) = &self.resolved else {
            return Ok(());
        };
        debug!(program = %program.display(), chars = text.chars().count(), "speaking reply");
        let status = Command::new(program)
            .arg(text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await?;
        if status.success() {
            Ok(())
        } else {
            Err(FolioError::internal(format!(
                "{} exited with {}",
                self.program, status
            )))
        }
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

    #[test]
    fn test_missing_program_disables_output() {
        let speech = CommandSpeech::new("definitely-not-a-real-tts-binary");
        assert!(!speech.is_available());
        assert_eq!(speech.capabilities(), SpeechCapabilities::default());
    }

    #[tokio::test]
    async fn test_missing_program_speak_is_noop() {
        let speech = CommandSpeech::new("/nonexistent/dir/tts");
        speech.speak("hello").await.unwrap();
        assert_eq!(speech.stop_listening().await.unwrap(), None);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_available_program_runs() {
        // `true` ignores its arguments and exits 0.
        let Some(speech) = ["/bin/true", "/usr/bin/true"]
            .iter()
            .map(|p| CommandSpeech::new(*p))
            .find(CommandSpeech::is_available)
        else {
            return;
        };
        assert!(speech.capabilities().synthesis);
        speech.speak("hello there").await.unwrap();
    }
}
