use crate::error::{FolioError, Result};
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Persistent record of the last accepted submission.
#[async_trait::async_trait]
pub trait SubmissionLedger: Send + Sync {
    async fn last_submission(&self) -> Result<Option<DateTime<Utc>>>;

    async fn record(&self, at: DateTime<Utc>) -> Result<()>;
}

/// Enforces a minimum interval between submissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimiter {
    cooldown: Duration,
}

impl RateLimiter {
    pub fn new(cooldown: Duration) -> Self {
        Self { cooldown }
    }

    pub fn from_secs(secs: u64) -> Self {
        Self::new(Duration::from_secs(secs))
    }

    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    /// Checks whether a submission at `now` is allowed.
    ///
    /// A `last` timestamp in the future (clock moved back) counts as just
    /// submitted.
    ///
    /// # Errors
    ///
    /// Returns `FolioError::RateLimited` with the whole seconds left.
    pub fn check(&self, last: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Result<()> {
        let Some(last) = last else {
            return Ok(());
        };
        let elapsed = (now - last).to_std().unwrap_or(Duration::ZERO);
        if elapsed >= self.cooldown {
            return Ok(());
        }
        let remaining = self.cooldown - elapsed;
        let retry_after_secs = remaining.as_secs() + u64::from(remaining.subsec_nanos() > 0);
        Err(FolioError::RateLimited { retry_after_secs })
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::from_secs(60)
    }
}
