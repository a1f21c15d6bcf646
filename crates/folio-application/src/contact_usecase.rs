//! Contact form use case.

use chrono::Utc;
use folio_core::config::ContactConfig;
use folio_core::contact::{ContactSubmission, EmailParams, MailRelay, RateLimiter, SubmissionLedger};
use folio_core::error::Result;
use std::sync::Arc;
use tracing::{info, warn};

/// Validates, throttles and relays contact form submissions.
///
/// The cooldown starts when a submission passes validation and the rate
/// check, before the relay is called, so a failing relay cannot be retried
/// in a tight loop. Rejected submissions leave the ledger untouched.
pub struct ContactUseCase {
    relay: Arc<dyn MailRelay>,
    ledger: Arc<dyn SubmissionLedger>,
    limiter: RateLimiter,
    to_name: String,
    to_email: String,
}

impl ContactUseCase {
    pub fn new(
        relay: Arc<dyn MailRelay>,
        ledger: Arc<dyn SubmissionLedger>,
        config: &ContactConfig,
    ) -> Self {
        Self {
            relay,
            ledger,
            limiter: RateLimiter::from_secs(config.cooldown_secs),
            to_name: config.to_name.clone(),
            to_email: config.to_email.clone(),
        }
    }

    /// Sends a contact message to the portfolio owner.
    ///
    /// # Errors
    ///
    /// - `FolioError::Validation` for blank fields or a malformed email
    /// - `FolioError::RateLimited` inside the cooldown window
    /// - `FolioError::Relay` when delivery fails
    pub async fn submit(&self, submission: &ContactSubmission) -> Result<()> {
        let clean = submission.sanitized();
        clean.validate()?;

        let now = Utc::now();
        let last = self.ledger.last_submission().await?;
        if let Err(e) = self.limiter.check(last, now) {
            warn!(error = %e, "contact submission throttled");
            return Err(e);
        }
        self.ledger.record(now).await?;

        let params = EmailParams::new(&clean, self.to_name.clone(), self.to_email.clone());
        self.relay.send(&params).await?;
        info!(from = %clean.email, "contact message delivered");
        Ok(())
    }
}
