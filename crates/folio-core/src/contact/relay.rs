use super::ContactSubmission;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Template parameters sent to the mail relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailParams {
    pub from_name: String,
    pub from_email: String,
    pub subject: String,
    pub message: String,
    pub to_name: String,
    pub to_email: String,
    pub reply_to: String,
}

impl EmailParams {
    pub fn new(
        submission: &ContactSubmission,
        to_name: impl Into<String>,
        to_email: impl Into<String>,
    ) -> Self {
        Self {
            from_name: submission.name.clone(),
            from_email: submission.email.clone(),
            subject: submission.subject.clone(),
            message: submission.message.clone(),
            to_name: to_name.into(),
            to_email: to_email.into(),
            reply_to: submission.email.clone(),
        }
    }
}

/// Delivers a contact message to the portfolio owner.
#[async_trait::async_trait]
pub trait MailRelay: Send + Sync {
    /// Sends the message.
    ///
    /// # Errors
    ///
    /// Returns `FolioError::Relay` when the relay does not accept it.
    async fn send(&self, params: &EmailParams) -> Result<()>;
}
