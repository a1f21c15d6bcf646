//! Contact form submission.
//!
//! Independent of the dialogue: validation and sanitization of the form,
//! a cooldown between submissions, and the relay that delivers the mail.

mod rate_limit;
mod relay;
mod submission;

pub use rate_limit::{RateLimiter, SubmissionLedger};
pub use relay::{EmailParams, MailRelay};
pub use submission::{ContactSubmission, is_valid_email, sanitize_input};
