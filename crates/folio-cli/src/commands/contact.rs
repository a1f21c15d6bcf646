use anyhow::Result;
use colored::Colorize;
use folio_application::ContactUseCase;
use folio_core::contact::ContactSubmission;
use folio_core::error::FolioError;
use folio_infrastructure::{ConfigService, EmailJsRelay, FolioPaths, TomlSubmissionLedger};
use std::sync::Arc;

pub async fn run(
    config_service: &ConfigService,
    paths: &FolioPaths,
    name: String,
    email: String,
    subject: String,
    message: String,
) -> Result<()> {
    let config = config_service.try_get_config()?;
    let relay = Arc::new(EmailJsRelay::from_config(&config.contact)?);
    let ledger = Arc::new(TomlSubmissionLedger::with_path(paths.ledger_file()?));
    let usecase = ContactUseCase::new(relay, ledger, &config.contact);

    let submission = ContactSubmission::new(name, email, subject, message);
    match usecase.submit(&submission).await {
        Ok(()) => {
            println!(
                "{}",
                "Message sent successfully! I'll get back to you soon.".bright_green()
            );
            Ok(())
        }
        Err(FolioError::RateLimited { retry_after_secs }) => {
            println!(
                "{}",
                format!(
                    "Please wait {} seconds before sending another message.",
                    retry_after_secs
                )
                .yellow()
            );
            Ok(())
        }
        Err(e @ FolioError::Validation { .. }) => {
            println!("{}", e.to_string().yellow());
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
