use super::{load_assistant, print_assistant, print_nav_actions};
use anyhow::{Context, Result, bail};
use colored::Colorize;
use folio_infrastructure::ConfigService;
use folio_interaction::SendOutcome;

pub async fn run(
    config_service: &ConfigService,
    text: &str,
    instant: bool,
    seed: Option<u64>,
    json: bool,
) -> Result<()> {
    let service = load_assistant(config_service, |config| {
        if seed.is_some() {
            config.assistant.seed = seed;
        }
        config.speech.enabled = false;
    })
    .await?;
    let owner = service.knowledge().owner_name().to_string();

    let (reply_text, nav_actions) = if instant {
        let reply = service.reply_now(text);
        (reply.text, reply.nav_actions)
    } else {
        let session = service.new_session();
        session.open().await?;
        match session.send_user_message(text).await? {
            SendOutcome::Scheduled { delay } => {
                if !json {
                    eprintln!("{}", format!("typing... ({} ms)", delay.as_millis()).bright_black());
                }
            }
            SendOutcome::Ignored => {
                session.close().await;
                bail!("nothing to ask: the question is blank");
            }
        }
        let message = session
            .wait_for_reply()
            .await?
            .context("no reply was produced")?;
        session.close().await;
        (message.text, message.nav_actions.unwrap_or_default())
    };

    if json {
        let value = serde_json::json!({
            "text": reply_text,
            "navActions": nav_actions,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        print_assistant(&owner, &reply_text);
        print_nav_actions(&nav_actions);
    }
    Ok(())
}
