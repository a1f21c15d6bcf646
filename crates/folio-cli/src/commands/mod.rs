pub mod ask;
pub mod chat;
pub mod contact;
pub mod knowledge;

use anyhow::Result;
use colored::Colorize;
use folio_application::AssistantService;
use folio_core::config::RootConfig;
use folio_core::session::NavAction;
use folio_infrastructure::ConfigService;

/// Loads the assistant with command-line overrides applied to the config.
pub async fn load_assistant<F>(config_service: &ConfigService, overrides: F) -> Result<AssistantService>
where
    F: FnOnce(&mut RootConfig),
{
    let mut config = config_service.get_config();
    overrides(&mut config);
    AssistantService::from_config(config, config_service.config_dir()?).await
}

pub fn print_assistant(owner: &str, text: &str) {
    println!("{}", format!("[{}'s assistant]", owner).bright_magenta());
    for line in text.lines() {
        println!("{}", line.bright_blue());
    }
}

pub fn print_nav_actions(actions: &[NavAction]) {
    if actions.is_empty() {
        return;
    }
    let menu: Vec<String> = actions
        .iter()
        .map(|a| format!("{} ({})", a.label, a.key.key()))
        .collect();
    println!("{}", format!("  more: {}", menu.join(" | ")).bright_black());
}
