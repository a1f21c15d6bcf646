use anyhow::Result;
use clap::{Parser, Subcommand};
use folio_infrastructure::{ConfigService, FolioPaths};
use std::path::PathBuf;

mod commands;
mod logging;

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Folio - talk to a portfolio assistant", long_about = None)]
struct Cli {
    /// Config file to use instead of ~/.config/folio/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print debug logs to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive chat session
    Chat {
        /// Speak replies with the local text-to-speech command
        #[arg(long)]
        speak: bool,
        /// Seed for reproducible replies
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Ask a single question and print the reply
    Ask {
        /// The question
        #[arg(required = true)]
        text: Vec<String>,
        /// Skip the typing delay
        #[arg(long)]
        instant: bool,
        /// Seed for reproducible replies
        #[arg(long)]
        seed: Option<u64>,
        /// Print the reply message as JSON
        #[arg(long)]
        json: bool,
    },
    /// Send a message to the portfolio owner
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        subject: String,
        #[arg(long)]
        message: String,
    },
    /// Inspect or export knowledge content
    Knowledge {
        #[command(subcommand)]
        action: KnowledgeAction,
    },
}

#[derive(Subcommand)]
enum KnowledgeAction {
    /// Write the builtin content to a TOML file as a starting point
    Export {
        /// Output path (defaults to knowledge.toml in the config directory)
        #[arg(long)]
        out: Option<PathBuf>,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Show a category section, or one record when a query is given
    Show {
        category: String,
        query: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_service = match &cli.config {
        Some(path) => ConfigService::with_path(path.clone()),
        None => ConfigService::new(),
    };
    let paths = FolioPaths::new(config_service.config_dir().ok());
    let _log_guard = logging::init(paths.logs_dir().ok().as_deref(), cli.verbose);
    tracing::debug!(config = ?config_service.config_path().ok(), "starting folio");

    match cli.command {
        Commands::Chat { speak, seed } => {
            commands::chat::run(&config_service, speak, seed).await?
        }
        Commands::Ask {
            text,
            instant,
            seed,
            json,
        } => commands::ask::run(&config_service, &text.join(" "), instant, seed, json).await?,
        Commands::Contact {
            name,
            email,
            subject,
            message,
        } => commands::contact::run(&config_service, &paths, name, email, subject, message).await?,
        Commands::Knowledge { action } => match action {
            KnowledgeAction::Export { out, force } => {
                commands::knowledge::export(&paths, out, force).await?
            }
            KnowledgeAction::Show { category, query } => {
                commands::knowledge::show(&config_service, &category, &query.join(" ")).await?
            }
        },
    }

    Ok(())
}
