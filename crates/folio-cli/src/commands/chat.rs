use std::borrow::Cow::{self, Borrowed, Owned};

use anyhow::Result;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

use folio_core::error::FolioError;
use folio_core::knowledge::Category;
use folio_core::session::Message;
use folio_infrastructure::ConfigService;
use folio_interaction::{DialogueSession, SendOutcome};

use super::{load_assistant, print_assistant, print_nav_actions};

const COMMANDS: &[&str] = &["/nav", "/detail", "/history", "/help", "/quit"];

/// CLI helper for rustyline that provides completion, highlighting, and hints.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    fn new() -> Self {
        Self {
            commands: COMMANDS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        // Category keys after /nav or /detail.
        if let Some((command, partial)) = line.split_once(' ') {
            if (command == "/nav" || command == "/detail") && !partial.contains(' ') {
                let candidates = Category::all()
                    .map(Category::key)
                    .filter(|key| key.starts_with(partial))
                    .map(|key| Pair {
                        display: key.to_string(),
                        replacement: key.to_string(),
                    })
                    .collect();
                return Ok((command.len() + 1, candidates));
            }
            return Ok((0, vec![]));
        }

        if line.starts_with('/') {
            let candidates: Vec<Pair> = self
                .commands
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .map(|cmd| Pair {
                    display: cmd.clone(),
                    replacement: cmd.clone(),
                })
                .collect();
            Ok((0, candidates))
        } else {
            Ok((0, vec![]))
        }
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for CliHelper {}

/// One line of REPL input.
#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Say(&'a str),
    Nav(&'a str),
    Detail { category: &'a str, query: &'a str },
    History,
    Help,
    Quit,
    Invalid(&'static str),
}

fn parse_input(line: &str) -> Input<'_> {
    let line = line.trim();
    if line == "quit" || line == "exit" {
        return Input::Quit;
    }
    if !line.starts_with('/') {
        return Input::Say(line);
    }

    let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim();
    match command {
        "/quit" | "/exit" => Input::Quit,
        "/help" => Input::Help,
        "/history" => Input::History,
        "/nav" if rest.is_empty() => Input::Invalid("usage: /nav <category>"),
        "/nav" => Input::Nav(rest),
        "/detail" => match rest.split_once(' ') {
            Some((category, query)) if !query.trim().is_empty() => Input::Detail {
                category,
                query: query.trim(),
            },
            _ => Input::Invalid("usage: /detail <category> <query>"),
        },
        _ => Input::Invalid("unknown command, type /help"),
    }
}

fn print_help() {
    let keys: Vec<&str> = Category::all().map(Category::key).collect();
    println!("{}", "Commands:".bright_yellow());
    println!("  {}", "/nav <category>          show a section".yellow());
    println!("  {}", "/detail <category> <q>   ask about one project, role or skill".yellow());
    println!("  {}", "/history                 print the conversation so far".yellow());
    println!("  {}", "/quit                    leave".yellow());
    println!("{}", format!("Categories: {}", keys.join(", ")).bright_black());
}

fn print_message(owner: &str, message: &Message) {
    if message.is_user {
        println!("{}", format!("> {}", message.text).green());
    } else {
        print_assistant(owner, &message.text);
        if let Some(actions) = &message.nav_actions {
            print_nav_actions(actions);
        }
    }
}

/// Waits out the typing delay and prints the reply.
async fn show_reply(session: &DialogueSession, owner: &str, outcome: SendOutcome) -> Result<()> {
    if let SendOutcome::Scheduled { .. } = outcome {
        println!("{}", "typing...".bright_black().italic());
        if let Some(reply) = session.wait_for_reply().await? {
            print_message(owner, &reply);
        }
        println!();
    }
    Ok(())
}

pub async fn run(config_service: &ConfigService, speak: bool, seed: Option<u64>) -> Result<()> {
    let service = load_assistant(config_service, |config| {
        if seed.is_some() {
            config.assistant.seed = seed;
        }
        if speak {
            config.speech.enabled = true;
            config.speech.speak_replies = true;
        }
    })
    .await?;
    let owner = service.knowledge().owner_name().to_string();

    let session = service.new_session();
    session.open().await?;

    let mut rl: Editor<CliHelper, DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(CliHelper::new()));

    println!("{}", "=== Folio ===".bright_magenta().bold());
    println!(
        "{}",
        "Ask anything, type '/help' for commands, or 'quit' to exit.".bright_black()
    );
    println!();
    for message in session.messages().await {
        print_message(&owner, &message);
    }
    println!();

    loop {
        let readline = rl.readline(">> ");

        match readline {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(&line);

                let outcome = match parse_input(&line) {
                    Input::Quit => {
                        println!("{}", "Goodbye!".bright_green());
                        break;
                    }
                    Input::Help => {
                        print_help();
                        continue;
                    }
                    Input::History => {
                        for message in session.messages().await {
                            print_message(&owner, &message);
                        }
                        continue;
                    }
                    Input::Invalid(reason) => {
                        println!("{}", reason.yellow());
                        continue;
                    }
                    Input::Say(text) => session.send_user_message(text).await,
                    Input::Nav(key) => session.handle_nav_action(key).await,
                    Input::Detail { category, query } => match Category::from_key(category) {
                        Some(category) => session.ask_detail(category, query).await,
                        None => Err(FolioError::UnknownCategory(category.to_string())),
                    },
                };

                match outcome {
                    Ok(outcome) => show_reply(&session, &owner, outcome).await?,
                    Err(FolioError::UnknownCategory(key)) => {
                        println!("{}", format!("No such category: {}", key).yellow());
                    }
                    Err(e) => {
                        eprintln!("{}", format!("Error: {}", e).red());
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    session.close().await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_said() {
        assert_eq!(parse_input("  what are your skills? "), Input::Say("what are your skills?"));
        assert_eq!(parse_input("exit"), Input::Quit);
    }

    #[test]
    fn test_slash_commands() {
        assert_eq!(parse_input("/nav projects"), Input::Nav("projects"));
        assert_eq!(
            parse_input("/detail skills  rust and go"),
            Input::Detail {
                category: "skills",
                query: "rust and go"
            }
        );
        assert_eq!(parse_input("/history"), Input::History);
        assert_eq!(parse_input("/quit"), Input::Quit);
    }

    #[test]
    fn test_incomplete_commands_are_invalid() {
        assert!(matches!(parse_input("/nav"), Input::Invalid(_)));
        assert!(matches!(parse_input("/detail projects"), Input::Invalid(_)));
        assert!(matches!(parse_input("/plan"), Input::Invalid(_)));
    }
}
