//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::ConsoleFormatter;
use crate::ReplConfig;
use crate::progress::reporter::start_spinner;
use colored::Colorize;
use reedline::{DefaultPrompt, DefaultPromptSegment, FileBackedHistory, Reedline, Signal};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use tripscout_application::{CapabilityError, ChatError, ConversationSession, SessionRegistry};

const HISTORY_CAPACITY: usize = 1000;

/// A parsed line of REPL input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Empty,
    Help,
    Clear,
    New,
    Session,
    History,
    Quit,
    Unknown(String),
    Message(String),
}

impl ReplCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return ReplCommand::Empty;
        }
        if !line.starts_with('/') {
            return ReplCommand::Message(line.to_string());
        }
        match line {
            "/help" | "/h" | "/?" => ReplCommand::Help,
            "/clear" => ReplCommand::Clear,
            "/new" => ReplCommand::New,
            "/session" => ReplCommand::Session,
            "/history" => ReplCommand::History,
            "/quit" | "/exit" | "/q" => ReplCommand::Quit,
            other => ReplCommand::Unknown(other.to_string()),
        }
    }
}

/// Interactive chat REPL
pub struct ChatRepl {
    registry: Arc<SessionRegistry>,
    session: Arc<ConversationSession>,
    owner: Option<String>,
    config: ReplConfig,
}

impl ChatRepl {
    /// Create a REPL attached to `session_id`, or to a fresh session
    pub fn new(registry: Arc<SessionRegistry>, session_id: Option<&str>, owner: Option<String>) -> Self {
        let session = registry.get_or_create(session_id, owner.as_deref());
        Self {
            registry,
            session,
            owner,
            config: ReplConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ReplConfig) -> Self {
        self.config = config;
        self
    }

    pub fn session_id(&self) -> &str {
        self.session.id()
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> std::io::Result<()> {
        let mut line_editor = Reedline::create();

        if let Some(path) = &self.config.history_file {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            match FileBackedHistory::with_file(HISTORY_CAPACITY, path.clone()) {
                Ok(history) => line_editor = line_editor.with_history(Box::new(history)),
                Err(e) => warn!("Could not open history file {}: {}", path.display(), e),
            }
        }

        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic(self.config.prompt.clone()),
            DefaultPromptSegment::Empty,
        );

        self.print_welcome();

        loop {
            let signal = line_editor.read_line(&prompt)?;

            #[allow(unreachable_patterns)]
            match signal {
                Signal::Success(line) => {
                    if !self.handle_line(&line).await {
                        break;
                    }
                }
                Signal::CtrlC => {
                    println!("^C");
                    continue;
                }
                Signal::CtrlD => {
                    println!("Bye!");
                    break;
                }
                _ => continue,
            }
        }

        Ok(())
    }

    /// Handle one line of input. Returns false when the REPL should exit.
    async fn handle_line(&mut self, line: &str) -> bool {
        match ReplCommand::parse(line) {
            ReplCommand::Empty => {}
            ReplCommand::Quit => {
                println!("Bye!");
                return false;
            }
            ReplCommand::Help => self.print_help(),
            ReplCommand::Clear => {
                self.session.clear().await;
                println!("{}", "Conversation cleared.".dimmed());
            }
            ReplCommand::New => {
                self.registry.remove(self.session.id());
                self.session = self.registry.get_or_create(None, self.owner.as_deref());
                println!("{} {}", "New session:".dimmed(), self.session.id());
            }
            ReplCommand::Session => self.print_session().await,
            ReplCommand::History => {
                println!("{}", ConsoleFormatter::format_history(&self.session.turns().await));
            }
            ReplCommand::Unknown(cmd) => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
            }
            ReplCommand::Message(message) => self.process_message(&message).await,
        }
        true
    }

    async fn process_message(&mut self, message: &str) {
        self.refresh_session();

        let token = CancellationToken::new();
        let interrupt = {
            let token = token.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    token.cancel();
                }
            })
        };

        let spinner = self
            .config
            .show_progress
            .then(|| start_spinner("assistant", "thinking..."));

        let result = self.session.send_cancellable(message, &token).await;

        interrupt.abort();
        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
        }

        match result {
            Ok(reply) => println!("{}", ConsoleFormatter::format_reply(&reply)),
            Err(ChatError::ConversationFailed(CapabilityError::Cancelled)) => {
                debug!("Send cancelled by user");
                println!("{}", "Cancelled.".dimmed());
            }
            Err(e) => eprintln!("{}", ConsoleFormatter::format_chat_error(&e)),
        }
        println!();
    }

    /// Swap in a fresh session when the current one expired while idle
    fn refresh_session(&mut self) {
        let current = self
            .registry
            .get_or_create(Some(self.session.id()), self.owner.as_deref());
        if current.id() != self.session.id() {
            println!(
                "{} {}",
                "Session expired, started a new one:".yellow(),
                current.id()
            );
            self.session = current;
        }
    }

    async fn print_session(&self) {
        let snapshot = self.session.snapshot().await;
        println!();
        println!("Session:      {}", snapshot.id);
        if let Some(owner) = &snapshot.owner {
            println!("Owner:        {}", owner);
        }
        println!("Created:      {}", snapshot.created_at.to_rfc3339());
        println!("Last active:  {}", snapshot.last_active_at.to_rfc3339());
        println!("Turns:        {}", snapshot.turns.len());
        println!(
            "Idle timeout: {}s",
            self.registry.params().idle_timeout.as_secs()
        );
        println!();
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│             tripscout - Chat Mode           │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("Session: {}", self.session.id());
        self.print_help();
    }

    fn print_help(&self) {
        println!();
        println!("Commands:");
        println!("  /help, /h, /?    - Show this help");
        println!("  /clear           - Forget the conversation so far");
        println!("  /new             - Start a new session");
        println!("  /session         - Show session details");
        println!("  /history         - Show the conversation");
        println!("  /quit, /exit, /q - Exit chat");
        println!();
        println!("Press Ctrl+C while waiting to cancel a reply.");
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_message() {
        assert_eq!(
            ReplCommand::parse("  any good ramen nearby?  "),
            ReplCommand::Message("any good ramen nearby?".to_string())
        );
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(ReplCommand::parse(""), ReplCommand::Empty);
        assert_eq!(ReplCommand::parse("   "), ReplCommand::Empty);
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(ReplCommand::parse("/help"), ReplCommand::Help);
        assert_eq!(ReplCommand::parse("/?"), ReplCommand::Help);
        assert_eq!(ReplCommand::parse("/clear"), ReplCommand::Clear);
        assert_eq!(ReplCommand::parse("/new"), ReplCommand::New);
        assert_eq!(ReplCommand::parse("/session"), ReplCommand::Session);
        assert_eq!(ReplCommand::parse("/history"), ReplCommand::History);
        assert_eq!(ReplCommand::parse("/q"), ReplCommand::Quit);
        assert_eq!(ReplCommand::parse("/exit "), ReplCommand::Quit);
    }

    #[test]
    fn test_parse_unknown_command() {
        assert_eq!(
            ReplCommand::parse("/models"),
            ReplCommand::Unknown("/models".to_string())
        );
    }
}
