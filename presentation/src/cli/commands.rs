//! CLI command definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Output format for search results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable list
    #[default]
    Text,
    /// JSON document with the interpretation and places
    Json,
}

impl OutputFormat {
    /// Parse a config-file value, case-insensitively
    pub fn from_config(value: &str) -> Option<Self> {
        <Self as ValueEnum>::from_str(value.trim(), true).ok()
    }
}

/// CLI arguments for tripscout
#[derive(Parser, Debug)]
#[command(name = "tripscout")]
#[command(author, version, about = "Find places and chat about trips in plain language")]
#[command(long_about = r#"
tripscout turns a plain-language request into a place search.

  find   Interpret the request, search for matching places, and filter them
         by the constraints it mentions (rating, price, open now).
  chat   Talk with a travel assistant that remembers the conversation.

Configuration files are loaded from (in priority order):
1. TRIPSCOUT_<SECTION>__<KEY>           Environment overrides
2. --config <path>                      Explicit config file
3. ./tripscout.toml                     Project-level config
4. ~/.config/tripscout/config.toml      Global config

Example:
  tripscout find "cafes with rating above 4.5"
  tripscout find --output json "cheap ramen open now"
  tripscout chat
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Find places matching a plain-language request
    Find(FindArgs),
    /// Start an interactive travel chat
    Chat(ChatArgs),
}

#[derive(Args, Debug)]
pub struct FindArgs {
    /// What you are looking for, e.g. "cafes with rating above 4.5"
    #[arg(required = true, num_args = 1.., value_name = "TEXT")]
    pub text: Vec<String>,

    /// Maximum number of places requested from the search (at least 1)
    #[arg(
        short,
        long,
        value_name = "N",
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub limit: Option<usize>,

    /// Output format (defaults to the config file, then text)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,
}

impl FindArgs {
    /// The request words joined back into one string
    pub fn query(&self) -> String {
        self.text.join(" ")
    }
}

#[derive(Args, Debug)]
pub struct ChatArgs {
    /// Resume this session id if it is still live
    #[arg(long, value_name = "ID")]
    pub session: Option<String>,

    /// Owner id attached to new sessions
    #[arg(long, value_name = "ID")]
    pub owner: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_find() {
        let cli = Cli::try_parse_from([
            "tripscout", "-v", "find", "--limit", "5", "-o", "json", "cafes", "near", "me",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 1);
        match cli.command {
            Some(Command::Find(args)) => {
                assert_eq!(args.query(), "cafes near me");
                assert_eq!(args.limit, Some(5));
                assert_eq!(args.output, Some(OutputFormat::Json));
            }
            other => panic!("expected find, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_chat_with_session() {
        let cli = Cli::try_parse_from(["tripscout", "chat", "--session", "abc", "-q"]).unwrap();

        assert!(cli.quiet);
        match cli.command {
            Some(Command::Chat(args)) => {
                assert_eq!(args.session.as_deref(), Some("abc"));
                assert!(args.owner.is_none());
            }
            other => panic!("expected chat, got {:?}", other),
        }
    }

    #[test]
    fn test_find_rejects_zero_limit() {
        assert!(Cli::try_parse_from(["tripscout", "find", "--limit", "0", "cafes"]).is_err());
        assert!(Cli::try_parse_from(["tripscout", "find", "--limit", "1", "cafes"]).is_ok());
    }

    #[test]
    fn test_find_requires_text() {
        assert!(Cli::try_parse_from(["tripscout", "find"]).is_err());
    }

    #[test]
    fn test_output_format_from_config() {
        assert_eq!(OutputFormat::from_config("JSON"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::from_config(" text "), Some(OutputFormat::Text));
        assert_eq!(OutputFormat::from_config("yaml"), None);
    }
}
