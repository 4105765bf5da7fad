//! CLI entrypoint for tripscout
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use tripscout_application::{
    FindPlacesUseCase, NoProgress, SearchProgress, SessionRegistry, SessionSweeper,
};
use tripscout_infrastructure::{ConfigLoader, FileConfig, GeminiClient, PhotonClient};
use tripscout_presentation::cli::commands::{ChatArgs, Command, FindArgs};
use tripscout_presentation::{
    ChatRepl, Cli, ConsoleFormatter, OutputConfig, OutputFormat, ProgressReporter, ReplConfig,
    formatter_for,
};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // RUST_LOG wins over -v when set
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(ExitCode::SUCCESS);
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("Failed to load configuration")?
    };

    for issue in config.validate() {
        if issue.is_error() {
            error!("{}", issue);
        } else {
            warn!("{}", issue);
        }
    }

    let output_config = output_config(&config);
    colored::control::set_override(output_config.color);

    info!("Starting tripscout");

    match cli.command {
        Some(Command::Find(args)) => run_find(&config, &output_config, args, cli.quiet).await,
        Some(Command::Chat(args)) => run_chat(&config, args, cli.quiet).await,
        None => {
            Cli::command().print_help()?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn run_find(
    config: &FileConfig,
    output_config: &OutputConfig,
    args: FindArgs,
    quiet: bool,
) -> Result<ExitCode> {
    let query = args.query();

    // === Dependency Injection ===
    let gemini = Arc::new(GeminiClient::from_config(&config.gemini)?);
    let photon = Arc::new(PhotonClient::from_config(&config.photon)?);

    let (mut params, _) = config.search.to_search_params();
    if let Some(limit) = args.limit {
        params = params.with_result_limit(limit);
    }

    let use_case = FindPlacesUseCase::new(gemini, photon).with_params(params);

    let progress: Box<dyn SearchProgress> = if quiet {
        Box::new(NoProgress)
    } else {
        Box::new(ProgressReporter::new())
    };

    match use_case.execute(&query, progress.as_ref()).await {
        Ok(output) => {
            let format = args.output.unwrap_or(output_config.format);
            println!("{}", formatter_for(format).format(&output));
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!("{}", ConsoleFormatter::format_find_error(&e));
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn run_chat(config: &FileConfig, args: ChatArgs, quiet: bool) -> Result<ExitCode> {
    let gemini = Arc::new(GeminiClient::from_config(&config.gemini)?);

    let (params, _) = config.sessions.to_session_params();
    let registry = Arc::new(SessionRegistry::new(gemini, params));
    let sweeper = SessionSweeper::spawn(Arc::clone(&registry));

    let mut repl_config = repl_config(config);
    if quiet {
        repl_config.show_progress = false;
    }

    let mut repl = ChatRepl::new(Arc::clone(&registry), args.session.as_deref(), args.owner)
        .with_config(repl_config);
    let result = repl.run().await;

    sweeper.shutdown().await;
    result?;
    Ok(ExitCode::SUCCESS)
}

fn output_config(config: &FileConfig) -> OutputConfig {
    let format = config
        .output
        .format
        .as_deref()
        .and_then(OutputFormat::from_config)
        .unwrap_or_default();
    OutputConfig {
        format,
        color: config.output.color,
    }
}

fn repl_config(config: &FileConfig) -> ReplConfig {
    let defaults = ReplConfig::default();
    ReplConfig {
        show_progress: config.repl.show_progress,
        history_file: config
            .repl
            .history_file
            .as_deref()
            .map(ReplConfig::expand_path)
            .or(defaults.history_file),
        prompt: config.repl.prompt.clone(),
    }
}
