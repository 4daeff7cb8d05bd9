//! StayVision - try a property before you book it
//!
//! CLI entry point for the API server and the terminal simulator.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use colored::Colorize;
use eyre::{Context, Result};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::{debug, info};

use stayvision::catalog::Catalog;
use stayvision::cli::{Cli, Command, OutputFormat};
use stayvision::config::Config;
use stayvision::conversation::{SimulationSession, Turn};
use stayvision::llm::create_client;
use stayvision::render::{render_price, render_result};
use stayvision::server::{AppState, FeedbackRecord, FeedbackSink, FeedbackTag, LogSink};

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    // Note: Can't log params here since logging isn't initialized yet
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("stayvision")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Determine log level with priority: CLI --log-level > config file > default (INFO)
    let level_str = cli_log_level.or(config_log_level);
    let level = if let Some(s) = level_str {
        match s.to_uppercase().as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
                tracing::Level::INFO
            }
        }
    } else {
        tracing::Level::INFO
    };

    let log_file = fs::File::create(log_dir.join("stayvision.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load log level from config file early (before full config load)
    let config_log_level = Config::load_log_level(cli.config.as_ref());

    // Setup logging with priority: CLI > config > INFO default
    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    // Load configuration
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    info!("StayVision loaded config: provider={}", config.llm.provider);

    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command {
        Some(Command::Serve { port }) => {
            debug!(?port, "main: matched Serve command");
            cmd_serve(config, port).await
        }
        Some(Command::Simulate { property_id }) => {
            debug!(%property_id, "main: matched Simulate command");
            cmd_simulate(&config, &property_id).await
        }
        Some(Command::Properties { format }) => {
            debug!(?format, "main: matched Properties command");
            cmd_properties(format)
        }
        None => {
            debug!("main: no command specified, listing properties");
            cmd_properties(OutputFormat::Text)?;
            println!("Run `stayvision simulate <PROPERTY>` to try a stay, or `stayvision serve` for the API.");
            Ok(())
        }
    }
}

/// Run the HTTP API server
async fn cmd_serve(mut config: Config, port: Option<u16>) -> Result<()> {
    debug!(?port, "cmd_serve: called");
    if let Some(port) = port {
        config.server.port = port;
    }

    // Fail fast on a missing API key; the scripted provider needs none
    if config.llm.provider == "openai" {
        config
            .llm
            .get_api_key()
            .context("LLM API key not found. Check api-key-env in your config.")?;
        debug!("cmd_serve: API key found");
    }

    let llm = create_client(&config.llm).context("Failed to create LLM client")?;
    info!("LLM client initialized ({})", config.llm.provider);

    let state = AppState {
        catalog: Arc::new(Catalog::new()),
        llm,
        prompts: Arc::new(stayvision::prompts::PromptBuilder::new()),
        feedback: Arc::new(LogSink),
        max_tokens: config.llm.max_tokens,
    };

    println!(
        "StayVision API listening on http://{}:{}",
        config.server.host, config.server.port
    );
    stayvision::server::serve(&config.server, state).await
}

/// Run an interactive stay simulation in the terminal
async fn cmd_simulate(config: &Config, property_id: &str) -> Result<()> {
    debug!(%property_id, "cmd_simulate: called");
    let catalog = Catalog::new();
    let property = catalog
        .lookup(property_id)
        .ok_or_else(|| eyre::eyre!("Unknown property '{}'. Run `stayvision properties` to list them.", property_id))?
        .clone();

    if config.llm.provider == "openai" {
        config
            .llm
            .get_api_key()
            .context("LLM API key not found. Check api-key-env in your config.")?;
    }
    let llm = create_client(&config.llm).context("Failed to create LLM client")?;
    debug!("cmd_simulate: LLM client created");

    println!();
    println!("{}", "Simulate Your Stay".bright_cyan().bold());
    println!(
        "  {} - {} - {}/week",
        property.name.bright_white(),
        property.location,
        render_price(&property)
    );
    println!("  Answer a few questions and we'll plan your 3 days. Ctrl+D to quit.");
    println!();

    let mut rl = DefaultEditor::new().map_err(|e| eyre::eyre!("Failed to initialize readline: {}", e))?;
    let mut session = SimulationSession::new(property.clone(), llm, config.llm.max_tokens);

    let mut turn = drive_with_retry(&mut session, &mut rl, None).await?;

    let result = loop {
        let step = match turn {
            Some(Turn::Question(step)) => step,
            Some(Turn::Completed(result)) => break Some(result),
            None => break None,
        };

        println!("{}", step.question.bright_blue());

        let answer = match read_answer(&mut rl)? {
            Some(answer) => answer,
            None => break None,
        };

        turn = drive_with_retry(&mut session, &mut rl, Some(&answer)).await?;
    };

    let Some(result) = result else {
        println!("Simulation abandoned.");
        return Ok(());
    };

    println!("{}", render_result(&property, &result));
    collect_feedback(&mut rl, &session).await?;

    Ok(())
}

/// Issue one session operation, offering retries on recoverable failures
///
/// `answer` of None means the opening `start()` call. Returns None when the
/// user declines to retry.
async fn drive_with_retry(
    session: &mut SimulationSession,
    rl: &mut DefaultEditor,
    answer: Option<&str>,
) -> Result<Option<Turn>> {
    let mut outcome = match answer {
        Some(text) => session.submit_answer(text).await,
        None => session.start().await,
    };

    loop {
        match outcome {
            Ok(turn) => return Ok(Some(turn)),
            Err(e) if e.is_retryable() => {
                println!("{} {}", "Something went wrong:".red(), e);
                match rl.readline("Try again? (y/N) ") {
                    Ok(line) if line.trim().eq_ignore_ascii_case("y") => {
                        outcome = session.retry().await;
                    }
                    Ok(_) => return Ok(None),
                    Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => return Ok(None),
                    Err(e) => return Err(eyre::eyre!("Readline error: {}", e)),
                }
            }
            Err(e) => return Err(e).context("Simulation failed"),
        }
    }
}

/// Read a non-empty answer; None on Ctrl+C / Ctrl+D
fn read_answer(rl: &mut DefaultEditor) -> Result<Option<String>> {
    loop {
        match rl.readline(&format!("{} ", ">".bright_green())) {
            Ok(line) => {
                let input = line.trim();
                if input.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(input);
                return Ok(Some(input.to_string()));
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                return Ok(None);
            }
            Err(ReadlineError::Eof) => {
                println!();
                return Ok(None);
            }
            Err(e) => return Err(eyre::eyre!("Readline error: {}", e)),
        }
    }
}

/// Ask for a 1-10 rating and an optional thumbs up/down, then log it
async fn collect_feedback(rl: &mut DefaultEditor, session: &SimulationSession) -> Result<()> {
    debug!("collect_feedback: called");
    let rating = loop {
        match rl.readline("Rate your simulated stay (1-10, Enter to skip): ") {
            Ok(line) => {
                let input = line.trim();
                if input.is_empty() {
                    return Ok(());
                }
                match input.parse::<u8>() {
                    Ok(n) if (1..=10).contains(&n) => break n,
                    _ => println!("Please enter a number from 1 to 10."),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => return Ok(()),
            Err(e) => return Err(eyre::eyre!("Readline error: {}", e)),
        }
    };

    let tag = match rl.readline("Would you book this stay? (y/n, Enter to skip) ") {
        Ok(line) => match line.trim().to_lowercase().as_str() {
            "y" | "yes" => Some(FeedbackTag::Positive),
            "n" | "no" => Some(FeedbackTag::Negative),
            _ => None,
        },
        Err(_) => None,
    };

    LogSink
        .record(FeedbackRecord {
            property_id: session.property().id.clone(),
            rating,
            tag,
            answers: session.answers().as_pairs().to_vec(),
        })
        .await;

    println!("Thanks for the feedback!");
    Ok(())
}

/// List the property catalog
fn cmd_properties(format: OutputFormat) -> Result<()> {
    debug!(?format, "cmd_properties: called");
    let catalog = Catalog::new();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(catalog.all())?);
        }
        OutputFormat::Text => {
            println!("Available properties:");
            println!();
            for property in catalog.all() {
                println!("  {}", property.id.bright_white());
                println!("    {} - {}", property.name, property.location);
                println!(
                    "    Sleeps {}, {} bedrooms, {} bathrooms, up to {} dogs",
                    property.sleeps, property.bedrooms, property.bathrooms, property.dogs_allowed
                );
                println!("    {}/week, rated {}", render_price(property), property.rating);
                println!();
            }
        }
    }

    Ok(())
}
