//! Logo Maker Bot - Main Entry Point
//!
//! Runs the logo commands against a console chat: every line typed is
//! treated as an incoming chat message.

use std::io::{self, IsTerminal};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use dialoguer::Input;
use reqwest::Url;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use logo_maker_bot::chat::{ConsoleMessenger, IncomingMessage};
use logo_maker_bot::commands::CommandHandler;
use logo_maker_bot::config::{LogoSettings, StyleCatalog};
use logo_maker_bot::logo::{HttpRenderer, LogoOrchestrator, MakerApiClient};

/// Chat bot that turns text into stylized logos.
#[derive(Parser, Debug)]
#[command(name = "logo_bot")]
#[command(about = "Turn text into stylized logos through web logo generators")]
#[command(version)]
struct Args {
    /// Path to a style catalog JSON file (defaults to the built-in styles).
    #[arg(short, long)]
    styles: Option<String>,

    /// Path to the .env file for environment variables.
    #[arg(long, default_value = ".env")]
    env_file: String,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Chat id used for the console conversation.
    #[arg(long, default_value = "console@local")]
    jid: String,

    /// Display name of the console user.
    #[arg(long, default_value = "you")]
    sender: String,

    /// Handle a single message and exit.
    #[arg(short, long)]
    message: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    init_logging(&args.log_level);

    // Load environment variables
    if let Err(e) = dotenvy::from_filename(&args.env_file) {
        debug!("Could not load .env file ({}): {}", args.env_file, e);
    }

    let settings = LogoSettings::from_env().context("Failed to load settings from environment")?;

    let catalog = load_catalog(args.styles.as_deref(), &settings)?;
    info!("Loaded {} logo styles", catalog.len());

    let handler = build_handler(&settings, catalog)?;
    info!("Command prefix: {}", settings.command_prefix);

    if let Some(text) = &args.message {
        let message = IncomingMessage::new(&args.jid, &args.sender, text);
        return handle_message(&handler, &message, &settings.command_prefix)
            .await
            .context("Failed to deliver to chat");
    }

    info!("Bot is running. Type 'exit' or press Ctrl+C to stop.");
    let mut input = LineSource::detect();
    tokio::select! {
        result = run_console(&handler, &mut input, &args, &settings.command_prefix) => result?,
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down...");
        }
    }

    info!("Shutting down...");
    Ok(())
}

/// Initializes the logging subsystem.
fn init_logging(level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Loads and validates the style catalog.
fn load_catalog(cli_path: Option<&str>, settings: &LogoSettings) -> Result<StyleCatalog> {
    let path = cli_path
        .map(std::path::PathBuf::from)
        .or_else(|| settings.styles_path.clone());

    let catalog = match path {
        Some(path) => StyleCatalog::load_from_file(&path)
            .with_context(|| format!("Failed to load style catalog {}", path.display()))?,
        None => StyleCatalog::builtin(),
    };

    catalog
        .validate()
        .context("Style catalog validation failed")?;

    Ok(catalog)
}

/// Wires the HTTP collaborators, the console messenger and the handler.
fn build_handler(settings: &LogoSettings, catalog: StyleCatalog) -> Result<CommandHandler> {
    let client = reqwest::Client::builder()
        .timeout(settings.request_timeout())
        .user_agent(concat!("logo_maker_bot/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build HTTP client")?;

    let render_url = settings
        .render_url
        .as_deref()
        .map(Url::parse)
        .transpose()
        .context("Invalid rendering service URL")?;

    let renderer = Arc::new(HttpRenderer::new(client.clone(), render_url));
    match renderer.endpoint() {
        Some(endpoint) => info!("Rendering service: {}", endpoint),
        None => warn!("No rendering service configured; every request will use the fallback API"),
    }

    let fallback = Arc::new(MakerApiClient::new(client, settings.api_base()));
    info!("Fallback API: {}", fallback.api_base());
    let messenger = Arc::new(ConsoleMessenger::new());
    let orchestrator = LogoOrchestrator::new(settings, renderer, fallback, messenger);

    Ok(CommandHandler::new(
        settings.command_prefix.clone(),
        Arc::new(catalog),
        Arc::new(orchestrator),
        settings.report_failures.into(),
    ))
}

/// Handles one chat line, hinting at the menu for non-commands.
async fn handle_message(
    handler: &CommandHandler,
    message: &IncomingMessage,
    prefix: &str,
) -> Result<()> {
    match handler.try_handle(message).await? {
        Some(result) => debug!("{}", result.message),
        None => println!("Not a logo command. Try {prefix}logomenu"),
    }
    Ok(())
}

/// Feeds input lines to the handler until `exit`, `quit` or end of input.
async fn run_console(
    handler: &CommandHandler,
    input: &mut LineSource,
    args: &Args,
    prefix: &str,
) -> Result<()> {
    while let Some(line) = input.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if matches!(line, "exit" | "quit") {
            break;
        }

        let message = IncomingMessage::new(&args.jid, &args.sender, line);
        if let Err(e) = handle_message(handler, &message, prefix).await {
            error!("Chat delivery failed: {}", e);
        }
    }
    Ok(())
}

/// Where chat lines come from.
enum LineSource {
    /// Interactive prompt on a terminal.
    Terminal,
    /// Lines read from redirected input.
    Piped(Lines<Box<dyn AsyncBufRead + Unpin + Send>>),
}

impl LineSource {
    /// Prompts on a terminal, reads stdin directly otherwise.
    fn detect() -> Self {
        if io::stdin().is_terminal() {
            Self::Terminal
        } else {
            Self::piped(BufReader::new(tokio::io::stdin()))
        }
    }

    fn piped(reader: impl AsyncBufRead + Unpin + Send + 'static) -> Self {
        let reader: Box<dyn AsyncBufRead + Unpin + Send> = Box::new(reader);
        Self::Piped(reader.lines())
    }

    /// Reads the next line. Returns `None` once input is closed.
    async fn next_line(&mut self) -> Result<Option<String>> {
        match self {
            Self::Terminal => read_prompt().await,
            Self::Piped(lines) => lines.next_line().await.context("Failed to read input"),
        }
    }
}

/// Reads one line from the terminal prompt.
async fn read_prompt() -> Result<Option<String>> {
    let line = tokio::task::spawn_blocking(|| {
        Input::<String>::new()
            .with_prompt(">")
            .allow_empty(true)
            .interact_text()
    })
    .await
    .context("Input task failed")?;

    match line {
        Ok(line) => Ok(Some(line)),
        Err(dialoguer::Error::IO(e)) if e.kind() == io::ErrorKind::UnexpectedEof => {
            debug!("Input closed");
            Ok(None)
        }
        Err(e) => {
            warn!("Failed to read input: {}", e);
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn piped(text: &'static str) -> LineSource {
        LineSource::piped(text.as_bytes())
    }

    #[tokio::test]
    async fn test_piped_input_yields_lines_then_eof() {
        let mut input = piped(".logo1 Neon\n\n.logomenu");

        assert_eq!(input.next_line().await.unwrap().as_deref(), Some(".logo1 Neon"));
        assert_eq!(input.next_line().await.unwrap().as_deref(), Some(""));
        assert_eq!(input.next_line().await.unwrap().as_deref(), Some(".logomenu"));
        assert_eq!(input.next_line().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_piped_input_handles_crlf() {
        let mut input = piped("exit\r\n");
        assert_eq!(input.next_line().await.unwrap().as_deref(), Some("exit"));
        assert_eq!(input.next_line().await.unwrap(), None);
    }
}
