// bookliker - browse a books backend and like books from the terminal
//
// Architecture:
// - API client (reqwest): typed calls against the books REST backend
// - Like workflow: check-then-patch or atomic likes, serialized per book
// - Page: element tree (list entries + one detail panel per book)
// - TUI (ratatui): draws the page, routes input, applies task results
// - Demo backend (axum): in-memory server for offline runs and tests
// - Event system: spawned tasks report to the TUI over an mpsc channel

mod api;
mod cli;
mod config;
mod demo;
mod events;
mod like;
mod logging;
mod models;
mod page;
mod session;
mod startup;
mod tasks;
mod theme;
mod tui;

use anyhow::{Context, Result};
use api::{BooksApi, HttpBooksApi};
use clap::Parser;
use cli::{Cli, Commands};
use config::{Config, LogRotation};
use demo::DemoBackend;
use like::LikeWorkflow;
use logging::{LogBuffer, TuiLogLayer};
use session::Session;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Config management never touches the backend
    if let Some(Commands::Config { show, reset, path }) = &cli.command {
        cli::handle_config(&cli, *show, *reset, *path);
        return Ok(());
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    let mut config = Config::from_env();
    cli.apply_to(&mut config);

    // Subcommands are headless
    if cli.command.is_some() {
        config.enable_tui = false;
    }

    let log_buffer = LogBuffer::new();
    // The guard must live for the whole program so file logs flush
    let _file_guard = init_logging(&config, &log_buffer);

    // Demo mode: serve the in-memory backend and point the client at it
    let _demo_backend = if config.demo_mode {
        let backend = DemoBackend::serve_for(&mut config)
            .await
            .context("Failed to start demo backend")?;
        Some(backend)
    } else {
        None
    };

    let api: Arc<dyn BooksApi> = Arc::new(
        HttpBooksApi::new(config.api_url.as_str(), config.request_timeout())
            .context("Failed to create HTTP client")?,
    );
    let workflow = Arc::new(LikeWorkflow::new(api.clone(), config.like_mode));
    let session = Session::new(config.user_id);

    match cli.command {
        Some(Commands::Books) => return cli::run_books(api.as_ref()).await,
        Some(Commands::Like { book_id }) => {
            return cli::run_like(api.as_ref(), &workflow, session, book_id).await;
        }
        _ => {}
    }

    if config.enable_tui {
        startup::log_startup(&config);
        let services = tui::app::Services {
            api,
            workflow,
            session,
        };
        tui::run_tui(services, log_buffer, config).await?;
    } else {
        // Headless: same bootstrap as the TUI, printed instead of drawn
        startup::print_startup(&config);
        if let Err(e) = session.resolve(api.as_ref()).await {
            tracing::warn!("Could not resolve user {}: {}", session.user_id(), e);
        }
        cli::run_books(api.as_ref()).await?;
    }

    Ok(())
}

/// Initialize tracing with output chosen by mode
///
/// - TUI mode: capture logs to the in-memory buffer (prevents garbling the display)
/// - Headless mode: human-readable logs on stderr (stdout carries command output)
/// - File logging: optionally JSON logs to rotating files, in addition to the above
///
/// Precedence: RUST_LOG env var > config file > default "info"
fn init_logging(
    config: &Config,
    log_buffer: &LogBuffer,
) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let default_filter = format!("bookliker={}", config.logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let tui_layer = config
        .enable_tui
        .then(|| TuiLogLayer::new(log_buffer.clone()));
    let stderr_layer =
        (!config.enable_tui).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    let (file_layer, guard) = if config.logging.file_enabled {
        match std::fs::create_dir_all(&config.logging.file_dir) {
            Ok(()) => {
                let file_appender = match config.logging.file_rotation {
                    LogRotation::Hourly => tracing_appender::rolling::hourly(
                        &config.logging.file_dir,
                        &config.logging.file_prefix,
                    ),
                    LogRotation::Daily => tracing_appender::rolling::daily(
                        &config.logging.file_dir,
                        &config.logging.file_prefix,
                    ),
                    LogRotation::Never => tracing_appender::rolling::never(
                        &config.logging.file_dir,
                        &config.logging.file_prefix,
                    ),
                };

                // Non-blocking writer: writes happen on a background thread
                let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
                let layer = tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(non_blocking)
                    .with_ansi(false);
                (Some(layer), Some(guard))
            }
            Err(e) => {
                // Fall back to non-file logging
                eprintln!(
                    "Warning: Could not create log directory {:?}: {}",
                    config.logging.file_dir, e
                );
                (None, None)
            }
        }
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tui_layer)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    guard
}
