// CLI module - command-line argument parsing and handlers
//
// Subcommands:
// - books: print the book collection and exit
// - like <book-id>: like a book once as the session user
// - config --show/--path/--reset: configuration management
//
// Running without a subcommand starts the TUI.

use crate::api::BooksApi;
use crate::config::{Config, VERSION};
use crate::like::{LikeOutcome, LikeWorkflow, ALREADY_LIKED_NOTICE};
use crate::models::{Book, BookId, UserId};
use crate::session::Session;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;

/// bookliker - browse books and like them from the terminal
#[derive(Parser)]
#[command(name = "bookliker")]
#[command(version = VERSION)]
#[command(about = "Browse a books backend and like books", long_about = None)]
pub struct Cli {
    /// Serve an in-memory demo backend and use it instead of api_url
    #[arg(long, global = true)]
    pub demo: bool,

    /// Act as this user id (overrides config and BOOKLIKER_USER)
    #[arg(long, global = true)]
    pub user: Option<UserId>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the book list
    Books,

    /// Like a book once and print the outcome
    Like {
        /// Identifier of the book to like
        book_id: BookId,
    },

    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

impl Cli {
    /// Apply global flags on top of the loaded configuration
    pub fn apply_to(&self, config: &mut Config) {
        if self.demo {
            config.demo_mode = true;
        }
        if let Some(user) = self.user {
            config.user_id = user;
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Book commands
// ─────────────────────────────────────────────────────────────────────────────

/// One line per book: id, title, liker count
pub fn format_book_line(book: &Book) -> String {
    let likes = match book.users.len() {
        1 => "1 like".to_string(),
        n => format!("{} likes", n),
    };
    format!("{:>4}  {}  ({})", book.id, book.title, likes)
}

/// `bookliker books`
pub async fn run_books(api: &dyn BooksApi) -> Result<()> {
    let books = api.list_books().await.context("Failed to fetch books")?;

    if books.is_empty() {
        println!("No books.");
        return Ok(());
    }

    let mut out = std::io::stdout().lock();
    for book in &books {
        writeln!(out, "{}", format_book_line(book))?;
    }
    Ok(())
}

/// `bookliker like <book-id>`
pub async fn run_like(
    api: &dyn BooksApi,
    workflow: &LikeWorkflow,
    session: Session,
    book_id: BookId,
) -> Result<()> {
    let user = session
        .resolve(api)
        .await
        .with_context(|| format!("Failed to resolve user {}", session.user_id()))?;

    match workflow.like(book_id, &user).await? {
        LikeOutcome::Liked { book_id, user } => {
            println!("{} liked book {}", user.username, book_id);
        }
        LikeOutcome::AlreadyLiked { .. } => {
            println!("{}", ALREADY_LIKED_NOTICE);
        }
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Config commands
// ─────────────────────────────────────────────────────────────────────────────

pub fn handle_config(cli: &Cli, show: bool, reset: bool, path: bool) {
    if path {
        handle_config_path();
    } else if show {
        handle_config_show(cli);
    } else if reset {
        handle_config_reset();
    } else {
        // No flag provided, show help
        println!("Usage: bookliker config [--show|--reset|--path]");
        println!();
        println!("Options:");
        println!("  --show    Display effective configuration");
        println!("  --reset   Reset config file to defaults");
        println!("  --path    Show config file path");
    }
}

fn handle_config_path() {
    match Config::config_path() {
        Some(path) => println!("{}", path.display()),
        None => {
            eprintln!("Error: Could not determine config path");
            std::process::exit(1);
        }
    }
}

/// `loaded` with the global flags applied, as TOML
fn effective_config_toml(cli: &Cli, mut loaded: Config) -> String {
    cli.apply_to(&mut loaded);
    loaded.to_toml()
}

fn handle_config_show(cli: &Cli) {
    println!("# Effective configuration (flags > env > file > defaults)");
    println!();
    print!("{}", effective_config_toml(cli, Config::from_env()));

    println!();
    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("# Source: {}", path.display());
        } else {
            println!("# Source: defaults (no config file)");
        }
    }
}

fn handle_config_reset() {
    let Some(path) = Config::config_path() else {
        eprintln!("Error: Could not determine config path");
        std::process::exit(1);
    };

    // Confirm if file exists
    if path.exists() {
        eprint!(
            "Config file exists at {}. Overwrite? [y/N] ",
            path.display()
        );
        let _ = std::io::stderr().flush();

        let mut input = String::new();
        if std::io::stdin().read_line(&mut input).is_err()
            || !input.trim().eq_ignore_ascii_case("y")
        {
            println!("Aborted.");
            return;
        }
    }

    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            eprintln!("Error creating directory: {}", e);
            std::process::exit(1);
        }
    }

    // Write the default config (using Config's single source of truth)
    if let Err(e) = std::fs::write(&path, Config::default().to_toml()) {
        eprintln!("Error writing config: {}", e);
        std::process::exit(1);
    }

    println!("Config reset to defaults: {}", path.display());
}
