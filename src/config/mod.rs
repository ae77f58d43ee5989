//! Configuration for the books front end
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/bookliker/config.toml)
//! 3. Built-in defaults (lowest priority)

use crate::like::LikeMode;
use crate::models::UserId;
use serde::Deserialize;
use std::time::Duration;

mod logging;


pub use logging::{FileLogging, LogRotation, LoggingConfig};

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_API_URL: &str = "http://localhost:3000";
const DEFAULT_USER_ID: UserId = 1;
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_THEME: &str = "default";

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the books backend
    pub api_url: String,

    /// Session user: the id fetched from `/users/:id` and used for likes
    pub user_id: UserId,

    /// How likes are submitted
    pub like_mode: LikeMode,

    /// Per-request timeout for backend calls
    pub request_timeout_secs: u64,

    /// Whether to enable the TUI (disabled = print the book list and exit)
    pub enable_tui: bool,

    /// Demo mode: serve an in-memory backend and point the client at it
    pub demo_mode: bool,

    /// Theme name: "default", "dracula", "nord"
    pub theme: String,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            user_id: DEFAULT_USER_ID,
            like_mode: LikeMode::default(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            enable_tui: true,
            demo_mode: false,
            theme: DEFAULT_THEME.to_string(),
            logging: LoggingConfig::default(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure (subset of Config that makes sense to persist)
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub api_url: Option<String>,
    pub user_id: Option<UserId>,
    pub like_mode: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub theme: Option<String>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

/// Parse a boolean-ish env flag ("1" / "true")
fn env_flag(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: ~/.config/bookliker/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<std::path::PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("bookliker").join("config.toml"))
    }

    /// Create config file with defaults if it doesn't exist
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        if path.exists() {
            return;
        }

        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // Config is optional
            }
        }

        let _ = std::fs::write(&path, Self::default().to_toml());
    }

    /// Load file config if it exists
    ///
    /// # Panics
    /// Exits the process if the file exists but cannot be read or parsed.
    /// A broken config fails fast instead of silently using defaults.
    fn load_file_config() -> FileConfig {
        let Some(path) = Self::config_path() else {
            return FileConfig::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => match Self::parse_file_config(&contents) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("\n  CONFIG ERROR - Failed to parse configuration file\n");
                    eprintln!("  File: {}\n", path.display());
                    eprintln!("  Error: {}\n", e);
                    eprintln!("  Tip: check for missing quotes, invalid booleans, or typos in section names.");
                    eprintln!("  To reset, run `bookliker config --reset`.\n");
                    std::process::exit(1);
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => FileConfig::default(),
            Err(e) => {
                eprintln!("\n  CONFIG ERROR - Cannot read configuration file\n");
                eprintln!("  File: {}\n", path.display());
                eprintln!("  Error: {}\n", e);
                std::process::exit(1);
            }
        }
    }

    pub(crate) fn parse_file_config(contents: &str) -> Result<FileConfig, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Load configuration: env vars > file > defaults
    pub fn from_env() -> Self {
        let file = Self::load_file_config();
        Self::resolve(file, |key| std::env::var(key).ok())
    }

    /// Merge a file config with an environment lookup
    pub(crate) fn resolve(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        // API URL: env > file > default
        let api_url = env("BOOKLIKER_API_URL")
            .or(file.api_url)
            .unwrap_or(defaults.api_url);

        // Session user: env > file > default
        let user_id = env("BOOKLIKER_USER")
            .and_then(|v| v.parse().ok())
            .or(file.user_id)
            .unwrap_or(defaults.user_id);

        // Like mode: env > file > default
        let like_mode = env("BOOKLIKER_LIKE_MODE")
            .or(file.like_mode)
            .map(|s| LikeMode::from_str(&s))
            .unwrap_or(defaults.like_mode);

        let request_timeout_secs = file
            .request_timeout_secs
            .filter(|secs| *secs > 0)
            .unwrap_or(defaults.request_timeout_secs);

        // TUI toggle and demo mode: env only (runtime flags)
        let enable_tui = env("BOOKLIKER_NO_TUI")
            .map(|v| !env_flag(&v))
            .unwrap_or(true);
        let demo_mode = env("BOOKLIKER_DEMO")
            .map(|v| env_flag(&v))
            .unwrap_or(false);

        let theme = env("BOOKLIKER_THEME")
            .or(file.theme)
            .unwrap_or(defaults.theme);

        let logging = LoggingConfig::from_file(file.logging);

        Self {
            api_url,
            user_id,
            like_mode,
            request_timeout_secs,
            enable_tui,
            demo_mode,
            theme,
            logging,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Serialize config to TOML string (single source of truth for format)
    pub fn to_toml(&self) -> String {
        format!(
            r#"# bookliker configuration

# Base URL of the books backend (json-server style REST API)
api_url = "{api_url}"

# Session user: fetched from /users/<id> and used for likes
user_id = {user_id}

# How likes are submitted:
#   check-then-patch  GET the book, PATCH the full liker list (works with json-server)
#   atomic            POST /books/<id>/likers, backend rejects duplicates with 409
like_mode = "{like_mode}"

# Per-request timeout in seconds
request_timeout_secs = {timeout}

# Theme: default, dracula, nord
theme = "{theme}"

# Logging configuration (RUST_LOG env var overrides level)
[logging]
level = "{log_level}"
file_enabled = {file_enabled}
file_dir = "{file_dir}"
file_rotation = "{file_rotation}"
file_prefix = "{file_prefix}"
"#,
            api_url = self.api_url,
            user_id = self.user_id,
            like_mode = self.like_mode.as_str(),
            timeout = self.request_timeout_secs,
            theme = self.theme,
            log_level = self.logging.level,
            file_enabled = self.logging.file_enabled,
            file_dir = self.logging.file_dir.display(),
            file_rotation = self.logging.file_rotation.as_str(),
            file_prefix = self.logging.file_prefix,
        )
    }
}
