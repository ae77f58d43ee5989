// Startup module - banner and session summary
//
// Printed before the TUI takes over the screen (or in headless mode), and
// repeated into the log buffer so it shows in the System Logs panel.

use crate::config::{Config, VERSION};

/// ANSI color codes for terminal output
mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const MAGENTA: &str = "\x1b[35m";
}

/// One line of the startup summary
pub struct SettingLine {
    pub name: &'static str,
    pub value: String,
}

/// Settings worth showing at startup
pub fn summary(config: &Config) -> Vec<SettingLine> {
    vec![
        SettingLine {
            name: "backend",
            value: config.api_url.clone(),
        },
        SettingLine {
            name: "user",
            value: config.user_id.to_string(),
        },
        SettingLine {
            name: "likes",
            value: config.like_mode.as_str().to_string(),
        },
        SettingLine {
            name: "theme",
            value: config.theme.clone(),
        },
    ]
}

/// Print the startup banner to stdout
pub fn print_startup(config: &Config) {
    use colors::*;

    println!();
    println!("  {BOLD}{CYAN}bookliker{RESET} {DIM}v{VERSION}{RESET}");
    println!("  {DIM}Browse books and like them{RESET}");
    println!();

    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("  {DIM}Config:{RESET} {GREEN}✓{RESET} {}", path.display());
        } else {
            println!("  {DIM}Config:{RESET} {DIM}(using defaults){RESET}");
        }
    }
    println!();

    for line in summary(config) {
        println!(
            "    {MAGENTA}▸{RESET} {:<8} {BOLD}{}{RESET}",
            line.name, line.value
        );
    }

    if config.demo_mode {
        println!("  {YELLOW}▸{RESET} {YELLOW}Demo mode active{RESET} {DIM}(in-memory backend){RESET}");
    }
    println!();
}

/// Write the same summary into the log buffer (TUI mode)
pub fn log_startup(config: &Config) {
    tracing::info!("bookliker v{}", VERSION);
    for line in summary(config) {
        tracing::info!("  {} = {}", line.name, line.value);
    }
    if config.demo_mode {
        tracing::info!("Demo mode active (in-memory backend)");
    }
}
