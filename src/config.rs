//! Configuration loading with env-var overrides.
//!
//! Reads `config/default.toml` relative to the current working directory,
//! then applies `EOS_LOG_LEVEL` and `EOS_REPLY_DELAY_MS` env overrides.

use std::{
    env, fs,
    path::Path,
    time::Duration,
};

use serde::Deserialize;

use crate::console::View;
use crate::error::AppError;

/// Greeting the assistant opens every session with.
pub const DEFAULT_WELCOME: &str = "Welcome to EOS Insights! I can help you analyze your data and answer questions about your analytics. What would you like to know?";

/// Chat panel configuration.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// Artificial latency between a user message and its reply.
    pub reply_delay: Duration,
    /// Opening assistant message. `None` starts with an empty transcript.
    pub welcome: Option<String>,
}

/// Console front-end configuration.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// View shown when the console starts.
    pub start_view: View,
}

/// Fully-resolved configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub app_name: String,
    pub log_level: String,
    /// `EOS_LOG_LEVEL` set `log_level`, so it wins over `RUST_LOG`.
    pub log_level_forced: bool,
    pub chat: ChatConfig,
    pub console: ConsoleConfig,
}

/// Raw TOML shape — `serde` target before resolution.
#[derive(Deserialize)]
struct RawConfig {
    app: RawApp,
    #[serde(default)]
    chat: RawChat,
    #[serde(default)]
    console: RawConsole,
}

#[derive(Deserialize)]
struct RawApp {
    #[serde(default = "default_app_name")]
    name: String,
    #[serde(default = "default_log_level")]
    log_level: String,
}

#[derive(Deserialize)]
struct RawChat {
    #[serde(default = "default_reply_delay_ms")]
    reply_delay_ms: u64,
    /// An empty string disables the greeting.
    #[serde(default = "default_welcome")]
    welcome: String,
}

impl Default for RawChat {
    fn default() -> Self {
        Self {
            reply_delay_ms: default_reply_delay_ms(),
            welcome: default_welcome(),
        }
    }
}

#[derive(Deserialize)]
struct RawConsole {
    #[serde(default = "default_start_view")]
    start_view: String,
}

impl Default for RawConsole {
    fn default() -> Self {
        Self { start_view: default_start_view() }
    }
}

fn default_app_name() -> String { "EOS Insights".to_string() }
fn default_log_level() -> String { "info".to_string() }
fn default_reply_delay_ms() -> u64 { 1000 }
fn default_welcome() -> String { DEFAULT_WELCOME.to_string() }
fn default_start_view() -> String { "dashboard".to_string() }

/// Load config from `config/default.toml`, then apply env-var overrides.
pub fn load() -> Result<Config, AppError> {
    let log_level_override = env::var("EOS_LOG_LEVEL").ok();
    let reply_delay_override = env::var("EOS_REPLY_DELAY_MS").ok();
    load_from(
        Path::new("config/default.toml"),
        log_level_override.as_deref(),
        reply_delay_override.as_deref(),
    )
}

/// Internal loader — accepts an explicit path and optional overrides.
/// Tests pass overrides directly instead of mutating env vars.
pub fn load_from(
    path: &Path,
    log_level_override: Option<&str>,
    reply_delay_override: Option<&str>,
) -> Result<Config, AppError> {
    let raw = fs::read_to_string(path)
        .map_err(|e| AppError::Config(format!("cannot read {}: {e}", path.display())))?;

    let parsed: RawConfig = toml::from_str(&raw)
        .map_err(|e| AppError::Config(format!("parse error in {}: {e}", path.display())))?;

    let log_level = log_level_override.unwrap_or(&parsed.app.log_level).to_string();

    let reply_delay_ms = match reply_delay_override {
        Some(v) => v.trim().parse::<u64>().map_err(|e| {
            AppError::Config(format!("EOS_REPLY_DELAY_MS must be milliseconds, got '{v}': {e}"))
        })?,
        None => parsed.chat.reply_delay_ms,
    };

    let welcome = Some(parsed.chat.welcome).filter(|w| !w.trim().is_empty());

    let start_view = parsed
        .console
        .start_view
        .parse::<View>()
        .map_err(|e| AppError::Config(format!("[console] start_view: {e}")))?;

    Ok(Config {
        app_name: parsed.app.name,
        log_level,
        log_level_forced: log_level_override.is_some(),
        chat: ChatConfig {
            reply_delay: Duration::from_millis(reply_delay_ms),
            welcome,
        },
        console: ConsoleConfig { start_view },
    })
}

// ── test helpers ──────────────────────────────────────────────────────────────

/// Deterministic `Config` for unit tests — no file access.
#[cfg(test)]
impl Config {
    pub fn test_default() -> Self {
        Self {
            app_name: "test".into(),
            log_level: "info".into(),
            log_level_forced: false,
            chat: ChatConfig {
                reply_delay: Duration::from_millis(default_reply_delay_ms()),
                welcome: Some(DEFAULT_WELCOME.to_string()),
            },
            console: ConsoleConfig { start_view: View::Dashboard },
        }
    }
}
