//! Log output for the console app.
//!
//! Logs go to stderr because stdout carries the dashboard and chat views.
//! The filter comes either from the configured level (`[app] log_level`, or
//! `EOS_LOG_LEVEL` when set) or from `RUST_LOG`. An explicit `EOS_LOG_LEVEL`
//! beats `RUST_LOG`, and `RUST_LOG` beats the level in the config file.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::error::AppError;

/// Where the active filter came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterSource {
    /// The level resolved by `config::load`.
    Configured,
    /// The `RUST_LOG` directives.
    RustLog,
}

/// Pick the filter for `level` given the raw `RUST_LOG` value.
///
/// A usable `RUST_LOG` is ignored when `level_forced` is set. Blank or
/// unparsable `RUST_LOG` values fall through to `level`.
pub fn choose_filter(
    level: &str,
    level_forced: bool,
    rust_log: Option<&str>,
) -> Result<(EnvFilter, FilterSource), AppError> {
    if !level_forced {
        let from_env = rust_log
            .map(str::trim)
            .filter(|directives| !directives.is_empty())
            .and_then(|directives| EnvFilter::try_new(directives).ok());
        if let Some(filter) = from_env {
            return Ok((filter, FilterSource::RustLog));
        }
    }

    let filter = EnvFilter::try_new(level)
        .map_err(|e| AppError::Logger(format!("invalid log level '{level}': {e}")))?;
    Ok((filter, FilterSource::Configured))
}

/// Install the global subscriber. Call once, after config is loaded.
pub fn init(level: &str, level_forced: bool) -> Result<FilterSource, AppError> {
    let rust_log = std::env::var("RUST_LOG").ok();
    let (filter, source) = choose_filter(level, level_forced, rust_log.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| AppError::Logger(format!("subscriber already installed: {e}")))?;

    Ok(source)
}

/// Reject anything that is not a plain level name.
pub fn parse_level(level: &str) -> Result<LevelFilter, AppError> {
    match level.trim() {
        "" => Err(AppError::Logger("log level is empty".into())),
        name => name
            .parse::<LevelFilter>()
            .map_err(|_| AppError::Logger(format!("unrecognised log level: '{level}'"))),
    }
}
