//! Application-wide error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),

    #[error("logger error: {0}")]
    Logger(String),

    #[error("transcript error: {0}")]
    Transcript(String),

    #[error("scheduler error: {0}")]
    Scheduler(String),

    #[error("console error: {0}")]
    Console(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
