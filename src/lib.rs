// Library root — exposes the dashboard, chat and console pieces for the
// binary and for integration tests. The binary entry point is src/main.rs.

pub mod chat;
pub mod config;
pub mod console;
pub mod error;
pub mod insights;
pub mod logger;
pub mod scheduler;
