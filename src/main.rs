//! EOS Insights — console entry point.
//!
//! Startup sequence:
//!   1. Load .env (if present)
//!   2. Load config
//!   3. Init logger at configured level
//!   4. Start the reply scheduler and chat session
//!   5. Run the console until quit, EOF or Ctrl-C

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use eos_insights::chat::{ChatSession, ResponseClassifier, Transcript};
use eos_insights::console::Console;
use eos_insights::error::AppError;
use eos_insights::scheduler::ReplyScheduler;
use eos_insights::{config, logger};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    // .env is optional.
    let _ = dotenvy::dotenv();

    let config = config::load()?;
    logger::parse_level(&config.log_level)?;
    let log_source = logger::init(&config.log_level, config.log_level_forced)?;

    info!(
        app_name = %config.app_name,
        log_level = %config.log_level,
        ?log_source,
        reply_delay_ms = config.chat.reply_delay.as_millis() as u64,
        start_view = %config.console.start_view,
        "config loaded"
    );

    let shutdown = CancellationToken::new();

    let scheduler = ReplyScheduler::start(shutdown.clone());
    let mut session = ChatSession::new(
        Transcript::new(),
        Arc::new(ResponseClassifier::insights()),
        scheduler,
        config.chat.reply_delay,
    );
    if let Some(welcome) = &config.chat.welcome {
        session = session.with_welcome(welcome)?;
    }

    let console = Console::new(config.app_name.clone(), session, config.console.start_view);

    let ctrl_c = {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    info!("ctrl-c received");
                    shutdown.cancel();
                }
                Err(e) => warn!("cannot listen for ctrl-c: {e}"),
            }
        })
    };

    let result = console.run(shutdown.clone()).await;

    // Pending replies are dropped with the scheduler.
    shutdown.cancel();
    ctrl_c.abort();

    info!("bye");
    result
}
