//! Console front end — reads lines from stdin and renders the dashboard and
//! chat views to stdout.
//!
//! Input handling lives in [`Console::handle_line`], which writes to any
//! [`std::io::Write`] so it can be driven from tests.  Assistant replies land
//! asynchronously (after the session's reply delay) and are printed by a
//! separate task subscribed to the transcript feed, but only while the chat
//! view is active.  Switching back to chat replays the transcript.
//!
//! Runs until stdin closes, `/quit`, or the `shutdown` token is cancelled.

mod view;

pub use view::{Command, HELP, View};

use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{broadcast, watch};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::chat::{ChatSession, ConversationMessage, Origin};
use crate::error::AppError;
use crate::insights::Dashboard;

/// What the read loop should do after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Console {
    app_name: String,
    session: ChatSession,
    view: watch::Sender<View>,
}

impl Console {
    pub fn new(app_name: impl Into<String>, session: ChatSession, start_view: View) -> Self {
        let (view, _) = watch::channel(start_view);
        Self {
            app_name: app_name.into(),
            session,
            view,
        }
    }

    pub fn view(&self) -> View {
        *self.view.borrow()
    }

    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    /// Render the active view in full.
    pub fn render_view<W: Write>(&self, out: &mut W) -> Result<(), AppError> {
        match self.view() {
            View::Dashboard => {
                writeln!(out, "{}", Dashboard.render())?;
                writeln!(out, "(read-only — /chat to ask the assistant, /help for commands)")?;
            }
            View::Chat => {
                writeln!(out, "── {} assistant ──", self.app_name)?;
                self.render_history(out)?;
            }
        }
        Ok(())
    }

    fn render_history<W: Write>(&self, out: &mut W) -> Result<(), AppError> {
        for message in self.session.transcript().snapshot()? {
            writeln!(out, "{}", format_message(&message))?;
        }
        Ok(())
    }

    fn switch_view(&self, view: View) {
        self.view.send_replace(view);
        debug!(%view, "view switched");
    }

    /// Handle one line of input.
    pub async fn handle_line<W: Write>(&self, line: &str, out: &mut W) -> Result<Flow, AppError> {
        if let Some(cmd) = Command::parse(line) {
            match cmd {
                Command::Show(view) => {
                    self.switch_view(view);
                    self.render_view(out)?;
                }
                Command::History => self.render_history(out)?,
                Command::Export => {
                    let snapshot = self.session.transcript().snapshot()?;
                    let json = serde_json::to_string_pretty(&snapshot)
                        .map_err(|e| AppError::Console(format!("export transcript: {e}")))?;
                    writeln!(out, "{json}")?;
                }
                Command::Help => writeln!(out, "{HELP}")?,
                Command::Quit => return Ok(Flow::Quit),
                Command::Unknown(name) => writeln!(out, "unknown command: /{name} (try /help)")?,
            }
            return Ok(Flow::Continue);
        }

        if line.trim().is_empty() {
            return Ok(Flow::Continue);
        }

        match self.view() {
            View::Dashboard => {
                writeln!(out, "The dashboard is read-only. Type /chat to ask the assistant.")?;
            }
            View::Chat => {
                self.session.submit(line).await?;
            }
        }
        Ok(Flow::Continue)
    }

    /// Interactive loop on stdin/stdout.
    pub async fn run(self, shutdown: CancellationToken) -> Result<(), AppError> {
        info!(view = %self.view(), "console started");

        let mut stdout = std::io::stdout();
        writeln!(stdout, "─────────────────────────────────")?;
        writeln!(stdout, " {}  (/help, Ctrl-C to quit)", self.app_name)?;
        writeln!(stdout, "─────────────────────────────────")?;
        self.render_view(&mut stdout)?;

        let printer = tokio::spawn(print_replies(
            self.session.transcript().subscribe(),
            self.view.subscribe(),
            shutdown.clone(),
            std::io::stdout(),
        ));

        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            write!(stdout, "> ")?;
            stdout.flush()?;

            tokio::select! {
                biased;

                _ = shutdown.cancelled() => {
                    writeln!(stdout)?;
                    info!("console shutting down");
                    break;
                }

                line = lines.next_line() => {
                    match line {
                        Err(e) => {
                            warn!("stdin read error: {e}");
                            break;
                        }
                        Ok(None) => {
                            info!("stdin closed");
                            break;
                        }
                        Ok(Some(input)) => {
                            if self.handle_line(&input, &mut stdout).await? == Flow::Quit {
                                info!("quit requested");
                                break;
                            }
                        }
                    }
                }
            }
        }

        printer.abort();
        Ok(())
    }
}

/// Print assistant messages as they land, while the chat view is showing.
async fn print_replies<W: Write + Send + 'static>(
    mut feed: broadcast::Receiver<ConversationMessage>,
    view: watch::Receiver<View>,
    shutdown: CancellationToken,
    mut out: W,
) {
    loop {
        tokio::select! {
            biased;

            _ = shutdown.cancelled() => break,

            msg = feed.recv() => match msg {
                Ok(message) => {
                    let active = *view.borrow();
                    if let Err(e) = write_reply(&mut out, &message, active) {
                        warn!("reply printer write failed: {e}");
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    warn!(skipped = n, "reply printer lagged; /history shows everything");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
        }
    }
}

/// Write `message` over the prompt if it is an assistant reply and `view` is
/// chat. Returns whether anything was written.
fn write_reply<W: Write>(out: &mut W, message: &ConversationMessage, view: View) -> std::io::Result<bool> {
    if message.origin() != Origin::Assistant || view != View::Chat {
        return Ok(false);
    }
    write!(out, "\r{}\n> ", format_message(message))?;
    out.flush()?;
    Ok(true)
}

fn format_message(message: &ConversationMessage) -> String {
    let who = match message.origin() {
        Origin::User => "you",
        Origin::Assistant => "eos",
    };
    format!(
        "[{}] {who}> {}",
        message.created_at().format("%H:%M:%S"),
        message.text()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use tokio::time;

    use crate::chat::classifier::{REVENUE_RESPONSE, ResponseClassifier};
    use crate::chat::Transcript;
    use crate::config::Config;
    use crate::scheduler::ReplyScheduler;

    fn console(shutdown: &CancellationToken) -> Console {
        let cfg = Config::test_default();
        let session = ChatSession::new(
            Transcript::new(),
            Arc::new(ResponseClassifier::insights()),
            ReplyScheduler::start(shutdown.clone()),
            cfg.chat.reply_delay,
        );
        Console::new(cfg.app_name, session, cfg.console.start_view)
    }

    /// Writer the printer task can own while the test reads what it wrote.
    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl SharedBuf {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().write(buf)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    async fn run_line(c: &Console, line: &str) -> (Flow, String) {
        let mut out = Vec::new();
        let flow = c.handle_line(line, &mut out).await.unwrap();
        (flow, String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn dashboard_is_read_only() {
        let shutdown = CancellationToken::new();
        let c = console(&shutdown);
        assert_eq!(c.view(), View::Dashboard);

        let (flow, out) = run_line(&c, "what about revenue?").await;
        assert_eq!(flow, Flow::Continue);
        assert!(out.contains("read-only"));
        assert!(c.session().transcript().is_empty().unwrap());
        shutdown.cancel();
    }

    #[tokio::test]
    async fn chat_view_submits_and_reply_follows() {
        time::pause();
        let shutdown = CancellationToken::new();
        let c = console(&shutdown);

        let (_, out) = run_line(&c, "/chat").await;
        assert_eq!(c.view(), View::Chat);
        assert!(out.contains("assistant"));

        run_line(&c, "How are sales?").await;
        let snap = c.session().transcript().snapshot().unwrap();
        assert_eq!(snap.len(), 1);
        assert_eq!(snap[0].origin(), Origin::User);

        time::advance(Duration::from_millis(1100)).await;
        tokio::task::yield_now().await;
        let (_, history) = run_line(&c, "/history").await;
        assert!(history.contains("you> How are sales?"));
        assert!(history.contains(REVENUE_RESPONSE));
        shutdown.cancel();
    }

    #[tokio::test]
    async fn blank_chat_line_is_ignored() {
        let shutdown = CancellationToken::new();
        let c = console(&shutdown);
        run_line(&c, "/chat").await;
        let (_, out) = run_line(&c, "   ").await;
        assert!(out.is_empty());
        assert!(c.session().transcript().is_empty().unwrap());
        shutdown.cancel();
    }

    #[tokio::test]
    async fn export_is_json_array() {
        let shutdown = CancellationToken::new();
        let c = console(&shutdown);
        c.session().transcript().append(Origin::Assistant, "hello").unwrap();

        let (_, out) = run_line(&c, "/export").await;
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed[0]["text"], "hello");
        assert_eq!(parsed[0]["origin"], "assistant");
        shutdown.cancel();
    }

    #[tokio::test]
    async fn quit_and_unknown_commands() {
        let shutdown = CancellationToken::new();
        let c = console(&shutdown);
        let (flow, out) = run_line(&c, "/bogus").await;
        assert_eq!(flow, Flow::Continue);
        assert!(out.contains("unknown command: /bogus"));

        let (flow, _) = run_line(&c, "/quit").await;
        assert_eq!(flow, Flow::Quit);
        shutdown.cancel();
    }

    #[tokio::test]
    async fn dashboard_command_renders_metrics() {
        let shutdown = CancellationToken::new();
        let c = console(&shutdown);
        run_line(&c, "/chat").await;
        let (_, out) = run_line(&c, "/dashboard").await;
        assert_eq!(c.view(), View::Dashboard);
        assert!(out.contains("$75,000"));
        shutdown.cancel();
    }

    #[test]
    fn reply_printed_only_for_assistant_in_chat_view() {
        let transcript = Transcript::new();
        let user = transcript.append(Origin::User, "how are sales?").unwrap();
        let reply = transcript.append(Origin::Assistant, REVENUE_RESPONSE).unwrap();

        let mut out = Vec::new();
        assert!(!write_reply(&mut out, &reply, View::Dashboard).unwrap());
        assert!(!write_reply(&mut out, &user, View::Chat).unwrap());
        assert!(out.is_empty());

        assert!(write_reply(&mut out, &reply, View::Chat).unwrap());
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with('\r'));
        assert!(text.contains(&format!("eos> {REVENUE_RESPONSE}")));
        assert!(text.ends_with("\n> "));
    }

    #[tokio::test]
    async fn printer_follows_view_switches() {
        let shutdown = CancellationToken::new();
        let transcript = Transcript::new();
        let (view_tx, view_rx) = watch::channel(View::Dashboard);
        let buf = SharedBuf::default();
        let printer = tokio::spawn(print_replies(
            transcript.subscribe(),
            view_rx,
            shutdown.clone(),
            buf.clone(),
        ));

        // Let the printer drain each append before the view changes.
        async fn settle() {
            for _ in 0..5 {
                tokio::task::yield_now().await;
            }
        }

        transcript.append(Origin::Assistant, "while on dashboard").unwrap();
        settle().await;
        assert_eq!(buf.text(), "");

        view_tx.send_replace(View::Chat);
        transcript.append(Origin::User, "a question").unwrap();
        transcript.append(Origin::Assistant, "while chatting").unwrap();
        settle().await;

        let text = buf.text();
        assert!(text.contains("eos> while chatting"), "printed: {text:?}");
        assert!(!text.contains("while on dashboard"));
        assert!(!text.contains("a question"));

        shutdown.cancel();
        printer.await.unwrap();
    }
}
