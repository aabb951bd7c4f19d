//! Chat session — the append-then-classify submission sequence.
//!
//! ```text
//! submit("What about engagement?")
//!   ├─ transcript.append(User, input)          (synchronous)
//!   └─ scheduler.schedule(reply_delay, ...)    (returns ScheduledTask)
//!          └─ classifier.classify(input)
//!             transcript.append(Assistant, reply)
//! ```

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::error::AppError;
use crate::scheduler::{ReplyScheduler, ScheduledTask};
use super::classifier::ResponseClassifier;
use super::message::{ConversationMessage, Origin};
use super::transcript::Transcript;

/// Result of an accepted submission.
#[derive(Debug)]
pub struct Submission {
    pub user_message: ConversationMessage,
    /// The pending assistant reply.
    pub reply: ScheduledTask,
}

#[derive(Clone)]
pub struct ChatSession {
    transcript: Transcript,
    classifier: Arc<ResponseClassifier>,
    scheduler: ReplyScheduler,
    reply_delay: Duration,
}

impl ChatSession {
    pub fn new(
        transcript: Transcript,
        classifier: Arc<ResponseClassifier>,
        scheduler: ReplyScheduler,
        reply_delay: Duration,
    ) -> Self {
        Self {
            transcript,
            classifier,
            scheduler,
            reply_delay,
        }
    }

    /// Open the conversation with an assistant greeting.
    pub fn with_welcome(self, welcome: &str) -> Result<Self, AppError> {
        self.transcript.append(Origin::Assistant, welcome)?;
        Ok(self)
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Submit user input.
    ///
    /// Blank or whitespace-only input is ignored: nothing is appended and no
    /// reply is scheduled (`Ok(None)`). Otherwise the user message is
    /// appended immediately and the classified reply lands after the
    /// configured delay.
    pub async fn submit(&self, input: &str) -> Result<Option<Submission>, AppError> {
        if input.trim().is_empty() {
            debug!("blank submission ignored");
            return Ok(None);
        }

        let user_message = self.transcript.append(Origin::User, input)?;
        let label = match self.classifier.classify_topic(input) {
            Some(topic) => format!("reply:{topic}"),
            None => "reply:fallback".to_string(),
        };

        let transcript = self.transcript.clone();
        let classifier = self.classifier.clone();
        let text = input.to_string();
        let reply = self
            .scheduler
            .schedule(self.reply_delay, label.as_str(), move || {
                let response = classifier.classify(&text);
                if let Err(e) = transcript.append(Origin::Assistant, response) {
                    warn!("assistant reply dropped: {e}");
                }
            })
            .await?;

        debug!(
            message_id = %user_message.id(),
            task_id = %reply.id(),
            %label,
            "reply scheduled"
        );

        Ok(Some(Submission { user_message, reply }))
    }
}
