//! In-memory, append-only conversation transcript.
//!
//! A [`Transcript`] is a cheap cloneable handle; every clone sees the same
//! messages. Nothing is written to disk and the contents are discarded when
//! the last handle is dropped.
//!
//! Appends are broadcast to subscribers so a front end can render replies
//! that land asynchronously (the delayed assistant reply).

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use tokio::sync::broadcast;
use tracing::trace;

use crate::error::AppError;
use super::message::{ConversationMessage, Origin};

/// Capacity of the append feed. Slow subscribers see `Lagged` rather than
/// blocking appends.
const FEED_CAPACITY: usize = 64;

#[derive(Clone)]
pub struct Transcript {
    messages: Arc<Mutex<Vec<ConversationMessage>>>,
    feed: broadcast::Sender<ConversationMessage>,
}

impl Transcript {
    pub fn new() -> Self {
        let (feed, _) = broadcast::channel(FEED_CAPACITY);
        Self {
            messages: Arc::new(Mutex::new(Vec::new())),
            feed,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<ConversationMessage>>, AppError> {
        self.messages
            .lock()
            .map_err(|_| AppError::Transcript("transcript lock poisoned".into()))
    }

    /// Append a new message and return a copy of it.
    ///
    /// The timestamp is taken under the lock and never goes backwards, so
    /// the sequence stays ordered by creation time even if the wall clock
    /// steps back.
    pub fn append(&self, origin: Origin, text: impl Into<String>) -> Result<ConversationMessage, AppError> {
        let message = {
            let mut messages = self.lock()?;
            let mut created_at = Utc::now();
            if let Some(last) = messages.last() {
                created_at = created_at.max(last.created_at());
            }
            let message = ConversationMessage::new(text.into(), origin, created_at);
            messages.push(message.clone());
            message
        };

        trace!(id = %message.id(), %origin, "transcript append");
        // No subscribers is fine.
        let _ = self.feed.send(message.clone());
        Ok(message)
    }

    /// Read-only copy of the whole transcript, oldest first.
    pub fn snapshot(&self) -> Result<Vec<ConversationMessage>, AppError> {
        Ok(self.lock()?.clone())
    }

    pub fn last(&self) -> Result<Option<ConversationMessage>, AppError> {
        Ok(self.lock()?.last().cloned())
    }

    pub fn len(&self) -> Result<usize, AppError> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, AppError> {
        Ok(self.lock()?.is_empty())
    }

    /// Receive every message appended after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<ConversationMessage> {
        self.feed.subscribe()
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}
