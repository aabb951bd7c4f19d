//! Transcript entries.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Who produced a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    User,
    Assistant,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::User => write!(f, "user"),
            Origin::Assistant => write!(f, "assistant"),
        }
    }
}

/// One immutable line of the conversation.
///
/// Only [`Transcript::append`](super::Transcript::append) creates these, so
/// the id and timestamp always reflect the message's position in the
/// transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversationMessage {
    id: Uuid,
    text: String,
    origin: Origin,
    created_at: DateTime<Utc>,
}

impl ConversationMessage {
    pub(super) fn new(text: String, origin: Origin, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::now_v7(),
            text,
            origin,
            created_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
