//! Chat panel: rule-based reply classifier, session transcript, and the
//! submission sequence that ties them together.
//!
//! ```text
//! ChatSession::submit()
//!     ├── Transcript          (append-only, shared)
//!     ├── ResponseClassifier  (pure, first-match rules)
//!     └── ReplyScheduler      (delayed, cancellable completion)
//! ```

pub mod classifier;
pub mod message;
pub mod session;
pub mod transcript;

pub use classifier::{ResponseClassifier, Rule, Topic};
pub use message::{ConversationMessage, Origin};
pub use session::{ChatSession, Submission};
pub use transcript::Transcript;
