//! Reply scheduler — runs completions after a delay, cancellable by handle.
//!
//! [`ReplyScheduler::start`] spawns a single background tokio task that parks
//! on `tokio::time::sleep_until` until the earliest deadline.  The task wakes
//! only when a timer fires, a command arrives on its internal channel, or
//! shutdown is requested.
//!
//! Completions run on the scheduler task in deadline order.  On shutdown
//! every pending completion is dropped without running.

mod service;

use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::error::AppError;
use service::{SchedulerCommand, SchedulerService};

/// Work to run once a deadline passes.
pub type Completion = Box<dyn FnOnce() + Send + 'static>;

const COMMAND_BUFFER: usize = 64;

/// A queued task as reported by [`ReplyScheduler::pending`].
#[derive(Debug, Clone)]
pub struct PendingTask {
    pub id: Uuid,
    pub label: String,
    /// Time left until the deadline, zero if already due.
    pub due_in: Duration,
}

/// Cloneable front end to the scheduler task.
#[derive(Clone)]
pub struct ReplyScheduler {
    cmd_tx: mpsc::Sender<SchedulerCommand>,
}

impl ReplyScheduler {
    /// Spawn the background timer task. Must be called inside a tokio runtime.
    pub fn start(shutdown: CancellationToken) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel(COMMAND_BUFFER);
        tokio::spawn(SchedulerService::new(cmd_rx, shutdown).run());
        Self { cmd_tx }
    }

    /// Run `completion` once `delay` has elapsed.
    pub async fn schedule<F>(
        &self,
        delay: Duration,
        label: impl Into<String>,
        completion: F,
    ) -> Result<ScheduledTask, AppError>
    where
        F: FnOnce() + Send + 'static,
    {
        let (ack_tx, ack_rx) = oneshot::channel();
        let cmd = SchedulerCommand::Schedule {
            delay,
            label: label.into(),
            completion: Box::new(completion),
            reply: ack_tx,
        };
        self.cmd_tx
            .send(cmd)
            .await
            .map_err(|_| AppError::Scheduler("scheduler not running".into()))?;
        let id = ack_rx
            .await
            .map_err(|_| AppError::Scheduler("scheduler dropped reply".into()))?;

        Ok(ScheduledTask {
            id,
            cmd_tx: self.cmd_tx.clone(),
        })
    }

    /// Tasks still waiting for their deadline, earliest first.
    pub async fn pending(&self) -> Result<Vec<PendingTask>, AppError> {
        let (ack_tx, ack_rx) = oneshot::channel();
        self.cmd_tx
            .send(SchedulerCommand::List { reply: ack_tx })
            .await
            .map_err(|_| AppError::Scheduler("scheduler not running".into()))?;
        ack_rx
            .await
            .map_err(|_| AppError::Scheduler("scheduler dropped reply".into()))
    }
}

/// Handle to one scheduled completion.
///
/// Dropping the handle does not cancel the task.
#[derive(Clone)]
pub struct ScheduledTask {
    id: Uuid,
    cmd_tx: mpsc::Sender<SchedulerCommand>,
}

impl std::fmt::Debug for ScheduledTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScheduledTask").field("id", &self.id).finish()
    }
}

impl ScheduledTask {
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Remove the task from the queue. Returns `false` if it already fired
    /// or was cancelled before.
    pub async fn cancel(&self) -> Result<bool, AppError> {
        let (ack_tx, ack_rx) = oneshot::channel();
        self.cmd_tx
            .send(SchedulerCommand::Cancel { task_id: self.id, reply: ack_tx })
            .await
            .map_err(|_| AppError::Scheduler("scheduler not running".into()))?;
        ack_rx
            .await
            .map_err(|_| AppError::Scheduler("scheduler dropped reply".into()))
    }
}
