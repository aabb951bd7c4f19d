//! Background timer task — the scheduler run-loop.
//!
//! Maintains a `BTreeMap<Instant, PendingEntry>` priority queue and sleeps
//! until the next deadline via `tokio::time::sleep_until`.  Zero polling.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace};
use uuid::Uuid;

use super::{Completion, PendingTask};

// ── Commands ─────────────────────────────────────────────────────────────────

/// Internal command sent from [`super::ReplyScheduler`] to the background task.
pub(super) enum SchedulerCommand {
    Schedule {
        delay: Duration,
        label: String,
        completion: Completion,
        reply: oneshot::Sender<Uuid>,
    },
    Cancel {
        task_id: Uuid,
        reply: oneshot::Sender<bool>, // true if found and removed
    },
    List {
        reply: oneshot::Sender<Vec<PendingTask>>,
    },
}

// ── Queue entry ──────────────────────────────────────────────────────────────

struct PendingEntry {
    id: Uuid,
    label: String,
    completion: Completion,
}

// ── Service ──────────────────────────────────────────────────────────────────

pub(super) struct SchedulerService {
    cmd_rx: mpsc::Receiver<SchedulerCommand>,
    shutdown: CancellationToken,
}

impl SchedulerService {
    pub(super) fn new(cmd_rx: mpsc::Receiver<SchedulerCommand>, shutdown: CancellationToken) -> Self {
        Self { cmd_rx, shutdown }
    }

    /// Run the timer loop until shutdown or until every handle is dropped.
    pub(super) async fn run(mut self) {
        // Equal deadlines are nudged by 1ns so keys stay unique and entries
        // fire in submission order.
        let mut queue: BTreeMap<Instant, PendingEntry> = BTreeMap::new();
        let mut id_to_deadline: HashMap<Uuid, Instant> = HashMap::new();

        debug!("scheduler service running");

        loop {
            let next_deadline = queue.keys().next().copied();

            tokio::select! {
                biased;

                _ = self.shutdown.cancelled() => {
                    info!(dropped = queue.len(), "scheduler shutting down");
                    break;
                }

                // Due timers fire before queued commands are served.
                _ = async {
                    match next_deadline {
                        Some(d) => tokio::time::sleep_until(d).await,
                        None => std::future::pending().await,
                    }
                } => {
                    if let Some((_, entry)) = queue.pop_first() {
                        id_to_deadline.remove(&entry.id);
                        debug!(task_id = %entry.id, label = %entry.label, "firing");
                        (entry.completion)();
                    }
                }

                cmd = self.cmd_rx.recv() => {
                    let Some(cmd) = cmd else {
                        debug!(dropped = queue.len(), "all scheduler handles dropped");
                        break;
                    };
                    match cmd {
                        SchedulerCommand::Schedule { delay, label, completion, reply } => {
                            let id = Uuid::now_v7();
                            let entry = PendingEntry { id, label: label.clone(), completion };
                            let deadline = insert_unique(&mut queue, Instant::now() + delay, entry);
                            id_to_deadline.insert(id, deadline);
                            debug!(task_id = %id, %label, ?delay, "scheduled");
                            let _ = reply.send(id);
                        }
                        SchedulerCommand::Cancel { task_id, reply } => {
                            let removed = match id_to_deadline.remove(&task_id) {
                                Some(deadline) => {
                                    queue.remove(&deadline);
                                    debug!(%task_id, "cancelled");
                                    true
                                }
                                None => {
                                    debug!(%task_id, "cancel: not pending");
                                    false
                                }
                            };
                            let _ = reply.send(removed);
                        }
                        SchedulerCommand::List { reply } => {
                            let now = Instant::now();
                            let pending: Vec<PendingTask> = queue
                                .iter()
                                .map(|(deadline, entry)| PendingTask {
                                    id: entry.id,
                                    label: entry.label.clone(),
                                    due_in: deadline.saturating_duration_since(now),
                                })
                                .collect();
                            trace!(count = pending.len(), "listing pending tasks");
                            let _ = reply.send(pending);
                        }
                    }
                }
            }
        }
    }
}

/// Insert into the BTreeMap, nudging the key by 1ns while it is taken.
/// Returns the actual key used.
fn insert_unique(
    queue: &mut BTreeMap<Instant, PendingEntry>,
    mut deadline: Instant,
    entry: PendingEntry,
) -> Instant {
    while queue.contains_key(&deadline) {
        deadline += Duration::from_nanos(1);
    }
    queue.insert(deadline, entry);
    deadline
}
