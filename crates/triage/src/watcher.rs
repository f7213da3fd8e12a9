//! Polling watcher for newly assigned tasks.
//!
//! The watcher repeatedly fetches the assigned task list and reports
//! tasks whose id has not been observed before. The first fetch after
//! `start` is a seed pass: it fills the known set without reporting, so
//! callers are not flooded with every pre-existing assignment.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use tracker::{Task, TaskSource};

/// Callback invoked once per tick with the newly observed tasks, in
/// fetch-response order. Never invoked with an empty list.
pub type NewTasksCallback = Arc<dyn Fn(Vec<Task>) + Send + Sync>;

/// Ids observed in any prior fetch. Grows monotonically; survives
/// `stop`/`start` on the same watcher instance.
type KnownTaskSet = Arc<Mutex<HashSet<String>>>;

struct RunningLoop {
    stop_tx: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

/// Watches the tracker for newly assigned tasks on a fixed interval.
///
/// At most one polling loop is active per instance; `start` while
/// running stops the previous loop first. Ticks never overlap: the next
/// interval is scheduled only after the previous fetch completes.
pub struct AssignmentWatcher {
    source: Arc<dyn TaskSource>,
    known: KnownTaskSet,
    running: Option<RunningLoop>,
}

impl AssignmentWatcher {
    /// Create a watcher over the given task source.
    #[must_use]
    pub fn new(source: Arc<dyn TaskSource>) -> Self {
        Self {
            source,
            known: Arc::new(Mutex::new(HashSet::new())),
            running: None,
        }
    }

    /// Begin polling. Any loop already running on this instance is
    /// stopped first. The initial fetch seeds the known set without
    /// invoking `on_new_tasks`.
    pub fn start(&mut self, interval: Duration, on_new_tasks: NewTasksCallback) {
        self.stop();

        let (stop_tx, stop_rx) = watch::channel(false);
        let source = Arc::clone(&self.source);
        let known = Arc::clone(&self.known);

        info!(interval_secs = interval.as_secs(), "Starting assignment watcher");
        let handle = tokio::spawn(run_loop(source, known, interval, on_new_tasks, stop_rx));

        self.running = Some(RunningLoop { stop_tx, handle });
    }

    /// Halt the polling loop. Idempotent; a no-op when not running. An
    /// in-flight fetch is discarded rather than applied.
    pub fn stop(&mut self) {
        if let Some(running) = self.running.take() {
            info!("Stopping assignment watcher");
            // The loop selects on this signal around both the sleep and
            // the fetch, so an in-flight fetch never reaches the known
            // set after stop.
            let _ = running.stop_tx.send(true);
            running.handle.abort();
        }
    }

    /// Whether a polling loop is currently active.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }
}

impl Drop for AssignmentWatcher {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn run_loop(
    source: Arc<dyn TaskSource>,
    known: KnownTaskSet,
    interval: Duration,
    on_new_tasks: NewTasksCallback,
    mut stop_rx: watch::Receiver<bool>,
) {
    // Seed pass: fold current assignments in without reporting them.
    tokio::select! {
        _ = stop_rx.changed() => return,
        result = source.fetch_assigned() => match result {
            Ok(tasks) => {
                let mut known = known.lock().await;
                for task in &tasks {
                    known.insert(task.id.clone());
                }
                info!(count = known.len(), "Seeded known assignments");
            }
            Err(e) => {
                warn!(error = %e, "Seed fetch failed");
            }
        }
    }

    loop {
        tokio::select! {
            _ = stop_rx.changed() => return,
            () = sleep(interval) => {}
        }

        tokio::select! {
            _ = stop_rx.changed() => return,
            result = source.fetch_assigned() => match result {
                Ok(tasks) => {
                    let fresh = {
                        let mut known = known.lock().await;
                        tasks
                            .into_iter()
                            .filter(|task| known.insert(task.id.clone()))
                            .collect::<Vec<_>>()
                    };
                    if fresh.is_empty() {
                        debug!("No new assignments");
                    } else {
                        info!(count = fresh.len(), "New assignments detected");
                        on_new_tasks(fresh);
                    }
                }
                Err(e) => {
                    // Transient failure: skip this tick, retry on the next.
                    warn!(error = %e, "Assignment poll failed; retrying next tick");
                }
            }
        }
    }
}
