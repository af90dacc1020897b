//! The `TaskScheduler` contract and its lifecycle states.

use serde::{Deserialize, Serialize};

use super::{SchedulerError, Task, TaskOption};

/// Lifecycle of a scheduler instance.
///
/// ```text
/// Uninitialized --init--> Ready --shutdown--> ShuttingDown --workers stopped--> Stopped
/// ```
///
/// `Stopped` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchedulerState {
    /// Constructed, no workers running.
    Uninitialized,
    /// Workers running, enqueues admitted.
    Ready,
    /// Shutdown in progress, enqueues rejected.
    ShuttingDown,
    /// All workers have exited.
    Stopped,
}

impl SchedulerState {
    pub(crate) const fn as_u8(self) -> u8 {
        match self {
            Self::Uninitialized => 0,
            Self::Ready => 1,
            Self::ShuttingDown => 2,
            Self::Stopped => 3,
        }
    }

    pub(crate) const fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Uninitialized,
            1 => Self::Ready,
            2 => Self::ShuttingDown,
            _ => Self::Stopped,
        }
    }
}

/// Task scheduling API shared by every strategy.
///
/// Implementations must be thread-safe: all methods take `&self` and may be
/// called from many threads through an `Arc`.
pub trait TaskScheduler: Send + Sync {
    /// Bring the scheduler to the ready state, spawning its workers.
    ///
    /// # Errors
    ///
    /// - [`SchedulerError::AlreadyInitialized`] if the scheduler is ready
    /// - [`SchedulerError::Terminated`] if it has been shut down
    /// - [`SchedulerError::WorkerSpawn`] if a worker could not be started
    fn init(&self) -> Result<(), SchedulerError>;

    /// Enqueue `task`, blocking while the queue is at capacity.
    ///
    /// Whether and when the task runs depends on the strategy and on how the
    /// scheduler is later shut down.
    ///
    /// # Errors
    ///
    /// [`SchedulerError::NotReady`] if the scheduler is not ready; the task is
    /// dropped without running.
    fn enqueue_task(&self, task: Task, options: &[TaskOption]) -> Result<(), SchedulerError>;

    /// Shut the scheduler down.
    ///
    /// With `wait_for_all_tasks` every task already accepted runs before the
    /// workers stop. Without it, running tasks finish and anything still
    /// queued is discarded.
    ///
    /// A task may shut down the scheduler it runs on. Its own worker is not
    /// joined: it is detached and exits once that task returns. A draining
    /// shutdown from inside a task waits for every other accepted task, so
    /// it needs another worker free to run them.
    ///
    /// # Errors
    ///
    /// - [`SchedulerError::NotReady`] if `init` was never called
    /// - [`SchedulerError::Terminated`] if already shut down
    /// - [`SchedulerError::ShutdownSignal`] if a worker failed to stop cleanly
    fn shutdown(&self, wait_for_all_tasks: bool) -> Result<(), SchedulerError>;

    /// Whether the scheduler currently admits work.
    fn is_ready(&self) -> bool;

    /// Box `f` and enqueue it with default options.
    ///
    /// # Errors
    ///
    /// Same as [`TaskScheduler::enqueue_task`].
    fn enqueue<F>(&self, f: F) -> Result<(), SchedulerError>
    where
        F: FnOnce() + Send + 'static,
        Self: Sized,
    {
        self.enqueue_task(Box::new(f), &[])
    }
}
