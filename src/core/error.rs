//! Error types for scheduler operations.

use thiserror::Error;

/// Errors produced by scheduler components.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    /// `init` was called on a scheduler that is already ready.
    #[error("scheduler already initialized")]
    AlreadyInitialized,
    /// Work was submitted (or a shutdown requested) while the scheduler is not ready.
    #[error("scheduler not ready, call init() before enqueueing")]
    NotReady,
    /// The scheduler has been shut down and cannot be used again.
    #[error("scheduler has been shut down")]
    Terminated,
    /// Stopping the workers failed; the scheduler may be inconsistent.
    #[error("shutdown signal failed: {0}")]
    ShutdownSignal(String),
    /// A worker thread could not be spawned.
    #[error("failed to spawn worker: {0}")]
    WorkerSpawn(String),
    /// Configuration validation failed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// Runtime adapter failure (blocking task join error, etc.).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result alias for application code built on top of the scheduler.
///
/// The crate's own API returns [`SchedulerError`]; this alias lets callers mix
/// it with other errors through `?` and `anyhow::Context`.
///
/// ```rust
/// use anyhow::Context;
/// use prometheus_task_scheduler::core::{AppResult, FifoScheduler, TaskScheduler};
///
/// fn run_batch(jobs: usize) -> AppResult<()> {
///     let sched = FifoScheduler::new(jobs, 2)?;
///     sched.init().context("starting batch workers")?;
///     for _ in 0..jobs {
///         sched.enqueue(|| {})?;
///     }
///     sched.shutdown(true)?;
///     Ok(())
/// }
///
/// run_batch(4)?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub type AppResult<T> = Result<T, anyhow::Error>;
