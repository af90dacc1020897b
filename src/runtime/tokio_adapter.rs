//! Tokio adapter moving blocking scheduler calls off the async runtime.
//!
//! `enqueue_task` may block on backpressure and `shutdown(true)` blocks until
//! the queue drains. Both are run through `tokio::task::spawn_blocking` so
//! async callers never stall a runtime worker.

use std::sync::Arc;

use crate::core::{SchedulerError, Task, TaskOption, TaskScheduler};

/// Async front end over any [`TaskScheduler`].
#[derive(Clone)]
pub struct AsyncTaskScheduler {
    inner: Arc<dyn TaskScheduler>,
}

impl AsyncTaskScheduler {
    /// Wrap a shared scheduler.
    #[must_use]
    pub fn new(inner: Arc<dyn TaskScheduler>) -> Self {
        Self { inner }
    }

    /// The wrapped scheduler.
    #[must_use]
    pub fn inner(&self) -> &Arc<dyn TaskScheduler> {
        &self.inner
    }

    /// Initialize the wrapped scheduler.
    ///
    /// # Errors
    ///
    /// Same as [`TaskScheduler::init`].
    pub fn init(&self) -> Result<(), SchedulerError> {
        self.inner.init()
    }

    /// Whether the wrapped scheduler admits work.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.inner.is_ready()
    }

    /// Enqueue a task, waiting asynchronously while the queue is full.
    ///
    /// # Errors
    ///
    /// Same as [`TaskScheduler::enqueue_task`], plus
    /// [`SchedulerError::Internal`] if the blocking call could not complete.
    pub async fn enqueue_task(&self, task: Task, options: &[TaskOption]) -> Result<(), SchedulerError> {
        let inner = Arc::clone(&self.inner);
        let options = options.to_vec();
        tokio::task::spawn_blocking(move || inner.enqueue_task(task, &options))
            .await
            .map_err(|e| SchedulerError::Internal(format!("enqueue join error: {e}")))?
    }

    /// Box `f` and enqueue it with default options.
    ///
    /// # Errors
    ///
    /// Same as [`AsyncTaskScheduler::enqueue_task`].
    pub async fn enqueue<F>(&self, f: F) -> Result<(), SchedulerError>
    where
        F: FnOnce() + Send + 'static,
    {
        self.enqueue_task(Box::new(f), &[]).await
    }

    /// Shut the wrapped scheduler down without blocking the runtime.
    ///
    /// # Errors
    ///
    /// Same as [`TaskScheduler::shutdown`], plus
    /// [`SchedulerError::Internal`] if the blocking call could not complete.
    pub async fn shutdown(&self, wait_for_all_tasks: bool) -> Result<(), SchedulerError> {
        let inner = Arc::clone(&self.inner);
        tokio::task::spawn_blocking(move || inner.shutdown(wait_for_all_tasks))
            .await
            .map_err(|e| SchedulerError::Internal(format!("shutdown join error: {e}")))?
    }
}

impl std::fmt::Debug for AsyncTaskScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsyncTaskScheduler")
            .field("ready", &self.inner.is_ready())
            .finish()
    }
}
