//! Bounded FIFO scheduler backed by a fixed-size worker pool.
//!
//! Tasks are dequeued in the order they were accepted, across the whole pool.
//! Producers block once `capacity` tasks are waiting, and at most
//! `concurrency` tasks run at the same time.
//!
//! # Example
//!
//! ```rust
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//!
//! use prometheus_task_scheduler::core::{FifoScheduler, TaskScheduler};
//!
//! let sched = FifoScheduler::new(10, 3)?;
//! sched.init()?;
//!
//! let counter = Arc::new(AtomicUsize::new(0));
//! for _ in 0..5 {
//!     let counter = Arc::clone(&counter);
//!     sched.enqueue(move || {
//!         counter.fetch_add(1, Ordering::SeqCst);
//!     })?;
//! }
//!
//! // Run everything already enqueued, then stop the workers.
//! sched.shutdown(true)?;
//! assert_eq!(counter.load(Ordering::SeqCst), 5);
//! # Ok::<(), prometheus_task_scheduler::core::SchedulerError>(())
//! ```

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use crossbeam_channel::{bounded, Receiver, Sender};
use parking_lot::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::worker_pool::{PoolShared, WorkerOptions, WorkerPool};
use super::{SchedulerError, SchedulerState, SchedulerStats, Task, TaskConfig, TaskOption, TaskScheduler};
use crate::config::SchedulerConfig;

/// Lifecycle state and the pool it owns, guarded together.
#[derive(Debug)]
struct Lifecycle {
    state: SchedulerState,
    pool: Option<WorkerPool>,
}

/// FIFO implementation of [`TaskScheduler`].
///
/// `priority` options are accepted and ignored: tasks always run in
/// enqueue order.
///
/// # Locking
///
/// `enqueue_task` holds the lifecycle read lock for the whole call, including
/// a blocking send into a full queue. `init` and `shutdown` take the write
/// lock only to flip state, so `shutdown` first waits out enqueues already
/// admitted and afterwards every new enqueue sees `ShuttingDown` and fails
/// with [`SchedulerError::NotReady`]. A task body that enqueues into the same
/// full scheduler while a shutdown is pending can therefore deadlock.
/// [`FifoScheduler::state`] and [`TaskScheduler::is_ready`] read an atomic
/// mirror and never touch the lock, so tasks may call them freely.
#[derive(Debug)]
pub struct FifoScheduler {
    id: Uuid,
    capacity: usize,
    concurrency: usize,
    worker_options: WorkerOptions,
    task_tx: Sender<Task>,
    task_rx: Receiver<Task>,
    lifecycle: RwLock<Lifecycle>,
    /// Mirror of `lifecycle.state`, written under the write lock.
    state: AtomicU8,
    shared: Arc<PoolShared>,
}

impl FifoScheduler {
    /// Create a scheduler holding up to `capacity` queued tasks and running
    /// up to `concurrency` at once.
    ///
    /// `capacity == 0` makes every enqueue a hand-off: it returns once a
    /// worker has taken the task.
    ///
    /// # Errors
    ///
    /// [`SchedulerError::InvalidConfig`] if `concurrency == 0`, since no
    /// worker would ever run a task.
    pub fn new(capacity: usize, concurrency: usize) -> Result<Self, SchedulerError> {
        Self::with_config(&SchedulerConfig {
            capacity,
            concurrency,
            ..SchedulerConfig::default()
        })
    }

    /// Create a scheduler from a full configuration.
    ///
    /// # Errors
    ///
    /// [`SchedulerError::InvalidConfig`] if the configuration fails validation.
    pub fn with_config(config: &SchedulerConfig) -> Result<Self, SchedulerError> {
        config.validate().map_err(SchedulerError::InvalidConfig)?;

        let (task_tx, task_rx) = bounded::<Task>(config.capacity);
        let sched = Self {
            id: Uuid::new_v4(),
            capacity: config.capacity,
            concurrency: config.concurrency,
            worker_options: WorkerOptions {
                name_prefix: config.thread_name_prefix.clone(),
                stack_size: config.thread_stack_size,
            },
            task_tx,
            task_rx,
            lifecycle: RwLock::new(Lifecycle {
                state: SchedulerState::Uninitialized,
                pool: None,
            }),
            state: AtomicU8::new(SchedulerState::Uninitialized.as_u8()),
            shared: Arc::new(PoolShared::default()),
        };

        debug!(
            scheduler_id = %sched.id,
            capacity = sched.capacity,
            concurrency = sched.concurrency,
            "FIFO scheduler created"
        );
        Ok(sched)
    }

    /// Unique id of this scheduler, used in log fields.
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// Maximum number of queued, not yet running tasks.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of workers.
    #[must_use]
    pub const fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> SchedulerState {
        SchedulerState::from_u8(self.state.load(Ordering::Acquire))
    }

    fn set_state(&self, lifecycle: &mut Lifecycle, state: SchedulerState) {
        lifecycle.state = state;
        self.state.store(state.as_u8(), Ordering::Release);
    }

    /// Get current scheduler statistics.
    #[must_use]
    pub fn stats(&self) -> SchedulerStats {
        self.shared.snapshot(self.concurrency, self.task_rx.len())
    }

    /// Drop whatever is still queued without running it.
    fn discard_queued(&self) -> usize {
        self.task_rx
            .try_iter()
            .map(|task| self.shared.discard(task))
            .count()
    }
}

impl TaskScheduler for FifoScheduler {
    fn init(&self) -> Result<(), SchedulerError> {
        let mut lifecycle = self.lifecycle.write();
        match lifecycle.state {
            SchedulerState::Uninitialized => {}
            SchedulerState::Ready => return Err(SchedulerError::AlreadyInitialized),
            SchedulerState::ShuttingDown | SchedulerState::Stopped => {
                return Err(SchedulerError::Terminated);
            }
        }

        let pool = WorkerPool::spawn(self.concurrency, &self.worker_options, &self.task_rx, &self.shared)?;
        lifecycle.pool = Some(pool);
        self.set_state(&mut lifecycle, SchedulerState::Ready);

        info!(
            scheduler_id = %self.id,
            worker_count = self.concurrency,
            capacity = self.capacity,
            "FIFO scheduler ready"
        );
        Ok(())
    }

    fn enqueue_task(&self, task: Task, options: &[TaskOption]) -> Result<(), SchedulerError> {
        let lifecycle = self.lifecycle.read();
        if lifecycle.state != SchedulerState::Ready {
            debug!(scheduler_id = %self.id, state = ?lifecycle.state, "Rejected enqueue");
            return Err(SchedulerError::NotReady);
        }

        // FIFO ignores priority.
        let config = TaskConfig::from_options(options);

        self.shared.in_flight.add();
        if let Err(err) = self.task_tx.send(task) {
            // Unreachable while we hold the receiver, but keep the count honest.
            self.shared.discard(err.into_inner());
            return Err(SchedulerError::NotReady);
        }
        self.shared.counters.submitted_tasks.fetch_add(1, Ordering::Relaxed);

        debug!(scheduler_id = %self.id, priority = ?config.priority, "Task enqueued");
        Ok(())
    }

    fn shutdown(&self, wait_for_all_tasks: bool) -> Result<(), SchedulerError> {
        let (pool, on_worker) = {
            let mut lifecycle = self.lifecycle.write();
            match lifecycle.state {
                SchedulerState::Ready => {}
                SchedulerState::Uninitialized => return Err(SchedulerError::NotReady),
                SchedulerState::ShuttingDown | SchedulerState::Stopped => {
                    return Err(SchedulerError::Terminated);
                }
            }
            self.set_state(&mut lifecycle, SchedulerState::ShuttingDown);
            let pool = lifecycle.pool.take();
            let on_worker = pool.as_ref().is_some_and(WorkerPool::owns_current_thread);
            (pool, on_worker)
        };

        info!(
            scheduler_id = %self.id,
            wait_for_all_tasks = wait_for_all_tasks,
            in_flight = self.shared.in_flight.get(),
            on_worker = on_worker,
            "Shutting down FIFO scheduler"
        );

        if wait_for_all_tasks {
            // The task calling us is itself in flight and retires only after we return.
            self.shared.in_flight.wait_until(u64::from(on_worker));
            debug!(scheduler_id = %self.id, "All accepted tasks completed");
        }

        let stopped = pool.map_or(Ok(()), WorkerPool::stop);

        let discarded = self.discard_queued();
        if discarded > 0 {
            warn!(scheduler_id = %self.id, discarded = discarded, "Discarded queued tasks on shutdown");
        }

        self.set_state(&mut self.lifecycle.write(), SchedulerState::Stopped);
        info!(scheduler_id = %self.id, "FIFO scheduler shut down complete");
        stopped
    }

    fn is_ready(&self) -> bool {
        self.state() == SchedulerState::Ready
    }
}
