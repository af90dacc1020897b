//! Fixed-size pool of worker threads draining a shared bounded queue.
//!
//! Every worker blocks in a `select!` over the task queue and a stop channel.
//! The stop channel never carries a message: the pool drops its only
//! `Sender`, which disconnects every receiver at once, so a single stop
//! reaches all workers.
//!
//! # Design Principles
//!
//! - **No polling**: workers park on channel receive, drain waiters park on a Condvar
//! - **Broadcast stop**: disconnecting the stop channel wakes every worker
//! - **Panic isolation**: a panicking task is logged and counted, the worker keeps serving

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, select, Receiver, Sender};
use parking_lot::{Condvar, Mutex};
use serde::Serialize;
use tracing::{debug, error, info, warn};

use super::{SchedulerError, Task};

/// Statistics about scheduler utilization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SchedulerStats {
    /// Number of workers the scheduler was configured with.
    pub worker_count: usize,
    /// Worker threads that have started and not yet exited.
    pub live_workers: usize,
    /// Tasks sitting in the queue, not yet picked up.
    pub queued_tasks: usize,
    /// Accepted tasks that have neither completed nor been discarded.
    pub in_flight: u64,
    /// Total tasks accepted by `enqueue_task`.
    pub submitted_tasks: u64,
    /// Tasks that ran to completion (including ones that panicked).
    pub completed_tasks: u64,
    /// Tasks whose body panicked.
    pub panicked_tasks: u64,
    /// Tasks dropped unrun by an abort shutdown.
    pub discarded_tasks: u64,
}

/// Count of accepted-but-unfinished tasks with a blocking wait for zero.
#[derive(Debug, Default)]
pub(crate) struct InFlight {
    count: Mutex<u64>,
    idle: Condvar,
}

impl InFlight {
    pub(crate) fn add(&self) {
        *self.count.lock() += 1;
    }

    /// Retire one task and wake drain waiters.
    pub(crate) fn retire(&self) {
        let mut count = self.count.lock();
        *count = count.saturating_sub(1);
        self.idle.notify_all();
    }

    pub(crate) fn get(&self) -> u64 {
        *self.count.lock()
    }

    /// Block until every accepted task has been retired.
    pub(crate) fn wait_idle(&self) {
        self.wait_until(0);
    }

    /// Block until at most `remaining` accepted tasks are still unretired.
    pub(crate) fn wait_until(&self, remaining: u64) {
        let mut count = self.count.lock();
        while *count > remaining {
            self.idle.wait(&mut count);
        }
    }
}

/// Internal counters for scheduler statistics (lock-free atomics).
#[derive(Debug, Default)]
pub(crate) struct PoolCounters {
    pub live_workers: AtomicUsize,
    pub submitted_tasks: AtomicU64,
    pub completed_tasks: AtomicU64,
    pub panicked_tasks: AtomicU64,
    pub discarded_tasks: AtomicU64,
}

/// State shared between the scheduler front end and its workers.
#[derive(Debug, Default)]
pub(crate) struct PoolShared {
    pub in_flight: InFlight,
    pub counters: PoolCounters,
}

impl PoolShared {
    /// Account for a task that will never run.
    pub(crate) fn discard(&self, task: Task) {
        drop(task);
        self.counters.discarded_tasks.fetch_add(1, Ordering::Relaxed);
        self.in_flight.retire();
    }

    pub(crate) fn snapshot(&self, worker_count: usize, queued_tasks: usize) -> SchedulerStats {
        SchedulerStats {
            worker_count,
            live_workers: self.counters.live_workers.load(Ordering::Acquire),
            queued_tasks,
            in_flight: self.in_flight.get(),
            submitted_tasks: self.counters.submitted_tasks.load(Ordering::Relaxed),
            completed_tasks: self.counters.completed_tasks.load(Ordering::Relaxed),
            panicked_tasks: self.counters.panicked_tasks.load(Ordering::Relaxed),
            discarded_tasks: self.counters.discarded_tasks.load(Ordering::Relaxed),
        }
    }
}

/// Thread settings for spawned workers.
#[derive(Debug, Clone)]
pub(crate) struct WorkerOptions {
    pub name_prefix: String,
    pub stack_size: Option<usize>,
}

/// Running worker threads and the handle that stops them.
#[derive(Debug)]
pub(crate) struct WorkerPool {
    /// Dropping this sender is the stop broadcast.
    stop_tx: Option<Sender<()>>,
    stopping: Arc<AtomicBool>,
    workers: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Spawn `concurrency` workers pulling from `task_rx`.
    ///
    /// If any spawn fails, the workers already started are stopped and joined
    /// before the error is returned.
    pub(crate) fn spawn(
        concurrency: usize,
        options: &WorkerOptions,
        task_rx: &Receiver<Task>,
        shared: &Arc<PoolShared>,
    ) -> Result<Self, SchedulerError> {
        let (stop_tx, stop_rx) = bounded::<()>(0);
        let mut pool = Self {
            stop_tx: Some(stop_tx),
            stopping: Arc::new(AtomicBool::new(false)),
            workers: Vec::with_capacity(concurrency),
        };

        for worker_id in 0..concurrency {
            let mut builder = thread::Builder::new().name(format!("{}-{worker_id}", options.name_prefix));
            if let Some(size) = options.stack_size {
                builder = builder.stack_size(size);
            }

            let task_rx = task_rx.clone();
            let stop_rx = stop_rx.clone();
            let stopping = Arc::clone(&pool.stopping);
            let worker_shared = Arc::clone(shared);
            worker_shared.counters.live_workers.fetch_add(1, Ordering::AcqRel);

            match builder.spawn(move || worker_loop(worker_id, &task_rx, &stop_rx, &stopping, &worker_shared)) {
                Ok(handle) => pool.workers.push(handle),
                Err(e) => {
                    shared.counters.live_workers.fetch_sub(1, Ordering::AcqRel);
                    error!(worker_id = worker_id, error = %e, "Failed to spawn worker thread");
                    // Already-running workers exit cleanly; their join result is secondary.
                    let _ = pool.stop();
                    return Err(SchedulerError::WorkerSpawn(e.to_string()));
                }
            }
        }

        Ok(pool)
    }

    /// Whether the calling thread is one of this pool's workers.
    pub(crate) fn owns_current_thread(&self) -> bool {
        let current = thread::current().id();
        self.workers.iter().any(|handle| handle.thread().id() == current)
    }

    /// Raise the stop flag and disconnect the stop channel.
    fn signal_stop(&mut self) {
        self.stopping.store(true, Ordering::Release);
        self.stop_tx.take();
    }

    /// Stop every worker and wait for each thread to exit.
    ///
    /// A worker in the middle of a task finishes it first. When called from
    /// a worker of this pool, that worker is detached instead of joined; it
    /// exits once its current task returns.
    pub(crate) fn stop(mut self) -> Result<(), SchedulerError> {
        self.signal_stop();

        let current = thread::current().id();
        let worker_count = self.workers.len();
        let mut failed = Vec::new();
        for (worker_id, handle) in self.workers.drain(..).enumerate() {
            if handle.thread().id() == current {
                debug!(worker_id = worker_id, "Stop called from this worker, detaching it");
                continue;
            }
            if handle.join().is_err() {
                warn!(worker_id = worker_id, "Worker thread terminated abnormally");
                failed.push(worker_id);
            } else {
                debug!(worker_id = worker_id, "Worker joined");
            }
        }

        if failed.is_empty() {
            info!(worker_count = worker_count, "All workers stopped");
            Ok(())
        } else {
            Err(SchedulerError::ShutdownSignal(format!(
                "{} of {worker_count} workers did not stop cleanly: {failed:?}",
                failed.len()
            )))
        }
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        // Signal but don't join: the last owner may be running on a worker.
        if !self.workers.is_empty() {
            self.signal_stop();
            debug!("Worker pool dropped without explicit stop - workers will be detached");
        }
    }
}

/// Decrements the live worker count however the worker loop ends.
struct LiveWorker<'a> {
    worker_id: usize,
    shared: &'a PoolShared,
}

impl Drop for LiveWorker<'_> {
    fn drop(&mut self) {
        self.shared.counters.live_workers.fetch_sub(1, Ordering::AcqRel);
        debug!(worker_id = self.worker_id, "Worker thread exiting");
    }
}

fn worker_loop(
    worker_id: usize,
    task_rx: &Receiver<Task>,
    stop_rx: &Receiver<()>,
    stopping: &AtomicBool,
    shared: &PoolShared,
) {
    let _live = LiveWorker { worker_id, shared };
    debug!(worker_id = worker_id, "Worker thread started");

    loop {
        if stopping.load(Ordering::Acquire) {
            break;
        }

        select! {
            recv(task_rx) -> msg => {
                let Ok(task) = msg else { break };
                // Both channels may be ready; select! picks at random.
                if stopping.load(Ordering::Acquire) {
                    debug!(worker_id = worker_id, "Stop raised, discarding dequeued task");
                    shared.discard(task);
                    break;
                }
                run_task(worker_id, task, shared);
            }
            recv(stop_rx) -> _ => break,
        }
    }
}

fn run_task(worker_id: usize, task: Task, shared: &PoolShared) {
    debug!(worker_id = worker_id, "Worker running task");

    if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(task)) {
        shared.counters.panicked_tasks.fetch_add(1, Ordering::Relaxed);
        error!(
            worker_id = worker_id,
            panic = panic_message(payload.as_ref()),
            "Task panicked"
        );
    }

    shared.counters.completed_tasks.fetch_add(1, Ordering::Relaxed);
    shared.in_flight.retire();
    debug!(worker_id = worker_id, "Worker completed task");
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("<non-string panic payload>")
}
