//! Core scheduling abstractions: the task model, the scheduler contract and
//! the FIFO worker-pool strategy.

pub mod error;
pub mod fifo;
pub mod scheduler;
pub mod task;
pub mod worker_pool;

pub use error::{AppResult, SchedulerError};
pub use fifo::FifoScheduler;
pub use scheduler::{SchedulerState, TaskScheduler};
pub use task::{with_priority, Priority, Task, TaskConfig, TaskOption};
pub use worker_pool::SchedulerStats;
