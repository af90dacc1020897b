//! # Prometheus Task Scheduler
//!
//! A generic, thread-safe task scheduling layer with pluggable strategies.
//!
//! Every strategy implements the [`core::TaskScheduler`] contract:
//!
//! - `init` - spawn workers and start admitting work
//! - `enqueue_task` - hand over a nullary task, blocking while the queue is full
//! - `shutdown` - drain (`true`) or abort (`false`), then stop every worker
//! - `is_ready` - whether work is currently admitted
//!
//! ## FIFO Strategy
//!
//! [`core::FifoScheduler`] keeps a bounded FIFO queue drained by a fixed pool
//! of OS threads. Tasks start in enqueue order; at most `concurrency` run at
//! once; producers block once `capacity` tasks are waiting.
//!
//! ```rust
//! use prometheus_task_scheduler::core::{with_priority, FifoScheduler, Priority, TaskScheduler};
//!
//! let sched = FifoScheduler::new(10, 3)?;
//! sched.init()?;
//!
//! sched.enqueue(|| { /* do some work */ })?;
//! // Priority is accepted for forward compatibility; FIFO ignores it.
//! sched.enqueue_task(Box::new(|| {}), &[with_priority(Priority::High)])?;
//!
//! // `true` runs everything already enqueued, `false` lets running tasks
//! // finish and discards the rest.
//! sched.shutdown(true)?;
//! # Ok::<(), prometheus_task_scheduler::core::SchedulerError>(())
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use prometheus_task_scheduler::builders::build_scheduler;
//! use prometheus_task_scheduler::config::SchedulerConfig;
//!
//! let cfg = SchedulerConfig::from_json_str(r#"{ "capacity": 64, "concurrency": 4 }"#)?;
//! let sched = build_scheduler(&cfg).map_err(|e| e.to_string())?;
//! sched.init().map_err(|e| e.to_string())?;
//! sched.shutdown(true).map_err(|e| e.to_string())?;
//! # Ok::<(), String>(())
//! ```
//!
//! For complete scenarios, see `tests/fifo_scheduler_test.rs`.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Core scheduling abstractions and the FIFO strategy.
pub mod core;
/// Configuration models for schedulers.
pub mod config;
/// Builders to construct schedulers from configuration.
pub mod builders;
/// Runtime adapters (tokio) for async callers.
#[cfg(feature = "tokio-runtime")]
pub mod runtime;
/// Shared utilities.
pub mod util;
