//! Task model and per-enqueue options.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A nullary unit of work handed to a scheduler.
///
/// Ownership moves to the scheduler on enqueue; the task is run at most once,
/// by exactly one worker. Task bodies must not assume any particular worker
/// thread and must be safe to run alongside other tasks.
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Scheduling priority carried in [`TaskConfig`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Background work.
    Low,
    /// Default priority.
    #[default]
    Normal,
    /// Latency-sensitive work.
    High,
}

/// Per-enqueue configuration, folded from zero or more [`TaskOption`]s.
///
/// Recognized options:
///
/// | option     | constructor                      | FIFO strategy       |
/// |------------|----------------------------------|---------------------|
/// | `priority` | [`with_priority`]                | stored, not read    |
///
/// The record is built fresh for every `enqueue_task` call and dropped once
/// the call returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskConfig {
    /// Requested priority. Strategies that do not order by priority ignore it.
    pub priority: Priority,
}

impl TaskConfig {
    /// Fold `options` over the default configuration, later options winning.
    #[must_use]
    pub fn from_options(options: &[TaskOption]) -> Self {
        options.iter().fold(Self::default(), |mut cfg, opt| {
            opt.apply(&mut cfg);
            cfg
        })
    }
}

/// A single option applied to a [`TaskConfig`].
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum TaskOption {
    /// Set [`TaskConfig::priority`].
    Priority(Priority),
}

impl TaskOption {
    /// Apply this option to `cfg`.
    pub fn apply(&self, cfg: &mut TaskConfig) {
        match *self {
            Self::Priority(p) => cfg.priority = p,
        }
    }
}

impl fmt::Debug for TaskOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Priority(p) => write!(f, "with_priority({p:?})"),
        }
    }
}

/// Option setting the task priority.
#[must_use]
pub const fn with_priority(priority: Priority) -> TaskOption {
    TaskOption::Priority(priority)
}
