//! Scheduler configuration structures.

use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Environment variable selecting the strategy (`fifo`).
pub const ENV_STRATEGY: &str = "SCHED_STRATEGY";
/// Environment variable for [`SchedulerConfig::capacity`].
pub const ENV_CAPACITY: &str = "SCHED_CAPACITY";
/// Environment variable for [`SchedulerConfig::concurrency`].
pub const ENV_CONCURRENCY: &str = "SCHED_CONCURRENCY";
/// Environment variable for [`SchedulerConfig::thread_name_prefix`].
pub const ENV_THREAD_NAME_PREFIX: &str = "SCHED_THREAD_NAME_PREFIX";
/// Environment variable for [`SchedulerConfig::thread_stack_size`].
pub const ENV_THREAD_STACK_SIZE: &str = "SCHED_THREAD_STACK_SIZE";

/// Default queue capacity.
pub const DEFAULT_CAPACITY: usize = 1024;
/// Default worker thread name prefix.
pub const DEFAULT_THREAD_NAME_PREFIX: &str = "sched-worker";

/// Scheduling strategy selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Bounded FIFO queue drained by a fixed worker pool.
    #[default]
    Fifo,
}

impl FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fifo" => Ok(Self::Fifo),
            other => Err(format!("unknown strategy `{other}`")),
        }
    }
}

/// Scheduler configuration.
///
/// Missing fields take the values from [`SchedulerConfig::default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Strategy to build.
    pub strategy: StrategyKind,
    /// Maximum queued, not yet running tasks. `0` makes enqueue a hand-off.
    pub capacity: usize,
    /// Number of worker threads. Must be at least 1.
    pub concurrency: usize,
    /// Worker threads are named `{prefix}-{index}`.
    pub thread_name_prefix: String,
    /// Stack size for worker threads; platform default when unset.
    pub thread_stack_size: Option<usize>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::Fifo,
            capacity: DEFAULT_CAPACITY,
            concurrency: num_cpus::get(),
            thread_name_prefix: DEFAULT_THREAD_NAME_PREFIX.into(),
            thread_stack_size: None,
        }
    }
}

impl SchedulerConfig {
    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns a message describing the first invalid field.
    pub fn validate(&self) -> Result<(), String> {
        if self.concurrency == 0 {
            return Err("concurrency must be greater than 0".into());
        }
        if self.thread_stack_size == Some(0) {
            return Err("thread_stack_size must be greater than 0".into());
        }
        if self.thread_name_prefix.contains('\0') {
            return Err("thread_name_prefix must not contain NUL bytes".into());
        }
        Ok(())
    }

    /// Parse scheduler configuration from a JSON string and validate.
    ///
    /// # Errors
    ///
    /// Returns a message on parse or validation failure.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: Self = serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load configuration from the environment, reading `.env` first if present.
    ///
    /// Unset variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns a message if a variable cannot be parsed or validation fails.
    pub fn from_env() -> Result<Self, String> {
        // A missing .env file is not an error.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup over the defaults.
    ///
    /// # Errors
    ///
    /// Returns a message if a value cannot be parsed or validation fails.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(v) = lookup(ENV_STRATEGY) {
            cfg.strategy = v.parse()?;
        }
        if let Some(v) = lookup(ENV_CAPACITY) {
            cfg.capacity = parse_var(ENV_CAPACITY, &v)?;
        }
        if let Some(v) = lookup(ENV_CONCURRENCY) {
            cfg.concurrency = parse_var(ENV_CONCURRENCY, &v)?;
        }
        if let Some(v) = lookup(ENV_THREAD_NAME_PREFIX) {
            cfg.thread_name_prefix = v;
        }
        if let Some(v) = lookup(ENV_THREAD_STACK_SIZE) {
            cfg.thread_stack_size = Some(parse_var(ENV_THREAD_STACK_SIZE, &v)?);
        }
        cfg.validate()?;
        Ok(cfg)
    }
}

fn parse_var(key: &str, value: &str) -> Result<usize, String> {
    value
        .trim()
        .parse()
        .map_err(|e| format!("{key}=`{value}` is not a valid count: {e}"))
}
