//! Build a scheduler from configuration, selecting the strategy by kind.

use std::sync::Arc;

use tracing::debug;

use crate::config::{SchedulerConfig, StrategyKind};
use crate::core::{FifoScheduler, SchedulerError, TaskScheduler};

/// Build the scheduler selected by `cfg.strategy`.
///
/// The returned scheduler is not yet initialized.
///
/// # Errors
///
/// [`SchedulerError::InvalidConfig`] if the configuration fails validation.
pub fn build_scheduler(cfg: &SchedulerConfig) -> Result<Box<dyn TaskScheduler>, SchedulerError> {
    cfg.validate()
        .map_err(|e| SchedulerError::InvalidConfig(format!("config invalid: {e}")))?;

    debug!(strategy = ?cfg.strategy, "Building scheduler");
    match cfg.strategy {
        StrategyKind::Fifo => Ok(Box::new(FifoScheduler::with_config(cfg)?)),
    }
}

/// Same as [`build_scheduler`], returning a handle that can be cloned across threads.
///
/// # Errors
///
/// [`SchedulerError::InvalidConfig`] if the configuration fails validation.
pub fn build_shared_scheduler(cfg: &SchedulerConfig) -> Result<Arc<dyn TaskScheduler>, SchedulerError> {
    build_scheduler(cfg).map(Arc::from)
}
