//! Tests for error types

use prometheus_task_scheduler::core::SchedulerError;

#[test]
fn test_already_initialized_error() {
    let err = SchedulerError::AlreadyInitialized;
    assert_eq!(format!("{}", err), "scheduler already initialized");
}

#[test]
fn test_not_ready_error() {
    let err = SchedulerError::NotReady;
    assert_eq!(
        format!("{}", err),
        "scheduler not ready, call init() before enqueueing"
    );
}

#[test]
fn test_terminated_error() {
    let err = SchedulerError::Terminated;
    assert_eq!(format!("{}", err), "scheduler has been shut down");
}

#[test]
fn test_shutdown_signal_error() {
    let err = SchedulerError::ShutdownSignal("1 of 4 workers did not stop cleanly".to_string());
    assert_eq!(
        format!("{}", err),
        "shutdown signal failed: 1 of 4 workers did not stop cleanly"
    );
}

#[test]
fn test_invalid_config_error() {
    let err = SchedulerError::InvalidConfig("concurrency must be greater than 0".to_string());
    assert_eq!(
        format!("{}", err),
        "invalid configuration: concurrency must be greater than 0"
    );
}

#[test]
fn test_app_result_keeps_scheduler_error() {
    use anyhow::Context;
    use prometheus_task_scheduler::core::{AppResult, FifoScheduler, TaskScheduler};

    fn start_twice() -> AppResult<()> {
        let sched = FifoScheduler::new(1, 1)?;
        sched.init()?;
        sched.init().context("second init")?;
        Ok(())
    }

    let err = start_twice().unwrap_err();
    assert_eq!(err.to_string(), "second init");
    assert_eq!(
        err.downcast_ref::<SchedulerError>(),
        Some(&SchedulerError::AlreadyInitialized)
    );
}
