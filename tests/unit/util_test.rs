//! Tests for utilities

use prometheus_task_scheduler::core::{FifoScheduler, TaskScheduler};
use prometheus_task_scheduler::util::init_tracing;

#[test]
fn test_tracing_with_scheduler() {
    init_tracing();
    let sched = FifoScheduler::new(2, 1).unwrap();
    sched.init().unwrap();
    sched.enqueue(|| tracing::info!("task running under tracing")).unwrap();
    sched.shutdown(true).unwrap();
}
