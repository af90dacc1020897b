//! Tests for the tokio adapter

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use prometheus_task_scheduler::core::{with_priority, FifoScheduler, Priority, SchedulerError};
use prometheus_task_scheduler::runtime::AsyncTaskScheduler;

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_async_backpressure_does_not_block_runtime() {
    let sched = AsyncTaskScheduler::new(Arc::new(FifoScheduler::new(1, 1).unwrap()));
    sched.init().unwrap();

    let counter = Arc::new(AtomicUsize::new(0));
    for _ in 0..5 {
        let counter = Arc::clone(&counter);
        sched
            .enqueue_task(
                Box::new(move || {
                    std::thread::sleep(Duration::from_millis(10));
                    counter.fetch_add(1, Ordering::SeqCst);
                }),
                &[with_priority(Priority::Low)],
            )
            .await
            .unwrap();
    }

    // The runtime keeps serving other futures while the queue drains.
    let ticker = tokio::spawn(async { tokio::time::sleep(Duration::from_millis(1)).await });
    ticker.await.unwrap();

    sched.shutdown(true).await.unwrap();
    assert_eq!(counter.load(Ordering::SeqCst), 5);
}

#[tokio::test]
async fn test_async_shutdown_twice() {
    let sched = AsyncTaskScheduler::new(Arc::new(FifoScheduler::new(1, 1).unwrap()));
    sched.init().unwrap();
    sched.shutdown(false).await.unwrap();
    assert_eq!(sched.shutdown(false).await, Err(SchedulerError::Terminated));
}
