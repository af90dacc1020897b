//! Tests for scheduler builders

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use prometheus_task_scheduler::builders::{build_scheduler, build_shared_scheduler};
use prometheus_task_scheduler::config::SchedulerConfig;
use prometheus_task_scheduler::core::SchedulerError;

#[test]
fn test_build_fifo_scheduler() {
    let cfg = SchedulerConfig::from_json_str(r#"{ "capacity": 4, "concurrency": 2 }"#).unwrap();
    let sched = build_scheduler(&cfg).unwrap();
    assert!(!sched.is_ready());

    sched.init().unwrap();
    assert!(sched.is_ready());

    let counter = Arc::new(AtomicUsize::new(0));
    for _ in 0..8 {
        let counter = Arc::clone(&counter);
        sched
            .enqueue_task(
                Box::new(move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                }),
                &[],
            )
            .unwrap();
    }

    sched.shutdown(true).unwrap();
    assert_eq!(counter.load(Ordering::SeqCst), 8);
}

#[test]
fn test_build_rejects_invalid_config() {
    let cfg = SchedulerConfig {
        concurrency: 0,
        ..SchedulerConfig::default()
    };
    let err = build_scheduler(&cfg).err().unwrap();
    assert!(matches!(err, SchedulerError::InvalidConfig(_)));
}

#[test]
fn test_shared_scheduler_across_threads() {
    let cfg = SchedulerConfig {
        capacity: 2,
        concurrency: 2,
        ..SchedulerConfig::default()
    };
    let sched = build_shared_scheduler(&cfg).unwrap();
    sched.init().unwrap();

    let counter = Arc::new(AtomicUsize::new(0));
    let producers: Vec<_> = (0..3)
        .map(|_| {
            let sched = Arc::clone(&sched);
            let counter = Arc::clone(&counter);
            thread::spawn(move || {
                for _ in 0..10 {
                    let counter = Arc::clone(&counter);
                    sched
                        .enqueue_task(
                            Box::new(move || {
                                counter.fetch_add(1, Ordering::SeqCst);
                            }),
                            &[],
                        )
                        .unwrap();
                }
            })
        })
        .collect();
    for producer in producers {
        producer.join().unwrap();
    }

    sched.shutdown(true).unwrap();
    assert_eq!(counter.load(Ordering::SeqCst), 30);
}
