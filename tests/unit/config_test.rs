//! Tests for configuration validation

use prometheus_task_scheduler::config::{SchedulerConfig, StrategyKind};

fn config(capacity: usize, concurrency: usize) -> SchedulerConfig {
    SchedulerConfig {
        strategy: StrategyKind::Fifo,
        capacity,
        concurrency,
        thread_name_prefix: "test".to_string(),
        thread_stack_size: None,
    }
}

#[test]
fn test_scheduler_config_validation() {
    assert!(config(10, 2).validate().is_ok());
}

#[test]
fn test_zero_capacity_is_valid() {
    assert!(config(0, 1).validate().is_ok());
}

#[test]
fn test_zero_concurrency_is_invalid() {
    let err = config(10, 0).validate().unwrap_err();
    assert!(err.contains("concurrency"));
}

#[test]
fn test_zero_stack_size_is_invalid() {
    let mut cfg = config(10, 2);
    cfg.thread_stack_size = Some(0);
    assert!(cfg.validate().is_err());
}

#[test]
fn test_scheduler_config_from_json() {
    let json = r#"{
        "strategy": "fifo",
        "capacity": 5,
        "concurrency": 1,
        "thread_name_prefix": "io",
        "thread_stack_size": 262144
    }"#;

    let cfg = SchedulerConfig::from_json_str(json).unwrap();
    assert_eq!(cfg.strategy, StrategyKind::Fifo);
    assert_eq!(cfg.capacity, 5);
    assert_eq!(cfg.concurrency, 1);
    assert_eq!(cfg.thread_name_prefix, "io");
    assert_eq!(cfg.thread_stack_size, Some(262_144));
}

#[test]
fn test_scheduler_config_json_defaults() {
    let cfg = SchedulerConfig::from_json_str(r#"{ "capacity": 3 }"#).unwrap();
    let defaults = SchedulerConfig::default();
    assert_eq!(cfg.capacity, 3);
    assert_eq!(cfg.concurrency, defaults.concurrency);
    assert_eq!(cfg.thread_name_prefix, defaults.thread_name_prefix);
}

#[test]
fn test_scheduler_config_from_json_invalid() {
    assert!(SchedulerConfig::from_json_str(r#"{ "concurrency": 0 }"#).is_err());
    assert!(SchedulerConfig::from_json_str(r#"{ "strategy": "priority" }"#).is_err());
    assert!(SchedulerConfig::from_json_str("not json").is_err());
}

#[test]
fn test_scheduler_config_roundtrip_json() {
    let cfg = config(7, 3);
    let json = serde_json::to_string(&cfg).unwrap();
    assert_eq!(SchedulerConfig::from_json_str(&json).unwrap(), cfg);
}
