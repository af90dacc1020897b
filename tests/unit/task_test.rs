//! Tests for task options

use prometheus_task_scheduler::core::{with_priority, Priority, TaskConfig, TaskOption};

#[test]
fn test_with_priority_builds_option() {
    assert_eq!(with_priority(Priority::High), TaskOption::Priority(Priority::High));
}

#[test]
fn test_options_fold_over_default() {
    let cfg = TaskConfig::from_options(&[with_priority(Priority::Low)]);
    assert_eq!(cfg, TaskConfig { priority: Priority::Low });
    assert_eq!(TaskConfig::from_options(&[]), TaskConfig::default());
}

#[test]
fn test_priority_serde() {
    assert_eq!(serde_json::to_string(&Priority::High).unwrap(), "\"high\"");
    let p: Priority = serde_json::from_str("\"low\"").unwrap();
    assert_eq!(p, Priority::Low);
}

#[test]
fn test_option_debug() {
    assert_eq!(format!("{:?}", with_priority(Priority::Normal)), "with_priority(Normal)");
}
