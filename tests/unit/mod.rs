//! Unit tests for individual components

mod error_test;
mod config_test;
mod task_test;
mod builders_test;
#[cfg(feature = "tokio-runtime")]
mod runtime_test;
mod util_test;
