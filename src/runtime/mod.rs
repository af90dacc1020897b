//! Runtime adapters for driving schedulers from async code.

pub mod tokio_adapter;

pub use tokio_adapter::AsyncTaskScheduler;
