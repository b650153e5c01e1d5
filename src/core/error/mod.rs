use std::time::Duration;

use thiserror::Error;

/// Returned when a queue is built with room for nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("queue capacity must be greater than zero")]
pub struct CapacityError;

/// Returned by [`RingQueue::remove_timeout`](crate::RingQueue::remove_timeout)
/// when no element arrived within the allowed window.
///
/// The queue is left untouched, so the caller may simply retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("timed out after {waited:?} waiting to remove an element")]
pub struct TimeoutError {
    pub waited: Duration,
}

/// Crate-level error for callers that mix construction, removal and
/// configuration loading behind a single `?`.
#[derive(Debug, Error)]
pub enum QueueError {
    #[error(transparent)]
    Capacity(#[from] CapacityError),

    #[error(transparent)]
    Timeout(#[from] TimeoutError),

    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("environment variable {name} has invalid value {value:?}")]
    InvalidEnv { name: &'static str, value: String },
}
