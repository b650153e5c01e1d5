//! Queue configuration.
//!
//! Loaded from JSON or from `RING_QUEUE_*` environment variables; anything
//! left unspecified falls back to [`QueueConfig::default`].

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::error::QueueError;

const DEFAULT_CAPACITY: usize = 64;
const DEFAULT_REMOVE_TIMEOUT_MS: u64 = 1000;

pub const CAPACITY_ENV: &str = "RING_QUEUE_CAPACITY";
pub const REMOVE_TIMEOUT_ENV: &str = "RING_QUEUE_REMOVE_TIMEOUT_MS";

/// Settings for building a [`RingQueue`](crate::RingQueue).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueueConfig {
    /// Number of slots; must be non-zero
    pub capacity: usize,
    /// Wait bound used by consumers calling `remove_timeout`
    pub remove_timeout_ms: u64,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            remove_timeout_ms: DEFAULT_REMOVE_TIMEOUT_MS,
        }
    }
}

impl QueueConfig {
    /// Parse a JSON document such as `{"capacity": 8}`.
    pub fn from_json_str(json: &str) -> Result<Self, QueueError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, QueueError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Build config from the environment, keeping defaults for unset variables.
    pub fn from_env() -> Result<Self, QueueError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, QueueError> {
        let mut config = Self::default();
        if let Some(value) = lookup(CAPACITY_ENV) {
            config.capacity = parse_env(CAPACITY_ENV, value)?;
        }
        if let Some(value) = lookup(REMOVE_TIMEOUT_ENV) {
            config.remove_timeout_ms = parse_env(REMOVE_TIMEOUT_ENV, value)?;
        }
        Ok(config)
    }

    /// Set the capacity.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Set the removal timeout.
    pub fn with_remove_timeout(mut self, timeout: Duration) -> Self {
        self.remove_timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn remove_timeout(&self) -> Duration {
        Duration::from_millis(self.remove_timeout_ms)
    }
}

fn parse_env<V: std::str::FromStr>(name: &'static str, value: String) -> Result<V, QueueError> {
    value
        .trim()
        .parse()
        .map_err(|_| QueueError::InvalidEnv { name, value })
}
