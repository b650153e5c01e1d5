pub mod config;
pub mod error;
pub mod log;
pub mod queue;
pub mod ringqueue;
pub mod stats;
pub mod trace;
