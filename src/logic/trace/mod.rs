//! Trace Module - Episode Trace Recording
//!
//! Records every agent's encoded observation and outgoing message per step
//! for offline policy training and debugging.
//! Stores data in JSONL format with automatic rotation.

pub mod record;
pub mod writer;

#[cfg(test)]
mod tests;

use std::path::PathBuf;

pub use record::TraceRecord;
pub use writer::{TraceStats, TraceWriter};

/// Get the base directory for trace storage
pub fn default_trace_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("blue-signal")
        .join("trace")
}
