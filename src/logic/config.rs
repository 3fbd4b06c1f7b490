//! Encoder & Replay Configuration
//!
//! Feature switches for the observation encoder plus replay settings.
//! Loaded from environment variables with defaults from `constants.rs`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::{
    env_flag, get_episode_path, get_trace_dir, is_trace_enabled,
    DEFAULT_ANALYZE, DEFAULT_DECOYS, DEFAULT_PADDED, DEFAULT_STICKY,
};

// ============================================================================
// ENCODER CONFIG
// ============================================================================

/// Switches that shape the observation schema and tracker behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    /// Emit the per-host analyze score columns
    pub analyze: bool,
    /// Keep monotonic per-host threat memory between steps
    pub sticky: bool,
    /// Emit the per-host decoy counter columns
    pub decoys: bool,
    /// Pad every agent to the long schema width
    pub padded: bool,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            analyze: DEFAULT_ANALYZE,
            sticky: DEFAULT_STICKY,
            decoys: DEFAULT_DECOYS,
            padded: DEFAULT_PADDED,
        }
    }
}

impl EncoderConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        Self {
            analyze: env_flag("BLUE_SIGNAL_ANALYZE", DEFAULT_ANALYZE),
            sticky: env_flag("BLUE_SIGNAL_STICKY", DEFAULT_STICKY),
            decoys: env_flag("BLUE_SIGNAL_DECOYS", DEFAULT_DECOYS),
            padded: env_flag("BLUE_SIGNAL_PADDED", DEFAULT_PADDED),
        }
    }
}

// ============================================================================
// REPLAY CONFIG
// ============================================================================

/// Settings for the episode replay binary
#[derive(Debug, Clone)]
pub struct ReplayConfig {
    /// Episode JSON to replay
    pub episode_path: PathBuf,
    /// Where trace files go (None = platform data dir)
    pub trace_dir: Option<PathBuf>,
    /// Write the JSONL trace at all
    pub trace_enabled: bool,
}

impl ReplayConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            episode_path: PathBuf::from(get_episode_path()),
            trace_dir: get_trace_dir().map(PathBuf::from),
            trace_enabled: is_trace_enabled(),
        }
    }
}
