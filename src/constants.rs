//! Central Configuration Constants
//!
//! Single source of truth for scenario dimensions and configuration defaults.
//! To change a default encoder flag, only edit this file.

// ============================================================================
// SCENARIO DIMENSIONS
// ============================================================================

/// Number of defending zones (one agent each)
pub const NUM_ZONES: usize = 5;

/// Number of subnets in the enterprise scenario
pub const NUM_SUBNETS: usize = 9;

/// Number of subnets managed by the headquarters zone
pub const NUM_HQ_SUBNETS: usize = 3;

/// Server host slots per subnet
pub const MAX_SERVER_HOSTS: usize = 6;

/// User host slots per subnet
pub const MAX_USER_HOSTS: usize = 10;

/// Host slots per subnet (servers first, then users)
pub const MAX_HOSTS: usize = MAX_SERVER_HOSTS + MAX_USER_HOSTS;

/// Bits per inter-agent message
pub const MESSAGE_LENGTH: usize = 8;

/// Peer messages embedded in each observation
pub const NUM_MESSAGES: usize = 4;

/// Ports a decoy listener can occupy
pub const DECOY_PORTS: [u16; 3] = [80, 443, 25];

/// Zones with symmetric topology that share one policy schema
pub const MIRRORED_ZONES: [usize; 2] = [2, 3];

/// Headquarters zone, always encoded with the long schema
pub const HQ_ZONE: usize = 4;

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "Blue-Signal";

// ============================================================================
// CONFIGURATION DEFAULTS
// ============================================================================

/// Analyze score columns are off by default
pub const DEFAULT_ANALYZE: bool = false;

/// Sticky threat memory is on by default
pub const DEFAULT_STICKY: bool = true;

/// Decoy counter columns are on by default
pub const DEFAULT_DECOYS: bool = true;

/// Short agents are not padded to the long width by default
pub const DEFAULT_PADDED: bool = false;

/// Default episode file for the replay binary
pub const DEFAULT_EPISODE_PATH: &str = "episode.json";

// ============================================================================
// Helper functions to read from env with fallback
// ============================================================================

/// Read a boolean flag from the environment ("false"/"0" disable, anything else enables)
pub fn env_flag(key: &str, default: bool) -> bool {
    std::env::var(key)
        .map(|s| s.to_lowercase() != "false" && s != "0")
        .unwrap_or(default)
}

/// Get episode path from environment or use default
pub fn get_episode_path() -> String {
    std::env::var("BLUE_SIGNAL_EPISODE")
        .unwrap_or_else(|_| DEFAULT_EPISODE_PATH.to_string())
}

/// Get trace directory override from environment
pub fn get_trace_dir() -> Option<String> {
    std::env::var("BLUE_SIGNAL_TRACE_DIR").ok()
}

/// Check if episode tracing is enabled
pub fn is_trace_enabled() -> bool {
    env_flag("BLUE_SIGNAL_TRACE", true)
}
