//! State Module - per-episode trackers owned by one agent
//!
//! - `sticky`: monotonic-max threat memory, cleared by Restore / Remove
//! - `decoy`: decoy listener counters, bumped by DeployDecoy, reset by Restore

pub mod sticky;
pub mod decoy;

pub use sticky::{StickyChannel, StickyEntry, StickyStateTracker};
pub use decoy::{DecoyStateTracker, MAX_DECOY_STATE};
