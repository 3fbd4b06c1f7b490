//! Decoy State Tracker
//!
//! Per-host decoy counter in 0..=4:
//! - 0: host not valid this episode
//! - 1..=4: host valid, (value - 1) decoy ports occupied
//!
//! Seeded from the ports already open at reset, bumped by DeployDecoy,
//! returned to its seed by Restore.

use std::collections::HashMap;

/// Highest counter value (3 decoy ports + baseline)
pub const MAX_DECOY_STATE: u8 = 4;

#[derive(Debug, Clone, Default)]
pub struct DecoyStateTracker {
    baseline: HashMap<String, u8>,
    current: HashMap<String, u8>,
}

impl DecoyStateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed `host` with `open_ports + 1`
    pub fn init(&mut self, host: &str, baseline_open_ports: u8) {
        let value = baseline_open_ports.saturating_add(1).min(MAX_DECOY_STATE);
        self.baseline.insert(host.to_string(), value);
        self.current.insert(host.to_string(), value);
    }

    /// Count one more decoy; no-op at the cap or for unknown hosts
    pub fn on_deploy(&mut self, host: &str) -> u8 {
        match self.current.get_mut(host) {
            Some(value) if *value > 0 && *value < MAX_DECOY_STATE => {
                *value += 1;
                log::debug!("Decoy deployed on {} ({})", host, value);
                *value
            }
            Some(value) => *value,
            None => 0,
        }
    }

    /// Back to the seed value
    pub fn on_restore(&mut self, host: &str) -> u8 {
        let baseline = self.baseline(host);
        if let Some(value) = self.current.get_mut(host) {
            *value = baseline;
        }
        baseline
    }

    pub fn get(&self, host: &str) -> u8 {
        self.current.get(host).copied().unwrap_or(0)
    }

    pub fn baseline(&self, host: &str) -> u8 {
        self.baseline.get(host).copied().unwrap_or(0)
    }

    /// Forget everything (episode reset)
    pub fn clear(&mut self) {
        self.baseline.clear();
        self.current.clear();
    }

    pub fn len(&self) -> usize {
        self.current.len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }
}
