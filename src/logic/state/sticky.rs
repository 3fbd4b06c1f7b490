//! Sticky State Tracker
//!
//! Monotonic-max memory of per-host threat evidence. The simulator does not
//! re-report evidence every step, so the policy sees the worst value seen
//! until a remediation action clears the host.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Indicator channels tracked per host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StickyChannel {
    ConnectionSeverity,
    ProcessAnomaly,
    /// Analyze score: file compromise level maxed with file density, 0..=4
    Analyze,
    Attacker,
}

impl StickyChannel {
    pub const ALL: [StickyChannel; 4] = [
        StickyChannel::ConnectionSeverity,
        StickyChannel::ProcessAnomaly,
        StickyChannel::Analyze,
        StickyChannel::Attacker,
    ];
}

/// Four counters for one host
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StickyEntry {
    pub connection_severity: u8,
    pub process_anomaly: u8,
    pub analyze: u8,
    pub attacker: u8,
}

impl StickyEntry {
    fn slot(&mut self, channel: StickyChannel) -> &mut u8 {
        match channel {
            StickyChannel::ConnectionSeverity => &mut self.connection_severity,
            StickyChannel::ProcessAnomaly => &mut self.process_anomaly,
            StickyChannel::Analyze => &mut self.analyze,
            StickyChannel::Attacker => &mut self.attacker,
        }
    }

    pub fn get(&self, channel: StickyChannel) -> u8 {
        match channel {
            StickyChannel::ConnectionSeverity => self.connection_severity,
            StickyChannel::ProcessAnomaly => self.process_anomaly,
            StickyChannel::Analyze => self.analyze,
            StickyChannel::Attacker => self.attacker,
        }
    }
}

/// Per-episode sticky memory, owned by one agent
#[derive(Debug, Clone, Default)]
pub struct StickyStateTracker {
    entries: HashMap<String, StickyEntry>,
}

impl StickyStateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `max(stored, value)` and return it
    pub fn update(&mut self, host: &str, channel: StickyChannel, value: u8) -> u8 {
        let entry = self.entries.entry(host.to_string()).or_default();
        let slot = entry.slot(channel);
        *slot = (*slot).max(value);
        *slot
    }

    /// Boolean channels are stored as 0/1
    pub fn update_flag(&mut self, host: &str, channel: StickyChannel, value: bool) -> bool {
        self.update(host, channel, value as u8) != 0
    }

    /// Unseen hosts read as zero
    pub fn get(&self, host: &str, channel: StickyChannel) -> u8 {
        self.entries.get(host).map_or(0, |e| e.get(channel))
    }

    pub fn entry(&self, host: &str) -> StickyEntry {
        self.entries.get(host).copied().unwrap_or_default()
    }

    /// Zero every channel of `host` (Restore / Remove)
    pub fn reset(&mut self, host: &str) {
        if self.entries.remove(host).is_some() {
            log::debug!("Sticky state cleared for {}", host);
        }
    }

    /// Forget everything (episode reset)
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
