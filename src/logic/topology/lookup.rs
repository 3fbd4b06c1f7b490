//! Zone Lookup
//!
//! Maps a remote address to the zone that legitimately owns it.
//! Supplied by the simulator; anything unmapped is `Outside`.

use std::net::IpAddr;

use crate::constants::NUM_ZONES;

/// Owner of an address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZoneOwner {
    Zone(usize),
    /// Internet, contractor network or unknown
    Outside,
}

impl ZoneOwner {
    /// Zone index usable as an alarm bit, if any
    pub fn peer_index(&self) -> Option<usize> {
        match self {
            ZoneOwner::Zone(i) if *i < NUM_ZONES => Some(*i),
            _ => None,
        }
    }
}

/// Trait for address -> owning zone resolution
pub trait ZoneLookup {
    fn zone_of(&self, address: &IpAddr) -> ZoneOwner;
}

impl<F> ZoneLookup for F
where
    F: Fn(&IpAddr) -> ZoneOwner,
{
    fn zone_of(&self, address: &IpAddr) -> ZoneOwner {
        self(address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peer_index_bounds() {
        assert_eq!(ZoneOwner::Zone(0).peer_index(), Some(0));
        assert_eq!(ZoneOwner::Zone(4).peer_index(), Some(4));
        assert_eq!(ZoneOwner::Zone(5).peer_index(), None);
        assert_eq!(ZoneOwner::Outside.peer_index(), None);
    }

    #[test]
    fn test_closure_lookup() {
        let lookup = |addr: &IpAddr| {
            if addr.is_loopback() {
                ZoneOwner::Zone(1)
            } else {
                ZoneOwner::Outside
            }
        };

        assert_eq!(lookup.zone_of(&"127.0.0.1".parse().unwrap()), ZoneOwner::Zone(1));
        assert_eq!(lookup.zone_of(&"8.8.8.8".parse().unwrap()), ZoneOwner::Outside);
    }
}
