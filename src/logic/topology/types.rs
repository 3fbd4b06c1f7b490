//! Topology Types
//!
//! Episode-static scenario layout and per-step network state.

use std::collections::{BTreeMap, BTreeSet};
use std::net::IpAddr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::constants::{DECOY_PORTS, MAX_SERVER_HOSTS, MAX_USER_HOSTS, NUM_SUBNETS};
use crate::logic::error::TopologyError;

use super::lookup::{ZoneLookup, ZoneOwner};

/// `{subnet}_server_host_3`, `{subnet}_user_host_0`, `{subnet}_router`
static HOSTNAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<subnet>.+?_subnet)_(?P<role>server_host|user_host|router)(?:_(?P<index>\d+))?$")
        .expect("hostname pattern is valid")
});

// ============================================================================
// HOST NAMING
// ============================================================================

/// Subnet prefix of a scenario hostname
pub fn subnet_of_hostname(hostname: &str) -> Option<&str> {
    HOSTNAME_RE
        .captures(hostname)
        .and_then(|c| c.name("subnet"))
        .map(|m| m.as_str())
}

pub fn is_router(hostname: &str) -> bool {
    hostname.contains("router")
}

/// Fixed host slots of a subnet: servers first, then users
pub fn host_slots(subnet: &str) -> Vec<String> {
    (0..MAX_SERVER_HOSTS)
        .map(|i| format!("{}_server_host_{}", subnet, i))
        .chain((0..MAX_USER_HOSTS).map(|i| format!("{}_user_host_{}", subnet, i)))
        .collect()
}

// ============================================================================
// COMMS POLICY
// ============================================================================

/// Undirected allowed-communication graph for one mission phase
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommsPolicy {
    pub allowed: Vec<(String, String)>,
}

impl CommsPolicy {
    pub fn allows(&self, a: &str, b: &str) -> bool {
        self.allowed.iter().any(|(x, y)| {
            (x.eq_ignore_ascii_case(a) && y.eq_ignore_ascii_case(b))
                || (x.eq_ignore_ascii_case(b) && y.eq_ignore_ascii_case(a))
        })
    }

    /// Adjacency matrix row of `subnet` over `names`
    pub fn row(&self, subnet: &str, names: &[String]) -> Vec<u8> {
        names.iter().map(|n| self.allows(subnet, n) as u8).collect()
    }
}

// ============================================================================
// NETWORK STATE (per step)
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkState {
    pub mission_phase: u8,
    /// subnet -> subnets it is currently blocked from
    pub blocks: BTreeMap<String, BTreeSet<String>>,
}

impl NetworkState {
    pub fn new(mission_phase: u8) -> Self {
        Self {
            mission_phase,
            ..Default::default()
        }
    }

    pub fn block(mut self, subnet: &str, from: &str) -> Self {
        self.blocks
            .entry(subnet.to_lowercase())
            .or_default()
            .insert(from.to_lowercase());
        self
    }

    /// Which of `names` are blocked from `subnet`
    pub fn blocked_row(&self, subnet: &str, names: &[String]) -> Vec<u8> {
        let blocked = self.blocks.get(&subnet.to_lowercase());
        names
            .iter()
            .map(|n| blocked.map_or(false, |b| b.contains(&n.to_lowercase())) as u8)
            .collect()
    }
}

// ============================================================================
// TOPOLOGY (per episode)
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topology {
    /// subnet name -> CIDR
    pub subnets: BTreeMap<String, String>,
    /// hostname -> address, hosts that exist this episode
    pub hosts: BTreeMap<String, IpAddr>,
    /// zone index -> subnets it defends
    pub zone_subnets: BTreeMap<usize, Vec<String>>,
    /// hostname -> ports in use at reset
    #[serde(default)]
    pub open_ports: BTreeMap<String, Vec<u16>>,
    /// indexed by mission phase
    pub comms_policies: Vec<CommsPolicy>,
}

impl Topology {
    /// Every subnet name, lower-cased and sorted
    pub fn subnet_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.subnets.keys().map(|s| s.to_lowercase()).collect();
        names.sort();
        names
    }

    /// Subnets defended by `zone`, sorted
    pub fn subnets_for(&self, zone: usize) -> Vec<String> {
        let mut subnets: Vec<String> = self
            .zone_subnets
            .get(&zone)
            .map(|s| s.iter().map(|n| n.to_lowercase()).collect())
            .unwrap_or_default();
        subnets.sort();
        subnets
    }

    pub fn zone_of_subnet(&self, subnet: &str) -> Option<usize> {
        self.zone_subnets
            .iter()
            .find(|(_, subnets)| subnets.iter().any(|s| s.eq_ignore_ascii_case(subnet)))
            .map(|(zone, _)| *zone)
    }

    pub fn hostname_of(&self, address: &IpAddr) -> Option<&str> {
        self.hosts
            .iter()
            .find(|(_, ip)| *ip == address)
            .map(|(name, _)| name.as_str())
    }

    pub fn address_of(&self, hostname: &str) -> Option<IpAddr> {
        self.hosts.get(hostname).copied()
    }

    /// Existing, non-router hosts inside `zone`'s subnets
    pub fn owned_hosts(&self, zone: usize) -> Vec<String> {
        let subnets = self.subnets_for(zone);
        self.hosts
            .keys()
            .filter(|h| !is_router(h))
            .filter(|h| {
                subnet_of_hostname(h)
                    .map_or(false, |s| subnets.iter().any(|z| z.eq_ignore_ascii_case(s)))
            })
            .cloned()
            .collect()
    }

    /// Decoy-eligible ports already in use on `hostname`
    pub fn open_decoy_ports(&self, hostname: &str) -> u8 {
        self.open_ports
            .get(hostname)
            .map_or(0, |ports| DECOY_PORTS.iter().filter(|p| ports.contains(p)).count() as u8)
    }

    pub fn comms_policy(&self, phase: u8) -> Result<&CommsPolicy, TopologyError> {
        self.comms_policies
            .get(phase as usize)
            .ok_or(TopologyError::MissingCommsPolicy(phase))
    }

    /// Check the topology against the fixed schema dimensions
    pub fn validate(&self) -> Result<(), TopologyError> {
        if self.subnets.len() != NUM_SUBNETS {
            return Err(TopologyError::SubnetCount {
                expected: NUM_SUBNETS,
                actual: self.subnets.len(),
            });
        }

        let names = self.subnet_names();
        for subnet in self.zone_subnets.values().flatten() {
            if !names.contains(&subnet.to_lowercase()) {
                return Err(TopologyError::UnknownSubnet(subnet.clone()));
            }
        }

        Ok(())
    }
}

impl ZoneLookup for Topology {
    fn zone_of(&self, address: &IpAddr) -> ZoneOwner {
        self.hostname_of(address)
            .and_then(subnet_of_hostname)
            .and_then(|subnet| self.zone_of_subnet(subnet))
            .map_or(ZoneOwner::Outside, ZoneOwner::Zone)
    }
}
