//! Topology Module
//!
//! Scenario layout (subnets, hosts, ownership, comms policy) and the
//! address -> zone lookup the comm encoder blames peers with.

pub mod lookup;
pub mod types;

#[cfg(test)]
pub(crate) mod fixtures;

pub use lookup::{ZoneLookup, ZoneOwner};
pub use types::{host_slots, is_router, subnet_of_hostname, CommsPolicy, NetworkState, Topology};
