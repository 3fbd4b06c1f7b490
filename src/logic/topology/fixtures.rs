//! Test fixtures: a small enterprise scenario with the real subnet names.

use std::collections::BTreeMap;
use std::net::IpAddr;

use super::types::{CommsPolicy, Topology};

/// (subnet, third octet, owning zone)
pub const SUBNETS: [(&str, u8, Option<usize>); 9] = [
    ("restricted_zone_a_subnet", 0, Some(0)),
    ("operational_zone_a_subnet", 16, Some(1)),
    ("restricted_zone_b_subnet", 32, Some(2)),
    ("operational_zone_b_subnet", 48, Some(3)),
    ("public_access_zone_subnet", 64, Some(4)),
    ("admin_network_subnet", 80, Some(4)),
    ("office_network_subnet", 96, Some(4)),
    ("contractor_network_subnet", 160, None),
    ("internet_subnet", 200, None),
];

pub fn ip(s: &str) -> IpAddr {
    s.parse().unwrap()
}

fn edge(a: &str, b: &str) -> (String, String) {
    (a.to_string(), b.to_string())
}

/// Two servers, two users and a router per subnet.
/// Hosts sit at .10/.11 (servers), .20/.21 (users), .1 (router).
pub fn enterprise_topology() -> Topology {
    let mut topology = Topology::default();

    for (subnet, octet, zone) in SUBNETS {
        topology
            .subnets
            .insert(subnet.to_string(), format!("10.0.{}.0/24", octet));
        if let Some(zone) = zone {
            topology
                .zone_subnets
                .entry(zone)
                .or_default()
                .push(subnet.to_string());
        }

        let hosts = [
            (format!("{}_router", subnet), 1),
            (format!("{}_server_host_0", subnet), 10),
            (format!("{}_server_host_1", subnet), 11),
            (format!("{}_user_host_0", subnet), 20),
            (format!("{}_user_host_1", subnet), 21),
        ];
        for (name, last) in hosts {
            topology.hosts.insert(name, ip(&format!("10.0.{}.{}", octet, last)));
        }
    }

    topology.open_ports = BTreeMap::from([
        ("restricted_zone_a_subnet_server_host_0".to_string(), vec![22, 80]),
        ("restricted_zone_a_subnet_server_host_1".to_string(), vec![25, 80, 443]),
        ("restricted_zone_a_subnet_user_host_0".to_string(), vec![22]),
    ]);

    let base = vec![
        edge("restricted_zone_a_subnet", "operational_zone_a_subnet"),
        edge("restricted_zone_b_subnet", "operational_zone_b_subnet"),
        edge("restricted_zone_a_subnet", "internet_subnet"),
        edge("restricted_zone_b_subnet", "internet_subnet"),
        edge("public_access_zone_subnet", "internet_subnet"),
        edge("admin_network_subnet", "office_network_subnet"),
        edge("office_network_subnet", "public_access_zone_subnet"),
    ];
    let without = |removed: usize| CommsPolicy {
        allowed: base
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != removed)
            .map(|(_, e)| e.clone())
            .collect(),
    };

    topology.comms_policies = vec![
        CommsPolicy { allowed: base.clone() },
        without(0),
        without(1),
    ];

    topology
}
