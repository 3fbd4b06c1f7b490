//! Agent + team behaviour across steps

#[cfg(test)]
mod integration_tests {
    use std::collections::BTreeMap;

    use serde_json::json;

    use crate::logic::agent::{AgentEncoder, BlueAction, DefenderTeam};
    use crate::logic::config::EncoderConfig;
    use crate::logic::error::{EncodeError, TopologyError};
    use crate::logic::observation::{ActionStatus, StepObservation};
    use crate::logic::state::StickyChannel;
    use crate::logic::threat::CompromiseLevel;
    use crate::logic::topology::fixtures::enterprise_topology;
    use crate::logic::topology::NetworkState;

    const SERVER_0: &str = "restricted_zone_a_subnet_server_host_0";

    fn agent_zero() -> AgentEncoder {
        let mut agent = AgentEncoder::new(0, EncoderConfig::default());
        agent.reset(&enterprise_topology());
        agent
    }

    fn deploy(host: &str) -> BlueAction {
        BlueAction::DeployDecoy {
            hostname: host.to_string(),
        }
    }

    fn observe(agent: &mut AgentEncoder, observation: StepObservation) {
        agent
            .observe(&observation, &NetworkState::new(0), &enterprise_topology())
            .unwrap();
    }

    /// Exploit connection on SERVER_0, no PID
    fn exploited() -> StepObservation {
        StepObservation::from_json(json!({
            "restricted_zone_a_subnet_server_host_0": {"Processes": [{"Connections": [{
                "local_address": "10.0.0.10",
                "local_port": 22,
                "remote_address": "10.0.200.10",
                "remote_port": 4444,
            }]}]},
        }))
    }

    #[test]
    fn test_reset_seeds_owned_hosts_only() {
        let agent = agent_zero();

        assert_eq!(agent.decoys().get(SERVER_0), 2);
        assert_eq!(agent.decoys().get("restricted_zone_a_subnet_router"), 0);
        assert_eq!(agent.decoys().get("operational_zone_a_subnet_server_host_0"), 0);
        assert_eq!(agent.decoys().len(), 4);
    }

    #[test]
    fn test_waiting_skips_actions() {
        let mut agent = agent_zero();
        observe(&mut agent, StepObservation::new(ActionStatus::InProgress));
        assert!(agent.is_waiting());

        assert!(!agent.apply_action(&deploy(SERVER_0)));
        assert_eq!(agent.decoys().get(SERVER_0), 2);

        observe(&mut agent, StepObservation::new(ActionStatus::Success));
        assert!(agent.apply_action(&deploy(SERVER_0)));
        assert_eq!(agent.decoys().get(SERVER_0), 3);
    }

    #[test]
    fn test_restore_resets_decoys_and_sticky() {
        let mut agent = agent_zero();
        observe(&mut agent, exploited());
        agent.apply_action(&deploy(SERVER_0));
        assert_eq!(agent.sticky().get(SERVER_0, StickyChannel::ConnectionSeverity), 2);

        agent.apply_action(&BlueAction::Restore {
            hostname: SERVER_0.to_string(),
        });
        assert_eq!(agent.decoys().get(SERVER_0), 2);
        assert_eq!(agent.sticky().get(SERVER_0, StickyChannel::ConnectionSeverity), 0);
    }

    #[test]
    fn test_remove_keeps_decoys() {
        let mut agent = agent_zero();
        observe(&mut agent, exploited());
        agent.apply_action(&deploy(SERVER_0));

        agent.apply_action(&BlueAction::Remove {
            hostname: SERVER_0.to_string(),
        });
        assert_eq!(agent.decoys().get(SERVER_0), 3);
        assert_eq!(agent.sticky().get(SERVER_0, StickyChannel::ConnectionSeverity), 0);
    }

    #[test]
    fn test_agents_are_isolated() {
        let mut team = DefenderTeam::new(EncoderConfig::default(), enterprise_topology()).unwrap();
        let host = "operational_zone_a_subnet_server_host_0";
        let before = team.agent(1).unwrap().decoys().get(host);

        let actions = BTreeMap::from([(1, deploy(host))]);
        team.step(&actions, &BTreeMap::new(), &NetworkState::new(0)).unwrap();

        assert_eq!(team.agent(1).unwrap().decoys().get(host), before + 1);
        assert_eq!(team.agent(0).unwrap().decoys().get(host), 0);
    }

    #[test]
    fn test_messages_reach_peers_next_step() {
        let mut team = DefenderTeam::new(EncoderConfig::default(), enterprise_topology()).unwrap();

        // zone 2 sees a scan coming from zone 0
        let scan = StepObservation::from_json(json!({
            "restricted_zone_b_subnet_server_host_0": {"Processes": [
                {"Connections": [{"remote_address": "10.0.0.10", "local_port": 22}]},
                {"Connections": [{"remote_address": "10.0.0.10", "local_port": 80}]},
            ]},
        }));
        let first = team
            .step(&BTreeMap::new(), &BTreeMap::from([(2, scan)]), &NetworkState::new(0))
            .unwrap();

        let from_two = first.messages[2];
        assert!(from_two.alarm(0));
        assert_eq!(from_two.level(), CompromiseLevel::UserCompromise);
        assert!(first.messages.iter().enumerate().all(|(i, m)| i == 2 || m.as_byte() == 0));

        let second = team
            .step(&BTreeMap::new(), &BTreeMap::new(), &NetworkState::new(0))
            .unwrap();

        // zone 0 reads peers [1, 2, 3, 4]: zone 2 sits in slot 1
        let zero = second.vectors[&0].as_slice();
        assert_eq!(&zero[10..18], &from_two.to_bits());

        // zone 3 reads [0, 1, 2, 4] rotated to [2, 0, 1, 4]
        let three = second.vectors[&3].as_slice();
        assert_eq!(&three[2..10], &from_two.to_bits());

        // nothing left to report
        assert!(second.messages.iter().all(|m| m.as_byte() == 0));
    }

    #[test]
    fn test_inbox_excludes_self() {
        let team = DefenderTeam::new(EncoderConfig::default(), enterprise_topology()).unwrap();
        for agent in 0..5 {
            assert_eq!(team.inbox_for(agent).unwrap().len(), 4);
        }
        assert_eq!(team.inbox_for(5).unwrap_err(), EncodeError::UnknownAgent(5));
    }

    #[test]
    fn test_skipped_actions_reported() {
        let mut team = DefenderTeam::new(EncoderConfig::default(), enterprise_topology()).unwrap();
        let waiting = BTreeMap::from([(0, StepObservation::new(ActionStatus::InProgress))]);
        team.step(&BTreeMap::new(), &waiting, &NetworkState::new(0)).unwrap();

        let actions = BTreeMap::from([(0, deploy(SERVER_0)), (1, BlueAction::Monitor)]);
        let step = team.step(&actions, &BTreeMap::new(), &NetworkState::new(0)).unwrap();
        assert_eq!(step.skipped, vec![0]);
        assert_eq!(team.agent(0).unwrap().decoys().get(SERVER_0), 2);
    }

    #[test]
    fn test_unknown_agent_action_rejected() {
        let mut team = DefenderTeam::new(EncoderConfig::default(), enterprise_topology()).unwrap();
        let actions = BTreeMap::from([(9, BlueAction::Sleep)]);
        let err = team.step(&actions, &BTreeMap::new(), &NetworkState::new(0)).unwrap_err();
        assert_eq!(err, EncodeError::UnknownAgent(9));
    }

    #[test]
    fn test_invalid_topology_rejected() {
        let mut topology = enterprise_topology();
        topology.subnets.remove("internet_subnet");

        let err = DefenderTeam::new(EncoderConfig::default(), topology).unwrap_err();
        assert_eq!(err, TopologyError::SubnetCount { expected: 9, actual: 8 });
    }
}
