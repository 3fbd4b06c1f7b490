//! Observation Encoder
//!
//! Assembles one agent's fixed-width vector from the raw step observation,
//! the scenario topology, the per-step network state and the agent's
//! trackers. Sticky channels are folded in as a side effect.

use std::collections::{BTreeMap, BTreeSet};
use std::net::IpAddr;

use crate::constants::{MIRRORED_ZONES, NUM_MESSAGES, NUM_SUBNETS};
use crate::logic::comms::CommMessage;
use crate::logic::config::EncoderConfig;
use crate::logic::error::{EncodeError, EncodeResult, TopologyError};
use crate::logic::observation::StepObservation;
use crate::logic::state::{DecoyStateTracker, StickyChannel, StickyStateTracker};
use crate::logic::threat::{classify_host, host_evidence, HostEvidence};
use crate::logic::topology::{host_slots, NetworkState, Topology};

use super::layout::{ObservationSchema, SchemaKind};
use super::vector::AgentObservationVector;

/// Connection value when no malformed connection was seen
const NO_EXPLOIT: u8 = 3;

pub fn is_mirrored(agent: usize) -> bool {
    MIRRORED_ZONES.contains(&agent)
}

/// Phase as the agent's policy sees it; mirrored zones use opposite numbering
pub fn embedded_phase(agent: usize, mission_phase: u8) -> u8 {
    if mission_phase > 0 && is_mirrored(agent) {
        mission_phase ^ 0b11
    } else {
        mission_phase
    }
}

/// Order the 4 peer messages as: same-side neighbour, other-side restricted,
/// other-side operational, headquarters. Mirrored zones receive the first
/// three rotated, so rotate them right by one.
pub fn order_messages(agent: usize, messages: &[CommMessage]) -> EncodeResult<[CommMessage; NUM_MESSAGES]> {
    let mut ordered: [CommMessage; NUM_MESSAGES] =
        messages.try_into().map_err(|_| EncodeError::MessageCount {
            expected: NUM_MESSAGES,
            actual: messages.len(),
        })?;

    if is_mirrored(agent) {
        ordered[..3].rotate_right(1);
    }
    Ok(ordered)
}

// ============================================================================
// ENCODER
// ============================================================================

/// Per-agent encoder; stateless apart from its declared schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObservationEncoder {
    pub agent: usize,
    pub config: EncoderConfig,
    pub schema: ObservationSchema,
}

/// Per-host inputs gathered once per observation
#[derive(Default)]
struct HostSignals {
    evidence: HostEvidence,
    anomalous_process: bool,
}

impl ObservationEncoder {
    pub fn new(agent: usize, config: EncoderConfig) -> Self {
        Self {
            agent,
            config,
            schema: ObservationSchema::for_agent(agent, &config),
        }
    }

    /// Encode one step. Sticky channels are updated in `sticky`.
    pub fn encode(
        &self,
        observation: &StepObservation,
        state: &NetworkState,
        topology: &Topology,
        sticky: &mut StickyStateTracker,
        decoys: &DecoyStateTracker,
    ) -> EncodeResult<AgentObservationVector> {
        let subnet_names = topology.subnet_names();
        if subnet_names.len() != NUM_SUBNETS {
            return Err(TopologyError::SubnetCount {
                expected: NUM_SUBNETS,
                actual: subnet_names.len(),
            }
            .into());
        }

        let subnets = topology.subnets_for(self.agent);
        if subnets.is_empty() {
            return Err(EncodeError::UnknownAgent(self.agent));
        }

        let comms_policy = topology.comms_policy(state.mission_phase)?;

        // Prefix: phase, waiting, peer messages
        let mut values: Vec<u8> = Vec::with_capacity(self.schema.width());
        values.push(embedded_phase(self.agent, state.mission_phase));
        values.push(observation.success.is_in_progress() as u8);

        let messages = observation
            .messages
            .clone()
            .unwrap_or_else(|| vec![CommMessage::EMPTY; NUM_MESSAGES]);
        for message in order_messages(self.agent, &messages)? {
            values.extend(message.to_bits());
        }

        let signals = self.collect_signals(observation);
        let attackers: BTreeSet<IpAddr> = signals
            .values()
            .flat_map(|s| s.evidence.attacker_addresses.iter().copied())
            .collect();
        let none = HostSignals::default();

        for subnet in &subnets {
            if !subnet_names.contains(subnet) {
                return Err(TopologyError::UnknownSubnet(subnet.clone()).into());
            }

            values.extend(subnet_names.iter().map(|n| (n == subnet) as u8));
            values.extend(state.blocked_row(subnet, &subnet_names));
            values.extend(comms_policy.row(subnet, &subnet_names));

            let slots = host_slots(subnet);
            let host_signals: Vec<&HostSignals> =
                slots.iter().map(|h| signals.get(h).unwrap_or(&none)).collect();

            // XOR with 3 so the value grows with attack likelihood:
            // none=0, multi-port scan=1, single-port exploit=2
            let connection: Vec<u8> = host_signals
                .iter()
                .map(|s| s.evidence.exploit_ports.unwrap_or(NO_EXPLOIT) ^ 0b11)
                .collect();
            let process: Vec<u8> = host_signals
                .iter()
                .map(|s| (s.anomalous_process || s.evidence.unowned_process) as u8)
                .collect();
            let attacker: Vec<u8> = slots
                .iter()
                .map(|h| topology.address_of(h).map_or(false, |ip| attackers.contains(&ip)) as u8)
                .collect();

            values.extend(self.fold_sticky(sticky, &slots, StickyChannel::ConnectionSeverity, connection));
            values.extend(self.fold_sticky(sticky, &slots, StickyChannel::ProcessAnomaly, process));
            values.extend(self.fold_sticky(sticky, &slots, StickyChannel::Attacker, attacker));

            if self.config.analyze {
                let analyze: Vec<u8> = host_signals.iter().map(|s| s.evidence.analyze_score).collect();
                values.extend(self.fold_sticky(sticky, &slots, StickyChannel::Analyze, analyze));
            }
            if self.config.decoys {
                values.extend(slots.iter().map(|h| decoys.get(h)));
            }
        }

        self.fit_to_schema(values)
    }

    /// Right-pad long schemas; any other width difference is a contract violation
    fn fit_to_schema(&self, mut values: Vec<u8>) -> EncodeResult<AgentObservationVector> {
        let width = self.schema.width();
        let fits = match self.schema.kind {
            SchemaKind::Short => values.len() == width,
            SchemaKind::Long => values.len() <= width,
        };
        if !fits {
            return Err(EncodeError::SchemaMismatch {
                agent: self.agent,
                schema: self.schema.kind.as_str(),
                expected: width,
                actual: values.len(),
            });
        }

        values.resize(width, 0);
        AgentObservationVector::from_values(self.agent, self.schema, values)
    }

    fn collect_signals(&self, observation: &StepObservation) -> BTreeMap<String, HostSignals> {
        observation
            .hosts
            .iter()
            .map(|(hostname, record)| {
                let signals = HostSignals {
                    evidence: host_evidence(record),
                    anomalous_process: classify_host(record).has_anomalous_process,
                };
                (hostname.clone(), signals)
            })
            .collect()
    }

    fn fold_sticky(
        &self,
        tracker: &mut StickyStateTracker,
        slots: &[String],
        channel: StickyChannel,
        raw: Vec<u8>,
    ) -> Vec<u8> {
        if !self.config.sticky {
            return raw;
        }
        slots
            .iter()
            .zip(raw)
            .map(|(host, value)| tracker.update(host, channel, value))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(byte: u8) -> CommMessage {
        CommMessage::from_byte(byte)
    }

    #[test]
    fn test_phase_mirroring() {
        assert_eq!(embedded_phase(2, 2), 1);
        assert_eq!(embedded_phase(3, 1), 2);
        assert_eq!(embedded_phase(2, 0), 0);
        assert_eq!(embedded_phase(0, 2), 2);
        assert_eq!(embedded_phase(4, 1), 1);
    }

    #[test]
    fn test_message_rotation_for_mirrored() {
        let inbox = [message(1), message(2), message(3), message(4)];

        let plain = order_messages(0, &inbox).unwrap();
        assert_eq!(plain, inbox);

        let rotated = order_messages(3, &inbox).unwrap();
        assert_eq!(rotated, [message(3), message(1), message(2), message(4)]);
    }

    #[test]
    fn test_message_count_enforced() {
        let err = order_messages(0, &[CommMessage::EMPTY; 3]).unwrap_err();
        assert_eq!(err, EncodeError::MessageCount { expected: 4, actual: 3 });
    }
}
