//! Agent Encoder
//!
//! Everything one defending zone owns for an episode: its trackers, its
//! waiting flag and its observation encoder. Nothing here is shared with
//! other agents.

use std::collections::BTreeSet;

use crate::logic::comms::{create_comm_message, CommMessage};
use crate::logic::config::EncoderConfig;
use crate::logic::error::EncodeResult;
use crate::logic::features::{AgentObservationVector, ObservationEncoder, ObservationSchema};
use crate::logic::observation::StepObservation;
use crate::logic::state::{DecoyStateTracker, StickyStateTracker};
use crate::logic::topology::{NetworkState, Topology, ZoneLookup};

use super::actions::BlueAction;

#[derive(Debug, Clone)]
pub struct AgentEncoder {
    encoder: ObservationEncoder,
    sticky: StickyStateTracker,
    decoys: DecoyStateTracker,
    hosts: BTreeSet<String>,
    waiting: bool,
}

impl AgentEncoder {
    pub fn new(agent: usize, config: EncoderConfig) -> Self {
        Self {
            encoder: ObservationEncoder::new(agent, config),
            sticky: StickyStateTracker::new(),
            decoys: DecoyStateTracker::new(),
            hosts: BTreeSet::new(),
            waiting: false,
        }
    }

    pub fn agent(&self) -> usize {
        self.encoder.agent
    }

    pub fn schema(&self) -> &ObservationSchema {
        &self.encoder.schema
    }

    pub fn is_waiting(&self) -> bool {
        self.waiting
    }

    pub fn sticky(&self) -> &StickyStateTracker {
        &self.sticky
    }

    pub fn decoys(&self) -> &DecoyStateTracker {
        &self.decoys
    }

    /// Drop all episode state and seed decoy counters from the new topology
    pub fn reset(&mut self, topology: &Topology) {
        self.sticky.clear();
        self.decoys.clear();
        self.waiting = false;
        self.hosts = topology.owned_hosts(self.agent()).into_iter().collect();

        if self.encoder.config.decoys {
            for host in &self.hosts {
                self.decoys.init(host, topology.open_decoy_ports(host));
            }
        }

        log::debug!(
            "Agent {} reset: {} hosts, {} schema ({} fields)",
            self.agent(),
            self.hosts.len(),
            self.encoder.schema.kind.as_str(),
            self.encoder.schema.width()
        );
    }

    /// Apply tracker side effects of an executed action.
    ///
    /// Returns false when the agent is still waiting on a multi-step action,
    /// in which case the simulator does not execute it either.
    pub fn apply_action(&mut self, action: &BlueAction) -> bool {
        if self.waiting {
            log::debug!("Agent {} waiting, {} not executed", self.agent(), action.action_type());
            return false;
        }

        if let Some(host) = action.hostname() {
            if !self.hosts.contains(host) {
                log::warn!("Agent {}: {} targets foreign host {}", self.agent(), action.action_type(), host);
            }
        }

        let config = self.encoder.config;
        match action {
            BlueAction::DeployDecoy { hostname } if config.decoys => {
                self.decoys.on_deploy(hostname);
            }
            BlueAction::Restore { hostname } => {
                if config.decoys {
                    self.decoys.on_restore(hostname);
                }
                if config.sticky {
                    self.sticky.reset(hostname);
                }
            }
            BlueAction::Remove { hostname } if config.sticky => {
                self.sticky.reset(hostname);
            }
            _ => {}
        }
        true
    }

    /// This zone's broadcast for the step
    pub fn message<L: ZoneLookup + ?Sized>(&self, observation: &StepObservation, lookup: &L) -> CommMessage {
        create_comm_message(observation, lookup)
    }

    /// Encode the step and remember whether we are now waiting
    pub fn observe(
        &mut self,
        observation: &StepObservation,
        state: &NetworkState,
        topology: &Topology,
    ) -> EncodeResult<AgentObservationVector> {
        self.waiting = observation.success.is_in_progress();
        self.encoder
            .encode(observation, state, topology, &mut self.sticky, &self.decoys)
    }
}
