//! Defender Team
//!
//! Five isolated agent encoders plus the message exchange between them.
//! A message broadcast at step t is what peers read at step t+1.

use std::collections::BTreeMap;

use crate::constants::{NUM_MESSAGES, NUM_ZONES};
use crate::logic::comms::CommMessage;
use crate::logic::config::EncoderConfig;
use crate::logic::error::{EncodeError, EncodeResult, TopologyError};
use crate::logic::features::AgentObservationVector;
use crate::logic::observation::StepObservation;
use crate::logic::topology::{NetworkState, Topology};

use super::actions::BlueAction;
use super::wrapper::AgentEncoder;

/// Output of one team step
#[derive(Debug, Clone)]
pub struct TeamStep {
    pub vectors: BTreeMap<usize, AgentObservationVector>,
    /// Broadcast this step, delivered next step
    pub messages: [CommMessage; NUM_ZONES],
    /// Agents whose action was skipped because they were waiting
    pub skipped: Vec<usize>,
}

#[derive(Debug, Clone)]
pub struct DefenderTeam {
    config: EncoderConfig,
    topology: Topology,
    agents: Vec<AgentEncoder>,
    last_messages: [CommMessage; NUM_ZONES],
}

impl DefenderTeam {
    pub fn new(config: EncoderConfig, topology: Topology) -> Result<Self, TopologyError> {
        let mut team = Self {
            config,
            topology: Topology::default(),
            agents: (0..NUM_ZONES).map(|i| AgentEncoder::new(i, config)).collect(),
            last_messages: [CommMessage::EMPTY; NUM_ZONES],
        };
        team.reset(topology)?;
        Ok(team)
    }

    pub fn config(&self) -> EncoderConfig {
        self.config
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn agent(&self, index: usize) -> Option<&AgentEncoder> {
        self.agents.get(index)
    }

    /// New episode: validate the topology and clear every agent
    pub fn reset(&mut self, topology: Topology) -> Result<(), TopologyError> {
        topology.validate()?;
        for agent in &mut self.agents {
            agent.reset(&topology);
        }
        self.topology = topology;
        self.last_messages = [CommMessage::EMPTY; NUM_ZONES];
        log::info!("Defender team reset ({} hosts)", self.topology.hosts.len());
        Ok(())
    }

    /// Messages `agent` reads this step: every other zone, ascending
    pub fn inbox_for(&self, agent: usize) -> EncodeResult<Vec<CommMessage>> {
        if agent >= NUM_ZONES {
            return Err(EncodeError::UnknownAgent(agent));
        }
        let inbox: Vec<CommMessage> = (0..NUM_ZONES)
            .filter(|&peer| peer != agent)
            .map(|peer| self.last_messages[peer])
            .collect();
        debug_assert_eq!(inbox.len(), NUM_MESSAGES);
        Ok(inbox)
    }

    /// Apply tracker effects of the executed actions; returns the skipped agents
    pub fn apply_actions(&mut self, actions: &BTreeMap<usize, BlueAction>) -> EncodeResult<Vec<usize>> {
        let mut skipped = Vec::new();
        for (&index, action) in actions {
            let agent = self
                .agents
                .get_mut(index)
                .ok_or(EncodeError::UnknownAgent(index))?;
            if !agent.apply_action(action) {
                skipped.push(index);
            }
        }
        Ok(skipped)
    }

    /// Every zone's message for this step's observations
    pub fn broadcast(&self, observations: &BTreeMap<usize, StepObservation>) -> [CommMessage; NUM_ZONES] {
        let mut messages = [CommMessage::EMPTY; NUM_ZONES];
        for (index, agent) in self.agents.iter().enumerate() {
            if let Some(observation) = observations.get(&index) {
                messages[index] = agent.message(observation, &self.topology);
            }
        }
        messages
    }

    /// Actions first, then encode with last step's messages, then broadcast
    pub fn step(
        &mut self,
        actions: &BTreeMap<usize, BlueAction>,
        observations: &BTreeMap<usize, StepObservation>,
        state: &NetworkState,
    ) -> EncodeResult<TeamStep> {
        let skipped = self.apply_actions(actions)?;

        let mut vectors = BTreeMap::new();
        for index in 0..NUM_ZONES {
            let mut observation = observations.get(&index).cloned().unwrap_or_default();
            if observation.messages.is_none() {
                observation.messages = Some(self.inbox_for(index)?);
            }

            let agent = &mut self.agents[index];
            let vector = agent.observe(&observation, state, &self.topology)?;
            vectors.insert(index, vector);
        }

        let messages = self.broadcast(observations);
        self.last_messages = messages;

        log::debug!(
            "Team step: phase {}, messages {:?}, {} skipped",
            state.mission_phase,
            messages.iter().map(|m| m.as_byte()).collect::<Vec<_>>(),
            skipped.len()
        );

        Ok(TeamStep {
            vectors,
            messages,
            skipped,
        })
    }
}
