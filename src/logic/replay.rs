//! Episode Replay
//!
//! Drives a `DefenderTeam` through a recorded episode file and optionally
//! traces every agent's vector and message.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use uuid::Uuid;

use crate::constants::NUM_ZONES;
use crate::logic::agent::{BlueAction, DefenderTeam};
use crate::logic::config::EncoderConfig;
use crate::logic::error::ReplayError;
use crate::logic::observation::StepObservation;
use crate::logic::threat::CompromiseLevel;
use crate::logic::topology::{NetworkState, Topology};
use crate::logic::trace::{TraceRecord, TraceWriter};

#[derive(Debug, Clone, Deserialize)]
pub struct Episode {
    pub topology: Topology,
    /// Overrides the environment config when present
    #[serde(default)]
    pub config: Option<EncoderConfig>,
    #[serde(default)]
    pub steps: Vec<EpisodeStep>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EpisodeStep {
    pub state: NetworkState,
    /// keyed by agent index
    pub observations: BTreeMap<usize, StepObservation>,
    /// keyed by agent index
    pub actions: BTreeMap<usize, BlueAction>,
}

impl Episode {
    pub fn load(path: &Path) -> Result<Self, ReplayError> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReplaySummary {
    pub episode: Uuid,
    pub steps: usize,
    pub records: u64,
    /// Highest level any zone broadcast
    pub max_level: CompromiseLevel,
    /// How often each zone was blamed by a peer
    pub alarms: [u32; NUM_ZONES],
    pub skipped_actions: usize,
}

pub fn replay(
    episode: &Episode,
    config: EncoderConfig,
    mut trace: Option<&mut TraceWriter>,
) -> Result<ReplaySummary, ReplayError> {
    let mut team = DefenderTeam::new(config, episode.topology.clone())?;

    let mut summary = ReplaySummary {
        episode: Uuid::new_v4(),
        steps: 0,
        records: 0,
        max_level: CompromiseLevel::Clean,
        alarms: [0; NUM_ZONES],
        skipped_actions: 0,
    };
    log::info!("Replaying episode {} ({} steps)", summary.episode, episode.steps.len());

    for (index, step) in episode.steps.iter().enumerate() {
        let result = team
            .step(&step.actions, &step.observations, &step.state)
            .map_err(|source| ReplayError::Step { step: index, source })?;

        for message in &result.messages {
            summary.max_level = summary.max_level.max(message.level());
            for (zone, count) in summary.alarms.iter_mut().enumerate() {
                if message.alarm(zone) {
                    *count += 1;
                }
            }
        }
        summary.skipped_actions += result.skipped.len();

        if let Some(writer) = trace.as_deref_mut() {
            for (agent, vector) in &result.vectors {
                let record = TraceRecord::new(summary.episode, index as u64, vector, result.messages[*agent])
                    .with_action(step.actions.get(agent).cloned(), result.skipped.contains(agent));
                writer.append(&record)?;
                summary.records += 1;
            }
        }
        summary.steps += 1;
    }

    if let Some(writer) = trace {
        writer.flush()?;
    }

    Ok(summary)
}
