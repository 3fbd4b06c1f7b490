use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::logic::agent::BlueAction;
use crate::logic::comms::CommMessage;
use crate::logic::features::{AgentObservationVector, SchemaKind};

/// One agent, one step
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TraceRecord {
    pub timestamp: DateTime<Utc>,
    pub episode: Uuid,
    pub step: u64,
    pub agent: usize,

    // Layout contract
    pub layout_version: u8,
    pub layout_hash: u32,
    pub schema: SchemaKind,
    pub observation: Vec<u8>,

    /// Broadcast by this agent at this step
    pub message: CommMessage,

    pub action: Option<BlueAction>,
    /// Action not executed because the agent was waiting
    #[serde(default)]
    pub skipped: bool,
}

impl TraceRecord {
    pub fn new(episode: Uuid, step: u64, vector: &AgentObservationVector, message: CommMessage) -> Self {
        Self {
            timestamp: Utc::now(),
            episode,
            step,
            agent: vector.agent,
            layout_version: vector.version,
            layout_hash: vector.layout_hash,
            schema: vector.schema.kind,
            observation: vector.as_slice().to_vec(),
            message,
            action: None,
            skipped: false,
        }
    }

    pub fn with_action(mut self, action: Option<BlueAction>, skipped: bool) -> Self {
        self.action = action;
        self.skipped = skipped;
        self
    }
}
