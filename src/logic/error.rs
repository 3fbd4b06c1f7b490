//! Error handling
//!
//! Only contract violations are errors here. Malformed observations and
//! unresolvable addresses degrade to "no signal" instead.

use thiserror::Error;

pub type EncodeResult<T> = Result<T, EncodeError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodeError {
    #[error("agent {agent}: vector width {actual} does not match {schema} schema width {expected}")]
    SchemaMismatch {
        agent: usize,
        schema: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("field {index} ({name}) = {value} outside cardinality {cardinality}")]
    FieldOutOfRange {
        index: usize,
        name: String,
        value: u8,
        cardinality: u8,
    },

    #[error("unknown agent index {0}")]
    UnknownAgent(usize),

    #[error("expected {expected} peer messages, got {actual}")]
    MessageCount { expected: usize, actual: usize },

    #[error(transparent)]
    Topology(#[from] TopologyError),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TopologyError {
    #[error("subnet '{0}' is not part of the topology")]
    UnknownSubnet(String),

    #[error("no comms policy for mission phase {0}")]
    MissingCommsPolicy(u8),

    #[error("topology declares {actual} subnets, schema expects {expected}")]
    SubnetCount { expected: usize, actual: usize },
}

/// Failures while replaying a recorded episode
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("episode file: {0}")]
    Io(#[from] std::io::Error),

    #[error("episode parse: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("step {step}: {source}")]
    Step {
        step: usize,
        #[source]
        source: EncodeError,
    },

    #[error(transparent)]
    Topology(#[from] TopologyError),
}
