//! Blue Signal Core
//!
//! Zone threat messages and fixed-width observation encoding for a team of
//! cooperative network defenders.

pub mod constants;
pub mod logic;

pub use logic::agent::{AgentEncoder, BlueAction, DefenderTeam, TeamStep};
pub use logic::comms::{create_comm_message, CommMessage};
pub use logic::config::{EncoderConfig, ReplayConfig};
pub use logic::error::{EncodeError, EncodeResult, ReplayError, TopologyError};
pub use logic::features::{AgentObservationVector, ObservationEncoder, ObservationSchema, SchemaKind};
pub use logic::observation::StepObservation;
pub use logic::threat::{assess_zone, classify_host, CompromiseLevel};
pub use logic::topology::{NetworkState, Topology, ZoneLookup, ZoneOwner};
