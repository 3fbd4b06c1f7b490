//! Raw Observation Types
//!
//! Shapes handed across the simulator boundary.
//! KHÔNG chứa logic classify - chỉ data structures và accessors.

use std::collections::BTreeMap;
use std::net::IpAddr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::logic::comms::CommMessage;

// ============================================================================
// ACTION STATUS
// ============================================================================

/// Completion state of the agent's last action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ActionStatus {
    #[serde(rename = "TRUE", alias = "success")]
    Success,
    #[default]
    #[serde(rename = "UNKNOWN", alias = "unknown")]
    Unknown,
    #[serde(rename = "FALSE", alias = "failure")]
    Failure,
    #[serde(rename = "IN_PROGRESS", alias = "in_progress")]
    InProgress,
}

impl ActionStatus {
    pub fn is_in_progress(&self) -> bool {
        matches!(self, ActionStatus::InProgress)
    }
}

// ============================================================================
// LENIENT SECTIONS
// ============================================================================

/// A list section where each entry stands alone: entries that do not parse
/// are dropped, a section that is not a list is treated as absent.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => Some(
            items
                .into_iter()
                .filter_map(|item| match serde_json::from_value(item) {
                    Ok(entry) => Some(entry),
                    Err(e) => {
                        log::debug!("Dropping malformed entry: {}", e);
                        None
                    }
                })
                .collect(),
        ),
        Some(Value::Null) | None => None,
        Some(other) => {
            log::debug!("Section is not a list ({}), ignoring", other);
            None
        }
    })
}

fn lenient_map<'de, D>(deserializer: D) -> Result<Option<Map<String, Value>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Object(map)) => Some(map),
        _ => None,
    })
}

// ============================================================================
// CONNECTION / PROCESS
// ============================================================================

/// One connection attached to a process event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConnectionRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_address: Option<IpAddr>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_address: Option<IpAddr>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_port: Option<u16>,
    /// Anything else the simulator attached
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ConnectionRecord {
    /// Number of attributes present on the wire
    pub fn attribute_count(&self) -> usize {
        [
            self.local_address.is_some(),
            self.local_port.is_some(),
            self.remote_address.is_some(),
            self.remote_port.is_some(),
        ]
        .iter()
        .filter(|present| **present)
        .count()
            + self.extra.len()
    }
}

/// One process event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessRecord {
    #[serde(rename = "PID", default, skip_serializing_if = "Option::is_none")]
    pub pid: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(
        rename = "Connections",
        default,
        deserialize_with = "lenient_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub connections: Option<Vec<ConnectionRecord>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProcessRecord {
    /// Number of attributes present on the wire
    pub fn attribute_count(&self) -> usize {
        [self.pid.is_some(), self.username.is_some(), self.connections.is_some()]
            .iter()
            .filter(|present| **present)
            .count()
            + self.extra.len()
    }

    /// First connection of the event; the simulator reports one per event
    pub fn first_connection(&self) -> Option<&ConnectionRecord> {
        self.connections.as_ref().and_then(|c| c.first())
    }
}

// ============================================================================
// FILES / SESSIONS / INTERFACES
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    #[serde(rename = "File Name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "Density", default, skip_serializing_if = "Option::is_none")]
    pub density: Option<f32>,
    #[serde(rename = "Path", default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InterfaceRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interface_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<IpAddr>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ============================================================================
// HOST RECORD
// ============================================================================

/// Per-host fragment of one step's observation.
///
/// Every section is optional: which ones appear depends on the action the
/// simulator just resolved (Monitor reports processes, Analyse reports files).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawHostRecord {
    #[serde(rename = "Processes", default, deserialize_with = "lenient_list", skip_serializing_if = "Option::is_none")]
    pub processes: Option<Vec<ProcessRecord>>,
    #[serde(rename = "Files", default, deserialize_with = "lenient_list", skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<FileRecord>>,
    #[serde(rename = "Sessions", default, deserialize_with = "lenient_list", skip_serializing_if = "Option::is_none")]
    pub sessions: Option<Vec<SessionRecord>>,
    #[serde(rename = "Interface", default, deserialize_with = "lenient_list", skip_serializing_if = "Option::is_none")]
    pub interfaces: Option<Vec<InterfaceRecord>>,
    #[serde(rename = "System info", default, deserialize_with = "lenient_map", skip_serializing_if = "Option::is_none")]
    pub system_info: Option<Map<String, Value>>,
}

impl RawHostRecord {
    pub fn processes(&self) -> &[ProcessRecord] {
        self.processes.as_deref().unwrap_or(&[])
    }

    pub fn files(&self) -> &[FileRecord] {
        self.files.as_deref().unwrap_or(&[])
    }

    pub fn sessions(&self) -> &[SessionRecord] {
        self.sessions.as_deref().unwrap_or(&[])
    }
}

// ============================================================================
// STEP OBSERVATION
// ============================================================================

/// Keys of the raw mapping that are metadata, not hosts
pub const RESERVED_KEYS: [&str; 4] = ["success", "action", "phase", "message"];

/// One zone's raw observation for one step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepObservation {
    pub success: ActionStatus,
    pub action: Option<Value>,
    pub phase: Option<u8>,
    /// Peer messages delivered this step (None before the first broadcast)
    pub messages: Option<Vec<CommMessage>>,
    pub hosts: BTreeMap<String, RawHostRecord>,
}

impl StepObservation {
    pub fn new(success: ActionStatus) -> Self {
        Self {
            success,
            ..Default::default()
        }
    }

    pub fn with_host(mut self, hostname: impl Into<String>, record: RawHostRecord) -> Self {
        self.hosts.insert(hostname.into(), record);
        self
    }

    pub fn with_messages(mut self, messages: Vec<CommMessage>) -> Self {
        self.messages = Some(messages);
        self
    }

    /// Build from the simulator's JSON mapping.
    ///
    /// Total over arbitrary input: a reserved key or host value that does not
    /// parse is dropped as "no signal". Inside a host, a bad entry only drops
    /// that entry.
    pub fn from_json(value: Value) -> Self {
        let Value::Object(map) = value else {
            log::debug!("Observation is not a mapping, treating as empty");
            return Self::default();
        };

        let mut observation = Self::default();
        for (key, value) in map {
            match key.as_str() {
                "success" => {
                    observation.success = serde_json::from_value(value).unwrap_or_default();
                }
                "action" => observation.action = Some(value),
                "phase" => {
                    observation.phase = value.as_u64().and_then(|p| u8::try_from(p).ok());
                }
                "message" => match serde_json::from_value::<Vec<CommMessage>>(value) {
                    Ok(messages) => observation.messages = Some(messages),
                    Err(e) => log::debug!("Ignoring malformed message block: {}", e),
                },
                _ => {
                    let record = serde_json::from_value::<RawHostRecord>(value).unwrap_or_else(|e| {
                        log::debug!("Host '{}' record malformed ({}), no signal", key, e);
                        RawHostRecord::default()
                    });
                    observation.hosts.insert(key, record);
                }
            }
        }
        observation
    }
}

impl<'de> Deserialize<'de> for StepObservation {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(Self::from_json)
    }
}
