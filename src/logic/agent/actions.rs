//! Blue Actions
//!
//! Actions the controlling policy can execute. Only the ones that touch
//! tracker state carry meaning here; the simulator resolves the rest.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BlueAction {
    Sleep,
    Monitor,
    Analyse { hostname: String },
    Remove { hostname: String },
    Restore { hostname: String },
    DeployDecoy { hostname: String },
    BlockTrafficZone { from_subnet: String, to_subnet: String },
    AllowTrafficZone { from_subnet: String, to_subnet: String },
}

impl BlueAction {
    pub fn action_type(&self) -> &'static str {
        match self {
            BlueAction::Sleep => "sleep",
            BlueAction::Monitor => "monitor",
            BlueAction::Analyse { .. } => "analyse",
            BlueAction::Remove { .. } => "remove",
            BlueAction::Restore { .. } => "restore",
            BlueAction::DeployDecoy { .. } => "deploy_decoy",
            BlueAction::BlockTrafficZone { .. } => "block_traffic_zone",
            BlueAction::AllowTrafficZone { .. } => "allow_traffic_zone",
        }
    }

    /// Host the action targets, if it targets one
    pub fn hostname(&self) -> Option<&str> {
        match self {
            BlueAction::Analyse { hostname }
            | BlueAction::Remove { hostname }
            | BlueAction::Restore { hostname }
            | BlueAction::DeployDecoy { hostname } => Some(hostname),
            _ => None,
        }
    }
}

impl Default for BlueAction {
    fn default() -> Self {
        BlueAction::Sleep
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tagged_wire_format() {
        let action: BlueAction = serde_json::from_str(
            r#"{"type": "Restore", "hostname": "office_network_subnet_user_host_2"}"#,
        )
        .unwrap();

        assert_eq!(action.hostname(), Some("office_network_subnet_user_host_2"));
        assert_eq!(action.action_type(), "restore");

        let sleep: BlueAction = serde_json::from_str(r#"{"type": "Sleep"}"#).unwrap();
        assert_eq!(sleep, BlueAction::Sleep);
        assert_eq!(sleep.hostname(), None);
    }
}
