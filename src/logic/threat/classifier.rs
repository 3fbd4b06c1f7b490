//! Threat Classifier
//!
//! CHỈ chứa logic classify - không có types, không có policy.
//! Input: RawHostRecord (one host, one step)
//! Output: ThreatClassification / HostEvidence
//!
//! Every function is total: a missing section or attribute is "no signal".

use std::collections::BTreeSet;
use std::net::IpAddr;

use crate::logic::observation::RawHostRecord;

use super::rules::{
    ADMIN_FILE_LEVEL, ADMIN_IOC_FILES, ANOMALOUS_CONNECTION_ATTRIBUTES, CONNECTION_LEVEL,
    CONNECTION_SEVERITY_MAX, DENSITY_SCALE, DENSITY_THRESHOLD, MAX_ANALYZE_SCORE,
    MAX_EXPLOIT_PORTS, MAX_NORMAL_SESSIONS, MIN_VISIBLE_PROCESS_ATTRIBUTES, PROCESS_LEVEL,
    SESSION_LEVEL, USER_FILE_LEVEL, USER_IOC_FILES,
};
use super::types::{CompromiseLevel, ConnectionFindings, HostEvidence, ThreatClassification};

// ============================================================================
// MAIN CLASSIFICATION FUNCTION
// ============================================================================

/// Classify one host's record for this step
pub fn classify_host(record: &RawHostRecord) -> ThreatClassification {
    ThreatClassification {
        connection_severity: connection_severity(record),
        has_anomalous_process: has_anomalous_process(record),
        file_compromise_level: file_compromise_level(record),
        session_overflow: session_overflow(record),
    }
}

/// Zone-level contribution of a single host's classification
pub fn host_level(classification: &ThreatClassification) -> CompromiseLevel {
    let mut level = CompromiseLevel::from_bits(classification.file_compromise_level);

    if classification.connection_severity > 0 {
        level = level.max(CONNECTION_LEVEL);
    }
    if classification.has_anomalous_process {
        level = level.max(PROCESS_LEVEL);
    }
    if classification.session_overflow {
        level = level.max(SESSION_LEVEL);
    }

    level
}

// ============================================================================
// INDIVIDUAL SIGNALS
// ============================================================================

/// Escalates when one remote address shows up on several connection entries
/// (aggressive service discovery) or an entry has exactly 4 attributes.
pub fn connection_findings(record: &RawHostRecord) -> ConnectionFindings {
    let mut findings = ConnectionFindings::default();
    let mut seen: BTreeSet<IpAddr> = BTreeSet::new();

    for connection in record.processes().iter().filter_map(|p| p.first_connection()) {
        if let Some(remote) = connection.remote_address {
            if !seen.insert(remote) {
                findings.severity = CONNECTION_SEVERITY_MAX;
                findings.implicated.insert(remote);
            }
        }

        if connection.attribute_count() == ANOMALOUS_CONNECTION_ATTRIBUTES {
            findings.severity = CONNECTION_SEVERITY_MAX;
            if let Some(remote) = connection.remote_address {
                findings.implicated.insert(remote);
            }
        }
    }

    findings
}

pub fn connection_severity(record: &RawHostRecord) -> u8 {
    connection_findings(record).severity
}

/// A process with no connection, no owner and almost nothing else visible
/// is hiding from us.
pub fn has_anomalous_process(record: &RawHostRecord) -> bool {
    record.processes().iter().any(|p| {
        p.connections.is_none()
            && p.username.is_none()
            && p.attribute_count() < MIN_VISIBLE_PROCESS_ATTRIBUTES
    })
}

/// Admin indicator wins outright; otherwise a user indicator gives level 2
pub fn file_compromise_level(record: &RawHostRecord) -> u8 {
    let mut level = 0;

    for name in record.files().iter().filter_map(|f| f.name.as_deref()) {
        if ADMIN_IOC_FILES.contains(&name) {
            return ADMIN_FILE_LEVEL;
        }
        if USER_IOC_FILES.contains(&name) {
            level = USER_FILE_LEVEL;
        }
    }

    level
}

pub fn session_overflow(record: &RawHostRecord) -> bool {
    record.sessions().len() > MAX_NORMAL_SESSIONS
}

// ============================================================================
// POLICY EVIDENCE
// ============================================================================

/// Per-host evidence consumed by the observation encoder
pub fn host_evidence(record: &RawHostRecord) -> HostEvidence {
    let mut evidence = HostEvidence {
        unowned_process: record
            .processes()
            .iter()
            .any(|p| p.pid.is_some() && p.username.is_none()),
        ..Default::default()
    };

    // Malformed connections reported without a PID are the exploit signature
    let malicious: Vec<_> = record
        .processes()
        .iter()
        .filter(|p| p.pid.is_none())
        .filter_map(|p| p.first_connection())
        .filter(|c| c.attribute_count() == ANOMALOUS_CONNECTION_ATTRIBUTES)
        .collect();

    if !malicious.is_empty() {
        let ports: BTreeSet<Option<u16>> = malicious.iter().map(|c| c.local_port).collect();
        evidence.exploit_ports = Some(ports.len().min(MAX_EXPLOIT_PORTS as usize) as u8);
        evidence.attacker_addresses = malicious.iter().filter_map(|c| c.remote_address).collect();
    }

    evidence.analyze_score = analyze_score(record);
    evidence
}

/// Highest file density above the threshold, scaled, combined with the
/// indicator-file level and clamped to 0..=4.
pub fn analyze_score(record: &RawHostRecord) -> u8 {
    let density_score = record
        .files()
        .iter()
        .filter_map(|f| f.density)
        .fold(None, |best: Option<f32>, d| Some(best.map_or(d, |b| b.max(d))))
        .filter(|d| *d > DENSITY_THRESHOLD)
        .map(|d| ((d - DENSITY_THRESHOLD) * DENSITY_SCALE) as u8)
        .unwrap_or(0);

    density_score
        .max(file_compromise_level(record))
        .min(MAX_ANALYZE_SCORE)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> RawHostRecord {
        serde_json::from_value(value).unwrap()
    }

    fn conn(remote: &str, port: u16) -> serde_json::Value {
        json!({"Connections": [{"remote_address": remote, "local_port": port}]})
    }

    #[test]
    fn test_empty_record_is_clean() {
        let classification = classify_host(&RawHostRecord::default());
        assert_eq!(classification, ThreatClassification::default());
        assert_eq!(host_level(&classification), CompromiseLevel::Clean);
    }

    #[test]
    fn test_repeated_remote_address_escalates() {
        let host = record(json!({"Processes": [conn("10.0.0.9", 22), conn("10.0.0.9", 80)]}));
        let findings = connection_findings(&host);

        assert_eq!(findings.severity, CONNECTION_SEVERITY_MAX);
        assert!(findings.implicated.contains(&"10.0.0.9".parse::<IpAddr>().unwrap()));
    }

    #[test]
    fn test_single_remote_address_does_not_escalate() {
        let host = record(json!({"Processes": [conn("10.0.0.9", 22), conn("10.0.0.10", 22)]}));
        let findings = connection_findings(&host);

        assert_eq!(findings.severity, 0);
        assert!(findings.implicated.is_empty());
    }

    #[test]
    fn test_four_attribute_connection_escalates() {
        let host = record(json!({"Processes": [{"Connections": [{
            "local_address": "10.0.0.2",
            "local_port": 22,
            "remote_address": "10.0.3.4",
            "remote_port": 50000
        }]}]}));

        assert_eq!(connection_severity(&host), CONNECTION_SEVERITY_MAX);
        assert_eq!(host_level(&classify_host(&host)), CompromiseLevel::UserCompromise);
    }

    #[test]
    fn test_exploit_ports_capped_past_u8() {
        // 256 distinct ports must not wrap to 0 before the cap
        let processes: Vec<serde_json::Value> = (1..=256u16)
            .map(|port| json!({"Connections": [{
                "local_address": "10.0.0.2",
                "local_port": port,
                "remote_address": "10.0.3.4",
                "remote_port": 50000
            }]}))
            .collect();
        let host = record(json!({"Processes": processes}));

        assert_eq!(host_evidence(&host).exploit_ports, Some(2));
    }

    #[test]
    fn test_hidden_process_flagged() {
        let host = record(json!({"Processes": [{"PID": 4411}]}));
        assert!(has_anomalous_process(&host));

        let owned = record(json!({"Processes": [{"PID": 4411, "username": "www"}]}));
        assert!(!has_anomalous_process(&owned));

        let visible = record(json!({"Processes": [{"PID": 4411, "process_name": "smtp"}]}));
        assert!(!has_anomalous_process(&visible));
    }

    #[test]
    fn test_admin_file_wins() {
        let host = record(json!({"Files": [
            {"File Name": "cmd.sh"},
            {"File Name": "escalate.exe"},
        ]}));
        assert_eq!(file_compromise_level(&host), ADMIN_FILE_LEVEL);
    }

    #[test]
    fn test_user_file_alone() {
        let host = record(json!({"Files": [{"File Name": "cmd.sh"}, {"File Name": "notes.txt"}]}));
        assert_eq!(file_compromise_level(&host), USER_FILE_LEVEL);
    }

    #[test]
    fn test_file_match_is_case_sensitive() {
        let host = record(json!({"Files": [{"File Name": "CMD.SH"}, {"File Name": "Escalate.exe"}]}));
        assert_eq!(file_compromise_level(&host), 0);
    }

    #[test]
    fn test_session_overflow() {
        let one = record(json!({"Sessions": [{"session_id": 0}]}));
        let two = record(json!({"Sessions": [{"session_id": 0}, {"session_id": 1}]}));

        assert!(!session_overflow(&one));
        assert!(session_overflow(&two));
        assert_eq!(host_level(&classify_host(&two)), CompromiseLevel::UserCompromise);
    }

    #[test]
    fn test_evidence_counts_exploit_ports() {
        let malformed = |port: u16| json!({"Connections": [{
            "local_address": "10.0.0.2",
            "local_port": port,
            "remote_address": "10.0.5.5",
            "remote_port": 51000
        }]});

        let one_port = record(json!({"Processes": [malformed(22)]}));
        assert_eq!(host_evidence(&one_port).exploit_ports, Some(1));

        let many_ports = record(json!({"Processes": [malformed(22), malformed(80), malformed(443)]}));
        let evidence = host_evidence(&many_ports);
        assert_eq!(evidence.exploit_ports, Some(2));
        assert_eq!(evidence.attacker_addresses.len(), 1);
    }

    #[test]
    fn test_evidence_ignores_pid_connections() {
        let host = record(json!({"Processes": [{
            "PID": 9,
            "Connections": [{
                "local_address": "10.0.0.2",
                "local_port": 22,
                "remote_address": "10.0.5.5",
                "remote_port": 51000
            }]
        }]}));
        let evidence = host_evidence(&host);

        assert_eq!(evidence.exploit_ports, None);
        assert!(evidence.unowned_process);
    }

    #[test]
    fn test_analyze_score_from_density() {
        let host = record(json!({"Files": [{"Density": 0.3}, {"Density": 0.82}]}));
        assert_eq!(analyze_score(&host), 3);

        let dense = record(json!({"Files": [{"Density": 1.0}]}));
        assert_eq!(analyze_score(&dense), MAX_ANALYZE_SCORE);

        let named = record(json!({"Files": [{"File Name": "escalate.sh", "Density": 0.1}]}));
        assert_eq!(analyze_score(&named), ADMIN_FILE_LEVEL);
    }
}
