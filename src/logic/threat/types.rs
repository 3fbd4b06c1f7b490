//! Threat Types
//!
//! Core types cho threat classification.
//! KHÔNG chứa logic - chỉ data structures.

use std::collections::BTreeSet;
use std::net::IpAddr;

use serde::{Deserialize, Serialize};

// ============================================================================
// COMPROMISE LEVEL
// ============================================================================

/// Zone-wide severity summary carried in bits 5-6 of a `CommMessage`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum CompromiseLevel {
    /// No evidence this step
    #[default]
    Clean = 0,
    /// Network scan or remote exploit attempt
    ScanOrExploit = 1,
    /// User-level foothold
    UserCompromise = 2,
    /// Admin-level foothold
    AdminCompromise = 3,
}

impl CompromiseLevel {
    pub fn as_u8(&self) -> u8 {
        *self as u8
    }

    /// Decode a 2-bit value; higher bits are ignored
    pub fn from_bits(value: u8) -> Self {
        match value & 0b11 {
            0 => CompromiseLevel::Clean,
            1 => CompromiseLevel::ScanOrExploit,
            2 => CompromiseLevel::UserCompromise,
            _ => CompromiseLevel::AdminCompromise,
        }
    }

    pub fn is_clean(&self) -> bool {
        matches!(self, CompromiseLevel::Clean)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CompromiseLevel::Clean => "clean",
            CompromiseLevel::ScanOrExploit => "scan_or_exploit",
            CompromiseLevel::UserCompromise => "user_compromise",
            CompromiseLevel::AdminCompromise => "admin_compromise",
        }
    }
}

impl std::fmt::Display for CompromiseLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// PER-HOST CLASSIFICATION
// ============================================================================

/// Signals derived from one host's record for one step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ThreatClassification {
    /// 0 = nothing, 3 = escalated (repeated origin or malformed connection)
    pub connection_severity: u8,
    /// Process whose ownership and connection cannot be observed
    pub has_anomalous_process: bool,
    /// 0 = none, 2 = user indicator file, 3 = admin indicator file
    pub file_compromise_level: u8,
    /// More concurrent sessions than normal
    pub session_overflow: bool,
}

/// Connection scan result: severity plus the addresses that caused it
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConnectionFindings {
    pub severity: u8,
    pub implicated: BTreeSet<IpAddr>,
}

/// Policy-facing evidence for one host
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HostEvidence {
    /// Distinct local ports hit by malformed connections, capped at 2
    pub exploit_ports: Option<u8>,
    /// Remote ends of those malformed connections
    pub attacker_addresses: BTreeSet<IpAddr>,
    /// Process with a PID but no owner
    pub unowned_process: bool,
    /// Density-derived file score, 0..=4
    pub analyze_score: u8,
}

// ============================================================================
// ZONE ASSESSMENT
// ============================================================================

/// Result of aggregating every host of one zone observation
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ZoneAssessment {
    pub level: CompromiseLevel,
    /// Remote addresses behind a positive connection finding
    pub implicated: BTreeSet<IpAddr>,
}
