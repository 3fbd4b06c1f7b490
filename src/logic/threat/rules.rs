//! Threat Classification Rules & Thresholds
//!
//! Indicator names, counts and scales used by the classifier.
//! KHÔNG chứa logic classify - chỉ constants.

use super::types::CompromiseLevel;

// ============================================================================
// FILE INDICATORS (matched case-sensitively)
// ============================================================================

/// Dropped by a user-level exploit
pub const USER_IOC_FILES: &[&str] = &["cmd.sh", "cmd.exe"];

/// Dropped by privilege escalation
pub const ADMIN_IOC_FILES: &[&str] = &["escalate.sh", "escalate.exe"];

/// File level for a user indicator
pub const USER_FILE_LEVEL: u8 = 2;

/// File level for an admin indicator
pub const ADMIN_FILE_LEVEL: u8 = 3;

// ============================================================================
// PROCESS / CONNECTION / SESSION HEURISTICS
// ============================================================================

/// Escalated connection severity
pub const CONNECTION_SEVERITY_MAX: u8 = 3;

/// Connection records normally expose 1-3 attributes; exactly this many is the
/// known protocol anomaly and must stay literal.
pub const ANOMALOUS_CONNECTION_ATTRIBUTES: usize = 4;

/// A process without connection or owner needs at least this many attributes
pub const MIN_VISIBLE_PROCESS_ATTRIBUTES: usize = 2;

/// Sessions above this count are abnormal
pub const MAX_NORMAL_SESSIONS: usize = 1;

/// Cap on distinct exploited local ports
pub const MAX_EXPLOIT_PORTS: u8 = 2;

// ============================================================================
// ANALYZE SCORE
// ============================================================================

/// Densities at or below this are benign
pub const DENSITY_THRESHOLD: f32 = 0.5;

/// Scale from density excess to score steps
pub const DENSITY_SCALE: f32 = 10.0;

/// Highest analyze score (cardinality 5)
pub const MAX_ANALYZE_SCORE: u8 = 4;

// ============================================================================
// ZONE LEVEL CONTRIBUTIONS
// ============================================================================

/// Level implied by an escalated connection (repeated remote or malformed entry)
pub const CONNECTION_LEVEL: CompromiseLevel = CompromiseLevel::UserCompromise;

/// Level implied by a hidden process
pub const PROCESS_LEVEL: CompromiseLevel = CompromiseLevel::UserCompromise;

/// Level implied by session overflow
pub const SESSION_LEVEL: CompromiseLevel = CompromiseLevel::UserCompromise;
