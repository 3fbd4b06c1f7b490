//! Threat Module
//!
//! Phân loại threat từ raw host records của simulator.
//! Đây là CORE STEP - nơi quyết định compromise level của zone.
//!
//! ## Structure
//! - `types`: Core types (CompromiseLevel, ThreatClassification, HostEvidence, ...)
//! - `rules`: Indicator names, heuristics and constants
//! - `classifier`: Per-host classification logic
//! - `aggregator`: Zone-wide reduction
//!
//! ## Usage
//! ```ignore
//! use crate::logic::threat::{assess_zone, CompromiseLevel};
//!
//! let assessment = assess_zone(&observation);
//! if assessment.level >= CompromiseLevel::UserCompromise {
//!     // blame assessment.implicated
//! }
//! ```

pub mod types;
pub mod rules;
pub mod classifier;
pub mod aggregator;

// Re-export main types for convenience
pub use types::{
    CompromiseLevel,
    ConnectionFindings,
    HostEvidence,
    ThreatClassification,
    ZoneAssessment,
};

pub use classifier::{classify_host, host_evidence, host_level};
pub use aggregator::assess_zone;
