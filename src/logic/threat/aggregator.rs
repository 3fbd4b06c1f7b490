//! Compromise Aggregator
//!
//! Reduces every host of one zone observation to a single `CompromiseLevel`
//! and the remote addresses to blame for it.

use crate::logic::observation::StepObservation;

use super::classifier::{classify_host, connection_findings, host_level};
use super::types::{CompromiseLevel, ZoneAssessment};

/// Running max over hosts; the level stops at admin compromise, but every
/// host is still scanned for addresses to blame so the result does not
/// depend on host order.
pub fn assess_zone(observation: &StepObservation) -> ZoneAssessment {
    let mut assessment = ZoneAssessment::default();

    for (hostname, record) in &observation.hosts {
        let findings = connection_findings(record);
        if findings.severity > 0 {
            assessment.implicated.extend(findings.implicated);
        }

        if assessment.level == CompromiseLevel::AdminCompromise {
            continue;
        }

        let level = host_level(&classify_host(record));
        if level > assessment.level {
            log::debug!("{}: host raises zone level to {}", hostname, level);
            assessment.level = level;
        }
    }

    assessment
}
