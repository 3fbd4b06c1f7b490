//! Comm Message Encoder
//!
//! Pure function of (observation, last action status, zone lookup).
//! Runs after the automatic end-of-step Monitor so the observation carries
//! this step's process events.

use crate::logic::observation::StepObservation;
use crate::logic::threat::assess_zone;
use crate::logic::topology::ZoneLookup;

use super::message::CommMessage;

/// Build this zone's broadcast for the step
pub fn create_comm_message<L: ZoneLookup + ?Sized>(
    observation: &StepObservation,
    lookup: &L,
) -> CommMessage {
    let assessment = assess_zone(observation);

    let mut message = CommMessage::EMPTY;
    message.set_level(assessment.level);
    message.set_waiting(observation.success.is_in_progress());

    if !assessment.level.is_clean() {
        for address in &assessment.implicated {
            match lookup.zone_of(address).peer_index() {
                Some(zone) => message.set_alarm(zone),
                None => log::debug!("{} resolves outside every zone, no alarm", address),
            }
        }
    }

    log::trace!("Comm message {:?} (level {})", message.to_bits(), assessment.level);
    message
}
