//! Comms Module - cross-agent threat signaling
//!
//! - `message`: 8-bit `CommMessage` and its bit layout
//! - `encoder`: builds a zone's message from its step observation

pub mod message;
pub mod encoder;

pub use message::{CommMessage, LEVEL_HIGH_BIT, LEVEL_LOW_BIT, WAITING_BIT};
pub use encoder::create_comm_message;
