//! Agent Module - per-zone encoder wrappers and the team around them
//!
//! - `actions`: blue actions that touch tracker state
//! - `wrapper`: `AgentEncoder`, one zone's isolated episode state
//! - `team`: `DefenderTeam`, five agents plus message routing

pub mod actions;
pub mod wrapper;
pub mod team;

#[cfg(test)]
mod tests;

pub use actions::BlueAction;
pub use wrapper::AgentEncoder;
pub use team::{DefenderTeam, TeamStep};
