//! Logic Module - Signaling & Encoding Engines
//!
//! Chứa các engines xử lý: threat classification, comm messages, observation encoding.
//!
//! ## Data flow
//! - `observation/` - typed view of the simulator's raw step observation
//! - `threat/` - per-host classification and zone-wide reduction
//! - `comms/` - 8-bit message a zone broadcasts to its peers
//! - `topology/` - scenario layout, comms policy, address -> zone lookup
//! - `state/` - sticky threat memory and decoy counters
//! - `features/` - fixed-width observation vectors
//! - `agent/` - per-zone wrappers and the defender team
//! - `trace/`, `replay` - episode replay and JSONL traces

// Core modules
pub mod config;
pub mod error;
pub mod observation;
pub mod threat;
pub mod comms;
pub mod topology;

// Encoding
pub mod state;
pub mod features;
pub mod agent;

// Replay tooling
pub mod trace;
pub mod replay;
