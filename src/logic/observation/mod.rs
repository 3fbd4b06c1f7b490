//! Observation Module
//!
//! Typed view of the simulator's per-step observation mapping.
//! Every host section is optional; classifiers check for presence
//! instead of assuming a fixed shape.

pub mod types;

pub use types::{
    ActionStatus,
    ConnectionRecord,
    FileRecord,
    InterfaceRecord,
    ProcessRecord,
    RawHostRecord,
    SessionRecord,
    StepObservation,
    RESERVED_KEYS,
};
