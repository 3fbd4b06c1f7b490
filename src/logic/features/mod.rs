//! Features Module - Observation Encoding
//!
//! Tách logic encode khỏi threat classification.
//!
//! - `layout`: schema, widths, cardinalities, layout hash
//! - `vector`: validated fixed-width vector
//! - `encoder`: assembles one agent's vector per step

pub mod layout;
pub mod vector;
pub mod encoder;


pub use layout::{validate_layout, LayoutMismatchError, ObservationSchema, SchemaKind, LAYOUT_VERSION, PREFIX_WIDTH};
pub use vector::AgentObservationVector;
pub use encoder::{embedded_phase, is_mirrored, order_messages, ObservationEncoder};
