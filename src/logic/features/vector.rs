//! Agent Observation Vector - fixed-width policy input
//!
//! **Versioned vector with layout validation**
//!
//! Uses the schema from `layout.rs` for:
//! - Width and per-field bounds
//! - Version tracking
//! - Layout hash for compatibility checks

use serde::{Deserialize, Serialize};

use crate::logic::error::{EncodeError, EncodeResult};

use super::layout::{validate_layout, LayoutMismatchError, ObservationSchema, LAYOUT_VERSION};

// ============================================================================
// VERSIONED OBSERVATION VECTOR
// ============================================================================

/// One agent's encoded observation for one step.
///
/// Only built through `from_values`, so a vector in hand always matches its
/// schema's width and cardinalities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentObservationVector {
    pub agent: usize,
    /// Observation layout version
    pub version: u8,
    /// CRC32 hash of the layout (for mismatch detection)
    pub layout_hash: u32,
    pub schema: ObservationSchema,
    values: Vec<u8>,
}

impl AgentObservationVector {
    /// Wrap encoded values, enforcing width and field bounds
    pub fn from_values(
        agent: usize,
        schema: ObservationSchema,
        values: Vec<u8>,
    ) -> EncodeResult<Self> {
        if values.len() != schema.width() {
            return Err(EncodeError::SchemaMismatch {
                agent,
                schema: schema.kind.as_str(),
                expected: schema.width(),
                actual: values.len(),
            });
        }

        let cardinalities = schema.cardinalities();
        if let Some((index, (&value, &cardinality))) = values
            .iter()
            .zip(cardinalities.iter())
            .enumerate()
            .find(|(_, (v, c))| **v >= **c)
        {
            return Err(EncodeError::FieldOutOfRange {
                index,
                name: schema.field_name(index).unwrap_or_default(),
                value,
                cardinality,
            });
        }

        Ok(Self {
            agent,
            version: LAYOUT_VERSION,
            layout_hash: schema.layout_hash(),
            schema,
            values,
        })
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.values
    }

    pub fn into_values(self) -> Vec<u8> {
        self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<u8> {
        self.values.get(index).copied()
    }

    pub fn get_by_name(&self, name: &str) -> Option<u8> {
        self.schema
            .field_names()
            .iter()
            .position(|n| n == name)
            .and_then(|i| self.get(i))
    }

    /// Validate that this vector is compatible with `schema`
    pub fn validate(&self, schema: &ObservationSchema) -> Result<(), LayoutMismatchError> {
        validate_layout(schema, self.version, self.layout_hash)
    }

    pub fn is_compatible(&self, schema: &ObservationSchema) -> bool {
        self.validate(schema).is_ok()
    }

    /// Convert to JSON-serializable format for logging
    pub fn to_log_entry(&self) -> serde_json::Value {
        serde_json::json!({
            "agent": self.agent,
            "layout_version": self.version,
            "layout_hash": self.layout_hash,
            "schema": self.schema.kind.as_str(),
            "values": self.values,
            "named_values": self.schema.field_names().into_iter()
                .zip(self.values.iter())
                .filter(|(_, value)| **value != 0)
                .map(|(name, value)| (name, *value))
                .collect::<std::collections::BTreeMap<_, _>>(),
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================
