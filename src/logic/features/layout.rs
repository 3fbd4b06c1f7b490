//! Observation Layout - Centralized Schema Definition
//!
//! **CRITICAL: This file controls the observation schema**
//!
//! ## Rules (NEVER break these):
//! 1. Add field → increment LAYOUT_VERSION
//! 2. Change order → increment LAYOUT_VERSION
//! 3. Remove field → increment LAYOUT_VERSION
//!
//! ## Layout
//! ```text
//! [phase][waiting][4 x 8 message bits]
//! then per subnet block:
//!   [subnet id x9][blocked x9][comms policy x9]
//!   [connection x16][process x16][attacker x16]
//!   [analyze x16]?   (analyze enabled)
//!   [decoys x16]?    (decoys enabled)
//! ```
//! Short schema = 1 subnet block, long schema = 3 blocks (zero-filled when unused).

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{HQ_ZONE, MAX_HOSTS, MESSAGE_LENGTH, NUM_HQ_SUBNETS, NUM_MESSAGES, NUM_SUBNETS};
use crate::logic::config::EncoderConfig;

// ============================================================================
// LAYOUT VERSION
// ============================================================================

/// Current observation layout version
/// MUST be incremented when layout changes
pub const LAYOUT_VERSION: u8 = 1;

// ============================================================================
// FIELD CARDINALITIES
// ============================================================================

pub const PHASE_CARDINALITY: u8 = 3;
pub const FLAG_CARDINALITY: u8 = 2;
pub const CONNECTION_CARDINALITY: u8 = 4;
pub const ANALYZE_CARDINALITY: u8 = 5;
pub const DECOY_CARDINALITY: u8 = 5;

/// phase + waiting + message bits
pub const PREFIX_WIDTH: usize = 2 + NUM_MESSAGES * MESSAGE_LENGTH;

// ============================================================================
// SCHEMA
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SchemaKind {
    /// One subnet block
    Short,
    /// Headquarters width, also used for padded shared policies
    Long,
}

impl SchemaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaKind::Short => "short",
            SchemaKind::Long => "long",
        }
    }

    pub fn subnet_blocks(&self) -> usize {
        match self {
            SchemaKind::Short => 1,
            SchemaKind::Long => NUM_HQ_SUBNETS,
        }
    }
}

/// Declared layout of one agent's observation vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObservationSchema {
    pub kind: SchemaKind,
    pub analyze: bool,
    pub decoys: bool,
}

impl ObservationSchema {
    pub fn new(kind: SchemaKind, config: &EncoderConfig) -> Self {
        Self {
            kind,
            analyze: config.analyze,
            decoys: config.decoys,
        }
    }

    /// HQ always long; everyone else long only when padded
    pub fn for_agent(agent: usize, config: &EncoderConfig) -> Self {
        let kind = if config.padded || agent == HQ_ZONE {
            SchemaKind::Long
        } else {
            SchemaKind::Short
        };
        Self::new(kind, config)
    }

    /// Per-host channel cardinalities in emission order
    fn host_channels(&self) -> Vec<(&'static str, u8)> {
        let mut channels = vec![
            ("connection", CONNECTION_CARDINALITY),
            ("process", FLAG_CARDINALITY),
            ("attacker", FLAG_CARDINALITY),
        ];
        if self.analyze {
            channels.push(("analyze", ANALYZE_CARDINALITY));
        }
        if self.decoys {
            channels.push(("decoys", DECOY_CARDINALITY));
        }
        channels
    }

    pub fn subnet_block_width(&self) -> usize {
        3 * NUM_SUBNETS + MAX_HOSTS * self.host_channels().len()
    }

    pub fn width(&self) -> usize {
        PREFIX_WIDTH + self.kind.subnet_blocks() * self.subnet_block_width()
    }

    /// MultiDiscrete-style cardinality per field
    pub fn cardinalities(&self) -> Vec<u8> {
        let mut out = vec![PHASE_CARDINALITY, FLAG_CARDINALITY];
        out.extend(std::iter::repeat(FLAG_CARDINALITY).take(NUM_MESSAGES * MESSAGE_LENGTH));

        for _ in 0..self.kind.subnet_blocks() {
            out.extend(std::iter::repeat(FLAG_CARDINALITY).take(3 * NUM_SUBNETS));
            for (_, cardinality) in self.host_channels() {
                out.extend(std::iter::repeat(cardinality).take(MAX_HOSTS));
            }
        }
        out
    }

    /// Field names in exact vector order
    pub fn field_names(&self) -> Vec<String> {
        let mut names = vec!["phase".to_string(), "waiting".to_string()];
        for m in 0..NUM_MESSAGES {
            for b in 0..MESSAGE_LENGTH {
                names.push(format!("message{}.bit{}", m, b));
            }
        }

        for block in 0..self.kind.subnet_blocks() {
            for group in ["subnet_id", "blocked", "comms_policy"] {
                for i in 0..NUM_SUBNETS {
                    names.push(format!("block{}.{}[{}]", block, group, i));
                }
            }
            for (channel, _) in self.host_channels() {
                for h in 0..MAX_HOSTS {
                    names.push(format!("block{}.{}[{}]", block, channel, h));
                }
            }
        }
        names
    }

    pub fn field_name(&self, index: usize) -> Option<String> {
        self.field_names().into_iter().nth(index)
    }

    /// CRC32 over version, kind, flags and cardinalities
    pub fn layout_hash(&self) -> u32 {
        let mut hasher = Hasher::new();
        hasher.update(&[LAYOUT_VERSION]);
        hasher.update(self.kind.as_str().as_bytes());
        hasher.update(&[self.analyze as u8, self.decoys as u8]);
        hasher.update(&self.cardinalities());
        hasher.finalize()
    }
}

// ============================================================================
// LAYOUT VALIDATION
// ============================================================================

/// Error when a vector was produced under a different layout
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Observation layout mismatch: expected v{expected_version} (hash: {expected_hash:08x}), got v{actual_version} (hash: {actual_hash:08x})")]
pub struct LayoutMismatchError {
    pub expected_version: u8,
    pub expected_hash: u32,
    pub actual_version: u8,
    pub actual_hash: u32,
}

/// Validate that incoming data matches `schema`
pub fn validate_layout(
    schema: &ObservationSchema,
    incoming_version: u8,
    incoming_hash: u32,
) -> Result<(), LayoutMismatchError> {
    let current_hash = schema.layout_hash();

    if incoming_version != LAYOUT_VERSION || incoming_hash != current_hash {
        return Err(LayoutMismatchError {
            expected_version: LAYOUT_VERSION,
            expected_hash: current_hash,
            actual_version: incoming_version,
            actual_hash: incoming_hash,
        });
    }

    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
