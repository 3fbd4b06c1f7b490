//! Comm Message - 1-byte inter-agent signal
//!
//! ## Bit layout (index = position in the 8-element wire array)
//! - 0..=4: zone i launched malicious activity against us
//! - 5: high bit of our `CompromiseLevel`
//! - 6: low bit of our `CompromiseLevel`
//! - 7: we are waiting on a multi-step action

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::constants::{MESSAGE_LENGTH, NUM_ZONES};
use crate::logic::threat::CompromiseLevel;

pub const LEVEL_HIGH_BIT: usize = 5;
pub const LEVEL_LOW_BIT: usize = 6;
pub const WAITING_BIT: usize = 7;

/// One zone's broadcast for one step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CommMessage(u8);

impl CommMessage {
    /// All bits clear
    pub const EMPTY: CommMessage = CommMessage(0);

    pub fn from_byte(byte: u8) -> Self {
        Self(byte)
    }

    /// Packed form; bit i of the byte is wire index i
    pub fn as_byte(&self) -> u8 {
        self.0
    }

    pub fn bit(&self, index: usize) -> bool {
        index < MESSAGE_LENGTH && self.0 & (1 << index) != 0
    }

    pub fn set_bit(&mut self, index: usize, value: bool) {
        if index >= MESSAGE_LENGTH {
            return;
        }
        if value {
            self.0 |= 1 << index;
        } else {
            self.0 &= !(1 << index);
        }
    }

    /// Alarm raised against zone `zone`
    pub fn alarm(&self, zone: usize) -> bool {
        zone < NUM_ZONES && self.bit(zone)
    }

    pub fn set_alarm(&mut self, zone: usize) {
        if zone < NUM_ZONES {
            self.set_bit(zone, true);
        }
    }

    pub fn level(&self) -> CompromiseLevel {
        let high = self.bit(LEVEL_HIGH_BIT) as u8;
        let low = self.bit(LEVEL_LOW_BIT) as u8;
        CompromiseLevel::from_bits((high << 1) | low)
    }

    pub fn set_level(&mut self, level: CompromiseLevel) {
        let value = level.as_u8();
        self.set_bit(LEVEL_HIGH_BIT, value & 0b10 != 0);
        self.set_bit(LEVEL_LOW_BIT, value & 0b01 != 0);
    }

    pub fn waiting(&self) -> bool {
        self.bit(WAITING_BIT)
    }

    pub fn set_waiting(&mut self, waiting: bool) {
        self.set_bit(WAITING_BIT, waiting);
    }

    /// Wire form: 8 values in {0, 1}
    pub fn to_bits(&self) -> [u8; MESSAGE_LENGTH] {
        let mut bits = [0u8; MESSAGE_LENGTH];
        for (i, bit) in bits.iter_mut().enumerate() {
            *bit = self.bit(i) as u8;
        }
        bits
    }

    pub fn from_bits(bits: &[bool; MESSAGE_LENGTH]) -> Self {
        let mut message = Self::EMPTY;
        for (i, bit) in bits.iter().enumerate() {
            message.set_bit(i, *bit);
        }
        message
    }
}

impl Serialize for CommMessage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_bits().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for CommMessage {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Vec::<Value>::deserialize(deserializer)?;
        if raw.len() != MESSAGE_LENGTH {
            return Err(D::Error::invalid_length(raw.len(), &"8 message bits"));
        }

        let mut bits = [false; MESSAGE_LENGTH];
        for (bit, value) in bits.iter_mut().zip(raw) {
            *bit = match value {
                Value::Bool(b) => b,
                Value::Number(n) => n.as_f64().map_or(false, |v| v != 0.0),
                other => return Err(D::Error::custom(format!("invalid message bit: {}", other))),
            };
        }
        Ok(Self::from_bits(&bits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_round_trip() {
        for level in [
            CompromiseLevel::Clean,
            CompromiseLevel::ScanOrExploit,
            CompromiseLevel::UserCompromise,
            CompromiseLevel::AdminCompromise,
        ] {
            let mut message = CommMessage::EMPTY;
            message.set_level(level);
            assert_eq!(message.level(), level);
        }
    }

    #[test]
    fn test_level_bit_positions() {
        let mut message = CommMessage::EMPTY;
        message.set_level(CompromiseLevel::UserCompromise);
        assert_eq!(message.to_bits(), [0, 0, 0, 0, 0, 1, 0, 0]);

        message.set_level(CompromiseLevel::ScanOrExploit);
        assert_eq!(message.to_bits(), [0, 0, 0, 0, 0, 0, 1, 0]);
    }

    #[test]
    fn test_alarm_ignores_invalid_zone() {
        let mut message = CommMessage::EMPTY;
        message.set_alarm(5);
        message.set_alarm(42);
        assert_eq!(message, CommMessage::EMPTY);

        message.set_alarm(4);
        assert!(message.alarm(4));
        assert_eq!(message.as_byte(), 0b1_0000);
        assert!(message.level().is_clean());
    }

    #[test]
    fn test_wire_accepts_bools_and_ints() {
        let from_ints: CommMessage = serde_json::from_str("[1,0,0,0,0,1,1,1]").unwrap();
        let from_bools: CommMessage =
            serde_json::from_str("[true,false,false,false,false,true,true,true]").unwrap();

        assert_eq!(from_ints, from_bools);
        assert!(from_ints.alarm(0));
        assert!(from_ints.waiting());
        assert_eq!(from_ints.level(), CompromiseLevel::AdminCompromise);
        assert_eq!(serde_json::to_string(&from_ints).unwrap(), "[1,0,0,0,0,1,1,1]");
    }

    #[test]
    fn test_wire_rejects_wrong_length() {
        assert!(serde_json::from_str::<CommMessage>("[1,0,1]").is_err());
    }
}
