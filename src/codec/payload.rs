//! Payload parsing and big-endian bit addressing.
//!
//! Bit `i` of a payload is bit `i` of the payload read as one big-endian
//! unsigned integer, so bit 0 is the lowest bit of the last byte.

use super::{CodecError, CodecResult};
use serde::{Deserialize, Serialize};

/// Raw bytes to be encoded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payload {
    bytes: Vec<u8>,
}

impl Payload {
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    pub fn from_text(text: &str) -> Self {
        Self::from_bytes(text.as_bytes())
    }

    /// Parse a hex string or a `0b`-prefixed bit array.
    ///
    /// Whitespace and `_` separators are ignored. Odd-length hex and bit
    /// arrays that are not a multiple of 8 are left-padded with zeros.
    pub fn parse(input: &str) -> CodecResult<Self> {
        let cleaned: String = input
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_')
            .collect();

        if let Some(bits) = cleaned
            .strip_prefix("0b")
            .or_else(|| cleaned.strip_prefix("0B"))
        {
            return Self::parse_bits(bits);
        }

        let digits = cleaned
            .strip_prefix("0x")
            .or_else(|| cleaned.strip_prefix("0X"))
            .unwrap_or(&cleaned);
        let padded = if digits.len() % 2 == 1 {
            format!("0{digits}")
        } else {
            digits.to_string()
        };
        hex::decode(&padded)
            .map(Self::from_bytes)
            .map_err(|e| CodecError::payload(format!("'{input}' is not valid hex: {e}")))
    }

    fn parse_bits(bits: &str) -> CodecResult<Self> {
        if let Some(bad) = bits.chars().find(|c| *c != '0' && *c != '1') {
            return Err(CodecError::payload(format!(
                "unexpected '{bad}' in bit array"
            )));
        }
        let pad = (8 - bits.len() % 8) % 8;
        let padded: Vec<u8> = std::iter::repeat(b'0')
            .take(pad)
            .chain(bits.bytes())
            .collect();
        let bytes = padded
            .chunks(8)
            .map(|chunk| chunk.iter().fold(0u8, |acc, b| (acc << 1) | (b - b'0')))
            .collect::<Vec<u8>>();
        Ok(Self::from_bytes(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn bit_len(&self) -> usize {
        self.bytes.len() * 8
    }

    pub fn bit(&self, index: usize) -> bool {
        bit_at(&self.bytes, index)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Read bit `index` of a big-endian byte string. Out of range reads as 0.
pub fn bit_at(bytes: &[u8], index: usize) -> bool {
    let byte = index / 8;
    if byte >= bytes.len() {
        return false;
    }
    bytes[bytes.len() - 1 - byte] >> (index % 8) & 1 == 1
}

/// Set bit `index` of a big-endian byte string.
pub fn set_bit(bytes: &mut [u8], index: usize) -> CodecResult<()> {
    let byte = index / 8;
    if byte >= bytes.len() {
        return Err(CodecError::PayloadOverflow {
            bit: index,
            byte_len: bytes.len(),
        });
    }
    let pos = bytes.len() - 1 - byte;
    bytes[pos] |= 1 << (index % 8);
    Ok(())
}
