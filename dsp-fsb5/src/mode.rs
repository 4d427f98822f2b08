//! FSB5 sample mode word packing
//!
//! Each FSB5 stream descriptor starts with a 64-bit little-endian word.
//!
//! ```text
//! bit  0      : loop flag
//! bits 1..    : sample rate (raw Hz, spills over bits 5..=33)
//! bits 5..=6  : channel code (1 = mono)
//! bits 7..=33 : data offset (0 = payload follows the headers)
//! bits 34..=63: sample count
//! ```
//!
//! The bank loader reads this word bit-for-bit. A value that leaks into a
//! neighbouring range produces a file that loads with the wrong sample
//! count, rate or channel layout instead of failing.

use serde::Deserialize;

use crate::error::ConvertError;

pub const LOOP_SHIFT: u32 = 0;
pub const SAMPLE_RATE_SHIFT: u32 = 1;
pub const CHANNEL_SHIFT: u32 = 5;
pub const DATA_OFFSET_SHIFT: u32 = 7;
pub const SAMPLE_COUNT_SHIFT: u32 = 34;

pub const CHANNEL_BITS: u32 = 2;
pub const DATA_OFFSET_BITS: u32 = 27;
pub const SAMPLE_COUNT_BITS: u32 = 30;

/// Width of the low sample rate range before the channel code
const SAMPLE_RATE_LOW_BITS: u32 = 4;

/// How values wider than their bit range are handled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BitFieldPolicy {
    /// Shift and OR in 64-bit arithmetic; high bits fall off silently
    #[default]
    Compatible,
    /// Reject any value that does not fit its range, and any sample rate
    /// whose shifted bits land in the channel code
    Strict,
}

/// Unpacked sample mode fields
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SampleMode {
    pub sample_count: u32,
    pub data_offset: u32,
    pub channel_code: u8,
    pub sample_rate: u32,
    pub looped: bool,
}

impl SampleMode {
    /// Pack into the 64-bit mode word
    pub fn pack(&self, policy: BitFieldPolicy) -> Result<u64, ConvertError> {
        if policy == BitFieldPolicy::Strict {
            check_width("sample_count", self.sample_count as u64, SAMPLE_COUNT_BITS)?;
            check_width("data_offset", self.data_offset as u64, DATA_OFFSET_BITS)?;
            check_width("channel_code", self.channel_code as u64, CHANNEL_BITS)?;
            check_rate(self.sample_rate)?;
        }

        let word = ((self.sample_count as u64) << SAMPLE_COUNT_SHIFT)
            | ((self.data_offset as u64) << DATA_OFFSET_SHIFT)
            | ((self.channel_code as u64) << CHANNEL_SHIFT)
            | ((self.sample_rate as u64) << SAMPLE_RATE_SHIFT)
            | ((self.looped as u64) << LOOP_SHIFT);

        Ok(word)
    }

    /// Read the masked ranges back out of a mode word
    ///
    /// The sample rate overlaps the other ranges, so only its low
    /// 4 bits can be recovered.
    pub fn unpack(word: u64) -> Self {
        Self {
            sample_count: field(word, SAMPLE_COUNT_SHIFT, SAMPLE_COUNT_BITS) as u32,
            data_offset: field(word, DATA_OFFSET_SHIFT, DATA_OFFSET_BITS) as u32,
            channel_code: field(word, CHANNEL_SHIFT, CHANNEL_BITS) as u8,
            sample_rate: field(word, SAMPLE_RATE_SHIFT, SAMPLE_RATE_LOW_BITS) as u32,
            looped: field(word, LOOP_SHIFT, 1) != 0,
        }
    }
}

#[inline]
fn mask(bits: u32) -> u64 {
    (1u64 << bits) - 1
}

#[inline]
fn field(word: u64, shift: u32, bits: u32) -> u64 {
    (word >> shift) & mask(bits)
}

fn check_width(field: &'static str, value: u64, max_bits: u32) -> Result<(), ConvertError> {
    if value > mask(max_bits) {
        return Err(ConvertError::FieldOverflow {
            field,
            value,
            max_bits,
        });
    }
    Ok(())
}

/// The raw rate shares bits 5..=6 with the channel code
fn check_rate(sample_rate: u32) -> Result<(), ConvertError> {
    let shifted = (sample_rate as u64) << SAMPLE_RATE_SHIFT;
    if field(shifted, CHANNEL_SHIFT, CHANNEL_BITS) != 0 {
        return Err(ConvertError::FieldOverflow {
            field: "sample_rate",
            value: sample_rate as u64,
            max_bits: CHANNEL_SHIFT - SAMPLE_RATE_SHIFT,
        });
    }
    Ok(())
}
