//! FSB5 sound bank headers
//!
//! Single-stream bank, little-endian throughout.
//!
//! # Layout
//! ```text
//! 0x00: magic "FSB5"
//! 0x04: version u32
//! 0x08: stream_count u32 (always 1)
//! 0x0C: descriptor_size u32
//! 0x10: name_table_size u32
//! 0x14: payload_size u32
//! 0x18: codec u32
//! 0x1C: reserved (32 bytes)
//! 0x3C: name table (name_table_size bytes, optional)
//! ....: stream descriptor (descriptor_size bytes)
//! ....: payload
//! ```
//!
//! # Stream descriptor
//! ```text
//! 0x00: sample mode u64 (see `mode`)
//! 0x08: reserved (descriptor_size - 8 bytes)
//! ```

use crate::config::Fsb5Config;
use crate::dsp::DspHeader;
use crate::error::ConvertError;
use crate::mode::SampleMode;
use crate::{FSB5_MAGIC, STREAM_DESCRIPTOR_MIN_SIZE};

/// FSB5 bank header (60 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fsb5BankHeader {
    pub version: u32,
    pub stream_count: u32,
    pub descriptor_size: u32,
    pub name_table_size: u32,
    pub payload_size: u32,
    pub codec: u32,
}

impl Fsb5BankHeader {
    pub const SIZE: usize = 0x3C;

    /// Single-stream bank header for the given config
    pub fn new(config: &Fsb5Config, payload_size: u32) -> Self {
        Self {
            version: config.version,
            stream_count: 1,
            descriptor_size: config.descriptor_size,
            name_table_size: config.name_table_size(),
            payload_size,
            codec: config.codec,
        }
    }

    /// Offset of the payload from the start of the bank
    pub fn payload_offset(&self) -> usize {
        Self::SIZE
            + self.name_table_size as usize
            + self.descriptor_size as usize * self.stream_count as usize
    }

    /// Write header to bytes
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0x00..0x04].copy_from_slice(FSB5_MAGIC);
        bytes[0x04..0x08].copy_from_slice(&self.version.to_le_bytes());
        bytes[0x08..0x0C].copy_from_slice(&self.stream_count.to_le_bytes());
        bytes[0x0C..0x10].copy_from_slice(&self.descriptor_size.to_le_bytes());
        bytes[0x10..0x14].copy_from_slice(&self.name_table_size.to_le_bytes());
        bytes[0x14..0x18].copy_from_slice(&self.payload_size.to_le_bytes());
        bytes[0x18..0x1C].copy_from_slice(&self.codec.to_le_bytes());
        // Reserved bytes stay 0
        bytes
    }

    /// Read header from bytes
    ///
    /// Returns `None` on a short slice or a wrong magic.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < Self::SIZE || bytes[0x00..0x04] != FSB5_MAGIC[..] {
            return None;
        }
        let u32_at = |at: usize| {
            u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
        };
        Some(Self {
            version: u32_at(0x04),
            stream_count: u32_at(0x08),
            descriptor_size: u32_at(0x0C),
            name_table_size: u32_at(0x10),
            payload_size: u32_at(0x14),
            codec: u32_at(0x18),
        })
    }
}

/// Per-stream descriptor: packed mode word plus zero trailer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamDescriptor {
    pub mode: u64,
    pub size: usize,
}

impl StreamDescriptor {
    /// Build the descriptor for a DSP stream
    pub fn from_dsp(header: &DspHeader, config: &Fsb5Config) -> Result<Self, ConvertError> {
        let mode = SampleMode {
            sample_count: header.sample_count,
            data_offset: 0,
            channel_code: config.channel_code,
            sample_rate: header.sample_rate,
            looped: header.is_looped(),
        }
        .pack(config.bit_policy)?;

        Ok(Self {
            mode,
            size: (config.descriptor_size as usize).max(STREAM_DESCRIPTOR_MIN_SIZE),
        })
    }

    /// Append the descriptor to `out`
    pub fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.mode.to_le_bytes());
        out.resize(out.len() + self.size - 8, 0);
    }
}

/// Append a null-padded name slot to `out`
fn write_name_table(out: &mut Vec<u8>, name: &str, slot_size: usize) {
    out.extend_from_slice(name.as_bytes());
    out.resize(out.len() + slot_size - name.len(), 0);
}

/// Encode the complete FSB5 header block for a DSP stream
///
/// Returns bank header, optional name table and stream descriptor, ready
/// to be followed by `payload_size` bytes of ADPCM data.
pub fn encode_header(
    header: &DspHeader,
    payload_size: u64,
    config: &Fsb5Config,
) -> Result<Vec<u8>, ConvertError> {
    config.validate()?;

    let payload_size = u32::try_from(payload_size).map_err(|_| ConvertError::FieldOverflow {
        field: "payload_size",
        value: payload_size,
        max_bits: 32,
    })?;

    let bank = Fsb5BankHeader::new(config, payload_size);
    let descriptor = StreamDescriptor::from_dsp(header, config)?;

    let mut out = Vec::with_capacity(bank.payload_offset());
    out.extend_from_slice(&bank.to_bytes());
    if let Some(name) = &config.stream_name {
        write_name_table(&mut out, name, config.name_slot_size as usize);
    }
    descriptor.write_to(&mut out);

    debug_assert_eq!(out.len(), bank.payload_offset());
    tracing::debug!(
        payload_size,
        header_size = out.len(),
        mode = descriptor.mode,
        "encoded FSB5 header"
    );

    Ok(out)
}
