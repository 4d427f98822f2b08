//! GameCube DSP ADPCM stream header (.dsp)
//!
//! Standard Nintendo DSP header. Big-endian, fixed 96 bytes, no magic.
//!
//! # Layout
//! ```text
//! 0x00: sample_count u32
//! 0x04: nibble_count u32
//! 0x08: sample_rate u32
//! 0x0C: loop_flag u16
//! 0x0E: format u16 (0 = ADPCM)
//! 0x10: loop_start_offset u32
//! 0x14: loop_end_offset u32
//! 0x18: initial_offset u32
//! 0x1C: coefficients [i16; 16]
//! 0x3C: gain i16
//! 0x3E: initial_predictor_scale i16
//! 0x40: initial_history_1 i16
//! 0x42: initial_history_2 i16
//! 0x44: loop_predictor_scale i16
//! 0x46: loop_history_1 i16
//! 0x48: loop_history_2 i16
//! 0x4A: reserved (22 bytes)
//! 0x60: ADPCM payload
//! ```
//!
//! Decoding is purely structural. Field values are never checked.

use std::io::{Cursor, Read};

use crate::error::ConvertError;

/// Number of ADPCM predictor coefficients (8 pairs)
pub const DSP_COEF_COUNT: usize = 16;

/// Offset of the reserved tail padding
const DSP_PADDING_OFFSET: usize = 0x4A;

/// DSP header (96 bytes)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DspHeader {
    pub sample_count: u32,
    pub nibble_count: u32,
    pub sample_rate: u32,
    pub loop_flag: u16,
    pub format: u16,
    pub loop_start_offset: u32,
    pub loop_end_offset: u32,
    pub initial_offset: u32,
    pub coefficients: [i16; DSP_COEF_COUNT],
    pub gain: i16,
    pub initial_predictor_scale: i16,
    pub initial_history_1: i16,
    pub initial_history_2: i16,
    pub loop_predictor_scale: i16,
    pub loop_history_1: i16,
    pub loop_history_2: i16,
}

impl DspHeader {
    pub const SIZE: usize = 0x60;

    /// Create a header carrying only the fields the bank encoder reads
    pub fn new(sample_count: u32, sample_rate: u32, loop_flag: u16) -> Self {
        Self {
            sample_count,
            sample_rate,
            loop_flag,
            ..Self::default()
        }
    }

    /// Any non-zero loop flag counts as looped
    pub fn is_looped(&self) -> bool {
        self.loop_flag != 0
    }

    /// Read header from bytes
    ///
    /// The slice must be exactly [`DspHeader::SIZE`] bytes long.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConvertError> {
        if bytes.len() != Self::SIZE {
            return Err(ConvertError::MalformedHeader {
                expected_len: Self::SIZE,
                actual_len: bytes.len(),
            });
        }

        let mut cursor = Cursor::new(bytes);

        let sample_count = read_u32(&mut cursor)?;
        let nibble_count = read_u32(&mut cursor)?;
        let sample_rate = read_u32(&mut cursor)?;
        let loop_flag = read_u16(&mut cursor)?;
        let format = read_u16(&mut cursor)?;
        let loop_start_offset = read_u32(&mut cursor)?;
        let loop_end_offset = read_u32(&mut cursor)?;
        let initial_offset = read_u32(&mut cursor)?;

        let mut coefficients = [0i16; DSP_COEF_COUNT];
        for coef in coefficients.iter_mut() {
            *coef = read_i16(&mut cursor)?;
        }

        let header = Self {
            sample_count,
            nibble_count,
            sample_rate,
            loop_flag,
            format,
            loop_start_offset,
            loop_end_offset,
            initial_offset,
            coefficients,
            gain: read_i16(&mut cursor)?,
            initial_predictor_scale: read_i16(&mut cursor)?,
            initial_history_1: read_i16(&mut cursor)?,
            initial_history_2: read_i16(&mut cursor)?,
            loop_predictor_scale: read_i16(&mut cursor)?,
            loop_history_1: read_i16(&mut cursor)?,
            loop_history_2: read_i16(&mut cursor)?,
        };

        // Reserved tail
        let mut padding = [0u8; Self::SIZE - DSP_PADDING_OFFSET];
        cursor.read_exact(&mut padding).map_err(|_| eof(bytes))?;
        debug_assert_eq!(cursor.position() as usize, Self::SIZE);

        tracing::debug!(
            sample_count = header.sample_count,
            sample_rate = header.sample_rate,
            loop_flag = header.loop_flag,
            format = header.format,
            "decoded DSP header"
        );

        Ok(header)
    }

    /// Write header to bytes (reserved tail is zeroed)
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0x00..0x04].copy_from_slice(&self.sample_count.to_be_bytes());
        bytes[0x04..0x08].copy_from_slice(&self.nibble_count.to_be_bytes());
        bytes[0x08..0x0C].copy_from_slice(&self.sample_rate.to_be_bytes());
        bytes[0x0C..0x0E].copy_from_slice(&self.loop_flag.to_be_bytes());
        bytes[0x0E..0x10].copy_from_slice(&self.format.to_be_bytes());
        bytes[0x10..0x14].copy_from_slice(&self.loop_start_offset.to_be_bytes());
        bytes[0x14..0x18].copy_from_slice(&self.loop_end_offset.to_be_bytes());
        bytes[0x18..0x1C].copy_from_slice(&self.initial_offset.to_be_bytes());

        for (i, coef) in self.coefficients.iter().enumerate() {
            let at = 0x1C + i * 2;
            bytes[at..at + 2].copy_from_slice(&coef.to_be_bytes());
        }

        let tail = [
            self.gain,
            self.initial_predictor_scale,
            self.initial_history_1,
            self.initial_history_2,
            self.loop_predictor_scale,
            self.loop_history_1,
            self.loop_history_2,
        ];
        for (i, value) in tail.iter().enumerate() {
            let at = 0x3C + i * 2;
            bytes[at..at + 2].copy_from_slice(&value.to_be_bytes());
        }

        bytes
    }
}

/// Decode a DSP header block
pub fn decode_header(bytes: &[u8]) -> Result<DspHeader, ConvertError> {
    DspHeader::from_bytes(bytes)
}

fn eof(bytes: &[u8]) -> ConvertError {
    ConvertError::MalformedHeader {
        expected_len: DspHeader::SIZE,
        actual_len: bytes.len(),
    }
}

fn read_u16(cursor: &mut Cursor<&[u8]>) -> Result<u16, ConvertError> {
    let mut buf = [0u8; 2];
    cursor
        .read_exact(&mut buf)
        .map_err(|_| eof(cursor.get_ref()))?;
    Ok(u16::from_be_bytes(buf))
}

fn read_i16(cursor: &mut Cursor<&[u8]>) -> Result<i16, ConvertError> {
    read_u16(cursor).map(|v| v as i16)
}

fn read_u32(cursor: &mut Cursor<&[u8]>) -> Result<u32, ConvertError> {
    let mut buf = [0u8; 4];
    cursor
        .read_exact(&mut buf)
        .map_err(|_| eof(cursor.get_ref()))?;
    Ok(u32::from_be_bytes(buf))
}
