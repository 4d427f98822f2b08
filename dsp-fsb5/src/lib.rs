//! dsp-fsb5: GameCube DSP ADPCM → FSB5 sound bank transcoder
//!
//! Rewraps a single-channel Nintendo DSP stream in a single-stream FSB5
//! bank. **Only the header is transcoded** - the ADPCM payload is copied
//! byte-for-byte, never decoded.
//!
//! # Header Mapping
//!
//! | FSB5 field | Source |
//! |------------|--------|
//! | magic / version / stream count | fixed (`"FSB5"`, config, 1) |
//! | descriptor size / name table size | config |
//! | payload size | length of the DSP payload |
//! | codec | config (6 = GameCube ADPCM) |
//! | mode word: sample count | DSP `sample_count` |
//! | mode word: sample rate | DSP `sample_rate` |
//! | mode word: loop bit | DSP `loop_flag != 0` |
//! | mode word: channels | config (mono) |
//! | mode word: data offset | 0 |
//!
//! Coefficients, predictor state and loop offsets are read but not carried
//! over.
//!
//! # Usage
//!
//! ```
//! use dsp_fsb5::{DspHeader, Fsb5BankHeader, convert};
//!
//! let mut dsp = DspHeader::new(1000, 44100, 0).to_bytes().to_vec();
//! dsp.extend_from_slice(&[0xAA; 16]);
//!
//! let fsb = convert(&dsp).unwrap();
//! let bank = Fsb5BankHeader::from_bytes(&fsb).unwrap();
//! assert_eq!(bank.payload_size, 16);
//! assert_eq!(&fsb[bank.payload_offset()..], &[0xAAu8; 16]);
//! ```

mod config;
mod convert;
mod dsp;
mod error;
mod fsb5;
mod mode;
mod serialization;

pub use config::{CHANNEL_CODE_MONO, DEFAULT_NAME_SLOT_SIZE, Fsb5Config};
pub use convert::{convert, convert_parts, convert_with};
pub use dsp::{DSP_COEF_COUNT, DspHeader, decode_header};
pub use error::ConvertError;
pub use fsb5::{Fsb5BankHeader, StreamDescriptor, encode_header};
pub use mode::{BitFieldPolicy, SampleMode};
pub use serialization::BinarySerializable;

// =============================================================================
// Constants
// =============================================================================

/// FSB5 bank magic
pub const FSB5_MAGIC: &[u8; 4] = b"FSB5";

/// FSB5 bank format version written by default
pub const FSB5_VERSION: u32 = 1;

/// FSB5 codec id for GameCube ADPCM
pub const FSB5_CODEC_GCADPCM: u32 = 6;

/// Smallest stream descriptor: 8-byte mode word + 4-byte reserved trailer
pub const STREAM_DESCRIPTOR_MIN_SIZE: usize = 12;
