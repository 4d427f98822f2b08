//! FSB5 encoder configuration
//!
//! Every fixed value the encoder writes lives here. `Fsb5Config::default()`
//! produces banks the GameCube ADPCM loader accepts as-is.
//!
//! Loadable from TOML (all keys optional):
//!
//! ```toml
//! version = 1
//! codec = 6
//! channel_code = 1
//! descriptor_size = 12
//! name_slot_size = 32
//! stream_name = "bgm_title"
//! bit_policy = "strict"
//! ```

use serde::Deserialize;

use crate::error::ConvertError;
use crate::mode::BitFieldPolicy;
use crate::{FSB5_CODEC_GCADPCM, FSB5_VERSION, STREAM_DESCRIPTOR_MIN_SIZE};

/// Default width of the name table slot
pub const DEFAULT_NAME_SLOT_SIZE: u32 = 0x20;

/// Channel code the loader reads as mono
pub const CHANNEL_CODE_MONO: u8 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Fsb5Config {
    /// Bank format version
    pub version: u32,
    /// Codec id written into the bank header
    pub codec: u32,
    /// Channel code packed into the sample mode word
    pub channel_code: u8,
    /// Declared stream descriptor size (mode word + zero trailer)
    pub descriptor_size: u32,
    /// Width of the name table slot when `stream_name` is set
    pub name_slot_size: u32,
    /// Optional stream name. No name table is written without one.
    pub stream_name: Option<String>,
    /// Overflow handling for the sample mode word
    pub bit_policy: BitFieldPolicy,
}

impl Default for Fsb5Config {
    fn default() -> Self {
        Self {
            version: FSB5_VERSION,
            codec: FSB5_CODEC_GCADPCM,
            channel_code: CHANNEL_CODE_MONO,
            descriptor_size: STREAM_DESCRIPTOR_MIN_SIZE as u32,
            name_slot_size: DEFAULT_NAME_SLOT_SIZE,
            stream_name: None,
            bit_policy: BitFieldPolicy::Compatible,
        }
    }
}

impl Fsb5Config {
    /// Set the stream name (builder style)
    pub fn with_stream_name(mut self, name: impl Into<String>) -> Self {
        self.stream_name = Some(name.into());
        self
    }

    /// Set the overflow policy (builder style)
    pub fn with_bit_policy(mut self, policy: BitFieldPolicy) -> Self {
        self.bit_policy = policy;
        self
    }

    /// Size of the name table this config produces
    pub fn name_table_size(&self) -> u32 {
        if self.stream_name.is_some() {
            self.name_slot_size
        } else {
            0
        }
    }

    /// Check the config describes a layout the encoder can emit
    pub fn validate(&self) -> Result<(), ConvertError> {
        if (self.descriptor_size as usize) < STREAM_DESCRIPTOR_MIN_SIZE {
            return Err(ConvertError::InvalidConfig(format!(
                "descriptor_size {} is below the minimum of {}",
                self.descriptor_size, STREAM_DESCRIPTOR_MIN_SIZE
            )));
        }

        if let Some(name) = &self.stream_name {
            if self.name_slot_size == 0 {
                return Err(ConvertError::InvalidConfig(
                    "name_slot_size must be non-zero when stream_name is set".to_string(),
                ));
            }
            // One byte stays free for the terminator
            let max = self.name_slot_size as usize - 1;
            if name.len() > max {
                return Err(ConvertError::NameTooLong {
                    len: name.len(),
                    max,
                });
            }
        }

        Ok(())
    }
}
