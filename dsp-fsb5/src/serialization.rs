//! Shared byte-level interface for the DSP and FSB5 header structs.
//!
//! `inspect` uses it to cut and decode whichever header a file starts with.

use crate::dsp::DspHeader;
use crate::fsb5::Fsb5BankHeader;

/// A header with a fixed on-disk width.
pub trait BinarySerializable: Sized {
    /// On-disk width in bytes.
    const SIZE: usize;

    fn serialize(&self) -> Vec<u8>;

    /// `None` when `bytes` does not hold a valid header.
    fn deserialize(bytes: &[u8]) -> Option<Self>;
}

impl BinarySerializable for DspHeader {
    const SIZE: usize = Self::SIZE;

    fn serialize(&self) -> Vec<u8> {
        self.to_bytes().to_vec()
    }

    fn deserialize(bytes: &[u8]) -> Option<Self> {
        Self::from_bytes(bytes).ok()
    }
}

impl BinarySerializable for Fsb5BankHeader {
    const SIZE: usize = Self::SIZE;

    fn serialize(&self) -> Vec<u8> {
        self.to_bytes().to_vec()
    }

    fn deserialize(bytes: &[u8]) -> Option<Self> {
        Self::from_bytes(bytes)
    }
}
