//! DSP → FSB5 conversion pipeline
//!
//! Decode the 96-byte DSP header, encode the FSB5 header block, then append
//! the ADPCM payload untouched. Nothing is produced unless both steps succeed.

use crate::config::Fsb5Config;
use crate::dsp::DspHeader;
use crate::error::ConvertError;
use crate::fsb5::encode_header;

/// Convert a complete DSP file image with the default config
pub fn convert(source: &[u8]) -> Result<Vec<u8>, ConvertError> {
    convert_with(source, &Fsb5Config::default())
}

/// Convert a complete DSP file image
pub fn convert_with(source: &[u8], config: &Fsb5Config) -> Result<Vec<u8>, ConvertError> {
    if source.len() < DspHeader::SIZE {
        return Err(ConvertError::MalformedHeader {
            expected_len: DspHeader::SIZE,
            actual_len: source.len(),
        });
    }
    let (header_bytes, payload) = source.split_at(DspHeader::SIZE);
    convert_parts(header_bytes, payload, config)
}

/// Convert an already split header block and payload
pub fn convert_parts(
    header_bytes: &[u8],
    payload: &[u8],
    config: &Fsb5Config,
) -> Result<Vec<u8>, ConvertError> {
    let header = DspHeader::from_bytes(header_bytes)?;
    let target_header = encode_header(&header, payload.len() as u64, config)?;

    let mut out = Vec::with_capacity(target_header.len() + payload.len());
    out.extend_from_slice(&target_header);
    out.extend_from_slice(payload);
    Ok(out)
}
