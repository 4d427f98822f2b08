//! Conversion error types

/// Errors that can occur while transcoding a DSP header into an FSB5 bank
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConvertError {
    /// Source header block is not exactly the DSP header size
    #[error("malformed DSP header: {actual_len} bytes (expected {expected_len})")]
    MalformedHeader {
        expected_len: usize,
        actual_len: usize,
    },

    /// A value does not fit the field it is written into
    #[error("{field} value {value} does not fit in {max_bits} bits")]
    FieldOverflow {
        field: &'static str,
        value: u64,
        max_bits: u32,
    },

    /// Stream name does not fit the name table slot
    #[error("stream name is {len} bytes (max {max})")]
    NameTooLong { len: usize, max: usize },

    /// Encoder configuration is inconsistent
    #[error("invalid encoder config: {0}")]
    InvalidConfig(String),
}
