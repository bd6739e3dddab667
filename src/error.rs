use alloc::string::String;
use enough::StopReason;

/// Errors from PNM/PAM decoding.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AnymapError {
    #[error("invalid magic bytes, expected 'P' followed by a digit 1-7")]
    InvalidMagic,

    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("invalid byte 0x{0:02x} in integer token")]
    MalformedInteger(u8),

    #[error("integer token does not fit in 32 bits")]
    IntegerOverflow,

    #[error("{field} must be at least 1")]
    InvalidDimension { field: &'static str },

    #[error("{field} must be between {min} and {max}, got {value}")]
    InvalidRange {
        field: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },

    #[error("sample value {value} exceeds declared maxval {maxval}")]
    RangeExceeded { value: u32, maxval: u32 },

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("operation cancelled")]
    Cancelled(StopReason),

    /// File could not be opened or read.
    #[cfg(feature = "std")]
    #[error("failed to read file: {0}")]
    Io(std::io::Error),
}

impl From<StopReason> for AnymapError {
    fn from(r: StopReason) -> Self {
        AnymapError::Cancelled(r)
    }
}
