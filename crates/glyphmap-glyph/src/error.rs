use crate::glyph::GLYPH_RECORD_SIZE;

/// Errors raised at the boundary of the glyph codec.
///
/// These are caller mistakes and are never retried.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GlyphError {
    /// Character input was missing or does not describe a storable character.
    #[error("invalid character: {reason}")]
    InvalidCharacter { reason: &'static str },

    /// Color input has a shape the codec does not understand.
    #[error("unsupported color input type: {found}")]
    InvalidColorType { found: &'static str },

    /// Color string could not be parsed.
    #[error("could not parse color string {input:?}")]
    InvalidColorString { input: String },

    /// Glyph buffer is empty or not made of whole records.
    #[error("glyph buffer length {len} is not a positive multiple of {}", GLYPH_RECORD_SIZE)]
    InvalidBufferLength { len: usize },

    /// Record offset is unaligned or runs past the end of the buffer.
    #[error("glyph record offset {offset} is unaligned or out of range for a {len}-byte buffer")]
    InvalidOffset { offset: usize, len: usize },

    /// Hex string does not have a length the decoder can split into units.
    #[error("hex string has length {len}, expected a positive multiple of {expected}")]
    InvalidHexLength { len: usize, expected: usize },

    /// Hex string contains something other than hex digits.
    #[error("invalid hex string: {0}")]
    InvalidHexDigit(#[from] hex::FromHexError),
}

/// Result type for glyph codec operations.
pub type GlyphResult<T> = Result<T, GlyphError>;
