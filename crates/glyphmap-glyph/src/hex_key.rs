//! Hex forms of glyph buffers, used as the content part of texture keys.

use crate::error::{GlyphError, GlyphResult};
use crate::glyph::{GLYPH_RECORD_SIZE, validate_glyph_buffer};

/// Lowercase hex of a glyph buffer, without prefix.
pub fn buffer_to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Decode a hex string produced by [`buffer_to_hex`] back into a glyph buffer.
pub fn hex_to_buffer(hex_str: &str) -> GlyphResult<Vec<u8>> {
    let record_digits = GLYPH_RECORD_SIZE * 2;
    if hex_str.is_empty() || hex_str.len() % record_digits != 0 {
        return Err(GlyphError::InvalidHexLength {
            len: hex_str.len(),
            expected: record_digits,
        });
    }
    let bytes = hex::decode(hex_str)?;
    validate_glyph_buffer(&bytes)?;
    Ok(bytes)
}
