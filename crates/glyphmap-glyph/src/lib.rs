//! Glyphmap Glyph - the glyph codec
//!
//! Turns loosely-typed character and color inputs into canonical [`Glyph`]
//! values, and glyphs into fixed 10-byte records that can be concatenated
//! into per-cell stacks and hashed into cache keys.
//!
//! ```
//! use glyphmap_glyph::{GlyphLike, decode_glyph_stack, encode_glyph_stack};
//!
//! let glyph = GlyphLike::new('@', "gold").bg("#000").normalize().unwrap();
//! let bytes = encode_glyph_stack(&[glyph]).unwrap();
//! assert_eq!(bytes.len(), 10);
//! assert_eq!(decode_glyph_stack(&bytes).unwrap(), vec![glyph]);
//! ```

pub mod character;
pub mod color;
pub mod error;
pub mod glyph;
pub mod hex_key;
mod named;

pub use character::{CharacterInput, character_to_hex, hex_to_character, normalize_character};
pub use color::{ColorInput, PartialRgba, Rgba8, normalize_color};
pub use error::{GlyphError, GlyphResult};
pub use glyph::{
    GLYPH_RECORD_SIZE, Glyph, GlyphLike, GlyphRecord, decode_glyph, decode_glyph_stack,
    encode_glyph, encode_glyph_stack, glyph_count, glyph_records, normalize_glyphs,
    validate_glyph_buffer, write_glyph,
};
pub use hex_key::{buffer_to_hex, hex_to_buffer};
