//! Canonical glyphs and their fixed-width byte records.
//!
//! A record is 10 bytes, multi-byte fields big-endian:
//!
//! | bytes | field |
//! |-------|-------|
//! | 0..2  | UTF-16 code unit of the character |
//! | 2..6  | foreground `R, G, B, A` |
//! | 6..10 | background `R, G, B, A` |
//!
//! A stack of glyphs is its records concatenated in paint order.

use std::fmt;

use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::Deserialize;
use static_assertions::assert_eq_size;

use crate::character::{CharacterInput, normalize_character};
use crate::color::{ColorInput, Rgba8, normalize_color};
use crate::error::{GlyphError, GlyphResult};

/// Size in bytes of one encoded glyph.
pub const GLYPH_RECORD_SIZE: usize = 10;

/// A character with a foreground and background color.
///
/// The character always fits in a single UTF-16 code unit, which is what
/// lets every glyph survive a round trip through its 10-byte record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Glyph {
    ch: char,
    fg: Rgba8,
    bg: Rgba8,
}

impl Glyph {
    /// Build a glyph, rejecting characters outside the Basic Multilingual Plane.
    pub fn new(ch: char, fg: Rgba8, bg: Rgba8) -> GlyphResult<Self> {
        if ch.len_utf16() != 1 {
            return Err(GlyphError::InvalidCharacter {
                reason: "outside the Basic Multilingual Plane",
            });
        }
        Ok(Self { ch, fg, bg })
    }

    /// Glyph with the default transparent background.
    pub fn with_fg(ch: char, fg: Rgba8) -> GlyphResult<Self> {
        Self::new(ch, fg, Rgba8::TRANSPARENT)
    }

    pub fn ch(&self) -> char {
        self.ch
    }

    pub fn code_point(&self) -> u32 {
        self.ch as u32
    }

    pub fn fg(&self) -> Rgba8 {
        self.fg
    }

    pub fn bg(&self) -> Rgba8 {
        self.bg
    }

    /// Encode into a standalone record.
    pub fn to_record(&self) -> GlyphRecord {
        GlyphRecord {
            ch: (self.ch as u16).to_be_bytes(),
            fg: self.fg.to_bytes(),
            bg: self.bg.to_bytes(),
        }
    }
}

/// The on-wire layout of one glyph.
///
/// All fields are byte arrays, so the struct has alignment 1 and can be
/// viewed in place inside any byte buffer.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlyphRecord {
    pub ch: [u8; 2],
    pub fg: [u8; 4],
    pub bg: [u8; 4],
}

assert_eq_size!(GlyphRecord, [u8; GLYPH_RECORD_SIZE]);

impl GlyphRecord {
    /// Decode back into a [`Glyph`]. Fails only on a lone surrogate.
    pub fn to_glyph(&self) -> GlyphResult<Glyph> {
        let unit = u32::from(u16::from_be_bytes(self.ch));
        let ch = char::from_u32(unit).ok_or(GlyphError::InvalidCharacter {
            reason: "record holds a lone surrogate",
        })?;
        Ok(Glyph {
            ch,
            fg: Rgba8::from_bytes(self.fg),
            bg: Rgba8::from_bytes(self.bg),
        })
    }
}

/// Encode one glyph into its 10 bytes.
pub fn encode_glyph(glyph: &Glyph) -> [u8; GLYPH_RECORD_SIZE] {
    bytemuck::cast(glyph.to_record())
}

/// Decode the record starting at `offset`.
///
/// `offset` must be a multiple of [`GLYPH_RECORD_SIZE`] and leave a whole
/// record before the end of `bytes`.
pub fn decode_glyph(bytes: &[u8], offset: usize) -> GlyphResult<Glyph> {
    validate_glyph_buffer(bytes)?;
    let invalid = GlyphError::InvalidOffset {
        offset,
        len: bytes.len(),
    };
    if offset % GLYPH_RECORD_SIZE != 0 {
        return Err(invalid);
    }
    let end = offset.checked_add(GLYPH_RECORD_SIZE).ok_or(invalid.clone())?;
    let slice = bytes.get(offset..end).ok_or(invalid)?;
    bytemuck::from_bytes::<GlyphRecord>(slice).to_glyph()
}

/// Overwrite the record at `offset` in place.
pub fn write_glyph(bytes: &mut [u8], offset: usize, glyph: &Glyph) -> GlyphResult<()> {
    let invalid = GlyphError::InvalidOffset {
        offset,
        len: bytes.len(),
    };
    if offset % GLYPH_RECORD_SIZE != 0 {
        return Err(invalid);
    }
    let end = offset.checked_add(GLYPH_RECORD_SIZE).ok_or(invalid.clone())?;
    let slice = bytes.get_mut(offset..end).ok_or(invalid)?;
    slice.copy_from_slice(&encode_glyph(glyph));
    Ok(())
}

/// Check that `bytes` is a non-empty run of whole records.
pub fn validate_glyph_buffer(bytes: &[u8]) -> GlyphResult<()> {
    if bytes.is_empty() || bytes.len() % GLYPH_RECORD_SIZE != 0 {
        return Err(GlyphError::InvalidBufferLength { len: bytes.len() });
    }
    Ok(())
}

/// View a glyph buffer as records without copying.
pub fn glyph_records(bytes: &[u8]) -> GlyphResult<&[GlyphRecord]> {
    validate_glyph_buffer(bytes)?;
    bytemuck::try_cast_slice(bytes)
        .map_err(|_| GlyphError::InvalidBufferLength { len: bytes.len() })
}

/// Concatenate the records of `glyphs`. An empty stack is rejected.
pub fn encode_glyph_stack(glyphs: &[Glyph]) -> GlyphResult<Vec<u8>> {
    if glyphs.is_empty() {
        return Err(GlyphError::InvalidBufferLength { len: 0 });
    }
    let records: Vec<GlyphRecord> = glyphs.iter().map(Glyph::to_record).collect();
    Ok(bytemuck::cast_slice::<GlyphRecord, u8>(&records).to_vec())
}

/// Split a buffer back into its glyphs, in paint order.
pub fn decode_glyph_stack(bytes: &[u8]) -> GlyphResult<Vec<Glyph>> {
    glyph_records(bytes)?
        .iter()
        .map(GlyphRecord::to_glyph)
        .collect()
}

/// Number of records in a valid glyph buffer.
pub fn glyph_count(bytes: &[u8]) -> GlyphResult<usize> {
    validate_glyph_buffer(bytes)?;
    Ok(bytes.len() / GLYPH_RECORD_SIZE)
}

/// A glyph before normalization.
///
/// Deserializes from either the tuple shape `[ch, fg, bg?]` or the object
/// shape `{ "ch": .., "fg": .., "bg": .. }`. A missing background means
/// transparent black.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphLike {
    pub ch: CharacterInput,
    pub fg: ColorInput,
    pub bg: Option<ColorInput>,
}

impl GlyphLike {
    pub fn new(ch: impl Into<CharacterInput>, fg: impl Into<ColorInput>) -> Self {
        Self {
            ch: ch.into(),
            fg: fg.into(),
            bg: None,
        }
    }

    pub fn bg(mut self, bg: impl Into<ColorInput>) -> Self {
        self.bg = Some(bg.into());
        self
    }

    /// Normalize into a canonical [`Glyph`].
    pub fn normalize(&self) -> GlyphResult<Glyph> {
        let ch = normalize_character(&self.ch)?;
        let fg = normalize_color(&self.fg)?;
        let bg = match &self.bg {
            Some(bg) => normalize_color(bg)?,
            None => Rgba8::TRANSPARENT,
        };
        Glyph::new(ch, fg, bg)
    }
}

impl TryFrom<GlyphLike> for Glyph {
    type Error = GlyphError;

    fn try_from(value: GlyphLike) -> Result<Self, Self::Error> {
        value.normalize()
    }
}

impl TryFrom<&GlyphLike> for Glyph {
    type Error = GlyphError;

    fn try_from(value: &GlyphLike) -> Result<Self, Self::Error> {
        value.normalize()
    }
}

impl From<Glyph> for GlyphLike {
    fn from(glyph: Glyph) -> Self {
        Self {
            ch: glyph.ch.into(),
            fg: glyph.fg.into(),
            bg: Some(glyph.bg.into()),
        }
    }
}

impl<C, F> From<(C, F)> for GlyphLike
where
    C: Into<CharacterInput>,
    F: Into<ColorInput>,
{
    fn from((ch, fg): (C, F)) -> Self {
        GlyphLike::new(ch, fg)
    }
}

impl<C, F, B> From<(C, F, B)> for GlyphLike
where
    C: Into<CharacterInput>,
    F: Into<ColorInput>,
    B: Into<ColorInput>,
{
    fn from((ch, fg, bg): (C, F, B)) -> Self {
        GlyphLike::new(ch, fg).bg(bg)
    }
}

/// Normalize a sequence of glyph-like values, stopping at the first failure.
pub fn normalize_glyphs<I>(inputs: I) -> GlyphResult<Vec<Glyph>>
where
    I: IntoIterator,
    I::Item: Into<GlyphLike>,
{
    inputs
        .into_iter()
        .map(|input| input.into().normalize())
        .collect()
}

impl<'de> Deserialize<'de> for GlyphLike {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(GlyphLikeVisitor)
    }
}

struct GlyphLikeVisitor;

impl<'de> Visitor<'de> for GlyphLikeVisitor {
    type Value = GlyphLike;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[ch, fg, bg?] or {ch, fg, bg?}")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let ch = seq
            .next_element::<CharacterInput>()?
            .ok_or_else(|| de::Error::invalid_length(0, &self))?;
        let fg = seq
            .next_element::<ColorInput>()?
            .ok_or_else(|| de::Error::invalid_length(1, &self))?;
        let bg = seq.next_element::<ColorInput>()?;
        if seq.next_element::<de::IgnoredAny>()?.is_some() {
            return Err(de::Error::invalid_length(4, &self));
        }
        Ok(GlyphLike { ch, fg, bg })
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut ch = CharacterInput::Missing;
        let mut fg = None;
        let mut bg = None;
        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "ch" => ch = map.next_value()?,
                "fg" => fg = Some(map.next_value()?),
                "bg" => bg = Some(map.next_value()?),
                _ => {
                    map.next_value::<de::IgnoredAny>()?;
                }
            }
        }
        let fg = fg.ok_or_else(|| de::Error::missing_field("fg"))?;
        Ok(GlyphLike { ch, fg, bg })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glyph(ch: char) -> Glyph {
        Glyph::new(ch, Rgba8::WHITE, Rgba8::BLACK).unwrap()
    }

    #[test]
    fn test_record_layout() {
        let g = Glyph::new('#', Rgba8::rgba(1, 2, 3, 4), Rgba8::rgba(5, 6, 7, 8)).unwrap();
        assert_eq!(encode_glyph(&g), [0x00, 0x23, 1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_round_trip_single() {
        let g = Glyph::new('☃', Rgba8::rgba(9, 8, 7, 6), Rgba8::TRANSPARENT).unwrap();
        assert_eq!(decode_glyph(&encode_glyph(&g), 0).unwrap(), g);
    }

    #[test]
    fn test_astral_characters_rejected() {
        assert!(matches!(
            Glyph::new('😀', Rgba8::WHITE, Rgba8::BLACK),
            Err(GlyphError::InvalidCharacter { .. })
        ));
    }

    #[test]
    fn test_stack_encoding() {
        let stack = [glyph('a'), glyph('b'), glyph('c')];
        let bytes = encode_glyph_stack(&stack).unwrap();
        assert_eq!(bytes.len(), 30);
        assert_eq!(glyph_count(&bytes).unwrap(), 3);
        assert_eq!(decode_glyph_stack(&bytes).unwrap(), stack);
        assert_eq!(decode_glyph(&bytes, 20).unwrap(), glyph('c'));
    }

    #[test]
    fn test_empty_stack_rejected() {
        assert_eq!(
            encode_glyph_stack(&[]),
            Err(GlyphError::InvalidBufferLength { len: 0 })
        );
        assert_eq!(
            decode_glyph_stack(&[]),
            Err(GlyphError::InvalidBufferLength { len: 0 })
        );
    }

    #[test]
    fn test_bad_buffer_lengths() {
        assert_eq!(
            decode_glyph_stack(&[0u8; 15]),
            Err(GlyphError::InvalidBufferLength { len: 15 })
        );
        assert_eq!(
            glyph_count(&[0u8; 9]),
            Err(GlyphError::InvalidBufferLength { len: 9 })
        );
    }

    #[test]
    fn test_decode_rejects_partial_buffer() {
        let mut bytes = encode_glyph(&glyph('a')).to_vec();
        bytes.extend_from_slice(&[0u8; 5]);
        assert_eq!(
            decode_glyph(&bytes, 0),
            Err(GlyphError::InvalidBufferLength { len: 15 })
        );
    }

    #[test]
    fn test_glyph_like_astral_string_rejected() {
        let like = GlyphLike::new("😀", "#fff");
        assert!(matches!(
            like.normalize(),
            Err(GlyphError::InvalidCharacter { .. })
        ));
        // Only the first scalar is taken, so the BMP tail does not rescue it.
        assert!(GlyphLike::new("😀x", "#fff").normalize().is_err());
        assert_eq!(GlyphLike::new("☃😀", "#fff").normalize().unwrap().ch(), '☃');
    }

    #[test]
    fn test_bad_offsets() {
        let bytes = encode_glyph_stack(&[glyph('a'), glyph('b')]).unwrap();
        assert_eq!(
            decode_glyph(&bytes, 5),
            Err(GlyphError::InvalidOffset { offset: 5, len: 20 })
        );
        assert_eq!(
            decode_glyph(&bytes, 20),
            Err(GlyphError::InvalidOffset { offset: 20, len: 20 })
        );
        assert_eq!(
            decode_glyph(&bytes, usize::MAX - 5),
            Err(GlyphError::InvalidOffset {
                offset: usize::MAX - 5,
                len: 20
            })
        );
    }

    #[test]
    fn test_write_glyph_in_place() {
        let mut bytes = encode_glyph_stack(&[glyph('a'), glyph('b')]).unwrap();
        write_glyph(&mut bytes, 10, &glyph('z')).unwrap();
        assert_eq!(decode_glyph_stack(&bytes).unwrap(), [glyph('a'), glyph('z')]);
        assert!(matches!(
            write_glyph(&mut bytes, 3, &glyph('z')),
            Err(GlyphError::InvalidOffset { .. })
        ));
    }

    #[test]
    fn test_lone_surrogate_record() {
        let bytes = [0xD8, 0x00, 0, 0, 0, 0, 0, 0, 0, 0];
        assert!(matches!(
            decode_glyph(&bytes, 0),
            Err(GlyphError::InvalidCharacter { .. })
        ));
    }

    #[test]
    fn test_glyph_like_tuples() {
        let g: Glyph = GlyphLike::from(('@', "#ff0000")).try_into().unwrap();
        assert_eq!(g.ch(), '@');
        assert_eq!(g.fg(), Rgba8::RED);
        assert_eq!(g.bg(), Rgba8::TRANSPARENT);

        let g: Glyph = GlyphLike::from(("@", 0x00FF00u32, Rgba8::BLUE))
            .try_into()
            .unwrap();
        assert_eq!(g.fg(), Rgba8::GREEN);
        assert_eq!(g.bg(), Rgba8::BLUE);
    }

    #[test]
    fn test_normalize_glyphs_fails_fast() {
        let inputs = vec![
            GlyphLike::new('a', "white"),
            GlyphLike::new('b', "no-such-color"),
            GlyphLike::new(None::<char>, "white"),
        ];
        assert_eq!(
            normalize_glyphs(inputs),
            Err(GlyphError::InvalidColorString {
                input: "no-such-color".to_owned()
            })
        );
    }
}
