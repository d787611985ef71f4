//! Character normalization and the hex forms used in cache keys.

use std::fmt;

use icu_normalizer::ComposingNormalizerBorrowed;
use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;

use crate::error::{GlyphError, GlyphResult};

/// A character as it arrives from a call site or a config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CharacterInput {
    /// A raw code point. The sign bit is ignored.
    Scalar(u32),
    /// Any string; only its first scalar value after NFC normalization is used.
    Text(String),
    /// `null` / absent.
    Missing,
}

/// Reduce a [`CharacterInput`] to a single Unicode scalar value.
///
/// Strings are NFC-normalized first, so `"e\u{301}"` yields `'é'`.
pub fn normalize_character(input: &CharacterInput) -> GlyphResult<char> {
    match input {
        CharacterInput::Scalar(value) => {
            char::from_u32(value & 0x7FFF_FFFF).ok_or(GlyphError::InvalidCharacter {
                reason: "not a Unicode scalar value",
            })
        }
        CharacterInput::Text(text) => {
            let normalized = ComposingNormalizerBorrowed::new_nfc().normalize(text);
            normalized
                .chars()
                .next()
                .ok_or(GlyphError::InvalidCharacter {
                    reason: "empty string",
                })
        }
        CharacterInput::Missing => Err(GlyphError::InvalidCharacter {
            reason: "character is missing",
        }),
    }
}

/// Zero-padded lowercase hex of the UTF-16 encoding, four digits per code unit.
///
/// `'#'` becomes `"0023"`; characters outside the BMP produce eight digits.
pub fn character_to_hex(ch: char) -> String {
    let mut units = [0u16; 2];
    ch.encode_utf16(&mut units)
        .iter()
        .map(|unit| format!("{unit:04x}"))
        .collect()
}

/// Inverse of [`character_to_hex`].
pub fn hex_to_character(hex_str: &str) -> GlyphResult<char> {
    if !matches!(hex_str.len(), 4 | 8) {
        return Err(GlyphError::InvalidHexLength {
            len: hex_str.len(),
            expected: 4,
        });
    }

    let bytes = hex::decode(hex_str)?;
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
        .collect();

    let mut decoded = char::decode_utf16(units.iter().copied());
    match (decoded.next(), decoded.next()) {
        (Some(Ok(ch)), None) => Ok(ch),
        _ => Err(GlyphError::InvalidCharacter {
            reason: "hex does not encode exactly one character",
        }),
    }
}

impl From<char> for CharacterInput {
    fn from(value: char) -> Self {
        CharacterInput::Scalar(value as u32)
    }
}

impl From<u32> for CharacterInput {
    fn from(value: u32) -> Self {
        CharacterInput::Scalar(value)
    }
}

impl From<&str> for CharacterInput {
    fn from(value: &str) -> Self {
        CharacterInput::Text(value.to_owned())
    }
}

impl From<String> for CharacterInput {
    fn from(value: String) -> Self {
        CharacterInput::Text(value)
    }
}

impl<T: Into<CharacterInput>> From<Option<T>> for CharacterInput {
    fn from(value: Option<T>) -> Self {
        value.map_or(CharacterInput::Missing, Into::into)
    }
}

impl<'de> Deserialize<'de> for CharacterInput {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(CharacterInputVisitor)
    }
}

struct CharacterInputVisitor;

impl<'de> Visitor<'de> for CharacterInputVisitor {
    type Value = CharacterInput;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a code point, a string or null")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        u32::try_from(v)
            .map(CharacterInput::Scalar)
            .map_err(|_| E::custom("code point wider than 32 bits"))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        // Negative numbers keep their low 32 bits; the sign bit is masked later.
        Ok(CharacterInput::Scalar(v as u32))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(CharacterInput::Text(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(CharacterInput::Text(v))
    }

    fn visit_char<E: de::Error>(self, v: char) -> Result<Self::Value, E> {
        Ok(CharacterInput::from(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(CharacterInput::Missing)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(CharacterInput::Missing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_input() {
        assert_eq!(normalize_character(&'#'.into()).unwrap(), '#');
        assert_eq!(normalize_character(&0x41u32.into()).unwrap(), 'A');
        // Sign bit is forced off.
        assert_eq!(normalize_character(&0x8000_0041u32.into()).unwrap(), 'A');
    }

    #[test]
    fn test_invalid_scalars() {
        assert!(matches!(
            normalize_character(&0xD800u32.into()),
            Err(GlyphError::InvalidCharacter { .. })
        ));
        assert!(matches!(
            normalize_character(&0x11_0000u32.into()),
            Err(GlyphError::InvalidCharacter { .. })
        ));
    }

    #[test]
    fn test_string_takes_first_scalar() {
        assert_eq!(normalize_character(&"hello".into()).unwrap(), 'h');
        assert_eq!(normalize_character(&"😀x".into()).unwrap(), '😀');
    }

    #[test]
    fn test_string_is_nfc_normalized() {
        assert_eq!(normalize_character(&"e\u{301}".into()).unwrap(), 'é');
    }

    #[test]
    fn test_missing_and_empty() {
        assert!(matches!(
            normalize_character(&CharacterInput::Missing),
            Err(GlyphError::InvalidCharacter { .. })
        ));
        assert!(matches!(
            normalize_character(&CharacterInput::from(None::<char>)),
            Err(GlyphError::InvalidCharacter { .. })
        ));
        assert!(matches!(
            normalize_character(&"".into()),
            Err(GlyphError::InvalidCharacter { .. })
        ));
    }

    #[test]
    fn test_character_hex() {
        assert_eq!(character_to_hex('#'), "0023");
        assert_eq!(character_to_hex('W'), "0057");
        assert_eq!(character_to_hex('😀'), "d83dde00");
        assert_eq!(hex_to_character("0023").unwrap(), '#');
        assert_eq!(hex_to_character("d83dde00").unwrap(), '😀');
    }

    #[test]
    fn test_hex_to_character_errors() {
        assert_eq!(
            hex_to_character("023"),
            Err(GlyphError::InvalidHexLength { len: 3, expected: 4 })
        );
        assert!(matches!(
            hex_to_character("zz23"),
            Err(GlyphError::InvalidHexDigit(_))
        ));
        // Lone surrogate
        assert!(matches!(
            hex_to_character("d83d"),
            Err(GlyphError::InvalidCharacter { .. })
        ));
        // Two BMP characters
        assert!(matches!(
            hex_to_character("00410042"),
            Err(GlyphError::InvalidCharacter { .. })
        ));
    }
}
