//! 8-bit RGBA colors and the loosely-typed color inputs accepted at call sites.
//!
//! ```
//! use glyphmap_glyph::{ColorInput, Rgba8, normalize_color};
//!
//! assert_eq!(Rgba8::from_packed(0xFF8800), Rgba8::rgb(0xFF, 0x88, 0x00));
//! assert_eq!(normalize_color(&ColorInput::from("#f80")).unwrap(), Rgba8::rgb(0xFF, 0x88, 0x00));
//! assert_eq!(Rgba8::rgba(255, 136, 0, 128).to_hex_string(), "#ff880080");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};

use crate::error::{GlyphError, GlyphResult};
use crate::named;

/// A color with four independent 8-bit channels; `a = 255` is fully opaque.
///
/// The struct is `#[repr(C)]` and `Pod`, so its memory layout is exactly the
/// four bytes `R, G, B, A` written into glyph records.
#[repr(C)]
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    bytemuck::Pod,
    bytemuck::Zeroable,
    Serialize,
    Deserialize,
)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const WHITE: Rgba8 = Rgba8::rgb(255, 255, 255);
    pub const BLACK: Rgba8 = Rgba8::rgb(0, 0, 0);
    pub const RED: Rgba8 = Rgba8::rgb(255, 0, 0);
    pub const GREEN: Rgba8 = Rgba8::rgb(0, 255, 0);
    pub const BLUE: Rgba8 = Rgba8::rgb(0, 0, 255);
    /// Fully transparent black, the default glyph background.
    pub const TRANSPARENT: Rgba8 = Rgba8::rgba(0, 0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Decode a packed numeric color.
    ///
    /// Values that fit in 24 bits are `0xRRGGBB` with alpha 255; anything
    /// larger is read as `0xAARRGGBB`.
    pub const fn from_packed(value: u32) -> Self {
        let r = ((value >> 16) & 0xFF) as u8;
        let g = ((value >> 8) & 0xFF) as u8;
        let b = (value & 0xFF) as u8;
        let a = if value > 0x00FF_FFFF {
            (value >> 24) as u8
        } else {
            255
        };
        Self { r, g, b, a }
    }

    /// Decode a `0xRRGGBBAA` value.
    pub const fn from_rgba_u32(value: u32) -> Self {
        let [r, g, b, a] = value.to_be_bytes();
        Self { r, g, b, a }
    }

    /// Encode as `0xRRGGBBAA`.
    pub const fn to_rgba_u32(self) -> u32 {
        u32::from_be_bytes([self.r, self.g, self.b, self.a])
    }

    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        Self {
            r: bytes[0],
            g: bytes[1],
            b: bytes[2],
            a: bytes[3],
        }
    }

    pub const fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Parse a CSS color: `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa` (also with a
    /// `0x` prefix), a named color, or `rgb()` / `rgba()`.
    pub fn from_css(input: &str) -> GlyphResult<Self> {
        parse_css_color(input).ok_or_else(|| GlyphError::InvalidColorString {
            input: input.to_owned(),
        })
    }

    /// `#rrggbbaa`, lowercase.
    pub fn to_hex_string(self) -> String {
        format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }

    /// `rgba(r,g,b,a)` with alpha scaled to `0..=1`.
    pub fn to_css_rgba(self) -> String {
        format!(
            "rgba({},{},{},{})",
            self.r,
            self.g,
            self.b,
            self.a as f32 / 255.0
        )
    }

    pub fn is_transparent(self) -> bool {
        self.a == 0
    }
}

impl FromStr for Rgba8 {
    type Err = GlyphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_css(s)
    }
}

impl From<[u8; 4]> for Rgba8 {
    fn from(bytes: [u8; 4]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<Rgba8> for [u8; 4] {
    fn from(color: Rgba8) -> Self {
        color.to_bytes()
    }
}

fn parse_css_color(input: &str) -> Option<Rgba8> {
    let s = input.trim().to_ascii_lowercase();

    if let Some(digits) = s.strip_prefix('#').or_else(|| s.strip_prefix("0x")) {
        return parse_hex_digits(digits);
    }
    if s == "transparent" {
        return Some(Rgba8::TRANSPARENT);
    }
    if s.contains('(') {
        return parse_functional(&s);
    }
    named::lookup(&s).map(Rgba8::from_packed)
}

fn parse_hex_digits(digits: &str) -> Option<Rgba8> {
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let nibble = |i: usize| u8::from_str_radix(&digits[i..i + 1], 16).ok().map(|n| n * 17);
    let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();

    match digits.len() {
        3 => Some(Rgba8::rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
        4 => Some(Rgba8::rgba(nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?)),
        6 => Some(Rgba8::rgb(byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(Rgba8::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
        _ => None,
    }
}

fn parse_functional(s: &str) -> Option<Rgba8> {
    let (name, rest) = s.split_once('(')?;
    let body = rest.trim_end().strip_suffix(')')?;
    if !matches!(name.trim(), "rgb" | "rgba") {
        return None;
    }

    let parts: Vec<&str> = body
        .split(|c: char| c == ',' || c == '/' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .collect();
    if !(3..=4).contains(&parts.len()) {
        return None;
    }

    let r = parse_channel(parts[0])?;
    let g = parse_channel(parts[1])?;
    let b = parse_channel(parts[2])?;
    let a = match parts.get(3) {
        Some(alpha) => parse_alpha(alpha)?,
        None => 255,
    };
    Some(Rgba8::rgba(r, g, b, a))
}

fn parse_number(s: &str) -> Option<f32> {
    s.parse::<f32>().ok().filter(|v| v.is_finite())
}

fn parse_channel(s: &str) -> Option<u8> {
    match s.strip_suffix('%') {
        Some(pct) => Some((parse_number(pct)?.clamp(0.0, 100.0) * 2.55).round() as u8),
        None => Some(parse_number(s)?.clamp(0.0, 255.0).round() as u8),
    }
}

fn parse_alpha(s: &str) -> Option<u8> {
    let unit = match s.strip_suffix('%') {
        Some(pct) => parse_number(pct)? / 100.0,
        None => parse_number(s)?,
    };
    Some((unit.clamp(0.0, 1.0) * 255.0).round() as u8)
}

/// An `{r, g, b, a}` record where any channel may be missing.
///
/// Missing color channels default to 0 and a missing alpha to 255.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct PartialRgba {
    #[serde(default)]
    pub r: Option<u8>,
    #[serde(default)]
    pub g: Option<u8>,
    #[serde(default)]
    pub b: Option<u8>,
    #[serde(default)]
    pub a: Option<u8>,
}

impl PartialRgba {
    pub fn to_rgba(self) -> Rgba8 {
        Rgba8::rgba(
            self.r.unwrap_or(0),
            self.g.unwrap_or(0),
            self.b.unwrap_or(0),
            self.a.unwrap_or(255),
        )
    }
}

/// A color as it arrives from a call site or a config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorInput {
    /// `0xRRGGBB` or `0xAARRGGBB`.
    Packed(u32),
    /// Channel record with optional fields.
    Channels(PartialRgba),
    /// Any CSS color string.
    Css(String),
    /// Already canonical.
    Rgba(Rgba8),
    /// A value of a kind no color can be made from; carries its kind name.
    Unsupported(&'static str),
}

/// Convert any [`ColorInput`] into its canonical [`Rgba8`].
pub fn normalize_color(input: &ColorInput) -> GlyphResult<Rgba8> {
    match input {
        ColorInput::Packed(value) => Ok(Rgba8::from_packed(*value)),
        ColorInput::Channels(partial) => Ok(partial.to_rgba()),
        ColorInput::Css(s) => Rgba8::from_css(s),
        ColorInput::Rgba(color) => Ok(*color),
        ColorInput::Unsupported(found) => Err(GlyphError::InvalidColorType { found }),
    }
}

impl From<u32> for ColorInput {
    fn from(value: u32) -> Self {
        ColorInput::Packed(value)
    }
}

impl From<&str> for ColorInput {
    fn from(value: &str) -> Self {
        ColorInput::Css(value.to_owned())
    }
}

impl From<String> for ColorInput {
    fn from(value: String) -> Self {
        ColorInput::Css(value)
    }
}

impl From<Rgba8> for ColorInput {
    fn from(value: Rgba8) -> Self {
        ColorInput::Rgba(value)
    }
}

impl From<PartialRgba> for ColorInput {
    fn from(value: PartialRgba) -> Self {
        ColorInput::Channels(value)
    }
}

impl<'de> Deserialize<'de> for ColorInput {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ColorInputVisitor)
    }
}

struct ColorInputVisitor;

impl<'de> Visitor<'de> for ColorInputVisitor {
    type Value = ColorInput;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a packed color number, a color string or an {r, g, b, a} record")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(match u32::try_from(v) {
            Ok(packed) => ColorInput::Packed(packed),
            Err(_) => ColorInput::Unsupported("number wider than 32 bits"),
        })
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        match u64::try_from(v) {
            Ok(v) => self.visit_u64(v),
            Err(_) => Ok(ColorInput::Unsupported("negative number")),
        }
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        if v.fract() == 0.0 && (0.0..=u32::MAX as f64).contains(&v) {
            Ok(ColorInput::Packed(v as u32))
        } else {
            Ok(ColorInput::Unsupported("fractional number"))
        }
    }

    fn visit_bool<E: de::Error>(self, _v: bool) -> Result<Self::Value, E> {
        Ok(ColorInput::Unsupported("boolean"))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(ColorInput::Css(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(ColorInput::Css(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(ColorInput::Unsupported("null"))
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(ColorInput::Unsupported("null"))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(ColorInput::Unsupported("array"))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut partial = PartialRgba::default();
        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "r" => partial.r = Some(map.next_value()?),
                "g" => partial.g = Some(map.next_value()?),
                "b" => partial.b = Some(map.next_value()?),
                "a" => partial.a = Some(map.next_value()?),
                _ => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }
        Ok(ColorInput::Channels(partial))
    }
}
