use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{TextError, TextResult};

/// Font weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontWeight {
    Thin,
    ExtraLight,
    Light,
    #[default]
    Normal,
    Medium,
    SemiBold,
    Bold,
    ExtraBold,
    Black,
}

impl FontWeight {
    /// Numeric CSS weight, `100..=900`.
    pub fn numeric(self) -> u16 {
        match self {
            FontWeight::Thin => 100,
            FontWeight::ExtraLight => 200,
            FontWeight::Light => 300,
            FontWeight::Normal => 400,
            FontWeight::Medium => 500,
            FontWeight::SemiBold => 600,
            FontWeight::Bold => 700,
            FontWeight::ExtraBold => 800,
            FontWeight::Black => 900,
        }
    }
}

impl fmt::Display for FontWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontWeight::Normal => f.write_str("normal"),
            FontWeight::Bold => f.write_str("bold"),
            other => write!(f, "{}", other.numeric()),
        }
    }
}

/// Font style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
    Oblique,
}

impl fmt::Display for FontStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FontStyle::Normal => "normal",
            FontStyle::Italic => "italic",
            FontStyle::Oblique => "oblique",
        })
    }
}

/// Font variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontVariant {
    #[default]
    Normal,
    SmallCaps,
}

impl fmt::Display for FontVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FontVariant::Normal => "normal",
            FontVariant::SmallCaps => "small-caps",
        })
    }
}

/// A font description used for measuring and painting glyphs.
///
/// `Font` is a plain value: caches and maps store their own clone, so a
/// caller changing its copy afterwards never affects stored entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Font {
    /// Size in pixels.
    pub size: f32,
    /// Family name or generic family (`"monospace"`, `"serif"`, ...).
    pub family: String,
    pub weight: FontWeight,
    pub style: FontStyle,
    pub variant: FontVariant,
}

impl Font {
    pub fn new(size: f32, family: impl Into<String>) -> Self {
        Self {
            size,
            family: family.into(),
            weight: FontWeight::Normal,
            style: FontStyle::Normal,
            variant: FontVariant::Normal,
        }
    }

    pub fn monospace(size: f32) -> Self {
        Self::new(size, "monospace")
    }

    pub fn weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }

    pub fn style(mut self, style: FontStyle) -> Self {
        self.style = style;
        self
    }

    pub fn variant(mut self, variant: FontVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    /// `"<style> <variant> <weight> <size>px <family>"`, e.g.
    /// `"normal normal normal 10px monospace"`.
    pub fn css(&self) -> String {
        format!(
            "{} {} {} {}px {}",
            self.style, self.variant, self.weight, self.size, self.family
        )
    }

    /// Reject sizes that are not positive and finite, and empty families.
    pub fn validate(&self) -> TextResult<()> {
        if !self.size.is_finite() || self.size <= 0.0 {
            return Err(TextError::InvalidFont {
                reason: format!("size must be positive, got {}", self.size),
            });
        }
        if self.family.trim().is_empty() {
            return Err(TextError::InvalidFont {
                reason: "family is empty".to_owned(),
            });
        }
        Ok(())
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::monospace(24.0)
    }
}

impl fmt::Display for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.css())
    }
}
