//! Text measurement backed by `cosmic-text`.

use cosmic_text::{
    Attrs, Buffer, Family, FontSystem, Metrics, Shaping, Style, SwashCache, Weight, fontdb,
};

use crate::error::{TextError, TextResult};
use crate::font::{Font, FontStyle};
use crate::measure::{TextMeasurement, TextMeasurer};

/// A [`TextMeasurer`] that shapes text with `cosmic-text` and reads ink
/// bounds from rasterized glyph placements.
pub struct CosmicMeasurer {
    font_system: FontSystem,
    swash_cache: SwashCache,
}

impl CosmicMeasurer {
    /// Measurer over the fonts installed on this system.
    pub fn new() -> Self {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        Self::with_database(db)
    }

    /// Measurer with no fonts loaded. Load fonts before measuring.
    pub fn empty() -> Self {
        Self::with_database(fontdb::Database::new())
    }

    pub fn with_database(db: fontdb::Database) -> Self {
        let font_system = FontSystem::new_with_locale_and_db(
            sys_locale::get_locale().unwrap_or_else(|| String::from("en-US")),
            db,
        );
        Self {
            font_system,
            swash_cache: SwashCache::new(),
        }
    }

    /// Load a font from bytes.
    pub fn load_font_data(&mut self, data: Vec<u8>) {
        self.font_system.db_mut().load_font_data(data);
    }

    /// Number of font faces available.
    pub fn face_count(&self) -> usize {
        self.font_system.db().len()
    }
}

impl Default for CosmicMeasurer {
    fn default() -> Self {
        Self::new()
    }
}

/// First family of a CSS family list, unquoted.
fn primary_family(family: &str) -> &str {
    family
        .split(',')
        .next()
        .unwrap_or(family)
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
}

fn cosmic_family(name: &str) -> Family<'_> {
    match name {
        "monospace" => Family::Monospace,
        "serif" => Family::Serif,
        "sans-serif" => Family::SansSerif,
        "cursive" => Family::Cursive,
        "fantasy" => Family::Fantasy,
        other => Family::Name(other),
    }
}

fn cosmic_style(style: FontStyle) -> Style {
    match style {
        FontStyle::Normal => Style::Normal,
        FontStyle::Italic => Style::Italic,
        FontStyle::Oblique => Style::Oblique,
    }
}

impl TextMeasurer for CosmicMeasurer {
    fn measure(&mut self, text: &str, font: &Font) -> TextResult<TextMeasurement> {
        if self.face_count() == 0 {
            return Err(TextError::NoFontFaces);
        }
        font.validate()?;

        let attrs = Attrs::new()
            .family(cosmic_family(primary_family(&font.family)))
            .weight(Weight(font.weight.numeric()))
            .style(cosmic_style(font.style));

        let mut buffer = Buffer::new(
            &mut self.font_system,
            Metrics::new(font.size, font.size * 1.2),
        );
        buffer.set_text(&mut self.font_system, text, attrs, Shaping::Advanced);
        buffer.shape_until_scroll(&mut self.font_system, false);

        let mut advance = 0.0_f32;
        let mut left = f32::INFINITY;
        let mut right = f32::NEG_INFINITY;
        let mut ascent = 0.0_f32;
        let mut descent = 0.0_f32;

        for run in buffer.layout_runs() {
            for glyph in run.glyphs.iter() {
                advance += glyph.w;

                let physical = glyph.physical((0.0, 0.0), 1.0);
                let Some(image) = self
                    .swash_cache
                    .get_image_uncached(&mut self.font_system, physical.cache_key)
                else {
                    continue;
                };

                let placement = image.placement;
                if placement.width == 0 || placement.height == 0 {
                    continue;
                }
                let x = physical.x as f32 + placement.left as f32;
                left = left.min(x);
                right = right.max(x + placement.width as f32);
                ascent = ascent.max(placement.top as f32);
                descent = descent.max(placement.height as f32 - placement.top as f32);
            }
        }

        if advance == 0.0 && !text.is_empty() {
            tracing::warn!(
                "No glyphs shaped for {:?} in '{}', measuring as empty",
                text,
                font.css()
            );
        }

        // Whitespace has no ink.
        let (bbox_left, bbox_right) = if left.is_finite() {
            (-left, right)
        } else {
            (0.0, 0.0)
        };

        Ok(TextMeasurement {
            advance_width: advance,
            bbox_left,
            bbox_right,
            bbox_ascent: ascent,
            bbox_descent: descent,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::FontWeight;

    #[test]
    fn test_primary_family() {
        assert_eq!(primary_family("monospace"), "monospace");
        assert_eq!(primary_family("\"Fira Code\", monospace"), "Fira Code");
        assert_eq!(primary_family(" 'DejaVu Sans' "), "DejaVu Sans");
    }

    #[test]
    fn test_generic_families() {
        assert_eq!(cosmic_family("monospace"), Family::Monospace);
        assert_eq!(cosmic_family("sans-serif"), Family::SansSerif);
        assert_eq!(cosmic_family("Fira Code"), Family::Name("Fira Code"));
        assert_eq!(FontWeight::Bold.numeric(), 700);
    }

    #[test]
    fn test_empty_database_reports_no_faces() {
        let mut measurer = CosmicMeasurer::empty();
        assert_eq!(measurer.face_count(), 0);
        assert_eq!(
            measurer.measure("W", &Font::monospace(10.0)),
            Err(TextError::NoFontFaces)
        );
    }
}
