//! The text measurement backend seam.

use crate::error::TextResult;
use crate::font::Font;

/// Raw measurement of a run of text, in pixels.
///
/// Bounding-box offsets follow the canvas convention: `bbox_left` is the
/// distance the ink extends left of the origin, `bbox_ascent` the distance
/// above the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextMeasurement {
    pub advance_width: f32,
    pub bbox_left: f32,
    pub bbox_right: f32,
    pub bbox_ascent: f32,
    pub bbox_descent: f32,
}

/// A backend able to measure text rendered in a given font.
///
/// Implementations must be deterministic: the frame cache stores the first
/// answer for each `(text, font)` forever.
pub trait TextMeasurer {
    fn measure(&mut self, text: &str, font: &Font) -> TextResult<TextMeasurement>;
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for &mut T {
    fn measure(&mut self, text: &str, font: &Font) -> TextResult<TextMeasurement> {
        (**self).measure(text, font)
    }
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for Box<T> {
    fn measure(&mut self, text: &str, font: &Font) -> TextResult<TextMeasurement> {
        (**self).measure(text, font)
    }
}
