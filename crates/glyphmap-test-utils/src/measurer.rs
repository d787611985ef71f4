use std::collections::BTreeMap;

use glyphmap_text::{Font, TextMeasurement, TextMeasurer, TextResult};

/// Deterministic measurer.
///
/// Every character advances by a fixed amount unless overridden. The ink box
/// spans the advance horizontally and 80% / 20% of the font size above and
/// below the baseline.
#[derive(Debug, Clone)]
pub struct FixedMeasurer {
    advance: f32,
    overrides: BTreeMap<char, f32>,
    measured: Vec<String>,
}

impl FixedMeasurer {
    /// One pixel of advance per character.
    pub fn new() -> Self {
        Self::with_advance(1.0)
    }

    pub fn with_advance(advance: f32) -> Self {
        Self {
            advance,
            overrides: BTreeMap::new(),
            measured: Vec::new(),
        }
    }

    /// Use `advance` for `ch` instead of the default.
    pub fn with_char(mut self, ch: char, advance: f32) -> Self {
        self.overrides.insert(ch, advance);
        self
    }

    /// Number of `measure` calls so far.
    pub fn calls(&self) -> usize {
        self.measured.len()
    }

    /// Every string measured, in call order.
    pub fn measured(&self) -> &[String] {
        &self.measured
    }
}

impl Default for FixedMeasurer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextMeasurer for FixedMeasurer {
    fn measure(&mut self, text: &str, font: &Font) -> TextResult<TextMeasurement> {
        font.validate()?;
        self.measured.push(text.to_owned());

        let advance_width = text
            .chars()
            .map(|ch| self.overrides.get(&ch).copied().unwrap_or(self.advance))
            .sum();

        Ok(TextMeasurement {
            advance_width,
            bbox_left: 0.0,
            bbox_right: advance_width,
            bbox_ascent: font.size * 0.8,
            bbox_descent: font.size * 0.2,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_advances() {
        let mut measurer = FixedMeasurer::new().with_char('M', 3.0);
        let font = Font::monospace(10.0);

        assert_eq!(measurer.measure("#", &font).unwrap().advance_width, 1.0);
        assert_eq!(measurer.measure("MM#", &font).unwrap().advance_width, 7.0);
        assert_eq!(measurer.calls(), 2);
        assert_eq!(measurer.measured(), &["#".to_owned(), "MM#".to_owned()]);
    }
}
