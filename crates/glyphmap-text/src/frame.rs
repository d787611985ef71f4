//! Frame dimension resolution.
//!
//! A frame is the pixel rectangle one glyph occupies inside a texture. Its
//! size comes from a text measurement, which is the expensive part, so
//! results are memoized in two tiers:
//!
//! - the *measured* tier holds the raw `(width, height)` per character, font
//!   and metrics mode;
//! - the *square* tier holds the squared result for `force_square_ratio`
//!   requests.
//!
//! Square and non-square requests for the same character therefore share a
//! single backend call.

use glyphmap_core::alloc::HashMap;
use glyphmap_core::geometry::Size;
use glyphmap_core::profiling::profile_function;
use glyphmap_glyph::character_to_hex;

use crate::cache::CacheStats;
use crate::error::TextResult;
use crate::font::Font;
use crate::measure::TextMeasurer;

/// How frames are sized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FrameOptions {
    /// Make every frame a square whose side is its larger dimension.
    pub force_square_ratio: bool,
    /// Size frames from the ink bounding box instead of advance width and
    /// nominal font size.
    pub advanced_metrics: bool,
}

impl FrameOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn force_square_ratio(mut self, enabled: bool) -> Self {
        self.force_square_ratio = enabled;
        self
    }

    pub fn advanced_metrics(mut self, enabled: bool) -> Self {
        self.advanced_metrics = enabled;
        self
    }

    /// Key suffix: `" square"` and/or `" advanced"`, in that order.
    pub fn key_suffix(&self) -> &'static str {
        match (self.force_square_ratio, self.advanced_metrics) {
            (false, false) => "",
            (true, false) => " square",
            (false, true) => " advanced",
            (true, true) => " square advanced",
        }
    }
}

/// Memoized frame dimensions.
///
/// Entries are write-once and never evicted; [`FrameDimensionCache::clear`]
/// exists for hosts that reload fonts.
pub struct FrameDimensionCache {
    measured: HashMap<String, Size<f32>>,
    squared: HashMap<String, Size<f32>>,
    stats: CacheStats,
    backend_calls: u64,
}

impl FrameDimensionCache {
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            measured: HashMap::with_capacity(capacity),
            squared: HashMap::with_capacity(capacity),
            stats: CacheStats::default(),
            backend_calls: 0,
        }
    }

    /// Width and height a glyph of `ch` occupies when drawn in `font`.
    ///
    /// The returned `Size` is a copy; callers cannot alter cached values.
    pub fn get_frame_dimensions<M>(
        &mut self,
        measurer: &mut M,
        ch: char,
        font: &Font,
        options: FrameOptions,
    ) -> TextResult<Size<f32>>
    where
        M: TextMeasurer + ?Sized,
    {
        profile_function!();

        let measured_key = format!(
            "{} {}{}",
            character_to_hex(ch),
            font.css(),
            if options.advanced_metrics { " advanced" } else { "" }
        );

        if !options.force_square_ratio {
            if let Some(size) = self.measured.get(&measured_key) {
                self.stats.record_hit();
                return Ok(*size);
            }
            self.stats.record_miss();
            return self.measure(measurer, ch, font, options, measured_key);
        }

        let squared_key = format!("{measured_key} square");
        if let Some(size) = self.squared.get(&squared_key) {
            self.stats.record_hit();
            return Ok(*size);
        }
        self.stats.record_miss();

        let raw = match self.measured.get(&measured_key) {
            Some(size) => *size,
            None => self.measure(measurer, ch, font, options, measured_key)?,
        };
        let squared = raw.squared();
        self.squared.insert(squared_key, squared);
        Ok(squared)
    }

    fn measure<M>(
        &mut self,
        measurer: &mut M,
        ch: char,
        font: &Font,
        options: FrameOptions,
        key: String,
    ) -> TextResult<Size<f32>>
    where
        M: TextMeasurer + ?Sized,
    {
        font.validate()?;

        let mut buf = [0u8; 4];
        let metrics = measurer.measure(ch.encode_utf8(&mut buf), font)?;
        self.backend_calls += 1;

        let size = if options.advanced_metrics {
            Size::new(
                metrics.bbox_left.abs() + metrics.bbox_right.abs(),
                metrics.bbox_ascent.abs() + metrics.bbox_descent.abs(),
            )
        } else {
            Size::new(metrics.advance_width, font.size)
        };

        tracing::debug!(
            "Measured frame for {:?} in '{}': {}x{}",
            ch,
            font.css(),
            size.width,
            size.height
        );
        self.measured.insert(key, size);
        Ok(size)
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Number of times the measurement backend was actually called.
    pub fn backend_calls(&self) -> u64 {
        self.backend_calls
    }

    /// Number of stored entries across both tiers.
    pub fn len(&self) -> usize {
        self.measured.len() + self.squared.len()
    }

    pub fn is_empty(&self) -> bool {
        self.measured.is_empty() && self.squared.is_empty()
    }

    pub fn clear(&mut self) {
        self.measured.clear();
        self.squared.clear();
        self.stats = CacheStats::default();
        self.backend_calls = 0;
    }

    pub fn stats_string(&self) -> String {
        self.stats.summary("FrameDimensionCache", self.len())
    }
}

impl Default for FrameDimensionCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TextError;
    use crate::measure::TextMeasurement;

    /// One pixel of advance per character, with a tall narrow ink box.
    struct StubMeasurer {
        calls: usize,
    }

    impl TextMeasurer for StubMeasurer {
        fn measure(&mut self, text: &str, _font: &Font) -> TextResult<TextMeasurement> {
            self.calls += 1;
            Ok(TextMeasurement {
                advance_width: text.chars().count() as f32,
                bbox_left: -1.0,
                bbox_right: 5.0,
                bbox_ascent: 7.0,
                bbox_descent: -2.0,
            })
        }
    }

    fn stub() -> StubMeasurer {
        StubMeasurer { calls: 0 }
    }

    #[test]
    fn test_nominal_metrics() {
        let mut cache = FrameDimensionCache::new();
        let mut measurer = stub();
        let font = Font::monospace(10.0);

        let size = cache
            .get_frame_dimensions(&mut measurer, '#', &font, FrameOptions::new())
            .unwrap();
        assert_eq!(size, Size::new(1.0, 10.0));

        let square = cache
            .get_frame_dimensions(
                &mut measurer,
                '#',
                &font,
                FrameOptions::new().force_square_ratio(true),
            )
            .unwrap();
        assert_eq!(square, Size::new(10.0, 10.0));
        assert_eq!(measurer.calls, 1);
    }

    #[test]
    fn test_advanced_metrics_sum_absolute_offsets() {
        let mut cache = FrameDimensionCache::new();
        let mut measurer = stub();
        let options = FrameOptions::new().advanced_metrics(true);

        let size = cache
            .get_frame_dimensions(&mut measurer, 'g', &Font::monospace(10.0), options)
            .unwrap();
        assert_eq!(size, Size::new(6.0, 9.0));
    }

    #[test]
    fn test_repeated_lookups_hit_cache() {
        let mut cache = FrameDimensionCache::new();
        let mut measurer = stub();
        let font = Font::monospace(10.0);

        for _ in 0..5 {
            cache
                .get_frame_dimensions(&mut measurer, 'a', &font, FrameOptions::new())
                .unwrap();
        }
        assert_eq!(measurer.calls, 1);
        assert_eq!(cache.backend_calls(), 1);
        assert_eq!(cache.stats().hits, 4);
        assert_eq!(cache.stats().misses, 1);
    }

    #[test]
    fn test_modes_are_keyed_separately() {
        let mut cache = FrameDimensionCache::new();
        let mut measurer = stub();
        let font = Font::monospace(10.0);

        cache
            .get_frame_dimensions(&mut measurer, 'a', &font, FrameOptions::new())
            .unwrap();
        cache
            .get_frame_dimensions(
                &mut measurer,
                'a',
                &font,
                FrameOptions::new().advanced_metrics(true),
            )
            .unwrap();
        cache
            .get_frame_dimensions(&mut measurer, 'a', &Font::monospace(12.0), FrameOptions::new())
            .unwrap();
        assert_eq!(measurer.calls, 3);
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn test_invalid_font_is_not_cached() {
        let mut cache = FrameDimensionCache::new();
        let mut measurer = stub();

        let result = cache.get_frame_dimensions(
            &mut measurer,
            'a',
            &Font::monospace(-1.0),
            FrameOptions::new(),
        );
        assert!(matches!(result, Err(TextError::InvalidFont { .. })));
        assert_eq!(measurer.calls, 0);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_key_suffix_order() {
        assert_eq!(FrameOptions::new().key_suffix(), "");
        assert_eq!(
            FrameOptions::new()
                .force_square_ratio(true)
                .advanced_metrics(true)
                .key_suffix(),
            " square advanced"
        );
    }
}
