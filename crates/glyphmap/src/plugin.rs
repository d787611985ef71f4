//! The owner of glyph rendering state.

use std::sync::atomic::{AtomicU64, Ordering};

use glyphmap_core::geometry::Size;
use glyphmap_glyph::{Glyph, GlyphLike};
use glyphmap_text::{
    BitmapStore, Font, FrameDimensionCache, FrameOptions, TextMeasurer, TextResult,
    TextureCache, TextureKey, TextureLayout, TextureResult,
};

use crate::config::GlyphPluginConfig;

static NEXT_PLUGIN_ID: AtomicU64 = AtomicU64::new(1);

/// Owns the measurement backend, the caches and the glyph settings shared by
/// every map drawn through it.
///
/// Changing the font, measurement character or frame options bumps
/// [`GlyphPlugin::generation`]. Maps remember the [`GlyphPlugin::id`] and
/// generation their cell size was computed at and recompute on mismatch.
///
/// # Example
///
/// ```
/// use glyphmap::{GlyphPlugin, GlyphPluginConfig};
/// use glyphmap_test_utils::FixedMeasurer;
/// use glyphmap_text::Font;
///
/// let mut plugin = GlyphPlugin::new(FixedMeasurer::new(), GlyphPluginConfig::default());
/// let before = plugin.generation();
///
/// plugin.set_font(Font::monospace(10.0));
/// assert_eq!(plugin.generation(), before + 1);
/// ```
pub struct GlyphPlugin<M> {
    id: u64,
    measurer: M,
    textures: TextureCache,
    font: Font,
    measurement_char: char,
    options: FrameOptions,
    generation: u64,
}

impl<M: TextMeasurer> GlyphPlugin<M> {
    pub fn new(measurer: M, config: GlyphPluginConfig) -> Self {
        let frames = FrameDimensionCache::with_capacity(config.frame_cache_capacity);
        let options = config.frame_options();

        tracing::debug!(
            "GlyphPlugin: font '{}', measurement char {:?}, options {:?}",
            config.font,
            config.measurement_char,
            options
        );

        Self {
            id: NEXT_PLUGIN_ID.fetch_add(1, Ordering::Relaxed),
            measurer,
            textures: TextureCache::with_frame_cache(frames),
            font: config.font,
            measurement_char: config.measurement_char,
            options,
            generation: 0,
        }
    }

    /// Process-unique id of this plugin.
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn font(&self) -> &Font {
        &self.font
    }

    /// Replace the font. The plugin keeps its own copy.
    pub fn set_font(&mut self, font: Font) {
        if self.font != font {
            self.font = font;
            self.invalidate("font");
        }
    }

    pub fn measurement_char(&self) -> char {
        self.measurement_char
    }

    pub fn set_measurement_char(&mut self, ch: char) {
        if self.measurement_char != ch {
            self.measurement_char = ch;
            self.invalidate("measurement char");
        }
    }

    pub fn options(&self) -> FrameOptions {
        self.options
    }

    pub fn set_force_square_ratio(&mut self, enabled: bool) {
        if self.options.force_square_ratio != enabled {
            self.options.force_square_ratio = enabled;
            self.invalidate("force_square_ratio");
        }
    }

    pub fn set_advanced_metrics(&mut self, enabled: bool) {
        if self.options.advanced_metrics != enabled {
            self.options.advanced_metrics = enabled;
            self.invalidate("advanced_metrics");
        }
    }

    /// Bumped by every setting change that affects cell or texture size.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn invalidate(&mut self, what: &str) {
        self.generation += 1;
        tracing::debug!(
            "GlyphPlugin: {} changed, generation {}",
            what,
            self.generation
        );
    }

    /// Frame size of the measurement character in the current settings.
    pub fn cell_dimensions(&mut self) -> TextResult<Size<f32>> {
        self.textures.frames_mut().get_frame_dimensions(
            &mut self.measurer,
            self.measurement_char,
            &self.font,
            self.options,
        )
    }

    /// Frame size of `ch` in the current settings.
    pub fn frame_dimensions(&mut self, ch: char) -> TextResult<Size<f32>> {
        self.textures.frames_mut().get_frame_dimensions(
            &mut self.measurer,
            ch,
            &self.font,
            self.options,
        )
    }

    pub fn texture_key(&self, glyphs: &[Glyph]) -> TextureResult<TextureKey> {
        TextureKey::new(glyphs, &self.font, self.measurement_char, self.options)
    }

    /// Texture for `glyphs` in the current settings.
    pub fn get_texture<S>(&mut self, store: &mut S, glyphs: &[Glyph]) -> TextureResult<S::Handle>
    where
        S: BitmapStore + ?Sized,
    {
        self.textures.get_texture(
            store,
            &mut self.measurer,
            glyphs,
            &self.font,
            self.measurement_char,
            self.options,
        )
    }

    /// Frame rectangles of the texture [`GlyphPlugin::get_texture`] returns
    /// for `glyphs`.
    pub fn texture_layout(&mut self, glyphs: &[Glyph]) -> TextureResult<TextureLayout> {
        self.textures.layout(
            &mut self.measurer,
            glyphs,
            &self.font,
            self.measurement_char,
            self.options,
        )
    }

    pub fn get_texture_like<S>(
        &mut self,
        store: &mut S,
        glyphs: &[GlyphLike],
    ) -> TextureResult<S::Handle>
    where
        S: BitmapStore + ?Sized,
    {
        self.textures.get_texture_like(
            store,
            &mut self.measurer,
            glyphs,
            &self.font,
            self.measurement_char,
            self.options,
        )
    }

    pub fn textures(&self) -> &TextureCache {
        &self.textures
    }

    pub fn measurer(&self) -> &M {
        &self.measurer
    }

    pub fn measurer_mut(&mut self) -> &mut M {
        &mut self.measurer
    }

    /// Forget measured frames and reset statistics.
    ///
    /// Also bumps the generation, since cell sizes are measured again.
    pub fn clear_caches(&mut self) {
        self.textures.clear();
        self.invalidate("caches");
    }

    pub fn stats_string(&self) -> String {
        self.textures.stats_string()
    }
}
