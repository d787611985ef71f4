//! Content-addressed glyph textures.
//!
//! A texture holds one or more glyph frames laid out left to right. Its key
//! is derived purely from the glyph bytes, the measurement character, the
//! font and the frame options, so equal inputs always land on the same
//! bitmap and the bitmap is painted at most once.

use std::fmt;

use glyphmap_core::geometry::{Rect, Size};
use glyphmap_core::profiling::{profile_function, profile_scope};
use glyphmap_glyph::{
    Glyph, GlyphLike, Rgba8, buffer_to_hex, character_to_hex, decode_glyph_stack,
    encode_glyph_stack, hex_to_buffer, hex_to_character, normalize_glyphs,
};

use crate::cache::CacheStats;
use crate::error::{TextureError, TextureResult};
use crate::font::Font;
use crate::frame::{FrameDimensionCache, FrameOptions};
use crate::measure::TextMeasurer;

/// 2D drawing surface of a freshly created bitmap.
pub trait PaintSurface {
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgba8);

    /// Draw `text` centered on `(center_x, center_y)`.
    fn draw_text(&mut self, text: &str, center_x: f32, center_y: f32, color: Rgba8, font: &Font);
}

/// Keyed bitmap storage owned by the rendering backend.
pub trait BitmapStore {
    /// What renderers hold on to. Typically an id or a reference-counted texture.
    type Handle: Clone;
    type Surface: PaintSurface;

    fn exists(&self, key: &str) -> bool;

    /// Allocate a bitmap under `key` and return its surface for painting.
    fn create(&mut self, key: &str, width: u32, height: u32) -> &mut Self::Surface;

    fn get(&self, key: &str) -> Option<Self::Handle>;
}

/// Deterministic texture key.
///
/// Grammar: `<glyph hex> <measurement char hex> <font css>[ square][ advanced]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureKey(String);

impl TextureKey {
    pub fn new(
        glyphs: &[Glyph],
        font: &Font,
        measurement_char: char,
        options: FrameOptions,
    ) -> TextureResult<Self> {
        if glyphs.is_empty() {
            return Err(TextureError::EmptyStack);
        }
        let bytes = encode_glyph_stack(glyphs)?;
        Ok(Self(format!(
            "{} {} {}{}",
            buffer_to_hex(&bytes),
            character_to_hex(measurement_char),
            font.css(),
            options.key_suffix()
        )))
    }

    /// Key for unnormalized glyphs. Fails on the first invalid entry.
    pub fn from_like(
        glyphs: &[GlyphLike],
        font: &Font,
        measurement_char: char,
        options: FrameOptions,
    ) -> TextureResult<Self> {
        let glyphs = normalize_glyphs(glyphs.iter().cloned())?;
        Self::new(&glyphs, font, measurement_char, options)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Glyph stack this key was built from.
    pub fn glyphs(&self) -> TextureResult<Vec<Glyph>> {
        let hex_str = self.0.split(' ').next().unwrap_or_default();
        Ok(decode_glyph_stack(&hex_to_buffer(hex_str)?)?)
    }

    pub fn measurement_char(&self) -> TextureResult<char> {
        let hex_str = self.0.split(' ').nth(1).unwrap_or_default();
        Ok(hex_to_character(hex_str)?)
    }

    /// Font CSS with the option suffixes stripped.
    pub fn font_css(&self) -> &str {
        let (_, _, css) = self.split_flags();
        css
    }

    pub fn is_square(&self) -> bool {
        self.split_flags().0
    }

    pub fn is_advanced(&self) -> bool {
        self.split_flags().1
    }

    fn split_flags(&self) -> (bool, bool, &str) {
        let rest = self.0.splitn(3, ' ').nth(2).unwrap_or_default();
        let (rest, advanced) = match rest.strip_suffix(" advanced") {
            Some(stripped) => (stripped, true),
            None => (rest, false),
        };
        let (rest, square) = match rest.strip_suffix(" square") {
            Some(stripped) => (stripped, true),
            None => (rest, false),
        };
        (square, advanced, rest)
    }
}

impl fmt::Display for TextureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TextureKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Where each glyph of a stack sits inside its composite texture.
///
/// Frames are in texture pixels and in paint order. Every frame spans the
/// full texture height. A renderer stacks a cell by drawing each frame over
/// the cell in turn.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextureLayout {
    pub frames: Vec<Rect<f32>>,
    pub size: Size<f32>,
}

impl TextureLayout {
    /// Bitmap size, rounded up to whole pixels.
    pub fn pixel_size(&self) -> Size<u32> {
        self.size.ceil_u32()
    }
}

/// Resolves glyph stacks to bitmaps, generating each one at most once.
///
/// The cache keeps no bitmaps itself; the [`BitmapStore`] is the source of
/// truth for which keys exist. It owns the frame dimension cache used to
/// size new textures.
pub struct TextureCache {
    frames: FrameDimensionCache,
    stats: CacheStats,
    created: u64,
}

impl TextureCache {
    pub fn new() -> Self {
        Self::with_frame_cache(FrameDimensionCache::new())
    }

    pub fn with_frame_cache(frames: FrameDimensionCache) -> Self {
        Self {
            frames,
            stats: CacheStats::default(),
            created: 0,
        }
    }

    /// Return the texture for `glyphs`, painting it first if the store does
    /// not have it yet.
    pub fn get_texture<S, M>(
        &mut self,
        store: &mut S,
        measurer: &mut M,
        glyphs: &[Glyph],
        font: &Font,
        measurement_char: char,
        options: FrameOptions,
    ) -> TextureResult<S::Handle>
    where
        S: BitmapStore + ?Sized,
        M: TextMeasurer + ?Sized,
    {
        profile_function!();

        let key = TextureKey::new(glyphs, font, measurement_char, options)?;

        if store.exists(key.as_str()) {
            self.stats.record_hit();
            tracing::trace!("Texture cache hit: {}", key);
            return store.get(key.as_str()).ok_or_else(|| TextureError::MissingBitmap {
                key: key.into_string(),
            });
        }
        self.stats.record_miss();

        let layout = self.layout(measurer, glyphs, font, measurement_char, options)?;
        let pixels = layout.pixel_size();

        tracing::debug!(
            "Creating {}x{} texture for {} glyph(s): {}",
            pixels.width,
            pixels.height,
            glyphs.len(),
            key
        );

        {
            profile_scope!("paint_glyph_frames");
            let surface = store.create(key.as_str(), pixels.width, pixels.height);
            let mut buf = [0u8; 4];
            for (glyph, frame) in glyphs.iter().zip(&layout.frames) {
                surface.fill_rect(frame.x, frame.y, frame.width, frame.height, glyph.bg());
                surface.draw_text(
                    glyph.ch().encode_utf8(&mut buf),
                    frame.x + frame.width / 2.0,
                    frame.y + frame.height / 2.0,
                    glyph.fg(),
                    font,
                );
            }
        }
        self.created += 1;

        store.get(key.as_str()).ok_or_else(|| TextureError::MissingBitmap {
            key: key.into_string(),
        })
    }

    /// Frame rectangles of the texture for `glyphs`.
    ///
    /// Each glyph gets the per-axis max of its own frame and the frame of
    /// `measurement_char`. Frames are placed left to right and share the
    /// tallest height.
    pub fn layout<M>(
        &mut self,
        measurer: &mut M,
        glyphs: &[Glyph],
        font: &Font,
        measurement_char: char,
        options: FrameOptions,
    ) -> TextureResult<TextureLayout>
    where
        M: TextMeasurer + ?Sized,
    {
        if glyphs.is_empty() {
            return Err(TextureError::EmptyStack);
        }

        let default_frame =
            self.frames
                .get_frame_dimensions(measurer, measurement_char, font, options)?;

        let mut sizes = Vec::with_capacity(glyphs.len());
        for glyph in glyphs {
            let own = self
                .frames
                .get_frame_dimensions(measurer, glyph.ch(), font, options)?;
            sizes.push(own.max(default_frame));
        }

        let height = sizes
            .iter()
            .map(|frame| frame.height)
            .fold(0.0_f32, f32::max);
        let mut cursor = 0.0;
        let frames = sizes
            .iter()
            .map(|frame| {
                let rect = Rect::new(cursor, 0.0, frame.width, height);
                cursor += frame.width;
                rect
            })
            .collect();

        Ok(TextureLayout {
            frames,
            size: Size::new(cursor, height),
        })
    }

    /// [`TextureCache::get_texture`] for unnormalized glyphs.
    pub fn get_texture_like<S, M>(
        &mut self,
        store: &mut S,
        measurer: &mut M,
        glyphs: &[GlyphLike],
        font: &Font,
        measurement_char: char,
        options: FrameOptions,
    ) -> TextureResult<S::Handle>
    where
        S: BitmapStore + ?Sized,
        M: TextMeasurer + ?Sized,
    {
        let glyphs = normalize_glyphs(glyphs.iter().cloned())?;
        self.get_texture(store, measurer, &glyphs, font, measurement_char, options)
    }

    pub fn frames(&self) -> &FrameDimensionCache {
        &self.frames
    }

    pub fn frames_mut(&mut self) -> &mut FrameDimensionCache {
        &mut self.frames
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Number of textures this cache has painted.
    pub fn created(&self) -> u64 {
        self.created
    }

    /// Reset statistics and forget measured frames.
    ///
    /// Bitmaps already in the store are left alone; clear the store too when
    /// fonts were reloaded.
    pub fn clear(&mut self) {
        self.frames.clear();
        self.stats = CacheStats::default();
        self.created = 0;
    }

    pub fn stats_string(&self) -> String {
        format!(
            "{}; {}",
            self.stats.summary("TextureCache", self.created as usize),
            self.frames.stats_string()
        )
    }
}

impl Default for TextureCache {
    fn default() -> Self {
        Self::new()
    }
}
