//! Builder-style configuration for plugins and maps.

use glyphmap_core::math::{IVec2, Vec2};
use glyphmap_text::{Font, FrameOptions};
use serde::Deserialize;

/// Settings shared by every map drawn through one [`GlyphPlugin`].
///
/// [`GlyphPlugin`]: crate::GlyphPlugin
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GlyphPluginConfig {
    pub font: Font,
    /// Character whose frame sets the default cell size.
    pub measurement_char: char,
    pub force_square_ratio: bool,
    pub advanced_metrics: bool,
    /// Initial capacity of each frame dimension cache tier.
    pub frame_cache_capacity: usize,
}

impl Default for GlyphPluginConfig {
    fn default() -> Self {
        Self {
            font: Font::default(),
            measurement_char: 'W',
            force_square_ratio: false,
            advanced_metrics: false,
            frame_cache_capacity: 64,
        }
    }
}

impl GlyphPluginConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }

    pub fn with_measurement_char(mut self, ch: char) -> Self {
        self.measurement_char = ch;
        self
    }

    pub fn with_force_square_ratio(mut self, enabled: bool) -> Self {
        self.force_square_ratio = enabled;
        self
    }

    pub fn with_advanced_metrics(mut self, enabled: bool) -> Self {
        self.advanced_metrics = enabled;
        self
    }

    pub fn with_frame_cache_capacity(mut self, capacity: usize) -> Self {
        self.frame_cache_capacity = capacity;
        self
    }

    pub fn frame_options(&self) -> FrameOptions {
        FrameOptions::new()
            .force_square_ratio(self.force_square_ratio)
            .advanced_metrics(self.advanced_metrics)
    }
}

/// Placement and culling settings for one [`GlyphMap`].
///
/// [`GlyphMap`]: crate::GlyphMap
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphMapConfig {
    /// Width in cells.
    pub width: u32,
    /// Height in cells.
    pub height: u32,
    /// World position of the top-left corner.
    pub position: Vec2,
    /// Per-axis scale applied to the plugin's cell size.
    pub scale: Vec2,
    pub scroll_factor: Vec2,
    /// Cells kept beyond each camera edge.
    pub cull_padding: IVec2,
    pub skip_cull: bool,
}

impl Default for GlyphMapConfig {
    fn default() -> Self {
        Self {
            width: 80,
            height: 25,
            position: Vec2::ZERO,
            scale: Vec2::ONE,
            scroll_factor: Vec2::ONE,
            cull_padding: IVec2::ONE,
            skip_cull: false,
        }
    }
}

impl GlyphMapConfig {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn with_position(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_scroll_factor(mut self, scroll_factor: Vec2) -> Self {
        self.scroll_factor = scroll_factor;
        self
    }

    pub fn with_cull_padding(mut self, padding: IVec2) -> Self {
        self.cull_padding = padding;
        self
    }

    pub fn with_skip_cull(mut self, skip: bool) -> Self {
        self.skip_cull = skip;
        self
    }
}
