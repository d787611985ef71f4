//! Glyphmap - sparse glyph grids with cached glyph textures
//!
//! A glyph is a character with a foreground and background color. This crate
//! stores glyph stacks in a large sparse grid, works out which cells a camera
//! can see, and resolves each visible stack to a cached composite texture:
//!
//! - [`SparseGrid`] stores encoded glyph stacks, allocating only for populated cells
//! - [`culling`] computes the visible cell rectangle for a camera
//! - [`GlyphPlugin`] owns the measurer, caches and glyph settings
//! - [`GlyphMap`] places a grid in the world and drives per-frame dispatch
//!
//! ## Quick Start
//!
//! ```
//! use glyphmap::prelude::*;
//! use glyphmap_test_utils::{FixedMeasurer, MockBitmapStore, MockTexture};
//!
//! let mut plugin = GlyphPlugin::new(
//!     FixedMeasurer::with_advance(8.0),
//!     GlyphPluginConfig::new().with_font(Font::monospace(16.0)),
//! );
//! let mut map = GlyphMap::new(GlyphMapConfig::new(100, 100));
//! map.draw(2, 3, &[Glyph::with_fg('@', Rgba8::WHITE).unwrap()]);
//!
//! let mut store = MockBitmapStore::new();
//! let mut commands: Vec<DrawCommand<MockTexture>> = Vec::new();
//! let stats = map
//!     .render(&mut plugin, &mut store, &Camera::new(0.0, 0.0, 640.0, 480.0), &mut commands)
//!     .unwrap();
//!
//! assert_eq!(stats.drawn, 1);
//! assert_eq!(commands[0].world, Vec2::new(16.0, 48.0));
//! ```
//!
//! Logging goes through `tracing`; call [`glyphmap_core::logging::init`] in
//! binaries to see it.

pub mod config;
pub mod culling;
pub mod dispatch;
pub mod grid;
pub mod map;
pub mod plugin;

pub use glyphmap_core as core;
pub use glyphmap_glyph as glyph;
pub use glyphmap_text as text;

pub use config::{GlyphMapConfig, GlyphPluginConfig};
pub use culling::{Aabb, CullParams, cull_rect};
pub use dispatch::{Camera, CellSink, DispatchStats, DrawCommand, VisibleCells};
pub use grid::SparseGrid;
pub use map::GlyphMap;
pub use plugin::GlyphPlugin;

#[cfg(feature = "cosmic")]
pub use glyphmap_text::CosmicMeasurer;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{GlyphMapConfig, GlyphPluginConfig};
    pub use crate::dispatch::{Camera, CellSink, DispatchStats, DrawCommand};
    pub use crate::map::GlyphMap;
    pub use crate::plugin::GlyphPlugin;

    pub use glyphmap_core::geometry::{Rect, Size};
    pub use glyphmap_core::math::{IVec2, Vec2};
    pub use glyphmap_glyph::{Glyph, GlyphLike, Rgba8};
    pub use glyphmap_text::{BitmapStore, Font, FrameOptions, PaintSurface, TextMeasurer};

    #[cfg(feature = "cosmic")]
    pub use glyphmap_text::CosmicMeasurer;
}
