//! Glyphmap Text - glyph measurement and texture generation
//!
//! This crate turns canonical glyphs into reusable bitmaps:
//! - [`Font`] value type with its canonical CSS string
//! - [`FrameDimensionCache`] for memoized per-character frame sizes
//! - [`TextureCache`] for content-addressed composite textures and their
//!   per-glyph [`TextureLayout`]
//! - Collaborator traits for the rendering backend ([`BitmapStore`],
//!   [`PaintSurface`]) and measurement backend ([`TextMeasurer`])
//! - [`CosmicMeasurer`], a measurement backend on top of cosmic-text
//!   (enabled by the default `cosmic` feature)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use glyphmap_glyph::{Glyph, Rgba8};
//! use glyphmap_text::{CosmicMeasurer, Font, FrameOptions, TextureCache};
//! # fn run<S: glyphmap_text::BitmapStore>(store: &mut S) -> glyphmap_text::TextureResult<()> {
//! let mut measurer = CosmicMeasurer::new();
//! let mut textures = TextureCache::new();
//!
//! let glyph = Glyph::new('@', Rgba8::WHITE, Rgba8::BLACK)?;
//! let handle = textures.get_texture(
//!     store,
//!     &mut measurer,
//!     &[glyph],
//!     &Font::monospace(16.0),
//!     'W',
//!     FrameOptions::new().force_square_ratio(true),
//! )?;
//! # let _ = handle;
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod error;
pub mod font;
pub mod frame;
pub mod measure;
pub mod texture;

#[cfg(feature = "cosmic")]
pub mod cosmic;

pub use cache::CacheStats;
pub use error::{TextError, TextResult, TextureError, TextureResult};
pub use font::{Font, FontStyle, FontVariant, FontWeight};
pub use frame::{FrameDimensionCache, FrameOptions};
pub use measure::{TextMeasurement, TextMeasurer};
pub use texture::{BitmapStore, PaintSurface, TextureCache, TextureKey, TextureLayout};

#[cfg(feature = "cosmic")]
pub use cosmic::CosmicMeasurer;
