//! Test utilities for glyphmap.
//!
//! Recording mocks for the external collaborators the core talks to:
//!
//! - [`MockBitmapStore`] / [`MockSurface`] - a [`BitmapStore`] that keeps every
//!   paint call so tests can check what a texture would look like
//! - [`FixedMeasurer`] - a deterministic [`TextMeasurer`] with configurable
//!   per-character advances
//!
//! # Example
//!
//! ```rust
//! use glyphmap_glyph::{Glyph, Rgba8};
//! use glyphmap_test_utils::{FixedMeasurer, MockBitmapStore};
//! use glyphmap_text::{Font, FrameOptions, TextureCache};
//!
//! let mut store = MockBitmapStore::new();
//! let mut measurer = FixedMeasurer::new();
//! let mut textures = TextureCache::new();
//!
//! let glyph = Glyph::with_fg('#', Rgba8::WHITE).unwrap();
//! let font = Font::monospace(10.0);
//! for _ in 0..3 {
//!     textures
//!         .get_texture(&mut store, &mut measurer, &[glyph], &font, '#', FrameOptions::new())
//!         .unwrap();
//! }
//!
//! assert_eq!(store.count_creates(), 1);
//! ```

mod measurer;
mod store;

pub use measurer::FixedMeasurer;
pub use store::{MockBitmapStore, MockSurface, MockTexture, PaintCall, StoreCall};

#[doc(no_inline)]
pub use glyphmap_text::{BitmapStore, PaintSurface, TextMeasurer};
