//! Mock bitmap store that records operations instead of allocating pixels.

use std::collections::{BTreeMap, btree_map};

use glyphmap_glyph::Rgba8;
use glyphmap_text::{BitmapStore, Font, PaintSurface};
use parking_lot::Mutex;

/// Records a bitmap store call for verification in tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Exists { key: String },
    Create { key: String, width: u32, height: u32 },
    Get { key: String },
}

/// Records a paint operation on a [`MockSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum PaintCall {
    FillRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Rgba8,
    },
    DrawText {
        text: String,
        center_x: f32,
        center_y: f32,
        color: Rgba8,
        font_css: String,
    },
}

/// A bitmap that remembers how it was painted.
#[derive(Debug, Clone, Default)]
pub struct MockSurface {
    pub width: u32,
    pub height: u32,
    pub calls: Vec<PaintCall>,
}

impl MockSurface {
    /// Text drawn on this surface, in paint order.
    pub fn texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                PaintCall::DrawText { text, .. } => Some(text.as_str()),
                PaintCall::FillRect { .. } => None,
            })
            .collect()
    }
}

impl PaintSurface for MockSurface {
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgba8) {
        self.calls.push(PaintCall::FillRect {
            x,
            y,
            width,
            height,
            color,
        });
    }

    fn draw_text(&mut self, text: &str, center_x: f32, center_y: f32, color: Rgba8, font: &Font) {
        self.calls.push(PaintCall::DrawText {
            text: text.to_owned(),
            center_x,
            center_y,
            color,
            font_css: font.css(),
        });
    }
}

/// Handle returned by [`MockBitmapStore`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MockTexture {
    pub id: usize,
    pub key: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug)]
struct StoredBitmap {
    id: usize,
    surface: MockSurface,
}

/// Mock implementation of [`BitmapStore`] for testing.
///
/// `exists` and `get` take `&self` but still need to be recorded, so the
/// call log lives behind a `parking_lot::Mutex`.
pub struct MockBitmapStore {
    bitmaps: BTreeMap<String, StoredBitmap>,
    calls: Mutex<Vec<StoreCall>>,
    next_id: usize,
}

impl MockBitmapStore {
    pub fn new() -> Self {
        Self {
            bitmaps: BTreeMap::new(),
            calls: Mutex::new(Vec::new()),
            next_id: 0,
        }
    }

    /// Get a copy of all recorded calls.
    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().clone()
    }

    /// Count bitmap creations.
    pub fn count_creates(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| matches!(call, StoreCall::Create { .. }))
            .count()
    }

    /// Clear recorded calls (useful between test steps).
    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    pub fn surface(&self, key: &str) -> Option<&MockSurface> {
        self.bitmaps.get(key).map(|entry| &entry.surface)
    }

    /// Keys of all stored bitmaps, sorted.
    pub fn keys(&self) -> Vec<String> {
        self.bitmaps.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.bitmaps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bitmaps.is_empty()
    }
}

impl Default for MockBitmapStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BitmapStore for MockBitmapStore {
    type Handle = MockTexture;
    type Surface = MockSurface;

    fn exists(&self, key: &str) -> bool {
        self.calls.lock().push(StoreCall::Exists {
            key: key.to_owned(),
        });
        self.bitmaps.contains_key(key)
    }

    fn create(&mut self, key: &str, width: u32, height: u32) -> &mut MockSurface {
        self.calls.lock().push(StoreCall::Create {
            key: key.to_owned(),
            width,
            height,
        });

        let id = self.next_id;
        self.next_id += 1;
        let entry = StoredBitmap {
            id,
            surface: MockSurface {
                width,
                height,
                calls: Vec::new(),
            },
        };
        let slot = match self.bitmaps.entry(key.to_owned()) {
            btree_map::Entry::Occupied(mut occupied) => {
                occupied.insert(entry);
                occupied.into_mut()
            }
            btree_map::Entry::Vacant(vacant) => vacant.insert(entry),
        };
        &mut slot.surface
    }

    fn get(&self, key: &str) -> Option<MockTexture> {
        self.calls.lock().push(StoreCall::Get {
            key: key.to_owned(),
        });
        self.bitmaps.get(key).map(|entry| MockTexture {
            id: entry.id,
            key: key.to_owned(),
            width: entry.surface.width,
            height: entry.surface.height,
        })
    }
}
