//! Sparse storage for glyph stacks.
//!
//! A grid has fixed logical dimensions but only allocates for cells that hold
//! at least one glyph. Each populated cell stores the encoded record buffer
//! of its stack, so equality and hashing of cell contents are byte compares.

use glyphmap_core::alloc::HashMap;
use glyphmap_glyph::{
    GLYPH_RECORD_SIZE, Glyph, GlyphLike, GlyphResult, decode_glyph_stack, encode_glyph,
    normalize_glyphs,
};

/// Pack a cell coordinate into a map key. Only called for in-bounds cells.
#[inline]
fn cell_key(x: i32, y: i32) -> u64 {
    ((y as u32 as u64) << 32) | x as u32 as u64
}

#[inline]
fn key_coords(key: u64) -> (i32, i32) {
    ((key & 0xFFFF_FFFF) as u32 as i32, (key >> 32) as u32 as i32)
}

/// A `width x height` grid of glyph stacks where absent means empty.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseGrid {
    width: u32,
    height: u32,
    cells: HashMap<u64, Vec<u8>>,
}

impl SparseGrid {
    /// Dimensions are clamped to `i32::MAX` so every cell is addressable.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.min(i32::MAX as u32),
            height: height.min(i32::MAX as u32),
            cells: HashMap::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// `0 <= x < width && 0 <= y < height`.
    #[inline]
    pub fn check_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    /// Replace the stack at `(x, y)`.
    ///
    /// An empty stack erases the cell. Out-of-bounds coordinates are ignored.
    pub fn draw(&mut self, x: i32, y: i32, glyphs: &[Glyph]) {
        if !self.check_bounds(x, y) {
            return;
        }
        if glyphs.is_empty() {
            self.erase(x, y);
            return;
        }

        let mut bytes = Vec::with_capacity(glyphs.len() * GLYPH_RECORD_SIZE);
        for glyph in glyphs {
            bytes.extend_from_slice(&encode_glyph(glyph));
        }
        self.cells.insert(cell_key(x, y), bytes);
    }

    /// [`SparseGrid::draw`] from unnormalized glyphs.
    ///
    /// Every input is normalized before the cell is touched, so an invalid
    /// entry leaves the grid unchanged.
    pub fn draw_like(&mut self, x: i32, y: i32, glyphs: &[GlyphLike]) -> GlyphResult<()> {
        let glyphs = normalize_glyphs(glyphs.iter().cloned())?;
        self.draw(x, y, &glyphs);
        Ok(())
    }

    /// Remove the cell at `(x, y)` if present.
    pub fn erase(&mut self, x: i32, y: i32) {
        if self.check_bounds(x, y) {
            self.cells.remove(&cell_key(x, y));
        }
    }

    /// Drop every cell. Dimensions are kept.
    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Encoded stack at `(x, y)`.
    pub fn get(&self, x: i32, y: i32) -> Option<&[u8]> {
        if !self.check_bounds(x, y) {
            return None;
        }
        self.cells.get(&cell_key(x, y)).map(Vec::as_slice)
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.get(x, y).is_some()
    }

    /// Decoded stack at `(x, y)` in paint order; empty for empty cells.
    pub fn glyphs_at(&self, x: i32, y: i32) -> GlyphResult<Vec<Glyph>> {
        match self.get(x, y) {
            Some(bytes) => decode_glyph_stack(bytes),
            None => Ok(Vec::new()),
        }
    }

    /// Number of populated cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Populated cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (i32, i32, &[u8])> + '_ {
        let mut keys: Vec<u64> = self.cells.keys().copied().collect();
        keys.sort_unstable();
        keys.into_iter().filter_map(move |key| {
            let (x, y) = key_coords(key);
            self.cells.get(&key).map(|bytes| (x, y, bytes.as_slice()))
        })
    }

    /// Row-major populated cells inside the half-open rectangle
    /// `[left, right) x [top, bottom)`, already clamped to the grid.
    pub(crate) fn populated_in(
        &self,
        left: i32,
        top: i32,
        right: i32,
        bottom: i32,
    ) -> Vec<(i32, i32)> {
        let mut found: Vec<u64> = self
            .cells
            .keys()
            .copied()
            .filter(|&key| {
                let (x, y) = key_coords(key);
                x >= left && x < right && y >= top && y < bottom
            })
            .collect();
        found.sort_unstable();
        found.into_iter().map(key_coords).collect()
    }
}
