//! The per-frame contract between a glyph map and a rendering backend.
//!
//! The map does culling, decoding and texture resolution once. A backend only
//! implements [`CellSink`] to turn [`DrawCommand`]s into real draw calls.

use std::iter::FusedIterator;

use glyphmap_core::geometry::Rect;
use glyphmap_core::math::Vec2;

use crate::culling::Aabb;
use crate::grid::SparseGrid;

/// Camera state supplied by the host once per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Visible rectangle in world space, zoom already applied.
    pub world_view: Aabb,
}

impl Camera {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            world_view: Aabb::new(x, y, width, height),
        }
    }

    pub fn from_view(world_view: Aabb) -> Self {
        Self { world_view }
    }
}

/// One populated, visible cell ready to be drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand<H> {
    pub x: i32,
    pub y: i32,
    /// World position of the cell's top-left corner.
    pub world: Vec2,
    /// Cell size in world units.
    pub size: Vec2,
    pub texture: H,
    /// Glyph frames inside `texture`, in texture pixels and paint order.
    /// Drawing each one over the cell in turn stacks the glyphs.
    pub frames: Vec<Rect<f32>>,
}

/// Receives draw commands from [`GlyphMap::render`].
///
/// [`GlyphMap::render`]: crate::GlyphMap::render
pub trait CellSink<H> {
    fn draw_cell(&mut self, command: DrawCommand<H>);
}

impl<H> CellSink<H> for Vec<DrawCommand<H>> {
    fn draw_cell(&mut self, command: DrawCommand<H>) {
        self.push(command);
    }
}

impl<H, F: FnMut(DrawCommand<H>)> CellSink<H> for F {
    fn draw_cell(&mut self, command: DrawCommand<H>) {
        self(command)
    }
}

/// Statistics from one render pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchStats {
    /// Cull rectangle before intersecting with the grid.
    pub cull_rect: Rect<i32>,
    /// Populated cells handed to the sink.
    pub drawn: usize,
    /// Textures painted during this pass.
    pub textures_created: u64,
}

/// Populated cells inside a cull rectangle, in row-major order.
///
/// Small rectangles are scanned cell by cell. When the rectangle has more
/// cells than the grid has populated entries, the populated entries are
/// filtered instead.
pub struct VisibleCells<'a> {
    inner: Inner<'a>,
}

enum Inner<'a> {
    Empty,
    Scan {
        grid: &'a SparseGrid,
        bounds: Rect<i32>,
        x: i32,
        y: i32,
    },
    Populated(std::vec::IntoIter<(i32, i32)>),
}

impl<'a> VisibleCells<'a> {
    pub(crate) fn new(grid: &'a SparseGrid, cull: Rect<i32>) -> Self {
        let grid_rect = Rect::new(
            0,
            0,
            grid.width().min(i32::MAX as u32) as i32,
            grid.height().min(i32::MAX as u32) as i32,
        );

        let inner = match cull.intersection(&grid_rect) {
            None => Inner::Empty,
            Some(_) if grid.is_empty() => Inner::Empty,
            Some(bounds) => {
                let area = bounds.width as u64 * bounds.height as u64;
                if area > grid.len() as u64 {
                    Inner::Populated(
                        grid.populated_in(bounds.x, bounds.y, bounds.right(), bounds.bottom())
                            .into_iter(),
                    )
                } else {
                    Inner::Scan {
                        grid,
                        bounds,
                        x: bounds.x,
                        y: bounds.y,
                    }
                }
            }
        };
        Self { inner }
    }
}

impl Iterator for VisibleCells<'_> {
    type Item = (i32, i32);

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            Inner::Empty => None,
            Inner::Populated(cells) => cells.next(),
            Inner::Scan { grid, bounds, x, y } => {
                while *y < bounds.bottom() {
                    while *x < bounds.right() {
                        let cell = (*x, *y);
                        *x += 1;
                        if grid.contains(cell.0, cell.1) {
                            return Some(cell);
                        }
                    }
                    *x = bounds.x;
                    *y += 1;
                }
                None
            }
        }
    }
}

impl FusedIterator for VisibleCells<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphmap_glyph::{Glyph, Rgba8};

    fn grid_with(cells: &[(i32, i32)]) -> SparseGrid {
        let mut grid = SparseGrid::new(50, 50);
        let glyph = Glyph::with_fg('x', Rgba8::WHITE).unwrap();
        for &(x, y) in cells {
            grid.draw(x, y, &[glyph]);
        }
        grid
    }

    #[test]
    fn test_scan_and_populated_agree() {
        let grid = grid_with(&[(0, 0), (3, 1), (1, 2), (49, 49), (2, 2)]);

        // 4x3 = 12 cells scanned against 5 populated: filtered path.
        let filtered: Vec<_> = VisibleCells::new(&grid, Rect::new(-1, -1, 5, 4)).collect();
        assert_eq!(filtered, vec![(0, 0), (3, 1), (1, 2), (2, 2)]);

        // 2x2 = 4 cells: scan path.
        let scanned: Vec<_> = VisibleCells::new(&grid, Rect::new(1, 1, 2, 2)).collect();
        assert_eq!(scanned, vec![(1, 2), (2, 2)]);
    }

    #[test]
    fn test_outside_grid_yields_nothing() {
        let grid = grid_with(&[(0, 0)]);
        assert_eq!(VisibleCells::new(&grid, Rect::new(-10, -10, 5, 5)).count(), 0);
        assert_eq!(VisibleCells::new(&grid, Rect::new(60, 0, 5, 5)).count(), 0);
    }

    #[test]
    fn test_closure_sink() {
        let mut seen = Vec::new();
        let mut sink = |command: DrawCommand<u32>| seen.push(command.texture);
        sink.draw_cell(DrawCommand {
            x: 0,
            y: 0,
            world: Vec2::ZERO,
            size: Vec2::ONE,
            texture: 7,
            frames: vec![Rect::new(0.0, 0.0, 8.0, 16.0)],
        });
        assert_eq!(seen, vec![7]);
    }
}
