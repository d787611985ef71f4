//! Viewport culling for glyph maps.
//!
//! Culling works in cell units: the camera's world rectangle is moved into
//! map-local space, snapped outward to whole cells and grown by the padding.
//! The result is deliberately not clamped to the grid; callers intersect it
//! with the populated cells.
//!
//! # Example
//!
//! ```
//! use glyphmap::culling::{Aabb, CullParams, cull_rect};
//! use glyphmap_core::geometry::Rect;
//! use glyphmap_core::math::{IVec2, Vec2};
//!
//! let params = CullParams {
//!     view: Aabb::new(0.0, 0.0, 100.0, 70.0),
//!     map_position: Vec2::ZERO,
//!     cell_size: Vec2::new(10.0, 10.0),
//!     scroll_factor: Vec2::ONE,
//!     padding: IVec2::ONE,
//!     skip_cull: false,
//!     grid_width: 80,
//!     grid_height: 25,
//! };
//! assert_eq!(cull_rect(&params), Rect::new(-1, -1, 12, 9));
//! ```

use glyphmap_core::geometry::Rect;
use glyphmap_core::math::{IVec2, Vec2};
use glyphmap_core::profiling::profile_function;

/// Axis-Aligned Bounding Box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum point (top-left).
    pub min: Vec2,
    /// Maximum point (bottom-right).
    pub max: Vec2,
}

impl Aabb {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            max: Vec2::new(x + width, y + height),
        }
    }

    pub fn from_min_max(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Overlap test with open edges: boxes that only touch do not intersect.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    /// Check if this box fully contains another.
    pub fn contains(&self, other: &Aabb) -> bool {
        self.min.x <= other.min.x
            && self.max.x >= other.max.x
            && self.min.y <= other.min.y
            && self.max.y >= other.max.y
    }

    pub fn translate(&self, offset: Vec2) -> Aabb {
        Aabb {
            min: self.min + offset,
            max: self.max + offset,
        }
    }
}

/// Everything the culler needs for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CullParams {
    /// Camera's visible rectangle in world space.
    pub view: Aabb,
    /// World position of the map's top-left corner.
    pub map_position: Vec2,
    /// Size of one cell in world units, scale already applied.
    pub cell_size: Vec2,
    pub scroll_factor: Vec2,
    /// Extra cells kept on every side.
    pub padding: IVec2,
    pub skip_cull: bool,
    pub grid_width: u32,
    pub grid_height: u32,
}

impl CullParams {
    pub fn full_grid(&self) -> Rect<i32> {
        Rect::new(
            0,
            0,
            self.grid_width.min(i32::MAX as u32) as i32,
            self.grid_height.min(i32::MAX as u32) as i32,
        )
    }
}

fn cell_floor(offset: f32, cell: f32) -> i32 {
    (offset / cell).floor() as i32
}

fn cell_ceil(offset: f32, cell: f32) -> i32 {
    (offset / cell).ceil() as i32
}

/// Rectangle of cell coordinates to consider for drawing.
///
/// Returns the whole grid when culling is skipped, when the map does not
/// scroll 1:1 with the camera, or when the cell size is not a positive
/// finite number.
pub fn cull_rect(params: &CullParams) -> Rect<i32> {
    profile_function!();

    let cell = params.cell_size;
    let usable_cell = cell.is_finite() && cell.x > 0.0 && cell.y > 0.0;
    if params.skip_cull || params.scroll_factor != Vec2::ONE || !usable_cell {
        return params.full_grid();
    }

    let local = params.view.translate(-params.map_position);
    let left = cell_floor(local.min.x, cell.x).saturating_sub(params.padding.x);
    let top = cell_floor(local.min.y, cell.y).saturating_sub(params.padding.y);
    let right = cell_ceil(local.max.x, cell.x).saturating_add(params.padding.x);
    let bottom = cell_ceil(local.max.y, cell.y).saturating_add(params.padding.y);

    Rect::new(
        left,
        top,
        right.saturating_sub(left).max(0),
        bottom.saturating_sub(top).max(0),
    )
}
