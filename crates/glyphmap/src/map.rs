//! A positioned, cullable glyph grid.

use glyphmap_core::geometry::Rect;
use glyphmap_core::math::{IVec2, Vec2};
use glyphmap_core::profiling::{profile_function, profile_scope};
use glyphmap_glyph::{Glyph, GlyphLike, GlyphResult};
use glyphmap_text::{BitmapStore, TextMeasurer, TextResult, TextureLayout, TextureResult};

use crate::config::GlyphMapConfig;
use crate::culling::{CullParams, cull_rect};
use crate::dispatch::{Camera, CellSink, DispatchStats, DrawCommand, VisibleCells};
use crate::grid::SparseGrid;
use crate::plugin::GlyphPlugin;

/// A sparse grid of glyph stacks placed in world space.
///
/// Cell size comes from the plugin's measurement character and is cached
/// together with the plugin id and generation it was computed at. Call
/// [`GlyphMap::update`] (or [`GlyphMap::render`], which does it for you)
/// after plugin settings change.
#[derive(Debug, Clone)]
pub struct GlyphMap {
    grid: SparseGrid,
    position: Vec2,
    scale: Vec2,
    scroll_factor: Vec2,
    cull_padding: IVec2,
    skip_cull: bool,
    cell_size: Option<CachedCellSize>,
}

#[derive(Debug, Clone, Copy)]
struct CachedCellSize {
    plugin: u64,
    generation: u64,
    size: Vec2,
}

impl GlyphMap {
    pub fn new(config: GlyphMapConfig) -> Self {
        Self {
            grid: SparseGrid::new(config.width, config.height),
            position: config.position,
            scale: config.scale,
            scroll_factor: config.scroll_factor,
            cull_padding: config.cull_padding,
            skip_cull: config.skip_cull,
            cell_size: None,
        }
    }

    pub fn grid(&self) -> &SparseGrid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut SparseGrid {
        &mut self.grid
    }

    pub fn width(&self) -> u32 {
        self.grid.width()
    }

    pub fn height(&self) -> u32 {
        self.grid.height()
    }

    pub fn check_bounds(&self, x: i32, y: i32) -> bool {
        self.grid.check_bounds(x, y)
    }

    pub fn draw(&mut self, x: i32, y: i32, glyphs: &[Glyph]) {
        self.grid.draw(x, y, glyphs);
    }

    pub fn draw_like(&mut self, x: i32, y: i32, glyphs: &[GlyphLike]) -> GlyphResult<()> {
        self.grid.draw_like(x, y, glyphs)
    }

    pub fn erase(&mut self, x: i32, y: i32) {
        self.grid.erase(x, y);
    }

    pub fn clear(&mut self) {
        self.grid.clear();
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn scale(&self) -> Vec2 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: Vec2) {
        if self.scale != scale {
            self.scale = scale;
            self.cell_size = None;
        }
    }

    pub fn scroll_factor(&self) -> Vec2 {
        self.scroll_factor
    }

    pub fn set_scroll_factor(&mut self, scroll_factor: Vec2) {
        self.scroll_factor = scroll_factor;
    }

    pub fn cull_padding(&self) -> IVec2 {
        self.cull_padding
    }

    pub fn set_cull_padding(&mut self, padding: IVec2) {
        self.cull_padding = padding;
    }

    pub fn skip_cull(&self) -> bool {
        self.skip_cull
    }

    pub fn set_skip_cull(&mut self, skip: bool) {
        self.skip_cull = skip;
    }

    /// Bring the cached cell size up to date with `plugin` and return it.
    pub fn update<M: TextMeasurer>(&mut self, plugin: &mut GlyphPlugin<M>) -> TextResult<Vec2> {
        let generation = plugin.generation();
        if let Some(cached) = self.cell_size
            && cached.plugin == plugin.id()
            && cached.generation == generation
        {
            return Ok(cached.size);
        }

        let frame = plugin.cell_dimensions()?;
        let size = Vec2::new(frame.width, frame.height) * self.scale;
        tracing::debug!(
            "GlyphMap: cell size {}x{} from plugin {} at generation {}",
            size.x,
            size.y,
            plugin.id(),
            generation
        );
        self.cell_size = Some(CachedCellSize {
            plugin: plugin.id(),
            generation,
            size,
        });
        Ok(size)
    }

    /// Cell size from the last [`GlyphMap::update`], if any.
    pub fn cell_size(&self) -> Option<Vec2> {
        self.cell_size.map(|cached| cached.size)
    }

    /// Cell containing a world position. `None` before the first update.
    pub fn world_to_cell(&self, world: Vec2) -> Option<IVec2> {
        let size = self.usable_cell_size()?;
        Some(((world - self.position) / size).floor().as_ivec2())
    }

    /// World position of a cell's top-left corner. `None` before the first update.
    pub fn cell_to_world(&self, x: i32, y: i32) -> Option<Vec2> {
        let size = self.usable_cell_size()?;
        Some(self.position + IVec2::new(x, y).as_vec2() * size)
    }

    fn usable_cell_size(&self) -> Option<Vec2> {
        self.cell_size()
            .filter(|size| size.is_finite() && size.x > 0.0 && size.y > 0.0)
    }

    /// Cull rectangle for `camera` using the last computed cell size.
    ///
    /// Before the first update there is no cell size and the whole grid is
    /// returned.
    pub fn cull_rect(&self, camera: &Camera) -> Rect<i32> {
        cull_rect(&CullParams {
            view: camera.world_view,
            map_position: self.position,
            cell_size: self.cell_size().unwrap_or(Vec2::ZERO),
            scroll_factor: self.scroll_factor,
            padding: self.cull_padding,
            skip_cull: self.skip_cull,
            grid_width: self.grid.width(),
            grid_height: self.grid.height(),
        })
    }

    /// Populated cells visible from `camera`, in row-major order.
    ///
    /// Computed fresh on every call.
    pub fn visible_cells(&self, camera: &Camera) -> VisibleCells<'_> {
        VisibleCells::new(&self.grid, self.cull_rect(camera))
    }

    /// Glyph stack at `(x, y)` in paint order.
    pub fn cell_glyphs(&self, x: i32, y: i32) -> GlyphResult<Vec<Glyph>> {
        self.grid.glyphs_at(x, y)
    }

    /// Texture for a glyph stack using the plugin's current settings.
    pub fn resolve_texture<M, S>(
        &self,
        plugin: &mut GlyphPlugin<M>,
        store: &mut S,
        glyphs: &[Glyph],
    ) -> TextureResult<S::Handle>
    where
        M: TextMeasurer,
        S: BitmapStore + ?Sized,
    {
        plugin.get_texture(store, glyphs)
    }

    /// Frame rectangles of the texture [`GlyphMap::resolve_texture`] returns.
    pub fn resolve_layout<M: TextMeasurer>(
        &self,
        plugin: &mut GlyphPlugin<M>,
        glyphs: &[Glyph],
    ) -> TextureResult<TextureLayout> {
        plugin.texture_layout(glyphs)
    }

    /// Run one frame: cull, decode, resolve textures and hand every visible
    /// populated cell to `sink`.
    pub fn render<M, S, K>(
        &mut self,
        plugin: &mut GlyphPlugin<M>,
        store: &mut S,
        camera: &Camera,
        sink: &mut K,
    ) -> TextureResult<DispatchStats>
    where
        M: TextMeasurer,
        S: BitmapStore + ?Sized,
        K: CellSink<S::Handle> + ?Sized,
    {
        profile_function!();

        let size = self.update(plugin)?;
        let created_before = plugin.textures().created();
        let cull = self.cull_rect(camera);
        let mut drawn = 0;

        for (x, y) in self.visible_cells(camera) {
            profile_scope!("dispatch_cell");
            let glyphs = self.cell_glyphs(x, y)?;
            let texture = self.resolve_texture(plugin, store, &glyphs)?;
            let layout = self.resolve_layout(plugin, &glyphs)?;
            sink.draw_cell(DrawCommand {
                x,
                y,
                world: self.position + IVec2::new(x, y).as_vec2() * size,
                size,
                texture,
                frames: layout.frames,
            });
            drawn += 1;
        }

        let stats = DispatchStats {
            cull_rect: cull,
            drawn,
            textures_created: plugin.textures().created() - created_before,
        };
        tracing::trace!(
            "GlyphMap: drew {} cells ({} new textures), cull rect {:?}",
            stats.drawn,
            stats.textures_created,
            stats.cull_rect
        );
        Ok(stats)
    }
}

impl Default for GlyphMap {
    fn default() -> Self {
        Self::new(GlyphMapConfig::default())
    }
}
