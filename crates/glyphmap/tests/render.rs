//! End-to-end frame dispatch against the recording mocks.

use glyphmap::prelude::*;
use glyphmap_test_utils::{FixedMeasurer, MockBitmapStore, MockTexture};

fn plugin() -> GlyphPlugin<FixedMeasurer> {
    GlyphPlugin::new(
        FixedMeasurer::with_advance(10.0),
        GlyphPluginConfig::new().with_font(Font::monospace(10.0)),
    )
}

fn wall() -> Glyph {
    Glyph::new('#', Rgba8::rgb(200, 200, 200), Rgba8::rgb(30, 30, 30)).unwrap()
}

fn player() -> Glyph {
    Glyph::with_fg('@', Rgba8::rgb(255, 255, 0)).unwrap()
}

#[test]
fn test_only_visible_populated_cells_are_drawn() {
    let mut plugin = plugin();
    let mut store = MockBitmapStore::new();
    let mut map = GlyphMap::new(GlyphMapConfig::new(10_000, 10_000));

    map.draw(0, 0, &[wall()]);
    map.draw(5, 3, &[wall(), player()]);
    map.draw(10, 6, &[wall()]);
    map.draw(500, 500, &[wall()]);

    let camera = Camera::new(0.0, 0.0, 100.0, 70.0);
    let mut commands: Vec<DrawCommand<MockTexture>> = Vec::new();
    let stats = map
        .render(&mut plugin, &mut store, &camera, &mut commands)
        .unwrap();

    // (10, 6) sits in the padding column.
    let cells: Vec<(i32, i32)> = commands.iter().map(|c| (c.x, c.y)).collect();
    assert_eq!(cells, vec![(0, 0), (5, 3), (10, 6)]);
    assert_eq!(stats.drawn, 3);
    assert_eq!(stats.cull_rect, Rect::new(-1, -1, 12, 9));
    assert_eq!(stats.textures_created, 2);

    assert_eq!(commands[1].world, Vec2::new(50.0, 30.0));
    assert_eq!(commands[1].size, Vec2::new(10.0, 10.0));
    assert_eq!(commands[0].texture, commands[2].texture);
    assert_ne!(commands[0].texture, commands[1].texture);
    assert_eq!((commands[1].texture.width, commands[1].texture.height), (20, 10));
    assert_eq!(
        commands[1].frames,
        vec![Rect::new(0.0, 0.0, 10.0, 10.0), Rect::new(10.0, 0.0, 10.0, 10.0)]
    );
    assert_eq!(commands[0].frames, vec![Rect::new(0.0, 0.0, 10.0, 10.0)]);
}

#[test]
fn test_stacked_frames_of_mixed_widths() {
    let mut plugin = GlyphPlugin::new(
        FixedMeasurer::with_advance(10.0).with_char('@', 25.0),
        GlyphPluginConfig::new().with_font(Font::monospace(10.0)),
    );
    let mut store = MockBitmapStore::new();
    let mut map = GlyphMap::new(GlyphMapConfig::new(4, 4));
    map.draw(0, 0, &[wall(), player(), wall()]);

    let mut commands: Vec<DrawCommand<MockTexture>> = Vec::new();
    map.render(&mut plugin, &mut store, &Camera::new(0.0, 0.0, 40.0, 40.0), &mut commands)
        .unwrap();

    let command = &commands[0];
    assert_eq!(command.size, Vec2::new(10.0, 10.0));
    assert_eq!(
        command.frames,
        vec![
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Rect::new(10.0, 0.0, 25.0, 10.0),
            Rect::new(35.0, 0.0, 10.0, 10.0),
        ]
    );
    assert_eq!((command.texture.width, command.texture.height), (45, 10));
}

#[test]
fn test_switching_plugins_remeasures_cells() {
    let mut small = plugin();
    let mut large = GlyphPlugin::new(
        FixedMeasurer::with_advance(30.0),
        GlyphPluginConfig::new().with_font(Font::monospace(30.0)),
    );
    let mut store = MockBitmapStore::new();
    let mut map = GlyphMap::new(GlyphMapConfig::new(10, 10).with_skip_cull(true));
    map.draw(1, 1, &[wall()]);
    let camera = Camera::new(0.0, 0.0, 100.0, 100.0);

    let mut commands: Vec<DrawCommand<MockTexture>> = Vec::new();
    map.render(&mut small, &mut store, &camera, &mut commands)
        .unwrap();
    assert_eq!(commands[0].size, Vec2::new(10.0, 10.0));

    commands.clear();
    map.render(&mut large, &mut store, &camera, &mut commands)
        .unwrap();
    assert_eq!(commands[0].size, Vec2::new(30.0, 30.0));
    assert_eq!(commands[0].world, Vec2::new(30.0, 30.0));
    assert_eq!((commands[0].texture.width, commands[0].texture.height), (30, 30));
}

#[test]
fn test_second_frame_reuses_textures() {
    let mut plugin = plugin();
    let mut store = MockBitmapStore::new();
    let mut map = GlyphMap::default();
    map.draw(1, 1, &[wall()]);
    map.draw(2, 1, &[wall()]);

    let camera = Camera::new(0.0, 0.0, 800.0, 250.0);
    let mut first = Vec::new();
    map.render(&mut plugin, &mut store, &camera, &mut |c: DrawCommand<MockTexture>| {
        first.push(c.texture)
    })
    .unwrap();

    let mut second = Vec::new();
    let stats = map
        .render(&mut plugin, &mut store, &camera, &mut |c: DrawCommand<MockTexture>| {
            second.push(c.texture)
        })
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(stats.textures_created, 0);
    assert_eq!(store.count_creates(), 1);
}

#[test]
fn test_visible_cells_is_restartable() {
    let mut plugin = plugin();
    let mut map = GlyphMap::new(GlyphMapConfig::new(50, 50));
    map.update(&mut plugin).unwrap();
    map.draw(1, 1, &[wall()]);
    map.draw(3, 2, &[player()]);

    let camera = Camera::new(0.0, 0.0, 40.0, 40.0);
    let first: Vec<_> = map.visible_cells(&camera).collect();
    let second: Vec<_> = map.visible_cells(&camera).collect();
    assert_eq!(first, vec![(1, 1), (3, 2)]);
    assert_eq!(first, second);

    map.erase(1, 1);
    assert_eq!(map.visible_cells(&camera).collect::<Vec<_>>(), vec![(3, 2)]);
}

#[test]
fn test_scrolled_far_away_draws_nothing() {
    let mut plugin = plugin();
    let mut store = MockBitmapStore::new();
    let mut map = GlyphMap::new(GlyphMapConfig::new(100, 100));
    map.draw(0, 0, &[wall()]);

    let camera = Camera::new(-50_000.0, 90_000.0, 100.0, 70.0);
    let mut commands: Vec<DrawCommand<MockTexture>> = Vec::new();
    let stats = map
        .render(&mut plugin, &mut store, &camera, &mut commands)
        .unwrap();

    assert!(commands.is_empty());
    assert_eq!(stats.drawn, 0);
    assert!(store.is_empty());
}

#[test]
fn test_plugin_changes_resize_cells() {
    let mut plugin = plugin();
    let mut store = MockBitmapStore::new();
    let mut map = GlyphMap::new(GlyphMapConfig::new(10, 10).with_skip_cull(true));
    map.draw(1, 0, &[player()]);

    let camera = Camera::new(0.0, 0.0, 10.0, 10.0);
    let mut commands: Vec<DrawCommand<MockTexture>> = Vec::new();
    map.render(&mut plugin, &mut store, &camera, &mut commands)
        .unwrap();
    assert_eq!(commands[0].world, Vec2::new(10.0, 0.0));

    plugin.set_font(Font::monospace(30.0));
    commands.clear();
    map.render(&mut plugin, &mut store, &camera, &mut commands)
        .unwrap();
    assert_eq!(commands[0].size, Vec2::new(10.0, 30.0));
    assert_eq!(commands[0].world, Vec2::new(10.0, 0.0));
    assert_eq!(store.count_creates(), 2);
}
