//! Benchmarks for the per-frame glyph map hot path

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use glyphmap::culling::{Aabb, CullParams, cull_rect};
use glyphmap::prelude::*;
use glyphmap_test_utils::{FixedMeasurer, MockBitmapStore, MockTexture};

fn populated_map(width: u32, height: u32, every: i32) -> GlyphMap {
    let mut map = GlyphMap::new(GlyphMapConfig::new(width, height));
    let floor = Glyph::new('.', Rgba8::rgb(60, 60, 60), Rgba8::BLACK).unwrap();
    let wall = Glyph::new('#', Rgba8::rgb(200, 200, 200), Rgba8::rgb(30, 30, 30)).unwrap();

    for y in (0..height as i32).step_by(every as usize) {
        for x in (0..width as i32).step_by(every as usize) {
            let glyph = if (x + y) % 3 == 0 { wall } else { floor };
            map.draw(x, y, &[glyph]);
        }
    }
    map
}

fn plugin() -> GlyphPlugin<FixedMeasurer> {
    GlyphPlugin::new(
        FixedMeasurer::with_advance(8.0),
        GlyphPluginConfig::new().with_font(Font::monospace(16.0)),
    )
}

fn bench_cull_rect(c: &mut Criterion) {
    let params = CullParams {
        view: Aabb::new(1234.5, 987.6, 1280.0, 720.0),
        map_position: Vec2::new(-40.0, 12.0),
        cell_size: Vec2::new(8.0, 16.0),
        scroll_factor: Vec2::ONE,
        padding: IVec2::ONE,
        skip_cull: false,
        grid_width: 10_000,
        grid_height: 10_000,
    };
    c.bench_function("cull_rect", |b| b.iter(|| black_box(cull_rect(black_box(&params)))));
}

fn bench_render_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_frame");
    let camera = Camera::new(0.0, 0.0, 1280.0, 720.0);

    // Dense screen, sparse screen, and a huge map where the grid is nearly empty.
    for (name, size, every) in [
        ("dense_200", 200u32, 1i32),
        ("sparse_200", 200, 7),
        ("huge_10000", 10_000, 97),
    ] {
        let mut map = populated_map(size, size, every);
        let mut plugin = plugin();
        let mut store = MockBitmapStore::new();
        let mut commands: Vec<DrawCommand<MockTexture>> = Vec::new();

        // Warm the caches so the benchmark measures steady-state frames.
        map.render(&mut plugin, &mut store, &camera, &mut commands)
            .unwrap();
        group.throughput(Throughput::Elements(commands.len() as u64));

        group.bench_with_input(BenchmarkId::from_parameter(name), &camera, |b, camera| {
            b.iter(|| {
                commands.clear();
                black_box(
                    map.render(&mut plugin, &mut store, camera, &mut commands)
                        .unwrap(),
                )
            });
        });
    }

    group.finish();
}

fn bench_visible_cells(c: &mut Criterion) {
    let mut plugin = plugin();
    let mut map = populated_map(10_000, 10_000, 13);
    map.update(&mut plugin).unwrap();
    let camera = Camera::new(40_000.0, 80_000.0, 1920.0, 1080.0);

    c.bench_function("visible_cells_huge_map", |b| {
        b.iter(|| black_box(map.visible_cells(black_box(&camera)).count()))
    });
}

criterion_group!(benches, bench_cull_rect, bench_render_frame, bench_visible_cells);
criterion_main!(benches);
