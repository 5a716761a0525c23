use std::rc::Rc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use silhouette::math::{Bounds3, Vec3, Vec4};
use silhouette::prelude::*;
use silhouette::render::{draw_line, draw_triangle, FrameBuffer};

const BUFFER_WIDTH: usize = 800;
const BUFFER_HEIGHT: usize = 600;

fn screen_bounds() -> Bounds3 {
    Bounds3::new(Vec3::ZERO, Vec3::new(BUFFER_WIDTH as f32, BUFFER_HEIGHT as f32, 1.0))
}

fn small_triangle() -> [Vec4; 3] {
    [
        Vec4::new(100.0, 100.0, 0.5, 1.0),
        Vec4::new(120.0, 100.0, 0.5, 1.0),
        Vec4::new(110.0, 120.0, 0.5, 1.0),
    ]
}

fn medium_triangle() -> [Vec4; 3] {
    [
        Vec4::new(100.0, 100.0, 0.5, 1.0),
        Vec4::new(300.0, 100.0, 0.5, 1.0),
        Vec4::new(200.0, 300.0, 0.5, 1.0),
    ]
}

fn large_triangle() -> [Vec4; 3] {
    [
        Vec4::new(50.0, 50.0, 0.5, 1.0),
        Vec4::new(750.0, 100.0, 0.5, 1.0),
        Vec4::new(400.0, 550.0, 0.5, 1.0),
    ]
}

fn benchmark_single_triangle(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_triangle");
    let bounds = screen_bounds();

    for (name, triangle) in [
        ("small", small_triangle()),
        ("medium", medium_triangle()),
        ("large", large_triangle()),
    ] {
        group.bench_with_input(BenchmarkId::new("flat", name), &triangle, |b, tri| {
            let mut color = Buffer::new(BUFFER_WIDTH, BUFFER_HEIGHT, Color::BLACK);
            let mut depth = Buffer::new(BUFFER_WIDTH, BUFFER_HEIGHT, 1.0f32);
            b.iter(|| {
                let mut fb = FrameBuffer::new(&mut color, &mut depth);
                draw_triangle(black_box(*tri), [Color::RED; 3], &LinearInterpolator, &bounds, &mut fb)
            });
        });

        group.bench_with_input(BenchmarkId::new("interpolated", name), &triangle, |b, tri| {
            let mut color = Buffer::new(BUFFER_WIDTH, BUFFER_HEIGHT, Color::BLACK);
            let mut depth = Buffer::new(BUFFER_WIDTH, BUFFER_HEIGHT, 1.0f32);
            let colors = [Color::RED, Color::GREEN, Color::BLUE];
            b.iter(|| {
                let mut fb = FrameBuffer::new(&mut color, &mut depth);
                draw_triangle(black_box(*tri), colors, &LinearInterpolator, &bounds, &mut fb)
            });
        });
    }

    group.finish();
}

fn benchmark_lines(c: &mut Criterion) {
    let bounds = screen_bounds();
    let mut color = Buffer::new(BUFFER_WIDTH, BUFFER_HEIGHT, Color::BLACK);
    let mut depth = Buffer::new(BUFFER_WIDTH, BUFFER_HEIGHT, 1.0f32);

    c.bench_function("line_fan", |b| {
        b.iter(|| {
            let mut fb = FrameBuffer::new(&mut color, &mut depth);
            let center = Vec4::new(400.0, 300.0, 0.5, 1.0);
            let mut written = 0;
            for i in 0..64 {
                let angle = i as f32 * std::f32::consts::TAU / 64.0;
                let end = Vec4::new(400.0 + 250.0 * angle.cos(), 300.0 + 250.0 * angle.sin(), 0.5, 1.0);
                written += draw_line([center, end], [Color::WHITE; 2], &LinearInterpolator, &bounds, &mut fb);
            }
            black_box(written)
        });
    });
}

fn cube_scene(renderer: impl Renderer + 'static) -> Scene {
    let mut scene = Scene::new();
    let mut pose = Transform::default();
    pose.rotate_y(0.6).rotate_x(0.4);
    if let Ok(node) = scene.spawn(scene.root(), "cube", pose) {
        let _ = scene.add_renderer(node, renderer);
    }
    scene
}

fn benchmark_cube_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("cube_frame");
    let config = EngineConfig {
        width: BUFFER_WIDTH,
        height: BUFFER_HEIGHT,
        ..Default::default()
    };
    let camera = Camera::looking_at(
        Vec3::new(0.0, 0.0, 5.0),
        Vec3::ZERO,
        Projection::perspective_degrees(60.0, config.aspect_ratio(), 0.1, 100.0),
    );
    let mesh = Rc::new(Mesh::cube().with_flat_normals());

    let scenes: [(&str, Scene); 3] = [
        ("lit", cube_scene(ShadedRenderer::new(mesh.clone(), LitShader::default()))),
        (
            "depth_contour",
            cube_scene(DepthContourRenderer::new(
                mesh.clone(),
                LitShader::default(),
                ContourConfig::default(),
            )),
        ),
        ("edge_contour", cube_scene(EdgeContourRenderer::new(mesh, Color::WHITE))),
    ];

    for (name, mut scene) in scenes {
        let mut engine = Engine::with_camera(config, camera);
        group.bench_function(name, |b| {
            b.iter(|| {
                engine.clear_buffers();
                black_box(engine.render(&mut scene))
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_single_triangle,
    benchmark_lines,
    benchmark_cube_frame
);
criterion_main!(benches);
