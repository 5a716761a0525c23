use std::f32::consts::{FRAC_PI_2, PI};
use std::rc::Rc;

use silhouette::prelude::*;

const SIZE: usize = 32;

/// 32x32 target looking down -Z with world [-2, 2] filling the frame, so
/// world (x, y) lands on pixel (8x + 16, 8y + 16).
fn engine() -> Engine {
    let config = EngineConfig {
        width: SIZE,
        height: SIZE,
        ..Default::default()
    };
    let camera = Camera::new(
        Transform::from_origin(Vec3::new(0.0, 0.0, 5.0)),
        Projection::orthographic(4.0, 1.0, 1.0, 10.0),
    );
    Engine::with_camera(config, camera)
}

fn square(half: f32) -> Mesh {
    let vertices = vec![
        Vec3::new(-half, -half, 0.0),
        Vec3::new(half, -half, 0.0),
        Vec3::new(half, half, 0.0),
        Vec3::new(-half, half, 0.0),
    ];
    let triangles = vec![Triangle::from_vertices(0, 1, 2), Triangle::from_vertices(0, 2, 3)];
    Mesh::new(vertices, Vec::new(), Vec::new(), triangles).unwrap()
}

fn add_square(scene: &mut Scene, origin: Vec3, color: Color) -> NodeId {
    let node = scene
        .spawn(scene.root(), "square", Transform::from_origin(origin))
        .unwrap();
    scene
        .add_renderer(node, FilledRenderer::new(Rc::new(Mesh::quad()), color))
        .unwrap();
    node
}

#[test]
fn nearer_surface_wins_regardless_of_order() {
    let far = Vec3::new(0.0, 0.0, 0.0);
    let near = Vec3::new(0.5, 0.0, 1.0);

    for near_first in [false, true] {
        let mut scene = Scene::new();
        if near_first {
            add_square(&mut scene, near, Color::BLUE);
            add_square(&mut scene, far, Color::RED);
        } else {
            add_square(&mut scene, far, Color::RED);
            add_square(&mut scene, near, Color::BLUE);
        }

        let mut engine = engine();
        engine.render(&mut scene);

        let color = engine.color_buffer();
        assert_eq!(color.get(18, 16), Color::BLUE, "overlap, near_first = {near_first}");
        assert_eq!(color.get(10, 16), Color::RED);
        assert_eq!(color.get(26, 16), Color::BLUE);
        assert!(engine.depth_buffer().get(18, 16) < engine.depth_buffer().get(10, 16));
    }
}

#[test]
fn surfaces_facing_away_are_culled() {
    let mut scene = Scene::new();
    let node = add_square(&mut scene, Vec3::ZERO, Color::RED);
    scene
        .node_mut(node)
        .unwrap()
        .transform
        .set_rotation(Quat::from_rotation_y(PI));

    let mut engine = engine();
    engine.render(&mut scene);
    assert!(engine.color_buffer().as_slice().iter().all(|&c| c == Color::BLACK));
    assert!(engine.depth_buffer().as_slice().iter().all(|&d| d == 1.0));
}

#[test]
fn child_is_drawn_at_composed_pose() {
    let mut scene = Scene::new();
    let parent = scene
        .spawn(
            scene.root(),
            "parent",
            Transform::new(Vec3::new(1.0, 0.0, 0.0), Quat::from_rotation_z(FRAC_PI_2)),
        )
        .unwrap();
    let child = scene
        .spawn(parent, "child", Transform::from_origin(Vec3::new(0.5, 0.0, 0.0)))
        .unwrap();
    scene
        .add_renderer(child, FilledRenderer::new(Rc::new(square(0.25)), Color::GREEN))
        .unwrap();

    let mut engine = engine();
    assert_eq!(engine.render(&mut scene), 3);

    // Child origin: (1, 0) + rotate_z(90°) * (0.5, 0) = (1, 0.5) -> pixel (24, 20).
    let color = engine.color_buffer();
    assert_eq!(color.get(24, 20), Color::GREEN);
    assert_eq!(color.get(16, 16), Color::BLACK);
    assert_eq!(color.get(20, 16), Color::BLACK);
}

#[test]
fn lit_cube_shades_faces_differently() {
    let mut scene = Scene::new();
    let mut pose = Transform::default();
    pose.rotate_y(0.6).rotate_x(0.4);
    let node = scene.spawn(scene.root(), "cube", pose).unwrap();
    let mesh = Rc::new(Mesh::cube().with_flat_normals());
    let shader = LitShader {
        light_direction: Vec3::new(-0.3, -0.5, -1.0),
        shininess: 1000.0,
        ..Default::default()
    };
    scene
        .add_renderer(node, ShadedRenderer::new(mesh, shader))
        .unwrap();

    let mut engine = engine();
    engine.render(&mut scene);

    let mut shades: Vec<[u8; 4]> = engine
        .color_buffer()
        .as_slice()
        .iter()
        .filter(|&&c| c != Color::BLACK)
        .map(|c| c.to_rgba8())
        .collect();
    shades.sort_unstable();
    shades.dedup();
    assert!(shades.len() >= 3, "expected one shade per visible face, got {shades:?}");
}
