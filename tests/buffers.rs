use std::rc::Rc;

use silhouette::buffer::color_difference;
use silhouette::prelude::*;

fn render_square(offset: f32) -> Engine {
    let config = EngineConfig {
        width: 16,
        height: 16,
        ..Default::default()
    };
    let camera = Camera::new(
        Transform::from_origin(Vec3::new(0.0, 0.0, 5.0)),
        Projection::orthographic(4.0, 1.0, 1.0, 10.0),
    );
    let mut engine = Engine::with_camera(config, camera);

    let mut scene = Scene::new();
    let node = scene
        .spawn(
            scene.root(),
            "square",
            Transform::from_origin(Vec3::new(offset, 0.0, 0.0)),
        )
        .unwrap();
    scene
        .add_renderer(node, FilledRenderer::new(Rc::new(Mesh::quad()), Color::WHITE))
        .unwrap();
    engine.render(&mut scene);
    engine
}

#[test]
fn identical_frames_have_empty_difference() {
    let a = render_square(0.0);
    let b = render_square(0.0);
    let diff = color_difference(a.color_buffer(), b.color_buffer()).unwrap();
    assert!(diff.as_slice().iter().all(|&c| c == Color::BLACK));
}

#[test]
fn moved_square_shows_up_in_difference() {
    let a = render_square(0.0);
    let b = render_square(0.5);
    let diff = color_difference(a.color_buffer(), b.color_buffer()).unwrap();

    // Square spans pixels 4..=12 in `a` and 6..=14 in `b`.
    assert_eq!(diff.get(5, 8), Color::WHITE);
    assert_eq!(diff.get(14, 8), Color::WHITE);
    assert_eq!(diff.get(8, 8), Color::BLACK);
}

#[test]
fn frame_can_be_copied_through_raw_data() {
    let a = render_square(0.0);
    let mut copy = Buffer::new(16, 16, Color::BLUE);
    copy.set_data(&a.color_buffer().data()).unwrap();
    assert_eq!(&copy.data(), a.color_buffer().as_slice());

    let err = Buffer::new(2, 2, Color::BLACK)
        .set_data(&a.color_buffer().data())
        .unwrap_err();
    assert!(matches!(err, BufferError::DataTooLarge { len: 256, .. }));
}

#[test]
fn depth_visualization_marks_covered_pixels() {
    let a = render_square(0.0);
    let depth = a.depth_buffer().depth_to_color();
    assert_eq!(depth.get(0, 0), Color::BLACK);
    assert!(depth.get(8, 8).luminance() > 0.0);
}
