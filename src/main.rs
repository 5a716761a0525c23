use std::rc::Rc;

use log::{error, info};
use silhouette::prelude::*;
use silhouette::window::{FrameLimiter, FrameTexture, Window, WindowEvent, DEFAULT_FPS};

const WINDOW_WIDTH: u32 = 800;
const WINDOW_HEIGHT: u32 = 600;

/// The OBJ given on the command line, or the built-in cube.
fn load_mesh() -> Mesh {
    let Some(path) = std::env::args().nth(1) else {
        return Mesh::cube();
    };
    match silhouette::assets::load_obj(&path) {
        Ok(mut meshes) if !meshes.is_empty() => meshes.swap_remove(0),
        Ok(_) => Mesh::cube(),
        Err(e) => {
            error!("{e}; falling back to the cube");
            Mesh::cube()
        }
    }
}

fn build_scene(mesh: Mesh) -> Result<(Scene, NodeId, f32), SceneError> {
    let bounds = mesh.bounds();
    let radius = ((bounds.max - bounds.min).magnitude() * 0.5).max(0.1);
    let center = (bounds.min + bounds.max) * 0.5;

    let mesh = Rc::new(if mesh.normals().is_empty() {
        mesh.with_flat_normals()
    } else {
        mesh
    });
    let satellite_mesh = Rc::new(Mesh::cube().with_flat_normals());

    let contour = ContourConfig {
        color: Color::BLACK,
        silhouette_edges: true,
        ..Default::default()
    };

    let mut scene = Scene::new();
    let model = scene.spawn(scene.root(), "model", Transform::from_origin(-center))?;
    scene.add_renderer(
        model,
        DepthContourRenderer::new(mesh.clone(), ToonShader::banded(LitShader::default(), 4), contour),
    )?;

    let mut pose = Transform::from_origin(Vec3::new(radius * 1.6, 0.0, 0.0) + center);
    pose.rotate_z(0.4);
    let satellite = scene.spawn(model, "satellite", pose)?;
    scene.add_renderer(
        satellite,
        ShadedRenderer::new(satellite_mesh.clone(), LitShader {
            diffuse_map: Buffer::single(Color::rgb(0.9, 0.6, 0.3)),
            ..Default::default()
        }),
    )?;
    scene.add_renderer(satellite, EdgeContourRenderer::new(satellite_mesh, Color::BLACK))?;

    Ok((scene, model, radius))
}

fn main() -> Result<(), String> {
    init_logging(LoggingConfig::default());

    let mut window = Window::new("Silhouette", WINDOW_WIDTH, WINDOW_HEIGHT)?;
    let texture_creator = window.texture_creator();
    let mut frame_texture = FrameTexture::new(&texture_creator, WINDOW_WIDTH, WINDOW_HEIGHT)?;
    let mut engine = Engine::new(EngineConfig {
        width: WINDOW_WIDTH as usize,
        height: WINDOW_HEIGHT as usize,
        background: Color::gray(0.85),
        ..Default::default()
    });

    let (mut scene, model, radius) = build_scene(load_mesh()).map_err(|e| e.to_string())?;
    let mut orbit = OrbitController::new(Vec3::ZERO, radius * 3.0);
    orbit.rotate(0.6, 0.3);

    info!("scene ready: {} nodes", scene.len());

    let mut limiter = FrameLimiter::new(&window, DEFAULT_FPS);
    'running: loop {
        for event in window.poll_events() {
            match event {
                WindowEvent::Quit => break 'running,
                WindowEvent::Resize(w, h) => {
                    window.resize(w, h);
                    engine.resize(w as usize, h as usize);
                }
                WindowEvent::Drag(dx, dy) => orbit.rotate(-dx as f32 * 0.01, dy as f32 * 0.01),
                WindowEvent::Scroll(steps) => orbit.zoom(steps * radius * 0.1, radius * 1.2),
            }
        }

        let delta = limiter.wait_and_get_delta(&window) as f32 / 1000.0;
        if let Some(node) = scene.node_mut(model) {
            node.transform.rotate_y(delta * 0.5);
        }
        orbit.apply(engine.camera_mut());

        engine.clear_buffers();
        engine.render(&mut scene);
        window.present(&mut frame_texture, engine.color_buffer())?;
    }

    Ok(())
}
