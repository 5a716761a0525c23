//! Frame driver.
//!
//! The [`Engine`] owns the [`RenderingContext`] and the [`Camera`]. Each
//! call to [`Engine::render`] loads the camera's view and projection into
//! the context and walks the scene graph, setting every node's world matrix
//! before running its renderers. Buffers are only cleared on request, so
//! several scenes can be layered into one frame.

use std::time::Instant;

use log::debug;

use crate::buffer::Buffer;
use crate::camera::Camera;
use crate::colors::Color;
use crate::context::RenderingContext;
use crate::projection::Projection;
use crate::scene::Scene;

/// Frame size and clear values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EngineConfig {
    pub width: usize,
    pub height: usize,
    pub background: Color,
    pub clear_depth: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            background: Color::BLACK,
            clear_depth: 1.0,
        }
    }
}

impl EngineConfig {
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

pub struct Engine {
    context: RenderingContext,
    camera: Camera,
    config: EngineConfig,
}

impl Engine {
    /// Engine with a 60° perspective camera at the origin looking down -Z.
    pub fn new(config: EngineConfig) -> Self {
        let projection = Projection::perspective_degrees(60.0, config.aspect_ratio(), 0.1, 100.0);
        Self::with_camera(config, Camera::new(Default::default(), projection))
    }

    pub fn with_camera(config: EngineConfig, camera: Camera) -> Self {
        Self {
            context: RenderingContext::with_clear_values(
                config.width,
                config.height,
                config.background,
                config.clear_depth,
            ),
            camera,
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn context(&self) -> &RenderingContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut RenderingContext {
        &mut self.context
    }

    pub fn color_buffer(&self) -> &Buffer<Color> {
        self.context.color_buffer()
    }

    pub fn depth_buffer(&self) -> &Buffer<f32> {
        self.context.depth_buffer()
    }

    /// Reset color to the background and depth to the far plane.
    pub fn clear_buffers(&mut self) {
        self.context.clear();
    }

    /// Resize the render targets and keep the projection's aspect ratio in
    /// step with them.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.config.width = width;
        self.config.height = height;
        self.context.resize(width, height);
        self.camera.projection.set_aspect_ratio(self.config.aspect_ratio());
    }

    /// Draw every node reachable from the scene root. Returns the number of
    /// nodes visited.
    pub fn render(&mut self, scene: &mut Scene) -> usize {
        let start = Instant::now();

        self.context.set_world_view(self.camera.world_view());
        self.context.set_view_clip(self.camera.view_clip());

        let context = &mut self.context;
        let mut renderers = 0;
        let visited = scene.visit_mut(|_, global, node| {
            context.set_model_world(global.to_matrix());
            for renderer in node.renderers_mut() {
                renderer.render(context);
                renderers += 1;
            }
        });

        debug!(
            "frame: {} nodes, {} renderers in {:.2?}",
            visited,
            renderers,
            start.elapsed()
        );
        visited
    }
}
