use std::rc::Rc;

use log::trace;

use super::Renderer;
use crate::colors::Color;
use crate::context::RenderingContext;
use crate::math::Vec4;
use crate::mesh::Mesh;
use crate::render::rasterizer::draw_triangle;
use crate::render::shader::LinearInterpolator;

/// Draws every front-facing triangle in a single flat color.
#[derive(Clone, Debug)]
pub struct FilledRenderer {
    mesh: Rc<Mesh>,
    pub color: Color,
}

impl FilledRenderer {
    pub fn new(mesh: Rc<Mesh>, color: Color) -> Self {
        Self { mesh, color }
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }
}

impl Renderer for FilledRenderer {
    fn render(&mut self, ctx: &mut RenderingContext) {
        let bounds = ctx.screen_bounds();
        let (transforms, mut frame) = ctx.split();
        let model_screen = *transforms.model_screen();

        let mut written = 0;
        for triangle in self.mesh.triangles() {
            let screen = self
                .mesh
                .triangle_positions(triangle)
                .map(|p| model_screen * Vec4::from(p));
            written += draw_triangle(screen, [self.color; 3], &LinearInterpolator, &bounds, &mut frame);
        }

        trace!("filled '{}': {} pixels", self.mesh.name(), written);
    }
}
