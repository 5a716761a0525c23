use std::rc::Rc;

use log::trace;

use super::Renderer;
use crate::colors::Color;
use crate::context::RenderingContext;
use crate::math::Vec4;
use crate::mesh::Mesh;
use crate::render::rasterizer::draw_line;
use crate::render::shader::LinearInterpolator;

/// Draws every mesh edge once as a depth-tested line. Hidden edges are
/// removed only by whatever depth is already in the buffer.
#[derive(Clone, Debug)]
pub struct WireframeRenderer {
    mesh: Rc<Mesh>,
    pub color: Color,
}

impl WireframeRenderer {
    pub fn new(mesh: Rc<Mesh>, color: Color) -> Self {
        Self { mesh, color }
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }
}

impl Renderer for WireframeRenderer {
    fn render(&mut self, ctx: &mut RenderingContext) {
        let bounds = ctx.screen_bounds();
        let (transforms, mut frame) = ctx.split();
        let model_screen = *transforms.model_screen();

        let mut written = 0;
        for edge in self.mesh.edges() {
            let screen = edge
                .vertices
                .map(|v| model_screen * Vec4::from(self.mesh.vertex(v)));
            written += draw_line(screen, [self.color; 2], &LinearInterpolator, &bounds, &mut frame);
        }

        trace!("wireframe '{}': {} pixels", self.mesh.name(), written);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Mat4;

    #[test]
    fn draws_outline_and_diagonal_only() {
        let mut ctx = RenderingContext::new(16, 16);
        ctx.set_model_world(Mat4::translation(0.0, 0.0, 0.5) * Mat4::scaling(0.5, 0.5, 1.0));
        let mut renderer = WireframeRenderer::new(Rc::new(Mesh::quad()), Color::GREEN);
        renderer.render(&mut ctx);

        let color = ctx.color_buffer();
        for i in 4..=12 {
            assert_eq!(color.get(i, 4), Color::GREEN);
            assert_eq!(color.get(12, i), Color::GREEN);
            assert_eq!(color.get(i, i), Color::GREEN);
        }
        assert_eq!(color.get(8, 5), Color::BLACK);
        assert_eq!(color.get(2, 2), Color::BLACK);
    }
}
