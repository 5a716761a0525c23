use std::rc::Rc;

use log::trace;

use super::mask_contour::CoverageMask;
use super::{vertex_inputs, Renderer};
use crate::context::{RenderingContext, Transforms};
use crate::mesh::Mesh;
use crate::render::framebuffer::FrameBuffer;
use crate::render::rasterizer::{draw_triangle, RasterTarget};
use crate::render::shader::{FragmentInput, Interpolator, LinearInterpolator, ShaderProgram};

/// Runs a [`ShaderProgram`] over a mesh: the vertex stage once per triangle
/// corner, the color stage once per covered pixel.
#[derive(Clone, Debug)]
pub struct ShadedRenderer<S, I = LinearInterpolator> {
    mesh: Rc<Mesh>,
    pub shader: S,
    pub interpolator: I,
}

impl<S: ShaderProgram> ShadedRenderer<S> {
    pub fn new(mesh: Rc<Mesh>, shader: S) -> Self {
        Self::with_interpolator(mesh, shader, LinearInterpolator)
    }
}

impl<S, I> ShadedRenderer<S, I>
where
    S: ShaderProgram,
    I: Interpolator<FragmentInput<S::Data>>,
{
    pub fn with_interpolator(mesh: Rc<Mesh>, shader: S, interpolator: I) -> Self {
        Self {
            mesh,
            shader,
            interpolator,
        }
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }
}

impl<S, I> Renderer for ShadedRenderer<S, I>
where
    S: ShaderProgram,
    I: Interpolator<FragmentInput<S::Data>>,
{
    fn render(&mut self, ctx: &mut RenderingContext) {
        let written = shade_mesh(&self.mesh, &self.shader, &self.interpolator, ctx, None);
        trace!("shaded '{}': {} pixels", self.mesh.name(), written);
    }
}

/// Pixel sink that runs the color stage on each accepted fragment and
/// optionally records coverage.
struct ShadingTarget<'a, 'm, S> {
    frame: FrameBuffer<'a>,
    transforms: &'a Transforms,
    shader: &'a S,
    mask: Option<&'m mut CoverageMask>,
}

impl<S: ShaderProgram> RasterTarget<FragmentInput<S::Data>> for ShadingTarget<'_, '_, S> {
    #[inline]
    fn test_depth(&self, x: i32, y: i32, depth: f32) -> bool {
        self.frame.test_depth(x, y, depth)
    }

    #[inline]
    fn write_depth(&mut self, x: i32, y: i32, depth: f32) {
        self.frame.write_depth(x, y, depth);
    }

    fn write_pixel(&mut self, x: i32, y: i32, value: FragmentInput<S::Data>) {
        let color = self.shader.compute_color(&value, self.transforms);
        self.frame.set_pixel(x, y, color);
        if let Some(mask) = self.mask.as_deref_mut() {
            mask.mark(x, y);
        }
    }
}

/// Shade every triangle of `mesh` into `ctx`, marking written pixels in
/// `mask` when given. Returns the number of pixels written.
pub(crate) fn shade_mesh<S, I>(
    mesh: &Mesh,
    shader: &S,
    interpolator: &I,
    ctx: &mut RenderingContext,
    mask: Option<&mut CoverageMask>,
) -> usize
where
    S: ShaderProgram,
    I: Interpolator<FragmentInput<S::Data>> + ?Sized,
{
    let bounds = ctx.screen_bounds();
    let (transforms, frame) = ctx.split();
    let clip_screen = *transforms.clip_screen();
    let mut target = ShadingTarget {
        frame,
        transforms,
        shader,
        mask,
    };

    let mut written = 0;
    for triangle in mesh.triangles() {
        let fragments = vertex_inputs(mesh, triangle).map(|input| shader.compute_vertex(&input, transforms));
        let screen = fragments.map(|f| clip_screen * f.position);
        written += draw_triangle(screen, fragments, interpolator, &bounds, &mut target);
    }
    written
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Buffer;
    use crate::colors::Color;
    use crate::math::Mat4;
    use crate::render::shaders::UnlitShader;
    use approx::assert_relative_eq;

    #[test]
    fn samples_texture_across_quad() {
        let mut ctx = RenderingContext::new(16, 16);
        ctx.set_model_world(Mat4::translation(0.0, 0.0, 0.5) * Mat4::scaling(0.5, 0.5, 1.0));

        // 2x2 checker, top row first: red green / blue white.
        let mut texture = Buffer::new(2, 2, Color::BLACK);
        texture.set(0, 0, Color::RED);
        texture.set(1, 0, Color::GREEN);
        texture.set(0, 1, Color::BLUE);
        texture.set(1, 1, Color::WHITE);

        let mut renderer = ShadedRenderer::new(Rc::new(Mesh::quad()), UnlitShader::new(texture));
        renderer.render(&mut ctx);

        let color = ctx.color_buffer();
        assert_relative_eq!(color.get(5, 5), Color::BLUE);
        assert_relative_eq!(color.get(11, 5), Color::WHITE);
        assert_relative_eq!(color.get(5, 11), Color::RED);
        assert_relative_eq!(color.get(11, 11), Color::GREEN);
        assert_eq!(color.get(1, 1), Color::BLACK);
    }
}
