//! Contours from screen-space coverage.
//!
//! Both renderers here shade the mesh while recording which pixels it wrote
//! into a boolean mask, then walk the mask looking at each pixel's right and
//! top neighbour:
//!
//! ```text
//!   inside ─ outside   paint inside pixel
//!   outside ─ inside   paint inside pixel
//! ```
//!
//! Checking only right and top still catches all four directions, since the
//! left/bottom transitions of one pixel are the right/top transitions of its
//! neighbour. The walk starts one pixel below and left of the touched
//! rectangle to catch transitions on its lower and left border.
//!
//! [`DepthContourRenderer`] additionally paints where the depth of two
//! covered neighbours changes sharply, outlining folds and overlaps inside
//! the silhouette.

use std::rc::Rc;

use log::trace;

use super::edge_contour::{draw_contour_edges, ContourStyle};
use super::shaded::shade_mesh;
use super::{ContourConfig, Renderer};
use crate::buffer::Buffer;
use crate::context::{RenderingContext, Transforms};
use crate::mesh::Mesh;
use crate::render::framebuffer::FrameBuffer;
use crate::render::shader::{FragmentInput, Interpolator, LinearInterpolator, ShaderProgram};

/// Pixels written by the last shading pass plus their bounding rectangle.
#[derive(Clone, Debug)]
pub(crate) struct CoverageMask {
    pixels: Buffer<bool>,
    /// `[min_x, min_y, max_x, max_y]`, inclusive.
    touched: Option<[i32; 4]>,
}

impl Default for CoverageMask {
    fn default() -> Self {
        Self {
            pixels: Buffer::new(0, 0, false),
            touched: None,
        }
    }
}

impl CoverageMask {
    /// Clear for a new pass, reallocating when the target size changed.
    fn reset(&mut self, width: usize, height: usize) {
        if self.pixels.width() != width || self.pixels.height() != height {
            self.pixels = Buffer::new(width, height, false);
        } else {
            self.pixels.clear();
        }
        self.touched = None;
    }

    pub(crate) fn mark(&mut self, x: i32, y: i32) {
        if !self.pixels.try_set(x, y, true) {
            return;
        }
        self.touched = Some(match self.touched {
            None => [x, y, x, y],
            Some([x0, y0, x1, y1]) => [x0.min(x), y0.min(y), x1.max(x), y1.max(y)],
        });
    }

    /// Paint `color` on the inside pixel of every 4-neighbour transition.
    /// With a `depth_threshold`, also paint the farther pixel of each
    /// covered pair whose relative change in view distance exceeds it.
    fn paint_outline(
        &self,
        frame: &mut FrameBuffer<'_>,
        transforms: &Transforms,
        config: &ContourConfig,
        depth_threshold: Option<f32>,
    ) -> usize {
        let Some([min_x, min_y, max_x, max_y]) = self.touched else {
            return 0;
        };

        let mut painted = 0;
        let mut paint = |frame: &mut FrameBuffer<'_>, x: i32, y: i32| {
            frame.set_pixel(x, y, config.color);
            painted += 1;
        };

        for y in (min_y - 1)..=max_y {
            for x in (min_x - 1)..=max_x {
                let Some(center) = self.pixels.try_get(x, y) else {
                    continue;
                };

                for (nx, ny) in [(x + 1, y), (x, y + 1)] {
                    let Some(neighbour) = self.pixels.try_get(nx, ny) else {
                        continue;
                    };
                    match (center, neighbour) {
                        (true, false) => paint(frame, x, y),
                        (false, true) => paint(frame, nx, ny),
                        (true, true) => {
                            let Some(threshold) = depth_threshold else {
                                continue;
                            };
                            let (Some(c), Some(n)) = (frame.get_depth(x, y), frame.get_depth(nx, ny)) else {
                                continue;
                            };
                            let (c, n) = (transforms.view_distance(c), transforms.view_distance(n));
                            let change = (n - c) / c.max(f32::EPSILON);
                            if change > threshold {
                                paint(frame, nx, ny);
                            } else if change < -threshold {
                                paint(frame, x, y);
                            }
                        }
                        (false, false) => {}
                    }
                }
            }
        }
        painted
    }
}

/// Shaded fill outlined along its screen-space coverage.
#[derive(Clone, Debug)]
pub struct MaskContourRenderer<S, I = LinearInterpolator> {
    mesh: Rc<Mesh>,
    pub shader: S,
    pub interpolator: I,
    pub config: ContourConfig,
    mask: CoverageMask,
    front_facing: Vec<bool>,
}

impl<S: ShaderProgram> MaskContourRenderer<S> {
    pub fn new(mesh: Rc<Mesh>, shader: S, config: ContourConfig) -> Self {
        Self::with_interpolator(mesh, shader, LinearInterpolator, config)
    }
}

impl<S, I> MaskContourRenderer<S, I>
where
    S: ShaderProgram,
    I: Interpolator<FragmentInput<S::Data>>,
{
    pub fn with_interpolator(mesh: Rc<Mesh>, shader: S, interpolator: I, config: ContourConfig) -> Self {
        Self {
            mesh,
            shader,
            interpolator,
            config,
            mask: CoverageMask::default(),
            front_facing: Vec::new(),
        }
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Coverage of the most recent render call.
    pub fn mask(&self) -> &Buffer<bool> {
        &self.mask.pixels
    }
}

impl<S, I> Renderer for MaskContourRenderer<S, I>
where
    S: ShaderProgram,
    I: Interpolator<FragmentInput<S::Data>>,
{
    fn render(&mut self, ctx: &mut RenderingContext) {
        let (written, painted) = render_masked(
            &self.mesh,
            &self.shader,
            &self.interpolator,
            &self.config,
            None,
            &mut self.mask,
            &mut self.front_facing,
            ctx,
        );
        trace!(
            "mask contour '{}': {} pixels, {} contour",
            self.mesh.name(),
            written,
            painted
        );
    }
}

/// Mask contour plus creases found from neighbouring depth values.
#[derive(Clone, Debug)]
pub struct DepthContourRenderer<S, I = LinearInterpolator> {
    mesh: Rc<Mesh>,
    pub shader: S,
    pub interpolator: I,
    pub config: ContourConfig,
    mask: CoverageMask,
    front_facing: Vec<bool>,
}

impl<S: ShaderProgram> DepthContourRenderer<S> {
    pub fn new(mesh: Rc<Mesh>, shader: S, config: ContourConfig) -> Self {
        Self::with_interpolator(mesh, shader, LinearInterpolator, config)
    }
}

impl<S, I> DepthContourRenderer<S, I>
where
    S: ShaderProgram,
    I: Interpolator<FragmentInput<S::Data>>,
{
    pub fn with_interpolator(mesh: Rc<Mesh>, shader: S, interpolator: I, config: ContourConfig) -> Self {
        Self {
            mesh,
            shader,
            interpolator,
            config,
            mask: CoverageMask::default(),
            front_facing: Vec::new(),
        }
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Coverage of the most recent render call.
    pub fn mask(&self) -> &Buffer<bool> {
        &self.mask.pixels
    }
}

impl<S, I> Renderer for DepthContourRenderer<S, I>
where
    S: ShaderProgram,
    I: Interpolator<FragmentInput<S::Data>>,
{
    fn render(&mut self, ctx: &mut RenderingContext) {
        let (written, painted) = render_masked(
            &self.mesh,
            &self.shader,
            &self.interpolator,
            &self.config,
            Some(self.config.depth_threshold),
            &mut self.mask,
            &mut self.front_facing,
            ctx,
        );
        trace!(
            "depth contour '{}': {} pixels, {} contour",
            self.mesh.name(),
            written,
            painted
        );
    }
}

/// Shading pass, outline pass and, when configured, silhouette edges
/// restricted to the mask. Returns `(shaded, contour)` pixel counts.
#[allow(clippy::too_many_arguments)]
fn render_masked<S, I>(
    mesh: &Mesh,
    shader: &S,
    interpolator: &I,
    config: &ContourConfig,
    depth_threshold: Option<f32>,
    mask: &mut CoverageMask,
    front_facing: &mut Vec<bool>,
    ctx: &mut RenderingContext,
) -> (usize, usize)
where
    S: ShaderProgram,
    I: Interpolator<FragmentInput<S::Data>>,
{
    mask.reset(ctx.width(), ctx.height());
    let written = shade_mesh(mesh, shader, interpolator, ctx, Some(&mut *mask));

    let bounds = ctx.screen_bounds();
    let (transforms, mut frame) = ctx.split();
    let mut painted = mask.paint_outline(&mut frame, transforms, config, depth_threshold);

    if config.silhouette_edges {
        let style = ContourStyle {
            color: config.color,
            depth_bias: config.depth_bias,
            mask: Some(&mask.pixels),
        };
        painted += draw_contour_edges(mesh, transforms, &mut frame, &bounds, style, front_facing);
    }

    (written, painted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::Color;
    use crate::math::Mat4;
    use crate::render::shaders::UnlitShader;

    fn context() -> RenderingContext {
        let mut ctx = RenderingContext::new(16, 16);
        ctx.set_model_world(Mat4::translation(0.0, 0.0, 0.5) * Mat4::scaling(0.5, 0.5, 1.0));
        ctx
    }

    fn config() -> ContourConfig {
        ContourConfig {
            color: Color::RED,
            ..Default::default()
        }
    }

    #[test]
    fn outlines_quad_on_inside_pixels() {
        let mut ctx = context();
        let mut renderer = MaskContourRenderer::new(Rc::new(Mesh::quad()), UnlitShader::default(), config());
        renderer.render(&mut ctx);

        let color = ctx.color_buffer();
        for i in 4..=12 {
            assert_eq!(color.get(i, 4), Color::RED);
            assert_eq!(color.get(i, 12), Color::RED);
            assert_eq!(color.get(4, i), Color::RED);
            assert_eq!(color.get(12, i), Color::RED);
        }
        assert_eq!(color.get(8, 8), Color::WHITE);
        assert_eq!(color.get(3, 8), Color::BLACK);
        assert_eq!(renderer.mask().as_slice().iter().filter(|&&m| m).count(), 81);
    }

    #[test]
    fn mask_is_cleared_between_renders() {
        let mut ctx = context();
        let mut renderer = MaskContourRenderer::new(Rc::new(Mesh::quad()), UnlitShader::default(), config());
        renderer.render(&mut ctx);

        ctx.clear();
        ctx.set_model_world(Mat4::translation(0.0, 0.0, 0.5) * Mat4::scaling(0.25, 0.25, 1.0));
        renderer.render(&mut ctx);
        assert_eq!(renderer.mask().as_slice().iter().filter(|&&m| m).count(), 25);
        assert!(!renderer.mask().get(4, 4));
    }

    #[test]
    fn depth_jump_paints_farther_pixel() {
        let mut ctx = RenderingContext::new(8, 8);
        let mut mask = CoverageMask::default();
        mask.reset(8, 8);
        for y in 2..=4 {
            for x in 1..=6 {
                mask.mark(x, y);
                let depth = if x <= 3 { 0.5 } else { 0.8 };
                ctx.depth_buffer_mut().set(x as usize, y as usize, depth);
            }
        }

        let (transforms, mut frame) = ctx.split();
        mask.paint_outline(&mut frame, transforms, &config(), Some(0.1));

        let color = ctx.color_buffer();
        // The step between x = 3 and x = 4 marks the farther side only.
        assert_eq!(color.get(4, 3), Color::RED);
        assert_eq!(color.get(3, 3), Color::BLACK);
        // Coverage border.
        assert_eq!(color.get(1, 3), Color::RED);
        assert_eq!(color.get(2, 3), Color::BLACK);
    }

    #[test]
    fn depth_contour_ignores_smooth_depth() {
        let mut ctx = context();
        let mut renderer = DepthContourRenderer::new(Rc::new(Mesh::quad()), UnlitShader::default(), config());
        renderer.render(&mut ctx);

        // Constant depth: interior stays shaded.
        assert_eq!(ctx.color_buffer().get(8, 8), Color::WHITE);
        assert_eq!(ctx.color_buffer().get(4, 8), Color::RED);
    }
}
