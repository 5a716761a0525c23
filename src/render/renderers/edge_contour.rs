//! Contours from mesh topology.
//!
//! An edge is part of the contour when it bounds an open surface (one
//! adjacent triangle) or separates a front-facing triangle from a
//! back-facing one (the silhouette). Edges shared by more than two
//! triangles are ambiguous and skipped.

use std::rc::Rc;

use log::trace;

use super::{ContourConfig, Renderer};
use crate::buffer::Buffer;
use crate::colors::Color;
use crate::context::{RenderingContext, Transforms};
use crate::math::{Bounds3, Vec4};
use crate::mesh::{Edge, Mesh};
use crate::render::framebuffer::FrameBuffer;
use crate::render::rasterizer::{draw_line, signed_area, RasterTarget};
use crate::render::shader::LinearInterpolator;

/// Draws boundary and silhouette edges as lines.
///
/// Lines are depth tested with a bias toward the camera and never write
/// depth, so they sit on top of a surface drawn earlier in the frame without
/// hiding anything drawn later.
#[derive(Clone, Debug)]
pub struct EdgeContourRenderer {
    mesh: Rc<Mesh>,
    pub color: Color,
    pub depth_bias: f32,
    front_facing: Vec<bool>,
}

impl EdgeContourRenderer {
    pub fn new(mesh: Rc<Mesh>, color: Color) -> Self {
        let defaults = ContourConfig::default();
        Self {
            mesh,
            color,
            depth_bias: defaults.depth_bias,
            front_facing: Vec::new(),
        }
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }
}

impl Renderer for EdgeContourRenderer {
    fn render(&mut self, ctx: &mut RenderingContext) {
        let bounds = ctx.screen_bounds();
        let (transforms, mut frame) = ctx.split();
        let written = draw_contour_edges(
            &self.mesh,
            transforms,
            &mut frame,
            &bounds,
            ContourStyle {
                color: self.color,
                depth_bias: self.depth_bias,
                mask: None,
            },
            &mut self.front_facing,
        );
        trace!("edge contour '{}': {} pixels", self.mesh.name(), written);
    }
}

pub(crate) struct ContourStyle<'a> {
    pub color: Color,
    pub depth_bias: f32,
    /// Restrict drawing to pixels set in this mask.
    pub mask: Option<&'a Buffer<bool>>,
}

/// Whether `edge` lies on the contour given per-triangle facing.
pub(crate) fn is_contour_edge(edge: &Edge, front_facing: &[bool]) -> bool {
    match edge.triangles.as_slice() {
        [_] => true,
        [a, b] => front_facing[*a] != front_facing[*b],
        _ => false,
    }
}

/// Draw the contour edges of `mesh` under the current model transform.
/// `front_facing` is scratch space reused between frames.
pub(crate) fn draw_contour_edges(
    mesh: &Mesh,
    transforms: &Transforms,
    frame: &mut FrameBuffer<'_>,
    bounds: &Bounds3,
    style: ContourStyle<'_>,
    front_facing: &mut Vec<bool>,
) -> usize {
    let model_screen = *transforms.model_screen();
    let screen: Vec<Vec4> = mesh
        .vertices()
        .iter()
        .map(|&v| model_screen * Vec4::from(v))
        .collect();

    front_facing.clear();
    front_facing.extend(mesh.triangles().iter().map(|triangle| {
        let [a, b, c] = triangle.vertex_indices();
        signed_area(&[screen[a], screen[b], screen[c]]) > 0.0
    }));

    let mut target = ContourTarget {
        frame,
        depth_bias: style.depth_bias,
        mask: style.mask,
    };

    let mut written = 0;
    for edge in mesh.edges() {
        if !is_contour_edge(edge, front_facing) {
            continue;
        }
        let [a, b] = edge.vertices;
        written += draw_line(
            [screen[a], screen[b]],
            [style.color; 2],
            &LinearInterpolator,
            bounds,
            &mut target,
        );
    }
    written
}

/// Biased depth test, no depth writes, optional mask.
struct ContourTarget<'f, 'a, 'm> {
    frame: &'f mut FrameBuffer<'a>,
    depth_bias: f32,
    mask: Option<&'m Buffer<bool>>,
}

impl RasterTarget<Color> for ContourTarget<'_, '_, '_> {
    fn test_depth(&self, x: i32, y: i32, depth: f32) -> bool {
        let inside = self.mask.map_or(true, |mask| mask.try_get(x, y) == Some(true));
        inside && self.frame.test_depth(x, y, depth - self.depth_bias)
    }

    fn write_depth(&mut self, _x: i32, _y: i32, _depth: f32) {}

    fn write_pixel(&mut self, x: i32, y: i32, value: Color) {
        self.frame.set_pixel(x, y, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Mat4;

    fn context() -> RenderingContext {
        let mut ctx = RenderingContext::new(32, 32);
        ctx.set_model_world(Mat4::translation(0.0, 0.0, 0.5) * Mat4::scaling(0.5, 0.5, 0.1));
        ctx
    }

    #[test]
    fn open_quad_draws_boundary_but_not_diagonal() {
        let mut ctx = context();
        let mut renderer = EdgeContourRenderer::new(Rc::new(Mesh::quad()), Color::RED);
        renderer.render(&mut ctx);

        let color = ctx.color_buffer();
        assert_eq!(color.get(16, 8), Color::RED);
        assert_eq!(color.get(24, 16), Color::RED);
        // Diagonal between the two front faces stays untouched.
        assert_eq!(color.get(16, 16), Color::BLACK);
        // No depth writes.
        assert!(ctx.depth_buffer().as_slice().iter().all(|&d| d == 1.0));
    }

    #[test]
    fn classifies_edges_by_facing() {
        let mesh = Mesh::cube();
        let mut facing = vec![true; mesh.triangles().len()];
        assert!(mesh.edges().iter().all(|e| !is_contour_edge(e, &facing)));

        facing[0] = false;
        let flagged = mesh.edges().iter().filter(|e| is_contour_edge(e, &facing)).count();
        // Triangle 0 disagrees with all three of its neighbours.
        assert_eq!(flagged, 3);
    }

    #[test]
    fn masked_style_skips_pixels_outside_mask() {
        let mut ctx = context();
        let bounds = ctx.screen_bounds();
        let mesh = Mesh::quad();
        let mut mask = Buffer::new(32, 32, false);
        mask.set(16, 8, true);

        let (transforms, mut frame) = ctx.split();
        let style = ContourStyle {
            color: Color::RED,
            depth_bias: 0.001,
            mask: Some(&mask),
        };
        let written = draw_contour_edges(&mesh, transforms, &mut frame, &bounds, style, &mut Vec::new());
        assert_eq!(written, 1);
        assert_eq!(ctx.color_buffer().get(16, 8), Color::RED);
    }
}
