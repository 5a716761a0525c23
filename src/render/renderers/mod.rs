//! Mesh drawing strategies.
//!
//! A [`Renderer`] draws one mesh into a [`RenderingContext`] using whatever
//! model transform the context currently holds. Scene nodes own a list of
//! renderers, so the same mesh can be drawn several ways (e.g. shaded fill
//! plus a contour pass).
//!
//! | Renderer                 | Fill          | Outline                               |
//! |--------------------------|---------------|---------------------------------------|
//! | [`FilledRenderer`]       | flat color    | -                                     |
//! | [`ShadedRenderer`]       | shader        | -                                     |
//! | [`WireframeRenderer`]    | -             | every edge                            |
//! | [`EdgeContourRenderer`]  | -             | boundary and silhouette edges         |
//! | [`MaskContourRenderer`]  | shader        | coverage mask transitions             |
//! | [`DepthContourRenderer`] | shader        | mask transitions and depth jumps      |

mod edge_contour;
mod filled;
mod mask_contour;
mod shaded;
mod wireframe;

pub use edge_contour::EdgeContourRenderer;
pub use filled::FilledRenderer;
pub use mask_contour::{DepthContourRenderer, MaskContourRenderer};
pub use shaded::ShadedRenderer;
pub use wireframe::WireframeRenderer;

use crate::colors::Color;
use crate::context::RenderingContext;
use crate::mesh::{Mesh, Triangle};
use crate::render::shader::VertexInput;

pub trait Renderer {
    fn render(&mut self, ctx: &mut RenderingContext);
}

/// Outline settings shared by the contour renderers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContourConfig {
    pub color: Color,
    /// Pulls contour lines toward the camera so they win the depth test
    /// against the surface they lie on.
    pub depth_bias: f32,
    /// Relative change in view distance between covered neighbours that
    /// counts as an edge.
    pub depth_threshold: f32,
    /// Also draw topological silhouette edges inside the mask.
    pub silhouette_edges: bool,
}

impl Default for ContourConfig {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            depth_bias: 0.001,
            depth_threshold: 0.1,
            silhouette_edges: false,
        }
    }
}

/// Vertex stage inputs for the three corners of `triangle`. Missing normals
/// and texture coordinates read as zero; vertex color is white.
pub(crate) fn vertex_inputs(mesh: &Mesh, triangle: &Triangle) -> [VertexInput; 3] {
    triangle.corners.map(|corner| {
        VertexInput::new(
            mesh.vertex(corner.vertex),
            mesh.normal(corner.normal),
            Color::WHITE,
            mesh.texcoord(corner.texcoord),
        )
    })
}
