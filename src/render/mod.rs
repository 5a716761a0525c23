//! Rendering pipeline: framebuffer access, rasterization, shading and the
//! renderer strategies built on them.

pub mod framebuffer;
pub mod rasterizer;
pub mod renderers;
pub mod shader;
pub mod shaders;

pub use framebuffer::FrameBuffer;
pub use rasterizer::{draw_line, draw_triangle, RasterTarget};
pub use renderers::{
    ContourConfig, DepthContourRenderer, EdgeContourRenderer, FilledRenderer, MaskContourRenderer, Renderer,
    ShadedRenderer, WireframeRenderer,
};
pub use shader::{FragmentInput, Interpolator, LinearInterpolator, ShaderProgram, Varying, VertexInput};
pub use shaders::{LitShader, LitVarying, ToonShader, UnlitShader, UnlitVarying};
