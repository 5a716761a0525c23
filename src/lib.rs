//! A CPU software rasterizer with contour outlining.
//!
//! Meshes are drawn into plain color and depth [`Buffer`]s by pluggable
//! renderers: flat fills, programmable shaders, wireframes, and several
//! ways of outlining a mesh (topological silhouette edges, screen-space
//! coverage masks, depth discontinuities). An optional SDL2 window presents
//! the result.
//!
//! # Quick Start
//!
//! ```ignore
//! use silhouette::prelude::*;
//! use std::rc::Rc;
//!
//! let mut engine = Engine::new(EngineConfig::default());
//! let mut scene = Scene::new();
//! let cube = scene.spawn(scene.root(), "cube", Transform::default())?;
//! scene.add_renderer(cube, FilledRenderer::new(Rc::new(Mesh::cube()), Color::RED))?;
//!
//! engine.camera_mut().transform.set_origin_xyz(0.0, 0.0, 5.0);
//! engine.render(&mut scene);
//! let pixels = engine.color_buffer();
//! ```

pub mod assets;
pub mod buffer;
pub mod camera;
pub mod colors;
pub mod context;
pub mod engine;
pub mod error;
pub mod logging;
pub mod math;
pub mod mesh;
pub mod projection;
pub mod render;
pub mod scene;
pub mod transform;
#[cfg(feature = "window")]
pub mod window;

pub use buffer::Buffer;
pub use colors::Color;
pub use context::{RenderingContext, Transforms};
pub use engine::{Engine, EngineConfig};
pub use error::{Error, Result};
pub use mesh::Mesh;
pub use scene::{NodeId, Scene};

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use silhouette::prelude::*;
/// ```
pub mod prelude {
    // Core
    pub use crate::buffer::Buffer;
    pub use crate::colors::Color;
    pub use crate::context::{RenderingContext, Transforms};
    pub use crate::error::{BufferError, Error, LoadError, MeshError, SceneError};
    pub use crate::logging::{init_logging, LoggingConfig};

    // Camera & transforms
    pub use crate::camera::{Camera, OrbitController};
    pub use crate::projection::Projection;
    pub use crate::transform::Transform;

    // Math
    pub use crate::math::{Bounds3, Mat4, Quat, Vec2, Vec3, Vec4};

    // Geometry & scene
    pub use crate::engine::{Engine, EngineConfig};
    pub use crate::mesh::{Corner, Edge, Mesh, Triangle};
    pub use crate::scene::{NodeId, Scene, SceneNode};

    // Rendering
    pub use crate::render::{
        ContourConfig, DepthContourRenderer, EdgeContourRenderer, FilledRenderer, FragmentInput, Interpolator,
        LinearInterpolator, LitShader, MaskContourRenderer, Renderer, ShadedRenderer, ShaderProgram, ToonShader,
        UnlitShader, VertexInput, WireframeRenderer,
    };
}
