//! Error types for the recoverable failures at the crate's API edges.
//!
//! Contract violations (indexing a [`Buffer`](crate::buffer::Buffer) out of
//! range) panic instead; see the `# Panics` sections on those methods.

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Buffer(#[from] BufferError),

    #[error(transparent)]
    Mesh(#[from] MeshError),

    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error(transparent)]
    Load(#[from] LoadError),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    #[error("data of length {len} does not fit a {width}x{height} buffer")]
    DataTooLarge {
        len: usize,
        width: usize,
        height: usize,
    },

    #[error("buffer dimensions {width}x{height} differ from {other_width}x{other_height}")]
    SizeMismatch {
        width: usize,
        height: usize,
        other_width: usize,
        other_height: usize,
    },
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    #[error("triangle {triangle} references vertex {index}, mesh has {count}")]
    VertexOutOfRange {
        triangle: usize,
        index: usize,
        count: usize,
    },

    #[error("triangle {triangle} references normal {index}, mesh has {count}")]
    NormalOutOfRange {
        triangle: usize,
        index: usize,
        count: usize,
    },

    #[error("triangle {triangle} references texcoord {index}, mesh has {count}")]
    TexcoordOutOfRange {
        triangle: usize,
        index: usize,
        count: usize,
    },
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    #[error("node {0} already has a parent")]
    AlreadyParented(usize),

    #[error("node {0} cannot be its own parent")]
    SelfParent(usize),

    #[error("node {0} does not exist")]
    UnknownNode(usize),

    #[error("node {child} is an ancestor of node {parent}")]
    Cycle { parent: usize, child: usize },
}

#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("failed to load OBJ file {path}: {source}")]
    Obj {
        path: PathBuf,
        #[source]
        source: tobj::LoadError,
    },

    #[error("failed to load image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("OBJ model '{0}' has no faces")]
    EmptyModel(String),

    #[error(transparent)]
    Mesh(#[from] MeshError),
}
