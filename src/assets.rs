//! Loading meshes from OBJ files and textures from images.
//!
//! OBJ files go through `tobj` with triangulation on and separate index
//! streams for positions, normals and texture coordinates, which map
//! directly onto [`Corner`]. Materials are ignored.
//!
//! Images go through `image`. Rows are stored top row first, the layout
//! [`Buffer::sample`] expects for textures.

use std::io::BufRead;
use std::path::Path;

use image::DynamicImage;
use log::{info, warn};

use crate::buffer::Buffer;
use crate::colors::Color;
use crate::error::LoadError;
use crate::math::{Vec2, Vec3};
use crate::mesh::{Corner, Mesh, Triangle};

fn obj_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        single_index: false,
        triangulate: true,
        ignore_points: true,
        ignore_lines: true,
        ..Default::default()
    }
}

/// Load every model in an OBJ file as a separate mesh.
pub fn load_obj(path: impl AsRef<Path>) -> Result<Vec<Mesh>, LoadError> {
    let path = path.as_ref();
    let (models, _materials) = tobj::load_obj(path, &obj_options()).map_err(|source| LoadError::Obj {
        path: path.to_path_buf(),
        source,
    })?;

    let meshes = meshes_from_models(&models, &path.display().to_string())?;
    info!("loaded {} mesh(es) from {}", meshes.len(), path.display());
    Ok(meshes)
}

/// Parse OBJ text held in memory. `mtllib` statements are skipped.
pub fn load_obj_from_str(source: &str) -> Result<Vec<Mesh>, LoadError> {
    load_obj_from_reader(&mut source.as_bytes())
}

pub fn load_obj_from_reader(reader: &mut impl BufRead) -> Result<Vec<Mesh>, LoadError> {
    let (models, _materials) = tobj::load_obj_buf(reader, &obj_options(), |_| Err(tobj::LoadError::OpenFileFailed))
        .map_err(|source| LoadError::Obj {
            path: "<memory>".into(),
            source,
        })?;
    meshes_from_models(&models, "<memory>")
}

fn meshes_from_models(models: &[tobj::Model], origin: &str) -> Result<Vec<Mesh>, LoadError> {
    let mut meshes = Vec::with_capacity(models.len());
    for model in models {
        if model.mesh.indices.is_empty() {
            warn!("{}: model '{}' has no faces, skipping", origin, model.name);
            continue;
        }
        meshes.push(mesh_from_model(model)?);
    }

    if meshes.is_empty() {
        let name = models.first().map_or_else(|| origin.to_string(), |m| m.name.clone());
        return Err(LoadError::EmptyModel(name));
    }
    Ok(meshes)
}

fn mesh_from_model(model: &tobj::Model) -> Result<Mesh, LoadError> {
    let obj = &model.mesh;

    let vertices = obj
        .positions
        .chunks_exact(3)
        .map(|p| Vec3::new(p[0], p[1], p[2]))
        .collect();
    let normals: Vec<Vec3> = obj
        .normals
        .chunks_exact(3)
        .map(|n| Vec3::new(n[0], n[1], n[2]))
        .collect();
    let texcoords = obj
        .texcoords
        .chunks_exact(2)
        .map(|t| Vec2::new(t[0], t[1]))
        .collect();

    let index = |stream: &[u32], i: usize| stream.get(i).map(|&v| v as usize);
    let triangles = (0..obj.indices.len() / 3)
        .map(|t| {
            let corner = |k: usize| {
                let i = t * 3 + k;
                Corner::new(
                    obj.indices[i] as usize,
                    index(&obj.normal_indices, i),
                    index(&obj.texcoord_indices, i),
                )
            };
            Triangle::new([corner(0), corner(1), corner(2)])
        })
        .collect();

    if normals.is_empty() {
        warn!("model '{}' has no normals; lit shading needs flat normals", model.name);
    }

    Ok(Mesh::new(vertices, normals, texcoords, triangles)?.with_name(model.name.clone()))
}

/// Load an image file as an RGBA color texture.
pub fn load_texture(path: impl AsRef<Path>) -> Result<Buffer<Color>, LoadError> {
    let image = open_image(path.as_ref())?;
    let texture = texture_from_image(&image);
    info!(
        "loaded texture {} ({}x{})",
        path.as_ref().display(),
        texture.width(),
        texture.height()
    );
    Ok(texture)
}

/// Load an image file as a single-channel map in `[0, 1]`, e.g. a
/// specular map.
pub fn load_grayscale(path: impl AsRef<Path>) -> Result<Buffer<f32>, LoadError> {
    let image = open_image(path.as_ref())?.to_luma8();
    let (width, height) = image.dimensions();

    let mut buffer = Buffer::new(width as usize, height as usize, 0.0);
    for (x, y, pixel) in image.enumerate_pixels() {
        buffer.set(x as usize, y as usize, f32::from(pixel.0[0]) / 255.0);
    }
    Ok(buffer)
}

pub fn texture_from_image(image: &DynamicImage) -> Buffer<Color> {
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut buffer = Buffer::new(width as usize, height as usize, Color::BLACK);
    for (x, y, pixel) in rgba.enumerate_pixels() {
        let [r, g, b, a] = pixel.0;
        buffer.set(x as usize, y as usize, Color::from_rgba8(r, g, b, a));
    }
    buffer
}

fn open_image(path: &Path) -> Result<DynamicImage, LoadError> {
    image::open(path).map_err(|source| LoadError::Image {
        path: path.to_path_buf(),
        source,
    })
}
