//! glTF 2.0 model loading (`.glb` and `.gltf` with external buffers).

use glam::{Quat, Vec3};
use gltf::buffer::Source;

use super::path::{extension, sibling};
use super::source::AssetSource;
use crate::error::VantageError;
use crate::scene::{Mesh, SceneObject, Transform};

/// Container formats the model loader understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFormat {
    /// Binary glTF with an embedded BIN chunk.
    Glb,
    /// JSON glTF; buffers are fetched next to the file.
    Gltf,
}

impl ModelFormat {
    /// Pick the format for `location` by extension.
    pub fn from_location(location: &str) -> Result<Self, VantageError> {
        match extension(location).as_deref() {
            Some("glb") => Ok(Self::Glb),
            Some("gltf") => Ok(Self::Gltf),
            _ => Err(VantageError::UnsupportedFormat(location.to_owned())),
        }
    }
}

/// Fetch a model and build its scene-object tree.
///
/// The returned root is a group named after the file stem whose children
/// are the nodes of the file's default scene (or its first scene). Only
/// vertex positions are kept.
pub async fn load_model<S: AssetSource>(
    source: &S,
    location: &str,
) -> Result<SceneObject, VantageError> {
    let format = ModelFormat::from_location(location)?;
    log::info!("loading model {location} ({format:?})");
    let bytes = source.fetch(location).await?;
    let gltf = gltf::Gltf::from_slice(&bytes)?;

    let mut buffers = Vec::with_capacity(gltf.buffers().len());
    for buffer in gltf.buffers() {
        let data = match buffer.source() {
            Source::Bin => gltf.blob.clone().ok_or_else(|| {
                VantageError::ModelDecode(format!(
                    "{location}: buffer {} refers to a missing BIN chunk",
                    buffer.index()
                ))
            })?,
            Source::Uri(uri) if uri.starts_with("data:") => {
                return Err(VantageError::ModelDecode(format!(
                    "{location}: embedded data URIs are not supported"
                )));
            }
            Source::Uri(uri) => source.fetch(&sibling(location, uri)).await?,
        };
        if data.len() < buffer.length() {
            return Err(VantageError::ModelDecode(format!(
                "{location}: buffer {} is {} bytes, expected {}",
                buffer.index(),
                data.len(),
                buffer.length()
            )));
        }
        buffers.push(data);
    }

    let scene = gltf
        .default_scene()
        .or_else(|| gltf.scenes().next())
        .ok_or_else(|| {
            VantageError::ModelDecode(format!("{location}: no scenes"))
        })?;

    let mut root = SceneObject::group(file_stem(location));
    for node in scene.nodes() {
        root.add_child(build_node(&node, &buffers));
    }
    log::debug!(
        "parsed {location}: {} nodes, {} vertices",
        root.children.len(),
        root.vertex_count()
    );
    Ok(root)
}

fn build_node(node: &gltf::Node<'_>, buffers: &[Vec<u8>]) -> SceneObject {
    let (translation, rotation, scale) = node.transform().decomposed();
    let name = node
        .name()
        .map_or_else(|| format!("node{}", node.index()), str::to_owned);

    let mesh = node.mesh().map(|mesh| {
        let mut positions = Vec::new();
        for primitive in mesh.primitives() {
            let reader = primitive
                .reader(|buffer| buffers.get(buffer.index()).map(Vec::as_slice));
            if let Some(iter) = reader.read_positions() {
                positions.extend(iter.map(Vec3::from_array));
            }
        }
        Mesh::new(positions)
    });

    SceneObject {
        name,
        transform: Transform {
            translation: Vec3::from_array(translation),
            rotation: Quat::from_array(rotation),
            scale: Vec3::from_array(scale),
        },
        mesh,
        children: node
            .children()
            .map(|child| build_node(&child, buffers))
            .collect(),
    }
}

fn file_stem(location: &str) -> &str {
    let file = location.rsplit('/').next().unwrap_or(location);
    file.split_once('.').map_or(file, |(stem, _)| stem)
}
