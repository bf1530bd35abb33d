//! Loading models from external files.
//!
//! Only binary or JSON glTF is supported. The decoded model is kept on the
//! CPU as a [`LoadedModel`]; GPU buffers are created later by the renderer.

use std::pin::Pin;

use cgmath::Quaternion;

use crate::data_structures::{
    instance::Instance,
    model::{LoadedModel, MeshData, ModelPart, ModelVertex, PartMaterial},
};

pub mod io;

pub use io::load_binary;

/// A pending model load. Resolved once on the single render timeline.
pub type ModelFuture = Pin<Box<dyn Future<Output = anyhow::Result<LoadedModel>>>>;

/// Source of the sketch's model.
///
/// Implemented by [`GltfLoader`] for real assets; tests substitute loaders that
/// resolve immediately.
pub trait ModelLoader {
    fn load(&self, asset: &str) -> ModelFuture;
}

/// Loads `.glb`/`.gltf` files through [`load_binary`].
#[derive(Clone, Copy, Debug, Default)]
pub struct GltfLoader;

impl ModelLoader for GltfLoader {
    fn load(&self, asset: &str) -> ModelFuture {
        let asset = asset.to_string();
        Box::pin(async move { load_model_gltf(&asset).await })
    }
}

pub async fn load_model_gltf(file_name: &str) -> anyhow::Result<LoadedModel> {
    let data = load_binary(file_name).await?;
    decode_gltf(file_name, &data).await
}

/// Decode glTF bytes into a [`LoadedModel`].
///
/// The model is the first node of the default scene (or the first scene when
/// none is marked default). Its own transform becomes [`LoadedModel::root`];
/// every mesh primitive in its subtree is flattened into a [`ModelPart`] with
/// a transform relative to that node. External buffers are fetched with
/// [`load_binary`] relative to the asset directory.
pub async fn decode_gltf(name: &str, data: &[u8]) -> anyhow::Result<LoadedModel> {
    let gltf = gltf::Gltf::from_slice(data)?;

    let mut buffer_data: Vec<Vec<u8>> = Vec::new();
    for buffer in gltf.buffers() {
        match buffer.source() {
            gltf::buffer::Source::Bin => {
                let blob = gltf
                    .blob
                    .as_deref()
                    .ok_or_else(|| anyhow::anyhow!("{}: binary chunk missing", name))?;
                buffer_data.push(blob.into());
            }
            gltf::buffer::Source::Uri(uri) => {
                buffer_data.push(load_binary(uri).await?);
            }
        }
    }

    let scene = gltf
        .default_scene()
        .or_else(|| gltf.scenes().next())
        .ok_or_else(|| anyhow::anyhow!("{}: no scene", name))?;
    let node = scene
        .nodes()
        .next()
        .ok_or_else(|| anyhow::anyhow!("{}: scene has no nodes", name))?;

    let mut parts = Vec::new();
    collect_parts(&node, Instance::new(), &buffer_data, &mut parts);
    if parts.is_empty() {
        log::warn!("{}: node {:?} has no triangle meshes", name, node.name());
    }

    Ok(LoadedModel {
        name: node.name().unwrap_or(name).to_string(),
        root: to_instance(node.transform()),
        parts,
    })
}

fn to_instance(transform: gltf::scene::Transform) -> Instance {
    let (translation, rotation, scale) = transform.decomposed();
    Instance {
        position: translation.into(),
        rotation: Quaternion::new(rotation[3], rotation[0], rotation[1], rotation[2]),
        scale: scale.into(),
    }
}

fn collect_parts(
    node: &gltf::Node,
    relative: Instance,
    buffer_data: &[Vec<u8>],
    parts: &mut Vec<ModelPart>,
) {
    if let Some(mesh) = node.mesh() {
        let mesh_name = mesh
            .name()
            .or(node.name())
            .unwrap_or("mesh")
            .to_string();
        for primitive in mesh.primitives() {
            if primitive.mode() != gltf::mesh::Mode::Triangles {
                log::warn!(
                    "skipping primitive {} of {}: mode {:?} is not supported",
                    primitive.index(),
                    mesh_name,
                    primitive.mode()
                );
                continue;
            }
            match read_primitive(&primitive, buffer_data) {
                Some(data) => parts.push(ModelPart {
                    name: format!("{}#{}", mesh_name, primitive.index()),
                    transform: relative,
                    mesh: data,
                    material: PartMaterial::Source(primitive.material().index()),
                }),
                None => log::warn!(
                    "skipping primitive {} of {}: no positions",
                    primitive.index(),
                    mesh_name
                ),
            }
        }
    }
    for child in node.children() {
        let child_relative = relative * to_instance(child.transform());
        collect_parts(&child, child_relative, buffer_data, parts);
    }
}

fn read_primitive(primitive: &gltf::Primitive, buffer_data: &[Vec<u8>]) -> Option<MeshData> {
    let reader = primitive.reader(|buffer| buffer_data.get(buffer.index()).map(Vec::as_slice));

    let positions: Vec<[f32; 3]> = reader.read_positions()?.collect();
    let mut vertices: Vec<ModelVertex> = positions
        .into_iter()
        .map(|position| ModelVertex {
            position,
            normal: [0.0; 3],
        })
        .collect();
    if let Some(normals) = reader.read_normals() {
        vertices
            .iter_mut()
            .zip(normals)
            .for_each(|(vertex, normal)| vertex.normal = normal);
    }

    let indices = match reader.read_indices() {
        Some(indices) => indices.into_u32().collect(),
        None => (0..vertices.len() as u32).collect(),
    };

    Some(MeshData { vertices, indices })
}
