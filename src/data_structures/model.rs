//! Model data: CPU-side geometry decoded from glTF and its GPU counterpart.

use std::ops::Range;

use wgpu::util::DeviceExt;

use crate::data_structures::instance::Instance;

pub trait Vertex {
    fn desc() -> wgpu::VertexBufferLayout<'static>;
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex for ModelVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<ModelVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}

/// Flat unlit colour, linear RGBA.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlatMaterial {
    pub color: [f32; 4],
}

impl FlatMaterial {
    /// Build from a `0xRRGGBB` hex colour, fully opaque.
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
        Self {
            color: [channel(16), channel(8), channel(0), 1.0],
        }
    }
}

/// Which material a model part is drawn with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PartMaterial {
    /// Material index from the source asset. Not rendered by this crate.
    Source(Option<usize>),
    Flat(FlatMaterial),
}

impl PartMaterial {
    /// The colour the part is drawn with, if it carries a flat material.
    pub fn flat(&self) -> Option<FlatMaterial> {
        match self {
            PartMaterial::Flat(material) => Some(*material),
            PartMaterial::Source(_) => None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<ModelVertex>,
    pub indices: Vec<u32>,
}

/// One mesh primitive of a model together with its transform relative to the model root.
#[derive(Clone, Debug, PartialEq)]
pub struct ModelPart {
    pub name: String,
    pub transform: Instance,
    pub mesh: MeshData,
    pub material: PartMaterial,
}

/// A decoded model: the root node's own transform and the flattened mesh parts below it.
#[derive(Clone, Debug, PartialEq)]
pub struct LoadedModel {
    pub name: String,
    pub root: Instance,
    pub parts: Vec<ModelPart>,
}

impl LoadedModel {
    /// Replace the material of every part.
    pub fn override_material(&mut self, material: FlatMaterial) {
        self.parts
            .iter_mut()
            .for_each(|part| part.material = PartMaterial::Flat(material));
    }

    pub fn vertex_count(&self) -> usize {
        self.parts.iter().map(|part| part.mesh.vertices.len()).sum()
    }
}

#[derive(Debug)]
pub struct Mesh {
    pub name: String,
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub num_elements: u32,
}

impl Mesh {
    pub fn new<V: bytemuck::Pod>(
        device: &wgpu::Device,
        name: &str,
        vertices: &[V],
        indices: &[u32],
    ) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{:?} Vertex Buffer", name)),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{:?} Index Buffer", name)),
            contents: bytemuck::cast_slice(indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            name: name.to_string(),
            vertex_buffer,
            index_buffer,
            num_elements: indices.len() as u32,
        }
    }
}

pub trait DrawMesh {
    /// Draw `mesh` for the given instance range. The instance buffer must be bound to slot 1.
    fn draw_mesh_instanced(&mut self, mesh: &Mesh, instances: Range<u32>);
}

impl DrawMesh for wgpu::RenderPass<'_> {
    fn draw_mesh_instanced(&mut self, mesh: &Mesh, instances: Range<u32>) {
        if mesh.num_elements == 0 {
            return;
        }
        self.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        self.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.draw_indexed(0..mesh.num_elements, 0, instances);
    }
}
