//! Flat unlit pipeline: every fragment gets the material colour.
//!
//! Used for the loaded model in both the off-screen and the on-screen pass,
//! hence one pipeline per attachment format pair.

use wgpu::util::DeviceExt;

use crate::{
    data_structures::{
        instance::InstanceRaw,
        model::{FlatMaterial, ModelVertex, Vertex},
    },
    pipelines::basic::{REPLACE, mk_render_pipeline},
};

pub const SHADER_SOURCE: &str = include_str!("flat.wgsl");

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FlatMaterialUniform {
    color: [f32; 4],
}

impl From<FlatMaterial> for FlatMaterialUniform {
    fn from(material: FlatMaterial) -> Self {
        Self {
            color: material.color,
        }
    }
}

pub fn mk_material_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
        label: Some("flat_material_bind_group_layout"),
    })
}

pub struct FlatMaterialResources {
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
}

impl FlatMaterialResources {
    pub fn new(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        material: FlatMaterial,
    ) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Flat Material Buffer"),
            contents: bytemuck::cast_slice(&[FlatMaterialUniform::from(material)]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
            label: Some("flat_material_bind_group"),
        });
        Self { buffer, bind_group }
    }
}

pub fn mk_flat_pipeline(
    device: &wgpu::Device,
    color_format: wgpu::TextureFormat,
    depth_format: wgpu::TextureFormat,
    camera_bind_group_layout: &wgpu::BindGroupLayout,
    material_bind_group_layout: &wgpu::BindGroupLayout,
) -> wgpu::RenderPipeline {
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Flat Pipeline Layout"),
        bind_group_layouts: &[camera_bind_group_layout, material_bind_group_layout],
        push_constant_ranges: &[],
    });
    let shader = wgpu::ShaderModuleDescriptor {
        label: Some("Flat Shader"),
        source: wgpu::ShaderSource::Wgsl(SHADER_SOURCE.into()),
    };
    mk_render_pipeline(
        device,
        "Flat Pipeline",
        &layout,
        color_format,
        Some(REPLACE),
        Some(depth_format),
        &[ModelVertex::desc(), InstanceRaw::desc()],
        shader,
    )
}
