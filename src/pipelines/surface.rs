//! Depth-displaced surface pipelines.
//!
//! Both shaders read the off-screen depth texture in the vertex stage to push
//! the surface towards the viewer and again in the fragment stage to colour it.
//! The material bind group (group 1) is shared by every surface of a sketch:
//!
//! | binding | resource |
//! |---|---|
//! | 0 | [`SketchUniforms`] |
//! | 1 | off-screen depth (`depthInfo`), bound as unfilterable float |
//! | 2 | off-screen colour (`ttt`) |
//! | 3 | nearest sampler for the colour |

use wgpu::util::DeviceExt;

use crate::{
    data_structures::{
        geometry::SurfaceVertex, instance::InstanceRaw, model::Vertex,
        render_target::RenderTarget, texture::Texture,
    },
    pipelines::basic::{REPLACE, mk_render_pipeline},
    sketch::uniforms::SketchUniforms,
};

/// Which fragment treatment the surfaces get.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurfaceShader {
    /// Monochrome `1 - depth`.
    DepthLines,
    /// Two-tone gradient thresholded on depth.
    DepthGradient,
}

impl SurfaceShader {
    /// WGSL source of the shader.
    pub fn source(&self) -> &'static str {
        match self {
            SurfaceShader::DepthLines => include_str!("depth_lines.wgsl"),
            SurfaceShader::DepthGradient => include_str!("depth_gradient.wgsl"),
        }
    }

    fn descriptor(&self) -> wgpu::ShaderModuleDescriptor<'static> {
        let label = match self {
            SurfaceShader::DepthLines => "Depth Lines Shader",
            SurfaceShader::DepthGradient => "Depth Gradient Shader",
        };
        wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Wgsl(self.source().into()),
        }
    }
}

pub fn mk_material_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    let visibility = wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT;
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    view_dimension: wgpu::TextureViewDimension::D2,
                    sample_type: wgpu::TextureSampleType::Float { filterable: false },
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 2,
                visibility,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    view_dimension: wgpu::TextureViewDimension::D2,
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 3,
                visibility,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
        label: Some("surface_material_bind_group_layout"),
    })
}

/// Uniform buffer plus the bind group tying it to the current off-screen target.
pub struct SurfaceMaterial {
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
}

impl SurfaceMaterial {
    pub fn new(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        uniforms: SketchUniforms,
        target: &RenderTarget,
    ) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Sketch Uniform Buffer"),
            contents: bytemuck::cast_slice(&[uniforms]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = mk_bind_group(device, layout, &buffer, target);
        Self { buffer, bind_group }
    }

    /// Point the bind group at a freshly created target.
    pub fn rebind(
        &mut self,
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        target: &RenderTarget,
    ) {
        self.bind_group = mk_bind_group(device, layout, &self.buffer, target);
    }

    pub fn write(&self, queue: &wgpu::Queue, uniforms: &SketchUniforms) {
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[*uniforms]));
    }
}

fn mk_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    buffer: &wgpu::Buffer,
    target: &RenderTarget,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::TextureView(&target.depth.view),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: wgpu::BindingResource::TextureView(&target.color.view),
            },
            wgpu::BindGroupEntry {
                binding: 3,
                resource: wgpu::BindingResource::Sampler(&target.sampler),
            },
        ],
        label: Some("surface_material_bind_group"),
    })
}

pub fn mk_surface_pipeline(
    device: &wgpu::Device,
    color_format: wgpu::TextureFormat,
    camera_bind_group_layout: &wgpu::BindGroupLayout,
    material_bind_group_layout: &wgpu::BindGroupLayout,
    shader: SurfaceShader,
) -> wgpu::RenderPipeline {
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Surface Pipeline Layout"),
        bind_group_layouts: &[camera_bind_group_layout, material_bind_group_layout],
        push_constant_ranges: &[],
    });
    mk_render_pipeline(
        device,
        "Surface Pipeline",
        &layout,
        color_format,
        Some(REPLACE),
        Some(Texture::DEPTH_FORMAT),
        &[SurfaceVertex::desc(), InstanceRaw::desc()],
        shader.descriptor(),
    )
}
