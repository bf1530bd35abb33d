//! Procedural plane geometry for the depth-displaced surfaces.

use crate::data_structures::model::Vertex;

/// Vertex of a displaced surface.
///
/// `y` is a free per-vertex attribute holding the band of a strip
/// (`index / 100`). It is uploaded with the vertex but neither surface shader
/// reads it.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SurfaceVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
    pub normal: [f32; 3],
    pub y: f32,
}

impl Vertex for SurfaceVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<SurfaceVertex>() as wgpu::BufferAddress,
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
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 5]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 8]>() as wgpu::BufferAddress,
                    shader_location: 3,
                    format: wgpu::VertexFormat::Float32,
                },
            ],
        }
    }
}

/// A plane in the XY plane facing +Z, centred on the origin.
///
/// Vertices run row by row from the top edge down, left to right. Triangles
/// are wound counter-clockwise when seen from +Z. UVs use the wgpu texture
/// convention: `v = 0` on the top row.
#[derive(Clone, Debug, PartialEq)]
pub struct PlaneGeometry {
    pub width: f32,
    pub height: f32,
    pub width_segments: u32,
    pub height_segments: u32,
    pub vertices: Vec<SurfaceVertex>,
    pub indices: Vec<u32>,
}

impl PlaneGeometry {
    pub fn new(width: f32, height: f32, width_segments: u32, height_segments: u32) -> Self {
        let grid_x = width_segments.max(1);
        let grid_y = height_segments.max(1);
        let columns = grid_x + 1;
        let segment_width = width / grid_x as f32;
        let segment_height = height / grid_y as f32;

        let mut vertices = Vec::with_capacity((columns * (grid_y + 1)) as usize);
        for iy in 0..=grid_y {
            let y = iy as f32 * segment_height - height / 2.0;
            for ix in 0..=grid_x {
                let x = ix as f32 * segment_width - width / 2.0;
                vertices.push(SurfaceVertex {
                    position: [x, -y, 0.0],
                    uv: [ix as f32 / grid_x as f32, iy as f32 / grid_y as f32],
                    normal: [0.0, 0.0, 1.0],
                    y: 0.0,
                });
            }
        }

        let mut indices = Vec::with_capacity((grid_x * grid_y * 6) as usize);
        for iy in 0..grid_y {
            for ix in 0..grid_x {
                let a = ix + columns * iy;
                let b = ix + columns * (iy + 1);
                let c = (ix + 1) + columns * (iy + 1);
                let d = (ix + 1) + columns * iy;
                indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }

        Self {
            width,
            height,
            width_segments: grid_x,
            height_segments: grid_y,
            vertices,
            indices,
        }
    }

    /// Set the `y` attribute of every vertex to `value`.
    pub fn with_attribute_y(mut self, value: f32) -> Self {
        self.vertices.iter_mut().for_each(|v| v.y = value);
        self
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }
}
