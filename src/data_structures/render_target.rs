//! Off-screen colour + depth target.

use crate::data_structures::texture::{Texture, create_nearest_sampler};

/// A colour/depth texture pair rendered into by the first pass of a frame and
/// sampled by the second.
#[derive(Debug)]
pub struct RenderTarget {
    pub color: Texture,
    pub depth: Texture,
    pub sampler: wgpu::Sampler,
    size: [u32; 2],
}

impl RenderTarget {
    pub fn new(device: &wgpu::Device, size: [u32; 2]) -> Self {
        let size = [size[0].max(1), size[1].max(1)];
        Self {
            color: Texture::create_target_color(device, size, "offscreen color"),
            depth: Texture::create_target_depth(device, size, "offscreen depth"),
            sampler: create_nearest_sampler(device),
            size,
        }
    }

    pub fn size(&self) -> [u32; 2] {
        self.size
    }

    /// Recreate both attachments when `size` differs from the current one.
    ///
    /// Returns `true` when the textures were replaced; bind groups referencing
    /// the old views must be rebuilt in that case.
    pub fn resize(&mut self, device: &wgpu::Device, size: [u32; 2]) -> bool {
        let size = [size[0].max(1), size[1].max(1)];
        if size == self.size {
            return false;
        }
        log::info!(
            "recreating offscreen target {}x{} -> {}x{}",
            self.size[0],
            self.size[1],
            size[0],
            size[1]
        );
        *self = Self::new(device, size);
        true
    }
}
