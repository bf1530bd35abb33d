/// Material uniforms shared by every surface of a sketch.
///
/// Laid out like the WGSL `SketchUniforms` struct: a `vec4` followed by three
/// scalars and padding up to 16 bytes.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SketchUniforms {
    /// `[width, height, a1, a2]`, see [`crate::sketch::resize::resolution`].
    pub resolution: [f32; 4],
    pub time: f32,
    pub camera_near: f32,
    pub camera_far: f32,
    pub _padding: f32,
}

impl SketchUniforms {
    pub fn new(camera_near: f32, camera_far: f32) -> Self {
        Self {
            camera_near,
            camera_far,
            ..Default::default()
        }
    }
}
