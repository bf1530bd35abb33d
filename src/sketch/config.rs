//! Hard-coded presets of the two sketches.

use cgmath::Deg;

use crate::{
    camera::CameraSettings,
    pipelines::surface::SurfaceShader,
    sketch::resize::{IMAGE_ASPECT, fov_for_height},
};

/// Which camera a render pass looks through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CameraRole {
    Main,
    Post,
}

/// The two render choreographies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Variant {
    /// 101 depth-displaced strips drawn together with the model (face).
    Lines,
    /// One depth-displaced quad drawn in a scene of its own (skull).
    Gradient,
}

impl Variant {
    /// Camera of the off-screen pass.
    pub fn offscreen_camera(&self) -> CameraRole {
        match self {
            Variant::Lines => CameraRole::Post,
            Variant::Gradient => CameraRole::Main,
        }
    }

    /// Camera of the on-screen pass.
    pub fn final_camera(&self) -> CameraRole {
        match self {
            Variant::Lines => CameraRole::Main,
            Variant::Gradient => CameraRole::Post,
        }
    }

    pub fn surface_shader(&self) -> SurfaceShader {
        match self {
            Variant::Lines => SurfaceShader::DepthLines,
            Variant::Gradient => SurfaceShader::DepthGradient,
        }
    }
}

/// Where the loaded model goes.
///
/// The applied scale is `(scale * stretch_x, scale, scale)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModelPlacement {
    pub scale: f32,
    pub stretch_x: f32,
    pub position: [f32; 3],
}

impl ModelPlacement {
    pub fn scale_vector(&self) -> cgmath::Vector3<f32> {
        cgmath::Vector3::new(self.scale * self.stretch_x, self.scale, self.scale)
    }
}

/// Sinusoidal idle motion of the model:
/// `z = base_z + amplitude * sin(time / period)` and likewise for the Z rotation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IdleMotion {
    pub base_z: f32,
    pub base_rotation_z: f32,
    pub amplitude: f32,
    pub period: f32,
}

impl IdleMotion {
    /// Depth position and Z rotation (radians) at `time`.
    pub fn at(&self, time: f32) -> (f32, f32) {
        let wave = self.amplitude * (time / self.period).sin();
        (self.base_z + wave, self.base_rotation_z + wave)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SketchConfig {
    pub asset: String,
    pub variant: Variant,
    pub main_camera: CameraSettings,
    pub post_camera: CameraSettings,
    pub placement: ModelPlacement,
    pub idle: IdleMotion,
    /// Added to the time accumulator every frame.
    pub time_step: f32,
    pub strip_count: usize,
    /// Width over height of the reference image the surfaces are fitted to.
    pub image_aspect: f32,
    /// World-space height the main camera's field of view is fitted to.
    pub target_height: f32,
    pub model_color: u32,
    pub clear_colour: wgpu::Color,
}

impl SketchConfig {
    /// Line strips over a face.
    pub fn face() -> Self {
        Self {
            asset: "face.glb".to_string(),
            variant: Variant::Lines,
            main_camera: CameraSettings {
                fovy: Deg(70.0),
                znear: 0.01,
                zfar: 5.0,
                position: [0.0, 0.0, 2.0],
            },
            post_camera: CameraSettings {
                fovy: Deg(70.0),
                znear: 2.0,
                zfar: 4.0,
                position: [0.0, 0.0, 2.0],
            },
            placement: ModelPlacement {
                scale: 0.1,
                stretch_x: 1.8,
                position: [0.0, 0.0, -1.5],
            },
            idle: IdleMotion {
                base_z: -1.6,
                base_rotation_z: -0.1,
                amplitude: 0.2,
                period: 50.0,
            },
            time_step: 0.5,
            strip_count: 101,
            image_aspect: IMAGE_ASPECT,
            target_height: 1.0,
            model_color: 0x000000,
            clear_colour: wgpu::Color::BLACK,
        }
    }

    /// Gradient quad over a skull.
    pub fn skull() -> Self {
        Self {
            asset: "skull.glb".to_string(),
            variant: Variant::Gradient,
            main_camera: CameraSettings {
                fovy: Deg(70.0),
                znear: 1.0,
                zfar: 5.0,
                position: [0.0, 0.0, 2.0],
            },
            post_camera: CameraSettings {
                fovy: fov_for_height(2.0, 2.0),
                znear: 0.1,
                zfar: 4.0,
                position: [0.0, 0.0, 2.0],
            },
            placement: ModelPlacement {
                scale: 0.1,
                stretch_x: 1.0,
                position: [0.0, 0.0, -1.5],
            },
            idle: IdleMotion {
                base_z: -1.6,
                base_rotation_z: -0.1,
                amplitude: 0.2,
                period: 50.0,
            },
            time_step: 0.05,
            strip_count: 0,
            image_aspect: IMAGE_ASPECT,
            target_height: 1.0,
            model_color: 0x000000,
            clear_colour: wgpu::Color::BLACK,
        }
    }
}
