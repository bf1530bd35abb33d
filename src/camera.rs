//! Perspective cameras, their GPU uniforms and orbit-style controls.

use cgmath::{Deg, InnerSpace, Matrix4, Point3, Vector3};
use wgpu::util::DeviceExt;
use winit::event::{MouseScrollDelta, WindowEvent};

/// cgmath produces OpenGL clip space (z in -1..1), wgpu expects z in 0..1.
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// Camera parameters as configured, before any resize.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraSettings {
    pub fovy: Deg<f32>,
    pub znear: f32,
    pub zfar: f32,
    pub position: [f32; 3],
}

/// A perspective camera looking at `target`.
///
/// The projection matrix is cached and only recomputed by
/// [`update_projection_matrix`](Self::update_projection_matrix), so changing
/// `fovy` or `aspect` has no effect until that call.
#[derive(Clone, Debug, PartialEq)]
pub struct PerspectiveCamera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub fovy: Deg<f32>,
    pub aspect: f32,
    pub znear: f32,
    pub zfar: f32,
    projection: Matrix4<f32>,
}

impl PerspectiveCamera {
    pub fn new(settings: CameraSettings, aspect: f32) -> Self {
        let mut camera = Self {
            position: settings.position.into(),
            target: Point3::new(0.0, 0.0, 0.0),
            fovy: settings.fovy,
            aspect,
            znear: settings.znear,
            zfar: settings.zfar,
            projection: Matrix4::from_scale(1.0),
        };
        camera.update_projection_matrix();
        camera
    }

    pub fn update_projection_matrix(&mut self) {
        self.projection = OPENGL_TO_WGPU_MATRIX
            * cgmath::perspective(self.fovy, self.aspect, self.znear, self.zfar);
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        self.projection
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(self.position, self.target, Vector3::unit_y())
    }

    pub fn view_projection(&self) -> Matrix4<f32> {
        self.projection * self.view_matrix()
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new() -> Self {
        use cgmath::SquareMatrix;
        Self {
            view_proj: Matrix4::identity().into(),
        }
    }

    pub fn update_view_proj(&mut self, view_proj: Matrix4<f32>) {
        self.view_proj = view_proj.into();
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

pub fn mk_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
        label: Some("camera_bind_group_layout"),
    })
}

/// Uniform buffer and bind group of one camera.
#[derive(Debug)]
pub struct CameraResources {
    pub uniform: CameraUniform,
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
}

impl CameraResources {
    pub fn new(device: &wgpu::Device, layout: &wgpu::BindGroupLayout, label: &str) -> Self {
        let uniform = CameraUniform::new();
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Camera Buffer")),
            contents: bytemuck::cast_slice(&[uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
            label: Some(&format!("{label} camera_bind_group")),
        });
        Self {
            uniform,
            buffer,
            bind_group,
        }
    }

    pub fn write(&mut self, queue: &wgpu::Queue, view_proj: Matrix4<f32>) {
        self.uniform.update_view_proj(view_proj);
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[self.uniform]));
    }
}

/// Orbit controls: dragging rotates the camera around its target, scrolling dollies.
#[derive(Debug)]
pub struct OrbitController {
    rotate_speed: f32,
    zoom_speed: f32,
    min_distance: f32,
    max_distance: f32,
    theta_delta: f32,
    phi_delta: f32,
    zoom_steps: f32,
}

impl OrbitController {
    const MIN_POLAR: f32 = 1e-3;

    /// `rotate_speed` is in radians per pixel of mouse motion.
    pub fn new(rotate_speed: f32, zoom_speed: f32) -> Self {
        Self {
            rotate_speed,
            zoom_speed,
            min_distance: 0.1,
            max_distance: 10.0,
            theta_delta: 0.0,
            phi_delta: 0.0,
            zoom_steps: 0.0,
        }
    }

    pub fn handle_mouse(&mut self, dx: f64, dy: f64) {
        self.theta_delta -= dx as f32 * self.rotate_speed;
        self.phi_delta -= dy as f32 * self.rotate_speed;
    }

    pub fn handle_window_events(&mut self, event: &WindowEvent) {
        if let WindowEvent::MouseWheel { delta, .. } = event {
            self.zoom_steps += match delta {
                MouseScrollDelta::LineDelta(_, y) => *y,
                MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 100.0,
            };
        }
    }

    pub fn is_idle(&self) -> bool {
        self.theta_delta == 0.0 && self.phi_delta == 0.0 && self.zoom_steps == 0.0
    }

    /// Apply the accumulated input to `camera`. Returns whether the camera moved.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) -> bool {
        if self.is_idle() {
            return false;
        }
        let offset = camera.position - camera.target;
        let radius = offset.magnitude();
        if radius == 0.0 {
            self.reset();
            return false;
        }
        let theta = offset.x.atan2(offset.z) + self.theta_delta;
        let phi = ((offset.y / radius).clamp(-1.0, 1.0).acos() + self.phi_delta).clamp(
            Self::MIN_POLAR,
            std::f32::consts::PI - Self::MIN_POLAR,
        );
        let radius = (radius * (1.0 - self.zoom_speed).powf(self.zoom_steps))
            .clamp(self.min_distance, self.max_distance);

        let offset = Vector3::new(
            radius * phi.sin() * theta.sin(),
            radius * phi.cos(),
            radius * phi.sin() * theta.cos(),
        );
        camera.position = camera.target + offset;
        self.reset();
        true
    }

    fn reset(&mut self) {
        self.theta_delta = 0.0;
        self.phi_delta = 0.0;
        self.zoom_steps = 0.0;
    }
}

