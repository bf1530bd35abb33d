//! CPU versions of the depth conversions done by the surface shaders.

/// Non-linear depth buffer value to (negative) view-space z.
pub fn perspective_depth_to_view_z(depth: f32, near: f32, far: f32) -> f32 {
    (near * far) / ((far - near) * depth - far)
}

/// View-space z to a linear depth, 0 at `near` and 1 at `far`.
pub fn view_z_to_orthographic_depth(view_z: f32, near: f32, far: f32) -> f32 {
    (view_z + near) / (near - far)
}

/// What the shaders compute from a raw depth sample, clamped to `[0, 1]`.
pub fn linearize_depth(depth: f32, near: f32, far: f32) -> f32 {
    let view_z = perspective_depth_to_view_z(depth, near, far);
    view_z_to_orthographic_depth(view_z, near, far).clamp(0.0, 1.0)
}
