//! Viewport sizing: cover fit against the reference image and fov fitting.

use cgmath::Deg;
use winit::dpi::PhysicalSize;

/// 853:1280, the aspect ratio the surfaces are fitted against.
pub const IMAGE_ASPECT: f32 = 853.0 / 1280.0;

/// Drawable size in pixels. Never zero in either dimension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    width: u32,
    height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        if width == 0 || height == 0 {
            log::warn!("degenerate viewport {}x{}, clamping to 1", width, height);
        }
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    pub fn size(&self) -> [u32; 2] {
        [self.width, self.height]
    }
}

impl From<PhysicalSize<u32>> for Viewport {
    fn from(size: PhysicalSize<u32>) -> Self {
        Self::new(size.width, size.height)
    }
}

/// UV scale factors `(a1, a2)` of a cover fit of `image_aspect` into the viewport.
pub fn cover_fit(viewport: Viewport, image_aspect: f32) -> (f32, f32) {
    let width = viewport.width as f32;
    let height = viewport.height as f32;
    if height / width > image_aspect {
        (width / height * image_aspect, 1.0)
    } else {
        (1.0, height / width / image_aspect)
    }
}

/// The packed `resolution` uniform: `[width, height, a1, a2]`.
pub fn resolution(viewport: Viewport, image_aspect: f32) -> [f32; 4] {
    let (a1, a2) = cover_fit(viewport, image_aspect);
    [viewport.width as f32, viewport.height as f32, a1, a2]
}

/// Vertical field of view showing exactly `height` world units at `distance`.
pub fn fov_for_height(height: f32, distance: f32) -> Deg<f32> {
    Deg(2.0 * (height / (2.0 * distance)).atan().to_degrees())
}
