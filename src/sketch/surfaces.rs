//! The meshes the depth image is displayed on.

use crate::data_structures::{
    geometry::PlaneGeometry,
    instance::Instance,
    scene_graph::{NodeKind, SceneNode},
};

const STRIP_WIDTH: f32 = 2.0;
const STRIP_HEIGHT: f32 = 0.005;
const STRIP_SEGMENTS: u32 = 300;
const QUAD_SEGMENTS: u32 = 200;

/// `count` thin horizontal strips stacked from y = -1 to y = 1.
///
/// Strip `i` carries the attribute `y = i / 100` and sits at height `(i - 50) / 50`.
pub fn build_strips(count: usize) -> Vec<SceneNode> {
    (0..count)
        .map(|index| {
            let geometry = PlaneGeometry::new(STRIP_WIDTH, STRIP_HEIGHT, STRIP_SEGMENTS, 1)
                .with_attribute_y(index as f32 / 100.0);
            let position = cgmath::Vector3::new(0.0, (index as f32 - 50.0) / 50.0, 0.0);
            SceneNode::new(
                format!("strip {}", index),
                Instance::from(position),
                NodeKind::Strip { index, geometry },
            )
        })
        .collect()
}

/// A single 2x2 quad at the origin.
pub fn build_quad() -> SceneNode {
    SceneNode::new(
        "quad",
        Instance::new(),
        NodeKind::Quad(PlaneGeometry::new(2.0, 2.0, QUAD_SEGMENTS, QUAD_SEGMENTS)),
    )
}
