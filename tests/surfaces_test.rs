mod common;

use common::test_utils::{MockLoader, triangle_model};
use depth_sketch::{
    Sketch, SketchConfig, Viewport,
    data_structures::{geometry::PlaneGeometry, scene_graph::NodeKind},
    sketch::surfaces::{build_quad, build_strips},
};

#[test]
fn builds_101_banded_strips() {
    let strips = build_strips(101);
    assert_eq!(strips.len(), 101);
    for (i, strip) in strips.iter().enumerate() {
        let NodeKind::Strip { index, geometry } = &strip.kind else {
            panic!("node {i} is not a strip");
        };
        assert_eq!(*index, i);
        let band = i as f32 / 100.0;
        assert!(geometry.vertices.iter().all(|v| v.y == band));
        assert_eq!(strip.transform.position.y, (i as f32 - 50.0) / 50.0);
        assert_eq!(geometry.width_segments, 300);
        assert_eq!(geometry.height_segments, 1);
    }
    assert_eq!(strips[0].transform.position.y, -1.0);
    assert_eq!(strips[100].transform.position.y, 1.0);
}

#[test]
fn plane_layout_and_winding() {
    let plane = PlaneGeometry::new(2.0, 1.0, 2, 1);
    assert_eq!(plane.vertex_count(), 6);
    assert_eq!(plane.indices, vec![0, 3, 1, 3, 4, 1, 1, 4, 2, 4, 5, 2]);
    // top-left corner first, wgpu uv origin
    assert_eq!(plane.vertices[0].position, [-1.0, 0.5, 0.0]);
    assert_eq!(plane.vertices[0].uv, [0.0, 0.0]);
    assert_eq!(plane.vertices[5].position, [1.0, -0.5, 0.0]);
    assert_eq!(plane.vertices[5].uv, [1.0, 1.0]);
    assert!(plane.vertices.iter().all(|v| v.normal == [0.0, 0.0, 1.0]));
}

#[test]
fn quad_is_a_segmented_full_screen_plane() {
    let quad = build_quad();
    let NodeKind::Quad(geometry) = &quad.kind else {
        panic!("not a quad");
    };
    assert_eq!((geometry.width, geometry.height), (2.0, 2.0));
    assert_eq!(geometry.vertex_count(), 201 * 201);
}

#[test]
fn line_sketch_puts_strips_in_the_main_scene() {
    let sketch = Sketch::new(
        SketchConfig::face(),
        MockLoader::new(triangle_model("face")),
        Viewport::new(800, 600),
    );
    assert_eq!(sketch.scene().len(), 101);
    assert_eq!(sketch.scene().surfaces().count(), 101);
    assert!(sketch.post_scene().is_empty());
    assert_eq!(sketch.final_scene().len(), 101);
}

#[test]
fn gradient_sketch_puts_the_quad_in_the_post_scene() {
    let sketch = Sketch::new(
        SketchConfig::skull(),
        MockLoader::new(triangle_model("skull")),
        Viewport::new(800, 600),
    );
    assert!(sketch.scene().is_empty());
    assert_eq!(sketch.post_scene().len(), 1);
    assert_eq!(sketch.final_scene().len(), 1);
}
