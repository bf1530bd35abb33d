mod common;

use cgmath::{Euler, Quaternion, Rad, Rotation3};
use common::test_utils::{MockLoader, assert_close, triangle_model};
use depth_sketch::{
    Sketch, SketchConfig, Viewport,
    data_structures::{
        model::{FlatMaterial, PartMaterial},
        scene_graph::NodeKind,
    },
    sketch::config::CameraRole,
};
use futures::executor::block_on;

fn face_sketch(loader: MockLoader) -> Sketch<MockLoader> {
    Sketch::new(SketchConfig::face(), loader, Viewport::new(1280, 853))
}

#[test]
fn mocked_load_adds_one_placed_model() {
    let mut sketch = face_sketch(MockLoader::new(triangle_model("face")));
    let before = sketch.scene().len();

    let loaded = block_on(sketch.load_model());
    let id = sketch.attach_model(loaded).expect("model should attach");

    assert_eq!(sketch.scene().len(), before + 1);
    assert_eq!(sketch.model(), Some(id));
    let node = sketch.scene().get(id).unwrap();
    assert_close(node.transform.scale.x, 0.18);
    assert_close(node.transform.scale.y, 0.1);
    assert_close(node.transform.scale.z, 0.1);
    assert_eq!(node.transform.position, cgmath::Vector3::new(0.0, 0.0, -1.5));
}

#[test]
fn attached_model_uses_the_flat_material() {
    let mut sketch = face_sketch(MockLoader::new(triangle_model("face")));
    let id = sketch
        .attach_model(block_on(sketch.load_model()))
        .unwrap();
    let NodeKind::Model(model) = &sketch.scene().get(id).unwrap().kind else {
        panic!("model node expected");
    };
    let black = FlatMaterial::from_hex(0x000000);
    assert!(
        model
            .parts
            .iter()
            .all(|part| part.material == PartMaterial::Flat(black))
    );
    // the renderer draws each part with this colour
    assert!(
        model
            .parts
            .iter()
            .all(|part| part.material.flat() == Some(black))
    );
}

#[test]
fn failed_load_leaves_the_scene_untouched() {
    let loader = MockLoader::failing();
    let requests = loader.requests();
    let mut sketch = face_sketch(loader);
    let before = sketch.scene().len();

    let loaded = block_on(sketch.load_model());
    assert!(loaded.is_err());
    assert_eq!(sketch.attach_model(loaded), None);

    assert_eq!(sketch.scene().len(), before);
    assert_eq!(sketch.model(), None);
    assert_eq!(requests.get(), 1);
    // frames keep coming without a model
    let frame = sketch.advance();
    assert_eq!(frame.time, 0.5);
}

#[test]
fn second_model_is_ignored() {
    let mut sketch = face_sketch(MockLoader::new(triangle_model("face")));
    let first = sketch.attach_model(Ok(triangle_model("a")));
    let second = sketch.attach_model(Ok(triangle_model("b")));
    assert!(first.is_some());
    assert_eq!(second, None);
    assert_eq!(sketch.scene().models().count(), 1);
}

#[test]
fn idle_motion_follows_time() {
    let mut sketch = face_sketch(MockLoader::new(triangle_model("face")));
    let id = sketch.attach_model(Ok(triangle_model("face"))).unwrap();

    for _ in 0..40 {
        sketch.advance();
    }
    let time = sketch.time();
    assert_eq!(time, 20.0);

    let wave = 0.2 * (time / 50.0).sin();
    let transform = sketch.scene().get(id).unwrap().transform;
    assert_close(transform.position.z, -1.6 + wave);
    assert_close(transform.rotation_z().0, -0.1 + wave);
    // x and y are never animated
    assert_eq!(transform.position.x, 0.0);
    assert_eq!(transform.position.y, 0.0);
}

#[test]
fn idle_motion_keeps_the_asset_tilt() {
    let mut sketch = face_sketch(MockLoader::new(triangle_model("face")));
    let mut model = triangle_model("tilted");
    model.root.rotation = Quaternion::from_angle_x(Rad(0.3));
    let id = sketch.attach_model(Ok(model)).unwrap();

    sketch.advance();

    let euler = Euler::from(sketch.scene().get(id).unwrap().transform.rotation);
    assert!((euler.x.0 - 0.3).abs() < 1e-4);
    assert!(euler.y.0.abs() < 1e-4);
    assert!((euler.z.0 - (-0.1 + 0.2 * (0.5f32 / 50.0).sin())).abs() < 1e-4);
}

#[test]
fn frame_params_pick_cameras_per_variant() {
    let mut face = face_sketch(MockLoader::new(triangle_model("face")));
    let frame = face.advance();
    assert_eq!(
        frame.offscreen_view_proj,
        face.camera(CameraRole::Post).view_projection()
    );
    assert_eq!(
        frame.final_view_proj,
        face.camera(CameraRole::Main).view_projection()
    );

    let mut skull = Sketch::new(
        SketchConfig::skull(),
        MockLoader::new(triangle_model("skull")),
        Viewport::new(1280, 853),
    );
    let frame = skull.advance();
    assert_eq!(
        frame.offscreen_view_proj,
        skull.camera(CameraRole::Main).view_projection()
    );
    assert_eq!(
        frame.final_view_proj,
        skull.camera(CameraRole::Post).view_projection()
    );
}

#[test]
fn depth_planes_come_from_the_post_camera() {
    let face = face_sketch(MockLoader::new(triangle_model("face")));
    assert_eq!(face.uniforms().camera_near, 2.0);
    assert_eq!(face.uniforms().camera_far, 4.0);

    let skull = Sketch::new(
        SketchConfig::skull(),
        MockLoader::new(triangle_model("skull")),
        Viewport::new(1280, 853),
    );
    assert_eq!(skull.uniforms().camera_near, 0.1);
    assert_eq!(skull.uniforms().camera_far, 4.0);
}

#[test]
fn orbit_controls_move_the_main_camera_only() {
    use depth_sketch::camera::OrbitController;

    let mut sketch = face_sketch(MockLoader::new(triangle_model("face")));
    let post = sketch.camera(CameraRole::Post).clone();
    let mut controls = OrbitController::new(0.01, 0.1);
    controls.handle_mouse(100.0, 0.0);

    assert!(controls.update(sketch.main_camera_mut()));
    assert!(controls.is_idle());

    let main = sketch.camera(CameraRole::Main);
    let distance = cgmath::InnerSpace::magnitude(main.position - main.target);
    assert_close(distance, 2.0);
    assert!(main.position.x.abs() > 0.1);
    assert_eq!(sketch.camera(CameraRole::Post), &post);
}
