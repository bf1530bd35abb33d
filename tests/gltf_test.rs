mod common;

use common::test_utils::{assert_close, two_node_glb};
use depth_sketch::{
    data_structures::model::PartMaterial,
    resources::decode_gltf,
};
use futures::executor::block_on;

#[test]
fn first_node_becomes_the_model_root() {
    let model = block_on(decode_gltf("head.glb", &two_node_glb())).unwrap();

    assert_eq!(model.name, "Head");
    assert_eq!(model.root.position, cgmath::Vector3::new(0.0, 0.0, 0.5));
    assert_eq!(model.parts.len(), 1);
}

#[test]
fn child_meshes_are_flattened_with_relative_transforms() {
    let model = block_on(decode_gltf("head.glb", &two_node_glb())).unwrap();
    let part = &model.parts[0];

    assert_eq!(part.name, "jaw#0");
    assert_eq!(part.transform.position, cgmath::Vector3::new(0.0, 1.0, 0.0));
    assert_eq!(part.mesh.indices, vec![0, 1, 2]);
    assert_eq!(part.mesh.vertices.len(), 3);
    assert_close(part.mesh.vertices[1].position[0], 1.0);
    assert_close(part.mesh.vertices[2].position[1], 1.0);
    // no NORMAL attribute in the asset
    assert!(part.mesh.vertices.iter().all(|v| v.normal == [0.0; 3]));
    assert_eq!(part.material, PartMaterial::Source(None));
    assert_eq!(part.material.flat(), None);
    assert_eq!(model.vertex_count(), 3);
}

#[test]
fn garbage_is_an_error() {
    let result = block_on(decode_gltf("broken.glb", b"definitely not gltf"));
    assert!(result.is_err());
}

#[test]
fn missing_asset_is_an_error() {
    let result = block_on(depth_sketch::resources::load_model_gltf(
        "no-such-model.glb",
    ));
    assert!(result.is_err());
}
