//! Sketch data structures: geometry, models, transforms, scene graphs and textures.
//!
//! - `geometry` builds the segmented planes the depth surfaces are made of
//! - `instance` holds per-node transforms and their GPU layout
//! - `model` contains glTF-derived mesh data and GPU meshes
//! - `render_target` is the off-screen colour + depth pair
//! - `scene_graph` is the append-only node list of a scene
//! - `texture` wraps GPU textures and their creation

pub mod geometry;
pub mod instance;
pub mod model;
pub mod render_target;
pub mod scene_graph;
pub mod texture;
