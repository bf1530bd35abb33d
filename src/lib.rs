//! depth-sketch
//!
//! Two small wgpu sketches that render a glTF model into an off-screen colour
//! and depth target and feed that depth back into a second pass, where it
//! displaces and shades a set of surfaces. The `face` sketch draws 101 thin
//! line strips next to the model, the `skull` sketch a single quad with a
//! two-tone depth gradient. Both run natively and on the web (WebGL).
//!
//! High-level modules
//! - `camera`: perspective cameras, their uniforms and orbit controls
//! - `context`: GPU and window context (device, queue, surface, depth buffer)
//! - `data_structures`: geometry, models, transforms, scene graphs, textures
//! - `flow`: app event loop and the `GraphicsFlow` trait
//! - `pipelines`: the flat model pipeline and the depth surface pipelines
//! - `resources`: asset IO and glTF decoding
//! - `sketch`: the sketch controller, its renderer and presets
//!

pub mod camera;
pub mod context;
pub mod data_structures;
pub mod flow;
pub mod pipelines;
pub mod resources;
pub mod sketch;

pub use sketch::{
    FrameParams, Sketch,
    config::{SketchConfig, Variant},
    flow::{SketchEvent, SketchFlow},
    resize::Viewport,
};

/// Run one sketch until its window is closed.
pub fn run_sketch(config: SketchConfig) -> anyhow::Result<()> {
    flow::run(vec![sketch::flow::constructor(config)])
}

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen::prelude::*;

    use crate::{SketchConfig, run_sketch};

    #[wasm_bindgen]
    pub fn start_face() -> Result<(), JsValue> {
        run_sketch(SketchConfig::face()).map_err(|e| JsValue::from_str(&format!("{:#}", e)))
    }

    #[wasm_bindgen]
    pub fn start_skull() -> Result<(), JsValue> {
        run_sketch(SketchConfig::skull()).map_err(|e| JsValue::from_str(&format!("{:#}", e)))
    }
}
