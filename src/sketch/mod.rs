//! The depth sketch: a model rendered off-screen whose depth buffer displaces
//! and colours a set of surfaces in a second pass.
//!
//! [`Sketch`] is the CPU side and owns scene graphs, cameras, the frame clock
//! and the material uniforms. It knows nothing about the GPU, so it can be
//! driven headless. [`renderer::SketchRenderer`] turns its state into two
//! render passes per frame and [`flow::SketchFlow`] plugs both into the app
//! loop.
//!
//! Per frame:
//! 1. [`Sketch::advance`] ticks the clock, moves the model (once loaded) and
//!    returns the [`FrameParams`] of the frame
//! 2. the renderer draws the model into the off-screen target
//! 3. the renderer draws the final scene to the screen, with the surfaces
//!    reading the target's depth

use cgmath::{InnerSpace, Matrix4, Rad};

use crate::{
    camera::PerspectiveCamera,
    data_structures::{
        model::{FlatMaterial, LoadedModel},
        scene_graph::{NodeId, NodeKind, SceneGraph, SceneNode},
    },
    resources::{ModelFuture, ModelLoader},
    sketch::{
        clock::{FixedStep, FrameClock},
        config::{CameraRole, SketchConfig, Variant},
        resize::{Viewport, fov_for_height, resolution},
        uniforms::SketchUniforms,
    },
};

pub mod clock;
pub mod config;
pub mod depth;
pub mod flow;
pub mod renderer;
pub mod resize;
pub mod surfaces;
pub mod uniforms;

/// Everything the renderer needs from the sketch for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameParams {
    pub time: f32,
    pub uniforms: SketchUniforms,
    pub offscreen_view_proj: Matrix4<f32>,
    pub final_view_proj: Matrix4<f32>,
}

pub struct Sketch<L: ModelLoader, C: FrameClock = FixedStep> {
    config: SketchConfig,
    loader: L,
    scene: SceneGraph,
    post_scene: SceneGraph,
    camera: PerspectiveCamera,
    post_camera: PerspectiveCamera,
    clock: C,
    uniforms: SketchUniforms,
    viewport: Viewport,
    model: Option<NodeId>,
}

impl<L: ModelLoader> Sketch<L, FixedStep> {
    pub fn new(config: SketchConfig, loader: L, viewport: Viewport) -> Self {
        let clock = FixedStep::new(config.time_step);
        Self::with_clock(config, loader, viewport, clock)
    }
}

impl<L: ModelLoader, C: FrameClock> Sketch<L, C> {
    pub fn with_clock(config: SketchConfig, loader: L, viewport: Viewport, clock: C) -> Self {
        let camera = PerspectiveCamera::new(config.main_camera, viewport.aspect());
        let post_camera = PerspectiveCamera::new(config.post_camera, viewport.aspect());
        let uniforms = SketchUniforms::new(post_camera.znear, post_camera.zfar);

        let mut scene = SceneGraph::new();
        let mut post_scene = SceneGraph::new();
        match config.variant {
            Variant::Lines => {
                surfaces::build_strips(config.strip_count)
                    .into_iter()
                    .for_each(|strip| {
                        scene.add(strip);
                    });
            }
            Variant::Gradient => {
                post_scene.add(surfaces::build_quad());
            }
        }

        let mut sketch = Self {
            config,
            loader,
            scene,
            post_scene,
            camera,
            post_camera,
            clock,
            uniforms,
            viewport,
            model: None,
        };
        sketch.resize(viewport);
        sketch
    }

    /// Start loading the configured asset. The result goes to [`attach_model`](Self::attach_model).
    pub fn load_model(&self) -> ModelFuture {
        log::info!("loading {}", self.config.asset);
        self.loader.load(&self.config.asset)
    }

    /// Place a loaded model in the main scene.
    ///
    /// Every part gets the flat material, the node gets the configured scale
    /// and position and keeps the root rotation of the asset. A failed load
    /// is logged and leaves the sketch without a model.
    pub fn attach_model(&mut self, loaded: anyhow::Result<LoadedModel>) -> Option<NodeId> {
        let mut model = match loaded {
            Ok(model) => model,
            Err(e) => {
                log::error!("failed to load {}: {:#}", self.config.asset, e);
                return None;
            }
        };
        if let Some(existing) = self.model {
            log::warn!(
                "model already attached as node {}, ignoring {}",
                existing.index(),
                model.name
            );
            return None;
        }

        model.override_material(FlatMaterial::from_hex(self.config.model_color));
        let placement = self.config.placement;
        let mut transform = model.root;
        transform.scale = placement.scale_vector();
        transform.position = placement.position.into();

        log::info!(
            "attaching {} ({} parts, {} vertices)",
            model.name,
            model.parts.len(),
            model.vertex_count()
        );
        let id = self.scene.add(SceneNode::new(
            model.name.clone(),
            transform,
            NodeKind::Model(model),
        ));
        self.model = Some(id);
        Some(id)
    }

    /// Fit uniforms and cameras to `viewport`. Calling it again with the same
    /// viewport changes nothing.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.uniforms.resolution = resolution(viewport, self.config.image_aspect);

        let distance = (self.camera.position - self.camera.target).magnitude();
        self.camera.fovy = fov_for_height(self.config.target_height, distance);
        self.camera.aspect = viewport.aspect();
        self.camera.update_projection_matrix();

        self.post_camera.aspect = viewport.aspect();
        self.post_camera.update_projection_matrix();
    }

    /// Move on to the next frame.
    pub fn advance(&mut self) -> FrameParams {
        let time = self.clock.tick();
        self.uniforms.time = time;

        if let Some(node) = self.model.and_then(|id| self.scene.get_mut(id)) {
            let (z, rotation_z) = self.config.idle.at(time);
            node.transform.position.z = z;
            node.transform.set_rotation_z(Rad(rotation_z));
        }

        FrameParams {
            time,
            uniforms: self.uniforms,
            offscreen_view_proj: self.camera(self.config.variant.offscreen_camera()).view_projection(),
            final_view_proj: self.camera(self.config.variant.final_camera()).view_projection(),
        }
    }

    pub fn camera(&self, role: CameraRole) -> &PerspectiveCamera {
        match role {
            CameraRole::Main => &self.camera,
            CameraRole::Post => &self.post_camera,
        }
    }

    /// The main camera, for user controls.
    pub fn main_camera_mut(&mut self) -> &mut PerspectiveCamera {
        &mut self.camera
    }

    pub fn config(&self) -> &SketchConfig {
        &self.config
    }

    /// Scene holding the model (and the strips of the line variant).
    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    /// Scene holding only the gradient quad. Empty for the line variant.
    pub fn post_scene(&self) -> &SceneGraph {
        &self.post_scene
    }

    /// Scene drawn to the screen.
    pub fn final_scene(&self) -> &SceneGraph {
        match self.config.variant {
            Variant::Lines => &self.scene,
            Variant::Gradient => &self.post_scene,
        }
    }

    pub fn uniforms(&self) -> &SketchUniforms {
        &self.uniforms
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn model(&self) -> Option<NodeId> {
        self.model
    }

    pub fn time(&self) -> f32 {
        self.clock.time()
    }
}
