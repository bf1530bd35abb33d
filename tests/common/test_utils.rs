#![allow(dead_code)]

use std::cell::Cell;
use std::rc::Rc;

use depth_sketch::{
    data_structures::{
        instance::Instance,
        model::{LoadedModel, MeshData, ModelPart, ModelVertex, PartMaterial},
    },
    resources::{ModelFuture, ModelLoader},
};

pub const EPSILON: f32 = 1e-5;

pub fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() <= EPSILON,
        "expected {expected}, got {actual}"
    );
}

/// A single triangle facing +Z.
pub fn triangle_model(name: &str) -> LoadedModel {
    let vertices = [[0.0, 1.0, 0.0], [-1.0, -1.0, 0.0], [1.0, -1.0, 0.0]]
        .into_iter()
        .map(|position| ModelVertex {
            position,
            normal: [0.0, 0.0, 1.0],
        })
        .collect();
    LoadedModel {
        name: name.to_string(),
        root: Instance::new(),
        parts: vec![ModelPart {
            name: format!("{name}#0"),
            transform: Instance::new(),
            mesh: MeshData {
                vertices,
                indices: vec![0, 1, 2],
            },
            material: PartMaterial::Source(Some(0)),
        }],
    }
}

/// Resolves immediately with a prepared model, or with an error when built with [`MockLoader::failing`].
pub struct MockLoader {
    model: Option<LoadedModel>,
    requests: Rc<Cell<u32>>,
}

impl MockLoader {
    pub fn new(model: LoadedModel) -> Self {
        Self {
            model: Some(model),
            requests: Rc::new(Cell::new(0)),
        }
    }

    pub fn failing() -> Self {
        Self {
            model: None,
            requests: Rc::new(Cell::new(0)),
        }
    }

    /// Shared counter of `load` calls.
    pub fn requests(&self) -> Rc<Cell<u32>> {
        self.requests.clone()
    }
}

impl ModelLoader for MockLoader {
    fn load(&self, asset: &str) -> ModelFuture {
        self.requests.set(self.requests.get() + 1);
        let result = self
            .model
            .clone()
            .ok_or_else(|| anyhow::anyhow!("{asset} is not available"));
        Box::pin(async move { result })
    }
}

/// Binary glTF with a root node `Head` (translated by `(0, 0, 0.5)`) whose
/// child `Jaw` (translated by `(0, 1, 0)`) carries one indexed triangle.
pub fn two_node_glb() -> Vec<u8> {
    let positions: [[f32; 3]; 3] = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
    let indices: [u16; 3] = [0, 1, 2];

    let mut bin: Vec<u8> = Vec::new();
    positions
        .iter()
        .flatten()
        .for_each(|v| bin.extend_from_slice(&v.to_le_bytes()));
    indices
        .iter()
        .for_each(|i| bin.extend_from_slice(&i.to_le_bytes()));
    while bin.len() % 4 != 0 {
        bin.push(0);
    }

    let json = format!(
        r#"{{
  "asset": {{ "version": "2.0" }},
  "scene": 0,
  "scenes": [{{ "nodes": [0] }}],
  "nodes": [
    {{ "name": "Head", "translation": [0.0, 0.0, 0.5], "children": [1] }},
    {{ "name": "Jaw", "mesh": 0, "translation": [0.0, 1.0, 0.0] }}
  ],
  "meshes": [{{ "name": "jaw", "primitives": [{{ "attributes": {{ "POSITION": 0 }}, "indices": 1 }}] }}],
  "accessors": [
    {{ "bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3",
       "min": [0.0, 0.0, 0.0], "max": [1.0, 1.0, 0.0] }},
    {{ "bufferView": 1, "componentType": 5123, "count": 3, "type": "SCALAR" }}
  ],
  "bufferViews": [
    {{ "buffer": 0, "byteOffset": 0, "byteLength": 36 }},
    {{ "buffer": 0, "byteOffset": 36, "byteLength": 6 }}
  ],
  "buffers": [{{ "byteLength": {} }}]
}}"#,
        bin.len()
    );
    let mut json = json.into_bytes();
    while json.len() % 4 != 0 {
        json.push(b' ');
    }

    let total = 12 + 8 + json.len() + 8 + bin.len();
    let mut glb = Vec::with_capacity(total);
    glb.extend_from_slice(b"glTF");
    glb.extend_from_slice(&2u32.to_le_bytes());
    glb.extend_from_slice(&(total as u32).to_le_bytes());
    glb.extend_from_slice(&(json.len() as u32).to_le_bytes());
    glb.extend_from_slice(b"JSON");
    glb.extend_from_slice(&json);
    glb.extend_from_slice(&(bin.len() as u32).to_le_bytes());
    glb.extend_from_slice(b"BIN\0");
    glb.extend_from_slice(&bin);
    glb
}

#[cfg(feature = "integration-tests")]
pub use image_test::*;

#[cfg(feature = "integration-tests")]
mod image_test {
    use depth_sketch::{
        SketchEvent, SketchFlow,
        context::Context,
        flow::{GraphicsFlow, ImageTestResult, Out},
        resources::ModelLoader,
    };
    use winit::{
        dpi::PhysicalSize,
        event::{DeviceEvent, WindowEvent},
    };

    pub(crate) type Validate = Box<dyn Fn(&Context, &image::RgbaImage) -> ImageTestResult>;

    /// Wraps a sketch flow and checks the rendered frame once `frames` frames were drawn.
    pub(crate) struct TestSketch<L: ModelLoader> {
        pub(crate) flow: SketchFlow<L>,
        pub(crate) frames: u32,
        pub(crate) rendered: u32,
        pub(crate) validate: Validate,
    }

    impl<L: ModelLoader> GraphicsFlow<SketchEvent> for TestSketch<L> {
        fn on_init(&mut self, ctx: &mut Context) -> Out<SketchEvent> {
            self.flow.on_init(ctx)
        }

        fn on_resize(&mut self, ctx: &Context, size: PhysicalSize<u32>) {
            self.flow.on_resize(ctx, size)
        }

        fn on_update(&mut self, ctx: &Context, dt: instant::Duration) -> Out<SketchEvent> {
            self.flow.on_update(ctx, dt)
        }

        fn on_device_events(&mut self, _: &Context, _: &DeviceEvent) -> Out<SketchEvent> {
            Out::Empty
        }

        fn on_window_events(&mut self, _: &Context, _: &WindowEvent) -> Out<SketchEvent> {
            Out::Empty
        }

        fn on_custom_events(&mut self, ctx: &Context, event: SketchEvent) -> Option<SketchEvent> {
            self.flow.on_custom_events(ctx, event)
        }

        fn on_render(
            &mut self,
            ctx: &Context,
            encoder: &mut wgpu::CommandEncoder,
            view: &wgpu::TextureView,
            depth_view: &wgpu::TextureView,
        ) {
            self.rendered += 1;
            self.flow.on_render(ctx, encoder, view, depth_view)
        }

        fn render_to_texture(
            &self,
            ctx: &Context,
            texture: &image::RgbaImage,
        ) -> Result<ImageTestResult, anyhow::Error> {
            if self.rendered < self.frames {
                return Ok(ImageTestResult::Waiting);
            }
            Ok((self.validate)(ctx, texture))
        }
    }
}

#[macro_export]
macro_rules! golden_image_test {
    ($config:expr, $loader:expr, $frames:expr, $validate:expr) => {{
        use depth_sketch::{SketchEvent, SketchFlow, flow::FlowConstructor, flow::GraphicsFlow};
        let constructor: FlowConstructor<SketchEvent> = Box::new(move |ctx| {
            Box::pin(async move {
                let flow: Box<dyn GraphicsFlow<SketchEvent>> =
                    Box::new($crate::common::test_utils::TestSketch {
                        flow: SketchFlow::new(&ctx, $config, $loader),
                        frames: $frames,
                        rendered: 0,
                        validate: Box::new($validate),
                    });
                flow
            })
        });

        depth_sketch::flow::run(vec![constructor])
            .expect("Failed to run flow for integration test.");
    }};
}
