//! Glue between a [`Sketch`] and the app loop.

use instant::Duration;
use winit::{
    dpi::PhysicalSize,
    event::{DeviceEvent, WindowEvent},
};

use crate::{
    camera::OrbitController,
    context::{Context, InitContext, MouseButtonState},
    data_structures::model::LoadedModel,
    flow::{FlowConstructor, GraphicsFlow, Out},
    resources::{GltfLoader, ModelLoader},
    sketch::{
        Sketch, clock::FixedStep, config::SketchConfig, renderer::SketchRenderer, resize::Viewport,
    },
};

/// Radians of orbit per pixel of mouse motion.
const ROTATE_SPEED: f32 = 0.005;
/// Fraction of the camera distance removed per scroll line.
const ZOOM_SPEED: f32 = 0.05;

pub enum SketchEvent {
    ModelLoaded(anyhow::Result<LoadedModel>),
}

pub struct SketchFlow<L: ModelLoader> {
    sketch: Sketch<L, FixedStep>,
    renderer: SketchRenderer,
    controls: OrbitController,
}

impl<L: ModelLoader> SketchFlow<L> {
    pub fn new(ctx: &InitContext, config: SketchConfig, loader: L) -> Self {
        let sketch = Sketch::new(config, loader, Viewport::from(ctx.size));
        let renderer = SketchRenderer::new(&ctx.device, ctx.format, &sketch);
        Self {
            sketch,
            renderer,
            controls: OrbitController::new(ROTATE_SPEED, ZOOM_SPEED),
        }
    }

    pub fn sketch(&self) -> &Sketch<L, FixedStep> {
        &self.sketch
    }
}

impl<L: ModelLoader> GraphicsFlow<SketchEvent> for SketchFlow<L> {
    fn on_init(&mut self, ctx: &mut Context) -> Out<SketchEvent> {
        ctx.clear_colour = self.sketch.config().clear_colour;
        let load = self.sketch.load_model();
        let loaded: Box<dyn Future<Output = SketchEvent>> =
            Box::new(async move { SketchEvent::ModelLoaded(load.await) });
        Out::FutEvent(vec![loaded])
    }

    fn on_resize(&mut self, ctx: &Context, size: PhysicalSize<u32>) {
        let viewport = Viewport::from(size);
        self.sketch.resize(viewport);
        self.renderer.resize(&ctx.device, viewport);
    }

    fn on_update(&mut self, _ctx: &Context, _dt: Duration) -> Out<SketchEvent> {
        self.controls.update(self.sketch.main_camera_mut());
        Out::Empty
    }

    fn on_device_events(&mut self, ctx: &Context, event: &DeviceEvent) -> Out<SketchEvent> {
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            if ctx.mouse.pressed == MouseButtonState::Left {
                self.controls.handle_mouse(*dx, *dy);
            }
        }
        Out::Empty
    }

    fn on_window_events(&mut self, _ctx: &Context, event: &WindowEvent) -> Out<SketchEvent> {
        self.controls.handle_window_events(event);
        Out::Empty
    }

    fn on_custom_events(&mut self, _ctx: &Context, event: SketchEvent) -> Option<SketchEvent> {
        match event {
            SketchEvent::ModelLoaded(result) => {
                self.sketch.attach_model(result);
                None
            }
        }
    }

    fn on_render(
        &mut self,
        ctx: &Context,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        depth_view: &wgpu::TextureView,
    ) {
        let frame = self.sketch.advance();
        self.renderer
            .prepare(&ctx.device, &ctx.queue, &self.sketch, &frame);
        self.renderer
            .render(encoder, view, depth_view, ctx.clear_colour, &self.sketch);
    }
}

/// Flow constructor of `config`, loading its model from the asset directory.
pub fn constructor(config: SketchConfig) -> FlowConstructor<SketchEvent> {
    Box::new(move |ctx: InitContext| {
        Box::pin(async move {
            let flow: Box<dyn GraphicsFlow<SketchEvent>> =
                Box::new(SketchFlow::new(&ctx, config, GltfLoader));
            flow
        })
    })
}
