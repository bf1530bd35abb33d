//! GPU side of a sketch: the off-screen pass and the final pass.

use wgpu::util::DeviceExt;

use crate::{
    camera::{self, CameraResources},
    data_structures::{
        instance::{Instance, InstanceRaw},
        model::{DrawMesh, FlatMaterial, Mesh},
        render_target::RenderTarget,
        scene_graph::{NodeKind, SceneGraph, SceneNode},
        texture::Texture,
    },
    pipelines::{
        flat::{self, FlatMaterialResources},
        surface::{self, SurfaceMaterial},
    },
    resources::ModelLoader,
    sketch::{FrameParams, Sketch, clock::FrameClock, config::Variant, resize::Viewport},
};

const INSTANCE_SIZE: wgpu::BufferAddress = std::mem::size_of::<InstanceRaw>() as wgpu::BufferAddress;

/// Buffers of one scene node. Every mesh owns one slot of the instance buffer.
///
/// Model parts with a flat material get their own material bind group; parts
/// without one are drawn with the renderer's fallback colour.
struct GpuNode {
    is_surface: bool,
    meshes: Vec<Mesh>,
    materials: Vec<Option<FlatMaterialResources>>,
    part_transforms: Vec<Instance>,
    instance_buffer: wgpu::Buffer,
    transform: Instance,
}

impl GpuNode {
    fn new(device: &wgpu::Device, flat_layout: &wgpu::BindGroupLayout, node: &SceneNode) -> Self {
        let mut materials = Vec::new();
        let (meshes, part_transforms): (Vec<Mesh>, Vec<Instance>) = match &node.kind {
            NodeKind::Model(model) => model
                .parts
                .iter()
                .map(|part| {
                    materials.push(part.material.flat().map(|material| {
                        FlatMaterialResources::new(device, flat_layout, material)
                    }));
                    let mesh =
                        Mesh::new(device, &part.name, &part.mesh.vertices, &part.mesh.indices);
                    (mesh, part.transform)
                })
                .unzip(),
            NodeKind::Strip { geometry, .. } | NodeKind::Quad(geometry) => {
                let mesh = Mesh::new(device, &node.label, &geometry.vertices, &geometry.indices);
                (vec![mesh], vec![Instance::new()])
            }
        };
        let instances = instance_data(&node.transform, &part_transforms);
        let instance_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Instance Buffer", node.label)),
            contents: bytemuck::cast_slice(&instances),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });
        Self {
            is_surface: node.kind.is_surface(),
            meshes,
            materials,
            part_transforms,
            instance_buffer,
            transform: node.transform,
        }
    }

    fn update(&mut self, queue: &wgpu::Queue, transform: Instance) {
        if transform == self.transform || self.meshes.is_empty() {
            return;
        }
        self.transform = transform;
        let instances = instance_data(&transform, &self.part_transforms);
        queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&instances));
    }

    /// Draw every mesh. `fallback` is bound at group 1 for meshes without a
    /// material of their own; `None` keeps whatever is bound.
    fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>, fallback: Option<&wgpu::BindGroup>) {
        for (idx, mesh) in self.meshes.iter().enumerate() {
            let material = self
                .materials
                .get(idx)
                .and_then(|material| material.as_ref())
                .map(|material| &material.bind_group)
                .or(fallback);
            if let Some(bind_group) = material {
                render_pass.set_bind_group(1, bind_group, &[]);
            }
            let offset = idx as wgpu::BufferAddress * INSTANCE_SIZE;
            render_pass.set_vertex_buffer(
                1,
                self.instance_buffer.slice(offset..offset + INSTANCE_SIZE),
            );
            render_pass.draw_mesh_instanced(mesh, 0..1);
        }
    }
}

fn instance_data(transform: &Instance, parts: &[Instance]) -> Vec<InstanceRaw> {
    parts.iter().map(|part| (transform * part).to_raw()).collect()
}

/// GPU copies of the nodes of one scene graph, uploaded as nodes appear.
#[derive(Default)]
struct SceneMirror {
    nodes: Vec<GpuNode>,
}

impl SceneMirror {
    fn sync(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        flat_layout: &wgpu::BindGroupLayout,
        scene: &SceneGraph,
    ) {
        let synced = self.nodes.len();
        for (_, node) in scene.since(synced) {
            log::debug!("uploading node {}", node.label);
            self.nodes.push(GpuNode::new(device, flat_layout, node));
        }
        for ((_, node), gpu) in scene.iter().zip(self.nodes.iter_mut()).take(synced) {
            gpu.update(queue, node.transform);
        }
    }

    fn models(&self) -> impl Iterator<Item = &GpuNode> {
        self.nodes.iter().filter(|node| !node.is_surface)
    }

    fn surfaces(&self) -> impl Iterator<Item = &GpuNode> {
        self.nodes.iter().filter(|node| node.is_surface)
    }
}

pub struct SketchRenderer {
    offscreen_camera: CameraResources,
    final_camera: CameraResources,
    flat_offscreen: wgpu::RenderPipeline,
    flat_screen: wgpu::RenderPipeline,
    flat_layout: wgpu::BindGroupLayout,
    flat_material: FlatMaterialResources,
    surface_layout: wgpu::BindGroupLayout,
    surface_pipeline: wgpu::RenderPipeline,
    surface_material: SurfaceMaterial,
    target: RenderTarget,
    scene: SceneMirror,
    post_scene: SceneMirror,
}

impl SketchRenderer {
    /// Build pipelines and the off-screen target for `sketch`, drawing to `surface_format`.
    pub fn new<L: ModelLoader, C: FrameClock>(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        sketch: &Sketch<L, C>,
    ) -> Self {
        let camera_layout = camera::mk_bind_group_layout(device);
        let offscreen_camera = CameraResources::new(device, &camera_layout, "Offscreen");
        let final_camera = CameraResources::new(device, &camera_layout, "Final");

        let flat_layout = flat::mk_material_bind_group_layout(device);
        let flat_offscreen = flat::mk_flat_pipeline(
            device,
            Texture::TARGET_COLOR_FORMAT,
            Texture::TARGET_DEPTH_FORMAT,
            &camera_layout,
            &flat_layout,
        );
        let flat_screen = flat::mk_flat_pipeline(
            device,
            surface_format,
            Texture::DEPTH_FORMAT,
            &camera_layout,
            &flat_layout,
        );
        let flat_material = FlatMaterialResources::new(
            device,
            &flat_layout,
            FlatMaterial::from_hex(sketch.config().model_color),
        );

        let target = RenderTarget::new(device, sketch.viewport().size());
        let surface_layout = surface::mk_material_bind_group_layout(device);
        let surface_pipeline = surface::mk_surface_pipeline(
            device,
            surface_format,
            &camera_layout,
            &surface_layout,
            sketch.config().variant.surface_shader(),
        );
        let surface_material =
            SurfaceMaterial::new(device, &surface_layout, *sketch.uniforms(), &target);

        Self {
            offscreen_camera,
            final_camera,
            flat_offscreen,
            flat_screen,
            flat_layout,
            flat_material,
            surface_layout,
            surface_pipeline,
            surface_material,
            target,
            scene: SceneMirror::default(),
            post_scene: SceneMirror::default(),
        }
    }

    pub fn target(&self) -> &RenderTarget {
        &self.target
    }

    /// Follow a viewport change. The off-screen target is only recreated when its size changes.
    pub fn resize(&mut self, device: &wgpu::Device, viewport: Viewport) {
        if self.target.resize(device, viewport.size()) {
            self.surface_material
                .rebind(device, &self.surface_layout, &self.target);
        }
    }

    /// Upload new nodes, changed transforms, cameras and uniforms of `frame`.
    pub fn prepare<L: ModelLoader, C: FrameClock>(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        sketch: &Sketch<L, C>,
        frame: &FrameParams,
    ) {
        self.scene
            .sync(device, queue, &self.flat_layout, sketch.scene());
        self.post_scene
            .sync(device, queue, &self.flat_layout, sketch.post_scene());
        self.offscreen_camera.write(queue, frame.offscreen_view_proj);
        self.final_camera.write(queue, frame.final_view_proj);
        self.surface_material.write(queue, &frame.uniforms);
    }

    /// Record both passes of a frame into `encoder`.
    ///
    /// The off-screen pass draws the models of the main scene into the target.
    /// The final pass clears `view` to `clear_colour` and draws the final scene
    /// of the sketch with the surfaces reading the target.
    pub fn render<L: ModelLoader, C: FrameClock>(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        depth_view: &wgpu::TextureView,
        clear_colour: wgpu::Color,
        sketch: &Sketch<L, C>,
    ) {
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Offscreen Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.target.color.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear_colour),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.target.depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_pipeline(&self.flat_offscreen);
            render_pass.set_bind_group(0, &self.offscreen_camera.bind_group, &[]);
            self.scene.models().for_each(|node| {
                node.draw(&mut render_pass, Some(&self.flat_material.bind_group))
            });
        }

        let mirror = match sketch.config().variant {
            Variant::Lines => &self.scene,
            Variant::Gradient => &self.post_scene,
        };

        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Final Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear_colour),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            occlusion_query_set: None,
            timestamp_writes: None,
        });

        render_pass.set_bind_group(0, &self.final_camera.bind_group, &[]);

        render_pass.set_pipeline(&self.flat_screen);
        mirror.models().for_each(|node| {
            node.draw(&mut render_pass, Some(&self.flat_material.bind_group))
        });

        render_pass.set_pipeline(&self.surface_pipeline);
        render_pass.set_bind_group(1, &self.surface_material.bind_group, &[]);
        mirror.surfaces().for_each(|node| node.draw(&mut render_pass, None));
    }
}
