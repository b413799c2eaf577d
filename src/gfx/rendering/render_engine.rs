//! WGPU-based rendering engine
//!
//! Owns the surface, device and pipelines, and renders a [`Scene`] plus an
//! optional UI overlay each frame.

use std::sync::Arc;

use anyhow::Context;
use wgpu::{Device, TextureFormat};

use crate::gfx::{
    camera::camera_utils::CameraUniform,
    resources::{
        global_bindings::GlobalBindings, material::create_material_layout,
        texture_resource::TextureResource,
    },
    scene::{light::Lighting, object::DrawMesh, scene::Scene},
};

use super::pipeline_manager::{PipelineConfig, PipelineManager, VertexLayout};

const STANDARD_PIPELINE: &str = "Standard";
const LINES_PIPELINE: &str = "Lines";

/// Core rendering engine managing GPU resources and draw calls
///
/// The RenderEngine handles all low-level graphics operations including:
/// - Surface and device management
/// - Pipeline creation
/// - Depth buffer handling
/// - Camera and light uniform updates
/// - UI overlay rendering
pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    depth_texture: TextureResource,
    format: TextureFormat,
    pub pipeline_manager: PipelineManager,
    global_bindings: GlobalBindings,
    material_layout: wgpu::BindGroupLayout,
}

impl RenderEngine {
    /// Creates a new render engine for the given window
    ///
    /// # Arguments
    /// * `window` - Window surface target for rendering
    /// * `width` - Initial surface width in pixels
    /// * `height` - Initial surface height in pixels
    /// * `vsync` - Whether presentation waits for vertical blank
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
        vsync: bool,
    ) -> anyhow::Result<RenderEngine> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance
            .create_surface(window)
            .context("failed to create window surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("no compatible graphics adapter")?;
        log::info!("Using adapter: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("WGPU Device"),
                required_features: wgpu::Features::default(),
                required_limits: wgpu::Limits::downlevel_defaults(),
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to request a device")?;

        let surface_capabilities = surface.get_capabilities(&adapter);
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_capabilities.formats.first().copied())
            .context("surface reports no supported formats")?;
        let alpha_mode = surface_capabilities
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: present_mode(vsync),
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_texture =
            TextureResource::create_depth_texture(&device, &config, "depth_texture");

        let global_bindings = GlobalBindings::new(&device);
        let material_layout = create_material_layout(&device);

        // Wrap device and queue in Arc for pipeline manager
        let device_handle: Arc<Device> = device.into();
        let queue_handle: Arc<wgpu::Queue> = queue.into();
        let mut pipeline_manager = PipelineManager::new(device_handle.clone());

        pipeline_manager.load_shader("standard", include_str!("standard.wgsl"));
        pipeline_manager.load_shader("lines", include_str!("lines.wgsl"));

        // No culling: a user matrix with negative determinant flips the winding
        pipeline_manager.register_pipeline(
            STANDARD_PIPELINE,
            PipelineConfig::default_with_shader("standard")
                .with_label("STANDARD")
                .with_cull_mode(None)
                .with_depth_format(TextureResource::DEPTH_FORMAT)
                .with_color_format(format)
                .with_bind_group_layouts(vec![
                    global_bindings.layout().clone(),
                    material_layout.clone(),
                ]),
        );

        pipeline_manager.register_pipeline(
            LINES_PIPELINE,
            PipelineConfig::default_with_shader("lines")
                .with_label("LINES")
                .with_primitive_topology(wgpu::PrimitiveTopology::LineList)
                .with_vertex_layout(VertexLayout::Line)
                .with_cull_mode(None)
                .with_depth_format(TextureResource::DEPTH_FORMAT)
                .with_color_format(format)
                .with_bind_group_layouts(vec![global_bindings.layout().clone()]),
        );

        pipeline_manager
            .create_all_pipelines()
            .context("failed to build render pipelines")?;

        Ok(RenderEngine {
            surface,
            device: device_handle,
            queue: queue_handle,
            config,
            depth_texture,
            format,
            pipeline_manager,
            global_bindings,
            material_layout,
        })
    }

    /// Renders a frame with an optional UI overlay
    ///
    /// The scene must have been synced with [`Scene::sync_gpu_resources`];
    /// meshes without GPU buffers are skipped.
    ///
    /// # Arguments
    /// * `scene` - Scene containing meshes and helpers to render
    /// * `clear_color` - Background colour
    /// * `ui_callback` - Optional function that records the UI pass
    pub fn render_frame<F>(
        &mut self,
        scene: &Scene,
        clear_color: [f32; 3],
        ui_callback: Option<F>,
    ) -> Result<(), wgpu::SurfaceError>
    where
        F: FnOnce(&wgpu::Device, &wgpu::Queue, &mut wgpu::CommandEncoder, &wgpu::TextureView),
    {
        let surface_texture = self.surface.get_current_texture()?;

        let surface_texture_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let [r, g, b] = clear_color;
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: r as f64,
                            g: g as f64,
                            b: b as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_bind_group(0, self.global_bindings.bind_group(), &[]);

            match self.pipeline_manager.get_pipeline(STANDARD_PIPELINE) {
                Ok(pipeline) => {
                    render_pass.set_pipeline(pipeline);
                    for object in scene.meshes().filter(|object| object.visible) {
                        let Some(mesh) = object.gpu_mesh() else {
                            continue;
                        };
                        let material = scene
                            .get_material_for_object(object)
                            .and_then(|material| material.get_bind_group());
                        match material {
                            Some(material_bind_group) => {
                                render_pass.set_bind_group(1, material_bind_group, &[]);
                                render_pass.draw_gpu_mesh(mesh);
                            }
                            None => log::trace!(
                                "Skipping '{}' - material '{}' has no GPU resources",
                                object.name,
                                object.material_id()
                            ),
                        }
                    }
                }
                Err(err) => log::error!("{err}"),
            }

            match self.pipeline_manager.get_pipeline(LINES_PIPELINE) {
                Ok(pipeline) => {
                    render_pass.set_pipeline(pipeline);
                    for helper in scene.helpers().iter().filter(|helper| helper.visible) {
                        if let Some(mesh) = helper.gpu_mesh() {
                            render_pass.draw_gpu_mesh(mesh);
                        }
                    }
                }
                Err(err) => log::error!("{err}"),
            }
        }

        if let Some(ui_callback) = ui_callback {
            ui_callback(
                &self.device,
                &self.queue,
                &mut encoder,
                &surface_texture_view,
            );
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
        Ok(())
    }

    /// Uploads camera and light uniforms for the next frame
    pub fn update(&mut self, camera_uniform: CameraUniform, lighting: &Lighting) {
        self.global_bindings
            .update(&self.queue, camera_uniform, lighting);
    }

    /// Resizes the surface and recreates the depth buffer
    ///
    /// Zero-sized requests (minimised windows) are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.depth_texture =
            TextureResource::create_depth_texture(&self.device, &self.config, "depth_texture");
    }

    /// Reconfigures the surface at its current size, after it was lost
    pub fn reconfigure(&mut self) {
        self.resize(self.config.width, self.config.height);
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Used for creating compatible render targets and UI systems
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.format
    }

    /// Layout every material bind group is created against
    pub fn material_layout(&self) -> &wgpu::BindGroupLayout {
        &self.material_layout
    }
}

fn present_mode(vsync: bool) -> wgpu::PresentMode {
    if vsync {
        wgpu::PresentMode::AutoVsync
    } else {
        wgpu::PresentMode::AutoNoVsync
    }
}
