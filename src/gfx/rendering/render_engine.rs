//! WGPU-based rendering engine for the desk scene
//!
//! Owns the surface, device and every GPU resource the scene needs: the
//! scene pipeline, the global and per-draw uniforms, the primitive meshes and
//! a white fallback texture. Each frame it replays a [`DrawList`] in order.

use std::path::Path;
use std::sync::Arc;
use wgpu::TextureFormat;

use crate::config::AppConfig;
use crate::error::{Result, SceneError};
use crate::gfx::{
    camera::camera_utils::CameraUniform,
    resources::{
        global_bindings::{update_global_ubo, GlobalBindings, GlobalUBO},
        image_data::ImageData,
        lighting::LightingSetup,
        texture_registry::TextureRegistry,
        texture_resource::{texture_bind_group_layout, DepthTexture, SceneTexture, TextureResource},
    },
};
use crate::scene::draw_list::{DrawList, MeshKind};
use crate::scene::manager::TextureLoader;
use crate::wgpu_utils::{
    binding_types, BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc,
    DynamicUniformBuffer,
};

use super::draw_uniform::DrawUniform;
use super::mesh::{DrawMesh, MeshLibrary};
use super::pipeline_manager::{PipelineConfig, PipelineManager};

/// Name of the scene pipeline and its shader
pub const SCENE_PIPELINE: &str = "Scene";
const SCENE_SHADER: &str = "scene";

/// Per-draw slots allocated up front; the buffer doubles when a frame needs more
const INITIAL_DRAW_CAPACITY: usize = 128;

/// Picks the first non-sRGB surface format and the first alpha mode
///
/// Both lists are empty when the adapter cannot present to the surface.
fn select_surface_format(
    formats: &[TextureFormat],
    alpha_modes: &[wgpu::CompositeAlphaMode],
) -> Result<(TextureFormat, wgpu::CompositeAlphaMode)> {
    let format = formats
        .iter()
        .copied()
        .find(|f| !f.is_srgb())
        .or_else(|| formats.first().copied())
        .ok_or(SceneError::UnsupportedSurface)?;
    let alpha_mode = alpha_modes
        .first()
        .copied()
        .ok_or(SceneError::UnsupportedSurface)?;
    Ok((format, alpha_mode))
}

fn present_mode(vsync: bool) -> wgpu::PresentMode {
    if vsync {
        wgpu::PresentMode::AutoVsync
    } else {
        wgpu::PresentMode::AutoNoVsync
    }
}

/// Core rendering engine managing GPU resources and draw calls
///
/// The RenderEngine handles:
/// - Surface and device management
/// - Pipeline creation through the [`PipelineManager`]
/// - Depth buffer handling
/// - Camera, light and per-draw uniform updates
/// - UI overlay rendering
pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    depth_texture: DepthTexture,
    format: TextureFormat,
    pub pipeline_manager: PipelineManager,
    global_ubo: GlobalUBO,
    global_bindings: GlobalBindings,

    // Per-draw uniforms, bound at group 1 with a dynamic offset
    draw_uniforms: DynamicUniformBuffer<DrawUniform>,
    draw_layout: BindGroupLayoutWithDesc,
    draw_bind_group: wgpu::BindGroup,

    // Group 2: scene textures, with a white texture for untextured draws
    texture_layout: BindGroupLayoutWithDesc,
    fallback_texture: SceneTexture,

    meshes: MeshLibrary,
    clear_color: wgpu::Color,
}

impl RenderEngine {
    /// Creates a new render engine for the given window
    ///
    /// Initializes wgpu, creates the depth buffer and uniform buffers and
    /// builds the scene pipeline. Meshes are uploaded separately with
    /// [`load_meshes`](Self::load_meshes).
    ///
    /// # Arguments
    /// * `window` - Window surface target for rendering
    /// * `width` - Initial surface width in pixels
    /// * `height` - Initial surface height in pixels
    /// * `app_config` - Supplies vsync and the clear colour
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
        app_config: &AppConfig,
    ) -> Result<RenderEngine> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        log::info!("Using adapter: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("WGPU Device"),
                required_features: wgpu::Features::default(),
                required_limits: wgpu::Limits {
                    max_texture_dimension_2d: adapter.limits().max_texture_dimension_2d,
                    ..wgpu::Limits::downlevel_defaults()
                },
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;
        let device = Arc::new(device);
        let queue = Arc::new(queue);

        let surface_capabilities = surface.get_capabilities(&adapter);
        let (format, alpha_mode) = select_surface_format(
            &surface_capabilities.formats,
            &surface_capabilities.alpha_modes,
        )?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: present_mode(app_config.vsync),
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_texture =
            DepthTexture::new(&device, &config, "depth_texture");

        // Group 0: camera and lights
        let global_ubo = GlobalUBO::new(&device);
        let mut global_bindings = GlobalBindings::new(&device);
        global_bindings.create_bind_group(&device, &global_ubo);

        // Group 1: one DrawUniform per draw command
        let draw_uniforms = DynamicUniformBuffer::<DrawUniform>::new(&device, INITIAL_DRAW_CAPACITY);
        let draw_layout = BindGroupLayoutBuilder::new()
            .next_binding_rendering(binding_types::uniform_dynamic(
                std::mem::size_of::<DrawUniform>() as u64,
            ))
            .create(&device, "Draw Bind Group Layout");
        let draw_bind_group = Self::create_draw_bind_group(&device, &draw_layout, &draw_uniforms);

        // Group 2: texture + sampler
        let texture_layout = texture_bind_group_layout(&device);
        let fallback_texture = SceneTexture::new(
            &device,
            &texture_layout,
            TextureResource::white(&device, &queue),
            "White Fallback",
        );

        let mut pipeline_manager = PipelineManager::new(device.clone());
        pipeline_manager.register_bind_group_layout("globals", global_bindings.bind_group_layout().clone());
        pipeline_manager.register_bind_group_layout("draw", draw_layout.layout.clone());
        pipeline_manager.register_bind_group_layout("texture", texture_layout.layout.clone());
        pipeline_manager.load_shader(SCENE_SHADER, include_str!("scene.wgsl"));

        let scene_config = PipelineConfig::default_with_shader(SCENE_SHADER)
            .with_label("Scene Pipeline")
            .with_cull_mode(None)
            .with_depth_format(DepthTexture::FORMAT)
            .with_color_format(format, Some(wgpu::BlendState::ALPHA_BLENDING))
            .with_bind_group_layouts(vec![
                global_bindings.bind_group_layout().clone(),
                draw_layout.layout.clone(),
                texture_layout.layout.clone(),
            ]);
        pipeline_manager.register_pipeline(SCENE_PIPELINE, scene_config);
        pipeline_manager.create_all_pipelines()?;

        let [r, g, b, a] = app_config.clear_color;

        Ok(RenderEngine {
            surface,
            device,
            queue,
            config,
            depth_texture,
            format,
            pipeline_manager,
            global_ubo,
            global_bindings,
            draw_uniforms,
            draw_layout,
            draw_bind_group,
            texture_layout,
            fallback_texture,
            meshes: MeshLibrary::new(),
            clear_color: wgpu::Color { r, g, b, a },
        })
    }

    fn create_draw_bind_group(
        device: &wgpu::Device,
        layout: &BindGroupLayoutWithDesc,
        uniforms: &DynamicUniformBuffer<DrawUniform>,
    ) -> wgpu::BindGroup {
        BindGroupBuilder::new(layout)
            .resource(uniforms.binding_resource())
            .create(device, "Draw Bind Group")
    }

    /// Loader that uploads scene textures to this engine's device
    pub fn texture_loader(&self) -> GpuTextureLoader<'_> {
        GpuTextureLoader {
            device: &self.device,
            queue: &self.queue,
            layout: &self.texture_layout,
        }
    }

    /// Uploads the meshes for `kinds`; draws of any other kind are skipped
    pub fn load_meshes(&mut self, kinds: &[MeshKind]) {
        self.meshes.load_all(&self.device, kinds);
        log::info!("{} primitive meshes loaded", self.meshes.len());
    }

    pub fn meshes(&self) -> &MeshLibrary {
        &self.meshes
    }

    /// Updates camera and light uniforms
    ///
    /// Should be called each frame before [`render_frame`](Self::render_frame).
    pub fn update(&mut self, camera_uniform: CameraUniform, lighting: &LightingSetup) {
        update_global_ubo(&mut self.global_ubo, &self.queue, camera_uniform, lighting);
    }

    /// Renders one frame of `draw_list` with an optional UI overlay
    ///
    /// Commands are drawn in list order. A lost or outdated surface is
    /// reconfigured and the frame skipped.
    ///
    /// # Arguments
    /// * `draw_list` - This frame's draw commands
    /// * `textures` - Registry the commands' texture slots index into
    /// * `ui_callback` - Optional function that renders UI elements
    pub fn render_frame<F>(
        &mut self,
        draw_list: &DrawList,
        textures: &TextureRegistry<SceneTexture>,
        ui_callback: Option<F>,
    ) -> Result<()>
    where
        F: FnOnce(&wgpu::Device, &wgpu::Queue, &mut wgpu::CommandEncoder, &wgpu::TextureView),
    {
        let surface_texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::debug!("Surface lost or outdated, reconfiguring");
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        let surface_texture_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let uniforms: Vec<DrawUniform> = draw_list.iter().map(DrawUniform::from).collect();
        if self
            .draw_uniforms
            .write(&self.device, &self.queue, &uniforms)
        {
            self.draw_bind_group =
                Self::create_draw_bind_group(&self.device, &self.draw_layout, &self.draw_uniforms);
        }

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
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

            if let Some(pipeline) = self.pipeline_manager.get_pipeline(SCENE_PIPELINE) {
                render_pass.set_pipeline(pipeline);
                render_pass.set_bind_group(0, self.global_bindings.bind_group(), &[]);

                for (index, command) in draw_list.iter().enumerate() {
                    let Some(mesh) = self.meshes.get_or_warn(command.mesh) else {
                        continue;
                    };

                    let texture = command
                        .texture_slot
                        .and_then(|slot| textures.get(slot))
                        .map(|entry| &entry.handle)
                        .unwrap_or(&self.fallback_texture);

                    render_pass.set_bind_group(
                        1,
                        &self.draw_bind_group,
                        &[self.draw_uniforms.offset(index)],
                    );
                    render_pass.set_bind_group(2, &texture.bind_group, &[]);
                    render_pass.draw_mesh_parts(mesh, command.parts);
                }
            } else {
                log::error!("Scene pipeline unavailable, drawing nothing");
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

    /// Renders `draw_list` without a UI overlay
    pub fn render_frame_simple(
        &mut self,
        draw_list: &DrawList,
        textures: &TextureRegistry<SceneTexture>,
    ) -> Result<()> {
        self.render_frame(
            draw_list,
            textures,
            None::<fn(&wgpu::Device, &wgpu::Queue, &mut wgpu::CommandEncoder, &wgpu::TextureView)>,
        )
    }

    /// Resizes the surface and recreates the depth buffer
    ///
    /// Zero-sized requests (minimized windows) are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);

        self.depth_texture =
            DepthTexture::new(&self.device, &self.config, "depth_texture");
    }

    /// Switches between vsync and immediate presentation
    pub fn set_vsync(&mut self, enable: bool) {
        self.config.present_mode = present_mode(enable);
        self.surface.configure(&self.device, &self.config);
    }

    pub fn vsync(&self) -> bool {
        self.config.present_mode == wgpu::PresentMode::AutoVsync
    }

    /// Returns current surface dimensions as (width, height) in pixels
    pub fn get_surface_size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Returns the surface texture format, for the UI renderer
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.format
    }
}

/// Uploads image files as [`SceneTexture`]s
pub struct GpuTextureLoader<'a> {
    device: &'a wgpu::Device,
    queue: &'a wgpu::Queue,
    layout: &'a BindGroupLayoutWithDesc,
}

impl TextureLoader for GpuTextureLoader<'_> {
    type Handle = SceneTexture;

    fn load(&mut self, path: &Path, tag: &str) -> Result<SceneTexture> {
        let image = ImageData::from_file(path)?;
        image.check_fits(path, self.device.limits().max_texture_dimension_2d)?;
        let texture = SceneTexture::from_image(self.device, self.queue, self.layout, &image, tag);
        log::debug!(
            "Uploaded texture '{}' ({}x{}, {} mip levels)",
            tag,
            texture.width,
            texture.height,
            image.mip_level_count()
        );
        Ok(texture)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_format_prefers_linear() {
        let (format, alpha) = select_surface_format(
            &[TextureFormat::Bgra8UnormSrgb, TextureFormat::Bgra8Unorm],
            &[wgpu::CompositeAlphaMode::Opaque],
        )
        .unwrap();
        assert_eq!(format, TextureFormat::Bgra8Unorm);
        assert_eq!(alpha, wgpu::CompositeAlphaMode::Opaque);

        let (format, _) = select_surface_format(
            &[TextureFormat::Rgba8UnormSrgb],
            &[wgpu::CompositeAlphaMode::Auto],
        )
        .unwrap();
        assert_eq!(format, TextureFormat::Rgba8UnormSrgb);
    }

    #[test]
    fn test_unsupported_surface_is_an_error() {
        let err = select_surface_format(&[], &[wgpu::CompositeAlphaMode::Opaque]).unwrap_err();
        assert!(matches!(err, SceneError::UnsupportedSurface));

        let err = select_surface_format(&[TextureFormat::Bgra8Unorm], &[]).unwrap_err();
        assert!(matches!(err, SceneError::UnsupportedSurface));
    }

    #[test]
    fn test_present_mode_follows_vsync() {
        assert_eq!(present_mode(true), wgpu::PresentMode::AutoVsync);
        assert_eq!(present_mode(false), wgpu::PresentMode::AutoNoVsync);
    }
}
