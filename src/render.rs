use crate::constants::{FOV_Y_DEG, VIDEO_TEX_HEIGHT, VIDEO_TEX_WIDTH, Z_FAR, Z_NEAR};
use crate::core::{DirtySet, ParamId, ParameterSet, ViewOrientation};
use glam::Mat4;
use web_sys as web;

mod helpers;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct PanoramaUniforms {
    view_proj_inverse: [[f32; 4]; 4],
    sphere_inverse: [[f32; 4]; 4],
    resolution: [f32; 2],
    time: f32,
    saturation: f32,
    multiply: f32,
    camera_multiply: f32,
    camera_add: f32,
    wave_amplitude: f32,
    wave_frequency: f32,
    has_video: f32,
    _pad: [f32; 2],
}

impl PanoramaUniforms {
    fn slot(&mut self, id: ParamId) -> Option<&mut f32> {
        match id {
            ParamId::Time => Some(&mut self.time),
            ParamId::Saturation => Some(&mut self.saturation),
            ParamId::Multiply => Some(&mut self.multiply),
            ParamId::CameraMultiply => Some(&mut self.camera_multiply),
            ParamId::CameraAdd => Some(&mut self.camera_add),
            ParamId::WaveAmplitude => Some(&mut self.wave_amplitude),
            ParamId::WaveFrequency => Some(&mut self.wave_frequency),
            _ => None,
        }
    }
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    video_tex: wgpu::Texture,
    uniforms: PanoramaUniforms,
    uniforms_dirty: bool,
    width: u32,
    height: u32,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .unwrap_or(caps.formats[0]);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("panorama_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::core::PANORAMA_WGSL.into()),
        });
        let bgl = helpers::panorama_bind_group_layout(&device);
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("panorama_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });
        let pipeline = helpers::make_panorama_pipeline(&device, &layout, &shader, format);

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("panorama_uniforms"),
            size: std::mem::size_of::<PanoramaUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let (video_tex, video_view) =
            helpers::create_video_texture(&device, VIDEO_TEX_WIDTH, VIDEO_TEX_HEIGHT);
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("video_sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("panorama_bg"),
            layout: &bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&video_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        let mut uniforms = PanoramaUniforms::zeroed_with_identity();
        uniforms.resolution = [width as f32, height as f32];

        log::info!("[gpu] surface {}x{} {:?}", width, height, format);
        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            uniform_buffer,
            bind_group,
            video_tex,
            uniforms,
            uniforms_dirty: true,
            width,
            height,
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.uniforms.resolution = [width as f32, height as f32];
            self.uniforms_dirty = true;
        }
    }

    /// Copy the dirty shader parameters into the uniform block.
    pub fn apply_params(&mut self, params: &ParameterSet, dirty: &DirtySet) {
        if !dirty.any_uniform() {
            return;
        }
        for id in dirty.iter() {
            if let Some(slot) = self.uniforms.slot(id) {
                *slot = params.get(id);
                self.uniforms_dirty = true;
            }
        }
    }

    pub fn set_view(&mut self, view: &ViewOrientation) {
        let aspect = self.width as f32 / self.height.max(1) as f32;
        let proj = Mat4::perspective_rh(FOV_Y_DEG.to_radians(), aspect, Z_NEAR, Z_FAR);
        // Camera sits at the origin, so the view matrix is just the inverse rotation.
        let view_m = Mat4::from_quat(view.camera.conjugate());
        let vpi = (proj * view_m).inverse().to_cols_array_2d();
        let sphere = Mat4::from_quat(view.sphere.conjugate()).to_cols_array_2d();
        if vpi != self.uniforms.view_proj_inverse || sphere != self.uniforms.sphere_inverse {
            self.uniforms.view_proj_inverse = vpi;
            self.uniforms.sphere_inverse = sphere;
            self.uniforms_dirty = true;
        }
    }

    pub fn upload_video(&mut self, rgba: &[u8], width: u32, height: u32) {
        if width != VIDEO_TEX_WIDTH || height != VIDEO_TEX_HEIGHT {
            log::warn!("[gpu] video frame {}x{} does not match texture", width, height);
            return;
        }
        self.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &self.video_tex,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );
        if self.uniforms.has_video == 0.0 {
            self.uniforms.has_video = 1.0;
            self.uniforms_dirty = true;
        }
    }

    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        if self.uniforms_dirty {
            self.queue
                .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&self.uniforms));
            self.uniforms_dirty = false;
        }
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("panorama_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.pipeline);
            rpass.set_bind_group(0, &self.bind_group, &[]);
            rpass.draw(0..3, 0..1);
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

impl PanoramaUniforms {
    fn zeroed_with_identity() -> Self {
        let identity = Mat4::IDENTITY.to_cols_array_2d();
        Self {
            view_proj_inverse: identity,
            sphere_inverse: identity,
            ..bytemuck::Zeroable::zeroed()
        }
    }
}
