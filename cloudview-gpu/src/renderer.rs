use crate::device::GpuContext;
use crate::shaders::{LINE_SHADER, POINT_SHADER};
use cloudview_core::{BufferHandle, ColoredVertex, Error, GraphicsBackend, Result, Rgba, FLOATS_PER_VERTEX};
use bytemuck::{Pod, Zeroable};
use nalgebra::Matrix4;
use std::collections::HashMap;
use std::sync::Arc;
use winit::window::Window;

/// Maps OpenGL clip-space depth `[-1, 1]` onto wgpu's `[0, 1]`
#[rustfmt::skip]
pub fn opengl_to_wgpu_matrix() -> Matrix4<f32> {
    Matrix4::new(
        1.0, 0.0, 0.0, 0.0,
        0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 0.5, 0.5,
        0.0, 0.0, 0.0, 1.0,
    )
}

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Vertex buffer layout of one interleaved `x y z r g b a` vertex
pub fn vertex_layout<'a>(step_mode: wgpu::VertexStepMode) -> wgpu::VertexBufferLayout<'a> {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] = [
        // Position
        wgpu::VertexAttribute {
            offset: 0,
            shader_location: 0,
            format: wgpu::VertexFormat::Float32x3,
        },
        // Color
        wgpu::VertexAttribute {
            offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
            shader_location: 1,
            format: wgpu::VertexFormat::Float32x4,
        },
    ];

    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<ColoredVertex>() as wgpu::BufferAddress,
        step_mode,
        attributes: &ATTRIBUTES,
    }
}

/// Per-draw uniform data
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct DrawUniform {
    pub mvp: [[f32; 4]; 4],
    pub viewport: [f32; 2],
    pub point_size: f32,
    pub _padding: f32,
}

/// Rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub enable_depth_test: bool,
    pub enable_alpha_blending: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            enable_depth_test: false,
            enable_alpha_blending: true,
        }
    }
}

struct GpuBuffer {
    buffer: wgpu::Buffer,
    vertex_count: u32,
}

enum DrawCommand {
    Points { handle: BufferHandle, count: u32, uniform: usize },
    Lines { vertices: Vec<ColoredVertex>, uniform: usize },
}

/// [`GraphicsBackend`] drawing into a window surface with wgpu.
///
/// Draw calls are recorded between `begin_frame` and `end_frame` and encoded
/// into a single render pass when the frame ends.
pub struct WgpuBackend {
    pub gpu_context: GpuContext,
    pub surface: wgpu::Surface<'static>,
    pub surface_config: wgpu::SurfaceConfiguration,
    pub config: RenderConfig,
    point_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    uniform_layout: wgpu::BindGroupLayout,
    uniform_stride: u64,
    depth_view: Option<wgpu::TextureView>,
    buffers: HashMap<BufferHandle, GpuBuffer>,
    next_handle: u64,
    bound: Option<BufferHandle>,
    projection: Matrix4<f32>,
    model_view: Matrix4<f32>,
    clear_color: Rgba,
    commands: Vec<DrawCommand>,
    uniforms: Vec<DrawUniform>,
    in_frame: bool,
    redraw_needed: bool,
}

impl WgpuBackend {
    /// Create a backend presenting to `window`
    pub async fn new(window: Arc<Window>, config: RenderConfig) -> Result<Self> {
        let size = window.inner_size();
        let (gpu_context, surface) = GpuContext::for_window(window).await?;

        let surface_caps = surface.get_capabilities(&gpu_context.adapter);
        // Colours are authored as final display values, so avoid an sRGB target
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or_else(|| Error::Gpu("Surface reports no supported formats".to_string()))?;

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&gpu_context.device, &surface_config);

        let uniform_layout = gpu_context.create_bind_group_layout(
            "draw_uniform_layout",
            &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: wgpu::BufferSize::new(std::mem::size_of::<DrawUniform>() as u64),
                },
                count: None,
            }],
        );

        let alignment = gpu_context.device.limits().min_uniform_buffer_offset_alignment as u64;
        let uniform_stride = (std::mem::size_of::<DrawUniform>() as u64).div_ceil(alignment) * alignment;

        let point_pipeline = Self::create_pipeline(
            &gpu_context,
            &config,
            &uniform_layout,
            surface_format,
            "Point Pipeline",
            POINT_SHADER,
            wgpu::VertexStepMode::Instance,
            wgpu::PrimitiveTopology::TriangleList,
        );
        let line_pipeline = Self::create_pipeline(
            &gpu_context,
            &config,
            &uniform_layout,
            surface_format,
            "Line Pipeline",
            LINE_SHADER,
            wgpu::VertexStepMode::Vertex,
            wgpu::PrimitiveTopology::LineList,
        );

        let mut backend = Self {
            gpu_context,
            surface,
            surface_config,
            config,
            point_pipeline,
            line_pipeline,
            uniform_layout,
            uniform_stride,
            depth_view: None,
            buffers: HashMap::new(),
            next_handle: 1,
            bound: None,
            projection: Matrix4::identity(),
            model_view: Matrix4::identity(),
            clear_color: [0.0, 0.0, 0.0, 1.0],
            commands: Vec::new(),
            uniforms: Vec::new(),
            in_frame: false,
            redraw_needed: false,
        };
        backend.recreate_depth_texture();
        Ok(backend)
    }

    #[allow(clippy::too_many_arguments)]
    fn create_pipeline(
        gpu_context: &GpuContext,
        config: &RenderConfig,
        uniform_layout: &wgpu::BindGroupLayout,
        format: wgpu::TextureFormat,
        label: &str,
        source: &str,
        step_mode: wgpu::VertexStepMode,
        topology: wgpu::PrimitiveTopology,
    ) -> wgpu::RenderPipeline {
        let shader = gpu_context.create_shader_module(label, source);

        let layout = gpu_context.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(label),
            bind_group_layouts: &[uniform_layout],
            push_constant_ranges: &[],
        });

        gpu_context.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_main",
                buffers: &[vertex_layout(step_mode)],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: if config.enable_alpha_blending {
                        Some(wgpu::BlendState::ALPHA_BLENDING)
                    } else {
                        Some(wgpu::BlendState::REPLACE)
                    },
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: config.enable_depth_test.then(|| wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
        })
    }

    /// Whether the last frame was dropped and should be drawn again
    pub fn take_redraw_needed(&mut self) -> bool {
        std::mem::take(&mut self.redraw_needed)
    }

    fn recreate_depth_texture(&mut self) {
        if !self.config.enable_depth_test {
            return;
        }
        let texture = self.gpu_context.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width: self.surface_config.width,
                height: self.surface_config.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        self.depth_view = Some(texture.create_view(&wgpu::TextureViewDescriptor::default()));
    }

    fn reconfigure(&mut self) {
        self.surface.configure(&self.gpu_context.device, &self.surface_config);
        self.recreate_depth_texture();
    }

    fn push_uniform(&mut self, point_size: f32) -> usize {
        let mvp = opengl_to_wgpu_matrix() * self.projection * self.model_view;
        self.uniforms.push(DrawUniform {
            mvp: mvp.into(),
            viewport: [self.surface_config.width as f32, self.surface_config.height as f32],
            point_size,
            _padding: 0.0,
        });
        self.uniforms.len() - 1
    }

    fn uniform_bytes(&self) -> Vec<u8> {
        let stride = self.uniform_stride as usize;
        let mut bytes = vec![0u8; stride * self.uniforms.len()];
        for (i, uniform) in self.uniforms.iter().enumerate() {
            let start = i * stride;
            let data = bytemuck::bytes_of(uniform);
            bytes[start..start + data.len()].copy_from_slice(data);
        }
        bytes
    }

    fn acquire_frame(&mut self) -> Result<Option<wgpu::SurfaceTexture>> {
        match self.surface.get_current_texture() {
            Ok(frame) => Ok(Some(frame)),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("surface lost, reconfiguring");
                self.reconfigure();
                self.redraw_needed = true;
                Ok(None)
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("surface timeout");
                self.redraw_needed = true;
                Ok(None)
            }
            Err(e) => Err(Error::Gpu(format!("Failed to acquire frame: {}", e))),
        }
    }

    fn submit(&mut self) -> Result<()> {
        let Some(output) = self.acquire_frame()? else {
            return Ok(());
        };
        let view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());

        let uniform_bind_group = if self.uniforms.is_empty() {
            None
        } else {
            let uniform_buffer = self.gpu_context.create_buffer_init(
                "Draw Uniform Buffer",
                &self.uniform_bytes(),
                wgpu::BufferUsages::UNIFORM,
            );
            Some(self.gpu_context.create_bind_group(
                "draw_uniform_bind_group",
                &self.uniform_layout,
                &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                        buffer: &uniform_buffer,
                        offset: 0,
                        size: wgpu::BufferSize::new(std::mem::size_of::<DrawUniform>() as u64),
                    }),
                }],
            ))
        };

        let line_buffers: Vec<Option<wgpu::Buffer>> = self
            .commands
            .iter()
            .map(|command| match command {
                DrawCommand::Lines { vertices, .. } if !vertices.is_empty() => Some(
                    self.gpu_context
                        .create_buffer_init("Line Vertex Buffer", vertices, wgpu::BufferUsages::VERTEX),
                ),
                _ => None,
            })
            .collect();

        let mut encoder = self.gpu_context.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Frame Encoder"),
        });

        {
            let [r, g, b, a] = self.clear_color;
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Frame Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: r as f64,
                            g: g as f64,
                            b: b as f64,
                            a: a as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: self.depth_view.as_ref().map(|depth_view| {
                    wgpu::RenderPassDepthStencilAttachment {
                        view: depth_view,
                        depth_ops: Some(wgpu::Operations {
                            load: wgpu::LoadOp::Clear(1.0),
                            store: wgpu::StoreOp::Store,
                        }),
                        stencil_ops: None,
                    }
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if let Some(bind_group) = &uniform_bind_group {
                for (command, line_buffer) in self.commands.iter().zip(&line_buffers) {
                    match command {
                        DrawCommand::Points { handle, count, uniform } => {
                            let Some(gpu_buffer) = self.buffers.get(handle) else {
                                log::warn!("skipping draw of released buffer {:?}", handle);
                                continue;
                            };
                            let offset = (*uniform as u64 * self.uniform_stride) as u32;
                            render_pass.set_pipeline(&self.point_pipeline);
                            render_pass.set_bind_group(0, bind_group, &[offset]);
                            render_pass.set_vertex_buffer(0, gpu_buffer.buffer.slice(..));
                            render_pass.draw(0..6, 0..(*count).min(gpu_buffer.vertex_count));
                        }
                        DrawCommand::Lines { vertices, uniform } => {
                            let Some(buffer) = line_buffer else { continue };
                            let offset = (*uniform as u64 * self.uniform_stride) as u32;
                            render_pass.set_pipeline(&self.line_pipeline);
                            render_pass.set_bind_group(0, bind_group, &[offset]);
                            render_pass.set_vertex_buffer(0, buffer.slice(..));
                            render_pass.draw(0..vertices.len() as u32, 0..1);
                        }
                    }
                }
            }
        }

        self.gpu_context.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}

impl GraphicsBackend for WgpuBackend {
    fn create_vertex_buffer(&mut self, data: &[f32]) -> Result<BufferHandle> {
        if data.is_empty() || data.len() % FLOATS_PER_VERTEX != 0 {
            return Err(Error::Gpu(format!(
                "vertex data must be a non-empty multiple of {} floats, got {}",
                FLOATS_PER_VERTEX,
                data.len()
            )));
        }

        let buffer = self
            .gpu_context
            .try_create_buffer_init("Point Cloud Vertex Buffer", data, wgpu::BufferUsages::VERTEX)?;
        let handle = BufferHandle(self.next_handle);
        self.next_handle += 1;
        self.buffers.insert(
            handle,
            GpuBuffer {
                buffer,
                vertex_count: (data.len() / FLOATS_PER_VERTEX) as u32,
            },
        );
        log::debug!("created vertex buffer {:?} ({} floats)", handle, data.len());
        Ok(handle)
    }

    fn release_vertex_buffer(&mut self, handle: BufferHandle) {
        if self.bound == Some(handle) {
            self.bound = None;
        }
        if let Some(gpu_buffer) = self.buffers.remove(&handle) {
            gpu_buffer.buffer.destroy();
            log::debug!("released vertex buffer {:?}", handle);
        }
    }

    fn set_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.surface_config.width = width;
            self.surface_config.height = height;
            self.reconfigure();
        }
    }

    fn set_projection(&mut self, projection: &Matrix4<f32>) {
        self.projection = *projection;
    }

    fn begin_frame(&mut self, clear_color: Rgba) -> Result<()> {
        if self.in_frame {
            return Err(Error::Visualization("begin_frame called inside a frame".to_string()));
        }
        self.in_frame = true;
        self.clear_color = clear_color;
        self.commands.clear();
        self.uniforms.clear();
        Ok(())
    }

    fn set_model_view(&mut self, model_view: &Matrix4<f32>) {
        self.model_view = *model_view;
    }

    fn bind_vertex_buffer(&mut self, handle: BufferHandle) -> Result<()> {
        if !self.buffers.contains_key(&handle) {
            return Err(Error::Gpu(format!("unknown vertex buffer {:?}", handle)));
        }
        self.bound = Some(handle);
        Ok(())
    }

    fn draw_points(&mut self, count: usize, point_size: f32) {
        let Some(handle) = self.bound else {
            log::warn!("draw_points without a bound buffer");
            return;
        };
        if count == 0 {
            return;
        }
        let uniform = self.push_uniform(point_size);
        self.commands.push(DrawCommand::Points {
            handle,
            count: count as u32,
            uniform,
        });
    }

    fn unbind_vertex_buffer(&mut self) {
        self.bound = None;
    }

    fn draw_lines(&mut self, vertices: &[ColoredVertex]) {
        let uniform = self.push_uniform(1.0);
        self.commands.push(DrawCommand::Lines {
            vertices: vertices.to_vec(),
            uniform,
        });
    }

    fn end_frame(&mut self) -> Result<()> {
        if !self.in_frame {
            return Err(Error::Visualization("end_frame called outside a frame".to_string()));
        }
        self.in_frame = false;
        self.submit()
    }
}
