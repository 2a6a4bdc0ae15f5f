//! 2D scene renderer using wgpu.
//!
//! Draws the triangle list produced by [`build_scene`] onto a window
//! surface. The renderer owns no pacing and no event loop: the windowed
//! runner decides when a frame happens and hands over either raw vertices or
//! a [`WorldSnapshot`] to tessellate.

use std::sync::Arc;

use shoal_world::snapshot::WorldSnapshot;
use wgpu::util::DeviceExt;

use crate::scene::{build_scene, SceneVertex, Viewport};

// ---------------------------------------------------------------------------
// Buffer sizing
// ---------------------------------------------------------------------------

/// Maximum number of triangles uploaded per frame. A scene that tessellates
/// to more is truncated at a triangle boundary.
const MAX_TRIANGLES: usize = 16_384;
const MAX_VERTICES: usize = MAX_TRIANGLES * 3;

/// Background water color the surface is cleared to before every frame.
const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.05,
    g: 0.07,
    b: 0.12,
    a: 1.0,
};

/// Vertex buffer layout matching [`SceneVertex`] and the shader inputs.
fn vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<SceneVertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x2,
            },
            wgpu::VertexAttribute {
                offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                shader_location: 1,
                format: wgpu::VertexFormat::Float32x4,
            },
        ],
    }
}

// ---------------------------------------------------------------------------
// SceneRenderer
// ---------------------------------------------------------------------------

/// Owns the wgpu surface, pipeline, and buffers for one window.
///
/// # GPU Initialization
///
/// Call [`SceneRenderer::new`] with an `Arc<winit::window::Window>` and the
/// logical [`Viewport`]. Adapter and device selection are asynchronous; call
/// with `.await` or wrap in `pollster::block_on`. If no suitable GPU is
/// available the error is returned and the caller can bail out cleanly.
pub struct SceneRenderer {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    render_pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    projection_buffer: wgpu::Buffer,
    projection_bind_group: wgpu::BindGroup,
    window: Arc<winit::window::Window>,
    viewport: Viewport,
}

impl SceneRenderer {
    /// Initialize wgpu for `window`: surface, device, queue, pipeline.
    ///
    /// The surface is configured to the viewport's physical size, which the
    /// runner also uses as the window's inner size.
    ///
    /// # Errors
    ///
    /// Returns an error if no suitable GPU adapter or device is available or
    /// the surface cannot be created.
    pub async fn new(
        window: Arc<winit::window::Window>,
        viewport: Viewport,
    ) -> Result<Self, anyhow::Error> {
        let (width, height) = viewport.physical_size();

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("no suitable GPU adapter found"))?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("shoal_scene_renderer"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::default(),
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader_source = include_str!("shaders.wgsl");
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(shader_source.into()),
        });

        // Projection uniform mapping logical coordinates to clip space.
        let projection = viewport.projection_matrix();
        let projection_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("projection_uniform"),
            contents: bytemuck::cast_slice(&projection),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let projection_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("projection_bind_group_layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let projection_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("projection_bind_group"),
            layout: &projection_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: projection_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pipeline_layout"),
            bind_group_layouts: &[&projection_bind_group_layout],
            push_constant_ranges: &[],
        });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("scene_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[vertex_layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        });

        let vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_vertex_buffer"),
            size: (MAX_VERTICES * std::mem::size_of::<SceneVertex>()) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        tracing::debug!(
            format = ?surface_format,
            width,
            height,
            "scene renderer initialized"
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            render_pipeline,
            vertex_buffer,
            projection_buffer,
            projection_bind_group,
            window,
            viewport,
        })
    }

    /// Render one frame from a pre-tessellated triangle list.
    ///
    /// Vertices beyond the triangle budget are dropped; the cut falls on a
    /// triangle boundary, never mid-primitive. The frame is presented to
    /// the surface.
    ///
    /// # Errors
    ///
    /// Returns a [`wgpu::SurfaceError`] if the surface cannot provide an
    /// output texture, for example while the window is minimized or after
    /// the surface is lost.
    pub fn render(&mut self, vertices: &[SceneVertex]) -> Result<(), wgpu::SurfaceError> {
        let projection = self.viewport.projection_matrix();
        self.queue
            .write_buffer(&self.projection_buffer, 0, bytemuck::cast_slice(&projection));

        let uploaded = &vertices[..vertices.len().min(MAX_VERTICES)];
        if !uploaded.is_empty() {
            self.queue
                .write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(uploaded));
        }

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("scene_encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_pipeline(&self.render_pipeline);
            render_pass.set_bind_group(0, &self.projection_bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));

            let vertex_count = uploaded.len() as u32;
            if vertex_count > 0 {
                render_pass.draw(0..vertex_count, 0..1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    /// Tessellate a snapshot and render it in one call.
    ///
    /// Convenience for the windowed runner, which just wants to draw
    /// whatever the scheduler emitted.
    ///
    /// # Errors
    ///
    /// Same surface errors as [`render`](Self::render).
    pub fn render_snapshot(&mut self, snapshot: &WorldSnapshot) -> Result<(), wgpu::SurfaceError> {
        let vertices = build_scene(snapshot, &self.viewport);
        self.render(&vertices)
    }

    /// Reconfigure the surface after a physical size change.
    ///
    /// The logical viewport is fixed for the lifetime of the renderer; this
    /// only tracks physical size, which moves when the window is dragged to
    /// a monitor with a different scale factor.
    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// The logical viewport this renderer projects.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// The window this renderer draws to.
    pub fn window(&self) -> &winit::window::Window {
        &self.window
    }
}
