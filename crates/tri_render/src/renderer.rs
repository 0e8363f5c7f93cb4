//! Per-frame triangle upload and presentation.
//!
//! Triangles submitted through [`FrameBackend::draw_triangle`] are batched on
//! the CPU and streamed into one vertex buffer at `present`. The buffer grows
//! (power-of-two) but never shrinks.
//!
//! Field order is drop order: the program goes first and the GPU context last.

use tri_core::{FrameBackend, Triangle, Vertex};

use crate::gpu_context::GpuContext;
use crate::shader::ShaderProgram;

const VERTICES_PER_TRIANGLE: usize = 3;

pub struct Renderer {
    program: ShaderProgram,
    vertex_buffer: wgpu::Buffer,
    vertex_capacity: usize,
    depth_view: wgpu::TextureView,
    pending: Vec<Triangle>,
    clear_color: wgpu::Color,
    gpu: GpuContext,
}

impl Renderer {
    pub fn new(gpu: GpuContext, program: ShaderProgram, clear_color: [f64; 4]) -> Self {
        let vertex_capacity = 2 * VERTICES_PER_TRIANGLE;
        let vertex_buffer = create_vertex_buffer(&gpu.device, vertex_capacity);
        let depth_view = gpu.create_depth_view();
        Self {
            program,
            vertex_buffer,
            vertex_capacity,
            depth_view,
            pending: Vec::new(),
            clear_color: wgpu::Color {
                r: clear_color[0],
                g: clear_color[1],
                b: clear_color[2],
                a: clear_color[3],
            },
            gpu,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.gpu.resize(width, height);
        self.depth_view = self.gpu.create_depth_view();
        log::info!("Resized to {}x{}", width, height);
    }

    fn ensure_vertex_capacity(&mut self, vertex_count: usize) {
        if vertex_count > self.vertex_capacity {
            self.vertex_capacity = vertex_count.next_power_of_two();
            self.vertex_buffer = create_vertex_buffer(&self.gpu.device, self.vertex_capacity);
        }
    }

    fn render_pending(&mut self) {
        let vertex_count = self.pending.len() * VERTICES_PER_TRIANGLE;
        self.ensure_vertex_capacity(vertex_count);
        if vertex_count > 0 {
            self.gpu.queue.write_buffer(
                &self.vertex_buffer,
                0,
                bytemuck::cast_slice(&self.pending),
            );
        }

        let Some((output, view)) = self.gpu.begin_frame() else {
            return;
        };

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Triangle Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            if vertex_count > 0 {
                render_pass.set_pipeline(&self.program.render_pipeline);
                render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
                render_pass.draw(0..vertex_count as u32, 0..1);
            }
        }

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();
    }
}

impl FrameBackend for Renderer {
    fn draw_triangle(&mut self, triangle: &Triangle) {
        self.pending.push(*triangle);
    }

    fn present(&mut self) {
        self.render_pending();
        self.pending.clear();
    }
}

fn create_vertex_buffer(device: &wgpu::Device, vertex_capacity: usize) -> wgpu::Buffer {
    let byte_len = (vertex_capacity * std::mem::size_of::<Vertex>()).max(1) as u64;
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Triangle Vertex Buffer"),
        size: byte_len,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}
