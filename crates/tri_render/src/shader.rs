//! Shader program builder.
//!
//! Loads a vertex and a fragment WGSL source from one directory, compiles each
//! into a shader module, and links both into a render pipeline. Compile and
//! link diagnostics are logged and turned into an `Err`; a half-built program
//! is never returned.

use std::fs;
use std::path::{Path, PathBuf};

use crate::gpu_context::DEPTH_FORMAT;
use crate::vertex::vertex_layout;

/// Where to find the two stages.
#[derive(Debug, Clone)]
pub struct ShaderSources {
    pub dir: PathBuf,
    pub vertex_file: String,
    pub fragment_file: String,
}

impl ShaderSources {
    pub fn vertex_path(&self) -> PathBuf {
        self.dir.join(&self.vertex_file)
    }

    pub fn fragment_path(&self) -> PathBuf {
        self.dir.join(&self.fragment_file)
    }
}

pub fn load_shader_source(dir: &Path, file_name: &str) -> Result<String, String> {
    let path = dir.join(file_name);
    log::info!("{}\tloading", path.display());
    let text = fs::read_to_string(&path)
        .map_err(|e| format!("Failed to read shader file {}: {e}", path.display()))?;
    if text.trim().is_empty() {
        return Err(format!("Shader file {} is empty", path.display()));
    }
    Ok(text)
}

/// Linked vertex + fragment program. GPU objects are released on drop.
pub struct ShaderProgram {
    pub render_pipeline: wgpu::RenderPipeline,
}

impl ShaderProgram {
    pub fn build(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        sources: &ShaderSources,
    ) -> Result<Self, String> {
        let vertex_text = load_shader_source(&sources.dir, &sources.vertex_file)?;
        let fragment_text = load_shader_source(&sources.dir, &sources.fragment_file)?;

        let vertex_module = compile_stage(device, &sources.vertex_file, &vertex_text)?;
        let fragment_module = compile_stage(device, &sources.fragment_file, &fragment_text)?;

        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Triangle Pipeline Layout"),
            bind_group_layouts: &[],
            push_constant_ranges: &[],
        });
        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Triangle Pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &vertex_module,
                entry_point: None,
                compilation_options: Default::default(),
                buffers: &[vertex_layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &fragment_module,
                entry_point: None,
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });
        if let Some(err) = pollster::block_on(device.pop_error_scope()) {
            log::error!(
                "Error linking program ({} + {}):\n{err}",
                sources.vertex_file,
                sources.fragment_file
            );
            return Err(format!("failed to link shader program: {err}"));
        }

        log::info!(
            "Shader program linked: {} + {}",
            sources.vertex_file,
            sources.fragment_file
        );
        Ok(Self { render_pipeline })
    }
}

fn compile_stage(
    device: &wgpu::Device,
    label: &str,
    source: &str,
) -> Result<wgpu::ShaderModule, String> {
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });
    if let Some(err) = pollster::block_on(device.pop_error_scope()) {
        log::error!("Error compiling shader {label}:\n{err}");
        return Err(format!("failed to compile shader {label}: {err}"));
    }
    Ok(module)
}
