use tri_core::Vertex;

pub const POSITION_LOCATION: u32 = 0;
pub const COLOR_LOCATION: u32 = 1;

pub fn vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            // position
            wgpu::VertexAttribute {
                offset: std::mem::offset_of!(Vertex, position) as wgpu::BufferAddress,
                shader_location: POSITION_LOCATION,
                format: wgpu::VertexFormat::Float32x3,
            },
            // color
            wgpu::VertexAttribute {
                offset: std::mem::offset_of!(Vertex, color) as wgpu::BufferAddress,
                shader_location: COLOR_LOCATION,
                format: wgpu::VertexFormat::Float32x3,
            },
        ],
    }
}
