pub mod gpu_context;
pub mod renderer;
pub mod shader;
pub mod vertex;

pub use gpu_context::GpuContext;
pub use renderer::Renderer;
pub use shader::{ShaderProgram, ShaderSources};
