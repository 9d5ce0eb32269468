mod buffers;
mod context;
mod render;

pub use buffers::{GridBuffers, Palette};
pub use context::GpuContext;
pub use render::RenderPipeline;
