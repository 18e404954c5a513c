use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("Failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("GPU error: {0}")]
    Gpu(#[from] kroma_gpu::GpuError),

    #[error("Font error: {0}")]
    Font(String),
}
