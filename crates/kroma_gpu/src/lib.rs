//! kroma_gpu - wgpu plumbing for the kroma widget layer.
//!
//! Owns the device/surface context, the two render pipelines (solid-color
//! shapes and textured quads), and RGBA8 texture upload.

pub mod config;
pub mod context;
pub mod error;
pub mod pipeline;
pub mod texture;

pub use config::{GpuConfig, TextureConfig};
pub use context::GpuContext;
pub use error::{GpuError, Result};
pub use pipeline::{QuadPipeline, QuadVertex, ShapeMesh, ShapePipeline, ShapeVertex};
pub use texture::Texture;
