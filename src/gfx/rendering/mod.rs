//! Core rendering functionality
//!
//! Handles the scene pipeline, primitive meshes, per-draw uniforms and frame
//! rendering.

pub mod draw_uniform;
pub mod mesh;
pub mod pipeline_manager;
pub mod render_engine;
pub mod vertex;

// Re-export main types
pub use draw_uniform::DrawUniform;
pub use mesh::{DrawMesh, GpuMesh, MeshLibrary};
pub use pipeline_manager::{PipelineConfig, PipelineManager, PipelineStats};
pub use render_engine::{GpuTextureLoader, RenderEngine};
pub use vertex::Vertex3D;
