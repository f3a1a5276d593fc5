//! # Graphics Module
//!
//! Everything that touches the GPU or produces data for it.
//!
//! - **Camera System** ([`camera`]) - Orbit camera with perspective and
//!   orthographic projection
//! - **Geometry** ([`geometry`]) - CPU generation of the primitive meshes
//! - **Rendering Pipeline** ([`rendering`]) - Phong shading of a draw list
//! - **Resource Management** ([`resources`]) - Textures, materials, lights
//!   and the global uniforms
//!
//! The render engine is created by [`DeskSceneApp`](crate::app::DeskSceneApp)
//! once a window exists:
//!
//! ```no_run
//! use deskscene::gfx::RenderEngine;
//!
//! // let engine = pollster::block_on(RenderEngine::new(window, width, height, &config))?;
//! ```

pub mod camera;
pub mod geometry;
pub mod rendering;
pub mod resources;

// Re-export commonly used types
pub use camera::orbit_camera::OrbitCamera;
pub use rendering::render_engine::RenderEngine;
