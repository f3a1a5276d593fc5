//! Desk scene composer
//!
//! Builds a fixed desk scene (water bottle, phone holder, book, monitors,
//! mouse and keyboard) from primitive meshes with textures, materials and
//! Phong lighting, and renders it with wgpu.
//!
//! Scene composition ([`scene`]) is independent of the GPU: it records a
//! [`DrawList`](scene::DrawList) each frame that the
//! [`RenderEngine`](gfx::RenderEngine) replays.

pub mod app;
pub mod config;
pub mod error;
pub mod gfx;
pub mod prelude;
pub mod scene;
pub mod ui;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use app::DeskSceneApp;
pub use config::AppConfig;
pub use error::{Result, SceneError};

/// Runs the desk scene with `config` until its window closes
pub fn run(config: AppConfig) -> anyhow::Result<()> {
    DeskSceneApp::new(config)?.run()
}
