//! # Desk Scene Prelude
//!
//! Commonly used types in one import:
//!
//! ```no_run
//! use deskscene::prelude::*;
//!
//! let config = AppConfig::from_env().with_vsync(false);
//! DeskSceneApp::new(config)?.run()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

// Application
pub use crate::app::DeskSceneApp;
pub use crate::config::AppConfig;
pub use crate::error::{Result, SceneError};

// Scene composition
pub use crate::scene::{
    CylinderParts, DrawCommand, DrawList, FrameComposer, MeshKind, SceneManager, ShaderState,
    TextureLoader,
};

// Resources
pub use crate::gfx::resources::{
    LightingSetup, MaterialRegistry, ObjectMaterial, SceneTexture, TextureRegistry,
};

// Rendering and viewing
pub use crate::gfx::camera::{CameraManager, OrbitCamera, ProjectionMode};
pub use crate::gfx::rendering::RenderEngine;
