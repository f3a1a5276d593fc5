//! # Scene Composition
//!
//! Everything above the GPU: the sticky shader state, draw commands, model
//! matrices and the desk scene itself. Nothing here touches `wgpu`, so the
//! whole composition runs in tests without a device.

pub mod desk;
pub mod draw_list;
pub mod manager;
pub mod shader_state;
pub mod transform;

pub use draw_list::{CylinderParts, DrawCommand, DrawList, MaterialValues, MeshKind};
pub use manager::{FrameComposer, SceneManager, TextureLoader};
pub use shader_state::ShaderState;
pub use transform::{compose_model_matrix, Transform};
