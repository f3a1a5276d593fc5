// src/gfx/resources/mod.rs
//! GPU resource management
//!
//! Handles textures, materials, lights, and the bind groups they feed.

pub mod global_bindings;
pub mod image_data;
pub mod lighting;
pub mod material;
pub mod texture_registry;
pub mod texture_resource;

// Re-export main types
pub use global_bindings::{update_global_ubo, GlobalBindings, GlobalUBO};
pub use image_data::ImageData;
pub use lighting::{DirectionalLight, LightingSetup, PointLight, SpotLight, MAX_POINT_LIGHTS};
pub use material::{MaterialRegistry, ObjectMaterial};
pub use texture_registry::{TextureRegistry, MAX_TEXTURE_SLOTS};
pub use texture_resource::{DepthTexture, SceneTexture, TextureResource};
