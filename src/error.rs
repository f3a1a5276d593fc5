//! Error types for the scene composer and its GPU backend

use std::path::PathBuf;

/// Errors raised while preparing or rendering the desk scene
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    /// The image file could not be opened or decoded
    #[error("could not load image {path}: {source}")]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Only RGB and RGBA sources are uploaded
    #[error("not implemented to handle image {path} with {channels} channels")]
    UnsupportedChannels { path: PathBuf, channels: u8 },

    /// The device cannot hold a texture this large
    #[error("image {path} is {width}x{height}, larger than the device limit of {max_dimension}")]
    TextureTooLarge {
        path: PathBuf,
        width: u32,
        height: u32,
        max_dimension: u32,
    },

    /// All texture slots are taken
    #[error("texture registry is full ({capacity} slots), cannot register '{tag}'")]
    RegistryFull { tag: String, capacity: usize },

    #[error("pipeline '{pipeline}' uses shader '{shader}', which is not loaded")]
    MissingShader { pipeline: String, shader: String },

    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("surface is not supported by the adapter (no formats or alpha modes)")]
    UnsupportedSurface,

    #[error("failed to acquire surface texture: {0}")]
    SurfaceTexture(#[from] wgpu::SurfaceError),

    #[error("no suitable graphics adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to request device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
}

pub type Result<T> = std::result::Result<T, SceneError>;
