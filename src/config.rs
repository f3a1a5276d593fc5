//! Application configuration
//!
//! [`AppConfig`] carries everything the window, renderer and scene need at
//! startup. It follows the same builder style as the pipeline configuration:
//! start from [`AppConfig::default`] and override fields with `with_*` calls.

use std::path::{Path, PathBuf};

/// Environment variable that overrides the texture directory
pub const TEXTURE_DIR_ENV: &str = "DESKSCENE_TEXTURES";

/// Startup configuration for [`DeskSceneApp`](crate::app::DeskSceneApp)
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Directory the scene textures are loaded from
    pub texture_dir: PathBuf,
    pub vsync: bool,
    pub clear_color: [f64; 4],
    /// Show the inspector overlay
    pub show_ui: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Desk Scene".to_string(),
            width: 1280,
            height: 800,
            texture_dir: PathBuf::from("textures"),
            vsync: true,
            clear_color: [0.0, 0.0, 0.0, 1.0],
            show_ui: true,
        }
    }
}

impl AppConfig {
    /// Default configuration with the texture directory taken from
    /// `DESKSCENE_TEXTURES` when it is set
    pub fn from_env() -> Self {
        let config = Self::default();
        match std::env::var_os(TEXTURE_DIR_ENV) {
            Some(dir) if !dir.is_empty() => config.with_texture_dir(dir),
            _ => config,
        }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_owned();
        self
    }

    /// Sets the initial window size; zero dimensions are raised to one pixel
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width.max(1);
        self.height = height.max(1);
        self
    }

    pub fn with_texture_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.texture_dir = dir.as_ref().to_path_buf();
        self
    }

    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }

    pub fn with_clear_color(mut self, r: f64, g: f64, b: f64, a: f64) -> Self {
        self.clear_color = [r, g, b, a];
        self
    }

    pub fn with_ui(mut self, show_ui: bool) -> Self {
        self.show_ui = show_ui;
        self
    }

    /// Width over height of the initial window
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.texture_dir, PathBuf::from("textures"));
        assert!(config.vsync);
        assert!(config.show_ui);
        assert_eq!((config.width, config.height), (1280, 800));
    }

    #[test]
    fn test_builder_overrides() {
        let config = AppConfig::default()
            .with_title("Desk")
            .with_size(640, 0)
            .with_texture_dir("/tmp/tex")
            .with_vsync(false)
            .with_ui(false)
            .with_clear_color(0.1, 0.2, 0.3, 1.0);

        assert_eq!(config.title, "Desk");
        assert_eq!(config.height, 1);
        assert_eq!(config.texture_dir, PathBuf::from("/tmp/tex"));
        assert!(!config.vsync);
        assert!(!config.show_ui);
        assert_eq!(config.clear_color, [0.1, 0.2, 0.3, 1.0]);
    }

    #[test]
    fn test_aspect_ratio() {
        let config = AppConfig::default().with_size(1600, 800);
        assert!((config.aspect_ratio() - 2.0).abs() < f32::EPSILON);
    }
}
