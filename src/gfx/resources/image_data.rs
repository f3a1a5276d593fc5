//! Image loading utilities for texture data
//!
//! Images are flipped vertically on load so row 0 is the bottom of the
//! picture, matching the meshes' texture coordinates.

use std::path::Path;

use image::imageops::FilterType;

use crate::error::{Result, SceneError};

/// Loaded image data ready for GPU upload
#[derive(Debug, Clone, PartialEq)]
pub struct ImageData {
    /// Raw RGBA pixel data
    pub data: Vec<u8>,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Channel count of the source file (3 or 4); `data` is always RGBA
    pub channels: u8,
}

impl ImageData {
    /// Load an image from a file path
    ///
    /// Only RGB and RGBA sources are accepted.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();

        log::debug!("Loading image from: {:?}", path_ref);

        let img = image::open(path_ref).map_err(|source| SceneError::ImageLoad {
            path: path_ref.to_path_buf(),
            source,
        })?;

        let channels = img.color().channel_count();
        if channels != 3 && channels != 4 {
            return Err(SceneError::UnsupportedChannels {
                path: path_ref.to_path_buf(),
                channels,
            });
        }

        let rgba_img = img.flipv().to_rgba8();
        let (width, height) = rgba_img.dimensions();

        log::info!(
            "Loaded image {:?} width:{} height:{} channels:{}",
            path_ref,
            width,
            height,
            channels
        );

        Ok(Self {
            data: rgba_img.into_raw(),
            width,
            height,
            channels,
        })
    }

    /// Fails when either side exceeds `max_dimension`
    ///
    /// `path` only names the source in the error.
    pub fn check_fits(&self, path: &Path, max_dimension: u32) -> Result<()> {
        if self.width > max_dimension || self.height > max_dimension {
            return Err(SceneError::TextureTooLarge {
                path: path.to_path_buf(),
                width: self.width,
                height: self.height,
                max_dimension,
            });
        }
        Ok(())
    }

    /// Create a solid color image (useful for testing and defaults)
    pub fn solid_color(width: u32, height: u32, color: [u8; 4]) -> Self {
        let pixel_count = (width * height) as usize;
        let mut data = Vec::with_capacity(pixel_count * 4);

        for _ in 0..pixel_count {
            data.extend_from_slice(&color);
        }

        Self {
            data,
            width,
            height,
            channels: 4,
        }
    }

    /// Get the size of the image data in bytes
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }

    /// Number of levels in a full mip chain down to 1x1
    pub fn mip_level_count(&self) -> u32 {
        32 - self.width.max(self.height).max(1).leading_zeros()
    }

    /// Full mip chain, level 0 first
    ///
    /// Each level halves the previous one (rounding down, never below one
    /// pixel) using a triangle filter.
    pub fn mip_chain(&self) -> Vec<ImageData> {
        let mut levels = vec![self.clone()];
        let Some(base) = image::RgbaImage::from_raw(self.width, self.height, self.data.clone())
        else {
            log::warn!(
                "Image data does not match {}x{}, skipping mipmaps",
                self.width,
                self.height
            );
            return levels;
        };

        let (mut width, mut height) = (self.width, self.height);
        while width > 1 || height > 1 {
            width = (width / 2).max(1);
            height = (height / 2).max(1);
            let level = image::imageops::resize(&base, width, height, FilterType::Triangle);
            levels.push(ImageData {
                data: level.into_raw(),
                width,
                height,
                channels: self.channels,
            });
        }

        levels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("deskscene-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_solid_color_image() {
        let img = ImageData::solid_color(4, 4, [255, 0, 0, 255]);
        assert_eq!(img.width, 4);
        assert_eq!(img.height, 4);
        assert_eq!(img.channels, 4);
        assert_eq!(img.size_bytes(), 4 * 4 * 4);
        assert_eq!(&img.data[0..4], &[255, 0, 0, 255]);
    }

    #[test]
    fn test_rgb_file_is_flipped_and_expanded() {
        let path = temp_path("flip.png");
        let mut rgb = image::RgbImage::new(2, 2);
        for x in 0..2 {
            rgb.put_pixel(x, 0, image::Rgb([255, 0, 0]));
            rgb.put_pixel(x, 1, image::Rgb([0, 0, 255]));
        }
        rgb.save(&path).unwrap();

        let loaded = ImageData::from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded.channels, 3);
        assert_eq!((loaded.width, loaded.height), (2, 2));
        assert_eq!(loaded.size_bytes(), 16);
        // Bottom row of the file comes first
        assert_eq!(&loaded.data[0..4], &[0, 0, 255, 255]);
        assert_eq!(&loaded.data[8..12], &[255, 0, 0, 255]);
    }

    #[test]
    fn test_grayscale_is_rejected() {
        let path = temp_path("gray.png");
        image::GrayImage::new(2, 2).save(&path).unwrap();

        let err = ImageData::from_file(&path).unwrap_err();
        std::fs::remove_file(&path).ok();

        assert!(matches!(err, SceneError::UnsupportedChannels { channels: 1, .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = ImageData::from_file(temp_path("does-not-exist.png")).unwrap_err();
        assert!(matches!(err, SceneError::ImageLoad { .. }));
    }

    #[test]
    fn test_mip_chain() {
        let img = ImageData::solid_color(8, 2, [10, 20, 30, 255]);
        assert_eq!(img.mip_level_count(), 4);

        let chain = img.mip_chain();
        let sizes: Vec<_> = chain.iter().map(|l| (l.width, l.height)).collect();
        assert_eq!(sizes, vec![(8, 2), (4, 1), (2, 1), (1, 1)]);
        assert!(chain.iter().all(|l| l.size_bytes() == (l.width * l.height * 4) as usize));
        assert_eq!(&chain[3].data, &[10, 20, 30, 255]);
    }

    #[test]
    fn test_single_pixel_has_one_level() {
        let img = ImageData::solid_color(1, 1, [0; 4]);
        assert_eq!(img.mip_level_count(), 1);
        assert_eq!(img.mip_chain().len(), 1);
    }

    #[test]
    fn test_size_check_against_device_limit() {
        let path = Path::new("wide.jpg");
        let wide = ImageData::solid_color(5000, 2, [0; 4]);
        let err = wide.check_fits(path, 4096).unwrap_err();
        assert!(matches!(
            err,
            SceneError::TextureTooLarge { width: 5000, height: 2, max_dimension: 4096, .. }
        ));

        let tall = ImageData::solid_color(2, 4097, [0; 4]);
        assert!(tall.check_fits(path, 4096).is_err());

        let edge = ImageData::solid_color(4096, 1, [0; 4]);
        assert!(edge.check_fits(path, 4096).is_ok());
    }
}
