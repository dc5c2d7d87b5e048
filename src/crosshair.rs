//! Crosshair image loading and preview scaling

use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use image::RgbaImage;
use thiserror::Error;
use tracing::debug;

use crate::types::Size;

#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("{} decoded to an empty image", path.display())]
    Empty { path: PathBuf },
}

/// A decoded crosshair, already fitted into the preview square
#[derive(Debug, Clone)]
pub struct CrosshairImage {
    pub path: PathBuf,
    pub pixels: RgbaImage,
}

impl CrosshairImage {
    /// Decode `path` and fit it into a `bound`×`bound` square.
    /// Aspect ratio is preserved and images are never enlarged.
    pub fn load(path: &Path, bound: u32) -> Result<Self, PreviewError> {
        let decoded = image::open(path)
            .map_err(|source| PreviewError::Decode {
                path: path.to_path_buf(),
                source,
            })?
            .to_rgba8();

        let (width, height) = decoded.dimensions();
        if width == 0 || height == 0 {
            return Err(PreviewError::Empty {
                path: path.to_path_buf(),
            });
        }

        let fitted = fit_within(Size::new(width, height), bound);
        let pixels = if fitted == Size::new(width, height) {
            decoded
        } else {
            imageops::resize(&decoded, fitted.width, fitted.height, FilterType::Lanczos3)
        };

        debug!(
            path = %path.display(),
            original = ?(width, height),
            fitted = ?(fitted.width, fitted.height),
            "Loaded crosshair image"
        );

        Ok(Self {
            path: path.to_path_buf(),
            pixels,
        })
    }

    pub fn size(&self) -> Size {
        let (width, height) = self.pixels.dimensions();
        Size::new(width, height)
    }

    /// Padding (left, top) that centers this image inside a `bound`×`bound` square
    pub fn padding_in(&self, bound: u32) -> (u32, u32) {
        let size = self.size();
        (
            bound.saturating_sub(size.width) / 2,
            bound.saturating_sub(size.height) / 2,
        )
    }
}

/// Largest size with the same aspect ratio as `size` that fits in a `bound` square.
/// Sizes already inside the square are returned unchanged.
pub fn fit_within(size: Size, bound: u32) -> Size {
    if size.width <= bound && size.height <= bound {
        return size;
    }

    let scale = f64::min(
        bound as f64 / size.width as f64,
        bound as f64 / size.height as f64,
    );
    let scaled = |side: u32| ((side as f64 * scale).round() as u32).clamp(1, bound);
    Size::new(scaled(size.width), scaled(size.height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use std::fs;

    fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
        let path = dir.join(name);
        let img = RgbaImage::from_pixel(width, height, Rgba([255, 0, 0, 255]));
        img.save(&path).unwrap();
        path
    }

    #[test]
    fn test_fit_within_keeps_small_images() {
        assert_eq!(fit_within(Size::new(64, 64), 100), Size::new(64, 64));
        assert_eq!(fit_within(Size::new(100, 40), 100), Size::new(100, 40));
    }

    #[test]
    fn test_fit_within_downscales_wide_image() {
        assert_eq!(fit_within(Size::new(400, 200), 100), Size::new(100, 50));
    }

    #[test]
    fn test_fit_within_downscales_tall_image() {
        assert_eq!(fit_within(Size::new(300, 900), 100), Size::new(33, 100));
    }

    #[test]
    fn test_fit_within_extreme_ratio_never_zero() {
        assert_eq!(fit_within(Size::new(5000, 1), 100), Size::new(100, 1));
    }

    #[test]
    fn test_load_small_png_is_centered_with_padding() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(dir.path(), "small.png", 64, 64);

        let image = CrosshairImage::load(&path, 100).unwrap();
        assert_eq!(image.size(), Size::new(64, 64));
        assert_eq!(image.padding_in(100), (18, 18));
        assert_eq!(image.path, path);
    }

    #[test]
    fn test_load_large_png_preserves_aspect_ratio() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(dir.path(), "wide.png", 256, 128);

        let image = CrosshairImage::load(&path, 100).unwrap();
        assert_eq!(image.size(), Size::new(100, 50));
        assert_eq!(image.padding_in(100), (0, 25));
        assert!(!image.pixels.as_raw().is_empty());
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = CrosshairImage::load(&dir.path().join("nope.png"), 100);
        assert!(matches!(result, Err(PreviewError::Decode { .. })));
    }

    #[test]
    fn test_load_garbage_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        fs::write(&path, b"definitely not a png").unwrap();

        let err = CrosshairImage::load(&path, 100).unwrap_err();
        assert!(err.to_string().contains("broken.png"));
    }
}
