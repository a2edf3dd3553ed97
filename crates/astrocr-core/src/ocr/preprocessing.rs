//! Image preprocessing for OCR.

use std::path::Path;

use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, GrayImage, Luma};
use imageproc::contrast::otsu_level;
use imageproc::filter::median_filter;
use tracing::{debug, warn};

use crate::error::OcrError;
use crate::models::config::PreprocessConfig;

use super::ImageProvider;

/// Image preprocessor: downscale, grayscale, denoise, Otsu binarization.
#[derive(Debug, Clone)]
pub struct ImagePreprocessor {
    /// Maximum image dimension.
    max_size: u32,
    /// Median filter radius (0 disables denoising).
    denoise_radius: u32,
    /// Skip all processing when false.
    enabled: bool,
}

impl ImagePreprocessor {
    /// Create a new preprocessor with default settings.
    pub fn new() -> Self {
        Self {
            max_size: 2000,
            denoise_radius: 1,
            enabled: true,
        }
    }

    pub fn from_config(config: &PreprocessConfig) -> Self {
        Self::new()
            .with_max_size(config.max_dimension)
            .with_denoise_radius(config.denoise_radius)
            .with_enabled(config.enabled)
    }

    /// Set maximum image dimension.
    pub fn with_max_size(mut self, size: u32) -> Self {
        self.max_size = size.max(1);
        self
    }

    /// Set the median filter radius.
    pub fn with_denoise_radius(mut self, radius: u32) -> Self {
        self.denoise_radius = radius;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Read and decode an image file.
    pub fn load(&self, path: &Path) -> Result<DynamicImage, OcrError> {
        image::open(path).map_err(|e| OcrError::ImageLoad(format!("{}: {}", path.display(), e)))
    }

    /// Best-effort preprocessing.
    ///
    /// Never fails: if any step errors, the input image is returned as is
    /// and OCR runs on the unprocessed pixels.
    pub fn preprocess(&self, image: DynamicImage) -> DynamicImage {
        if !self.enabled {
            return image;
        }

        match self.try_preprocess(&image) {
            Ok(processed) => processed,
            Err(e) => {
                warn!("Preprocessing failed, using original image: {}", e);
                image
            }
        }
    }

    /// Run every preprocessing step, failing on the first error.
    pub fn try_preprocess(&self, image: &DynamicImage) -> Result<DynamicImage, OcrError> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(OcrError::InvalidImage(format!(
                "image has no pixels ({}x{})",
                width, height
            )));
        }

        let resized = match self.calculate_resize_dimensions(width, height) {
            Some((new_width, new_height)) => {
                debug!(
                    "Downscaling {}x{} to {}x{}",
                    width, height, new_width, new_height
                );
                image.resize_exact(new_width, new_height, FilterType::Triangle)
            }
            None => image.clone(),
        };

        let gray = resized.to_luma8();

        let denoised = if self.denoise_radius > 0 {
            median_filter(&gray, self.denoise_radius, self.denoise_radius)
        } else {
            gray
        };

        let level = otsu_level(&denoised);
        debug!("Otsu threshold: {}", level);

        Ok(DynamicImage::ImageLuma8(binarize(&denoised, level)))
    }

    /// Target size when either side exceeds `max_size`; both sides are
    /// scaled by the smaller of the two ratios.
    fn calculate_resize_dimensions(&self, width: u32, height: u32) -> Option<(u32, u32)> {
        if width <= self.max_size && height <= self.max_size {
            return None;
        }

        let scale_x = self.max_size as f64 / width as f64;
        let scale_y = self.max_size as f64 / height as f64;
        let scale = scale_x.min(scale_y);

        let new_width = (width as f64 * scale) as u32;
        let new_height = (height as f64 * scale) as u32;

        Some((new_width.max(1), new_height.max(1)))
    }
}

impl Default for ImagePreprocessor {
    fn default() -> Self {
        Self::new()
    }
}

/// Load errors propagate: an undecodable file has no image to fall back to.
/// Only the preprocessing steps after decoding are best-effort.
impl ImageProvider for ImagePreprocessor {
    fn prepare(&self, path: &Path) -> Result<DynamicImage, OcrError> {
        let image = self.load(path)?;
        Ok(self.preprocess(image))
    }
}

/// Pixels above `level` become white, the rest black.
fn binarize(image: &GrayImage, level: u8) -> GrayImage {
    let (width, height) = image.dimensions();
    let mut result = GrayImage::new(width, height);

    for (x, y, pixel) in image.enumerate_pixels() {
        let value = if pixel[0] > level { 255 } else { 0 };
        result.put_pixel(x, y, Luma([value]));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn two_tone(width: u32, height: u32) -> DynamicImage {
        let img = RgbImage::from_fn(width, height, |x, _| {
            if x < width / 2 {
                Rgb([20, 30, 40])
            } else {
                Rgb([220, 210, 200])
            }
        });
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn test_resize_dimensions() {
        let preprocessor = ImagePreprocessor::new();

        // Image within bounds
        assert_eq!(preprocessor.calculate_resize_dimensions(1500, 2000), None);

        // Wide image
        assert_eq!(
            preprocessor.calculate_resize_dimensions(3000, 1500),
            Some((2000, 1000))
        );

        // Tall image uses the smaller factor
        assert_eq!(
            preprocessor.calculate_resize_dimensions(1000, 4000),
            Some((500, 2000))
        );
    }

    #[test]
    fn test_output_is_binary_grayscale() {
        let output = ImagePreprocessor::new().preprocess(two_tone(40, 10));
        let DynamicImage::ImageLuma8(gray) = output else {
            panic!("expected single-channel output");
        };
        assert_eq!(gray.dimensions(), (40, 10));
        assert!(gray.pixels().all(|p| p[0] == 0 || p[0] == 255));
        assert_eq!(gray.get_pixel(2, 5)[0], 0);
        assert_eq!(gray.get_pixel(37, 5)[0], 255);
    }

    #[test]
    fn test_large_image_is_downscaled() {
        let output = ImagePreprocessor::new()
            .with_max_size(50)
            .with_denoise_radius(0)
            .preprocess(two_tone(200, 100));
        assert_eq!(output.dimensions(), (50, 25));
    }

    #[test]
    fn test_empty_image_falls_back() {
        let empty = DynamicImage::ImageRgb8(RgbImage::new(0, 0));
        let preprocessor = ImagePreprocessor::new();

        assert!(preprocessor.try_preprocess(&empty).is_err());
        let output = preprocessor.preprocess(empty.clone());
        assert_eq!(output, empty);
    }

    #[test]
    fn test_disabled_returns_input() {
        let input = two_tone(8, 8);
        let output = ImagePreprocessor::new()
            .with_enabled(false)
            .preprocess(input.clone());
        assert_eq!(output, input);
    }

    #[test]
    fn test_unreadable_file_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"not a png").unwrap();

        // Nothing decoded, so no fallback; the pipeline records a failed result.
        let err = ImagePreprocessor::new().prepare(&path).unwrap_err();
        assert!(matches!(err, OcrError::ImageLoad(_)));
    }
}
