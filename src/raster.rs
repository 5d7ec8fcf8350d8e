use std::path::Path;

use image::{ImageReader, RgbImage};

use crate::error::Error;
use crate::Result;

/// A decoded source image, normalized to 8-bit RGB.
///
/// Alpha channels are discarded and greyscale data is expanded to RGB during
/// decoding, so every pixel exposes exactly 3 channels.
pub struct SourceImage {
    pixels: RgbImage,
}

impl SourceImage {
    /// Opens and decodes an image file. The format is sniffed from the file
    /// content, so inputs without a file extension decode as well.
    pub fn open(path: &Path) -> Result<Self> {
        let path_string = path.display().to_string();
        let reader = ImageReader::open(path)
            .map_err(|e| Error::UnableToOpenInputFileForReading(path_string.clone(), e))?
            .with_guessed_format()
            .map_err(|e| Error::UnableToOpenInputFileForReading(path_string.clone(), e))?;
        let decoded = reader
            .decode()
            .map_err(|e| Error::ImageDecodingFailed(path_string, e))?;
        Ok(SourceImage {
            pixels: decoded.to_rgb8(),
        })
    }

    pub fn from_pixels(pixels: RgbImage) -> Self {
        SourceImage { pixels }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Downscales so that neither dimension exceeds the given bounds,
    /// preserving the aspect ratio. An image already within bounds is
    /// returned unchanged. Never upscales.
    pub fn thumbnail(self, max_width: u32, max_height: u32) -> Self {
        let (width, height) = (self.width(), self.height());
        let (target_width, target_height) =
            bounded_dimensions(width, height, max_width, max_height);
        if (target_width, target_height) == (width, height) {
            return self;
        }
        log::info!(
            "Downscaling image from {}x{} to {}x{}",
            width,
            height,
            target_width,
            target_height
        );
        SourceImage {
            pixels: image::imageops::thumbnail(&self.pixels, target_width, target_height),
        }
    }

    /// Raw channel values of the pixel at the zero-based coordinate (x, y).
    pub fn pixel_channels(&self, x: u32, y: u32) -> &[u8] {
        &self.pixels.get_pixel(x, y).0
    }
}

fn bounded_dimensions(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if width <= max_width && height <= max_height {
        return (width, height);
    }
    let width_ratio = max_width as f64 / width as f64;
    let height_ratio = max_height as f64 / height as f64;
    let ratio = width_ratio.min(height_ratio);
    let target_width = ((width as f64 * ratio).round() as u32).clamp(1, max_width);
    let target_height = ((height as f64 * ratio).round() as u32).clamp(1, max_height);
    (target_width, target_height)
}

#[cfg(test)]
mod test {
    use std::fs;

    use image::{GrayImage, ImageFormat, Luma, Rgb, RgbImage};

    use super::{bounded_dimensions, SourceImage};
    use crate::error::Error;

    fn uniform_image(width: u32, height: u32, color: [u8; 3]) -> SourceImage {
        SourceImage::from_pixels(RgbImage::from_pixel(width, height, Rgb(color)))
    }

    #[test]
    fn image_within_bounds_is_not_resized() {
        let image = uniform_image(150, 80, [3, 7, 11]);
        let thumbnail = image.thumbnail(200, 200);
        assert_eq!(thumbnail.width(), 150);
        assert_eq!(thumbnail.height(), 80);
    }

    #[test]
    fn wide_image_is_bounded_by_width() {
        let image = uniform_image(400, 200, [0, 0, 0]);
        let thumbnail = image.thumbnail(200, 200);
        assert_eq!(thumbnail.width(), 200);
        assert_eq!(thumbnail.height(), 100);
    }

    #[test]
    fn tall_image_is_bounded_by_height() {
        let image = uniform_image(100, 1000, [0, 0, 0]);
        let thumbnail = image.thumbnail(200, 200);
        assert_eq!(thumbnail.width(), 20);
        assert_eq!(thumbnail.height(), 200);
    }

    #[test]
    fn thumbnail_keeps_pixel_colors() {
        let image = uniform_image(400, 400, [120, 45, 210]);
        let thumbnail = image.thumbnail(10, 10);
        assert_eq!(thumbnail.pixel_channels(0, 0), &[120, 45, 210]);
        assert_eq!(thumbnail.pixel_channels(9, 9), &[120, 45, 210]);
    }

    #[test]
    fn extreme_aspect_ratio_never_collapses_to_zero() {
        let (width, height) = bounded_dimensions(10_000, 3, 200, 200);
        assert_eq!(width, 200);
        assert_eq!(height, 1);
    }

    #[test]
    fn bounded_dimensions_preserve_aspect_ratio() {
        let (width, height) = bounded_dimensions(1920, 1080, 200, 200);
        assert_eq!(width, 200);
        let original_ratio = 1920.0 / 1080.0;
        let bounded_ratio = width as f64 / height as f64;
        assert!((original_ratio - bounded_ratio).abs() < original_ratio / height as f64);
    }

    #[test]
    fn open_decodes_png_file() {
        let directory = tempfile::tempdir().expect("Temporary directory creation failed");
        let path = directory.path().join("single.png");
        RgbImage::from_pixel(1, 1, Rgb([9, 8, 7]))
            .save(&path)
            .expect("Saving test image failed");
        let image = SourceImage::open(&path).expect("Opening test image failed");
        assert_eq!(image.width(), 1);
        assert_eq!(image.height(), 1);
        assert_eq!(image.pixel_channels(0, 0), &[9, 8, 7]);
    }

    #[test]
    fn open_expands_greyscale_to_three_channels() {
        let directory = tempfile::tempdir().expect("Temporary directory creation failed");
        let path = directory.path().join("grey.png");
        GrayImage::from_pixel(2, 2, Luma([99]))
            .save(&path)
            .expect("Saving test image failed");
        let image = SourceImage::open(&path).expect("Opening test image failed");
        assert_eq!(image.pixel_channels(1, 1), &[99, 99, 99]);
    }

    #[test]
    fn open_sniffs_format_without_file_extension() {
        let directory = tempfile::tempdir().expect("Temporary directory creation failed");
        let path = directory.path().join("imagewithoutextension");
        RgbImage::from_pixel(3, 2, Rgb([1, 2, 3]))
            .save_with_format(&path, ImageFormat::Png)
            .expect("Saving test image failed");
        let image = SourceImage::open(&path).expect("Opening test image failed");
        assert_eq!(image.width(), 3);
        assert_eq!(image.height(), 2);
    }

    #[test]
    fn open_rejects_non_image_content() {
        let directory = tempfile::tempdir().expect("Temporary directory creation failed");
        let path = directory.path().join("notes.txt");
        fs::write(&path, "definitely not pixels").expect("Writing test file failed");
        let result = SourceImage::open(&path);
        match result {
            Err(Error::ImageDecodingFailed(_, _)) => {}
            _ => panic!("Non-image content not detected"),
        }
    }
}
