//! Photo decoding, resizing, and tensor conversion.

use super::ImageTensor;
use crate::constants::{
    APP_NAME,
    model_input::{HEIGHT, JPEG_QUALITY, WIDTH},
};
use crate::error::{Error, Result};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageReader, RgbImage};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tempfile::NamedTempFile;
use tracing::debug;

/// Converts photos into model input tensors.
///
/// The photo is downscaled and re-encoded as JPEG into a temporary file
/// before decoding. The temporary file is removed when the guard drops,
/// on every exit path.
#[derive(Debug, Clone, Default)]
pub struct Preprocessor {
    scratch_dir: Option<PathBuf>,
}

impl Preprocessor {
    /// Create a preprocessor using the system temporary directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a preprocessor writing its temporary raster into `dir`.
    pub fn with_scratch_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            scratch_dir: Some(dir.into()),
        }
    }

    /// Decode `photo_path` into a `[1, 224, 224, 3]` tensor.
    pub fn prepare(&self, photo_path: &Path) -> Result<ImageTensor> {
        let start = Instant::now();

        let source = open_photo(photo_path)?;
        debug!(
            "Decoded {} ({}x{})",
            photo_path.display(),
            source.width(),
            source.height()
        );

        let raster_file = self.reencode(photo_path, &source)?;
        drop(source);

        let raster = decode_raster(photo_path, raster_file.path())?;
        let tensor = ImageTensor::from_rgb(&raster)?;

        debug!(
            "Prepared tensor {:?} in {:.1}ms",
            tensor.shape(),
            start.elapsed().as_secs_f64() * 1000.0
        );
        Ok(tensor)
    }

    /// Resize to the model resolution and write a JPEG into a scoped temp file.
    fn reencode(&self, photo_path: &Path, source: &DynamicImage) -> Result<NamedTempFile> {
        let unsupported = |e: Box<dyn std::error::Error + Send + Sync>| Error::UnsupportedFormat {
            path: photo_path.to_path_buf(),
            source: e,
        };

        let resized = source
            .resize_exact(WIDTH, HEIGHT, FilterType::Triangle)
            .to_rgb8();

        let mut builder = tempfile::Builder::new();
        builder.prefix(APP_NAME).suffix(".jpg");
        let mut file = match &self.scratch_dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        }
        .map_err(|e| unsupported(Box::new(e)))?;

        {
            let mut writer = BufWriter::new(file.as_file_mut());
            JpegEncoder::new_with_quality(&mut writer, JPEG_QUALITY)
                .encode_image(&resized)
                .map_err(|e| unsupported(Box::new(e)))?;
            writer.flush().map_err(|e| unsupported(Box::new(e)))?;
        }

        Ok(file)
    }
}

fn open_photo(path: &Path) -> Result<DynamicImage> {
    let decode_error = |e: Box<dyn std::error::Error + Send + Sync>| Error::ImageDecode {
        path: path.to_path_buf(),
        source: e,
    };

    ImageReader::open(path)
        .map_err(|e| decode_error(Box::new(e)))?
        .with_guessed_format()
        .map_err(|e| decode_error(Box::new(e)))?
        .decode()
        .map_err(|e| decode_error(Box::new(e)))
}

/// Decode the re-encoded raster back into RGB pixels at model resolution.
fn decode_raster(photo_path: &Path, raster_path: &Path) -> Result<RgbImage> {
    let raster = image::open(raster_path).map_err(|e| Error::UnsupportedFormat {
        path: photo_path.to_path_buf(),
        source: Box::new(e),
    })?;

    let raster = if raster.width() == WIDTH && raster.height() == HEIGHT {
        raster
    } else {
        raster.resize_exact(WIDTH, HEIGHT, FilterType::Triangle)
    };

    Ok(raster.to_rgb8())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn write_png(dir: &Path, name: &str, width: u32, height: u32, color: [u8; 3]) -> PathBuf {
        let path = dir.join(name);
        RgbImage::from_pixel(width, height, Rgb(color))
            .save(&path)
            .unwrap();
        path
    }

    fn scratch_entries(dir: &Path) -> usize {
        std::fs::read_dir(dir).unwrap().count()
    }

    #[test]
    fn test_prepare_produces_model_shape() {
        let photos = tempfile::tempdir().unwrap();
        let scratch = tempfile::tempdir().unwrap();
        let photo = write_png(photos.path(), "leaf.png", 640, 480, [40, 160, 60]);

        let tensor = Preprocessor::with_scratch_dir(scratch.path())
            .prepare(&photo)
            .unwrap();

        assert_eq!(tensor.shape(), [1, 224, 224, 3]);
        assert_eq!(tensor.data().len(), 224 * 224 * 3);
        assert!(tensor.data().iter().all(|v| (0..=255).contains(v)));

        // Solid colour survives resize and JPEG within a small tolerance
        let [r, g, b] = tensor.pixel(112, 112).unwrap();
        assert!((r - 40).abs() <= 4, "r = {r}");
        assert!((g - 160).abs() <= 4, "g = {g}");
        assert!((b - 60).abs() <= 4, "b = {b}");
    }

    #[test]
    fn test_prepare_upscales_small_photos() {
        let photos = tempfile::tempdir().unwrap();
        let photo = write_png(photos.path(), "tiny.png", 8, 8, [200, 200, 200]);

        let tensor = Preprocessor::new().prepare(&photo).unwrap();
        assert_eq!(tensor.shape(), [1, 224, 224, 3]);
    }

    #[test]
    fn test_prepare_cleans_up_temp_raster() {
        let photos = tempfile::tempdir().unwrap();
        let scratch = tempfile::tempdir().unwrap();
        let photo = write_png(photos.path(), "leaf.png", 300, 300, [1, 2, 3]);

        Preprocessor::with_scratch_dir(scratch.path())
            .prepare(&photo)
            .unwrap();

        assert_eq!(scratch_entries(scratch.path()), 0);
    }

    #[test]
    fn test_corrupt_photo_is_decode_error() {
        let photos = tempfile::tempdir().unwrap();
        let scratch = tempfile::tempdir().unwrap();
        let photo = photos.path().join("broken.jpg");
        std::fs::write(&photo, b"definitely not a jpeg").unwrap();

        let result = Preprocessor::with_scratch_dir(scratch.path()).prepare(&photo);

        assert!(matches!(result, Err(Error::ImageDecode { .. })));
        assert_eq!(scratch_entries(scratch.path()), 0);
    }

    #[test]
    fn test_missing_photo_is_decode_error() {
        let result = Preprocessor::new().prepare(Path::new("/nonexistent/leaf.jpg"));
        assert!(matches!(result, Err(Error::ImageDecode { .. })));
    }

    #[test]
    fn test_unwritable_scratch_dir_is_unsupported_format() {
        let photos = tempfile::tempdir().unwrap();
        let photo = write_png(photos.path(), "leaf.png", 32, 32, [9, 9, 9]);

        let result = Preprocessor::with_scratch_dir(photos.path().join("missing-dir"))
            .prepare(&photo);

        assert!(matches!(result, Err(Error::UnsupportedFormat { .. })));
    }
}
