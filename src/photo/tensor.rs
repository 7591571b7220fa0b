//! Fixed-shape integer image tensor.

use crate::constants::model_input::{CHANNELS, SHAPE};
use crate::error::{Error, Result};
use image::RgbImage;

/// A single RGB image laid out as NHWC `i32` values.
///
/// Moved into the forward pass, which drops it once the model input
/// has been built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageTensor {
    shape: [usize; 4],
    data: Vec<i32>,
}

impl ImageTensor {
    /// Build a tensor from an RGB raster, inserting the batch dimension.
    ///
    /// The raster must already be at the model resolution.
    pub fn from_rgb(raster: &RgbImage) -> Result<Self> {
        let (width, height) = raster.dimensions();
        let shape = [1, height as usize, width as usize, CHANNELS];
        if shape != SHAPE {
            return Err(Error::Internal {
                message: format!("raster is {width}x{height}, expected {}x{}", SHAPE[2], SHAPE[1]),
            });
        }

        // RgbImage is row-major with interleaved channels, which is NHWC for a batch of one.
        let data = raster.as_raw().iter().map(|&b| i32::from(b)).collect();
        Ok(Self { shape, data })
    }

    /// Build a tensor from a shape and row-major values.
    pub fn from_parts(shape: [usize; 4], data: Vec<i32>) -> Result<Self> {
        let expected: usize = shape.iter().product();
        if expected != data.len() {
            return Err(Error::Inference {
                reason: format!(
                    "tensor shape {shape:?} needs {expected} values, got {}",
                    data.len()
                ),
            });
        }
        Ok(Self { shape, data })
    }

    /// Tensor shape as `[batch, height, width, channels]`.
    pub const fn shape(&self) -> [usize; 4] {
        self.shape
    }

    /// Row-major values.
    pub fn data(&self) -> &[i32] {
        &self.data
    }

    /// RGB values at a pixel of the first batch entry.
    #[cfg(test)]
    pub(crate) fn pixel(&self, y: usize, x: usize) -> Option<[i32; 3]> {
        let [_, height, width, channels] = self.shape;
        if y >= height || x >= width || channels != CHANNELS {
            return None;
        }
        let offset = (y * width + x) * channels;
        Some([
            self.data[offset],
            self.data[offset + 1],
            self.data[offset + 2],
        ])
    }

    /// Consume the tensor, returning its shape and values.
    pub fn into_parts(self) -> ([usize; 4], Vec<i32>) {
        (self.shape, self.data)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_from_rgb_inserts_batch_dimension() {
        let raster = RgbImage::from_pixel(224, 224, Rgb([10, 20, 30]));
        let tensor = ImageTensor::from_rgb(&raster).unwrap();

        assert_eq!(tensor.shape(), [1, 224, 224, 3]);
        assert_eq!(tensor.data().len(), 224 * 224 * 3);
        assert_eq!(tensor.pixel(100, 7), Some([10, 20, 30]));
    }

    #[test]
    fn test_from_rgb_keeps_row_major_order() {
        let raster = RgbImage::from_fn(224, 224, |x, y| {
            if x == 5 && y == 2 {
                Rgb([255, 0, 128])
            } else {
                Rgb([0, 0, 0])
            }
        });
        let tensor = ImageTensor::from_rgb(&raster).unwrap();

        assert_eq!(tensor.pixel(2, 5), Some([255, 0, 128]));
        assert_eq!(tensor.pixel(5, 2), Some([0, 0, 0]));
        assert_eq!(tensor.pixel(224, 0), None);
    }

    #[test]
    fn test_from_rgb_rejects_wrong_size() {
        let raster = RgbImage::new(100, 224);
        assert!(ImageTensor::from_rgb(&raster).is_err());
    }

    #[test]
    fn test_from_parts_checks_length() {
        assert!(ImageTensor::from_parts([1, 2, 2, 3], vec![0; 12]).is_ok());
        assert!(ImageTensor::from_parts([1, 2, 2, 3], vec![0; 11]).is_err());
    }
}
