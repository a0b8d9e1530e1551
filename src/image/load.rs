//! Image loading utilities.

use std::path::Path;

use image::DynamicImage;
use ndarray::Array3;

use crate::codec::{ImageTensor, RGB_CHANNELS};
use crate::error::{Error, Result};

/// Load an image from disk as an RGB tensor of shape (height, width, 3).
///
/// Any format the `image` crate can decode is accepted; alpha and palette
/// information is dropped by the RGB conversion.
///
/// # Errors
///
/// Returns an error if the image cannot be loaded.
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<ImageTensor> {
    let path = path.as_ref();

    let img = image::open(path).map_err(|source| Error::ImageLoad {
        path: path.to_path_buf(),
        source,
    })?;

    image_to_tensor(&img)
}

/// Convert a `DynamicImage` to an RGB byte tensor.
///
/// # Errors
///
/// Returns an error if the pixel buffer does not match its dimensions.
pub fn image_to_tensor(img: &DynamicImage) -> Result<ImageTensor> {
    let rgb = img.to_rgb8();
    let (width, height) = (rgb.width() as usize, rgb.height() as usize);

    Array3::from_shape_vec((height, width, RGB_CHANNELS), rgb.into_raw()).map_err(|err| {
        Error::ShapeMismatch {
            expected: format!("({height}, {width}, {RGB_CHANNELS})"),
            actual: err.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};

    #[test]
    fn test_tensor_shape() {
        let img = DynamicImage::new_rgb8(100, 40);
        let tensor = image_to_tensor(&img).unwrap();

        assert_eq!(tensor.shape(), &[40, 100, 3]);
    }

    #[test]
    fn test_pixel_placement() {
        let mut rgb = RgbImage::new(3, 2);
        rgb.put_pixel(2, 1, Rgb([10, 20, 30]));
        let tensor = image_to_tensor(&DynamicImage::ImageRgb8(rgb)).unwrap();

        assert_eq!(tensor[[1, 2, 0]], 10);
        assert_eq!(tensor[[1, 2, 1]], 20);
        assert_eq!(tensor[[1, 2, 2]], 30);
    }

    #[test]
    fn test_alpha_dropped() {
        let mut rgba = RgbaImage::new(1, 1);
        rgba.put_pixel(0, 0, Rgba([1, 2, 3, 4]));
        let tensor = image_to_tensor(&DynamicImage::ImageRgba8(rgba)).unwrap();

        assert_eq!(tensor.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            load_image("/nonexistent/picture.png"),
            Err(Error::ImageLoad { .. })
        ));
    }
}
