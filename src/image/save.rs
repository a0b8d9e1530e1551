//! Image saving utilities.

use std::io::Write;
use std::path::Path;

use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb, RgbImage};

use crate::codec::{ImageTensor, RGB_CHANNELS};
use crate::error::{Error, Result};

/// Save a tensor as an image file.
///
/// The format is inferred from `format_hint` (normally the final path's
/// extension), defaulting to PNG. `quality` only affects JPEG output.
///
/// # Arguments
///
/// * `tensor` - (height, width, 3) RGB tensor
/// * `path` - Output file path
/// * `format_hint` - Path whose extension selects the format
/// * `quality` - JPEG quality (1-100), ignored for other formats
///
/// # Errors
///
/// Returns an error if the image cannot be saved.
pub fn save_image<P: AsRef<Path>, Q: AsRef<Path>>(
    tensor: &ImageTensor,
    path: P,
    format_hint: Q,
    quality: u8,
) -> Result<()> {
    let path = path.as_ref();
    let img = DynamicImage::ImageRgb8(tensor_to_image(tensor)?);

    let extension = format_hint
        .as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("png")
        .to_lowercase();

    let save_err = |source: image::ImageError| Error::ImageSave {
        path: path.to_path_buf(),
        source,
    };

    match extension.as_str() {
        "jpg" | "jpeg" => {
            let mut output = std::io::BufWriter::new(std::fs::File::create(path)?);
            let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut output, quality);
            img.write_with_encoder(encoder).map_err(save_err)?;
            output.flush()?;
        }
        other => {
            let format = ImageFormat::from_extension(other).unwrap_or(ImageFormat::Png);
            img.save_with_format(path, format).map_err(save_err)?;
        }
    }

    Ok(())
}

/// Convert an RGB tensor to an image buffer.
///
/// # Errors
///
/// Returns an error if the tensor is not (height, width, 3) or its sides
/// exceed `u32`.
pub fn tensor_to_image(tensor: &ImageTensor) -> Result<RgbImage> {
    let (height, width, channels) = tensor.dim();
    if channels != RGB_CHANNELS {
        return Err(Error::ShapeMismatch {
            expected: format!("({height}, {width}, {RGB_CHANNELS})"),
            actual: format!("({height}, {width}, {channels})"),
        });
    }
    let too_large = || Error::UnsupportedDimensions {
        width,
        height,
        reason: "image sides must fit in u32".to_string(),
    };
    let w = u32::try_from(width).map_err(|_| too_large())?;
    let h = u32::try_from(height).map_err(|_| too_large())?;

    ImageBuffer::<Rgb<u8>, _>::from_raw(w, h, tensor.iter().copied().collect()).ok_or_else(|| {
        Error::ShapeMismatch {
            expected: format!("{} bytes", width * height * RGB_CHANNELS),
            actual: format!("{} bytes", tensor.len()),
        }
    })
}
