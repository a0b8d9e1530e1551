//! The two-sample dimension header at the start of every stream.

use crate::error::{Error, Result};

use super::RGB_CHANNELS;

/// Number of samples occupied by the header.
pub const HEADER_LEN: usize = 2;

/// Largest dimension an `f32` header sample stores exactly (2^24).
pub const MAX_EXACT_DIMENSION: usize = 1 << 24;

/// Image dimensions carried in front of the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub height: usize,
    pub width: usize,
}

impl Header {
    /// Build a header, rejecting dimensions the `f32` header cannot hold exactly.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDimensions`] if either side exceeds
    /// [`MAX_EXACT_DIMENSION`].
    pub fn checked(height: usize, width: usize) -> Result<Self> {
        if height > MAX_EXACT_DIMENSION || width > MAX_EXACT_DIMENSION {
            return Err(Error::UnsupportedDimensions {
                width,
                height,
                reason: format!("dimensions above {MAX_EXACT_DIMENSION} are not exact in f32"),
            });
        }
        Ok(Self { height, width })
    }

    /// Number of payload samples this header declares, if it fits in `usize`.
    #[must_use]
    pub fn payload_len(&self) -> Option<usize> {
        self.height
            .checked_mul(self.width)
            .and_then(|pixels| pixels.checked_mul(RGB_CHANNELS))
    }

    /// Header as stream samples.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn to_samples(self) -> [f32; HEADER_LEN] {
        [self.height as f32, self.width as f32]
    }

    /// Read the header from the front of a stream.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidHeader`] if the stream is shorter than the
    /// header or a value is non-finite, negative, or too large once rounded.
    pub fn parse(samples: &[f32]) -> Result<Self> {
        let [height, width] = match samples {
            [height, width, ..] => [*height, *width],
            _ => {
                return Err(Error::InvalidHeader {
                    reason: format!("stream holds {} samples, header needs 2", samples.len()),
                })
            }
        };

        Ok(Self {
            height: parse_dimension("height", height)?,
            width: parse_dimension("width", width)?,
        })
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn parse_dimension(name: &str, value: f32) -> Result<usize> {
    if !value.is_finite() {
        return Err(Error::InvalidHeader {
            reason: format!("{name} is not finite ({value})"),
        });
    }

    let rounded = value.round();
    if rounded < 0.0 {
        return Err(Error::InvalidHeader {
            reason: format!("{name} is negative ({value})"),
        });
    }
    if rounded > MAX_EXACT_DIMENSION as f32 {
        return Err(Error::InvalidHeader {
            reason: format!("{name} {rounded} exceeds {MAX_EXACT_DIMENSION}"),
        });
    }

    // Safe: finite, non-negative and at most 2^24
    Ok(rounded as usize)
}
