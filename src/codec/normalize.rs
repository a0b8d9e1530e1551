//! The byte/sample affine mapping shared by encoder and decoder.

use crate::error::SampleFault;

/// Map a byte from [0, 255] to a sample in [-1, 1].
#[inline]
#[must_use]
pub fn normalize(byte: u8) -> f32 {
    f32::from(byte) / 255.0 * 2.0 - 1.0
}

/// Map a sample from [-1, 1] back to a byte, rounding and clamping.
///
/// Values slightly outside [-1, 1] clamp to 0 or 255 instead of wrapping.
///
/// # Errors
///
/// Returns [`SampleFault::NonFinite`] for NaN or infinite samples.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn denormalize(sample: f32) -> Result<u8, SampleFault> {
    if !sample.is_finite() {
        return Err(SampleFault::NonFinite { value: sample });
    }
    // Safe: clamped to [0, 255] range before casting
    let scaled = ((sample + 1.0) / 2.0 * 255.0).round();
    Ok(scaled.clamp(0.0, 255.0) as u8)
}

/// Infallible wrapper used where the chunk machinery expects a fallible map.
#[inline]
#[allow(clippy::unnecessary_wraps)]
pub(crate) fn normalize_checked(byte: u8) -> Result<f32, SampleFault> {
    Ok(normalize(byte))
}
