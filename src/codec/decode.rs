//! Sample stream back to image tensor.

use ndarray::Array3;

use crate::error::{Error, Result};

use super::chunked::{map_sequential, ChunkedTransform};
use super::header::{Header, HEADER_LEN};
use super::normalize::denormalize;
use super::{ImageTensor, RGB_CHANNELS};

/// Decode a sample stream on the calling thread.
///
/// # Errors
///
/// Returns [`Error::InvalidHeader`] or [`Error::LengthMismatch`] before any
/// payload is touched, and [`Error::ChunkTransform`] for non-finite samples.
pub fn decode(samples: &[f32]) -> Result<ImageTensor> {
    let (header, payload) = split(samples)?;
    let mut bytes = vec![0u8; payload.len()];
    map_sequential(payload, &mut bytes, denormalize)?;
    reshape(header, bytes)
}

/// Decode a sample stream, denormalizing the payload on the worker pool.
///
/// `on_chunk(done, total)` fires as each chunk completes.
///
/// # Errors
///
/// Same as [`decode`]. No partial tensor is returned if a chunk fails.
pub fn decode_chunked<P>(
    samples: &[f32],
    transform: &ChunkedTransform,
    on_chunk: P,
) -> Result<ImageTensor>
where
    P: Fn(usize, usize) + Sync,
{
    let (header, payload) = split(samples)?;
    let mut bytes = vec![0u8; payload.len()];
    transform.run_into(payload, &mut bytes, denormalize, on_chunk)?;
    reshape(header, bytes)
}

/// Parse the header and check the payload length against it.
fn split(samples: &[f32]) -> Result<(Header, &[f32])> {
    let header = Header::parse(samples)?;
    let expected = header.payload_len().ok_or_else(|| Error::InvalidHeader {
        reason: format!(
            "{}x{} pixels overflow the addressable payload",
            header.height, header.width
        ),
    })?;

    let payload = &samples[HEADER_LEN..];
    if payload.len() != expected {
        return Err(Error::LengthMismatch {
            expected,
            actual: payload.len(),
        });
    }

    tracing::trace!(height = header.height, width = header.width, "header accepted");
    Ok((header, payload))
}

fn reshape(header: Header, bytes: Vec<u8>) -> Result<ImageTensor> {
    Array3::from_shape_vec((header.height, header.width, RGB_CHANNELS), bytes).map_err(|err| {
        Error::ShapeMismatch {
            expected: format!("({}, {}, {RGB_CHANNELS})", header.height, header.width),
            actual: err.to_string(),
        }
    })
}
