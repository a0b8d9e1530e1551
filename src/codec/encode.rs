//! Image tensor to sample stream.

use std::borrow::Cow;

use crate::error::Result;

use super::chunked::ChunkedTransform;
use super::header::{Header, HEADER_LEN};
use super::normalize::{normalize, normalize_checked};
use super::{ImageTensor, SampleStream};

/// Encode an image into a sample stream on the calling thread.
///
/// The tensor is expected to have exactly three channels; the header only
/// records height and width.
///
/// The result holds `2 + height * width * 3` samples. Empty images encode
/// to a header-only stream.
#[must_use]
pub fn encode(image: &ImageTensor) -> SampleStream {
    let bytes = flatten(image);
    let mut stream = with_header(image, bytes.len());
    for (slot, &byte) in stream[HEADER_LEN..].iter_mut().zip(bytes.iter()) {
        *slot = normalize(byte);
    }
    stream
}

/// Encode an image, normalizing the payload on the worker pool.
///
/// `on_chunk(done, total)` fires as each chunk completes.
///
/// # Errors
///
/// Propagates chunk failures from the pool.
pub fn encode_chunked<P>(
    image: &ImageTensor,
    transform: &ChunkedTransform,
    on_chunk: P,
) -> Result<SampleStream>
where
    P: Fn(usize, usize) + Sync,
{
    let flat = flatten(image);
    let bytes: &[u8] = &flat;
    let mut stream = with_header(image, bytes.len());
    transform.run_into(bytes, &mut stream[HEADER_LEN..], normalize_checked, on_chunk)?;
    Ok(stream)
}

/// Row-major bytes of the tensor, borrowed when already contiguous.
fn flatten(image: &ImageTensor) -> Cow<'_, [u8]> {
    match image.as_slice() {
        Some(bytes) => Cow::Borrowed(bytes),
        None => Cow::Owned(image.iter().copied().collect()),
    }
}

fn with_header(image: &ImageTensor, payload_len: usize) -> SampleStream {
    let (height, width, _) = image.dim();
    let header = Header { height, width };

    let mut stream = vec![0.0; HEADER_LEN + payload_len];
    stream[..HEADER_LEN].copy_from_slice(&header.to_samples());
    stream
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    #[test]
    fn test_black_two_by_two() {
        let image = Array3::<u8>::zeros((2, 2, 3));
        let mut expected = vec![2.0, 2.0];
        expected.extend(std::iter::repeat(-1.0).take(12));
        assert_eq!(encode(&image), expected);
    }

    #[test]
    fn test_layout_is_row_then_column_then_channel() {
        // pixel (row 0, col 1) is pure green, pixel (row 1, col 0) pure blue
        let mut image = Array3::<u8>::zeros((2, 2, 3));
        image[[0, 1, 1]] = 255;
        image[[1, 0, 2]] = 255;

        let stream = encode(&image);
        let payload = &stream[HEADER_LEN..];
        assert!((payload[4] - 1.0).abs() < f32::EPSILON);
        assert!((payload[8] - 1.0).abs() < f32::EPSILON);
        assert_eq!(payload.iter().filter(|&&s| s > 0.0).count(), 2);
    }

    #[test]
    fn test_transposed_view_encodes_logical_order() {
        let mut image = Array3::<u8>::zeros((3, 2, 3));
        image[[2, 0, 0]] = 255;
        let view = image.clone().permuted_axes([1, 0, 2]);
        let owned = view.as_standard_layout().into_owned();

        assert_eq!(encode(&view), encode(&owned));
    }

    #[test]
    fn test_degenerate_is_header_only() {
        let image = Array3::<u8>::zeros((0, 5, 3));
        assert_eq!(encode(&image), vec![0.0, 5.0]);
    }

    #[test]
    fn test_chunked_matches_sequential() {
        let image = Array3::from_shape_fn((7, 5, 3), |(y, x, c)| {
            u8::try_from((y * 31 + x * 7 + c * 101) % 256).unwrap()
        });
        let transform = ChunkedTransform::new(3).unwrap();

        let chunked = encode_chunked(&image, &transform, |_, _| {}).unwrap();
        assert_eq!(chunked, encode(&image));
    }
}
