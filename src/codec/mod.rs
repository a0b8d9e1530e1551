//! The image/sample transcoding codec.
//!
//! A stream is `[height, width, payload...]` as `f32`. The payload is the
//! image flattened row by row, then column, then channel, with every byte
//! mapped to [-1, 1]. None of these functions keep state between calls.

mod chunked;
mod decode;
mod encode;
mod header;
mod normalize;

pub use chunked::{chunk_len, map_sequential, partition, ChunkedTransform, DEFAULT_WORKERS};
pub use decode::{decode, decode_chunked};
pub use encode::{encode, encode_chunked};
pub use header::{Header, HEADER_LEN, MAX_EXACT_DIMENSION};
pub use normalize::{denormalize, normalize};

use ndarray::Array3;

/// Pixel tensor of shape (height, width, 3) in R, G, B order.
pub type ImageTensor = Array3<u8>;

/// Header followed by normalized payload.
pub type SampleStream = Vec<f32>;

/// Number of channels in RGB images.
pub const RGB_CHANNELS: usize = 3;
