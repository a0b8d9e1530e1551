//! Custom error types for imgwave.

use std::path::PathBuf;
use thiserror::Error;

/// Failure of a single element inside a chunk transform.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum SampleFault {
    /// The sample is NaN or infinite and has no byte value.
    #[error("non-finite sample {value}")]
    NonFinite { value: f32 },
}

/// Main error type for the imgwave library.
#[derive(Error, Debug)]
pub enum Error {
    /// The header declares a payload size the stream does not carry.
    #[error("payload length mismatch: header expects {expected} samples, stream has {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// The header values cannot describe an image.
    #[error("invalid header: {reason}")]
    InvalidHeader { reason: String },

    /// A worker failed to transform its chunk.
    #[error("chunk {chunk} failed at payload index {index}: {source}")]
    ChunkTransform {
        chunk: usize,
        index: usize,
        #[source]
        source: SampleFault,
    },

    /// Image dimensions are not supported.
    #[error("unsupported image dimensions {width}x{height}: {reason}")]
    UnsupportedDimensions {
        width: usize,
        height: usize,
        reason: String,
    },

    /// The audio file is not a mono float stream.
    #[error("unsupported audio in {path}: {reason}")]
    UnsupportedAudio { path: PathBuf, reason: String },

    /// Failed to load an image file.
    #[error("failed to load image from {path}: {source}")]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Failed to save an image file.
    #[error("failed to save image to {path}: {source}")]
    ImageSave {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Failed to read an audio file.
    #[error("failed to read audio from {path}: {source}")]
    AudioRead {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },

    /// Failed to write an audio file.
    #[error("failed to write audio to {path}: {source}")]
    AudioWrite {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },

    /// Invalid parameter value.
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: String, reason: String },

    /// The worker pool could not be started.
    #[error("failed to build worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),

    /// The operation was cancelled and its result discarded.
    #[error("operation cancelled")]
    Cancelled,

    /// Another operation is already running on this transcoder.
    #[error("transcoder is busy")]
    Busy,

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Shape mismatch in tensor operations.
    #[error("tensor shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch { expected: String, actual: String },
}

/// Result type alias for imgwave operations.
pub type Result<T> = std::result::Result<T, Error>;
