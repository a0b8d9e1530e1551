//! # `imgwave`
//!
//! Reversibly transcode an RGB image into a floating-point audio waveform
//! and back.
//!
//! The stream layout is `[height, width, payload...]` as `f32`, where the
//! payload is every pixel byte in row, column, channel order mapped from
//! [0, 255] onto [-1, 1]. Decoding inverts the mapping with rounding, so a
//! round trip is exact up to float quantization.
//!
//! ## Example
//!
//! ```no_run
//! use imgwave::{Config, NoProgress, Transcoder};
//!
//! # fn main() -> imgwave::Result<()> {
//! let transcoder = Transcoder::new(Config::default())?;
//!
//! transcoder.encode_file("picture.png", "picture.wav", &NoProgress)?;
//! transcoder.decode_file("picture.wav", "restored.png", &NoProgress)?;
//! # Ok(())
//! # }
//! ```

pub mod audio;
pub mod codec;
pub mod error;
pub mod image;
pub mod transcode;

pub use codec::{decode, encode, ImageTensor, SampleStream};
pub use error::{Error, Result, SampleFault};
pub use transcode::{CancelHandle, Config, Language, NoProgress, Progress, TranscodeState, Transcoder};
