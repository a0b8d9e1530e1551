//! Float PCM audio containers for sample streams.

mod read;
mod write;

pub use read::read_samples;
pub use write::{stream_spec, write_samples};

/// Default sample rate for written streams.
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;
