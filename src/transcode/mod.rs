//! File-level transcoding on a long-lived worker pool.

mod config;
mod progress;
mod transcoder;

pub use config::{Config, Language, Messages};
pub use progress::{NoProgress, Progress};
pub use transcoder::{CancelHandle, TranscodeState, Transcoder};
