//! Transcoder configuration.

use crate::audio::DEFAULT_SAMPLE_RATE;
use crate::codec::DEFAULT_WORKERS;
use crate::error::{Error, Result};

/// Language for user-facing messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Language {
    #[default]
    English,
    TraditionalChinese,
}

/// User-facing message table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Messages {
    pub encode_success: &'static str,
    pub decode_success: &'static str,
    pub decode_error: &'static str,
}

impl Language {
    /// Messages for this language.
    #[must_use]
    pub const fn messages(self) -> Messages {
        match self {
            Self::English => Messages {
                encode_success: "Image encoded to audio",
                decode_success: "Audio decoded to image",
                decode_error: "Audio data does not match the image dimensions",
            },
            Self::TraditionalChinese => Messages {
                encode_success: "圖片已編碼為音訊",
                decode_success: "音訊已解碼為圖片",
                decode_error: "音訊資料與圖片尺寸不符",
            },
        }
    }
}

/// Configuration for the transcoder.
#[derive(Debug, Clone)]
pub struct Config {
    /// Worker threads, and the number the payload is divided by.
    pub workers: usize,

    /// Sample rate written to audio files.
    pub sample_rate: u32,

    /// Output JPEG quality (1-100).
    pub output_quality: u8,

    /// Language for messages shown by front-ends.
    pub language: Language,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            sample_rate: DEFAULT_SAMPLE_RATE,
            output_quality: 95,
            language: Language::default(),
        }
    }
}

impl Config {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any parameter is out of valid range.
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(Error::InvalidParameter {
                name: "workers".to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }

        if self.sample_rate == 0 {
            return Err(Error::InvalidParameter {
                name: "sample_rate".to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }

        if !(1..=100).contains(&self.output_quality) {
            return Err(Error::InvalidParameter {
                name: "output_quality".to_string(),
                reason: "must be between 1 and 100".to_string(),
            });
        }

        Ok(())
    }
}
