//! WAV reading.

use std::path::Path;

use hound::{SampleFormat, WavReader};

use crate::error::{Error, Result};

/// Read a mono 32-bit float WAV file into samples.
///
/// Returns the samples and the file's sample rate. Integer PCM and
/// multi-channel files are rejected, since neither can carry the header
/// values unchanged.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not mono float32.
pub fn read_samples<P: AsRef<Path>>(path: P) -> Result<(Vec<f32>, u32)> {
    let path = path.as_ref();
    let read_err = |source: hound::Error| Error::AudioRead {
        path: path.to_path_buf(),
        source,
    };

    let reader = WavReader::open(path).map_err(read_err)?;
    let spec = reader.spec();

    if spec.sample_format != SampleFormat::Float || spec.bits_per_sample != 32 {
        return Err(Error::UnsupportedAudio {
            path: path.to_path_buf(),
            reason: format!(
                "expected 32-bit float samples, found {}-bit {:?}",
                spec.bits_per_sample, spec.sample_format
            ),
        });
    }
    if spec.channels != 1 {
        return Err(Error::UnsupportedAudio {
            path: path.to_path_buf(),
            reason: format!("expected 1 channel, found {}", spec.channels),
        });
    }

    let samples = reader
        .into_samples::<f32>()
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(read_err)?;

    tracing::debug!(
        path = %path.display(),
        samples = samples.len(),
        sample_rate = spec.sample_rate,
        "read audio"
    );

    Ok((samples, spec.sample_rate))
}
