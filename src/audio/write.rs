//! WAV writing.

use std::path::Path;

use hound::{SampleFormat, WavSpec, WavWriter};

use crate::error::{Error, Result};

/// WAV format used for every written stream: mono, 32-bit float.
#[must_use]
pub const fn stream_spec(sample_rate: u32) -> WavSpec {
    WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    }
}

/// Write samples as a mono 32-bit float WAV file.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn write_samples<P: AsRef<Path>>(path: P, samples: &[f32], sample_rate: u32) -> Result<()> {
    let path = path.as_ref();
    let write_err = |source: hound::Error| Error::AudioWrite {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = WavWriter::create(path, stream_spec(sample_rate)).map_err(write_err)?;
    for &sample in samples {
        writer.write_sample(sample).map_err(write_err)?;
    }
    writer.finalize().map_err(write_err)?;

    tracing::debug!(path = %path.display(), samples = samples.len(), "wrote audio");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::read_samples;

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stream.wav");
        let samples = vec![3.0, 1.0, -1.0, 0.25, 1.0];

        write_samples(&path, &samples, 44_100).unwrap();
        let (read, rate) = read_samples(&path).unwrap();

        assert_eq!(rate, 44_100);
        assert_eq!(read, samples);
    }

    #[test]
    fn test_header_values_survive_container() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("large.wav");
        let samples = vec![16_777_216.0, 9999.0];

        write_samples(&path, &samples, 22_050).unwrap();
        assert_eq!(read_samples(&path).unwrap().0, samples);
    }
}
