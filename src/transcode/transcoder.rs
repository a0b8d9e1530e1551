//! Transcoding orchestrator.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::audio;
use crate::codec::{self, ChunkedTransform, Header, ImageTensor, SampleStream, RGB_CHANNELS};
use crate::error::{Error, Result};
use crate::image;

use super::config::Config;
use super::progress::{Monotonic, NoProgress, Progress};

/// Progress reported once the source has been read.
const LOADED: f32 = 0.1;

/// Progress reported once every chunk has been transformed.
const TRANSFORMED: f32 = 0.9;

/// Lifecycle of the transcoder's current operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TranscodeState {
    #[default]
    Idle,
    Running,
    Succeeded,
    Failed,
}

/// Requests cancellation of the running operation.
///
/// Chunks already handed to workers run to completion; the result is then
/// discarded and nothing is written.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    /// Ask the running operation to stop.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Whether a cancel has been requested since the operation started.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    fn reset(&self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Transcodes between image files and float WAV files.
///
/// Owns one worker pool for its whole life. One operation runs at a time;
/// a second call while one is running fails with [`Error::Busy`].
#[derive(Debug)]
pub struct Transcoder {
    config: Config,
    transform: ChunkedTransform,
    state: Mutex<TranscodeState>,
    cancel: CancelHandle,
}

impl Transcoder {
    /// Create a transcoder and start its worker pool.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the pool fails
    /// to start.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        tracing::info!("Initializing transcoder with config: {config:?}");
        let transform = ChunkedTransform::new(config.workers)?;

        Ok(Self {
            config,
            transform,
            state: Mutex::new(TranscodeState::Idle),
            cancel: CancelHandle::default(),
        })
    }

    /// The configuration this transcoder was built with.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// State of the current or last operation.
    #[must_use]
    pub fn state(&self) -> TranscodeState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Handle for cancelling the running operation from another thread.
    #[must_use]
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Encode an image file into a float WAV file.
    ///
    /// # Errors
    ///
    /// Returns an error if the image cannot be read, its dimensions cannot
    /// be stored in the header, the operation is cancelled, or the audio
    /// cannot be written. The destination is untouched on failure.
    pub fn encode_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        image_path: P,
        audio_path: Q,
        progress: &dyn Progress,
    ) -> Result<()> {
        let image_path = image_path.as_ref();
        let audio_path = audio_path.as_ref();

        self.run(progress, |progress| {
            tracing::info!("Encoding image: {}", image_path.display());
            let image = image::load_image(image_path)?;
            progress.set(LOADED);

            let stream = self.encode_tensor(&image, progress)?;

            tracing::info!("Saving audio to: {}", audio_path.display());
            write_atomically(audio_path, |partial| {
                audio::write_samples(partial, &stream, self.config.sample_rate)
            })
        })
    }

    /// Decode a float WAV file back into an image file.
    ///
    /// The image format follows the extension of `image_path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the audio cannot be read, the header is invalid
    /// or disagrees with the payload length, a sample is non-finite, the
    /// operation is cancelled, or the image cannot be written. The
    /// destination is untouched on failure.
    pub fn decode_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        audio_path: P,
        image_path: Q,
        progress: &dyn Progress,
    ) -> Result<()> {
        let audio_path = audio_path.as_ref();
        let image_path = image_path.as_ref();

        self.run(progress, |progress| {
            tracing::info!("Decoding audio: {}", audio_path.display());
            let (samples, sample_rate) = audio::read_samples(audio_path)?;
            if sample_rate != self.config.sample_rate {
                tracing::debug!(sample_rate, "sample rate differs from config; ignored");
            }
            progress.set(LOADED);

            let tensor = self.decode_stream(&samples, progress)?;

            tracing::info!("Saving image to: {}", image_path.display());
            write_atomically(image_path, |partial| {
                image::save_image(&tensor, partial, image_path, self.config.output_quality)
            })
        })
    }

    /// Encode an in-memory image on the worker pool.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions cannot be stored in the header or
    /// the operation is cancelled.
    pub fn encode_image(&self, image: &ImageTensor) -> Result<SampleStream> {
        self.run(&NoProgress, |progress| self.encode_tensor(image, progress))
    }

    /// Decode an in-memory sample stream on the worker pool.
    ///
    /// # Errors
    ///
    /// Same as [`codec::decode`], plus [`Error::Cancelled`].
    pub fn decode_samples(&self, samples: &[f32]) -> Result<ImageTensor> {
        self.run(&NoProgress, |progress| self.decode_stream(samples, progress))
    }

    fn encode_tensor(&self, image: &ImageTensor, progress: &Monotonic<'_>) -> Result<SampleStream> {
        let (height, width, channels) = image.dim();
        if channels != RGB_CHANNELS {
            return Err(Error::ShapeMismatch {
                expected: format!("({height}, {width}, {RGB_CHANNELS})"),
                actual: format!("({height}, {width}, {channels})"),
            });
        }
        Header::checked(height, width)?;
        tracing::debug!(height, width, "encoding payload");

        let stream = codec::encode_chunked(image, &self.transform, |done, total| {
            progress.span(LOADED, TRANSFORMED, done, total);
        })?;
        self.check_cancelled()?;
        progress.set(TRANSFORMED);
        Ok(stream)
    }

    fn decode_stream(&self, samples: &[f32], progress: &Monotonic<'_>) -> Result<ImageTensor> {
        let tensor = codec::decode_chunked(samples, &self.transform, |done, total| {
            progress.span(LOADED, TRANSFORMED, done, total);
        })?;
        self.check_cancelled()?;
        progress.set(TRANSFORMED);
        Ok(tensor)
    }

    fn check_cancelled(&self) -> Result<()> {
        if self.cancel.is_cancelled() {
            tracing::warn!("Cancel requested; discarding transformed data");
            return Err(Error::Cancelled);
        }
        Ok(())
    }

    /// Drive one operation through `Running` to `Succeeded` or `Failed`.
    fn run<T, F>(&self, progress: &dyn Progress, op: F) -> Result<T>
    where
        F: FnOnce(&Monotonic<'_>) -> Result<T>,
    {
        {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            if *state == TranscodeState::Running {
                return Err(Error::Busy);
            }
            *state = TranscodeState::Running;
        }
        self.cancel.reset();

        let progress = Monotonic::new(progress);
        let result = op(&progress);

        let outcome = if result.is_ok() {
            TranscodeState::Succeeded
        } else {
            TranscodeState::Failed
        };
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = outcome;

        match &result {
            Ok(_) => {
                progress.set(1.0);
                tracing::info!("Transcoding complete");
            }
            Err(err) => tracing::debug!("Transcoding failed: {err}"),
        }
        result
    }
}

/// Sibling path written before the final rename.
fn partial_path(dest: &Path) -> PathBuf {
    let mut name = dest.file_name().map(OsString::from).unwrap_or_default();
    name.push(".partial");
    dest.with_file_name(name)
}

/// Write through a temporary sibling, then rename over `dest`.
///
/// On failure the temporary file is removed and `dest` is left as it was.
fn write_atomically<F>(dest: &Path, write: F) -> Result<()>
where
    F: FnOnce(&Path) -> Result<()>,
{
    let partial = partial_path(dest);
    let result = write(&partial).and_then(|()| fs::rename(&partial, dest).map_err(Error::from));

    if result.is_err() && partial.exists() {
        if let Err(err) = fs::remove_file(&partial) {
            tracing::warn!("Failed to remove {}: {err}", partial.display());
        }
    }
    result
}
