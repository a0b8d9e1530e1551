//! Chunked parallel elementwise transform with ordered reassembly.
//!
//! The payload is cut into contiguous chunks, one task per chunk is spawned
//! on a fixed-size pool, and each task writes only its own slice of the
//! output. Status slots are inspected in submission order once the batch
//! joins, so the result is identical to a single-threaded pass.

use std::ops::Range;
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::{Error, Result, SampleFault};

/// Default number of workers.
pub const DEFAULT_WORKERS: usize = 4;

/// Length of every chunk but possibly the last.
///
/// `len / workers`, raised to 1 so short payloads still make progress.
#[must_use]
pub fn chunk_len(len: usize, workers: usize) -> usize {
    (len / workers.max(1)).max(1)
}

/// Split `0..len` into the contiguous chunk ranges handed to workers.
///
/// When `len` is not a multiple of the worker count the final chunk is
/// shorter, or there are more chunks than workers. No index is dropped or
/// repeated.
#[must_use]
pub fn partition(len: usize, workers: usize) -> Vec<Range<usize>> {
    if len == 0 {
        return Vec::new();
    }
    let size = chunk_len(len, workers);
    (0..len)
        .step_by(size)
        .map(|start| start..(start + size).min(len))
        .collect()
}

/// Single-threaded reference transform.
///
/// # Errors
///
/// Returns [`Error::ChunkTransform`] (chunk 0) for the first failing element.
///
/// # Panics
///
/// Panics if `input` and `output` differ in length.
pub fn map_sequential<T, U, F>(input: &[T], output: &mut [U], f: F) -> Result<()>
where
    T: Copy,
    F: Fn(T) -> std::result::Result<U, SampleFault>,
{
    assert_eq!(input.len(), output.len(), "input and output lengths differ");
    map_chunk(0, 0, input, output, &f)
}

fn map_chunk<T, U, F>(chunk: usize, offset: usize, src: &[T], dst: &mut [U], f: &F) -> Result<()>
where
    T: Copy,
    F: Fn(T) -> std::result::Result<U, SampleFault>,
{
    for (i, (value, slot)) in src.iter().zip(dst.iter_mut()).enumerate() {
        *slot = f(*value).map_err(|source| Error::ChunkTransform {
            chunk,
            index: offset + i,
            source,
        })?;
    }
    Ok(())
}

/// Fixed-size worker pool running chunked elementwise transforms.
pub struct ChunkedTransform {
    pool: ThreadPool,
    workers: usize,
}

impl ChunkedTransform {
    /// Start a pool of `workers` threads.
    ///
    /// # Errors
    ///
    /// Returns an error if `workers` is zero or the pool cannot be built.
    pub fn new(workers: usize) -> Result<Self> {
        if workers == 0 {
            return Err(Error::InvalidParameter {
                name: "workers".to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }

        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("imgwave-worker-{i}"))
            .build()?;

        Ok(Self { pool, workers })
    }

    /// Number of workers, which is also the chunk divisor.
    #[must_use]
    pub const fn workers(&self) -> usize {
        self.workers
    }

    /// Transform `input` into a freshly allocated buffer.
    ///
    /// # Errors
    ///
    /// See [`ChunkedTransform::run_into`].
    pub fn run<T, U, F>(&self, input: &[T], f: F) -> Result<Vec<U>>
    where
        T: Copy + Sync,
        U: Copy + Default + Send,
        F: Fn(T) -> std::result::Result<U, SampleFault> + Sync,
    {
        let mut output = vec![U::default(); input.len()];
        self.run_into(input, &mut output, f, |_, _| {})?;
        Ok(output)
    }

    /// Transform `input` into `output`, one pool task per chunk.
    ///
    /// `on_chunk(done, total)` is called from worker threads as chunks
    /// finish; calls may arrive out of order.
    ///
    /// Blocks until every chunk has finished. If any chunk fails, the error
    /// of the lowest-numbered failing chunk is returned and `output` must
    /// be treated as garbage.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ChunkTransform`] if an element cannot be transformed.
    ///
    /// # Panics
    ///
    /// Panics if `input` and `output` differ in length.
    pub fn run_into<T, U, F, P>(&self, input: &[T], output: &mut [U], f: F, on_chunk: P) -> Result<()>
    where
        T: Copy + Sync,
        U: Send,
        F: Fn(T) -> std::result::Result<U, SampleFault> + Sync,
        P: Fn(usize, usize) + Sync,
    {
        assert_eq!(input.len(), output.len(), "input and output lengths differ");
        if input.is_empty() {
            return Ok(());
        }

        let size = chunk_len(input.len(), self.workers);
        let total = input.len().div_ceil(size);
        tracing::debug!(
            len = input.len(),
            workers = self.workers,
            chunk_len = size,
            chunks = total,
            "chunk plan"
        );

        let mut statuses: Vec<Result<()>> = (0..total).map(|_| Ok(())).collect();
        let completed = AtomicUsize::new(0);

        self.pool.scope(|scope| {
            let tasks = input
                .chunks(size)
                .zip(output.chunks_mut(size))
                .zip(statuses.iter_mut())
                .enumerate();

            for (chunk, ((src, dst), status)) in tasks {
                let f = &f;
                let on_chunk = &on_chunk;
                let completed = &completed;
                scope.spawn(move |_| {
                    *status = map_chunk(chunk, chunk * size, src, dst, f);
                    let done = completed.fetch_add(1, Ordering::AcqRel) + 1;
                    on_chunk(done, total);
                });
            }
        });

        statuses.into_iter().collect()
    }
}

impl std::fmt::Debug for ChunkedTransform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChunkedTransform")
            .field("workers", &self.workers)
            .finish_non_exhaustive()
    }
}
